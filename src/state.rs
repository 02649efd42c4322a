//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los stores se guardan como trait objects
//! para que los handlers y los tests trabajen contra la misma interfaz:
//! Postgres en producción, `InMemoryDb` en pruebas.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::notifications::{EmailNotifier, EventBroadcaster};
use crate::repositories::{
    InMemoryDb, InstallationStore, MaintenanceStore, PgInstallationRepository,
    PgMaintenanceRepository, PgTireRepository, PgUserDirectory, PgVehicleRepository, TireStore,
    UserDirectory, VehicleStore,
};
use crate::services::{
    AccessScopeService, InstallationService, MaintenanceStatusService, TireService, WearScanner,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub tires: Arc<dyn TireStore>,
    pub installations: Arc<dyn InstallationStore>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub users: Arc<dyn UserDirectory>,
    pub maintenance: Arc<dyn MaintenanceStore>,
    pub broadcaster: EventBroadcaster,
    pub mailer: Arc<dyn EmailNotifier>,
}

impl AppState {
    /// Estado de producción sobre Postgres
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        broadcaster: EventBroadcaster,
        mailer: Arc<dyn EmailNotifier>,
    ) -> Self {
        Self {
            config,
            tires: Arc::new(PgTireRepository::new(pool.clone())),
            installations: Arc::new(PgInstallationRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            users: Arc::new(PgUserDirectory::new(pool.clone())),
            maintenance: Arc::new(PgMaintenanceRepository::new(pool)),
            broadcaster,
            mailer,
        }
    }

    /// Estado sobre stores en memoria, para pruebas sin Postgres
    pub fn with_memory_db(
        db: Arc<InMemoryDb>,
        config: EnvironmentConfig,
        broadcaster: EventBroadcaster,
        mailer: Arc<dyn EmailNotifier>,
    ) -> Self {
        Self {
            config,
            tires: db.clone(),
            installations: db.clone(),
            vehicles: db.clone(),
            users: db.clone(),
            maintenance: db,
            broadcaster,
            mailer,
        }
    }

    pub fn scope_service(&self) -> AccessScopeService {
        AccessScopeService::new(self.users.clone())
    }

    pub fn tire_service(&self) -> TireService {
        TireService::new(
            self.tires.clone(),
            self.installations.clone(),
            self.scope_service(),
        )
    }

    pub fn maintenance_status_service(&self) -> MaintenanceStatusService {
        MaintenanceStatusService::new(self.installations.clone(), self.maintenance.clone())
    }

    pub fn installation_service(&self) -> InstallationService {
        InstallationService::new(
            self.installations.clone(),
            self.tires.clone(),
            self.vehicles.clone(),
            self.maintenance_status_service(),
        )
    }

    pub fn wear_scanner(&self) -> WearScanner {
        WearScanner::new(
            self.installations.clone(),
            self.broadcaster.clone(),
            self.mailer.clone(),
        )
    }
}
