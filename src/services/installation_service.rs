//! Servicio del libro de instalaciones
//!
//! Dueño de la asociación vehículo↔neumático: montaje por lotes,
//! marcado para cambio y baja. El lote completo se valida antes de
//! escribir y la escritura es transaccional, así nunca queda un lote
//! a medio insertar.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Installation, InstallationDetail, NewInstallation};
use crate::repositories::{InstallationStore, TireStore, VehicleStore};
use crate::services::maintenance_service::MaintenanceStatusService;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Servicio de instalaciones
#[derive(Clone)]
pub struct InstallationService {
    installations: Arc<dyn InstallationStore>,
    tires: Arc<dyn TireStore>,
    vehicles: Arc<dyn VehicleStore>,
    maintenance_status: MaintenanceStatusService,
}

impl InstallationService {
    pub fn new(
        installations: Arc<dyn InstallationStore>,
        tires: Arc<dyn TireStore>,
        vehicles: Arc<dyn VehicleStore>,
        maintenance_status: MaintenanceStatusService,
    ) -> Self {
        Self {
            installations,
            tires,
            vehicles,
            maintenance_status,
        }
    }

    /// Monta un lote de neumáticos, todo o nada.
    ///
    /// Cada elemento se valida primero (vehículo y neumático existen,
    /// el neumático no está montado en otro lado); si alguno falla se
    /// rechaza el lote entero sin escribir nada.
    pub async fn install(&self, batch: Vec<NewInstallation>) -> AppResult<Vec<Installation>> {
        if batch.is_empty() {
            return Err(AppError::BadRequest(
                "El lote de instalación no puede estar vacío".to_string(),
            ));
        }

        for item in &batch {
            self.vehicles
                .find_by_id(item.vehicle_id)
                .await?
                .ok_or_else(|| not_found_error("Vehicle", &item.vehicle_id.to_string()))?;

            self.tires
                .find_by_id(item.tire_id)
                .await?
                .ok_or_else(|| not_found_error("Tire", &item.tire_id.to_string()))?;

            if self
                .installations
                .is_mounted_elsewhere(item.tire_id, item.vehicle_id)
                .await?
            {
                return Err(AppError::TireAlreadyMounted(item.tire_id));
            }
        }

        let installed = self.installations.install_batch(batch).await?;
        log::info!("🛞 Lote instalado: {} neumáticos montados", installed.len());

        Ok(installed)
    }

    /// Marca una instalación para cambio y recalcula el estado del
    /// mantenimiento vinculado.
    ///
    /// Solo las filas vinculadas a un mantenimiento pueden marcarse;
    /// el neumático vuelve a available en la misma operación.
    pub async fn mark_for_replacement(
        &self,
        installation_id: Uuid,
        mileage_to_replace: f64,
    ) -> AppResult<Installation> {
        let row = self
            .installations
            .find_by_id(installation_id)
            .await?
            .ok_or(AppError::InstallationNotFound(installation_id))?;

        let Some(maintenance_id) = row.maintenance_id else {
            return Err(AppError::InstallationNotFound(installation_id));
        };

        let updated = self
            .installations
            .mark_to_replace(installation_id, mileage_to_replace)
            .await?;

        let status = self.maintenance_status.recompute(maintenance_id).await?;
        log::info!(
            "🔧 Instalación {} marcada para cambio, mantenimiento {} => {:?}",
            installation_id,
            maintenance_id,
            status
        );

        Ok(updated)
    }

    /// Da de baja la instalación más antigua del neumático.
    ///
    /// Devuelve false si el neumático no estaba montado en ningún
    /// vehículo; en ese caso no hay nada que eliminar.
    pub async fn discharge(&self, tire_id: Uuid) -> AppResult<bool> {
        let removed = self.installations.discharge_by_tire(tire_id).await?;

        if removed {
            log::info!("⬇️ Neumático {} dado de baja de su vehículo", tire_id);
        } else {
            log::warn!("⚠️ El neumático {} no está montado en ningún vehículo", tire_id);
        }

        Ok(removed)
    }

    pub async fn list_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<InstallationDetail>> {
        self.installations.list_for_vehicle(vehicle_id).await
    }

    pub async fn list_for_maintenance(
        &self,
        vehicle_id: Uuid,
        maintenance_id: Uuid,
    ) -> AppResult<Vec<InstallationDetail>> {
        self.installations
            .list_for_maintenance(vehicle_id, maintenance_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTire, Vehicle};
    use crate::repositories::InMemoryDb;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn service(db: &Arc<InMemoryDb>) -> InstallationService {
        InstallationService::new(
            db.clone(),
            db.clone(),
            db.clone(),
            MaintenanceStatusService::new(db.clone(), db.clone()),
        )
    }

    async fn seed_tire(db: &Arc<InMemoryDb>, code: &str, owner_id: Uuid) -> Uuid {
        TireStore::insert(
            db.as_ref(),
            NewTire {
                code: code.to_string(),
                brand: "Pirelli".to_string(),
                model: "FR85".to_string(),
                price: Decimal::new(38000, 2),
                durability_km: 60000.0,
                owner_id,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn seed_vehicle(db: &Arc<InMemoryDb>, owner_id: Uuid, mileage: f64) -> Uuid {
        let id = Uuid::new_v4();
        db.seed_vehicle(Vehicle {
            id,
            owner_id,
            license_plate: Some(format!("ABC-{}", &id.to_string()[..4])),
            brand: None,
            model: None,
            current_mileage: mileage,
            created_at: Utc::now(),
        });
        id
    }

    fn request(vehicle_id: Uuid, tire_id: Uuid, owner_id: Uuid) -> NewInstallation {
        NewInstallation {
            vehicle_id,
            tire_id,
            owner_id,
            maintenance_id: None,
            installation_date: Utc::now(),
            mileage_at_installation: 10000.0,
            predicted_replacement_mileage: 10000.0,
        }
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let db = Arc::new(InMemoryDb::new());
        let err = service(&db).install(vec![]).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_batch_with_unknown_vehicle_is_rejected_whole() {
        let db = Arc::new(InMemoryDb::new());
        let svc = service(&db);
        let owner = Uuid::new_v4();

        let vehicle = seed_vehicle(&db, owner, 10000.0);
        let tire_a = seed_tire(&db, "L001", owner).await;
        let tire_b = seed_tire(&db, "L002", owner).await;

        let err = svc
            .install(vec![
                request(vehicle, tire_a, owner),
                request(Uuid::new_v4(), tire_b, owner),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        // Nada del lote quedó escrito
        assert_eq!(
            InstallationStore::count_for_tire(db.as_ref(), tire_a)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_same_tire_twice_in_one_batch_is_rejected() {
        let db = Arc::new(InMemoryDb::new());
        let svc = service(&db);
        let owner = Uuid::new_v4();

        let vehicle_a = seed_vehicle(&db, owner, 5000.0);
        let vehicle_b = seed_vehicle(&db, owner, 8000.0);
        let tire = seed_tire(&db, "L003", owner).await;

        let err = svc
            .install(vec![
                request(vehicle_a, tire, owner),
                request(vehicle_b, tire, owner),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::TireAlreadyMounted(id) if id == tire));
    }

    #[tokio::test]
    async fn test_mark_without_maintenance_link_fails() {
        let db = Arc::new(InMemoryDb::new());
        let svc = service(&db);
        let owner = Uuid::new_v4();

        let vehicle = seed_vehicle(&db, owner, 10000.0);
        let tire = seed_tire(&db, "L004", owner).await;

        let installed = svc
            .install(vec![request(vehicle, tire, owner)])
            .await
            .unwrap();

        let err = svc
            .mark_for_replacement(installed[0].id, 20000.0)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InstallationNotFound(_)));
    }

    #[tokio::test]
    async fn test_discharge_of_unmounted_tire_returns_false() {
        let db = Arc::new(InMemoryDb::new());
        let svc = service(&db);

        let tire = seed_tire(&db, "L005", Uuid::new_v4()).await;
        let removed = svc.discharge(tire).await.unwrap();

        assert!(!removed);
    }
}
