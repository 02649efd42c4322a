#![allow(dead_code)]

//! Utilidades compartidas por los tests de integración: stores en
//! memoria sembrados y un mailer de prueba que registra los envíos.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use fleet_maintenance::config::environment::EnvironmentConfig;
use fleet_maintenance::models::{
    Maintenance, MaintenanceStatus, NewTire, Tire, User, Vehicle,
};
use fleet_maintenance::notifications::{EmailNotifier, EventBroadcaster};
use fleet_maintenance::repositories::{InMemoryDb, TireStore};
use fleet_maintenance::state::AppState;
use fleet_maintenance::utils::errors::AppResult;

/// Mailer de prueba: registra (destinatario, asunto, cuerpo) sin enviar nada
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl EmailNotifier for RecordingMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Estado de aplicación completo sobre stores en memoria
pub fn memory_state() -> (Arc<InMemoryDb>, Arc<RecordingMailer>, AppState) {
    let db = Arc::new(InMemoryDb::new());
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::with_memory_db(
        db.clone(),
        EnvironmentConfig::default(),
        EventBroadcaster::new(16),
        mailer.clone(),
    );
    (db, mailer, state)
}

pub fn seed_user(
    db: &Arc<InMemoryDb>,
    name: &str,
    email: &str,
    manager_id: Option<Uuid>,
) -> Uuid {
    let id = Uuid::new_v4();
    db.seed_user(User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: if manager_id.is_some() {
            "driver".to_string()
        } else {
            "manager".to_string()
        },
        manager_id,
        created_at: Utc::now(),
    });
    id
}

pub fn seed_vehicle(
    db: &Arc<InMemoryDb>,
    owner_id: Uuid,
    license_plate: &str,
    current_mileage: f64,
) -> Uuid {
    let id = Uuid::new_v4();
    db.seed_vehicle(Vehicle {
        id,
        owner_id,
        license_plate: Some(license_plate.to_string()),
        brand: Some("Volvo".to_string()),
        model: Some("FH16".to_string()),
        current_mileage,
        created_at: Utc::now(),
    });
    id
}

pub async fn seed_tire(db: &Arc<InMemoryDb>, code: &str, owner_id: Uuid) -> Tire {
    TireStore::insert(
        db.as_ref(),
        NewTire {
            code: code.to_string(),
            brand: "Michelin".to_string(),
            model: "XZA2".to_string(),
            price: Decimal::new(45000, 2),
            durability_km: 80000.0,
            owner_id,
        },
    )
    .await
    .unwrap()
}

pub fn seed_maintenance(db: &Arc<InMemoryDb>, vehicle_id: Uuid, owner_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    db.seed_maintenance(Maintenance {
        id,
        vehicle_id,
        owner_id,
        maintenance_type: "Cambio de neumáticos".to_string(),
        status: MaintenanceStatus::Pendente,
        created_at: Utc::now(),
    });
    id
}
