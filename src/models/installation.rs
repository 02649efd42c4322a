//! Modelo de Installation
//!
//! Este módulo contiene los structs que mapean a la tabla vehicle_tires:
//! cada fila representa un evento de montaje de un neumático en un vehículo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Installation principal - mapea exactamente a la tabla vehicle_tires
///
/// `to_replace = false` identifica la instalación viva de un neumático;
/// al marcarlo para cambio la fila se conserva como historial.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Installation {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub tire_id: Uuid,
    pub owner_id: Uuid,
    pub maintenance_id: Option<Uuid>,
    pub installation_date: DateTime<Utc>,
    pub mileage_at_installation: f64,
    pub predicted_replacement_mileage: f64,
    pub to_replace: bool,
    pub mileage_to_replace: Option<f64>,
}

/// Datos para registrar un montaje nuevo
#[derive(Debug, Clone)]
pub struct NewInstallation {
    pub vehicle_id: Uuid,
    pub tire_id: Uuid,
    pub owner_id: Uuid,
    pub maintenance_id: Option<Uuid>,
    pub installation_date: DateTime<Utc>,
    pub mileage_at_installation: f64,
    pub predicted_replacement_mileage: f64,
}

/// Instalación enriquecida con identidad del neumático y kilometraje actual
/// del vehículo - resultado de los listados con JOIN
///
/// `needs_replacement` se calcula en la propia consulta:
/// odómetro actual >= montaje + kilometraje previsto.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InstallationDetail {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub tire_id: Uuid,
    pub maintenance_id: Option<Uuid>,
    pub installation_date: DateTime<Utc>,
    pub mileage_at_installation: f64,
    pub predicted_replacement_mileage: f64,
    pub to_replace: bool,
    pub mileage_to_replace: Option<f64>,
    pub code: String,
    pub brand: String,
    pub model: String,
    pub current_mileage: f64,
    pub needs_replacement: bool,
}

/// Fila del escaneo de desgaste: instalación viva con kilometraje actual,
/// código del neumático y correo del responsable
///
/// `license_plate` y `email` son NULL cuando el JOIN devuelve datos
/// incompletos; el escáner salta esas filas en lugar de abortar.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WearCandidate {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub tire_id: Uuid,
    pub code: String,
    pub license_plate: Option<String>,
    pub email: Option<String>,
    pub mileage_at_installation: f64,
    pub predicted_replacement_mileage: f64,
    pub current_mileage: f64,
}
