//! Modelo de Maintenance
//!
//! Registro de mantenimiento de un vehículo. El estado se deriva del
//! conjunto de instalaciones vinculadas, nunca se incrementa a mano.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del mantenimiento - mapea al ENUM maintenance_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MaintenanceStatus {
    Pendente,
    Concluida,
}

/// Maintenance principal - mapea exactamente a la tabla maintenance
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Maintenance {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub owner_id: Uuid,
    pub maintenance_type: String,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
}

/// Maintenance con los datos del vehículo, para la lectura enriquecida
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceDetail {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub owner_id: Uuid,
    pub maintenance_type: String,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub license_plate: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
}

/// Conteo de instalaciones marcadas para cambio vs. total vinculado
/// a un registro de mantenimiento
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReplacementCounts {
    pub replaced: i64,
    pub total: i64,
}
