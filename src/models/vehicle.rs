//! Modelo de Vehicle
//!
//! El vehículo es un colaborador externo para este servicio: solo se lee.
//! Su kilometraje actual es la fuente autoritativa para el cálculo de desgaste.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
///
/// `license_plate` admite NULL: flotas migradas llegan sin placa y el
/// escáner de desgaste salta esas filas al notificar.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub license_plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub current_mileage: f64,
    pub created_at: DateTime<Utc>,
}
