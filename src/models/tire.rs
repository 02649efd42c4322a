//! Modelo de Tire
//!
//! Este módulo contiene el struct Tire y sus variantes para el registro
//! de neumáticos. Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del neumático - mapea al ENUM tire_status
///
/// Ciclo de vida: `available` → `in_use` (instalado) → `available`
/// (marcado para cambio o dado de baja) o `lower` (baja definitiva por defecto).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tire_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TireStatus {
    Available,
    InUse,
    Lower,
}

impl TireStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TireStatus::Available => "available",
            TireStatus::InUse => "in_use",
            TireStatus::Lower => "lower",
        }
    }
}

/// Tire principal - mapea exactamente a la tabla tires
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tire {
    pub id: Uuid,
    pub code: String,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub durability_km: f64,
    pub status: TireStatus,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Datos para registrar un nuevo neumático
#[derive(Debug, Clone)]
pub struct NewTire {
    pub code: String,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub durability_km: f64,
    pub owner_id: Uuid,
}

/// Campos actualizables de un neumático
#[derive(Debug, Clone, Default)]
pub struct TireUpdate {
    pub code: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<Decimal>,
    pub durability_km: Option<f64>,
}

/// Filtros para búsqueda de neumáticos
#[derive(Debug, Clone, Default)]
pub struct TireFilters {
    pub code: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub status: Option<TireStatus>,
}
