use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewTire, Tire, TireFilters, TireStatus, TireUpdate};

// Request para registrar un neumático
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTireRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: String,

    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    pub price: Decimal,

    #[validate(range(min = 1.0))]
    pub durability_km: f64,
}

impl CreateTireRequest {
    pub fn into_new_tire(self, owner_id: Uuid) -> NewTire {
        NewTire {
            code: self.code,
            brand: self.brand,
            model: self.model,
            price: self.price,
            durability_km: self.durability_km,
            owner_id,
        }
    }
}

// Request para actualizar un neumático (campos opcionales)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTireRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub price: Option<Decimal>,

    #[validate(range(min = 1.0))]
    pub durability_km: Option<f64>,
}

impl UpdateTireRequest {
    pub fn into_changes(self) -> TireUpdate {
        TireUpdate {
            code: self.code,
            brand: self.brand,
            model: self.model,
            price: self.price,
            durability_km: self.durability_km,
        }
    }
}

// Query params del listado paginado
#[derive(Debug, Default, Deserialize)]
pub struct TireListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub code: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub status: Option<TireStatus>,
}

impl TireListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn filters(&self) -> TireFilters {
        TireFilters {
            code: self.code.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            status: self.status,
        }
    }
}

// Response del listado paginado
#[derive(Debug, Serialize)]
pub struct TireListResponse {
    pub data: Vec<Tire>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl TireListResponse {
    pub fn new(data: Vec<Tire>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

// Request del análisis post-cambio
#[derive(Debug, Deserialize, Validate)]
pub struct AnalysisStatusRequest {
    #[validate(length(min = 1, max = 100))]
    pub replacement_reason: String,
}

// Response del análisis: estado resultante
#[derive(Debug, Serialize)]
pub struct AnalysisStatusResponse {
    pub tire_id: Uuid,
    pub status: TireStatus,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
