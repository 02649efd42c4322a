//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Tire code already registered: {0}")]
    DuplicateCode(String),

    #[error("Tire is currently in use: {0}")]
    TireInUse(String),

    #[error("Tire was already lowered: {0}")]
    TireLowered(String),

    #[error("Tire is already mounted: {0}")]
    TireAlreadyMounted(Uuid),

    #[error("Tire is referenced by installation history: {0}")]
    TireReferenced(Uuid),

    #[error("Installation not found: {0}")]
    InstallationNotFound(Uuid),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Notification delivery failure: {0}")]
    Notification(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::DuplicateCode(code) => {
                eprintln!("Duplicate tire code: {}", code);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Duplicate Code".to_string(),
                        message: format!("Ya existe un neumático registrado con el código '{}'", code),
                        details: None,
                        code: Some("DUPLICATE_CODE".to_string()),
                    },
                )
            }

            AppError::TireInUse(code) => {
                eprintln!("Tire in use: {}", code);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Tire In Use".to_string(),
                        message: format!("El neumático '{}' ya está asociado a un vehículo", code),
                        details: None,
                        code: Some("TIRE_IN_USE".to_string()),
                    },
                )
            }

            AppError::TireLowered(code) => {
                eprintln!("Tire lowered: {}", code);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Tire Lowered".to_string(),
                        message: format!("El neumático '{}' ya fue dado de baja", code),
                        details: None,
                        code: Some("TIRE_LOWERED".to_string()),
                    },
                )
            }

            AppError::TireAlreadyMounted(tire_id) => {
                eprintln!("Tire already mounted: {}", tire_id);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Tire Already Mounted".to_string(),
                        message: "El neumático ya está montado en un vehículo. Debe darlo de baja antes de instalarlo nuevamente".to_string(),
                        details: Some(json!({ "tire_id": tire_id })),
                        code: Some("TIRE_ALREADY_MOUNTED".to_string()),
                    },
                )
            }

            AppError::TireReferenced(tire_id) => {
                eprintln!("Tire referenced by installations: {}", tire_id);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Tire Referenced".to_string(),
                        message: "El neumático no puede eliminarse porque tiene historial de instalaciones".to_string(),
                        details: Some(json!({ "tire_id": tire_id })),
                        code: Some("TIRE_REFERENCED".to_string()),
                    },
                )
            }

            AppError::InstallationNotFound(id) => {
                eprintln!("Installation not found: {}", id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Installation Not Found".to_string(),
                        message: format!("No existe una instalación activa vinculada a mantenimiento para '{}'", id),
                        details: None,
                        code: Some("INSTALLATION_NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                eprintln!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                eprintln!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                eprintln!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                eprintln!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::Store(e) => {
                eprintln!("Store error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Store Unavailable".to_string(),
                        message: "The data store is temporarily unavailable".to_string(),
                        details: Some(json!({ "store_error": e.to_string() })),
                        code: Some("STORE_UNAVAILABLE".to_string()),
                    },
                )
            }

            AppError::Notification(msg) => {
                eprintln!("Notification delivery failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Notification Delivery Failure".to_string(),
                        message: "An error occurred while delivering a notification".to_string(),
                        details: Some(json!({ "delivery_error": msg })),
                        code: Some("NOTIFICATION_DELIVERY".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                eprintln!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}
