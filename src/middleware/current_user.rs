//! Identidad del usuario que llama
//!
//! La autenticación real (emisión y verificación de tokens) vive en el
//! gateway; este servicio recibe la identidad ya resuelta en el header
//! `x-user-id` y solo verifica que el usuario exista en el directorio.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Usuario autenticado extraído de la request
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(format!("Header {} requerido", USER_ID_HEADER))
            })?;

        let user_id = Uuid::parse_str(header)
            .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

        state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        Ok(CurrentUser(user_id))
    }
}
