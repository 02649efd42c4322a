use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::middleware::current_user::CurrentUser;
use crate::models::MaintenanceDetail;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new().route("/:id", get(get_maintenance))
}

async fn get_maintenance(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceDetail>, AppError> {
    let detail = state
        .maintenance
        .find_detail(id)
        .await?
        .ok_or_else(|| not_found_error("Maintenance", &id.to_string()))?;

    Ok(Json(detail))
}
