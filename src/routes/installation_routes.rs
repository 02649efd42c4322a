use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::installation_dto::{DischargeResponse, InstallTireRequest, MarkReplacementRequest};
use crate::dto::tire_dto::ApiResponse;
use crate::middleware::current_user::CurrentUser;
use crate::models::{Installation, InstallationDetail};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_installation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(install_tires))
        .route("/vehicle/:vehicle_id", get(list_for_vehicle))
        .route(
            "/vehicle/:vehicle_id/maintenance/:maintenance_id",
            get(list_for_maintenance),
        )
        .route("/:id/replace", patch(mark_for_replacement))
        .route("/discharge/:tire_id", delete(discharge_tire))
}

async fn install_tires(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(batch): Json<Vec<InstallTireRequest>>,
) -> Result<Json<ApiResponse<Vec<Installation>>>, AppError> {
    for item in &batch {
        item.validate()?;
    }

    let requests = batch
        .into_iter()
        .map(|item| item.into_new_installation(user.0))
        .collect();

    let installed = state.installation_service().install(requests).await?;

    Ok(Json(ApiResponse::success_with_message(
        installed,
        "Neumáticos instalados exitosamente".to_string(),
    )))
}

async fn list_for_vehicle(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<InstallationDetail>>, AppError> {
    let rows = state
        .installation_service()
        .list_for_vehicle(vehicle_id)
        .await?;

    Ok(Json(rows))
}

async fn list_for_maintenance(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((vehicle_id, maintenance_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<InstallationDetail>>, AppError> {
    let rows = state
        .installation_service()
        .list_for_maintenance(vehicle_id, maintenance_id)
        .await?;

    Ok(Json(rows))
}

async fn mark_for_replacement(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<MarkReplacementRequest>,
) -> Result<Json<ApiResponse<Installation>>, AppError> {
    request.validate()?;

    let updated = state
        .installation_service()
        .mark_for_replacement(id, request.mileage_to_replace)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Instalación marcada para cambio".to_string(),
    )))
}

async fn discharge_tire(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(tire_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DischargeResponse>>, AppError> {
    let discharged = state.installation_service().discharge(tire_id).await?;

    let message = if discharged {
        "Neumático dado de baja exitosamente"
    } else {
        "El neumático no estaba montado en ningún vehículo"
    };

    Ok(Json(ApiResponse::success_with_message(
        DischargeResponse {
            tire_id,
            discharged,
        },
        message.to_string(),
    )))
}
