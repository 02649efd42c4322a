use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::tire_dto::{
    AnalysisStatusRequest, AnalysisStatusResponse, ApiResponse, CreateTireRequest,
    TireListQuery, TireListResponse, UpdateTireRequest,
};
use crate::middleware::current_user::CurrentUser;
use crate::models::Tire;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tire_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_tire))
        .route("/", get(list_tires))
        .route("/code/:code", get(get_tire_by_code))
        .route("/:id", get(get_tire))
        .route("/:id", put(update_tire))
        .route("/:id", delete(delete_tire))
        .route("/:id/analysis", patch(update_analysis_status))
}

async fn register_tire(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateTireRequest>,
) -> Result<Json<ApiResponse<Tire>>, AppError> {
    request.validate()?;

    let tire = state
        .tire_service()
        .register(request.into_new_tire(user.0))
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        tire,
        "Neumático registrado exitosamente".to_string(),
    )))
}

async fn list_tires(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<TireListQuery>,
) -> Result<Json<TireListResponse>, AppError> {
    let (data, total) = state
        .tire_service()
        .list(user.0, &query.filters(), query.page(), query.limit())
        .await?;

    Ok(Json(TireListResponse::new(
        data,
        total,
        query.page(),
        query.limit(),
    )))
}

async fn get_tire(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Tire>, AppError> {
    let tire = state.tire_service().get(id).await?;
    Ok(Json(tire))
}

async fn get_tire_by_code(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<Tire>, AppError> {
    let tire = state.tire_service().get_by_code(&code).await?;
    Ok(Json(tire))
}

async fn update_tire(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTireRequest>,
) -> Result<Json<ApiResponse<Tire>>, AppError> {
    request.validate()?;

    let tire = state
        .tire_service()
        .update(id, request.into_changes())
        .await?;

    Ok(Json(ApiResponse::success(tire)))
}

async fn delete_tire(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.tire_service().destroy(id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Neumático eliminado exitosamente"
    })))
}

async fn update_analysis_status(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AnalysisStatusRequest>,
) -> Result<Json<ApiResponse<AnalysisStatusResponse>>, AppError> {
    request.validate()?;

    let status = state
        .tire_service()
        .update_status_after_analysis(id, &request.replacement_reason)
        .await?;

    Ok(Json(ApiResponse::success(AnalysisStatusResponse {
        tire_id: id,
        status,
    })))
}
