// Tracking plan HTTP routes
//
// Unlike events/properties, a well-formed-but-unknown plan id surfaces as
// 404 on update and delete; only genuine store failures fold into 400.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use catalog_contracts::{CreateTrackingPlanRequest, TrackingPlan, UpdateTrackingPlanRequest};
use catalog_storage::{Database, StoreError};
use std::sync::Arc;

use crate::common::ApiError;
use crate::services::TrackingPlanService;
use crate::validation;

/// App state for tracking plan routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TrackingPlanService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(TrackingPlanService::new(db)),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/tracking-plans",
            post(create_tracking_plan).get(list_tracking_plans),
        )
        .route(
            "/tracking-plans/:id",
            get(get_tracking_plan)
                .put(update_tracking_plan)
                .delete(delete_tracking_plan),
        )
        .with_state(state)
}

/// POST /tracking-plans - Create a tracking plan with its full graph
#[utoipa::path(
    post,
    path = "/tracking-plans",
    request_body = CreateTrackingPlanRequest,
    responses(
        (status = 201, description = "Tracking plan created", body = TrackingPlan),
        (status = 400, description = "Validation failure or store failure")
    ),
    tag = "tracking-plans"
)]
pub async fn create_tracking_plan(
    State(state): State<AppState>,
    Json(req): Json<CreateTrackingPlanRequest>,
) -> Result<(StatusCode, Json<TrackingPlan>), ApiError> {
    let input = validation::validate_create_tracking_plan(&req).map_err(ApiError::Validation)?;

    let plan = state.service.create(input).await.map_err(|e| {
        tracing::error!("Failed to create tracking plan: {}", e);
        ApiError::bad_request("Failed to create tracking plan")
    })?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /tracking-plans - List all tracking plans with their graphs
#[utoipa::path(
    get,
    path = "/tracking-plans",
    responses(
        (status = 200, description = "List of tracking plans", body = Vec<TrackingPlan>),
        (status = 500, description = "Store failure")
    ),
    tag = "tracking-plans"
)]
pub async fn list_tracking_plans(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrackingPlan>>, ApiError> {
    let plans = state.service.list().await.map_err(|e| {
        tracing::error!("Failed to list tracking plans: {}", e);
        ApiError::internal("Failed to fetch tracking plans")
    })?;

    Ok(Json(plans))
}

/// GET /tracking-plans/:id - Get a tracking plan with its graph
#[utoipa::path(
    get,
    path = "/tracking-plans/{id}",
    params(
        ("id" = String, Path, description = "Tracking plan id (positive integer)")
    ),
    responses(
        (status = 200, description = "Tracking plan found", body = TrackingPlan),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "Tracking plan not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "tracking-plans"
)]
pub async fn get_tracking_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrackingPlan>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;

    let plan = state
        .service
        .get(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get tracking plan: {}", e);
            ApiError::internal("Failed to fetch tracking plan")
        })?
        .ok_or(ApiError::NotFound("Tracking plan not found"))?;

    Ok(Json(plan))
}

/// PUT /tracking-plans/:id - Update a tracking plan and reconcile its graph
#[utoipa::path(
    put,
    path = "/tracking-plans/{id}",
    params(
        ("id" = String, Path, description = "Tracking plan id (positive integer)")
    ),
    request_body = UpdateTrackingPlanRequest,
    responses(
        (status = 200, description = "Tracking plan updated", body = TrackingPlan),
        (status = 400, description = "Validation failure or store failure"),
        (status = 404, description = "Tracking plan not found")
    ),
    tag = "tracking-plans"
)]
pub async fn update_tracking_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTrackingPlanRequest>,
) -> Result<Json<TrackingPlan>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;
    let input = validation::validate_update_tracking_plan(&req).map_err(ApiError::Validation)?;

    let plan = state.service.update(id, input).await.map_err(|e| match e {
        StoreError::NotFound(_, _) => ApiError::NotFound("Tracking plan not found"),
        other => {
            tracing::error!("Failed to update tracking plan: {}", other);
            ApiError::bad_request("Failed to update tracking plan")
        }
    })?;

    Ok(Json(plan))
}

/// DELETE /tracking-plans/:id - Delete a tracking plan
///
/// Join rows go with the plan; the referenced events/properties stay.
#[utoipa::path(
    delete,
    path = "/tracking-plans/{id}",
    params(
        ("id" = String, Path, description = "Tracking plan id (positive integer)")
    ),
    responses(
        (status = 204, description = "Tracking plan deleted"),
        (status = 400, description = "Non-numeric id or store failure"),
        (status = 404, description = "Tracking plan not found")
    ),
    tag = "tracking-plans"
)]
pub async fn delete_tracking_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;

    let deleted = state.service.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete tracking plan: {}", e);
        ApiError::bad_request("Failed to delete tracking plan")
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Tracking plan not found"))
    }
}
