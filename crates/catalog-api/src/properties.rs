// Property CRUD HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use catalog_contracts::{CreatePropertyRequest, Property, UpdatePropertyRequest};
use catalog_storage::Database;
use std::sync::Arc;

use crate::common::ApiError;
use crate::services::PropertyService;
use crate::validation;

/// App state for property routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PropertyService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(PropertyService::new(db)),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/properties", post(create_property).get(list_properties))
        .route(
            "/properties/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .with_state(state)
}

/// POST /properties - Create a new property
#[utoipa::path(
    post,
    path = "/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Validation failure or store failure")
    ),
    tag = "properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    Json(req): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let input = validation::validate_create_property(&req).map_err(ApiError::Validation)?;

    let property = state.service.create(input).await.map_err(|e| {
        tracing::error!("Failed to create property: {}", e);
        ApiError::bad_request("Failed to create property")
    })?;

    Ok((StatusCode::CREATED, Json(property)))
}

/// GET /properties - List all properties
#[utoipa::path(
    get,
    path = "/properties",
    responses(
        (status = 200, description = "List of properties", body = Vec<Property>),
        (status = 500, description = "Store failure")
    ),
    tag = "properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let properties = state.service.list().await.map_err(|e| {
        tracing::error!("Failed to list properties: {}", e);
        ApiError::internal("Failed to fetch properties")
    })?;

    Ok(Json(properties))
}

/// GET /properties/:id - Get property by id
#[utoipa::path(
    get,
    path = "/properties/{id}",
    params(
        ("id" = String, Path, description = "Property id (positive integer)")
    ),
    responses(
        (status = 200, description = "Property found", body = Property),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;

    let property = state
        .service
        .get(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get property: {}", e);
            ApiError::internal("Failed to fetch property")
        })?
        .ok_or(ApiError::NotFound("Property not found"))?;

    Ok(Json(property))
}

/// PUT /properties/:id - Update a property
///
/// A well-formed id with no matching row folds into the generic 400, per
/// the API contract for properties.
#[utoipa::path(
    put,
    path = "/properties/{id}",
    params(
        ("id" = String, Path, description = "Property id (positive integer)")
    ),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = Property),
        (status = 400, description = "Validation failure or store failure")
    ),
    tag = "properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePropertyRequest>,
) -> Result<Json<Property>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;
    let input = validation::validate_update_property(&req).map_err(ApiError::Validation)?;

    let property = state
        .service
        .update(id, input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update property: {}", e);
            ApiError::bad_request("Failed to update property")
        })?
        .ok_or(ApiError::bad_request("Failed to update property"))?;

    Ok(Json(property))
}

/// DELETE /properties/:id - Delete a property
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    params(
        ("id" = String, Path, description = "Property id (positive integer)")
    ),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 400, description = "Non-numeric id or store failure")
    ),
    tag = "properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;

    let deleted = state.service.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete property: {}", e);
        ApiError::bad_request("Failed to delete property")
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::bad_request("Failed to delete property"))
    }
}
