// Event CRUD HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use catalog_contracts::{CreateEventRequest, Event, UpdateEventRequest};
use catalog_storage::Database;
use std::sync::Arc;

use crate::common::ApiError;
use crate::services::EventService;
use crate::validation;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(EventService::new(db)),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route(
            "/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(state)
}

/// POST /events - Create a new event
#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation failure or store failure")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let input = validation::validate_create_event(&req).map_err(ApiError::Validation)?;

    let event = state.service.create(input).await.map_err(|e| {
        tracing::error!("Failed to create event: {}", e);
        ApiError::bad_request("Failed to create event")
    })?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /events - List all events
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.service.list().await.map_err(|e| {
        tracing::error!("Failed to list events: {}", e);
        ApiError::internal("Failed to fetch events")
    })?;

    Ok(Json(events))
}

/// GET /events/:id - Get event by id
#[utoipa::path(
    get,
    path = "/events/{id}",
    params(
        ("id" = String, Path, description = "Event id (positive integer)")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;

    let event = state
        .service
        .get(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get event: {}", e);
            ApiError::internal("Failed to fetch event")
        })?
        .ok_or(ApiError::NotFound("Event not found"))?;

    Ok(Json(event))
}

/// PUT /events/:id - Update an event
///
/// A well-formed id with no matching row folds into the generic 400, per
/// the API contract for events.
#[utoipa::path(
    put,
    path = "/events/{id}",
    params(
        ("id" = String, Path, description = "Event id (positive integer)")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Validation failure or store failure")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;
    let input = validation::validate_update_event(&req).map_err(ApiError::Validation)?;

    let event = state
        .service
        .update(id, input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update event: {}", e);
            ApiError::bad_request("Failed to update event")
        })?
        .ok_or(ApiError::bad_request("Failed to update event"))?;

    Ok(Json(event))
}

/// DELETE /events/:id - Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    params(
        ("id" = String, Path, description = "Event id (positive integer)")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, description = "Non-numeric id or store failure")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;

    let deleted = state.service.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete event: {}", e);
        ApiError::bad_request("Failed to delete event")
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::bad_request("Failed to delete event"))
    }
}
