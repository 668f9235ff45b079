// Catalog API server
// CRUD for events, properties, and tracking plans; tracking-plan writes go
// through the transactional reconciliation in catalog-storage.

mod common;
mod events;
mod properties;
mod services;
mod tracking_plans;
mod validation;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use catalog_contracts::*;
use catalog_storage::Database;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn root() -> &'static str {
    "Data Catalog API is running!"
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        events::create_event,
        events::list_events,
        events::get_event,
        events::update_event,
        events::delete_event,
        properties::create_property,
        properties::list_properties,
        properties::get_property,
        properties::update_property,
        properties::delete_property,
        tracking_plans::create_tracking_plan,
        tracking_plans::list_tracking_plans,
        tracking_plans::get_tracking_plan,
        tracking_plans::update_tracking_plan,
        tracking_plans::delete_tracking_plan,
    ),
    components(
        schemas(
            Event, CreateEventRequest, UpdateEventRequest,
            Property, CreatePropertyRequest, UpdatePropertyRequest,
            TrackingPlan, TrackingPlanEvent, TrackingPlanEventProperty,
            EventSpec, PropertySpec,
            CreateTrackingPlanRequest, UpdateTrackingPlanRequest,
            ErrorResponse, FieldError, ValidationErrorResponse,
        )
    ),
    tags(
        (name = "events", description = "Event management endpoints"),
        (name = "properties", description = "Property management endpoints"),
        (name = "tracking-plans", description = "Tracking plan management endpoints")
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Data catalog: events, properties, and tracking plans",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("catalog-api starting...");

    // Initialize database
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable required")?;
    let db = Database::from_url(&database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to run migrations")?;
    tracing::info!("Connected to database");

    let db = Arc::new(db);

    // Create module-specific states
    let events_state = events::AppState::new(db.clone());
    let properties_state = properties::AppState::new(db.clone());
    let tracking_plans_state = tracking_plans::AppState::new(db.clone());

    // Load CORS allowed origins from environment (optional)
    // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
    let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default();

    if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
    }

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(events::routes(events_state))
        .merge(properties::routes(properties_state))
        .merge(tracking_plans::routes(tracking_plans_state));

    // Add Swagger UI
    let app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if !cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
        )
    } else {
        app
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start server
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn base_routes() -> Router {
        Router::new()
            .route("/", get(root))
            .route("/health", get(health))
    }

    #[tokio::test]
    async fn test_health() {
        let app = base_routes();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = base_routes();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Data Catalog API is running!");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = base_routes();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
    }
}
