// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

// ============================================
// Event models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub event_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub name: String,
    pub event_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub event_type: Option<String>,
    pub description: Option<String>,
}

// ============================================
// Property models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct PropertyRow {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub property_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateProperty {
    pub name: String,
    pub property_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProperty {
    pub name: Option<String>,
    pub property_type: Option<String>,
    pub description: Option<String>,
}

// ============================================
// Tracking plan models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct TrackingPlanRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TrackingPlanEventRow {
    pub id: i64,
    pub tracking_plan_id: i64,
    pub event_id: i64,
    pub additional_properties: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TrackingPlanEventPropertyRow {
    pub id: i64,
    pub tracking_plan_event_id: i64,
    pub property_id: i64,
    pub required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================
// Reconciliation inputs
// ============================================

/// Property entry inside a plan create/update graph.
/// `id` targets an existing join row on update; ignored on create.
#[derive(Debug, Clone)]
pub struct PlanPropertySpec {
    pub id: Option<i64>,
    pub name: String,
    pub property_type: String,
    pub description: String,
    pub required: bool,
}

/// Event entry inside a plan create/update graph.
#[derive(Debug, Clone)]
pub struct PlanEventSpec {
    pub id: Option<i64>,
    pub name: String,
    pub event_type: String,
    pub description: String,
    pub additional_properties: bool,
    pub properties: Vec<PlanPropertySpec>,
}

#[derive(Debug, Clone)]
pub struct CreateTrackingPlan {
    pub name: String,
    pub description: String,
    pub events: Vec<PlanEventSpec>,
}

/// Absent scalars leave the stored value unchanged; an absent `events`
/// list leaves the join graph alone.
#[derive(Debug, Clone, Default)]
pub struct UpdateTrackingPlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub events: Option<Vec<PlanEventSpec>>,
}

// ============================================
// Assembled graph (read model)
// ============================================

/// A plan with its join rows and the resolved event/property rows.
#[derive(Debug, Clone)]
pub struct TrackingPlanGraph {
    pub plan: TrackingPlanRow,
    pub events: Vec<PlanEventGraph>,
}

#[derive(Debug, Clone)]
pub struct PlanEventGraph {
    pub link: TrackingPlanEventRow,
    pub event: EventRow,
    pub properties: Vec<PlanPropertyGraph>,
}

#[derive(Debug, Clone)]
pub struct PlanPropertyGraph {
    pub link: TrackingPlanEventPropertyRow,
    pub property: PropertyRow,
}
