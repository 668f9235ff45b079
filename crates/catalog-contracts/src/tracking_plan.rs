// Tracking plan DTOs
//
// A tracking plan composes events and properties into a schema describing
// the payloads an analytics pipeline expects. The nested response graph
// mirrors the join tables: plan -> plan events -> plan event properties,
// each join row embedding the resolved Event/Property row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{Event, Property};

/// A tracking plan with its full nested graph.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPlan {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub events: Vec<TrackingPlanEvent>,
}

/// "This plan expects this event, with this additional-properties policy."
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPlanEvent {
    pub id: i64,
    pub tracking_plan_id: i64,
    pub event_id: i64,
    pub additional_properties: bool,
    pub event: Event,
    pub properties: Vec<TrackingPlanEventProperty>,
}

/// "This event-within-this-plan expects this property, optionally required."
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPlanEventProperty {
    pub id: i64,
    pub tracking_plan_event_id: i64,
    pub property_id: i64,
    pub required: bool,
    pub property: Property,
}

/// Nested property spec inside a tracking-plan request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    /// Targets an existing join row on update; accepted and ignored on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Nested event spec inside a tracking-plan request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSpec {
    /// Targets an existing join row on update; accepted and ignored on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertySpec>>,
}

/// Request to create a tracking plan with its full graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateTrackingPlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventSpec>>,
}

/// Request to update a tracking plan. Absent scalars are left unchanged;
/// an absent `events` list leaves the join graph entirely alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTrackingPlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventSpec>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_wire_shape() {
        let plan = TrackingPlan {
            id: 1,
            name: "Plan A".to_string(),
            description: "d".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            events: vec![TrackingPlanEvent {
                id: 10,
                tracking_plan_id: 1,
                event_id: 5,
                additional_properties: true,
                event: Event {
                    id: 5,
                    name: "Clicked".to_string(),
                    event_type: "track".to_string(),
                    description: "x".to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
                properties: vec![TrackingPlanEventProperty {
                    id: 20,
                    tracking_plan_event_id: 10,
                    property_id: 8,
                    required: true,
                    property: Property {
                        id: 8,
                        name: "pid".to_string(),
                        property_type: "string".to_string(),
                        description: "y".to_string(),
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    },
                }],
            }],
        };

        let parsed: serde_json::Value = serde_json::to_value(&plan).expect("Failed to serialize");
        assert_eq!(parsed["events"][0]["trackingPlanId"], 1);
        assert_eq!(parsed["events"][0]["additionalProperties"], true);
        assert_eq!(parsed["events"][0]["event"]["name"], "Clicked");
        assert_eq!(
            parsed["events"][0]["properties"][0]["trackingPlanEventId"],
            10
        );
        assert_eq!(
            parsed["events"][0]["properties"][0]["property"]["type"],
            "string"
        );
    }

    #[test]
    fn test_create_request_camel_case_fields() {
        let req: CreateTrackingPlanRequest = serde_json::from_str(
            r#"{
                "name": "Plan A",
                "description": "d",
                "events": [{
                    "name": "Clicked",
                    "type": "track",
                    "description": "x",
                    "additionalProperties": true,
                    "properties": [{
                        "name": "pid",
                        "type": "string",
                        "description": "y",
                        "required": true
                    }]
                }]
            }"#,
        )
        .expect("Failed to deserialize");

        let events = req.events.expect("events missing");
        assert_eq!(events[0].additional_properties, Some(true));
        assert_eq!(events[0].event_type.as_deref(), Some("track"));
        let props = events[0].properties.as_ref().expect("properties missing");
        assert_eq!(props[0].required, Some(true));
        assert_eq!(props[0].property_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_spec_ids_optional() {
        let spec: EventSpec = serde_json::from_str(
            r#"{"id": 4, "name": "Clicked", "type": "track", "description": "x",
                "additionalProperties": false, "properties": []}"#,
        )
        .expect("Failed to deserialize");
        assert_eq!(spec.id, Some(4));

        let spec: EventSpec = serde_json::from_str(
            r#"{"name": "Clicked", "type": "track", "description": "x",
                "additionalProperties": false, "properties": []}"#,
        )
        .expect("Failed to deserialize");
        assert_eq!(spec.id, None);
    }
}
