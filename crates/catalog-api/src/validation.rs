// Request validation
//
// Pure shape checks, evaluated before any store call. Each validator takes
// a raw request DTO (every field optional at the serde level) and returns
// either the coerced storage input or the full ordered list of field
// errors. Nested fields report indexed paths: events[0].properties[2].type.

use catalog_contracts::{
    CreateEventRequest, CreatePropertyRequest, CreateTrackingPlanRequest, EventSpec, FieldError,
    PropertySpec, UpdateEventRequest, UpdatePropertyRequest, UpdateTrackingPlanRequest,
    PROPERTY_TYPES,
};
use catalog_storage::{
    CreateEvent, CreateProperty, CreateTrackingPlan, PlanEventSpec, PlanPropertySpec, UpdateEvent,
    UpdateProperty, UpdateTrackingPlan,
};

type Validated<T> = Result<T, Vec<FieldError>>;

/// Path `:id` parameters: must parse as a positive integer. A non-numeric
/// value is a validation failure, never a not-found.
pub fn parse_id(raw: &str) -> Validated<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(vec![FieldError::new(
            "id",
            "id must be a positive integer",
        )]),
    }
}

pub fn validate_create_event(req: &CreateEventRequest) -> Validated<CreateEvent> {
    let mut errors = Vec::new();
    let name = required_string(&mut errors, "name", &req.name);
    let event_type = required_string(&mut errors, "type", &req.event_type);
    let description = required_string(&mut errors, "description", &req.description);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(CreateEvent {
        name,
        event_type,
        description,
    })
}

pub fn validate_update_event(req: &UpdateEventRequest) -> Validated<UpdateEvent> {
    let mut errors = Vec::new();
    let name = optional_string(&mut errors, "name", &req.name);
    let event_type = optional_string(&mut errors, "type", &req.event_type);
    let description = optional_string(&mut errors, "description", &req.description);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(UpdateEvent {
        name,
        event_type,
        description,
    })
}

pub fn validate_create_property(req: &CreatePropertyRequest) -> Validated<CreateProperty> {
    let mut errors = Vec::new();
    let name = required_string(&mut errors, "name", &req.name);
    let property_type = required_string(&mut errors, "type", &req.property_type);
    if req.property_type.is_some() {
        check_property_type(&mut errors, "type", &property_type);
    }
    let description = required_string(&mut errors, "description", &req.description);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(CreateProperty {
        name,
        property_type,
        description,
    })
}

pub fn validate_update_property(req: &UpdatePropertyRequest) -> Validated<UpdateProperty> {
    let mut errors = Vec::new();
    let name = optional_string(&mut errors, "name", &req.name);
    let property_type = optional_string(&mut errors, "type", &req.property_type);
    if let Some(ref value) = property_type {
        check_property_type(&mut errors, "type", value);
    }
    let description = optional_string(&mut errors, "description", &req.description);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(UpdateProperty {
        name,
        property_type,
        description,
    })
}

pub fn validate_create_tracking_plan(
    req: &CreateTrackingPlanRequest,
) -> Validated<CreateTrackingPlan> {
    let mut errors = Vec::new();
    let name = required_string(&mut errors, "name", &req.name);
    let description = required_string(&mut errors, "description", &req.description);

    let events = match &req.events {
        Some(specs) => validate_event_specs(&mut errors, specs),
        None => {
            errors.push(FieldError::new("events", "events is required"));
            Vec::new()
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(CreateTrackingPlan {
        name,
        description,
        events,
    })
}

pub fn validate_update_tracking_plan(
    req: &UpdateTrackingPlanRequest,
) -> Validated<UpdateTrackingPlan> {
    let mut errors = Vec::new();
    let name = optional_string(&mut errors, "name", &req.name);
    let description = optional_string(&mut errors, "description", &req.description);

    let events = req
        .events
        .as_ref()
        .map(|specs| validate_event_specs(&mut errors, specs));

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(UpdateTrackingPlan {
        name,
        description,
        events,
    })
}

fn validate_event_specs(errors: &mut Vec<FieldError>, specs: &[EventSpec]) -> Vec<PlanEventSpec> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| validate_event_spec(errors, &format!("events[{i}]"), spec))
        .collect()
}

fn validate_event_spec(
    errors: &mut Vec<FieldError>,
    prefix: &str,
    spec: &EventSpec,
) -> PlanEventSpec {
    let id = check_spec_id(errors, prefix, spec.id);
    let name = required_string(errors, &format!("{prefix}.name"), &spec.name);
    let event_type = required_string(errors, &format!("{prefix}.type"), &spec.event_type);
    let description = required_string(errors, &format!("{prefix}.description"), &spec.description);

    let additional_properties = match spec.additional_properties {
        Some(value) => value,
        None => {
            errors.push(FieldError::new(
                format!("{prefix}.additionalProperties"),
                "additionalProperties is required",
            ));
            false
        }
    };

    let properties = match &spec.properties {
        Some(specs) => specs
            .iter()
            .enumerate()
            .map(|(i, p)| validate_property_spec(errors, &format!("{prefix}.properties[{i}]"), p))
            .collect(),
        None => {
            errors.push(FieldError::new(
                format!("{prefix}.properties"),
                "properties is required",
            ));
            Vec::new()
        }
    };

    PlanEventSpec {
        id,
        name,
        event_type,
        description,
        additional_properties,
        properties,
    }
}

fn validate_property_spec(
    errors: &mut Vec<FieldError>,
    prefix: &str,
    spec: &PropertySpec,
) -> PlanPropertySpec {
    let id = check_spec_id(errors, prefix, spec.id);
    let name = required_string(errors, &format!("{prefix}.name"), &spec.name);
    let field = format!("{prefix}.type");
    let property_type = required_string(errors, &field, &spec.property_type);
    if spec.property_type.is_some() {
        check_property_type(errors, &field, &property_type);
    }
    let description = required_string(errors, &format!("{prefix}.description"), &spec.description);

    let required = match spec.required {
        Some(value) => value,
        None => {
            errors.push(FieldError::new(
                format!("{prefix}.required"),
                "required is required",
            ));
            false
        }
    };

    PlanPropertySpec {
        id,
        name,
        property_type,
        description,
        required,
    }
}

fn required_string(errors: &mut Vec<FieldError>, field: &str, value: &Option<String>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.clone(),
        Some(_) => {
            errors.push(FieldError::new(
                field,
                format!("{} must be a non-empty string", leaf(field)),
            ));
            String::new()
        }
        None => {
            errors.push(FieldError::new(field, format!("{} is required", leaf(field))));
            String::new()
        }
    }
}

fn optional_string(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &Option<String>,
) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(
                field,
                format!("{} must be a non-empty string", leaf(field)),
            ));
            None
        }
        None => None,
    }
}

fn check_property_type(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if !value.is_empty() && !PROPERTY_TYPES.contains(&value) {
        errors.push(FieldError::new(
            field,
            format!("type must be one of {}", PROPERTY_TYPES.join(", ")),
        ));
    }
}

/// Nested spec ids are optional but must be positive when present.
fn check_spec_id(errors: &mut Vec<FieldError>, prefix: &str, id: Option<i64>) -> Option<i64> {
    match id {
        Some(value) if value >= 1 => Some(value),
        Some(_) => {
            errors.push(FieldError::new(
                format!("{prefix}.id"),
                "id must be a positive integer",
            ));
            None
        }
        None => None,
    }
}

/// Last segment of a field path, for message text.
fn leaf(field: &str) -> &str {
    field.rsplit('.').next().unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_event_req(name: &str, event_type: &str, description: &str) -> CreateEventRequest {
        CreateEventRequest {
            name: Some(name.to_string()),
            event_type: Some(event_type.to_string()),
            description: Some(description.to_string()),
        }
    }

    #[test]
    fn test_parse_id_valid() {
        assert_eq!(parse_id("42").expect("valid id"), 42);
        assert_eq!(parse_id("1").expect("valid id"), 1);
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        let errors = parse_id("abc").expect_err("non-numeric id");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "id");
        assert_eq!(errors[0].message, "id must be a positive integer");
    }

    #[test]
    fn test_parse_id_rejects_zero_and_negative() {
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
    }

    #[test]
    fn test_create_event_valid() {
        let input = validate_create_event(&create_event_req("Clicked", "track", "x"))
            .expect("valid request");
        assert_eq!(input.name, "Clicked");
        assert_eq!(input.event_type, "track");
        assert_eq!(input.description, "x");
    }

    #[test]
    fn test_create_event_missing_fields() {
        let errors = validate_create_event(&CreateEventRequest::default())
            .expect_err("all fields missing");
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "type", "description"]);
    }

    #[test]
    fn test_create_event_rejects_empty_string() {
        let errors =
            validate_create_event(&create_event_req("  ", "track", "x")).expect_err("blank name");
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "name must be a non-empty string");
    }

    #[test]
    fn test_update_event_all_absent_is_valid() {
        let input =
            validate_update_event(&UpdateEventRequest::default()).expect("empty update is valid");
        assert!(input.name.is_none());
        assert!(input.event_type.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn test_update_event_present_fields_must_be_non_empty() {
        let errors = validate_update_event(&UpdateEventRequest {
            name: Some("".to_string()),
            ..Default::default()
        })
        .expect_err("empty name");
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_create_property_constrains_type() {
        let errors = validate_create_property(&CreatePropertyRequest {
            name: Some("pid".to_string()),
            property_type: Some("object".to_string()),
            description: Some("y".to_string()),
        })
        .expect_err("bad property type");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "type");
        assert_eq!(errors[0].message, "type must be one of string, number, boolean");
    }

    #[test]
    fn test_create_property_accepts_each_allowed_type() {
        for ty in PROPERTY_TYPES {
            let input = validate_create_property(&CreatePropertyRequest {
                name: Some("pid".to_string()),
                property_type: Some(ty.to_string()),
                description: Some("y".to_string()),
            })
            .expect("allowed type");
            assert_eq!(input.property_type, *ty);
        }
    }

    #[test]
    fn test_update_property_constrains_type_when_present() {
        let errors = validate_update_property(&UpdatePropertyRequest {
            property_type: Some("json".to_string()),
            ..Default::default()
        })
        .expect_err("bad property type");
        assert_eq!(errors[0].field, "type");
    }

    fn full_plan_request() -> CreateTrackingPlanRequest {
        serde_json::from_str(
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
        .expect("Failed to deserialize")
    }

    #[test]
    fn test_create_tracking_plan_valid() {
        let input = validate_create_tracking_plan(&full_plan_request()).expect("valid request");
        assert_eq!(input.name, "Plan A");
        assert_eq!(input.events.len(), 1);
        assert!(input.events[0].additional_properties);
        assert_eq!(input.events[0].properties[0].name, "pid");
        assert!(input.events[0].properties[0].required);
    }

    #[test]
    fn test_create_tracking_plan_requires_events() {
        let errors = validate_create_tracking_plan(&CreateTrackingPlanRequest {
            name: Some("Plan A".to_string()),
            description: Some("d".to_string()),
            events: None,
        })
        .expect_err("events missing");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "events");
    }

    #[test]
    fn test_create_tracking_plan_empty_events_is_valid() {
        let input = validate_create_tracking_plan(&CreateTrackingPlanRequest {
            name: Some("Plan A".to_string()),
            description: Some("d".to_string()),
            events: Some(vec![]),
        })
        .expect("empty events list is a valid plan");
        assert!(input.events.is_empty());
    }

    #[test]
    fn test_nested_errors_carry_indexed_paths() {
        let mut req = full_plan_request();
        {
            let events = req.events.as_mut().expect("events");
            events[0].event_type = None;
            let props = events[0].properties.as_mut().expect("properties");
            props[0].property_type = Some("object".to_string());
            props[0].required = None;
        }

        let errors = validate_create_tracking_plan(&req).expect_err("nested failures");
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "events[0].type",
                "events[0].properties[0].type",
                "events[0].properties[0].required",
            ]
        );
    }

    #[test]
    fn test_nested_spec_id_must_be_positive() {
        let mut req = full_plan_request();
        req.events.as_mut().expect("events")[0].id = Some(0);

        let errors = validate_create_tracking_plan(&req).expect_err("bad nested id");
        assert_eq!(errors[0].field, "events[0].id");
        assert_eq!(errors[0].message, "id must be a positive integer");
    }

    #[test]
    fn test_update_tracking_plan_absent_events_stays_absent() {
        let input = validate_update_tracking_plan(&UpdateTrackingPlanRequest {
            name: Some("Renamed".to_string()),
            ..Default::default()
        })
        .expect("valid update");
        assert_eq!(input.name.as_deref(), Some("Renamed"));
        assert!(input.events.is_none());
    }

    #[test]
    fn test_update_tracking_plan_events_validated_when_present() {
        let req: UpdateTrackingPlanRequest = serde_json::from_str(
            r#"{"events": [{"id": 3, "name": "Clicked", "type": "track",
                "description": "x", "additionalProperties": false, "properties": []}]}"#,
        )
        .expect("Failed to deserialize");

        let input = validate_update_tracking_plan(&req).expect("valid update");
        let events = input.events.expect("events");
        assert_eq!(events[0].id, Some(3));
        assert!(events[0].properties.is_empty());
    }
}
