// Error side of every handler.
//
// Two wire shapes, per the API contract: `{"errors": [...]}` for validation
// failures with field granularity, `{"error": "..."}` for everything else.
// Store diagnostics never reach the body; handlers log them and answer with
// a generic phrase.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_contracts::{ErrorResponse, FieldError, ValidationErrorResponse};

#[derive(Debug)]
pub enum ApiError {
    /// 400 with field-level detail
    Validation(Vec<FieldError>),
    /// 404 with a generic message
    NotFound(&'static str),
    /// Any other failure, with the status the contract assigns it
    Failure(StatusCode, &'static str),
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        ApiError::Failure(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: &'static str) -> Self {
        ApiError::Failure(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse::new(errors)),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(message)),
            )
                .into_response(),
            ApiError::Failure(status, message) => {
                (status, Json(ErrorResponse::new(message))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let response = ApiError::Validation(vec![FieldError::new(
            "id",
            "id must be a positive integer",
        )])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["field"], "id");
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let response = ApiError::NotFound("Event not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Event not found");
    }

    #[tokio::test]
    async fn test_failure_does_not_leak_details() {
        // Store errors are mapped to a fixed phrase before reaching here
        let response = ApiError::bad_request("Failed to create event").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to create event");
    }
}
