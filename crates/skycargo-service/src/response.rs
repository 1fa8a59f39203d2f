//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Successful payload flattened next to its content type, mirroring
/// [`ProblemDetails`](crate::ProblemDetails) for errors.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        airports: usize,
    }

    #[test]
    fn payload_fields_are_flattened() {
        let json = serde_json::to_value(ServiceResponse::new(Payload { airports: 8 })).unwrap();
        assert_eq!(json["airports"], 8);
        assert_eq!(json["content_type"], "application/json");
    }
}
