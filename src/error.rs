use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Backend failures keep the backend's HTTP status when there is one;
/// transport failures become 502 Bad Gateway.
#[derive(Debug)]
pub enum ApiError {
    /// `{kind}` path segment is not a library collection
    UnknownKind(String),
    /// No JSON API endpoint at this path
    UnknownEndpoint(String),
    /// Request to the library backend failed
    Backend(reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownKind(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            ApiError::Backend(err) => err
                .status()
                .and_then(|s| StatusCode::from_u16(s.as_u16()).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::UnknownKind(kind) => format!(
                "Unknown library collection '{}': expected one of assets, maps, tilesets",
                kind
            ),
            ApiError::UnknownEndpoint(path) => format!("No API endpoint at '{}'", path),
            ApiError::Backend(err) => match err.status() {
                Some(status) => format!("Library backend returned {}", status),
                None => format!("Library backend unavailable: {}", err),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Backend(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_kind_response() {
        let response = ApiError::UnknownKind("pointclouds".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("pointclouds"));
    }
}
