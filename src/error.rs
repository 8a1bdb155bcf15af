//! HTTP error responses.
//!
//! Error bodies are short plain-text messages; status codes are the stable contract.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::services::ResolveError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        if e.is_client_error() {
            AppError::bad_request(e.to_string())
        } else {
            AppError::internal(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(message) | AppError::Internal(message) => message,
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::GeoLookupError;
    use crate::infrastructure::cache::CacheError;

    #[test]
    fn test_input_errors_map_to_bad_request() {
        let missing = AppError::from(ResolveError::MissingParameter);
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(missing, AppError::BadRequest(ref m) if m == "Parameter 'ip' is missing"));

        let invalid = AppError::from(ResolveError::InvalidAddress("nope".to_string()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(invalid, AppError::BadRequest(ref m) if m == "Invalid IP address"));
    }

    #[test]
    fn test_infrastructure_errors_map_to_internal() {
        let cache = AppError::from(ResolveError::Cache(CacheError::Timeout(300)));
        assert_eq!(cache.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            matches!(cache, AppError::Internal(ref m) if m == "Cache error: operation timed out after 300ms")
        );

        let db = AppError::from(ResolveError::Resolution(GeoLookupError::Database(
            "bad pointer".to_string(),
        )));
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_response_is_plain_text() {
        let response = AppError::bad_request("Invalid IP address").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
