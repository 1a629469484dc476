use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Error type shared by every handler.
///
/// Responses carry a plain-text body. The `Display` form (with the variant
/// prefix) is meant for logs, the response body only carries the message.
/// Internal errors expose their message, so build them from a fixed string
/// rather than wrapping a lower-level error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::BadRequest(err) | AppError::NotFound(err) => err.to_string(),
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal server error");
                err.to_string()
            }
            AppError::ServiceUnavailable => "Service unavailable".to_string(),
            // Store errors carry driver details which stay in the logs.
            AppError::DatabaseError(err) => {
                tracing::error!(error = %err, "Database error");
                "Database error".to_string()
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                "Configuration error".to_string()
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
    }

    #[tokio::test]
    async fn not_found_renders_plain_message() {
        let response = AppError::NotFound(anyhow::anyhow!("Vet not found")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Vet not found");
    }

    #[tokio::test]
    async fn bad_request_renders_plain_message() {
        let response = AppError::BadRequest(anyhow::anyhow!("Error creating vet")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Error creating vet");
    }

    #[tokio::test]
    async fn database_error_hides_driver_details() {
        let response =
            AppError::DatabaseError(anyhow::anyhow!("connection refused at 10.0.0.3"))
                .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Database error");
    }

    #[tokio::test]
    async fn internal_error_renders_its_message() {
        let response =
            AppError::InternalError(anyhow::anyhow!("Error retrieving vets")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Error retrieving vets");
    }

    #[test]
    fn io_errors_become_internal_errors() {
        let err = AppError::from(std::io::Error::other("disk gone"));
        assert!(matches!(err, AppError::InternalError(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn service_unavailable_maps_to_503() {
        assert_eq!(
            AppError::ServiceUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
