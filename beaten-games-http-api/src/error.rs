use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use beaten_games_domain::ServiceError;
use log::{debug, error, warn};

/// Handler error. Client errors echo their message, server errors are logged
/// and answered with a generic message.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self.0 {
            ServiceError::BadRequest(msg) => {
                debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ServiceError::NotFound(msg) => {
                debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            ServiceError::ParseFailure(msg) => {
                warn!("Failed to parse request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    "Failed to parse submitted form.".to_string(),
                )
            }
            ServiceError::Storage(msg) => {
                error!("Storage failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage failure.".to_string(),
                )
            }
            ServiceError::Search(msg) => {
                error!("Search failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Search failed.".to_string(),
                )
            }
        };
        (status, msg).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        ApiError(value)
    }
}

impl From<FormRejection> for ApiError {
    fn from(value: FormRejection) -> Self {
        ApiError(ServiceError::ParseFailure(value.body_text()))
    }
}
