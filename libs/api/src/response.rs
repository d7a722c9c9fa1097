use axum::{
    extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use generation::GenerationError;
use tracing::{error, warn};

pub enum ApiError {
    ClientError(String),
    ServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, message) = match self {
            ApiError::ClientError(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status_code, message).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(task = "decode request", error = rejection.body_text());
        ApiError::ClientError(rejection.body_text())
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self) -> ApiResponse<T>;
}

/// The cause is logged here and never leaves the server.
impl<T> IntoApiResponse<T> for Result<T, GenerationError> {
    fn into_response(self) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(
                task = "generate",
                operation = e.operation.as_ref(),
                error = format!("{:#}", e.source)
            );
            ApiError::ServerError(e.to_string())
        })
    }
}
