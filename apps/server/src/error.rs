use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use autofill_core::Error as CoreError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofill_core::errors::{ConfigurationError, ValidationError};
    use autofill_vehicle_data::Capability;

    #[test]
    fn test_status_mapping() {
        let validation: ApiError =
            CoreError::from(ValidationError::InvalidPlate("ZZ-ZZ-ZZ".to_string())).into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let configuration: ApiError = CoreError::from(ConfigurationError::NoActiveProvider {
            capability: Capability::Identity,
        })
        .into();
        assert_eq!(configuration.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            configuration.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
