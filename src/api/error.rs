use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorResponse;
use crate::models::SerializeError;
use crate::services::FavoriteError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    /// Generic application exception carrying its own status code.
    Exception { message: String, status: StatusCode },

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Exception { message, status } => write!(f, "{} ({})", message, status),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Exception { status, .. } => *status,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(msg) | ApiError::ValidationError(msg) => msg,
            ApiError::Exception { message, .. } => message,
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                "A database error occurred".to_string()
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(format!("{err:#}"))
    }
}

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::UserNotFound(_)
            | FavoriteError::TargetNotFound(..)
            | FavoriteError::FavoriteNotFound => Self::NotFound(err.to_string()),
            FavoriteError::Serialize(inner @ SerializeError::MissingRelation { .. }) => {
                Self::NotFound(inner.to_string())
            }
            FavoriteError::Serialize(inner @ SerializeError::InvalidTarget { .. }) => {
                Self::internal(inner.to_string())
            }
            FavoriteError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn exception(message: impl Into<String>, status: StatusCode) -> Self {
        ApiError::Exception {
            message: message.into(),
            status,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TargetKind;

    #[test]
    fn test_favorite_errors_map_to_status() {
        let cases = [
            (FavoriteError::UserNotFound(3), StatusCode::NOT_FOUND),
            (
                FavoriteError::TargetNotFound(TargetKind::Planet, 9),
                StatusCode::NOT_FOUND,
            ),
            (FavoriteError::FavoriteNotFound, StatusCode::NOT_FOUND),
            (
                FavoriteError::Serialize(SerializeError::InvalidTarget {
                    favorite_id: 4,
                    source: crate::models::FavoriteTargetError::Missing,
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                FavoriteError::Database("locked".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::from(FavoriteError::TargetNotFound(TargetKind::Planet, 9));
        assert_eq!(err.to_string(), "Not found: Planet 9 not found");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = ApiError::from(FavoriteError::Serialize(SerializeError::InvalidTarget {
            favorite_id: 4,
            source: crate::models::FavoriteTargetError::Ambiguous {
                people_id: 1,
                planet_id: 2,
            },
        }));
        assert!(matches!(err, ApiError::InternalError(ref msg) if msg.contains("favorite 4")));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_exception_keeps_status() {
        let err = ApiError::exception("teapot", StatusCode::IM_A_TEAPOT);
        assert_eq!(err.into_response().status(), StatusCode::IM_A_TEAPOT);
    }
}
