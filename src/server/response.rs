//! Error responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::Error;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error returned from handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Store, board or analyzer error.
    Domain(Error),

    /// The request body could not be decoded.
    Body { status: StatusCode, message: String },

    /// No route matched.
    RouteNotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(Error::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(Error::NotFound { .. }) | Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::Body { status, .. } => *status,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Domain(err) => ErrorBody {
                error: err.to_string(),
                kind: err.kind().to_string(),
                field: err.field().map(str::to_string),
            },
            Self::Body { message, .. } => ErrorBody {
                error: message.clone(),
                kind: "ValidationError".to_string(),
                field: Some("body".to_string()),
            },
            Self::RouteNotFound(path) => ErrorBody {
                error: format!("no route for {path}"),
                kind: "NotFoundError".to_string(),
                field: None,
            },
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self::Body { status, message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %body.error, "Request failed");
        } else {
            tracing::warn!(status = %status, kind = %body.kind, error = %body.error, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(Error::validation("status", "bad")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::from(Error::item_not_found("x")).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound("/nope".to_string()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_body_names_field() {
        let body = ApiError::from(Error::validation("estimate", "negative")).body();
        assert_eq!(body.kind, "ValidationError");
        assert_eq!(body.field.as_deref(), Some("estimate"));
        assert_eq!(body.error, "estimate: negative");
    }
}
