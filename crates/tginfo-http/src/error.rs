use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use tginfo_core::errors::ResolveError;

/// HTTP face of a [`ResolveError`]: one status and one message per outcome.
#[derive(Debug)]
pub struct ApiError(pub ResolveError);

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ResolveError::InvalidInput => StatusCode::BAD_REQUEST,
            ResolveError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResolveError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ResolveError::TransientFailure(_) | ResolveError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ResolveError::Internal(detail) = &self.0 {
            tracing::error!("unhandled error: {detail}");
        }

        // Internal details stay in the log; Display of `Internal` is generic.
        let body = serde_json::json!({ "error": self.0.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (ResolveError::InvalidInput, StatusCode::BAD_REQUEST),
            (
                ResolveError::NotFound {
                    handle: "x".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ResolveError::PermissionDenied("no".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ResolveError::TransientFailure("t".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ResolveError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn messages() {
        assert_eq!(
            ResolveError::InvalidInput.to_string(),
            "Username parameter is required"
        );
        assert_eq!(
            ResolveError::NotFound {
                handle: "ghost".to_string()
            }
            .to_string(),
            "Username '@ghost' does not exist"
        );
        assert_eq!(
            ResolveError::Internal("stack".to_string()).to_string(),
            "Internal Server Error"
        );
    }
}
