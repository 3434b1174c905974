use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Every failure a client can observe. Authentication failures share a
/// status but keep distinct messages; credential and ownership failures
/// are deliberately uninformative so callers cannot enumerate accounts
/// or goal ids.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Email address already in use")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Token is missing")]
    MissingToken,
    #[error("Token is invalid")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("User not found")]
    UserNotFound,
    #[error("'{0}' is not a valid goal ID")]
    InvalidId(String),
    #[error("Goal not found or permission denied")]
    NotFoundOrForbidden,
    #[error("Service temporarily unavailable")]
    StoreUnavailable,
    #[error("An unexpected error occurred")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::InvalidCredentials
            | ApiError::MissingToken
            | ApiError::InvalidToken
            | ApiError::ExpiredToken
            | ApiError::UserNotFound => StatusCode::UNAUTHORIZED,
            ApiError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

// Driver errors never reach a response body; they are logged here and
// collapsed into the taxonomy.
impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        error!(error = %e, "database error");
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                ApiError::StoreUnavailable
            }
            _ => ApiError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::ExpiredToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFoundOrForbidden.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidId("abc".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StoreUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn auth_failures_share_status_with_distinct_messages() {
        let causes = [
            ApiError::MissingToken,
            ApiError::InvalidToken,
            ApiError::ExpiredToken,
            ApiError::UserNotFound,
        ];
        let messages: Vec<String> = causes.iter().map(|e| e.to_string()).collect();
        for e in &causes {
            assert_eq!(e.status(), StatusCode::UNAUTHORIZED);
        }
        let unique: std::collections::HashSet<&String> = messages.iter().collect();
        assert_eq!(unique.len(), causes.len());
    }

    #[test]
    fn body_is_json_object_with_error_field() {
        let msg = ApiError::NotFoundOrForbidden.to_string();
        let body = serde_json::json!({ "error": msg });
        assert_eq!(body["error"], "Goal not found or permission denied");
    }
}
