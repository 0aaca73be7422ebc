use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rankbridge_core::RankError;

/// Unified error type for HTTP responses.
///
/// Wraps `anyhow::Error` so handlers can use `?` on anything; the status
/// code comes from downcasting to `RankError`. Client input problems map
/// to 400, everything upstream or unexpected to 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<RankError>() {
            Some(
                RankError::MissingField(_)
                | RankError::UnknownRank(_)
                | RankError::InvalidMemberId(_),
            ) => StatusCode::BAD_REQUEST,
            Some(
                RankError::RoleNotFound(_)
                | RankError::MemberNotFound(_)
                | RankError::Upstream(_),
            )
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed against upstream");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
