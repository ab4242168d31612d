//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use cadre_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Responses carry a JSON body of `{"error": <message>, "kind": <kind>}` so
/// clients can branch on the kind without parsing the message.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Core(#[from] CoreError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, kind) = match &self {
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
      ApiError::Core(e) => match e {
        CoreError::PlanNotFound(_)
        | CoreError::AppraisalNotFound(_)
        | CoreError::ResponsibilityNotFound(_) => {
          (StatusCode::NOT_FOUND, "not_found")
        }
        CoreError::WeightSum { .. }
        | CoreError::WeightOutOfRange(_)
        | CoreError::RatingOutOfRange(_) => {
          (StatusCode::UNPROCESSABLE_ENTITY, "validation")
        }
        CoreError::Unauthorized { .. } | CoreError::RoleMismatch { .. } => {
          (StatusCode::FORBIDDEN, "authorization")
        }
        CoreError::InvalidTransition { .. } => {
          (StatusCode::CONFLICT, "invalid_transition")
        }
        CoreError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        CoreError::NotEditable { .. } | CoreError::Locked(_) => {
          (StatusCode::LOCKED, "locked")
        }
        CoreError::Serialization(_) | CoreError::Storage(_) => {
          (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        }
      },
    };
    let message = self.to_string();
    (status, Json(json!({ "error": message, "kind": kind })))
      .into_response()
  }
}
