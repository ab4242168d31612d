//! Extraction of the acting identity from request headers.
//!
//! The upstream auth layer asserts identity via three headers:
//!
//! | Header | Required | Content |
//! |--------|----------|---------|
//! | `X-Actor-Id`    | yes | the actor's UUID |
//! | `X-Actor-Name`  | no  | display name recorded on ledger entries |
//! | `X-Actor-Roles` | no  | comma-separated role-membership identifiers |

use axum::{extract::FromRequestParts, http::request::Parts};
use cadre_core::actor::Actor;
use uuid::Uuid;

use crate::error::ApiError;

/// The [`Actor`] asserted by the request headers.
#[derive(Debug, Clone)]
pub struct RequestActor(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for RequestActor {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let header = |name: &str| {
      parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
    };

    let actor_id = header("x-actor-id")
      .ok_or_else(|| {
        ApiError::BadRequest("missing X-Actor-Id header".into())
      })?
      .parse::<Uuid>()
      .map_err(|_| {
        ApiError::BadRequest("X-Actor-Id is not a valid UUID".into())
      })?;

    let display_name = header("x-actor-name").unwrap_or_default();

    let roles = header("x-actor-roles")
      .map(|raw| {
        raw
          .split(',')
          .map(str::trim)
          .filter(|r| !r.is_empty())
          .map(str::to_owned)
          .collect()
      })
      .unwrap_or_default();

    Ok(Self(Actor { actor_id, display_name, roles }))
  }
}
