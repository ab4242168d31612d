//! Handler for `/responsibilities/:id/activities`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use cadre_core::{
  engine::WorkflowEngine,
  plan::NewActivity,
  store::WorkflowStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /responsibilities/:id/activities` — body: a `NewActivity`.
///
/// Appends a progress activity under the responsibility. Activities are
/// append-only execution evidence, so this is allowed in any plan state.
pub async fn create<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewActivity>,
) -> Result<impl IntoResponse, ApiError> {
  let activity = engine.record_activity(id, body).await?;
  Ok((StatusCode::CREATED, Json(activity)))
}
