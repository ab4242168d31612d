//! Handler for `/workflow/actions` — the single mutation point for workflow
//! state on both record kinds.

use std::sync::Arc;

use axum::{Json, extract::State};
use cadre_core::{
  engine::{WorkflowEngine, WorkflowOutcome},
  ledger::RecordKind,
  store::WorkflowStore,
  workflow::{WorkflowAction, WorkflowRole},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{actor::RequestActor, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ActionBody {
  pub record_kind: RecordKind,
  pub record_id:   Uuid,
  pub action:      WorkflowAction,
  /// The role the caller claims to act under. Must match the role the
  /// transition requires, and the caller must actually hold it for this
  /// record (or hold an administrative override).
  pub acting_role: WorkflowRole,
  pub comment:     Option<String>,
}

/// `POST /workflow/actions`
///
/// Body:
///
/// ```json
/// {
///   "record_kind": "plan",
///   "record_id": "…",
///   "action": "approve",
///   "acting_role": "supervisor",
///   "comment": "looks good"
/// }
/// ```
///
/// Applies one workflow action and returns the updated read model. A
/// rejected action changes nothing — no state, no timestamps, no ledger
/// entry.
pub async fn apply<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  RequestActor(actor): RequestActor,
  Json(body): Json<ActionBody>,
) -> Result<Json<WorkflowOutcome>, ApiError> {
  let outcome = engine
    .apply_action(
      body.record_kind,
      body.record_id,
      body.action,
      body.acting_role,
      &actor,
      body.comment,
    )
    .await?;
  Ok(Json(outcome))
}
