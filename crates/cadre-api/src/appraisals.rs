//! Handlers for `/appraisals` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/appraisals` | Requires `?actor_id=<uuid>&capability=<cap>` |
//! | `POST` | `/appraisals` | Body: a `NewAppraisal` |
//! | `GET`  | `/appraisals/:id` | 404 if not found |
//! | `POST` | `/appraisals/:id/rating` | Body: `{"rating": <0..=100>}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use cadre_core::{
  actor::Capability,
  appraisal::{Appraisal, AppraisalView, NewAppraisal},
  engine::WorkflowEngine,
  store::WorkflowStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{actor::RequestActor, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub actor_id:   Uuid,
  pub capability: Capability,
}

/// `GET /appraisals?actor_id=<uuid>&capability=<capability>`
pub async fn list<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Appraisal>>, ApiError> {
  let appraisals = engine
    .list_appraisals_for_actor(params.actor_id, params.capability)
    .await?;
  Ok(Json(appraisals))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /appraisals` — body: a `NewAppraisal`. Starts in `draft`.
pub async fn create<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Json(body): Json<NewAppraisal>,
) -> Result<impl IntoResponse, ApiError> {
  let view = engine.create_appraisal(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /appraisals/:id`
pub async fn get_one<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<AppraisalView>, ApiError> {
  Ok(Json(engine.get_appraisal(id).await?))
}

// ─── Rating ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RatingBody {
  pub rating: f64,
}

/// `POST /appraisals/:id/rating` — body: `{"rating": 4.0}`
///
/// Records the overall rating. Restricted to the appraisal's supervisor or
/// reviewer (or an administrative override); rejected once approved.
pub async fn put_rating<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Path(id): Path<Uuid>,
  RequestActor(actor): RequestActor,
  Json(body): Json<RatingBody>,
) -> Result<Json<AppraisalView>, ApiError> {
  let view = engine.record_rating(id, &actor, body.rating).await?;
  Ok(Json(view))
}
