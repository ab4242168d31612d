//! Handlers for `/plans` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/plans` | Requires `?actor_id=<uuid>&capability=<cap>` |
//! | `POST` | `/plans` | Body: a `NewPlan` |
//! | `GET`  | `/plans/:id` | Full read model; 404 if not found |
//! | `PUT`  | `/plans/:id/responsibilities` | Replaces the full set |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use cadre_core::{
  actor::Capability,
  engine::WorkflowEngine,
  plan::{NewPlan, NewResponsibility, PerformancePlan, PlanView},
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

/// `GET /plans?actor_id=<uuid>&capability=<capability>`
///
/// Pending work for one actor in one capability: the plans currently
/// waiting on that side of the pipeline.
pub async fn list<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PerformancePlan>>, ApiError> {
  let plans = engine
    .list_plans_for_actor(params.actor_id, params.capability)
    .await?;
  Ok(Json(plans))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /plans` — body: a `NewPlan`. The plan starts in `draft`.
pub async fn create<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Json(body): Json<NewPlan>,
) -> Result<impl IntoResponse, ApiError> {
  let view = engine.create_plan(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /plans/:id`
pub async fn get_one<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PlanView>, ApiError> {
  Ok(Json(engine.get_plan(id).await?))
}

// ─── Replace responsibilities ─────────────────────────────────────────────────

/// `PUT /plans/:id/responsibilities` — body: `[NewResponsibility, ...]`
///
/// Replaces the plan's responsibility set wholesale, in body order. Only
/// valid while the plan is in `draft` or `revision_requested`, and only for
/// the plan's employee (or an administrative override).
pub async fn put_responsibilities<S: WorkflowStore>(
  State(engine): State<Arc<WorkflowEngine<S>>>,
  Path(id): Path<Uuid>,
  RequestActor(actor): RequestActor,
  Json(body): Json<Vec<NewResponsibility>>,
) -> Result<Json<PlanView>, ApiError> {
  let view = engine.update_responsibilities(id, &actor, body).await?;
  Ok(Json(view))
}
