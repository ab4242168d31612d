//! JSON REST API for Cadre.
//!
//! Exposes an axum [`Router`] backed by a
//! [`cadre_core::engine::WorkflowEngine`] over any
//! [`cadre_core::store::WorkflowStore`]. Authentication is the caller's
//! responsibility: the acting identity arrives on every request as
//! `X-Actor-Id`, `X-Actor-Name`, and `X-Actor-Roles` headers, placed there by
//! whatever auth layer fronts this router.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", cadre_api::api_router(engine.clone()))
//! ```

pub mod actor;
pub mod activities;
pub mod appraisals;
pub mod error;
pub mod plans;
pub mod workflow;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use cadre_core::{engine::WorkflowEngine, store::WorkflowStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: Arc<WorkflowEngine<S>>) -> Router<()>
where
  S: WorkflowStore + 'static,
{
  Router::new()
    // Plans
    .route("/plans", get(plans::list::<S>).post(plans::create::<S>))
    .route("/plans/{id}", get(plans::get_one::<S>))
    .route(
      "/plans/{id}/responsibilities",
      put(plans::put_responsibilities::<S>),
    )
    // Activities
    .route(
      "/responsibilities/{id}/activities",
      post(activities::create::<S>),
    )
    // Appraisals
    .route(
      "/appraisals",
      get(appraisals::list::<S>).post(appraisals::create::<S>),
    )
    .route("/appraisals/{id}", get(appraisals::get_one::<S>))
    .route("/appraisals/{id}/rating", post(appraisals::put_rating::<S>))
    // Workflow
    .route("/workflow/actions", post(workflow::apply::<S>))
    .with_state(engine)
}
