//! The `WorkflowStore` trait — the persistence boundary.
//!
//! The trait is implemented by storage backends (e.g. `cadre-store-sqlite`).
//! Higher layers (`cadre-api`, the engine itself) depend on this
//! abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`). Save operations
//! compare-and-swap on the record's `version` counter and must fail with a
//! conflict when the stored record has moved on; a lost approval is a
//! correctness defect, not a cosmetic one.

use std::future::Future;

use uuid::Uuid;

use crate::{
  actor::Capability,
  appraisal::{Appraisal, NewAppraisal},
  ledger::{CommentEntry, NewCommentEntry, RecordKind},
  plan::{Activity, NewActivity, NewPlan, NewResponsibility, PerformancePlan,
         Responsibility},
};

/// Abstraction over a Cadre workflow store backend.
///
/// Activities and ledger entries are append-only; plans and appraisals are
/// mutated only through versioned saves. Transition commits persist the
/// mutated record and its ledger entry atomically — a transition is never
/// partially applied.
pub trait WorkflowStore: Send + Sync {
  type Error: std::error::Error
    + Into<crate::Error>
    + Send
    + Sync
    + 'static;

  // ── Plans ─────────────────────────────────────────────────────────────

  /// Create and persist a new plan in `draft` with no responsibilities.
  fn create_plan(
    &self,
    input: NewPlan,
  ) -> impl Future<Output = Result<PerformancePlan, Self::Error>> + Send + '_;

  /// Retrieve a plan by id. Returns `None` if not found.
  fn get_plan(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PerformancePlan>, Self::Error>>
  + Send
  + '_;

  /// Plans awaiting `capability`'s action by `actor_id` — the
  /// "my pending work" query.
  fn list_plans_for_actor(
    &self,
    actor_id: Uuid,
    capability: Capability,
  ) -> impl Future<Output = Result<Vec<PerformancePlan>, Self::Error>>
  + Send
  + '_;

  /// Atomically persist a transitioned plan and append its ledger entry.
  /// Fails with a conflict if the stored version is not `expected_version`.
  fn commit_plan_transition<'a>(
    &'a self,
    plan: &'a PerformancePlan,
    expected_version: i64,
    entry: NewCommentEntry,
  ) -> impl Future<Output = Result<CommentEntry, Self::Error>> + Send + 'a;

  // ── Responsibilities ──────────────────────────────────────────────────

  /// Replace a plan's responsibilities in place (delete + insert, cascading
  /// to their activities), bumping the plan's version with the same
  /// compare-and-swap as a transition commit.
  fn replace_responsibilities(
    &self,
    plan_id: Uuid,
    expected_version: i64,
    responsibilities: Vec<NewResponsibility>,
  ) -> impl Future<Output = Result<Vec<Responsibility>, Self::Error>>
  + Send
  + '_;

  /// All responsibilities for a plan, in their authored order.
  fn list_responsibilities(
    &self,
    plan_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Responsibility>, Self::Error>>
  + Send
  + '_;

  fn get_responsibility(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Responsibility>, Self::Error>>
  + Send
  + '_;

  // ── Activities — append-only writes ───────────────────────────────────

  /// Record a new activity under a responsibility. `updated_at` (and
  /// `completed_at` for completed activities) is set by the store.
  fn record_activity(
    &self,
    responsibility_id: Uuid,
    input: NewActivity,
  ) -> impl Future<Output = Result<Activity, Self::Error>> + Send + '_;

  /// All activities for a responsibility, oldest first.
  fn list_activities(
    &self,
    responsibility_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  // ── Appraisals ────────────────────────────────────────────────────────

  fn create_appraisal(
    &self,
    input: NewAppraisal,
  ) -> impl Future<Output = Result<Appraisal, Self::Error>> + Send + '_;

  fn get_appraisal(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Appraisal>, Self::Error>>
  + Send
  + '_;

  fn list_appraisals_for_actor(
    &self,
    actor_id: Uuid,
    capability: Capability,
  ) -> impl Future<Output = Result<Vec<Appraisal>, Self::Error>> + Send + '_;

  /// Versioned save for non-transition appraisal updates (rating entry).
  fn save_appraisal<'a>(
    &'a self,
    appraisal: &'a Appraisal,
    expected_version: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Atomically persist a transitioned appraisal and append its ledger
  /// entry. Same contract as [`WorkflowStore::commit_plan_transition`].
  fn commit_appraisal_transition<'a>(
    &'a self,
    appraisal: &'a Appraisal,
    expected_version: i64,
    entry: NewCommentEntry,
  ) -> impl Future<Output = Result<CommentEntry, Self::Error>> + Send + 'a;

  // ── Comment ledger ────────────────────────────────────────────────────

  /// The full chronological ledger for one record, oldest first.
  fn list_comments(
    &self,
    kind: RecordKind,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<CommentEntry>, Self::Error>>
  + Send
  + '_;
}
