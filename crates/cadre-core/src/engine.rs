//! The workflow engine — the orchestrator in front of the store.
//!
//! Every operation is a request-scoped unit of work: authorise, validate,
//! mutate a copy of the record, then commit record and ledger entry in one
//! storage transaction. Nothing is written until every check has passed, so
//! a rejected action never changes state, timestamps, or ledger length.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  actor::{Actor, Capability, RoleResolver},
  appraisal::{Appraisal, AppraisalView, NewAppraisal},
  error::{Error, Result},
  ledger::{LedgerThreads, NewCommentEntry, RecordKind},
  plan::{Activity, NewActivity, NewPlan, NewResponsibility,
         PerformancePlan, PlanView, ResponsibilityView},
  progress::{plan_progress, responsibility_progress},
  store::WorkflowStore,
  weight::validate_weights,
  workflow::{transition, WorkflowAction, WorkflowRole, WorkflowState},
};

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// The updated read model returned by [`WorkflowEngine::apply_action`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkflowOutcome {
  Plan(PlanView),
  Appraisal(AppraisalView),
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The performance-management workflow engine over a [`WorkflowStore`].
pub struct WorkflowEngine<S> {
  store:    S,
  resolver: RoleResolver,
}

impl<S: WorkflowStore> WorkflowEngine<S> {
  pub fn new(store: S, resolver: RoleResolver) -> Self {
    Self { store, resolver }
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Plans ─────────────────────────────────────────────────────────────

  /// Create a plan. Always starts in `draft`.
  pub async fn create_plan(&self, input: NewPlan) -> Result<PlanView> {
    let plan = self.store.create_plan(input).await.map_err(Into::into)?;
    self.plan_view(plan).await
  }

  /// Fetch a plan with progress computed fresh and ledger threads
  /// projected.
  pub async fn get_plan(&self, id: Uuid) -> Result<PlanView> {
    let plan = self
      .store
      .get_plan(id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::PlanNotFound(id))?;
    self.plan_view(plan).await
  }

  pub async fn list_plans_for_actor(
    &self,
    actor_id: Uuid,
    capability: Capability,
  ) -> Result<Vec<PerformancePlan>> {
    self
      .store
      .list_plans_for_actor(actor_id, capability)
      .await
      .map_err(Into::into)
  }

  /// Replace a plan's responsibilities while the employee holds it.
  ///
  /// Per-item weight ranges are validated here; the sum-to-100 invariant is
  /// enforced only at the submit transition, so a plan may be saved mid-edit
  /// with an incomplete total.
  pub async fn update_responsibilities(
    &self,
    plan_id: Uuid,
    actor: &Actor,
    responsibilities: Vec<NewResponsibility>,
  ) -> Result<PlanView> {
    let plan = self
      .store
      .get_plan(plan_id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::PlanNotFound(plan_id))?;

    match plan.workflow_status {
      WorkflowState::Draft | WorkflowState::RevisionRequested => {}
      WorkflowState::Approved => return Err(Error::Locked(plan_id)),
      state => return Err(Error::NotEditable { state }),
    }

    if !self
      .resolver
      .authorizes(&plan.parties(), actor, WorkflowRole::Employee)
    {
      return Err(Error::Unauthorized { required: WorkflowRole::Employee });
    }

    for r in &responsibilities {
      if r.weight > 100 {
        return Err(Error::WeightOutOfRange(r.weight));
      }
    }

    self
      .store
      .replace_responsibilities(plan_id, plan.version, responsibilities)
      .await
      .map_err(Into::into)?;

    self.get_plan(plan_id).await
  }

  /// Record a progress activity. Always an append; permitted in any plan
  /// state — activities are execution evidence, not plan content, so the
  /// approval lock does not cover them.
  pub async fn record_activity(
    &self,
    responsibility_id: Uuid,
    input: NewActivity,
  ) -> Result<Activity> {
    self
      .store
      .record_activity(responsibility_id, input)
      .await
      .map_err(Into::into)
  }

  // ── Appraisals ────────────────────────────────────────────────────────

  pub async fn create_appraisal(
    &self,
    input: NewAppraisal,
  ) -> Result<AppraisalView> {
    let appraisal =
      self.store.create_appraisal(input).await.map_err(Into::into)?;
    self.appraisal_view(appraisal).await
  }

  pub async fn get_appraisal(&self, id: Uuid) -> Result<AppraisalView> {
    let appraisal = self
      .store
      .get_appraisal(id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::AppraisalNotFound(id))?;
    self.appraisal_view(appraisal).await
  }

  pub async fn list_appraisals_for_actor(
    &self,
    actor_id: Uuid,
    capability: Capability,
  ) -> Result<Vec<Appraisal>> {
    self
      .store
      .list_appraisals_for_actor(actor_id, capability)
      .await
      .map_err(Into::into)
  }

  /// Record the overall rating on an appraisal. Restricted to the
  /// supervisor, reviewer, or an administrative override; rejected once the
  /// appraisal is approved.
  pub async fn record_rating(
    &self,
    appraisal_id: Uuid,
    actor: &Actor,
    rating: f64,
  ) -> Result<AppraisalView> {
    if !rating.is_finite() || !(0.0..=100.0).contains(&rating) {
      return Err(Error::RatingOutOfRange(rating));
    }

    let appraisal = self
      .store
      .get_appraisal(appraisal_id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::AppraisalNotFound(appraisal_id))?;

    if appraisal.workflow_status.is_terminal() {
      return Err(Error::Locked(appraisal_id));
    }

    let parties = appraisal.parties();
    let authorized = self
      .resolver
      .authorizes(&parties, actor, WorkflowRole::Supervisor)
      || self.resolver.authorizes(&parties, actor, WorkflowRole::Reviewer);
    if !authorized {
      return Err(Error::Unauthorized {
        required: WorkflowRole::Supervisor,
      });
    }

    let mut updated = appraisal.clone();
    updated.overall_rating = Some(rating);
    updated.updated_at = Utc::now();
    updated.version = appraisal.version + 1;

    self
      .store
      .save_appraisal(&updated, appraisal.version)
      .await
      .map_err(Into::into)?;

    self.appraisal_view(updated).await
  }

  // ── Workflow actions ──────────────────────────────────────────────────

  /// The single entry point for workflow actions against either record
  /// kind: authorise via the role resolver, compute the next state from the
  /// transition table, then commit the updated record together with its
  /// ledger entry.
  pub async fn apply_action(
    &self,
    kind: RecordKind,
    record_id: Uuid,
    action: WorkflowAction,
    acting_role: WorkflowRole,
    actor: &Actor,
    comment: Option<String>,
  ) -> Result<WorkflowOutcome> {
    match kind {
      RecordKind::Plan => self
        .apply_plan_action(record_id, action, acting_role, actor, comment)
        .await
        .map(WorkflowOutcome::Plan),
      RecordKind::Appraisal => self
        .apply_appraisal_action(record_id, action, acting_role, actor, comment)
        .await
        .map(WorkflowOutcome::Appraisal),
    }
  }

  async fn apply_plan_action(
    &self,
    plan_id: Uuid,
    action: WorkflowAction,
    acting_role: WorkflowRole,
    actor: &Actor,
    comment: Option<String>,
  ) -> Result<PlanView> {
    let plan = self
      .store
      .get_plan(plan_id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::PlanNotFound(plan_id))?;

    let next = self.authorize_transition(
      plan.workflow_status,
      action,
      acting_role,
      &plan.parties(),
      actor,
      plan_id,
    )?;

    // Weight invariant, enforced only when leaving draft/revision.
    if action == WorkflowAction::Submit {
      let responsibilities = self
        .store
        .list_responsibilities(plan_id)
        .await
        .map_err(Into::into)?;
      let check =
        validate_weights(responsibilities.iter().map(|r| r.weight));
      if !check.valid {
        return Err(Error::WeightSum { total: check.total });
      }
    }

    let now = Utc::now();
    let mut updated = plan.clone();
    updated.workflow_status = next;
    updated.updated_at = now;
    match action {
      WorkflowAction::Submit => {
        updated.submitted_at = Some(now);
        // Resubmission restarts the approval chain at the supervisor.
        updated.supervisor_approved_at = None;
      }
      WorkflowAction::Approve => updated.supervisor_approved_at = Some(now),
      WorkflowAction::FinalApprove => {
        updated.reviewer_approved_at = Some(now)
      }
      WorkflowAction::Comment | WorkflowAction::RequestChanges => {}
    }
    updated.version = plan.version + 1;

    self
      .store
      .commit_plan_transition(
        &updated,
        plan.version,
        self.entry_for(actor, acting_role, action, comment),
      )
      .await
      .map_err(Into::into)?;

    self.plan_view(updated).await
  }

  async fn apply_appraisal_action(
    &self,
    appraisal_id: Uuid,
    action: WorkflowAction,
    acting_role: WorkflowRole,
    actor: &Actor,
    comment: Option<String>,
  ) -> Result<AppraisalView> {
    let appraisal = self
      .store
      .get_appraisal(appraisal_id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::AppraisalNotFound(appraisal_id))?;

    let next = self.authorize_transition(
      appraisal.workflow_status,
      action,
      acting_role,
      &appraisal.parties(),
      actor,
      appraisal_id,
    )?;

    let now = Utc::now();
    let mut updated = appraisal.clone();
    updated.workflow_status = next;
    updated.updated_at = now;
    match action {
      WorkflowAction::Submit => {
        updated.submitted_at = Some(now);
        updated.supervisor_approved_at = None;
      }
      WorkflowAction::Approve => updated.supervisor_approved_at = Some(now),
      WorkflowAction::FinalApprove => {
        updated.reviewer_approved_at = Some(now)
      }
      WorkflowAction::Comment | WorkflowAction::RequestChanges => {}
    }
    updated.version = appraisal.version + 1;

    self
      .store
      .commit_appraisal_transition(
        &updated,
        appraisal.version,
        self.entry_for(actor, acting_role, action, comment),
      )
      .await
      .map_err(Into::into)?;

    self.appraisal_view(updated).await
  }

  /// Shared authorization: terminal check, transition lookup, claimed-role
  /// match, then capability resolution. Checked in that order so "no one
  /// can do this right now" and "you can't do this" stay distinguishable.
  fn authorize_transition(
    &self,
    state: WorkflowState,
    action: WorkflowAction,
    acting_role: WorkflowRole,
    parties: &crate::actor::RecordParties,
    actor: &Actor,
    record_id: Uuid,
  ) -> Result<WorkflowState> {
    if state.is_terminal() {
      return Err(Error::Locked(record_id));
    }

    let t = transition(state, action)
      .ok_or(Error::InvalidTransition { state, action })?;

    if acting_role != t.required_role {
      return Err(Error::RoleMismatch {
        claimed:  acting_role,
        required: t.required_role,
      });
    }

    if !self.resolver.authorizes(parties, actor, acting_role) {
      return Err(Error::Unauthorized { required: acting_role });
    }

    Ok(t.next)
  }

  fn entry_for(
    &self,
    actor: &Actor,
    role: WorkflowRole,
    action: WorkflowAction,
    comment: Option<String>,
  ) -> NewCommentEntry {
    NewCommentEntry {
      author_id:   actor.actor_id,
      author_name: actor.display_name.clone(),
      role,
      action,
      // A transition without a comment still appends an entry, so every
      // state change stays traceable to an actor and timestamp.
      text: comment.unwrap_or_default(),
    }
  }

  // ── Read-model assembly ───────────────────────────────────────────────

  async fn plan_view(&self, plan: PerformancePlan) -> Result<PlanView> {
    let responsibilities = self
      .store
      .list_responsibilities(plan.plan_id)
      .await
      .map_err(Into::into)?;

    let mut views = Vec::with_capacity(responsibilities.len());
    for responsibility in responsibilities {
      let activities = self
        .store
        .list_activities(responsibility.responsibility_id)
        .await
        .map_err(Into::into)?;
      let progress = responsibility_progress(&activities);
      views.push(ResponsibilityView { responsibility, activities, progress });
    }

    let progress = plan_progress(
      &views
        .iter()
        .map(|v| (v.responsibility.weight, v.progress))
        .collect::<Vec<_>>(),
    );

    let comments = self
      .store
      .list_comments(RecordKind::Plan, plan.plan_id)
      .await
      .map_err(Into::into)?;

    Ok(PlanView {
      status: plan.status(),
      plan,
      responsibilities: views,
      progress,
      comments: LedgerThreads::project(comments),
    })
  }

  async fn appraisal_view(
    &self,
    appraisal: Appraisal,
  ) -> Result<AppraisalView> {
    let comments = self
      .store
      .list_comments(RecordKind::Appraisal, appraisal.appraisal_id)
      .await
      .map_err(Into::into)?;

    Ok(AppraisalView {
      status: appraisal.status(),
      appraisal,
      comments: LedgerThreads::project(comments),
    })
  }
}
