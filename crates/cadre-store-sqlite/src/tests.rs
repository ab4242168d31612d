//! Integration tests for `SqliteStore` and the workflow engine against an
//! in-memory database.

use cadre_core::{
  actor::{Actor, Capability, RoleResolver},
  engine::{WorkflowEngine, WorkflowOutcome},
  ledger::{NewCommentEntry, RecordKind},
  plan::{ActivityStatus, NewActivity, NewPlan, NewResponsibility},
  appraisal::NewAppraisal,
  store::WorkflowStore,
  workflow::{WorkflowAction, WorkflowRole, WorkflowState},
  Error,
};
use uuid::Uuid;

use crate::SqliteStore;

// ─── Fixtures ────────────────────────────────────────────────────────────────

struct Cast {
  employee:   Actor,
  supervisor: Actor,
  reviewer:   Actor,
  admin:      Actor,
}

fn cast() -> Cast {
  let actor = |name: &str, roles: &[&str]| Actor {
    actor_id:     Uuid::new_v4(),
    display_name: name.to_owned(),
    roles:        roles.iter().map(|r| r.to_string()).collect(),
  };
  Cast {
    employee:   actor("Eve Employee", &["staff"]),
    supervisor: actor("Sam Supervisor", &["staff"]),
    reviewer:   actor("Rita Reviewer", &["staff"]),
    admin:      actor("Hana HR", &["HR_Manager"]),
  }
}

async fn engine() -> WorkflowEngine<SqliteStore> {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  WorkflowEngine::new(
    store,
    RoleResolver::new(["hr_manager".to_owned()]),
  )
}

fn new_plan(cast: &Cast) -> NewPlan {
  NewPlan {
    employee_id:   cast.employee.actor_id,
    supervisor_id: cast.supervisor.actor_id,
    reviewer_id:   Some(cast.reviewer.actor_id),
    plan_year:     2025,
    plan_period:   "Jan-Dec 2025".into(),
  }
}

fn resp(description: &str, weight: u32) -> NewResponsibility {
  NewResponsibility {
    description:        description.to_owned(),
    tasks:              String::new(),
    weight,
    target_date:        None,
    status_label:       None,
    comments:           None,
    success_indicators: Vec::new(),
  }
}

/// Drive a plan from draft to `submitted` with a valid weight set.
async fn submitted_plan(
  eng: &WorkflowEngine<SqliteStore>,
  cast: &Cast,
) -> Uuid {
  let view = eng.create_plan(new_plan(cast)).await.unwrap();
  let plan_id = view.plan.plan_id;
  eng
    .update_responsibilities(
      plan_id,
      &cast.employee,
      vec![resp("a", 40), resp("b", 30), resp("c", 20), resp("d", 10)],
    )
    .await
    .unwrap();
  eng
    .apply_action(
      RecordKind::Plan,
      plan_id,
      WorkflowAction::Submit,
      WorkflowRole::Employee,
      &cast.employee,
      None,
    )
    .await
    .unwrap();
  plan_id
}

async fn plan_action(
  eng: &WorkflowEngine<SqliteStore>,
  plan_id: Uuid,
  action: WorkflowAction,
  role: WorkflowRole,
  actor: &Actor,
  comment: Option<&str>,
) -> cadre_core::Result<WorkflowOutcome> {
  eng
    .apply_action(
      RecordKind::Plan,
      plan_id,
      action,
      role,
      actor,
      comment.map(str::to_owned),
    )
    .await
}

// ─── Plan creation and editing ───────────────────────────────────────────────

#[tokio::test]
async fn create_plan_starts_in_draft() {
  let eng = engine().await;
  let c = cast();

  let view = eng.create_plan(new_plan(&c)).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::Draft);
  assert_eq!(view.plan.version, 0);
  assert_eq!(view.progress, 0);
  assert!(view.comments.is_empty());
  assert!(view.plan.submitted_at.is_none());
}

#[tokio::test]
async fn get_plan_missing_errors() {
  let eng = engine().await;
  let err = eng.get_plan(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::PlanNotFound(_)));
}

#[tokio::test]
async fn responsibilities_replace_in_place_preserving_order() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;

  eng
    .update_responsibilities(
      plan_id,
      &c.employee,
      vec![resp("first", 50), resp("second", 50)],
    )
    .await
    .unwrap();

  let view = eng
    .update_responsibilities(
      plan_id,
      &c.employee,
      vec![resp("alpha", 60), resp("beta", 30), resp("gamma", 10)],
    )
    .await
    .unwrap();

  let descriptions: Vec<_> = view
    .responsibilities
    .iter()
    .map(|r| r.responsibility.description.as_str())
    .collect();
  assert_eq!(descriptions, ["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn mid_edit_weight_totals_are_saveable() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;

  // Sum is 70; only the submit transition enforces the invariant.
  let view = eng
    .update_responsibilities(
      plan_id,
      &c.employee,
      vec![resp("a", 40), resp("b", 30)],
    )
    .await
    .unwrap();
  assert_eq!(view.responsibilities.len(), 2);
}

#[tokio::test]
async fn per_item_weight_range_is_enforced() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;

  let err = eng
    .update_responsibilities(plan_id, &c.employee, vec![resp("a", 150)])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::WeightOutOfRange(150)));
}

#[tokio::test]
async fn only_the_employee_or_override_may_edit_responsibilities() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;

  let err = eng
    .update_responsibilities(plan_id, &c.supervisor, vec![resp("a", 100)])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unauthorized { .. }));

  // An administrative override may edit on the employee's behalf.
  eng
    .update_responsibilities(plan_id, &c.admin, vec![resp("a", 100)])
    .await
    .unwrap();
}

#[tokio::test]
async fn responsibilities_lock_after_submission() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;

  let err = eng
    .update_responsibilities(plan_id, &c.employee, vec![resp("late", 100)])
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::NotEditable { state: WorkflowState::Submitted }
  ));
}

// ─── Submission and the weight gate ──────────────────────────────────────────

#[tokio::test]
async fn submit_with_full_weights_succeeds() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::Submitted);
  assert!(view.plan.submitted_at.is_some());
  assert_eq!(view.progress, 0); // no activities logged yet
  assert_eq!(view.comments.employee.len(), 1);
  assert_eq!(view.comments.employee[0].action, WorkflowAction::Submit);
}

#[tokio::test]
async fn submit_with_partial_weights_reports_the_total() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;
  eng
    .update_responsibilities(
      plan_id,
      &c.employee,
      vec![resp("a", 40), resp("b", 30), resp("c", 20)],
    )
    .await
    .unwrap();

  let err = plan_action(
    &eng,
    plan_id,
    WorkflowAction::Submit,
    WorkflowRole::Employee,
    &c.employee,
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::WeightSum { total: 90 }));

  // Rejection is all-or-nothing: state, timestamps, and ledger untouched.
  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::Draft);
  assert!(view.plan.submitted_at.is_none());
  assert!(view.comments.is_empty());
}

#[tokio::test]
async fn empty_plan_is_not_submittable() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;

  let err = plan_action(
    &eng,
    plan_id,
    WorkflowAction::Submit,
    WorkflowRole::Employee,
    &c.employee,
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::WeightSum { total: 0 }));
}

// ─── The approval pipeline ───────────────────────────────────────────────────

#[tokio::test]
async fn full_pipeline_to_approved() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.supervisor,
    Some("looks solid"),
  )
  .await
  .unwrap();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::SupervisorApproved);
  assert!(view.plan.supervisor_approved_at.is_some());
  assert!(view.plan.reviewer_approved_at.is_none());

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::FinalApprove,
    WorkflowRole::Reviewer,
    &c.reviewer,
    None,
  )
  .await
  .unwrap();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::Approved);
  assert!(view.plan.reviewer_approved_at.is_some());
  // submit + approve + final_approve
  assert_eq!(view.comments.len(), 3);
}

#[tokio::test]
async fn supervisor_cannot_perform_the_reviewers_action() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap();

  // Claiming reviewer without holding it: authorization failure.
  let err = plan_action(
    &eng,
    plan_id,
    WorkflowAction::FinalApprove,
    WorkflowRole::Reviewer,
    &c.supervisor,
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::Unauthorized { .. }));

  // Claiming supervisor for a reviewer-stage action: mislabeled request.
  let err = plan_action(
    &eng,
    plan_id,
    WorkflowAction::FinalApprove,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::RoleMismatch { .. }));

  // Neither attempt moved the record.
  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::SupervisorApproved);
  assert_eq!(view.comments.len(), 2);
}

#[tokio::test]
async fn override_acts_in_any_role_under_its_own_identity() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.admin,
    Some("approving for an absent supervisor"),
  )
  .await
  .unwrap();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::SupervisorApproved);

  // Logged under the supervisor thread with the admin's real identity.
  let entry = &view.comments.supervisor[0];
  assert_eq!(entry.author_id, c.admin.actor_id);
  assert_eq!(entry.author_name, "Hana HR");
  assert_eq!(entry.role, WorkflowRole::Supervisor);
}

#[tokio::test]
async fn comment_actions_append_without_changing_state() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Comment,
    WorkflowRole::Supervisor,
    &c.supervisor,
    Some("please expand objective b"),
  )
  .await
  .unwrap();
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Comment,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::Submitted);
  assert_eq!(view.comments.supervisor.len(), 2);
  assert_eq!(view.comments.supervisor[0].text, "please expand objective b");
  assert_eq!(view.comments.supervisor[1].text, "");
}

#[tokio::test]
async fn revision_cycle_clears_supervisor_approval() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap();

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::RequestChanges,
    WorkflowRole::Reviewer,
    &c.reviewer,
    Some("weights look off"),
  )
  .await
  .unwrap();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::RevisionRequested);
  // request_changes never sets an approval timestamp.
  assert!(view.plan.reviewer_approved_at.is_none());

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Submit,
    WorkflowRole::Employee,
    &c.employee,
    None,
  )
  .await
  .unwrap();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::Submitted);
  // Resubmission restarts the chain at the supervisor.
  assert!(view.plan.supervisor_approved_at.is_none());
  assert!(view.plan.reviewer_approved_at.is_none());
}

#[tokio::test]
async fn approved_records_reject_every_action() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap();
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::FinalApprove,
    WorkflowRole::Reviewer,
    &c.reviewer,
    None,
  )
  .await
  .unwrap();

  let before = eng.get_plan(plan_id).await.unwrap();

  for (action, role, actor) in [
    (WorkflowAction::Submit, WorkflowRole::Employee, &c.employee),
    (WorkflowAction::Comment, WorkflowRole::Supervisor, &c.supervisor),
    (WorkflowAction::Approve, WorkflowRole::Supervisor, &c.supervisor),
    (WorkflowAction::RequestChanges, WorkflowRole::Reviewer, &c.reviewer),
    (WorkflowAction::FinalApprove, WorkflowRole::Reviewer, &c.reviewer),
  ] {
    let err = plan_action(&eng, plan_id, action, role, actor, None)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Locked(_)), "action {action} not locked");
  }

  // Nothing moved: state, timestamps, ledger all untouched.
  let after = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(after.plan.workflow_status, WorkflowState::Approved);
  assert_eq!(after.plan.version, before.plan.version);
  assert_eq!(after.comments.len(), before.comments.len());
}

#[tokio::test]
async fn out_of_sequence_actions_are_invalid_transitions() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;

  let err = plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap_err();
  assert!(matches!(
    err,
    Error::InvalidTransition {
      state:  WorkflowState::Draft,
      action: WorkflowAction::Approve,
    }
  ));
}

// ─── Progress ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn progress_recomputes_from_activities_on_every_read() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;
  let view = eng
    .update_responsibilities(
      plan_id,
      &c.employee,
      vec![resp("heavy", 60), resp("light", 40)],
    )
    .await
    .unwrap();
  let heavy = view.responsibilities[0].responsibility.responsibility_id;
  let light = view.responsibilities[1].responsibility.responsibility_id;

  let activity = |status: ActivityStatus| NewActivity {
    title:       "step".into(),
    description: String::new(),
    status,
  };

  // heavy: 1 of 2 completed -> 50; light: none logged -> 0.
  eng
    .record_activity(heavy, activity(ActivityStatus::Completed))
    .await
    .unwrap();
  eng
    .record_activity(heavy, activity(ActivityStatus::InProgress))
    .await
    .unwrap();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.responsibilities[0].progress, 50);
  assert_eq!(view.responsibilities[1].progress, 0);
  // (60*50 + 40*0) / 100 = 30
  assert_eq!(view.progress, 30);

  // Another completion pushes the heavy responsibility past half.
  eng
    .record_activity(heavy, activity(ActivityStatus::Completed))
    .await
    .unwrap();
  let view = eng.get_plan(plan_id).await.unwrap();
  assert!(view.responsibilities[0].progress > 50);
}

#[tokio::test]
async fn completed_activities_carry_a_completion_timestamp() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;
  let view = eng
    .update_responsibilities(plan_id, &c.employee, vec![resp("only", 100)])
    .await
    .unwrap();
  let rid = view.responsibilities[0].responsibility.responsibility_id;

  let done = eng
    .record_activity(
      rid,
      NewActivity {
        title:       "finished".into(),
        description: String::new(),
        status:      ActivityStatus::Completed,
      },
    )
    .await
    .unwrap();
  assert!(done.completed_at.is_some());

  let open = eng
    .record_activity(
      rid,
      NewActivity {
        title:       "ongoing".into(),
        description: String::new(),
        status:      ActivityStatus::InProgress,
      },
    )
    .await
    .unwrap();
  assert!(open.completed_at.is_none());
}

#[tokio::test]
async fn activity_on_unknown_responsibility_errors() {
  let eng = engine().await;
  let err = eng
    .record_activity(
      Uuid::new_v4(),
      NewActivity {
        title:       "orphan".into(),
        description: String::new(),
        status:      ActivityStatus::Pending,
      },
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ResponsibilityNotFound(_)));
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn stale_version_commits_conflict() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;

  let store = eng.store();
  let mut stale = store.get_plan(plan_id).await.unwrap().unwrap();

  // Another writer moves the record on.
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap();

  // The stale writer's commit must fail rather than silently discarding
  // the approval above.
  let expected = stale.version;
  stale.workflow_status = WorkflowState::RevisionRequested;
  stale.version += 1;
  let err = store
    .commit_plan_transition(
      &stale,
      expected,
      NewCommentEntry {
        author_id:   c.supervisor.actor_id,
        author_name: c.supervisor.display_name.clone(),
        role:        WorkflowRole::Supervisor,
        action:      WorkflowAction::RequestChanges,
        text:        String::new(),
      },
    )
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Conflict(_)));

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.plan.workflow_status, WorkflowState::SupervisorApproved);
}

// ─── Pending-work queries ────────────────────────────────────────────────────

#[tokio::test]
async fn pending_lists_follow_the_pipeline_stage() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await;

  let pending = eng
    .list_plans_for_actor(c.supervisor.actor_id, Capability::Supervisor)
    .await
    .unwrap();
  assert_eq!(pending.len(), 1);
  assert_eq!(pending[0].plan_id, plan_id);

  // Nothing for the reviewer until the supervisor approves.
  let pending = eng
    .list_plans_for_actor(c.reviewer.actor_id, Capability::Reviewer)
    .await
    .unwrap();
  assert!(pending.is_empty());

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Approve,
    WorkflowRole::Supervisor,
    &c.supervisor,
    None,
  )
  .await
  .unwrap();

  let pending = eng
    .list_plans_for_actor(c.reviewer.actor_id, Capability::Reviewer)
    .await
    .unwrap();
  assert_eq!(pending.len(), 1);
  let pending = eng
    .list_plans_for_actor(c.supervisor.actor_id, Capability::Supervisor)
    .await
    .unwrap();
  assert!(pending.is_empty());
}

// ─── Appraisals ──────────────────────────────────────────────────────────────

fn new_appraisal(c: &Cast, plan_id: Option<Uuid>) -> NewAppraisal {
  NewAppraisal {
    employee_id:    c.employee.actor_id,
    supervisor_id:  c.supervisor.actor_id,
    reviewer_id:    Some(c.reviewer.actor_id),
    plan_id,
    appraisal_type: "annual".into(),
  }
}

#[tokio::test]
async fn appraisal_pipeline_runs_without_a_weight_gate() {
  let eng = engine().await;
  let c = cast();
  let view = eng.create_appraisal(new_appraisal(&c, None)).await.unwrap();
  let id = view.appraisal.appraisal_id;

  // No responsibilities, no weight check: appraisals submit directly.
  eng
    .apply_action(
      RecordKind::Appraisal,
      id,
      WorkflowAction::Submit,
      WorkflowRole::Employee,
      &c.employee,
      Some("self-assessment attached".into()),
    )
    .await
    .unwrap();
  eng
    .apply_action(
      RecordKind::Appraisal,
      id,
      WorkflowAction::Approve,
      WorkflowRole::Supervisor,
      &c.supervisor,
      None,
    )
    .await
    .unwrap();
  eng
    .apply_action(
      RecordKind::Appraisal,
      id,
      WorkflowAction::FinalApprove,
      WorkflowRole::Reviewer,
      &c.reviewer,
      Some("confirmed".into()),
    )
    .await
    .unwrap();

  let view = eng.get_appraisal(id).await.unwrap();
  assert_eq!(view.appraisal.workflow_status, WorkflowState::Approved);
  assert!(view.appraisal.supervisor_approved_at.is_some());
  assert!(view.appraisal.reviewer_approved_at.is_some());
  assert_eq!(view.comments.len(), 3);
  assert_eq!(view.comments.employee[0].text, "self-assessment attached");
}

#[tokio::test]
async fn rating_is_restricted_and_locks_on_approval() {
  let eng = engine().await;
  let c = cast();
  let id = eng
    .create_appraisal(new_appraisal(&c, None))
    .await
    .unwrap()
    .appraisal
    .appraisal_id;

  // The employee may not rate themselves.
  let err = eng.record_rating(id, &c.employee, 4.0).await.unwrap_err();
  assert!(matches!(err, Error::Unauthorized { .. }));

  let view = eng.record_rating(id, &c.supervisor, 4.0).await.unwrap();
  assert_eq!(view.appraisal.overall_rating, Some(4.0));

  let err = eng.record_rating(id, &c.supervisor, 200.0).await.unwrap_err();
  assert!(matches!(err, Error::RatingOutOfRange(_)));

  // Drive to approved, after which the rating is frozen.
  eng
    .apply_action(
      RecordKind::Appraisal,
      id,
      WorkflowAction::Submit,
      WorkflowRole::Employee,
      &c.employee,
      None,
    )
    .await
    .unwrap();
  eng
    .apply_action(
      RecordKind::Appraisal,
      id,
      WorkflowAction::Approve,
      WorkflowRole::Supervisor,
      &c.supervisor,
      None,
    )
    .await
    .unwrap();
  eng
    .apply_action(
      RecordKind::Appraisal,
      id,
      WorkflowAction::FinalApprove,
      WorkflowRole::Reviewer,
      &c.reviewer,
      None,
    )
    .await
    .unwrap();

  let err = eng.record_rating(id, &c.supervisor, 5.0).await.unwrap_err();
  assert!(matches!(err, Error::Locked(_)));
}

#[tokio::test]
async fn appraisal_keeps_a_weak_plan_reference() {
  let eng = engine().await;
  let c = cast();
  let plan_id = eng.create_plan(new_plan(&c)).await.unwrap().plan.plan_id;

  let view = eng
    .create_appraisal(new_appraisal(&c, Some(plan_id)))
    .await
    .unwrap();
  assert_eq!(view.appraisal.plan_id, Some(plan_id));

  let fetched = eng
    .get_appraisal(view.appraisal.appraisal_id)
    .await
    .unwrap();
  assert_eq!(fetched.appraisal.plan_id, Some(plan_id));
}

// ─── Ledger accounting ───────────────────────────────────────────────────────

#[tokio::test]
async fn ledger_grows_by_exactly_one_per_successful_transition() {
  let eng = engine().await;
  let c = cast();
  let plan_id = submitted_plan(&eng, &c).await; // 1 entry

  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Comment,
    WorkflowRole::Supervisor,
    &c.supervisor,
    Some("note"),
  )
  .await
  .unwrap(); // 2
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::RequestChanges,
    WorkflowRole::Supervisor,
    &c.supervisor,
    Some("redo"),
  )
  .await
  .unwrap(); // 3
  plan_action(
    &eng,
    plan_id,
    WorkflowAction::Submit,
    WorkflowRole::Employee,
    &c.employee,
    None,
  )
  .await
  .unwrap(); // 4

  // A rejected action adds nothing.
  let _ = plan_action(
    &eng,
    plan_id,
    WorkflowAction::FinalApprove,
    WorkflowRole::Reviewer,
    &c.reviewer,
    Some("too early"),
  )
  .await
  .unwrap_err();

  let view = eng.get_plan(plan_id).await.unwrap();
  assert_eq!(view.comments.len(), 4);
  assert_eq!(view.comments.employee.len(), 2);
  assert_eq!(view.comments.supervisor.len(), 2);
  assert!(view.comments.reviewer.is_empty());
}
