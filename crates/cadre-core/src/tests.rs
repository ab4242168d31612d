//! Unit tests for the pure engine components.

use chrono::Utc;
use uuid::Uuid;

use crate::{
  actor::{Actor, Capability, RecordParties, RoleResolver},
  ledger::{CommentEntry, LedgerThreads},
  plan::{Activity, ActivityStatus},
  progress::{plan_progress, responsibility_progress},
  weight::validate_weights,
  workflow::{
    transition, CoarseStatus, WorkflowAction, WorkflowRole, WorkflowState,
  },
};

// ─── Weight validator ────────────────────────────────────────────────────────

#[test]
fn weights_summing_to_100_are_valid() {
  let check = validate_weights([40, 30, 20, 10]);
  assert!(check.valid);
  assert_eq!(check.total, 100);
}

#[test]
fn weights_summing_to_90_are_invalid_and_report_total() {
  let check = validate_weights([40, 30, 20]);
  assert!(!check.valid);
  assert_eq!(check.total, 90);
}

#[test]
fn weights_over_100_are_invalid() {
  let check = validate_weights([60, 60]);
  assert!(!check.valid);
  assert_eq!(check.total, 120);
}

#[test]
fn empty_weight_list_is_not_submittable() {
  let check = validate_weights([]);
  assert!(!check.valid);
  assert_eq!(check.total, 0);
}

#[test]
fn single_full_weight_is_valid() {
  assert!(validate_weights([100]).valid);
}

// ─── Progress aggregator ─────────────────────────────────────────────────────

fn activity(status: ActivityStatus) -> Activity {
  Activity {
    activity_id:       Uuid::new_v4(),
    responsibility_id: Uuid::new_v4(),
    title:             "work".into(),
    description:       String::new(),
    status,
    completed_at:      None,
    updated_at:        Utc::now(),
  }
}

#[test]
fn no_activities_means_zero_progress() {
  assert_eq!(responsibility_progress(&[]), 0);
}

#[test]
fn progress_is_share_of_completed_activities() {
  let activities = vec![
    activity(ActivityStatus::Completed),
    activity(ActivityStatus::Completed),
    activity(ActivityStatus::InProgress),
    activity(ActivityStatus::Pending),
  ];
  assert_eq!(responsibility_progress(&activities), 50);
}

#[test]
fn all_completed_is_100() {
  let activities =
    vec![activity(ActivityStatus::Completed), activity(ActivityStatus::Completed)];
  assert_eq!(responsibility_progress(&activities), 100);
}

#[test]
fn plan_progress_is_weighted_average() {
  // 40% at 100, 60% at 50 -> 40 + 30 = 70.
  assert_eq!(plan_progress(&[(40, 100), (60, 50)]), 70);
}

#[test]
fn plan_progress_guards_zero_total_weight() {
  assert_eq!(plan_progress(&[]), 0);
  assert_eq!(plan_progress(&[(0, 100), (0, 50)]), 0);
}

#[test]
fn plan_progress_is_bounded_by_component_extremes() {
  let items = [(40u32, 80u32), (30, 20), (20, 60), (10, 0)];
  let overall = plan_progress(&items);
  let min = items.iter().map(|(_, p)| *p).min().unwrap();
  let max = items.iter().map(|(_, p)| *p).max().unwrap();
  assert!(overall >= min && overall <= max);
}

// ─── Role resolver ───────────────────────────────────────────────────────────

fn actor(id: Uuid, roles: &[&str]) -> Actor {
  Actor {
    actor_id:     id,
    display_name: "Test Actor".into(),
    roles:        roles.iter().map(|r| r.to_string()).collect(),
  }
}

fn parties() -> (RecordParties, Uuid, Uuid, Uuid) {
  let employee = Uuid::new_v4();
  let supervisor = Uuid::new_v4();
  let reviewer = Uuid::new_v4();
  (
    RecordParties {
      employee_id:   employee,
      supervisor_id: supervisor,
      reviewer_id:   Some(reviewer),
    },
    employee,
    supervisor,
    reviewer,
  )
}

#[test]
fn resolver_grants_capabilities_by_record_identity() {
  let resolver = RoleResolver::default();
  let (p, employee, supervisor, reviewer) = parties();

  let caps = resolver.resolve(&p, &actor(employee, &[]));
  assert!(caps.contains(&Capability::Employee));
  assert_eq!(caps.len(), 1);

  let caps = resolver.resolve(&p, &actor(supervisor, &[]));
  assert!(caps.contains(&Capability::Supervisor));

  let caps = resolver.resolve(&p, &actor(reviewer, &[]));
  assert!(caps.contains(&Capability::Reviewer));
}

#[test]
fn unrelated_actor_resolves_to_nothing() {
  let resolver = RoleResolver::default();
  let (p, ..) = parties();
  let caps = resolver.resolve(&p, &actor(Uuid::new_v4(), &["staff"]));
  assert!(caps.is_empty());
}

#[test]
fn admin_membership_grants_override_case_insensitively() {
  let resolver = RoleResolver::new(["hr_manager".to_owned()]);
  let (p, ..) = parties();
  let caps = resolver.resolve(&p, &actor(Uuid::new_v4(), &["HR_Manager"]));
  assert!(caps.contains(&Capability::Override));
}

#[test]
fn unassigned_reviewer_grants_nobody_reviewer() {
  let resolver = RoleResolver::default();
  let (mut p, _, supervisor, _) = parties();
  p.reviewer_id = None;
  let caps = resolver.resolve(&p, &actor(supervisor, &[]));
  assert!(!caps.contains(&Capability::Reviewer));
}

#[test]
fn claimed_role_requires_matching_capability_or_override() {
  let resolver = RoleResolver::default();
  let (p, _, supervisor, _) = parties();

  let supervisor_actor = actor(supervisor, &[]);
  assert!(resolver.authorizes(&p, &supervisor_actor, WorkflowRole::Supervisor));
  // Holding SUPERVISOR does not allow claiming reviewer.
  assert!(!resolver.authorizes(&p, &supervisor_actor, WorkflowRole::Reviewer));

  let admin = actor(Uuid::new_v4(), &["admin"]);
  assert!(resolver.authorizes(&p, &admin, WorkflowRole::Supervisor));
  assert!(resolver.authorizes(&p, &admin, WorkflowRole::Reviewer));
  assert!(resolver.authorizes(&p, &admin, WorkflowRole::Employee));
}

// ─── Transition table ────────────────────────────────────────────────────────

#[test]
fn transition_table_matches_the_pipeline() {
  use WorkflowAction as A;
  use WorkflowRole as R;
  use WorkflowState as S;

  let t = transition(S::Draft, A::Submit).unwrap();
  assert_eq!((t.required_role, t.next), (R::Employee, S::Submitted));

  let t = transition(S::Submitted, A::Approve).unwrap();
  assert_eq!((t.required_role, t.next), (R::Supervisor, S::SupervisorApproved));

  let t = transition(S::Submitted, A::RequestChanges).unwrap();
  assert_eq!((t.required_role, t.next), (R::Supervisor, S::RevisionRequested));

  let t = transition(S::Submitted, A::Comment).unwrap();
  assert_eq!((t.required_role, t.next), (R::Supervisor, S::Submitted));

  let t = transition(S::SupervisorApproved, A::FinalApprove).unwrap();
  assert_eq!((t.required_role, t.next), (R::Reviewer, S::Approved));

  let t = transition(S::SupervisorApproved, A::RequestChanges).unwrap();
  assert_eq!((t.required_role, t.next), (R::Reviewer, S::RevisionRequested));

  let t = transition(S::RevisionRequested, A::Submit).unwrap();
  assert_eq!((t.required_role, t.next), (R::Employee, S::Submitted));
}

#[test]
fn undefined_transitions_are_rejected() {
  use WorkflowAction as A;
  use WorkflowState as S;

  assert!(transition(S::Draft, A::Approve).is_none());
  assert!(transition(S::Draft, A::Comment).is_none());
  assert!(transition(S::Submitted, A::Submit).is_none());
  assert!(transition(S::Submitted, A::FinalApprove).is_none());
  assert!(transition(S::SupervisorApproved, A::Approve).is_none());
  assert!(transition(S::RevisionRequested, A::Approve).is_none());
}

#[test]
fn approved_is_terminal_for_every_action() {
  use WorkflowAction as A;
  for action in [
    A::Submit,
    A::Comment,
    A::Approve,
    A::RequestChanges,
    A::FinalApprove,
  ] {
    assert!(transition(WorkflowState::Approved, action).is_none());
  }
  assert!(WorkflowState::Approved.is_terminal());
}

// ─── State labels ────────────────────────────────────────────────────────────

#[test]
fn legacy_state_synonyms_parse_to_canonical_states() {
  assert_eq!(
    WorkflowState::parse_label("supervisor_review"),
    Some(WorkflowState::Submitted)
  );
  assert_eq!(
    WorkflowState::parse_label("reviewer_assessment"),
    Some(WorkflowState::SupervisorApproved)
  );
  assert_eq!(WorkflowState::parse_label("nonsense"), None);
}

#[test]
fn canonical_labels_round_trip() {
  for state in [
    WorkflowState::Draft,
    WorkflowState::Submitted,
    WorkflowState::SupervisorApproved,
    WorkflowState::Approved,
    WorkflowState::RevisionRequested,
  ] {
    assert_eq!(WorkflowState::parse_label(state.as_str()), Some(state));
  }
}

#[test]
fn coarse_status_summarises_the_pipeline() {
  assert_eq!(WorkflowState::Draft.coarse(), CoarseStatus::Draft);
  assert_eq!(
    WorkflowState::RevisionRequested.coarse(),
    CoarseStatus::Draft
  );
  assert_eq!(WorkflowState::Submitted.coarse(), CoarseStatus::Submitted);
  assert_eq!(
    WorkflowState::SupervisorApproved.coarse(),
    CoarseStatus::Submitted
  );
  assert_eq!(WorkflowState::Approved.coarse(), CoarseStatus::Completed);
}

// ─── Ledger projection ───────────────────────────────────────────────────────

fn entry(role: WorkflowRole, text: &str) -> CommentEntry {
  CommentEntry {
    comment_id:  Uuid::new_v4(),
    author_id:   Uuid::new_v4(),
    author_name: "Someone".into(),
    role,
    action:      WorkflowAction::Comment,
    text:        text.into(),
    recorded_at: Utc::now(),
  }
}

#[test]
fn projection_splits_by_role_and_preserves_order() {
  let entries = vec![
    entry(WorkflowRole::Employee, "submitting"),
    entry(WorkflowRole::Supervisor, "first pass"),
    entry(WorkflowRole::Supervisor, "second pass"),
    entry(WorkflowRole::Reviewer, "final"),
  ];
  let threads = LedgerThreads::project(entries);

  assert_eq!(threads.employee.len(), 1);
  assert_eq!(threads.supervisor.len(), 2);
  assert_eq!(threads.reviewer.len(), 1);
  assert_eq!(threads.len(), 4);

  assert_eq!(threads.supervisor[0].text, "first pass");
  assert_eq!(threads.supervisor[1].text, "second pass");
}
