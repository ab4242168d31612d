//! The workflow state machine shared by plans and appraisals.
//!
//! States are canonical: the legacy vocabulary used two labels apiece for the
//! supervisor and reviewer stages (`submitted`/`supervisor_review`,
//! `supervisor_approved`/`reviewer_assessment`). The engine stores and emits
//! exactly one label per state; the legacy synonyms are accepted on parse
//! only, at the interface boundary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── States ──────────────────────────────────────────────────────────────────

/// The authoritative lifecycle state of a plan or appraisal.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowState {
  Draft,
  /// Awaiting supervisor action. Legacy label: `supervisor_review`.
  #[serde(alias = "supervisor_review")]
  Submitted,
  /// Awaiting reviewer action. Legacy label: `reviewer_assessment`.
  #[serde(alias = "reviewer_assessment")]
  SupervisorApproved,
  /// Terminal; every further action fails with a locked error.
  Approved,
  /// Control returned to the employee for rework.
  RevisionRequested,
}

impl WorkflowState {
  /// Canonical storage/wire label.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Draft => "draft",
      Self::Submitted => "submitted",
      Self::SupervisorApproved => "supervisor_approved",
      Self::Approved => "approved",
      Self::RevisionRequested => "revision_requested",
    }
  }

  /// Parse a state label, accepting the legacy synonyms.
  pub fn parse_label(s: &str) -> Option<Self> {
    match s {
      "draft" => Some(Self::Draft),
      "submitted" | "supervisor_review" => Some(Self::Submitted),
      "supervisor_approved" | "reviewer_assessment" => {
        Some(Self::SupervisorApproved)
      }
      "approved" => Some(Self::Approved),
      "revision_requested" => Some(Self::RevisionRequested),
      _ => None,
    }
  }

  pub fn is_terminal(self) -> bool { matches!(self, Self::Approved) }

  /// The coarse summary status derived from the state machine state.
  pub fn coarse(self) -> CoarseStatus {
    match self {
      Self::Draft | Self::RevisionRequested => CoarseStatus::Draft,
      Self::Submitted | Self::SupervisorApproved => CoarseStatus::Submitted,
      Self::Approved => CoarseStatus::Completed,
    }
  }
}

/// The coarse `status` field exposed alongside the authoritative
/// [`WorkflowState`]. Derived, never stored.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CoarseStatus {
  Draft,
  Submitted,
  Completed,
}

// ─── Actions ─────────────────────────────────────────────────────────────────

/// A workflow action requested against a plan or appraisal.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowAction {
  Submit,
  Comment,
  Approve,
  RequestChanges,
  FinalApprove,
}

// ─── Roles ───────────────────────────────────────────────────────────────────

/// The role under which an actor claims to act, and the role a ledger entry
/// is attributed to. Administrative override is not a claimable role: an HR
/// user acting in a supervisor's stead still claims `supervisor`, and the
/// ledger records their real identity.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowRole {
  Employee,
  Supervisor,
  Reviewer,
}

// ─── Transition table ────────────────────────────────────────────────────────

/// A resolved transition: the role whose turn it is, and the state the
/// record moves to. `Comment` transitions keep the state unchanged but are
/// still full transitions (authorised, ledgered, versioned).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
  pub required_role: WorkflowRole,
  pub next:          WorkflowState,
}

/// Look up the transition table. Returns `None` when `action` is not defined
/// for `state` — including everything on an `Approved` record, which the
/// engine reports as a distinct locked error.
pub fn transition(
  state: WorkflowState,
  action: WorkflowAction,
) -> Option<Transition> {
  use WorkflowAction as A;
  use WorkflowRole as R;
  use WorkflowState as S;

  let (required_role, next) = match (state, action) {
    (S::Draft, A::Submit) => (R::Employee, S::Submitted),
    (S::Submitted, A::Comment) => (R::Supervisor, S::Submitted),
    (S::Submitted, A::RequestChanges) => {
      (R::Supervisor, S::RevisionRequested)
    }
    (S::Submitted, A::Approve) => (R::Supervisor, S::SupervisorApproved),
    (S::SupervisorApproved, A::Comment) => {
      (R::Reviewer, S::SupervisorApproved)
    }
    (S::SupervisorApproved, A::RequestChanges) => {
      (R::Reviewer, S::RevisionRequested)
    }
    (S::SupervisorApproved, A::FinalApprove) => (R::Reviewer, S::Approved),
    (S::RevisionRequested, A::Submit) => (R::Employee, S::Submitted),
    _ => return None,
  };

  Some(Transition { required_role, next })
}
