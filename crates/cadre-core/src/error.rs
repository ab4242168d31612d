//! Error types for `cadre-core`.
//!
//! One variant per error kind the workflow contract distinguishes, so that
//! callers can render a specific message for every expected business-rule
//! violation. Only genuinely unexpected failures collapse into [`Error::Storage`].

use thiserror::Error;
use uuid::Uuid;

use crate::workflow::{WorkflowAction, WorkflowRole, WorkflowState};

#[derive(Debug, Error)]
pub enum Error {
  #[error("plan not found: {0}")]
  PlanNotFound(Uuid),

  #[error("appraisal not found: {0}")]
  AppraisalNotFound(Uuid),

  #[error("responsibility not found: {0}")]
  ResponsibilityNotFound(Uuid),

  /// Responsibility weights must sum to exactly 100 before submission.
  /// Carries the computed total so the caller can show "current: X%".
  #[error("responsibility weights sum to {total}, must be exactly 100")]
  WeightSum { total: u32 },

  #[error("responsibility weight {0} is out of range (0-100)")]
  WeightOutOfRange(u32),

  /// The actor's resolved capability set does not include the capability
  /// the claimed role requires.
  #[error("actor does not hold the {required} role for this record")]
  Unauthorized { required: WorkflowRole },

  /// The claimed acting role is not the one this transition belongs to.
  /// A supervisor may not perform the reviewer's action under a mislabeled
  /// request, even though they are a valid party to the record.
  #[error("action requires acting role {required}, not {claimed}")]
  RoleMismatch {
    claimed:  WorkflowRole,
    required: WorkflowRole,
  },

  /// The action is not defined for the record's current state. Distinct
  /// from [`Error::Unauthorized`]: nobody can perform this action right now.
  #[error("action {action} is not valid in state {state}")]
  InvalidTransition {
    state:  WorkflowState,
    action: WorkflowAction,
  },

  /// Responsibilities are editable only while the employee holds the plan.
  #[error(
    "responsibilities can only be edited in draft or revision_requested, \
     not {state}"
  )]
  NotEditable { state: WorkflowState },

  /// The record is in the terminal `approved` state.
  #[error("record {0} is approved and locked against further changes")]
  Locked(Uuid),

  /// The stored record moved on since it was read. The caller should
  /// refetch and retry.
  #[error("record {0} was modified concurrently")]
  Conflict(Uuid),

  #[error("rating {0} is out of range")]
  RatingOutOfRange(f64),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
