//! Performance plan, responsibility, and activity types.
//!
//! A plan owns its responsibilities; a responsibility owns its activities.
//! Activities are append-only: every progress update is recorded as a new
//! activity rather than mutating a prior one, which gives each
//! responsibility a natural history of updates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  actor::RecordParties,
  workflow::{CoarseStatus, WorkflowState},
};

// ─── Plan ────────────────────────────────────────────────────────────────────

/// An employee's annual performance plan. One per employee per plan period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformancePlan {
  pub plan_id:       Uuid,
  pub employee_id:   Uuid,
  pub supervisor_id: Uuid,
  /// Optional until a reviewer is assigned.
  pub reviewer_id:   Option<Uuid>,
  pub plan_year:     i32,
  /// Free-form period label, e.g. "Jan-Dec 2025".
  pub plan_period:   String,

  /// The authoritative state machine state.
  pub workflow_status: WorkflowState,

  pub submitted_at:           Option<DateTime<Utc>>,
  pub supervisor_approved_at: Option<DateTime<Utc>>,
  pub reviewer_approved_at:   Option<DateTime<Utc>>,
  pub created_at:             DateTime<Utc>,
  pub updated_at:             DateTime<Utc>,

  /// Monotonic counter bumped on every write; the store's save operations
  /// compare-and-swap on it so concurrent approvals cannot silently
  /// overwrite each other.
  pub version: i64,
}

impl PerformancePlan {
  /// The coarse summary status derived from `workflow_status`.
  pub fn status(&self) -> CoarseStatus { self.workflow_status.coarse() }

  pub fn parties(&self) -> RecordParties {
    RecordParties {
      employee_id:   self.employee_id,
      supervisor_id: self.supervisor_id,
      reviewer_id:   self.reviewer_id,
    }
  }
}

/// Input to [`crate::store::WorkflowStore::create_plan`]. Plans are always
/// created in `draft`; identifiers and timestamps are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlan {
  pub employee_id:   Uuid,
  pub supervisor_id: Uuid,
  pub reviewer_id:   Option<Uuid>,
  pub plan_year:     i32,
  pub plan_period:   String,
}

// ─── Responsibility ──────────────────────────────────────────────────────────

/// One measurable target attached to a responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessIndicator {
  pub indicator:   String,
  pub target:      String,
  pub measurement: String,
}

/// A weighted objective line item belonging to exactly one plan.
///
/// `progress` does not live here: it is derived from the activity list on
/// every read (see [`crate::progress`]) and surfaced on
/// [`ResponsibilityView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Responsibility {
  pub responsibility_id: Uuid,
  pub plan_id:           Uuid,
  pub description:       String,
  /// Free-text task breakdown.
  pub tasks:             String,
  /// 0-100; the plan's responsibilities must total exactly 100 to submit.
  pub weight:            u32,
  pub target_date:       Option<NaiveDate>,
  /// Free status label, not interpreted by the engine.
  pub status_label:      Option<String>,
  pub comments:          Option<String>,
  pub success_indicators: Vec<SuccessIndicator>,
}

/// Input to the replace-in-place responsibilities update. Ordering is
/// significant and preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResponsibility {
  pub description:        String,
  #[serde(default)]
  pub tasks:              String,
  pub weight:             u32,
  pub target_date:        Option<NaiveDate>,
  pub status_label:       Option<String>,
  pub comments:           Option<String>,
  #[serde(default)]
  pub success_indicators: Vec<SuccessIndicator>,
}

// ─── Activity ────────────────────────────────────────────────────────────────

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
pub enum ActivityStatus {
  Pending,
  InProgress,
  Completed,
}

/// A unit of work evidencing progress against one responsibility.
/// Never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
  pub activity_id:       Uuid,
  pub responsibility_id: Uuid,
  pub title:             String,
  pub description:       String,
  pub status:            ActivityStatus,
  /// Set only when `status` is `completed`.
  pub completed_at:      Option<DateTime<Utc>>,
  pub updated_at:        DateTime<Utc>,
}

/// Input to [`crate::store::WorkflowStore::record_activity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub status:      ActivityStatus,
}

// ─── Read models ─────────────────────────────────────────────────────────────

/// A responsibility with its activities and derived completion percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsibilityView {
  #[serde(flatten)]
  pub responsibility: Responsibility,
  pub activities:     Vec<Activity>,
  /// Percentage of activities completed; 0 with no activities.
  pub progress:       u32,
}

/// The computed read model for a plan — responsibilities with fresh progress
/// figures, the overall weighted percentage, and the comment threads. Never
/// stored, always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanView {
  #[serde(flatten)]
  pub plan:             PerformancePlan,
  pub status:           CoarseStatus,
  pub responsibilities: Vec<ResponsibilityView>,
  /// Weight-averaged completion percentage across responsibilities.
  pub progress:         u32,
  pub comments:         crate::ledger::LedgerThreads,
}
