//! Appraisal types — the periodic evaluation cycle.
//!
//! Structurally parallel to the plan's approval pipeline: same workflow
//! vocabulary, same comment ledger, same versioned save. An appraisal may
//! reference a plan by id but does not own it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  actor::RecordParties,
  ledger::LedgerThreads,
  workflow::{CoarseStatus, WorkflowState},
};

/// A periodic evaluation of one employee, optionally linked to a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appraisal {
  pub appraisal_id:  Uuid,
  pub employee_id:   Uuid,
  pub supervisor_id: Uuid,
  pub reviewer_id:   Option<Uuid>,
  /// Weak reference; deleting the plan does not touch the appraisal.
  pub plan_id:       Option<Uuid>,
  /// Free-form cycle label, e.g. "annual", "probation", "mid-year".
  pub appraisal_type: String,
  /// Nullable until recorded by the supervisor or reviewer.
  pub overall_rating: Option<f64>,

  pub workflow_status: WorkflowState,

  pub submitted_at:           Option<DateTime<Utc>>,
  pub supervisor_approved_at: Option<DateTime<Utc>>,
  pub reviewer_approved_at:   Option<DateTime<Utc>>,
  pub created_at:             DateTime<Utc>,
  pub updated_at:             DateTime<Utc>,

  /// See [`crate::plan::PerformancePlan::version`].
  pub version: i64,
}

impl Appraisal {
  pub fn status(&self) -> CoarseStatus { self.workflow_status.coarse() }

  pub fn parties(&self) -> RecordParties {
    RecordParties {
      employee_id:   self.employee_id,
      supervisor_id: self.supervisor_id,
      reviewer_id:   self.reviewer_id,
    }
  }
}

/// Input to [`crate::store::WorkflowStore::create_appraisal`]. Always
/// created in `draft` with no rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppraisal {
  pub employee_id:    Uuid,
  pub supervisor_id:  Uuid,
  pub reviewer_id:    Option<Uuid>,
  pub plan_id:        Option<Uuid>,
  pub appraisal_type: String,
}

/// The computed read model for an appraisal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppraisalView {
  #[serde(flatten)]
  pub appraisal: Appraisal,
  pub status:    CoarseStatus,
  pub comments:  LedgerThreads,
}
