//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, dates as ISO 8601. Enum
//! labels use the canonical snake_case forms; workflow states additionally
//! accept the legacy synonyms on decode. UUIDs are stored as hyphenated
//! lowercase strings. Success indicators are stored as compact JSON.

use cadre_core::{
  appraisal::Appraisal,
  ledger::CommentEntry,
  plan::{Activity, ActivityStatus, PerformancePlan, Responsibility,
         SuccessIndicator},
  workflow::{WorkflowAction, WorkflowRole, WorkflowState},
};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn decode_uuid_opt(s: Option<&str>) -> Result<Option<Uuid>> {
  s.map(decode_uuid).transpose()
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_dt_opt(dt: Option<DateTime<Utc>>) -> Option<String> {
  dt.map(encode_dt)
}

pub fn decode_dt_opt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enum labels ─────────────────────────────────────────────────────────────

pub fn decode_state(s: &str) -> Result<WorkflowState> {
  WorkflowState::parse_label(s)
    .ok_or_else(|| Error::Decode(format!("workflow state {s:?}")))
}

pub fn decode_role(s: &str) -> Result<WorkflowRole> {
  s.parse()
    .map_err(|_| Error::Decode(format!("workflow role {s:?}")))
}

pub fn decode_action(s: &str) -> Result<WorkflowAction> {
  s.parse()
    .map_err(|_| Error::Decode(format!("workflow action {s:?}")))
}

pub fn decode_activity_status(s: &str) -> Result<ActivityStatus> {
  s.parse()
    .map_err(|_| Error::Decode(format!("activity status {s:?}")))
}

// ─── Success indicators ──────────────────────────────────────────────────────

pub fn encode_indicators(list: &[SuccessIndicator]) -> Result<String> {
  Ok(serde_json::to_string(list)?)
}

pub fn decode_indicators(s: &str) -> Result<Vec<SuccessIndicator>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `plans` row.
pub struct RawPlan {
  pub plan_id:                String,
  pub employee_id:            String,
  pub supervisor_id:          String,
  pub reviewer_id:            Option<String>,
  pub plan_year:              i32,
  pub plan_period:            String,
  pub workflow_status:        String,
  pub submitted_at:           Option<String>,
  pub supervisor_approved_at: Option<String>,
  pub reviewer_approved_at:   Option<String>,
  pub created_at:             String,
  pub updated_at:             String,
  pub version:                i64,
}

impl RawPlan {
  pub fn into_plan(self) -> Result<PerformancePlan> {
    Ok(PerformancePlan {
      plan_id:                decode_uuid(&self.plan_id)?,
      employee_id:            decode_uuid(&self.employee_id)?,
      supervisor_id:          decode_uuid(&self.supervisor_id)?,
      reviewer_id:            decode_uuid_opt(self.reviewer_id.as_deref())?,
      plan_year:              self.plan_year,
      plan_period:            self.plan_period,
      workflow_status:        decode_state(&self.workflow_status)?,
      submitted_at:           decode_dt_opt(self.submitted_at.as_deref())?,
      supervisor_approved_at: decode_dt_opt(
        self.supervisor_approved_at.as_deref(),
      )?,
      reviewer_approved_at:   decode_dt_opt(
        self.reviewer_approved_at.as_deref(),
      )?,
      created_at:             decode_dt(&self.created_at)?,
      updated_at:             decode_dt(&self.updated_at)?,
      version:                self.version,
    })
  }
}

/// Raw strings read directly from a `responsibilities` row.
pub struct RawResponsibility {
  pub responsibility_id:  String,
  pub plan_id:            String,
  pub description:        String,
  pub tasks:              String,
  pub weight:             i64,
  pub target_date:        Option<String>,
  pub status_label:       Option<String>,
  pub comments:           Option<String>,
  pub success_indicators: String,
}

impl RawResponsibility {
  pub fn into_responsibility(self) -> Result<Responsibility> {
    Ok(Responsibility {
      responsibility_id:  decode_uuid(&self.responsibility_id)?,
      plan_id:            decode_uuid(&self.plan_id)?,
      description:        self.description,
      tasks:              self.tasks,
      weight:             self.weight as u32,
      target_date:        self
        .target_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      status_label:       self.status_label,
      comments:           self.comments,
      success_indicators: decode_indicators(&self.success_indicators)?,
    })
  }
}

/// Raw strings read directly from an `activities` row.
pub struct RawActivity {
  pub activity_id:       String,
  pub responsibility_id: String,
  pub title:             String,
  pub description:       String,
  pub status:            String,
  pub completed_at:      Option<String>,
  pub updated_at:        String,
}

impl RawActivity {
  pub fn into_activity(self) -> Result<Activity> {
    Ok(Activity {
      activity_id:       decode_uuid(&self.activity_id)?,
      responsibility_id: decode_uuid(&self.responsibility_id)?,
      title:             self.title,
      description:       self.description,
      status:            decode_activity_status(&self.status)?,
      completed_at:      decode_dt_opt(self.completed_at.as_deref())?,
      updated_at:        decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from an `appraisals` row.
pub struct RawAppraisal {
  pub appraisal_id:           String,
  pub employee_id:            String,
  pub supervisor_id:          String,
  pub reviewer_id:            Option<String>,
  pub plan_id:                Option<String>,
  pub appraisal_type:         String,
  pub overall_rating:         Option<f64>,
  pub workflow_status:        String,
  pub submitted_at:           Option<String>,
  pub supervisor_approved_at: Option<String>,
  pub reviewer_approved_at:   Option<String>,
  pub created_at:             String,
  pub updated_at:             String,
  pub version:                i64,
}

impl RawAppraisal {
  pub fn into_appraisal(self) -> Result<Appraisal> {
    Ok(Appraisal {
      appraisal_id:           decode_uuid(&self.appraisal_id)?,
      employee_id:            decode_uuid(&self.employee_id)?,
      supervisor_id:          decode_uuid(&self.supervisor_id)?,
      reviewer_id:            decode_uuid_opt(self.reviewer_id.as_deref())?,
      plan_id:                decode_uuid_opt(self.plan_id.as_deref())?,
      appraisal_type:         self.appraisal_type,
      overall_rating:         self.overall_rating,
      workflow_status:        decode_state(&self.workflow_status)?,
      submitted_at:           decode_dt_opt(self.submitted_at.as_deref())?,
      supervisor_approved_at: decode_dt_opt(
        self.supervisor_approved_at.as_deref(),
      )?,
      reviewer_approved_at:   decode_dt_opt(
        self.reviewer_approved_at.as_deref(),
      )?,
      created_at:             decode_dt(&self.created_at)?,
      updated_at:             decode_dt(&self.updated_at)?,
      version:                self.version,
    })
  }
}

/// Raw strings read directly from a `workflow_comments` row.
pub struct RawComment {
  pub comment_id:  String,
  pub author_id:   String,
  pub author_name: String,
  pub role:        String,
  pub action:      String,
  pub body:        String,
  pub recorded_at: String,
}

impl RawComment {
  pub fn into_entry(self) -> Result<CommentEntry> {
    Ok(CommentEntry {
      comment_id:  decode_uuid(&self.comment_id)?,
      author_id:   decode_uuid(&self.author_id)?,
      author_name: self.author_name,
      role:        decode_role(&self.role)?,
      action:      decode_action(&self.action)?,
      text:        self.body,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
