//! Error type for `cadre-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored label (state, role, action, status) that no longer decodes.
  #[error("unrecognised stored label: {0}")]
  Decode(String),

  #[error("plan not found: {0}")]
  PlanNotFound(Uuid),

  #[error("appraisal not found: {0}")]
  AppraisalNotFound(Uuid),

  #[error("responsibility not found: {0}")]
  ResponsibilityNotFound(Uuid),

  /// The compare-and-swap on the record's version counter failed: the
  /// stored record moved on since it was read.
  #[error("record {0} was modified concurrently")]
  Conflict(Uuid),
}

impl From<Error> for cadre_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::PlanNotFound(id) => Self::PlanNotFound(id),
      Error::AppraisalNotFound(id) => Self::AppraisalNotFound(id),
      Error::ResponsibilityNotFound(id) => Self::ResponsibilityNotFound(id),
      Error::Conflict(id) => Self::Conflict(id),
      other => Self::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
