//! The comment ledger — the append-only audit trail of the approval
//! conversation.
//!
//! Entries are stored as a single flat, chronological log keyed by record.
//! They are never edited, deleted, reordered, or deduplicated; corrections
//! are new entries referencing the prior one in free text. The legacy
//! two-keyed `{supervisor: [...], reviewer: [...]}` wire shape is a
//! projection computed on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflow::{WorkflowAction, WorkflowRole};

// ─── Record reference ────────────────────────────────────────────────────────

/// Which kind of record a ledger entry (or workflow action) targets.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
  Plan,
  Appraisal,
}

impl RecordKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Plan => "plan",
      Self::Appraisal => "appraisal",
    }
  }
}

// ─── Entries ─────────────────────────────────────────────────────────────────

/// One immutable ledger entry. Every successful workflow transition appends
/// exactly one, even when the caller supplied no comment text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntry {
  pub comment_id:  Uuid,
  pub author_id:   Uuid,
  pub author_name: String,
  /// The role the entry is attributed to. An administrative override acting
  /// for a supervisor is recorded under `supervisor` with the admin's real
  /// identity in `author_id`/`author_name`.
  pub role:        WorkflowRole,
  /// The workflow action that produced this entry.
  pub action:      WorkflowAction,
  pub text:        String,
  pub recorded_at: DateTime<Utc>,
}

/// Input to a transition commit; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewCommentEntry {
  pub author_id:   Uuid,
  pub author_name: String,
  pub role:        WorkflowRole,
  pub action:      WorkflowAction,
  pub text:        String,
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// The per-role thread shape exposed on read models, for compatibility with
/// the two-keyed structure existing records use. Employee entries (submits)
/// keep their own thread so every state change stays traceable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerThreads {
  #[serde(default)]
  pub employee:   Vec<CommentEntry>,
  #[serde(default)]
  pub supervisor: Vec<CommentEntry>,
  #[serde(default)]
  pub reviewer:   Vec<CommentEntry>,
}

impl LedgerThreads {
  /// Project a flat chronological log into per-role threads, preserving
  /// insertion order within each thread.
  pub fn project(entries: Vec<CommentEntry>) -> Self {
    let mut threads = Self::default();
    for entry in entries {
      match entry.role {
        WorkflowRole::Employee => threads.employee.push(entry),
        WorkflowRole::Supervisor => threads.supervisor.push(entry),
        WorkflowRole::Reviewer => threads.reviewer.push(entry),
      }
    }
    threads
  }

  pub fn len(&self) -> usize {
    self.employee.len() + self.supervisor.len() + self.reviewer.len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}
