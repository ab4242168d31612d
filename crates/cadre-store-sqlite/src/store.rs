//! [`SqliteStore`] — the SQLite implementation of [`WorkflowStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use cadre_core::{
  actor::Capability,
  appraisal::{Appraisal, NewAppraisal},
  ledger::{CommentEntry, NewCommentEntry, RecordKind},
  plan::{Activity, ActivityStatus, NewActivity, NewPlan, NewResponsibility,
         PerformancePlan, Responsibility},
  store::WorkflowStore,
  workflow::WorkflowState,
};

use crate::{
  encode::{
    encode_date, encode_dt, encode_dt_opt, encode_indicators, encode_uuid,
    RawActivity, RawAppraisal, RawComment, RawPlan, RawResponsibility,
  },
  schema::SCHEMA,
  Error, Result,
};

/// Outcome of a compare-and-swap write, resolved inside the transaction.
enum Cas {
  Applied,
  Missing,
  Stale,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Cadre workflow store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a ledger row inside an open transaction.
  fn insert_comment_row(
    tx: &rusqlite::Transaction<'_>,
    kind: &str,
    record_id: &str,
    entry: &CommentEntry,
  ) -> rusqlite::Result<()> {
    tx.execute(
      "INSERT INTO workflow_comments (
         comment_id, record_kind, record_id, author_id, author_name,
         role, action, body, recorded_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      rusqlite::params![
        encode_uuid(entry.comment_id),
        kind,
        record_id,
        encode_uuid(entry.author_id),
        entry.author_name,
        entry.role.to_string(),
        entry.action.to_string(),
        entry.text,
        encode_dt(entry.recorded_at),
      ],
    )?;
    Ok(())
  }

  /// Assign id and timestamp to a ledger entry; the store owns both.
  fn build_entry(input: NewCommentEntry) -> CommentEntry {
    CommentEntry {
      comment_id:  Uuid::new_v4(),
      author_id:   input.author_id,
      author_name: input.author_name,
      role:        input.role,
      action:      input.action,
      text:        input.text,
      recorded_at: Utc::now(),
    }
  }
}

// ─── WorkflowStore impl ──────────────────────────────────────────────────────

impl WorkflowStore for SqliteStore {
  type Error = Error;

  // ── Plans ─────────────────────────────────────────────────────────────────

  async fn create_plan(&self, input: NewPlan) -> Result<PerformancePlan> {
    let now = Utc::now();
    let plan = PerformancePlan {
      plan_id:                Uuid::new_v4(),
      employee_id:            input.employee_id,
      supervisor_id:          input.supervisor_id,
      reviewer_id:            input.reviewer_id,
      plan_year:              input.plan_year,
      plan_period:            input.plan_period,
      workflow_status:        WorkflowState::Draft,
      submitted_at:           None,
      supervisor_approved_at: None,
      reviewer_approved_at:   None,
      created_at:             now,
      updated_at:             now,
      version:                0,
    };

    let id_str         = encode_uuid(plan.plan_id);
    let employee_str   = encode_uuid(plan.employee_id);
    let supervisor_str = encode_uuid(plan.supervisor_id);
    let reviewer_str   = plan.reviewer_id.map(encode_uuid);
    let year           = plan.plan_year;
    let period         = plan.plan_period.clone();
    let at_str         = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO plans (
             plan_id, employee_id, supervisor_id, reviewer_id,
             plan_year, plan_period, workflow_status,
             created_at, updated_at, version
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'draft', ?7, ?7, 0)",
          rusqlite::params![
            id_str,
            employee_str,
            supervisor_str,
            reviewer_str,
            year,
            period,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(plan)
  }

  async fn get_plan(&self, id: Uuid) -> Result<Option<PerformancePlan>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPlan> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT plan_id, employee_id, supervisor_id, reviewer_id,
                      plan_year, plan_period, workflow_status,
                      submitted_at, supervisor_approved_at,
                      reviewer_approved_at, created_at, updated_at, version
               FROM plans WHERE plan_id = ?1",
              rusqlite::params![id_str],
              plan_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPlan::into_plan).transpose()
  }

  async fn list_plans_for_actor(
    &self,
    actor_id: Uuid,
    capability: Capability,
  ) -> Result<Vec<PerformancePlan>> {
    let actor_str = encode_uuid(actor_id);

    // Pending work for the capability: the records awaiting its action.
    let (where_clause, with_actor) = match capability {
      Capability::Employee => (
        "employee_id = ?1
           AND workflow_status IN ('draft', 'revision_requested')",
        true,
      ),
      Capability::Supervisor => {
        ("supervisor_id = ?1 AND workflow_status = 'submitted'", true)
      }
      Capability::Reviewer => (
        "reviewer_id = ?1 AND workflow_status = 'supervisor_approved'",
        true,
      ),
      Capability::Override => ("workflow_status != 'approved'", false),
    };

    let sql = format!(
      "SELECT plan_id, employee_id, supervisor_id, reviewer_id,
              plan_year, plan_period, workflow_status,
              submitted_at, supervisor_approved_at, reviewer_approved_at,
              created_at, updated_at, version
       FROM plans WHERE {where_clause}
       ORDER BY updated_at DESC"
    );

    let raws: Vec<RawPlan> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = if with_actor {
          stmt
            .query_map(rusqlite::params![actor_str], plan_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          stmt
            .query_map([], plan_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPlan::into_plan).collect()
  }

  async fn commit_plan_transition(
    &self,
    plan: &PerformancePlan,
    expected_version: i64,
    entry: NewCommentEntry,
  ) -> Result<CommentEntry> {
    let entry = Self::build_entry(entry);
    let entry_for_insert = entry.clone();

    let plan_id = plan.plan_id;
    let id_str = encode_uuid(plan_id);
    let status_str = plan.workflow_status.as_str();
    let submitted_str = encode_dt_opt(plan.submitted_at);
    let sup_str = encode_dt_opt(plan.supervisor_approved_at);
    let rev_str = encode_dt_opt(plan.reviewer_approved_at);
    let updated_str = encode_dt(plan.updated_at);
    let new_version = plan.version;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let stored: Option<i64> = tx
          .query_row(
            "SELECT version FROM plans WHERE plan_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;

        match stored {
          None => return Ok(Cas::Missing),
          Some(v) if v != expected_version => return Ok(Cas::Stale),
          Some(_) => {}
        }

        tx.execute(
          "UPDATE plans
           SET workflow_status = ?2, submitted_at = ?3,
               supervisor_approved_at = ?4, reviewer_approved_at = ?5,
               updated_at = ?6, version = ?7
           WHERE plan_id = ?1",
          rusqlite::params![
            id_str,
            status_str,
            submitted_str,
            sup_str,
            rev_str,
            updated_str,
            new_version,
          ],
        )?;

        SqliteStore::insert_comment_row(
          &tx,
          RecordKind::Plan.as_str(),
          &id_str,
          &entry_for_insert,
        )?;

        tx.commit()?;
        Ok(Cas::Applied)
      })
      .await?;

    match outcome {
      Cas::Applied => Ok(entry),
      Cas::Missing => Err(Error::PlanNotFound(plan_id)),
      Cas::Stale => Err(Error::Conflict(plan_id)),
    }
  }

  // ── Responsibilities ──────────────────────────────────────────────────────

  async fn replace_responsibilities(
    &self,
    plan_id: Uuid,
    expected_version: i64,
    responsibilities: Vec<NewResponsibility>,
  ) -> Result<Vec<Responsibility>> {
    let now = Utc::now();
    let built: Vec<Responsibility> = responsibilities
      .into_iter()
      .map(|r| Responsibility {
        responsibility_id:  Uuid::new_v4(),
        plan_id,
        description:        r.description,
        tasks:              r.tasks,
        weight:             r.weight,
        target_date:        r.target_date,
        status_label:       r.status_label,
        comments:           r.comments,
        success_indicators: r.success_indicators,
      })
      .collect();

    // Encode rows up front; the closure owns plain strings only.
    let mut rows = Vec::with_capacity(built.len());
    for (position, r) in built.iter().enumerate() {
      rows.push((
        encode_uuid(r.responsibility_id),
        position as i64,
        r.description.clone(),
        r.tasks.clone(),
        r.weight as i64,
        r.target_date.map(encode_date),
        r.status_label.clone(),
        r.comments.clone(),
        encode_indicators(&r.success_indicators)?,
      ));
    }

    let id_str = encode_uuid(plan_id);
    let updated_str = encode_dt(now);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let stored: Option<i64> = tx
          .query_row(
            "SELECT version FROM plans WHERE plan_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;

        match stored {
          None => return Ok(Cas::Missing),
          Some(v) if v != expected_version => return Ok(Cas::Stale),
          Some(_) => {}
        }

        // Replace-in-place: cascade removes the old rows' activities.
        tx.execute(
          "DELETE FROM responsibilities WHERE plan_id = ?1",
          rusqlite::params![id_str],
        )?;

        for (rid, position, description, tasks, weight, target, label,
             comments, indicators) in &rows
        {
          tx.execute(
            "INSERT INTO responsibilities (
               responsibility_id, plan_id, position, description, tasks,
               weight, target_date, status_label, comments,
               success_indicators
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
              rid, id_str, position, description, tasks, weight, target,
              label, comments, indicators,
            ],
          )?;
        }

        tx.execute(
          "UPDATE plans SET updated_at = ?2, version = version + 1
           WHERE plan_id = ?1",
          rusqlite::params![id_str, updated_str],
        )?;

        tx.commit()?;
        Ok(Cas::Applied)
      })
      .await?;

    match outcome {
      Cas::Applied => Ok(built),
      Cas::Missing => Err(Error::PlanNotFound(plan_id)),
      Cas::Stale => Err(Error::Conflict(plan_id)),
    }
  }

  async fn list_responsibilities(
    &self,
    plan_id: Uuid,
  ) -> Result<Vec<Responsibility>> {
    let id_str = encode_uuid(plan_id);

    let raws: Vec<RawResponsibility> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT responsibility_id, plan_id, description, tasks, weight,
                  target_date, status_label, comments, success_indicators
           FROM responsibilities WHERE plan_id = ?1
           ORDER BY position",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], responsibility_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawResponsibility::into_responsibility)
      .collect()
  }

  async fn get_responsibility(
    &self,
    id: Uuid,
  ) -> Result<Option<Responsibility>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawResponsibility> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT responsibility_id, plan_id, description, tasks,
                      weight, target_date, status_label, comments,
                      success_indicators
               FROM responsibilities WHERE responsibility_id = ?1",
              rusqlite::params![id_str],
              responsibility_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawResponsibility::into_responsibility).transpose()
  }

  // ── Activities — append-only writes ───────────────────────────────────────

  async fn record_activity(
    &self,
    responsibility_id: Uuid,
    input: NewActivity,
  ) -> Result<Activity> {
    let now = Utc::now();
    let activity = Activity {
      activity_id: Uuid::new_v4(),
      responsibility_id,
      title: input.title,
      description: input.description,
      status: input.status,
      completed_at: (input.status == ActivityStatus::Completed)
        .then_some(now),
      updated_at: now,
    };

    let id_str = encode_uuid(activity.activity_id);
    let resp_str = encode_uuid(responsibility_id);
    let title = activity.title.clone();
    let description = activity.description.clone();
    let status_str = activity.status.to_string();
    let completed_str = encode_dt_opt(activity.completed_at);
    let updated_str = encode_dt(now);

    let parent_exists = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM responsibilities WHERE responsibility_id = ?1",
            rusqlite::params![resp_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO activities (
             activity_id, responsibility_id, title, description, status,
             completed_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            resp_str,
            title,
            description,
            status_str,
            completed_str,
            updated_str,
          ],
        )?;
        Ok(true)
      })
      .await?;

    if !parent_exists {
      return Err(Error::ResponsibilityNotFound(responsibility_id));
    }
    Ok(activity)
  }

  async fn list_activities(
    &self,
    responsibility_id: Uuid,
  ) -> Result<Vec<Activity>> {
    let resp_str = encode_uuid(responsibility_id);

    let raws: Vec<RawActivity> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT activity_id, responsibility_id, title, description,
                  status, completed_at, updated_at
           FROM activities WHERE responsibility_id = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![resp_str], activity_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawActivity::into_activity).collect()
  }

  // ── Appraisals ────────────────────────────────────────────────────────────

  async fn create_appraisal(&self, input: NewAppraisal) -> Result<Appraisal> {
    let now = Utc::now();
    let appraisal = Appraisal {
      appraisal_id:           Uuid::new_v4(),
      employee_id:            input.employee_id,
      supervisor_id:          input.supervisor_id,
      reviewer_id:            input.reviewer_id,
      plan_id:                input.plan_id,
      appraisal_type:         input.appraisal_type,
      overall_rating:         None,
      workflow_status:        WorkflowState::Draft,
      submitted_at:           None,
      supervisor_approved_at: None,
      reviewer_approved_at:   None,
      created_at:             now,
      updated_at:             now,
      version:                0,
    };

    let id_str         = encode_uuid(appraisal.appraisal_id);
    let employee_str   = encode_uuid(appraisal.employee_id);
    let supervisor_str = encode_uuid(appraisal.supervisor_id);
    let reviewer_str   = appraisal.reviewer_id.map(encode_uuid);
    let plan_str       = appraisal.plan_id.map(encode_uuid);
    let kind           = appraisal.appraisal_type.clone();
    let at_str         = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO appraisals (
             appraisal_id, employee_id, supervisor_id, reviewer_id,
             plan_id, appraisal_type, workflow_status,
             created_at, updated_at, version
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'draft', ?7, ?7, 0)",
          rusqlite::params![
            id_str,
            employee_str,
            supervisor_str,
            reviewer_str,
            plan_str,
            kind,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(appraisal)
  }

  async fn get_appraisal(&self, id: Uuid) -> Result<Option<Appraisal>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAppraisal> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT appraisal_id, employee_id, supervisor_id, reviewer_id,
                      plan_id, appraisal_type, overall_rating,
                      workflow_status, submitted_at, supervisor_approved_at,
                      reviewer_approved_at, created_at, updated_at, version
               FROM appraisals WHERE appraisal_id = ?1",
              rusqlite::params![id_str],
              appraisal_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAppraisal::into_appraisal).transpose()
  }

  async fn list_appraisals_for_actor(
    &self,
    actor_id: Uuid,
    capability: Capability,
  ) -> Result<Vec<Appraisal>> {
    let actor_str = encode_uuid(actor_id);

    let (where_clause, with_actor) = match capability {
      Capability::Employee => (
        "employee_id = ?1
           AND workflow_status IN ('draft', 'revision_requested')",
        true,
      ),
      Capability::Supervisor => {
        ("supervisor_id = ?1 AND workflow_status = 'submitted'", true)
      }
      Capability::Reviewer => (
        "reviewer_id = ?1 AND workflow_status = 'supervisor_approved'",
        true,
      ),
      Capability::Override => ("workflow_status != 'approved'", false),
    };

    let sql = format!(
      "SELECT appraisal_id, employee_id, supervisor_id, reviewer_id,
              plan_id, appraisal_type, overall_rating, workflow_status,
              submitted_at, supervisor_approved_at, reviewer_approved_at,
              created_at, updated_at, version
       FROM appraisals WHERE {where_clause}
       ORDER BY updated_at DESC"
    );

    let raws: Vec<RawAppraisal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = if with_actor {
          stmt
            .query_map(rusqlite::params![actor_str], appraisal_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          stmt
            .query_map([], appraisal_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAppraisal::into_appraisal).collect()
  }

  async fn save_appraisal(
    &self,
    appraisal: &Appraisal,
    expected_version: i64,
  ) -> Result<()> {
    let appraisal_id = appraisal.appraisal_id;
    let id_str = encode_uuid(appraisal_id);
    let rating = appraisal.overall_rating;
    let status_str = appraisal.workflow_status.as_str();
    let submitted_str = encode_dt_opt(appraisal.submitted_at);
    let sup_str = encode_dt_opt(appraisal.supervisor_approved_at);
    let rev_str = encode_dt_opt(appraisal.reviewer_approved_at);
    let updated_str = encode_dt(appraisal.updated_at);
    let new_version = appraisal.version;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let stored: Option<i64> = tx
          .query_row(
            "SELECT version FROM appraisals WHERE appraisal_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;

        match stored {
          None => return Ok(Cas::Missing),
          Some(v) if v != expected_version => return Ok(Cas::Stale),
          Some(_) => {}
        }

        tx.execute(
          "UPDATE appraisals
           SET overall_rating = ?2, workflow_status = ?3, submitted_at = ?4,
               supervisor_approved_at = ?5, reviewer_approved_at = ?6,
               updated_at = ?7, version = ?8
           WHERE appraisal_id = ?1",
          rusqlite::params![
            id_str,
            rating,
            status_str,
            submitted_str,
            sup_str,
            rev_str,
            updated_str,
            new_version,
          ],
        )?;

        tx.commit()?;
        Ok(Cas::Applied)
      })
      .await?;

    match outcome {
      Cas::Applied => Ok(()),
      Cas::Missing => Err(Error::AppraisalNotFound(appraisal_id)),
      Cas::Stale => Err(Error::Conflict(appraisal_id)),
    }
  }

  async fn commit_appraisal_transition(
    &self,
    appraisal: &Appraisal,
    expected_version: i64,
    entry: NewCommentEntry,
  ) -> Result<CommentEntry> {
    let entry = Self::build_entry(entry);
    let entry_for_insert = entry.clone();

    let appraisal_id = appraisal.appraisal_id;
    let id_str = encode_uuid(appraisal_id);
    let rating = appraisal.overall_rating;
    let status_str = appraisal.workflow_status.as_str();
    let submitted_str = encode_dt_opt(appraisal.submitted_at);
    let sup_str = encode_dt_opt(appraisal.supervisor_approved_at);
    let rev_str = encode_dt_opt(appraisal.reviewer_approved_at);
    let updated_str = encode_dt(appraisal.updated_at);
    let new_version = appraisal.version;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let stored: Option<i64> = tx
          .query_row(
            "SELECT version FROM appraisals WHERE appraisal_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;

        match stored {
          None => return Ok(Cas::Missing),
          Some(v) if v != expected_version => return Ok(Cas::Stale),
          Some(_) => {}
        }

        tx.execute(
          "UPDATE appraisals
           SET overall_rating = ?2, workflow_status = ?3, submitted_at = ?4,
               supervisor_approved_at = ?5, reviewer_approved_at = ?6,
               updated_at = ?7, version = ?8
           WHERE appraisal_id = ?1",
          rusqlite::params![
            id_str,
            rating,
            status_str,
            submitted_str,
            sup_str,
            rev_str,
            updated_str,
            new_version,
          ],
        )?;

        SqliteStore::insert_comment_row(
          &tx,
          RecordKind::Appraisal.as_str(),
          &id_str,
          &entry_for_insert,
        )?;

        tx.commit()?;
        Ok(Cas::Applied)
      })
      .await?;

    match outcome {
      Cas::Applied => Ok(entry),
      Cas::Missing => Err(Error::AppraisalNotFound(appraisal_id)),
      Cas::Stale => Err(Error::Conflict(appraisal_id)),
    }
  }

  // ── Comment ledger ────────────────────────────────────────────────────────

  async fn list_comments(
    &self,
    kind: RecordKind,
    record_id: Uuid,
  ) -> Result<Vec<CommentEntry>> {
    let kind_str = kind.as_str();
    let id_str = encode_uuid(record_id);

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT comment_id, author_id, author_name, role, action, body,
                  recorded_at
           FROM workflow_comments
           WHERE record_kind = ?1 AND record_id = ?2
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![kind_str, id_str], |row| {
            Ok(RawComment {
              comment_id:  row.get(0)?,
              author_id:   row.get(1)?,
              author_name: row.get(2)?,
              role:        row.get(3)?,
              action:      row.get(4)?,
              body:        row.get(5)?,
              recorded_at: row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_entry).collect()
  }
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

fn plan_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPlan> {
  Ok(RawPlan {
    plan_id:                row.get(0)?,
    employee_id:            row.get(1)?,
    supervisor_id:          row.get(2)?,
    reviewer_id:            row.get(3)?,
    plan_year:              row.get(4)?,
    plan_period:            row.get(5)?,
    workflow_status:        row.get(6)?,
    submitted_at:           row.get(7)?,
    supervisor_approved_at: row.get(8)?,
    reviewer_approved_at:   row.get(9)?,
    created_at:             row.get(10)?,
    updated_at:             row.get(11)?,
    version:                row.get(12)?,
  })
}

fn responsibility_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawResponsibility> {
  Ok(RawResponsibility {
    responsibility_id:  row.get(0)?,
    plan_id:            row.get(1)?,
    description:        row.get(2)?,
    tasks:              row.get(3)?,
    weight:             row.get(4)?,
    target_date:        row.get(5)?,
    status_label:       row.get(6)?,
    comments:           row.get(7)?,
    success_indicators: row.get(8)?,
  })
}

fn activity_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawActivity> {
  Ok(RawActivity {
    activity_id:       row.get(0)?,
    responsibility_id: row.get(1)?,
    title:             row.get(2)?,
    description:       row.get(3)?,
    status:            row.get(4)?,
    completed_at:      row.get(5)?,
    updated_at:        row.get(6)?,
  })
}

fn appraisal_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawAppraisal> {
  Ok(RawAppraisal {
    appraisal_id:           row.get(0)?,
    employee_id:            row.get(1)?,
    supervisor_id:          row.get(2)?,
    reviewer_id:            row.get(3)?,
    plan_id:                row.get(4)?,
    appraisal_type:         row.get(5)?,
    overall_rating:         row.get(6)?,
    workflow_status:        row.get(7)?,
    submitted_at:           row.get(8)?,
    supervisor_approved_at: row.get(9)?,
    reviewer_approved_at:   row.get(10)?,
    created_at:             row.get(11)?,
    updated_at:             row.get(12)?,
    version:                row.get(13)?,
  })
}
