//! SQL schema for the Cadre SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS plans (
    plan_id                TEXT PRIMARY KEY,
    employee_id            TEXT NOT NULL,
    supervisor_id          TEXT NOT NULL,
    reviewer_id            TEXT,            -- NULL until a reviewer is assigned
    plan_year              INTEGER NOT NULL,
    plan_period            TEXT NOT NULL,
    workflow_status        TEXT NOT NULL DEFAULT 'draft',
    submitted_at           TEXT,
    supervisor_approved_at TEXT,
    reviewer_approved_at   TEXT,
    created_at             TEXT NOT NULL,
    updated_at             TEXT NOT NULL,
    version                INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS responsibilities (
    responsibility_id  TEXT PRIMARY KEY,
    plan_id            TEXT NOT NULL REFERENCES plans(plan_id) ON DELETE CASCADE,
    position           INTEGER NOT NULL,    -- authored order within the plan
    description        TEXT NOT NULL,
    tasks              TEXT NOT NULL DEFAULT '',
    weight             INTEGER NOT NULL CHECK (weight BETWEEN 0 AND 100),
    target_date        TEXT,                -- ISO 8601 date
    status_label       TEXT,
    comments           TEXT,
    success_indicators TEXT NOT NULL DEFAULT '[]'  -- JSON array
);

-- Activities are strictly append-only progress evidence.
-- No UPDATE or DELETE is ever issued against this table directly; rows go
-- away only through the responsibility cascade.
CREATE TABLE IF NOT EXISTS activities (
    activity_id       TEXT PRIMARY KEY,
    responsibility_id TEXT NOT NULL
        REFERENCES responsibilities(responsibility_id) ON DELETE CASCADE,
    title             TEXT NOT NULL,
    description       TEXT NOT NULL DEFAULT '',
    status            TEXT NOT NULL,   -- 'pending' | 'in_progress' | 'completed'
    completed_at      TEXT,            -- set only when status is 'completed'
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS appraisals (
    appraisal_id           TEXT PRIMARY KEY,
    employee_id            TEXT NOT NULL,
    supervisor_id          TEXT NOT NULL,
    reviewer_id            TEXT,
    plan_id                TEXT,        -- weak reference, no FK on purpose
    appraisal_type         TEXT NOT NULL,
    overall_rating         REAL,
    workflow_status        TEXT NOT NULL DEFAULT 'draft',
    submitted_at           TEXT,
    supervisor_approved_at TEXT,
    reviewer_approved_at   TEXT,
    created_at             TEXT NOT NULL,
    updated_at             TEXT NOT NULL,
    version                INTEGER NOT NULL DEFAULT 0
);

-- The workflow comment ledger: one flat append-only log for both record
-- kinds. Entries are never updated, deleted, or reordered; per-role threads
-- are a read-time projection.
CREATE TABLE IF NOT EXISTS workflow_comments (
    comment_id  TEXT PRIMARY KEY,
    record_kind TEXT NOT NULL,   -- 'plan' | 'appraisal'
    record_id   TEXT NOT NULL,
    author_id   TEXT NOT NULL,
    author_name TEXT NOT NULL,
    role        TEXT NOT NULL,   -- 'employee' | 'supervisor' | 'reviewer'
    action      TEXT NOT NULL,
    body        TEXT NOT NULL DEFAULT '',
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS plans_employee_idx      ON plans(employee_id);
CREATE INDEX IF NOT EXISTS plans_supervisor_idx    ON plans(supervisor_id);
CREATE INDEX IF NOT EXISTS plans_reviewer_idx      ON plans(reviewer_id);
CREATE INDEX IF NOT EXISTS plans_status_idx        ON plans(workflow_status);
CREATE INDEX IF NOT EXISTS responsibilities_plan_idx
    ON responsibilities(plan_id);
CREATE INDEX IF NOT EXISTS activities_responsibility_idx
    ON activities(responsibility_id);
CREATE INDEX IF NOT EXISTS appraisals_employee_idx   ON appraisals(employee_id);
CREATE INDEX IF NOT EXISTS appraisals_supervisor_idx ON appraisals(supervisor_id);
CREATE INDEX IF NOT EXISTS appraisals_status_idx     ON appraisals(workflow_status);
CREATE INDEX IF NOT EXISTS workflow_comments_record_idx
    ON workflow_comments(record_kind, record_id);

PRAGMA user_version = 1;
";
