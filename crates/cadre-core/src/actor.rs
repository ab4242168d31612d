//! Actors, capabilities, and the role resolver.
//!
//! The engine never reads ambient session state: the acting identity arrives
//! as an explicit [`Actor`] parameter on every call. Role-membership strings
//! from the surrounding platform are mapped to the closed [`Capability`] set
//! exactly once, here at the resolver boundary.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::workflow::WorkflowRole;

// ─── Actor ───────────────────────────────────────────────────────────────────

/// The authenticated caller, as resolved by the surrounding request layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
  pub actor_id:     Uuid,
  /// Display name recorded on ledger entries this actor produces.
  pub display_name: String,
  /// Free-form role-membership identifiers from the identity provider.
  pub roles:        Vec<String>,
}

// ─── Capability ──────────────────────────────────────────────────────────────

/// What an actor may do with respect to one specific record.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
  Employee,
  Supervisor,
  Reviewer,
  /// Administrative override; subsumes supervisor and reviewer for
  /// authorization purposes, but ledger entries always carry the actor's
  /// real identity.
  Override,
}

impl From<WorkflowRole> for Capability {
  fn from(role: WorkflowRole) -> Self {
    match role {
      WorkflowRole::Employee => Self::Employee,
      WorkflowRole::Supervisor => Self::Supervisor,
      WorkflowRole::Reviewer => Self::Reviewer,
    }
  }
}

// ─── Record parties ──────────────────────────────────────────────────────────

/// The identities a record names; the inputs to capability resolution.
#[derive(Debug, Clone, Copy)]
pub struct RecordParties {
  pub employee_id:   Uuid,
  pub supervisor_id: Uuid,
  pub reviewer_id:   Option<Uuid>,
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Maps an actor to the capabilities it holds for a specific record.
///
/// The administrative role set is configured at construction (normalised to
/// lowercase); membership in any of those roles grants
/// [`Capability::Override`].
#[derive(Debug, Clone)]
pub struct RoleResolver {
  admin_roles: HashSet<String>,
}

impl RoleResolver {
  pub fn new(admin_roles: impl IntoIterator<Item = String>) -> Self {
    Self {
      admin_roles: admin_roles
        .into_iter()
        .map(|r| r.trim().to_ascii_lowercase())
        .collect(),
    }
  }

  /// Resolve the actor's capability set for the record described by
  /// `parties`.
  pub fn resolve(
    &self,
    parties: &RecordParties,
    actor: &Actor,
  ) -> HashSet<Capability> {
    let mut caps = HashSet::new();

    if actor.actor_id == parties.employee_id {
      caps.insert(Capability::Employee);
    }
    if actor.actor_id == parties.supervisor_id {
      caps.insert(Capability::Supervisor);
    }
    if parties.reviewer_id == Some(actor.actor_id) {
      caps.insert(Capability::Reviewer);
    }
    if actor
      .roles
      .iter()
      .any(|r| self.admin_roles.contains(&r.trim().to_ascii_lowercase()))
    {
      caps.insert(Capability::Override);
    }

    caps
  }

  /// Whether the actor may act under `claimed` for this record: the resolved
  /// set must contain the claimed role's capability, or override.
  pub fn authorizes(
    &self,
    parties: &RecordParties,
    actor: &Actor,
    claimed: WorkflowRole,
  ) -> bool {
    let caps = self.resolve(parties, actor);
    caps.contains(&Capability::from(claimed))
      || caps.contains(&Capability::Override)
  }
}

impl Default for RoleResolver {
  /// The platform's stock administrative role identifiers.
  fn default() -> Self {
    Self::new(
      ["admin", "administrator", "hr", "hr_manager"]
        .into_iter()
        .map(str::to_owned),
    )
  }
}
