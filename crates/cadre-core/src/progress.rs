//! The progress aggregator.
//!
//! Completion percentages are computed on every read, never stored, so the
//! figures can never drift from the activity records they summarise.

use crate::plan::{Activity, ActivityStatus};

/// Percentage of activities completed, 0-100. A responsibility with no
/// logged work is 0% complete, not undefined.
pub fn responsibility_progress(activities: &[Activity]) -> u32 {
  if activities.is_empty() {
    return 0;
  }
  let completed = activities
    .iter()
    .filter(|a| a.status == ActivityStatus::Completed)
    .count() as u32;
  completed * 100 / activities.len() as u32
}

/// Weight-averaged completion across `(weight, progress)` pairs, 0-100.
/// Returns 0 when the total weight is 0.
pub fn plan_progress(items: &[(u32, u32)]) -> u32 {
  let total_weight: u32 = items.iter().map(|(w, _)| w).sum();
  if total_weight == 0 {
    return 0;
  }
  let weighted: u32 = items.iter().map(|(w, p)| w * p).sum();
  weighted / total_weight
}
