//! The weight validator — the submit-time gate on responsibility weights.

use serde::{Deserialize, Serialize};

/// The result of checking a plan's responsibility weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightCheck {
  pub valid: bool,
  /// The computed total, surfaced so the caller can show
  /// "current total: X%, required: 100%".
  pub total: u32,
}

/// A plan may leave draft only when its responsibility weights sum to
/// exactly 100. An empty list is not submittable: a plan with zero
/// responsibilities carries no content.
pub fn validate_weights(weights: impl IntoIterator<Item = u32>) -> WeightCheck {
  let mut total = 0u32;
  let mut any = false;
  for w in weights {
    total += w;
    any = true;
  }
  WeightCheck { valid: any && total == 100, total }
}
