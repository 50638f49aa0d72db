//! Maximum range search.
//!
//! Cell range is the distance at which a model's path loss reaches the
//! maximum allowable path loss. The models are closed-form in distance but
//! not invertible in general (the 3GPP models are piecewise), so the
//! crossing is found by bisection over a fixed bracket.
//!
//! The search itself knows nothing about propagation: [`bisect_crossing`]
//! works on any scalar function that is non-decreasing over the bracket.

use serde::{Deserialize, Serialize};

use crate::params::{LteParameters, PropagationModel};
use crate::propagation::path_loss;

/// Search interval and stopping width, all in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBracket {
    pub min_km: f64,
    pub max_km: f64,
    pub tolerance_km: f64,
}

impl RangeBracket {
    pub const fn new(min_km: f64, max_km: f64, tolerance_km: f64) -> Self {
        Self {
            min_km,
            max_km,
            tolerance_km,
        }
    }

    /// Number of halvings needed to shrink the bracket to the tolerance.
    pub fn max_iterations(&self) -> u32 {
        let ratio = (self.max_km - self.min_km) / self.tolerance_km;
        if ratio <= 1.0 {
            0
        } else {
            ratio.log2().ceil() as u32
        }
    }
}

impl Default for RangeBracket {
    fn default() -> Self {
        DEFAULT_BRACKET
    }
}

/// 0.1 km to 50 km, stopping at 10 m.
pub const DEFAULT_BRACKET: RangeBracket = RangeBracket::new(0.1, 50.0, 0.01);

/// Find where a non-decreasing `f` reaches `threshold` inside `bracket`.
///
/// Each step evaluates the midpoint: below the threshold the lower bound
/// moves up, otherwise the upper bound moves down. Stops once the bracket
/// is no wider than the tolerance and returns its midpoint.
///
/// If `f` never reaches the threshold the result sits against the upper
/// bound; if `f` is already above it at the lower bound the result sits
/// against the lower bound. A NaN value counts as "not below" and pulls the
/// estimate towards the lower bound.
pub fn bisect_crossing<F>(f: F, threshold: f64, bracket: RangeBracket) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut lo = bracket.min_km;
    let mut hi = bracket.max_km;

    while hi - lo > bracket.tolerance_km {
        let mid = (lo + hi) / 2.0;
        if f(mid) < threshold {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    (lo + hi) / 2.0
}

/// Maximum range in km of `model` for a path-loss threshold in dB.
pub fn max_range_km(model: PropagationModel, params: &LteParameters, max_path_loss_db: f64) -> f64 {
    let range = bisect_crossing(
        |d| path_loss(model, params, d),
        max_path_loss_db,
        DEFAULT_BRACKET,
    );
    tracing::trace!(
        "{}: max range {:.3} km for {:.1} dB",
        model.name(),
        range,
        max_path_loss_db
    );
    range
}
