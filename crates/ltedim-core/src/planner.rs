//! Model comparison and path-loss sweeps.
//!
//! This is the entry point used by collaborators. A single evaluation runs
//! the whole chain for one model:
//!
//! ```text
//! LteParameters ─► link budget ─► range solver ─► cell sizing ─► CalculationResult
//!                     (MAPL)        (max range)     (sites)
//! ```
//!
//! [`compare_models`] repeats that for the three models with one shared
//! budget and summarises the outcome. [`sweep_path_loss`] bypasses the
//! solver and samples every model along a distance grid for plotting.
//!
//! ## Example
//!
//! ```rust
//! use ltedim_core::params::{LteParameters, PropagationModel};
//! use ltedim_core::planner::{compare_models, sweep_path_loss};
//!
//! let params = LteParameters::default();
//! let comparison = compare_models(&params);
//! assert_eq!(comparison.recommended_model, PropagationModel::Cost231Hata);
//! assert!(comparison.models.iter().all(|r| r.number_of_sites >= Some(1)));
//!
//! let points: Vec<_> = sweep_path_loss(&params, 15.0).collect();
//! assert_eq!(points.len(), 30);
//! ```

use serde::{Deserialize, Serialize};

use crate::link_budget::max_allowed_path_loss;
use crate::params::{LteParameters, PropagationModel};
use crate::propagation::path_loss;
use crate::range_solver::max_range_km;
use crate::sizing::{CellSizing, OVERLAP_FACTOR, SECTOR_COUNT};

/// Distance between sweep points (km); also the first point.
pub const SWEEP_STEP_KM: f64 = 0.5;

/// Sweep length used when a caller has no preference (km).
pub const DEFAULT_SWEEP_DISTANCE_KM: f64 = 20.0;

/// Sweep length of the coverage chart (km).
pub const CHART_SWEEP_DISTANCE_KM: f64 = 15.0;

/// Dimensioning outcome for one propagation model.
///
/// JSON keys drop the unit suffixes (`pathLoss`, `maxRange`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub model: PropagationModel,
    pub model_name: String,
    /// Path loss at the maximum range (dB)
    #[serde(rename = "pathLoss")]
    pub path_loss_db: f64,
    /// Distance at which path loss reaches the budget (km)
    #[serde(rename = "maxRange")]
    pub max_range_km: f64,
    #[serde(rename = "cellRadius")]
    pub cell_radius_km: f64,
    /// Hexagonal cell area
    #[serde(rename = "cellArea")]
    pub cell_area_km2: f64,
    /// `None` (JSON `null`) when the inputs were malformed
    pub number_of_sites: Option<u32>,
    pub sector_count: u32,
    pub overlap_factor: f64,
}

/// Side-by-side evaluation of all three models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// One result per model, in [`PropagationModel::ALL`] order
    pub models: Vec<CalculationResult>,
    pub recommended_model: PropagationModel,
    /// Mean of the maximum ranges (km)
    #[serde(rename = "averageRange")]
    pub average_range_km: f64,
    /// Mean of the site counts; NaN if any model has no count
    pub average_sites: f64,
    /// Threshold shared by all three evaluations (dB)
    #[serde(rename = "maxAllowedPathLoss")]
    pub max_allowed_path_loss_db: f64,
}

impl ComparisonResult {
    pub fn result_for(&self, model: PropagationModel) -> Option<&CalculationResult> {
        self.models.iter().find(|r| r.model == model)
    }

    /// Result of the recommended model.
    pub fn recommended(&self) -> Option<&CalculationResult> {
        self.result_for(self.recommended_model)
    }

    /// Longest maximum range across models (km).
    pub fn best_range_km(&self) -> f64 {
        self.models
            .iter()
            .map(|r| r.max_range_km)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest site count across models, `None` if any count is missing.
    pub fn min_sites(&self) -> Option<u32> {
        // `None` orders before every `Some`
        self.models.iter().map(|r| r.number_of_sites).min().flatten()
    }

    /// Mean site count rounded up to a whole site.
    pub fn rounded_average_sites(&self) -> Option<u32> {
        self.average_sites
            .is_finite()
            .then(|| self.average_sites.ceil() as u32)
    }

    /// Each model's range as a percentage of the best range.
    pub fn relative_ranges(&self) -> Vec<(PropagationModel, f64)> {
        let best = self.best_range_km();
        self.models
            .iter()
            .map(|r| (r.model, r.max_range_km / best * 100.0))
            .collect()
    }
}

/// Model suited to a carrier frequency.
///
/// Up to 1500 MHz Okumura-Hata, up to 2000 MHz COST 231-Hata, above that
/// 3GPP TR 36.814. Boundaries belong to the lower band.
pub fn recommend_model(frequency_mhz: f64) -> PropagationModel {
    if frequency_mhz <= 1500.0 {
        PropagationModel::OkumuraHata
    } else if frequency_mhz <= 2000.0 {
        PropagationModel::Cost231Hata
    } else {
        PropagationModel::Tr36814
    }
}

fn evaluate_with_budget(
    model: PropagationModel,
    params: &LteParameters,
    max_path_loss_db: f64,
) -> CalculationResult {
    let max_range = max_range_km(model, params, max_path_loss_db);
    let sizing = CellSizing::new(max_range, params.target_area);

    tracing::debug!(
        "{}: range {:.2} km, radius {:.2} km, sites {:?}",
        model.name(),
        max_range,
        sizing.cell_radius_km,
        sizing.number_of_sites
    );

    CalculationResult {
        model,
        model_name: model.name().to_string(),
        path_loss_db: path_loss(model, params, max_range),
        max_range_km: max_range,
        cell_radius_km: sizing.cell_radius_km,
        cell_area_km2: sizing.cell_area_km2,
        number_of_sites: sizing.number_of_sites,
        sector_count: SECTOR_COUNT,
        overlap_factor: OVERLAP_FACTOR,
    }
}

/// Run link budget, range search and sizing for one model.
pub fn evaluate_model(model: PropagationModel, params: &LteParameters) -> CalculationResult {
    evaluate_with_budget(model, params, max_allowed_path_loss(params))
}

/// Evaluate all three models and recommend one.
pub fn compare_models(params: &LteParameters) -> ComparisonResult {
    let mapl = max_allowed_path_loss(params);
    let models: Vec<CalculationResult> = PropagationModel::ALL
        .iter()
        .map(|&model| evaluate_with_budget(model, params, mapl))
        .collect();

    let n = models.len() as f64;
    let average_range_km = models.iter().map(|r| r.max_range_km).sum::<f64>() / n;
    let average_sites = models
        .iter()
        .map(|r| r.number_of_sites.map_or(f64::NAN, f64::from))
        .sum::<f64>()
        / n;
    let recommended_model = recommend_model(params.frequency);

    tracing::debug!(
        "MAPL {:.1} dB at {} MHz, recommended {}",
        mapl,
        params.frequency,
        recommended_model
    );

    ComparisonResult {
        models,
        recommended_model,
        average_range_km,
        average_sites,
        max_allowed_path_loss_db: mapl,
    }
}

/// Path loss of every model at one distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelLosses {
    #[serde(rename = "okumura-hata")]
    pub okumura_hata: f64,
    #[serde(rename = "cost231-hata")]
    pub cost231_hata: f64,
    #[serde(rename = "3gpp")]
    pub tr36814: f64,
}

impl ModelLosses {
    pub fn at(params: &LteParameters, distance_km: f64) -> Self {
        Self {
            okumura_hata: path_loss(PropagationModel::OkumuraHata, params, distance_km),
            cost231_hata: path_loss(PropagationModel::Cost231Hata, params, distance_km),
            tr36814: path_loss(PropagationModel::Tr36814, params, distance_km),
        }
    }

    pub fn get(&self, model: PropagationModel) -> f64 {
        match model {
            PropagationModel::OkumuraHata => self.okumura_hata,
            PropagationModel::Cost231Hata => self.cost231_hata,
            PropagationModel::Tr36814 => self.tr36814,
        }
    }

    /// `(model, loss)` pairs in comparison order.
    pub fn iter(&self) -> impl Iterator<Item = (PropagationModel, f64)> + '_ {
        PropagationModel::ALL.iter().map(move |&m| (m, self.get(m)))
    }
}

/// One sample of a distance sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub distance_km: f64,
    pub path_loss: ModelLosses,
}

/// Lazy path-loss sweep from 0.5 km in 0.5 km steps.
///
/// Cloning restarts nothing: a clone continues from the same position, and
/// a fresh sweep starts again at 0.5 km.
#[derive(Debug, Clone)]
pub struct PathLossSweep {
    params: LteParameters,
    next: usize,
    len: usize,
}

impl PathLossSweep {
    pub fn new(params: &LteParameters, max_distance_km: f64) -> Self {
        // `as` maps NaN and negatives to 0
        let len = (max_distance_km / SWEEP_STEP_KM).floor() as usize;
        Self {
            params: *params,
            next: 0,
            len,
        }
    }
}

impl Iterator for PathLossSweep {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<SweepPoint> {
        if self.next >= self.len {
            return None;
        }
        self.next += 1;
        // Multiply rather than accumulate so points land exactly on the grid
        let distance_km = self.next as f64 * SWEEP_STEP_KM;
        Some(SweepPoint {
            distance_km,
            path_loss: ModelLosses::at(&self.params, distance_km),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PathLossSweep {}

/// Sample every model from 0.5 km up to `max_distance_km` inclusive.
pub fn sweep_path_loss(params: &LteParameters, max_distance_km: f64) -> PathLossSweep {
    PathLossSweep::new(params, max_distance_km)
}
