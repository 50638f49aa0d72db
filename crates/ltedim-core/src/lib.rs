//! # LTE Dimensioning Core Library
//!
//! This crate estimates how many eNodeB sites are needed to cover an area.
//! It evaluates three empirical propagation models against a link budget,
//! finds the maximum range each model allows, and converts that range into
//! a hexagonal cell footprint and a site count.
//!
//! ## Overview
//!
//! - **Parameters**: one immutable record describing the link and area
//! - **Propagation**: Okumura-Hata, COST 231-Hata and 3GPP TR 36.814
//! - **Link budget**: maximum allowable path loss (MAPL)
//! - **Range solver**: bisection from MAPL to distance
//! - **Sizing**: range to cell radius, cell area and site count
//! - **Planner**: per-model evaluation, comparison and distance sweeps
//!
//! ## Signal Flow
//!
//! ```text
//! LteParameters → LinkBudget (MAPL) → for each model:
//!     path loss → range solver → cell sizing → CalculationResult
//! → ComparisonResult (averages + recommended model)
//! ```
//!
//! Every function is a pure function of its arguments: no I/O, no global
//! state, and all public types are `Send + Sync`.
//!
//! ## Example
//!
//! ```rust
//! use ltedim_core::{compare_models, evaluate_model, LteParameters, PropagationModel};
//!
//! let params = LteParameters::builder()
//!     .frequency(800.0)
//!     .target_area(250.0)
//!     .build();
//!
//! let hata = evaluate_model(PropagationModel::OkumuraHata, &params);
//! assert!(hata.max_range_km > 1.0);
//!
//! let comparison = compare_models(&params);
//! assert_eq!(comparison.recommended_model, PropagationModel::OkumuraHata);
//! ```

pub mod link_budget;
pub mod params;
pub mod planner;
pub mod propagation;
pub mod range_solver;
pub mod sizing;
pub mod survey;
pub mod types;

// Re-export main types
pub use link_budget::{max_allowed_path_loss, LinkBudget};
pub use params::{Environment, LteBand, LteParameters, PropagationModel, LTE_BANDS};
pub use planner::{
    compare_models, evaluate_model, recommend_model, sweep_path_loss, CalculationResult,
    ComparisonResult, ModelLosses, PathLossSweep, SweepPoint,
};
pub use propagation::path_loss;
pub use survey::{compare_batch, survey_bands, BandComparison};
pub use types::{DimError, DimResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::params::{Environment, LteParameters, PropagationModel};
    pub use crate::planner::{compare_models, evaluate_model, sweep_path_loss};
    pub use crate::types::{DimError, DimResult};
}
