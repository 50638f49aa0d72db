//! Band survey and batch comparison.
//!
//! Runs [`compare_models`] over many parameter sets, typically one per LTE
//! band preset. Every comparison is independent, so with the `parallel`
//! feature the batch is spread over the rayon thread pool. Output order
//! always follows input order.
//!
//! ```toml
//! [dependencies]
//! ltedim-core = { version = "0.1", features = ["parallel"] }
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::params::{LteBand, LteParameters, LTE_BANDS};
use crate::planner::{compare_models, ComparisonResult};

/// Comparison of one band preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandComparison {
    pub band: LteBand,
    pub comparison: ComparisonResult,
}

/// Compare the three models for every parameter set in `batch`.
#[cfg(feature = "parallel")]
pub fn compare_batch(batch: &[LteParameters]) -> Vec<ComparisonResult> {
    batch.par_iter().map(compare_models).collect()
}

/// Compare the three models for every parameter set in `batch`.
#[cfg(not(feature = "parallel"))]
pub fn compare_batch(batch: &[LteParameters]) -> Vec<ComparisonResult> {
    batch.iter().map(compare_models).collect()
}

/// Compare the models on `bands`, keeping every other parameter.
pub fn survey(params: &LteParameters, bands: &[LteBand]) -> Vec<BandComparison> {
    let batch: Vec<LteParameters> = bands
        .iter()
        .map(|band| params.with_frequency(band.frequency_mhz))
        .collect();

    tracing::debug!("Surveying {} bands", bands.len());

    bands
        .iter()
        .zip(compare_batch(&batch))
        .map(|(&band, comparison)| BandComparison { band, comparison })
        .collect()
}

/// Survey the standard LTE band presets.
pub fn survey_bands(params: &LteParameters) -> Vec<BandComparison> {
    survey(params, &LTE_BANDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PropagationModel;

    #[test]
    fn test_survey_covers_all_bands_in_order() {
        let results = survey_bands(&LteParameters::default());
        assert_eq!(results.len(), LTE_BANDS.len());
        for (result, band) in results.iter().zip(LTE_BANDS) {
            assert_eq!(result.band, band);
            assert_eq!(result.comparison.models.len(), 3);
        }
    }

    #[test]
    fn test_survey_recommendations_follow_frequency() {
        let results = survey_bands(&LteParameters::default());
        let recommended: Vec<PropagationModel> =
            results.iter().map(|r| r.comparison.recommended_model).collect();
        assert_eq!(
            recommended,
            vec![
                PropagationModel::OkumuraHata,
                PropagationModel::OkumuraHata,
                PropagationModel::OkumuraHata,
                PropagationModel::Cost231Hata,
                PropagationModel::Tr36814,
                PropagationModel::Tr36814,
            ]
        );
    }

    #[test]
    fn test_batch_matches_individual_comparisons() {
        let batch = vec![
            LteParameters::default(),
            LteParameters::builder().frequency(800.0).target_area(400.0).build(),
        ];
        let results = compare_batch(&batch);
        assert_eq!(results.len(), 2);
        for (params, result) in batch.iter().zip(&results) {
            assert_eq!(result, &compare_models(params));
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(compare_batch(&[]).is_empty());
        assert!(survey(&LteParameters::default(), &[]).is_empty());
    }
}
