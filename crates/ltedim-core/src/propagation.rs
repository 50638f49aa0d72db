//! Macro-cell path-loss models for LTE coverage planning.
//!
//! Three empirical models are implemented, each as a pure function of
//! carrier frequency, antenna heights, distance and environment class:
//!
//! | Model              | Nominal range  | Function              |
//! |--------------------|----------------|-----------------------|
//! | Okumura-Hata       | 150-1500 MHz   | [`okumura_hata`]      |
//! | COST 231-Hata      | 1500-2000 MHz  | [`cost231_hata`]      |
//! | 3GPP TR 36.814     | up to 6 GHz    | [`tr36814`]           |
//!
//! The functions do not check their inputs. A non-positive distance, height
//! or frequency produces a non-finite loss instead of a panic, so callers
//! restrict the domain themselves (the range solver never goes below
//! 0.1 km).
//!
//! # Example
//!
//! ```
//! use ltedim_core::params::{Environment, LteParameters, PropagationModel};
//! use ltedim_core::propagation::{cost231_hata, path_loss};
//!
//! // COST 231-Hata, 1800 MHz, 30 m / 1.5 m antennas, 2 km, urban
//! let loss = cost231_hata(1800.0, 30.0, 1.5, 2.0, Environment::Urban);
//! assert!(loss > 140.0 && loss < 155.0);
//!
//! // The dispatcher reads frequency, heights and environment from a parameter set
//! let params = LteParameters::default();
//! let same = path_loss(PropagationModel::Cost231Hata, &params, 2.0);
//! assert_eq!(loss, same);
//! ```

use std::f64::consts::PI;

use crate::params::{Environment, LteParameters, PropagationModel};

/// Speed of light used by the breakpoint formulas (m/s).
const C: f64 = 3e8;

/// Upper frequency accepted by Okumura-Hata; higher carriers are clamped.
pub const OKUMURA_HATA_MAX_FREQUENCY_MHZ: f64 = 1500.0;

/// Street-width scenario constant of the suburban macro formula.
const SMA_SCENARIO_CONSTANT: f64 = 15.0;

/// Scenario constant of the rural macro formula below its breakpoint.
const RMA_SCENARIO_CONSTANT: f64 = 5.0;

// ---------------------------------------------------------------------------
// Okumura-Hata / COST 231
// ---------------------------------------------------------------------------

/// Mobile-station antenna height correction a(h_m) in dB.
///
/// Large-city form for urban, small/medium-city form otherwise.
pub fn mobile_station_correction(frequency_mhz: f64, rx_height_m: f64, env: Environment) -> f64 {
    match env {
        Environment::Urban if frequency_mhz <= 300.0 => {
            8.29 * (1.54 * rx_height_m).log10().powi(2) - 1.1
        }
        Environment::Urban => 3.2 * (11.75 * rx_height_m).log10().powi(2) - 4.97,
        Environment::Suburban | Environment::Rural => {
            (1.1 * frequency_mhz.log10() - 0.7) * rx_height_m
                - (1.56 * frequency_mhz.log10() - 0.8)
        }
    }
}

/// Okumura-Hata path loss in dB.
///
/// The frequency is used as given; [`path_loss`] clamps it to 1500 MHz
/// before calling.
///
/// # Arguments
/// * `frequency_mhz` - Carrier frequency in MHz.
/// * `tx_height_m` - Base-station antenna height in metres.
/// * `rx_height_m` - Mobile antenna height in metres.
/// * `distance_km` - Ground distance in km.
/// * `env` - Propagation environment.
pub fn okumura_hata(
    frequency_mhz: f64,
    tx_height_m: f64,
    rx_height_m: f64,
    distance_km: f64,
    env: Environment,
) -> f64 {
    let log_f = frequency_mhz.log10();
    let log_hb = tx_height_m.log10();
    let a_hm = mobile_station_correction(frequency_mhz, rx_height_m, env);

    let l_urban = 69.55 + 26.16 * log_f - 13.82 * log_hb - a_hm
        + (44.9 - 6.55 * log_hb) * distance_km.log10();

    match env {
        Environment::Urban => l_urban,
        Environment::Suburban => l_urban - (2.0 * (frequency_mhz / 28.0).log10().powi(2) + 5.4),
        Environment::Rural => l_urban - (4.78 * log_f.powi(2) + 18.33 * log_f - 40.94),
    }
}

/// COST 231-Hata path loss in dB.
///
/// The mobile correction always uses the small/medium-city form whatever
/// the environment; only the metropolitan correction C_m (3 dB urban,
/// 0 dB otherwise) depends on it.
pub fn cost231_hata(
    frequency_mhz: f64,
    tx_height_m: f64,
    rx_height_m: f64,
    distance_km: f64,
    env: Environment,
) -> f64 {
    let log_hb = tx_height_m.log10();
    let a_hm = mobile_station_correction(frequency_mhz, rx_height_m, Environment::Suburban);

    let c_m = match env {
        Environment::Urban => 3.0,
        Environment::Suburban | Environment::Rural => 0.0,
    };

    46.3 + 33.9 * frequency_mhz.log10() - 13.82 * log_hb - a_hm
        + (44.9 - 6.55 * log_hb) * distance_km.log10()
        + c_m
}

// ---------------------------------------------------------------------------
// 3GPP TR 36.814
// ---------------------------------------------------------------------------

/// Straight-line TX/RX separation in metres.
pub fn distance_3d_m(tx_height_m: f64, rx_height_m: f64, distance_km: f64) -> f64 {
    let ground_m = distance_km * 1000.0;
    let dh = tx_height_m - rx_height_m;
    (ground_m * ground_m + dh * dh).sqrt()
}

/// UMa breakpoint distance in metres: 4·h_BS·h_UT·f/c.
pub fn urban_breakpoint_m(frequency_mhz: f64, tx_height_m: f64, rx_height_m: f64) -> f64 {
    4.0 * tx_height_m * rx_height_m * frequency_mhz * 1e6 / C
}

/// RMa breakpoint distance in metres: 2π·h_BS·h_UT·f/c.
pub fn rural_breakpoint_m(frequency_mhz: f64, tx_height_m: f64, rx_height_m: f64) -> f64 {
    2.0 * PI * tx_height_m * rx_height_m * frequency_mhz * 1e6 / C
}

/// Macro-cell loss shared by SMa and the near part of RMa.
fn macro_los_loss(d_3d_m: f64, frequency_mhz: f64, scenario: f64) -> f64 {
    let k = scenario.powf(1.72);
    20.0 * (40.0 * PI * d_3d_m * frequency_mhz / 3e3).log10()
        + (0.03 * k).min(10.0) * d_3d_m.log10()
        - (0.044 * k).min(14.77)
        + 0.002 * scenario.log10() * d_3d_m
}

/// 3GPP TR 36.814 macro-cell path loss in dB.
///
/// Urban uses the two-slope UMa model, suburban the SMa model and rural the
/// RMa model with its own breakpoint.
pub fn tr36814(
    frequency_mhz: f64,
    tx_height_m: f64,
    rx_height_m: f64,
    distance_km: f64,
    env: Environment,
) -> f64 {
    let d_3d = distance_3d_m(tx_height_m, rx_height_m, distance_km);
    let f_ghz = frequency_mhz / 1000.0;

    match env {
        Environment::Urban => {
            let d_bp = urban_breakpoint_m(frequency_mhz, tx_height_m, rx_height_m);
            if d_3d < d_bp {
                22.0 * d_3d.log10() + 28.0 + 20.0 * f_ghz.log10()
            } else {
                40.0 * d_3d.log10() + 7.8
                    - 18.0 * tx_height_m.log10()
                    - 18.0 * rx_height_m.log10()
                    + 2.0 * f_ghz.log10()
            }
        }
        Environment::Suburban => macro_los_loss(d_3d, frequency_mhz, SMA_SCENARIO_CONSTANT),
        Environment::Rural => {
            let d_bp = rural_breakpoint_m(frequency_mhz, tx_height_m, rx_height_m);
            if d_3d < d_bp {
                macro_los_loss(d_3d, frequency_mhz, RMA_SCENARIO_CONSTANT)
            } else {
                20.0 * (40.0 * PI * d_bp * frequency_mhz / 3e3).log10()
                    + 40.0 * (d_3d / d_bp).log10()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Path loss in dB for `model` at `distance_km`, using the frequency,
/// antenna heights and environment of `params`.
///
/// Okumura-Hata sees the carrier clamped to 1500 MHz; the other models see
/// it unchanged.
pub fn path_loss(model: PropagationModel, params: &LteParameters, distance_km: f64) -> f64 {
    let ht = params.tx_antenna_height;
    let hr = params.rx_antenna_height;
    let env = params.environment;

    match model {
        PropagationModel::OkumuraHata => okumura_hata(
            params.frequency.min(OKUMURA_HATA_MAX_FREQUENCY_MHZ),
            ht,
            hr,
            distance_km,
            env,
        ),
        PropagationModel::Cost231Hata => cost231_hata(params.frequency, ht, hr, distance_km, env),
        PropagationModel::Tr36814 => tr36814(params.frequency, ht, hr, distance_km, env),
    }
}

/// Path loss for a raw model tag.
///
/// Unknown tags are not an error: they yield 0 dB, so a collaborator that
/// passes an unsupported tag sees a zero curve rather than a failure.
pub fn path_loss_by_tag(tag: &str, params: &LteParameters, distance_km: f64) -> f64 {
    match tag.parse::<PropagationModel>() {
        Ok(model) => path_loss(model, params, distance_km),
        Err(_) => {
            tracing::warn!("Unsupported propagation model tag '{}', using 0 dB", tag);
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.05; // dB

    fn grid(from_km: f64, to_km: f64, step_km: f64) -> Vec<f64> {
        let n = ((to_km - from_km) / step_km).round() as usize;
        (0..=n).map(|i| from_km + i as f64 * step_km).collect()
    }

    #[test]
    fn test_hata_urban_reference_value() {
        // 900 MHz, 30 m / 1.5 m, 1 km: 69.55 + 26.16*log10(900) - 13.82*log10(30) - a_hm
        let a_hm = 3.2 * (11.75f64 * 1.5).log10().powi(2) - 4.97;
        let expected = 69.55 + 26.16 * 900f64.log10() - 13.82 * 30f64.log10() - a_hm;
        let pl = okumura_hata(900.0, 30.0, 1.5, 1.0, Environment::Urban);
        assert!((pl - expected).abs() < 1e-9);
        assert!((pl - 126.42).abs() < TOLERANCE, "PL={:.2}", pl);
    }

    #[test]
    fn test_hata_low_frequency_urban_correction() {
        let low = mobile_station_correction(200.0, 1.5, Environment::Urban);
        assert!((low - (8.29 * (1.54f64 * 1.5).log10().powi(2) - 1.1)).abs() < 1e-12);
        let high = mobile_station_correction(301.0, 1.5, Environment::Urban);
        assert!((high - (3.2 * (11.75f64 * 1.5).log10().powi(2) - 4.97)).abs() < 1e-12);
    }

    #[test]
    fn test_hata_environment_ordering() {
        let urban = okumura_hata(900.0, 30.0, 1.5, 5.0, Environment::Urban);
        let suburban = okumura_hata(900.0, 30.0, 1.5, 5.0, Environment::Suburban);
        let rural = okumura_hata(900.0, 30.0, 1.5, 5.0, Environment::Rural);
        assert!(urban > suburban, "urban {:.1} <= suburban {:.1}", urban, suburban);
        assert!(suburban > rural, "suburban {:.1} <= rural {:.1}", suburban, rural);
    }

    #[test]
    fn test_hata_suburban_and_rural_reference_values() {
        // 900 MHz, 30 m / 1.5 m, 5 km; both use the small/medium-city a(h_m)
        let log_f = 900f64.log10();
        let a_hm = (1.1 * log_f - 0.7) * 1.5 - (1.56 * log_f - 0.8);
        let l_urban = 69.55 + 26.16 * log_f - 13.82 * 30f64.log10() - a_hm
            + (44.9 - 6.55 * 30f64.log10()) * 5f64.log10();

        let suburban = okumura_hata(900.0, 30.0, 1.5, 5.0, Environment::Suburban);
        let expected = l_urban - (2.0 * (900.0f64 / 28.0).log10().powi(2) + 5.4);
        assert!((suburban - expected).abs() < 1e-9);
        assert!((suburban - 141.08).abs() < TOLERANCE, "PL={:.2}", suburban);

        let rural = okumura_hata(900.0, 30.0, 1.5, 5.0, Environment::Rural);
        let expected = l_urban - (4.78 * log_f.powi(2) + 18.33 * log_f - 40.94);
        assert!((rural - expected).abs() < 1e-9);
        assert!((rural - 96.10).abs() < TOLERANCE, "PL={:.2}", rural);
    }

    #[test]
    fn test_hata_dispatch_clamps_frequency() {
        let params = LteParameters::builder().frequency(2600.0).build();
        let clamped = path_loss(PropagationModel::OkumuraHata, &params, 3.0);
        let direct = okumura_hata(1500.0, 30.0, 1.5, 3.0, Environment::Urban);
        assert_eq!(clamped, direct);
    }

    #[test]
    fn test_cost231_ignores_environment_in_mobile_correction() {
        // Suburban and rural differ from urban only by C_m = 3 dB
        let urban = cost231_hata(1800.0, 30.0, 1.5, 4.0, Environment::Urban);
        let suburban = cost231_hata(1800.0, 30.0, 1.5, 4.0, Environment::Suburban);
        let rural = cost231_hata(1800.0, 30.0, 1.5, 4.0, Environment::Rural);
        assert!((urban - suburban - 3.0).abs() < 1e-9);
        assert_eq!(suburban, rural);
    }

    #[test]
    fn test_cost231_reference_value() {
        // 1800 MHz, 30 m / 1.5 m, 1 km, urban ~ 139.2 dB
        let pl = cost231_hata(1800.0, 30.0, 1.5, 1.0, Environment::Urban);
        assert!((pl - 139.2).abs() < 0.1, "PL={:.2}", pl);
    }

    #[test]
    fn test_distance_3d() {
        let d = distance_3d_m(30.0, 1.5, 0.0);
        assert!((d - 28.5).abs() < 1e-12);
        let d = distance_3d_m(30.0, 1.5, 1.0);
        assert!((d - (1000.0f64.powi(2) + 28.5f64.powi(2)).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_breakpoints() {
        assert!((urban_breakpoint_m(1800.0, 30.0, 1.5) - 1080.0).abs() < 1e-9);
        assert!((rural_breakpoint_m(1800.0, 30.0, 1.5) - 540.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_uma_two_slopes() {
        // Well inside each regime the slope is 22 and 40 dB/decade of d3D
        let near1 = tr36814(1800.0, 30.0, 1.5, 0.2, Environment::Urban);
        let near2 = tr36814(1800.0, 30.0, 1.5, 0.4, Environment::Urban);
        let d1 = distance_3d_m(30.0, 1.5, 0.2);
        let d2 = distance_3d_m(30.0, 1.5, 0.4);
        let slope = (near2 - near1) / (d2 / d1).log10();
        assert!((slope - 22.0).abs() < 1e-9, "near slope {:.3}", slope);

        let far1 = tr36814(1800.0, 30.0, 1.5, 5.0, Environment::Urban);
        let far2 = tr36814(1800.0, 30.0, 1.5, 50.0, Environment::Urban);
        let d1 = distance_3d_m(30.0, 1.5, 5.0);
        let d2 = distance_3d_m(30.0, 1.5, 50.0);
        let slope = (far2 - far1) / (d2 / d1).log10();
        assert!((slope - 40.0).abs() < 1e-9, "far slope {:.3}", slope);
    }

    #[test]
    fn test_rma_far_regime_slope() {
        let d_bp = rural_breakpoint_m(900.0, 35.0, 1.5);
        let a = tr36814(900.0, 35.0, 1.5, 5.0, Environment::Rural);
        let b = tr36814(900.0, 35.0, 1.5, 10.0, Environment::Rural);
        assert!(distance_3d_m(35.0, 1.5, 5.0) > d_bp);
        let expected = 40.0 * (distance_3d_m(35.0, 1.5, 10.0) / distance_3d_m(35.0, 1.5, 5.0)).log10();
        assert!((b - a - expected).abs() < 1e-9);
    }

    /// Closed form of the macro loss at `d` metres for scenario constant `w`.
    fn macro_reference(d: f64, f_mhz: f64, w: f64) -> f64 {
        let k = w.powf(1.72);
        20.0 * (40.0 * PI * d * f_mhz / 3000.0).log10() + (0.03 * k).min(10.0) * d.log10()
            - (0.044 * k).min(14.77)
            + 0.002 * w.log10() * d
    }

    #[test]
    fn test_sma_reference_value() {
        // 1800 MHz, 30 m / 1.5 m, 2 km; W = 15 keeps both coefficients below their caps
        let d = distance_3d_m(30.0, 1.5, 2.0);
        let k = 15f64.powf(1.72);
        let expected = 20.0 * (40.0 * PI * d * 1800.0 / 3000.0).log10() + 0.03 * k * d.log10()
            - 0.044 * k
            + 0.002 * 15f64.log10() * d;
        let pl = tr36814(1800.0, 30.0, 1.5, 2.0, Environment::Suburban);
        assert!((pl - expected).abs() < 1e-9);
        assert!((pl - 114.07).abs() < TOLERANCE, "PL={:.2}", pl);
    }

    #[test]
    fn test_rma_reference_values_around_breakpoint() {
        // 900 MHz, 35 m / 1.5 m: d_BP = 2π·35·1.5·0.9e9/3e8 ≈ 989.6 m
        let d_bp = rural_breakpoint_m(900.0, 35.0, 1.5);
        assert!((d_bp - 989.60).abs() < 0.01);

        let d_near = distance_3d_m(35.0, 1.5, 0.5);
        assert!(d_near < d_bp);
        let near = tr36814(900.0, 35.0, 1.5, 0.5, Environment::Rural);
        assert!((near - macro_reference(d_near, 900.0, 5.0)).abs() < 1e-9);
        assert!((near - 86.82).abs() < TOLERANCE, "PL={:.2}", near);

        let d_far = distance_3d_m(35.0, 1.5, 5.0);
        assert!(d_far > d_bp);
        let far = tr36814(900.0, 35.0, 1.5, 5.0, Environment::Rural);
        let expected = 20.0 * (40.0 * PI * d_bp * 900.0 / 3000.0).log10()
            + 40.0 * (d_far / d_bp).log10();
        assert!((far - expected).abs() < 1e-9);
        assert!((far - 119.58).abs() < TOLERANCE, "PL={:.2}", far);
    }

    #[test]
    fn test_rma_step_at_breakpoint() {
        // 1800 MHz, default heights: the near formula ends ~3.21 dB above
        // where the far formula starts
        let d_bp = rural_breakpoint_m(1800.0, 30.0, 1.5);
        let ground_km = (d_bp * d_bp - 28.5 * 28.5).sqrt() / 1000.0;
        let before = tr36814(1800.0, 30.0, 1.5, ground_km * (1.0 - 1e-9), Environment::Rural);
        let after = tr36814(1800.0, 30.0, 1.5, ground_km * (1.0 + 1e-9), Environment::Rural);

        let step = macro_reference(d_bp, 1800.0, 5.0) - 20.0 * (40.0 * PI * d_bp * 1800.0 / 3000.0).log10();
        assert!((step - 3.214).abs() < 0.001, "step {:.4}", step);
        assert!((before - after - step).abs() < 1e-3, "{:.4} -> {:.4}", before, after);
    }

    #[test]
    fn test_monotonic_in_distance() {
        let distances = grid(0.1, 50.0, 0.01);
        for freq in [700.0, 900.0, 1800.0, 2100.0, 2600.0] {
            for env in Environment::ALL {
                let params = LteParameters::builder().frequency(freq).environment(env).build();
                for model in PropagationModel::ALL {
                    let rural_3gpp = model == PropagationModel::Tr36814 && env == Environment::Rural;
                    let d_bp = rural_breakpoint_m(freq, 30.0, 1.5);
                    let mut prev = f64::NEG_INFINITY;
                    let mut prev_d3d = 0.0;
                    for &d in &distances {
                        let pl = path_loss(model, &params, d);
                        let d3d = distance_3d_m(30.0, 1.5, d);
                        // RMa steps down once where it switches to the far formula
                        let crosses_bp = rural_3gpp && prev_d3d < d_bp && d3d >= d_bp;
                        if !crosses_bp {
                            assert!(
                                pl >= prev,
                                "{} {} {} MHz not monotonic at {:.2} km: {:.3} < {:.3}",
                                model, env, freq, d, pl, prev
                            );
                        }
                        prev = pl;
                        prev_d3d = d3d;
                    }
                }
            }
        }
    }

    #[test]
    fn test_non_positive_distance_is_not_finite() {
        let params = LteParameters::default();
        let pl = path_loss(PropagationModel::OkumuraHata, &params, 0.0);
        assert!(!pl.is_finite());
        let pl = path_loss(PropagationModel::Cost231Hata, &params, -1.0);
        assert!(pl.is_nan());
    }

    #[test]
    fn test_zero_height_is_not_finite() {
        let params = LteParameters::builder().tx_antenna_height(0.0).build();
        let pl = path_loss(PropagationModel::Cost231Hata, &params, 2.0);
        assert!(!pl.is_finite());
    }

    #[test]
    fn test_path_loss_by_tag() {
        let params = LteParameters::default();
        assert_eq!(
            path_loss_by_tag("3gpp", &params, 2.0),
            path_loss(PropagationModel::Tr36814, &params, 2.0)
        );
        assert_eq!(path_loss_by_tag("free-space", &params, 2.0), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let params = LteParameters::default();
        for model in PropagationModel::ALL {
            let a = path_loss(model, &params, 7.3);
            let b = path_loss(model, &params, 7.3);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
