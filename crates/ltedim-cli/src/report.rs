//! Plain-text rendering of planner results.

use std::fmt::Write;

use ltedim_core::{BandComparison, CalculationResult, ComparisonResult, LteParameters, SweepPoint};
use ltedim_core::{LinkBudget, PropagationModel};

pub fn scenario(params: &LteParameters) -> String {
    let budget = LinkBudget::from_params(params);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Scenario: {} MHz, {}, {} km², eNodeB {} m / UE {} m",
        params.frequency,
        params.environment.label(),
        params.target_area,
        params.tx_antenna_height,
        params.rx_antenna_height
    );
    let _ = writeln!(
        out,
        "Link budget: EIRP {:.1} dBm, RX gain {:.1} dB, margins {:.1} dB, MAPL {:.1} dB",
        budget.eirp_dbm, budget.rx_chain_gain_db, budget.total_margin_db, budget.max_allowed_path_loss_db
    );
    out
}

/// Site count cell, `-` when there is none.
fn sites(n: Option<u32>) -> String {
    n.map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn result_header(out: &mut String) {
    let _ = writeln!(
        out,
        "{:<16} {:>10} {:>10} {:>11} {:>11} {:>7}",
        "Model", "PL (dB)", "Range km", "Radius km", "Area km²", "Sites"
    );
}

fn result_row(out: &mut String, r: &CalculationResult, recommended: bool) {
    let _ = writeln!(
        out,
        "{:<16} {:>10.1} {:>10.2} {:>11.2} {:>11.2} {:>7}{}",
        r.model_name,
        r.path_loss_db,
        r.max_range_km,
        r.cell_radius_km,
        r.cell_area_km2,
        sites(r.number_of_sites),
        if recommended { "  *" } else { "" }
    );
}

pub fn calculation(result: &CalculationResult) -> String {
    let mut out = String::new();
    result_header(&mut out);
    result_row(&mut out, result, false);
    let _ = writeln!(
        out,
        "{} sectors per site, overlap factor {}",
        result.sector_count, result.overlap_factor
    );
    out
}

pub fn comparison(cmp: &ComparisonResult) -> String {
    let mut out = String::new();
    result_header(&mut out);
    for r in &cmp.models {
        result_row(&mut out, r, r.model == cmp.recommended_model);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended model:  {}", cmp.recommended_model.name());
    let _ = writeln!(out, "Average range:      {:.2} km", cmp.average_range_km);
    let _ = writeln!(out, "Average sites:      {}", sites(cmp.rounded_average_sites()));
    let _ = writeln!(out, "Best range:         {:.2} km", cmp.best_range_km());
    let _ = writeln!(out, "Minimum sites:      {}", sites(cmp.min_sites()));
    out
}

pub fn sweep(points: &[SweepPoint], mapl: f64) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>8}", "d (km)");
    for model in PropagationModel::ALL {
        let _ = write!(out, " {:>16}", model.name());
    }
    let _ = writeln!(out);
    for p in points {
        let _ = write!(out, "{:>8.1}", p.distance_km);
        for (_, loss) in p.path_loss.iter() {
            let mark = if loss > mapl { '!' } else { ' ' };
            let _ = write!(out, " {:>15.1}{}", loss, mark);
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "! = above MAPL {:.1} dB", mapl);
    out
}

pub fn bands(results: &[BandComparison]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<16} {:>10} {:>12}",
        "Band", "Recommended", "Range km", "Sites"
    );
    for r in results {
        let name = r.band.to_string();
        match r.comparison.recommended() {
            Some(rec) => {
                let _ = writeln!(
                    out,
                    "{:<20} {:<16} {:>10.2} {:>12}",
                    name,
                    rec.model_name,
                    rec.max_range_km,
                    sites(rec.number_of_sites)
                );
            }
            None => {
                let _ = writeln!(out, "{:<20} -", name);
            }
        }
    }
    out
}
