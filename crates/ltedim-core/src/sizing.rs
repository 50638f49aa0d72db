//! Cell and site sizing.
//!
//! A three-sector site is modelled as a regular hexagon whose radius is a
//! fixed fraction of the maximum range, leaving room for overlap between
//! neighbouring cells. The site count covers the target area inflated by a
//! fixed overlap factor. When the inputs cannot produce a positive count
//! (NaN range, non-positive target area) there is no count at all rather
//! than a plausible-looking one.

use serde::{Deserialize, Serialize};

/// Sectors per eNodeB site.
pub const SECTOR_COUNT: u32 = 3;

/// Area inflation accounting for overlap between neighbouring cells.
pub const OVERLAP_FACTOR: f64 = 1.3;

/// Ratio of usable cell radius to maximum range.
pub const CELL_RADIUS_FACTOR: f64 = 0.65;

/// Geometry of one site derived from a maximum range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSizing {
    pub cell_radius_km: f64,
    pub cell_area_km2: f64,
    /// `None` when the geometry or target area is malformed
    pub number_of_sites: Option<u32>,
}

impl CellSizing {
    /// Size cells of `max_range_km` to cover `target_area_km2`.
    pub fn new(max_range_km: f64, target_area_km2: f64) -> Self {
        let cell_radius_km = cell_radius_km(max_range_km);
        let cell_area_km2 = hexagon_area_km2(cell_radius_km);
        Self {
            cell_radius_km,
            cell_area_km2,
            number_of_sites: sites_required(target_area_km2, cell_area_km2),
        }
    }
}

pub fn cell_radius_km(max_range_km: f64) -> f64 {
    max_range_km * CELL_RADIUS_FACTOR
}

/// Area of a regular hexagon of circumradius `radius_km`: (3√3/2)·r².
pub fn hexagon_area_km2(radius_km: f64) -> f64 {
    3.0 * 3f64.sqrt() / 2.0 * radius_km * radius_km
}

/// Sites needed to cover `target_area_km2` with cells of `cell_area_km2`.
///
/// At least one for any positive quotient; an enormous one saturates at
/// `u32::MAX`. Returns `None` unless the quotient is finite and positive.
pub fn sites_required(target_area_km2: f64, cell_area_km2: f64) -> Option<u32> {
    let sites = target_area_km2 * OVERLAP_FACTOR / cell_area_km2;
    if !(sites.is_finite() && sites > 0.0) {
        return None;
    }
    // `as` saturates
    Some(sites.ceil() as u32)
}
