//! Link Budget Evaluator
//!
//! Turns the transmit chain, receive chain and design margins of an
//! [`LteParameters`] record into the maximum path loss the link can
//! tolerate. That figure is the threshold the range solver searches for.
//!
//! ```text
//! MAPL = (P_tx + G_tx - L_tx) + (G_rx - L_rx) - S_rx - (M_shadow + M_interf)
//!        └──── EIRP ────────┘   └─ rx gain ─┘          └──── margins ────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ltedim_core::link_budget::{max_allowed_path_loss, LinkBudget};
//! use ltedim_core::params::LteParameters;
//!
//! let params = LteParameters::default();
//! assert_eq!(max_allowed_path_loss(&params), 148.0);
//!
//! let budget = LinkBudget::from_params(&params);
//! assert_eq!(budget.eirp_dbm, 59.0);
//! assert_eq!(budget.total_margin_db, 11.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::params::LteParameters;

/// Itemised link budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkBudget {
    /// Effective Isotropic Radiated Power (dBm).
    pub eirp_dbm: f64,
    /// Receive antenna gain minus receive feeder loss (dB).
    pub rx_chain_gain_db: f64,
    /// Receiver sensitivity (dBm).
    pub rx_sensitivity_dbm: f64,
    /// Shadowing plus interference margin (dB).
    pub total_margin_db: f64,
    /// Maximum allowable path loss (dB).
    pub max_allowed_path_loss_db: f64,
}

impl LinkBudget {
    /// Compute the budget for a parameter set.
    pub fn from_params(params: &LteParameters) -> Self {
        let eirp_dbm = params.tx_power + params.tx_antenna_gain - params.tx_cable_loss;
        let rx_chain_gain_db = params.rx_antenna_gain - params.rx_cable_loss;
        let total_margin_db = params.shadowing_margin + params.interference_margin;
        let max_allowed_path_loss_db =
            eirp_dbm + rx_chain_gain_db - params.rx_sensitivity - total_margin_db;

        Self {
            eirp_dbm,
            rx_chain_gain_db,
            rx_sensitivity_dbm: params.rx_sensitivity,
            total_margin_db,
            max_allowed_path_loss_db,
        }
    }

    /// Received power at the UE input for a given path loss (dBm).
    pub fn received_power_dbm(&self, path_loss_db: f64) -> f64 {
        self.eirp_dbm - path_loss_db + self.rx_chain_gain_db
    }

    /// Remaining margin for a given path loss (dB); negative when the link
    /// does not close.
    pub fn margin_db(&self, path_loss_db: f64) -> f64 {
        self.max_allowed_path_loss_db - path_loss_db
    }
}

/// Maximum allowable path loss in dB.
pub fn max_allowed_path_loss(params: &LteParameters) -> f64 {
    LinkBudget::from_params(params).max_allowed_path_loss_db
}
