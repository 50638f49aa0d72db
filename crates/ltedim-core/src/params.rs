//! LTE Planning Parameters
//!
//! This module defines the input record shared by every calculation in the
//! crate, together with the two closed enumerations that select behaviour:
//! the propagation environment and the propagation model.
//!
//! ## Units
//!
//! | Field                  | Unit | Constraint |
//! |------------------------|------|------------|
//! | `frequency`            | MHz  | > 0        |
//! | `tx_power`             | dBm  |            |
//! | `tx_antenna_gain`      | dBi  |            |
//! | `tx_cable_loss`        | dB   | ≥ 0        |
//! | `rx_antenna_gain`      | dBi  |            |
//! | `rx_cable_loss`        | dB   | ≥ 0        |
//! | `rx_sensitivity`       | dBm  |            |
//! | `tx_antenna_height`    | m    | > 0        |
//! | `rx_antenna_height`    | m    | > 0        |
//! | `shadowing_margin`     | dB   | ≥ 0        |
//! | `interference_margin`  | dB   | ≥ 0        |
//! | `target_area`          | km²  | > 0        |
//!
//! Parameters are plain values. To change one field, build a new record
//! with the builder or with struct update syntax; nothing in the crate
//! mutates a record it was given.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{DimError, DimResult};

/// Propagation environment class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Urban,
    Suburban,
    Rural,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Self::Urban, Self::Suburban, Self::Rural];

    /// Short machine tag (`urban`, `suburban`, `rural`)
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Urban => "urban",
            Self::Suburban => "suburban",
            Self::Rural => "rural",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Urban => "Dense urban",
            Self::Suburban => "Suburban",
            Self::Rural => "Rural",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Environment {
    type Err = DimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(Self::Urban),
            "suburban" => Ok(Self::Suburban),
            "rural" => Ok(Self::Rural),
            _ => Err(DimError::UnknownEnvironment(s.to_string())),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::Urban
    }
}

/// Propagation model selector
///
/// The set is closed: every dispatch over it is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropagationModel {
    /// Okumura-Hata (150-1500 MHz)
    #[serde(rename = "okumura-hata")]
    OkumuraHata,
    /// COST 231 extension of Hata (1500-2000 MHz)
    #[serde(rename = "cost231-hata")]
    Cost231Hata,
    /// 3GPP TR 36.814 macro-cell models (up to 6 GHz)
    #[serde(rename = "3gpp")]
    Tr36814,
}

impl PropagationModel {
    /// All models, in comparison order
    pub const ALL: [PropagationModel; 3] = [Self::OkumuraHata, Self::Cost231Hata, Self::Tr36814];

    /// Short machine tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OkumuraHata => "okumura-hata",
            Self::Cost231Hata => "cost231-hata",
            Self::Tr36814 => "3gpp",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::OkumuraHata => "Okumura-Hata",
            Self::Cost231Hata => "COST 231-Hata",
            Self::Tr36814 => "3GPP TR 36.814",
        }
    }

    /// Nominal frequency validity range in MHz
    pub fn frequency_range_mhz(&self) -> (f64, f64) {
        match self {
            Self::OkumuraHata => (150.0, 1500.0),
            Self::Cost231Hata => (1500.0, 2000.0),
            Self::Tr36814 => (0.0, 6000.0),
        }
    }
}

impl fmt::Display for PropagationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PropagationModel {
    type Err = DimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "okumura-hata" => Ok(Self::OkumuraHata),
            "cost231-hata" => Ok(Self::Cost231Hata),
            "3gpp" => Ok(Self::Tr36814),
            _ => Err(DimError::UnknownModel(s.to_string())),
        }
    }
}

/// An LTE operating band preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LteBand {
    /// E-UTRA band number
    pub number: u8,
    /// Carrier frequency in MHz
    pub frequency_mhz: f64,
}

impl LteBand {
    pub const fn new(number: u8, frequency_mhz: f64) -> Self {
        Self {
            number,
            frequency_mhz,
        }
    }
}

impl fmt::Display for LteBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz (Band {})", self.frequency_mhz, self.number)
    }
}

/// Commonly deployed LTE bands, lowest frequency first
pub const LTE_BANDS: [LteBand; 6] = [
    LteBand::new(28, 700.0),
    LteBand::new(20, 800.0),
    LteBand::new(8, 900.0),
    LteBand::new(3, 1800.0),
    LteBand::new(1, 2100.0),
    LteBand::new(7, 2600.0),
];

/// Complete link and coverage parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LteParameters {
    /// Carrier frequency in MHz
    pub frequency: f64,
    /// eNodeB transmit power in dBm
    pub tx_power: f64,
    /// eNodeB antenna gain in dBi
    pub tx_antenna_gain: f64,
    /// eNodeB feeder loss in dB
    pub tx_cable_loss: f64,
    /// UE antenna gain in dBi
    pub rx_antenna_gain: f64,
    /// UE feeder/body loss in dB
    pub rx_cable_loss: f64,
    /// UE sensitivity in dBm
    pub rx_sensitivity: f64,
    /// eNodeB antenna height in metres
    pub tx_antenna_height: f64,
    /// UE antenna height in metres
    pub rx_antenna_height: f64,
    /// Propagation environment
    pub environment: Environment,
    /// Log-normal shadowing margin in dB
    pub shadowing_margin: f64,
    /// Interference margin in dB
    pub interference_margin: f64,
    /// Area to cover in km²
    pub target_area: f64,
}

impl Default for LteParameters {
    fn default() -> Self {
        Self {
            frequency: 1800.0,
            tx_power: 43.0,
            tx_antenna_gain: 18.0,
            tx_cable_loss: 2.0,
            rx_antenna_gain: 0.0,
            rx_cable_loss: 0.0,
            rx_sensitivity: -100.0,
            tx_antenna_height: 30.0,
            rx_antenna_height: 1.5,
            environment: Environment::Urban,
            shadowing_margin: 8.0,
            interference_margin: 3.0,
            target_area: 100.0,
        }
    }
}

impl LteParameters {
    /// Create a new builder starting from the default scenario
    pub fn builder() -> LteParametersBuilder {
        LteParametersBuilder::default()
    }

    /// Copy of these parameters at another carrier frequency
    pub fn with_frequency(&self, frequency: f64) -> Self {
        Self { frequency, ..*self }
    }

    /// Copy of these parameters in another environment
    pub fn with_environment(&self, environment: Environment) -> Self {
        Self {
            environment,
            ..*self
        }
    }

    /// Check that the record describes a physically valid link.
    ///
    /// The calculations never call this; an invalid record simply produces
    /// non-finite results. Returns the first offending field.
    pub fn validate(&self) -> DimResult<()> {
        let fields = [
            ("frequency", self.frequency),
            ("txPower", self.tx_power),
            ("txAntennaGain", self.tx_antenna_gain),
            ("txCableLoss", self.tx_cable_loss),
            ("rxAntennaGain", self.rx_antenna_gain),
            ("rxCableLoss", self.rx_cable_loss),
            ("rxSensitivity", self.rx_sensitivity),
            ("txAntennaHeight", self.tx_antenna_height),
            ("rxAntennaHeight", self.rx_antenna_height),
            ("shadowingMargin", self.shadowing_margin),
            ("interferenceMargin", self.interference_margin),
            ("targetArea", self.target_area),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(DimError::invalid(field, format!("must be finite, got {}", value)));
            }
        }

        let positive = [
            ("frequency", self.frequency),
            ("txAntennaHeight", self.tx_antenna_height),
            ("rxAntennaHeight", self.rx_antenna_height),
            ("targetArea", self.target_area),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(DimError::invalid(field, format!("must be positive, got {}", value)));
            }
        }

        let non_negative = [
            ("txCableLoss", self.tx_cable_loss),
            ("rxCableLoss", self.rx_cable_loss),
            ("shadowingMargin", self.shadowing_margin),
            ("interferenceMargin", self.interference_margin),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(DimError::invalid(
                    field,
                    format!("must not be negative, got {}", value),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for LteParameters
#[derive(Default)]
pub struct LteParametersBuilder {
    params: LteParameters,
}

impl LteParametersBuilder {
    pub fn frequency(mut self, mhz: f64) -> Self {
        self.params.frequency = mhz;
        self
    }

    pub fn tx_power(mut self, dbm: f64) -> Self {
        self.params.tx_power = dbm;
        self
    }

    pub fn tx_antenna_gain(mut self, dbi: f64) -> Self {
        self.params.tx_antenna_gain = dbi;
        self
    }

    pub fn tx_cable_loss(mut self, db: f64) -> Self {
        self.params.tx_cable_loss = db;
        self
    }

    pub fn rx_antenna_gain(mut self, dbi: f64) -> Self {
        self.params.rx_antenna_gain = dbi;
        self
    }

    pub fn rx_cable_loss(mut self, db: f64) -> Self {
        self.params.rx_cable_loss = db;
        self
    }

    pub fn rx_sensitivity(mut self, dbm: f64) -> Self {
        self.params.rx_sensitivity = dbm;
        self
    }

    pub fn tx_antenna_height(mut self, m: f64) -> Self {
        self.params.tx_antenna_height = m;
        self
    }

    pub fn rx_antenna_height(mut self, m: f64) -> Self {
        self.params.rx_antenna_height = m;
        self
    }

    pub fn environment(mut self, env: Environment) -> Self {
        self.params.environment = env;
        self
    }

    pub fn shadowing_margin(mut self, db: f64) -> Self {
        self.params.shadowing_margin = db;
        self
    }

    pub fn interference_margin(mut self, db: f64) -> Self {
        self.params.interference_margin = db;
        self
    }

    pub fn target_area(mut self, km2: f64) -> Self {
        self.params.target_area = km2;
        self
    }

    pub fn build(self) -> LteParameters {
        self.params
    }
}
