//! Configuration.
//!
//! Every key is optional; a missing key takes the default shown on the
//! field. Unknown keys are ignored.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cell: CellSize,
    pub zoom: ZoomBounds,
    pub format: FormatOptions,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.zoom.validate()?;
        Ok(config)
    }
}

/// Size of one layout cell, passed to every layout call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self { width: 280, height: 102 }
    }
}

/// Zoom limits handed to the gesture surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub capture_wheel: bool,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: Some(0.5), max: Some(2.5), capture_wheel: true }
    }
}

impl ZoomBounds {
    pub const FALLBACK_MIN: f64 = 0.5;
    pub const FALLBACK_MAX: f64 = 3.0;

    /// `(min, max)` with surface fallbacks applied.
    pub fn resolved(&self) -> (f64, f64) {
        (
            self.min.unwrap_or(Self::FALLBACK_MIN),
            self.max.unwrap_or(Self::FALLBACK_MAX),
        )
    }

    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.resolved();
        if !(min > 0.0 && min.is_finite() && max.is_finite() && min <= max) {
            return Err(Error::Config(format!("invalid zoom bounds {min}..{max}")));
        }
        Ok(())
    }
}

/// Rounding of monetary amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Round to whole currency units.
    #[default]
    Whole,
    /// Always two sub-unit digits.
    SubUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Used when an amount carries no currency code.
    pub default_currency: String,
    pub precision: Precision,
    /// Prefix shown before the last four characters of an account number.
    pub mask: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            default_currency: "GBP".to_owned(),
            precision: Precision::Whole,
            mask: "****".to_owned(),
        }
    }
}
