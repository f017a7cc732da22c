use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest and highest training intensity levels.
pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

/// Accepted range for the nonlinear exponent.
pub const ALPHA_RANGE: (f64, f64) = (0.1, 2.0);
pub const DEFAULT_ALPHA: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum GravityError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// How a gravity fraction is turned into an intensity level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mapping {
    #[default]
    Linear,
    Nonlinear,
}

impl Mapping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mapping::Linear => "linear",
            Mapping::Nonlinear => "nonlinear",
        }
    }

    /// Human-readable formula reported alongside a prediction.
    pub fn formula(&self, alpha: f64) -> String {
        match self {
            Mapping::Linear => "I = round(1 + 9 * (1 - g_fraction))".to_string(),
            Mapping::Nonlinear => format!("I = round(1 + 9 * (1 - g_fraction^{alpha:?}))"),
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mapping {
    type Err = GravityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Mapping::Linear),
            "nonlinear" => Ok(Mapping::Nonlinear),
            other => Err(GravityError::InvalidInput(format!(
                "unknown mapping '{other}', expected 'linear' or 'nonlinear'"
            ))),
        }
    }
}

/// Surface gravity relative to Earth, `mass / radius^2` in Earth units,
/// clamped to `[0, 1]`.
pub fn gravity_fraction(mass_earth: f64, radius_earth: f64) -> Result<f64, GravityError> {
    // `!(r > 0)` also rejects NaN.
    if !(radius_earth > 0.0) {
        return Err(GravityError::InvalidInput(format!(
            "planet radius must be positive, got {radius_earth}"
        )));
    }
    let g = mass_earth / radius_earth.powi(2);
    Ok(g.clamp(0.0, 1.0))
}

/// Map a gravity fraction onto the 1..=10 intensity scale.
///
/// Lower gravity means a harder plan: `g = 0` maps to 10 and `g = 1` to 1.
/// Midpoints round half away from zero, so 5.5 becomes 6. `alpha` only
/// affects [`Mapping::Nonlinear`] and is expected to be pre-validated
/// against [`ALPHA_RANGE`].
pub fn intensity_index(gravity_fraction: f64, alpha: f64, mapping: Mapping) -> u8 {
    let shaped = match mapping {
        Mapping::Linear => gravity_fraction,
        Mapping::Nonlinear => gravity_fraction.powf(alpha),
    };
    let raw = (1.0 + 9.0 * (1.0 - shaped)).round();
    raw.clamp(MIN_INTENSITY as f64, MAX_INTENSITY as f64) as u8
}

pub fn validate_alpha(alpha: f64) -> Result<f64, GravityError> {
    let (lo, hi) = ALPHA_RANGE;
    if (lo..=hi).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(GravityError::InvalidInput(format!(
            "alpha must be within [{lo}, {hi}], got {alpha}"
        )))
    }
}

pub fn validate_fraction(gravity_fraction: f64) -> Result<f64, GravityError> {
    if (0.0..=1.0).contains(&gravity_fraction) {
        Ok(gravity_fraction)
    } else {
        Err(GravityError::InvalidInput(format!(
            "gravity fraction must be within [0, 1], got {gravity_fraction}"
        )))
    }
}

pub fn validate_intensity(intensity_index: i64) -> Result<u8, GravityError> {
    if (MIN_INTENSITY as i64..=MAX_INTENSITY as i64).contains(&intensity_index) {
        Ok(intensity_index as u8)
    } else {
        Err(GravityError::InvalidInput(format!(
            "intensity index must be within [{MIN_INTENSITY}, {MAX_INTENSITY}], got {intensity_index}"
        )))
    }
}
