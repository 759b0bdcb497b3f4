//! User-editable settings shared by all part types.

use serde::{Deserialize, Serialize};

use crate::error::{PartError, PartResult};

/// Pressure of an enabled `SystemIO` inlet without explicit pressure.
pub const DEFAULT_IO_PRESSURE: f64 = 30.0;
/// Pressure of an enabled pump without explicit pressure.
pub const DEFAULT_PUMP_PRESSURE: f64 = 30.0;

/// Settings a part type may read. Types ignore the fields they do not use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartSettings {
    /// Inlet or pump switched on.
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Inlet / pump / vessel pressure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,

    /// Liquids supplied by an inlet or held by a vessel.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub liquids: Vec<String>,

    /// Valve shut.
    #[serde(skip_serializing_if = "is_false")]
    pub closed: bool,

    /// Vessel width in squares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Vessel height in squares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Pump duty cycle in percent (PWM driven pumps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty: Option<f64>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl PartSettings {
    /// Pressure if set, checked to be finite and non-negative.
    pub fn checked_pressure(&self, kind: &'static str) -> PartResult<Option<f64>> {
        match self.pressure {
            Some(p) if !p.is_finite() || p < 0.0 => Err(PartError::InvalidSetting {
                kind,
                setting: "pressure",
                reason: format!("{p} is not a finite, non-negative pressure"),
            }),
            other => Ok(other),
        }
    }

    /// Duty cycle as a fraction in `[0, 1]`; 1 when unset.
    pub fn duty_fraction(&self, kind: &'static str) -> PartResult<f64> {
        match self.duty {
            None => Ok(1.0),
            Some(d) if (0.0..=100.0).contains(&d) => Ok(d / 100.0),
            Some(d) => Err(PartError::InvalidSetting {
                kind,
                setting: "duty",
                reason: format!("{d} is outside 0..=100"),
            }),
        }
    }
}
