//! Pumps push liquid from the right edge towards the left edge.

use bf_graph::{Route, Transitions};

use crate::blueprint::{Blueprint, edge};
use crate::error::PartResult;
use crate::settings::{DEFAULT_PUMP_PRESSURE, PartSettings};

#[derive(Debug, Default, Clone, Copy)]
pub struct Pump;

impl Pump {
    /// Effective pressure: zero when off, scaled by duty cycle when set.
    pub fn pressure(&self, settings: &PartSettings) -> PartResult<f64> {
        if !settings.enabled {
            return Ok(0.0);
        }
        let nominal = settings
            .checked_pressure(self.kind())?
            .unwrap_or(DEFAULT_PUMP_PRESSURE);
        Ok(nominal * settings.duty_fraction(self.kind())?)
    }
}

impl Blueprint for Pump {
    fn kind(&self) -> &'static str {
        "Pump"
    }

    fn transitions(&self, settings: &PartSettings) -> PartResult<Transitions> {
        let pressure = self.pressure(settings)?;
        let mut t = Transitions::new();
        t.insert(edge::LEFT, vec![Route::new(edge::RIGHT)]);
        t.insert(
            edge::RIGHT,
            vec![Route::new(edge::LEFT).with_pressure(pressure)],
        );
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_off_has_no_pressure() {
        let settings = PartSettings {
            pressure: Some(12.0),
            ..PartSettings::default()
        };
        assert_eq!(Pump.pressure(&settings), Ok(0.0));
        let t = Pump.transitions(&settings).unwrap();
        assert_eq!(t[&edge::RIGHT][0].pressure, Some(0.0));
    }

    #[test]
    fn duty_scales_pressure() {
        let settings = PartSettings {
            enabled: true,
            pressure: Some(12.0),
            duty: Some(50.0),
            ..PartSettings::default()
        };
        assert_eq!(Pump.pressure(&settings), Ok(6.0));
    }

    #[test]
    fn enabled_pump_defaults() {
        let settings = PartSettings {
            enabled: true,
            ..PartSettings::default()
        };
        assert_eq!(Pump.pressure(&settings), Ok(DEFAULT_PUMP_PRESSURE));
        let t = Pump.transitions(&settings).unwrap();
        assert_eq!(t[&edge::LEFT][0].pressure, None);
    }
}
