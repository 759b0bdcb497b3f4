//! System inlet / outlet.
//!
//! The tube end opens to the right. When enabled with liquids it pushes them
//! out of the right edge; liquid flowing in from the right always drains
//! into the center.

use bf_graph::{Route, Transitions};

use crate::blueprint::{Blueprint, edge};
use crate::error::PartResult;
use crate::settings::{DEFAULT_IO_PRESSURE, PartSettings};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIo;

impl Blueprint for SystemIo {
    fn kind(&self) -> &'static str {
        "SystemIO"
    }

    fn transitions(&self, settings: &PartSettings) -> PartResult<Transitions> {
        let pressure = settings
            .checked_pressure(self.kind())?
            .unwrap_or(DEFAULT_IO_PRESSURE);

        let mut t = Transitions::new();
        if settings.enabled && !settings.liquids.is_empty() {
            t.insert(
                edge::CENTER,
                vec![
                    Route::new(edge::RIGHT)
                        .with_pressure(pressure)
                        .with_liquids(settings.liquids.iter().cloned())
                        .as_source(),
                ],
            );
        }
        t.insert(edge::RIGHT, vec![Route::new(edge::CENTER).as_sink()]);
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_inlet_is_a_source() {
        let settings = PartSettings {
            enabled: true,
            pressure: Some(11.0),
            liquids: vec!["cold".into()],
            ..PartSettings::default()
        };
        let t = SystemIo.transitions(&settings).unwrap();
        let out = &t[&edge::CENTER][0];
        assert_eq!(out.target, edge::RIGHT);
        assert_eq!(out.pressure, Some(11.0));
        assert!(out.is_liquid_source());
        assert!(t[&edge::RIGHT][0].sink);
    }

    #[test]
    fn default_pressure_applies() {
        let settings = PartSettings {
            enabled: true,
            liquids: vec!["cold".into()],
            ..PartSettings::default()
        };
        let t = SystemIo.transitions(&settings).unwrap();
        assert_eq!(t[&edge::CENTER][0].pressure, Some(DEFAULT_IO_PRESSURE));
    }

    #[test]
    fn disabled_inlet_only_drains() {
        let settings = PartSettings {
            liquids: vec!["cold".into()],
            ..PartSettings::default()
        };
        let t = SystemIo.transitions(&settings).unwrap();
        assert_eq!(t.len(), 1);
        assert!(t[&edge::RIGHT][0].sink);
    }
}
