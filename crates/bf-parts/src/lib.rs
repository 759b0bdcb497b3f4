//! bf-parts: part-type library for brewflow layouts.
//!
//! Each part type is a [`Blueprint`]: a pure function from the part's
//! settings to its footprint and its local connectivity (transitions).
//! Provided types:
//! - `SystemIO` inlets/outlets
//! - tubes: straight, elbow, tee, cross, bridge
//! - pumps (on/off and duty-cycled)
//! - valves and check valves
//! - kettles (sized vessels with outlets on every edge)
//!
//! # Example
//!
//! ```
//! use bf_core::{PartId, Rotation};
//! use bf_parts::{PartSettings, Pose, Registry};
//!
//! let registry = Registry::standard();
//! let settings = PartSettings {
//!     enabled: true,
//!     pressure: Some(6.0),
//!     liquids: vec!["hot water".into()],
//!     ..PartSettings::default()
//! };
//! let part = registry
//!     .instantiate(PartId::from("inlet"), "SystemIO", Pose::new(1, 2, Rotation::Deg0, false), &settings)
//!     .unwrap();
//! assert_eq!(part.transitions.len(), 2);
//! ```

pub mod blueprint;
pub mod error;
pub mod io;
pub mod kettle;
pub mod pump;
pub mod registry;
pub mod settings;
pub mod tubes;
pub mod valve;

// Re-exports
pub use blueprint::{Blueprint, edge};
pub use error::{PartError, PartResult};
pub use io::SystemIo;
pub use kettle::Kettle;
pub use pump::Pump;
pub use registry::{Pose, Registry};
pub use settings::PartSettings;
pub use tubes::{BridgeTube, CrossTube, ElbowTube, StraightTube, TeeTube};
pub use valve::{CheckValve, Valve};
