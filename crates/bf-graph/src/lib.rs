//! bf-graph: part/connectivity layer for brewflow.
//!
//! Provides:
//! - Routes and per-part transition maps
//! - The translator from part-local to shared layout coordinates (and back)
//! - A builder that validates parts and freezes them into a `Network`
//! - A coordinate index answering "which parts connect at this point"
//!
//! # Example
//!
//! ```
//! use bf_core::{Coord, PartId, Rotation, ShapeSize};
//! use bf_graph::{NetworkBuilder, Placement, Route, StatePart, Transitions};
//!
//! let left: Coord = "0,0.5,0".parse().unwrap();
//! let right: Coord = "1,0.5,0".parse().unwrap();
//! let mut transitions = Transitions::new();
//! transitions.insert(left, vec![Route::new(right)]);
//! transitions.insert(right, vec![Route::new(left)]);
//!
//! let mut builder = NetworkBuilder::new();
//! builder.add_part(StatePart {
//!     id: PartId::from("tube"),
//!     kind: "StraightTube".into(),
//!     placement: Placement::new(2, 2, Rotation::Deg90, false, ShapeSize::UNIT),
//!     transitions,
//! });
//! let network = builder.build().unwrap();
//!
//! let top: Coord = "2.5,2,0".parse().unwrap();
//! assert_eq!(network.parts_at(top), &[0]);
//! ```

pub mod builder;
pub mod error;
pub mod index;
pub mod network;
pub mod part;
pub mod route;
pub mod translate;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use error::{GraphError, GraphResult};
pub use index::CoordIndex;
pub use network::{Network, SourceRef};
pub use part::{FlowPart, Placement, StatePart};
pub use route::{DEFAULT_FRICTION, Route, Transitions};
pub use translate::{as_flow_part, as_flow_parts, normalize_keys, translate_transitions};
