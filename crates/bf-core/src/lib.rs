//! bf-core: stable foundation for brewflow.
//!
//! Contains:
//! - coord (grid coordinates, rotation, shape transforms)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact arena IDs and part identifiers)
//! - error (shared error types)
//! - timing (opt-in instrumentation for flow calculations)

pub mod coord;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use coord::{Coord, Rotation, ShapeSize};
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
