//! Steady-state flow solver for brewery liquid networks.
//!
//! Each liquid source is walked independently: the path builder turns the
//! network reachable from the source into a tree of segments, the friction
//! resolver reduces that tree to one pressure difference and friction, and
//! the resulting flow is distributed back over the tree. Contributions of all
//! sources are superposed and finally merged so that opposite flows at the
//! same coordinate cancel.

pub mod calculate;
pub mod error;
pub mod flows;
pub mod friction;
pub mod merge;
pub mod path;
pub mod segment;
pub mod superposition;

pub use calculate::{
    ErrorPolicy, FlowReport, SolveOptions, SourceFailure, calculate_flows, calculate_flows_with,
    calculate_normalized_flows, normalize_flows,
};
pub use error::{SolverError, SolverResult};
pub use flows::{FlowMap, LiquidFlow, PartFlows};
pub use friction::{Degenerate, ParallelBlock, PathFriction, Resolution, parallel, resolve, series};
pub use merge::{merge_flows, merge_liquid_flow, merge_part_flows, net_flow, unbalanced_parts};
pub use path::{build_path, build_source_path};
pub use segment::{Segment, SegmentTree};
pub use superposition::{SourceContribution, source_contribution};
