//! Shared service layer for brewflow front-ends.
//!
//! Loads layouts, turns them into networks through the part registry, runs
//! the flow calculation and offers a background worker for interactive
//! editors that recalculate on every change.

pub mod error;
pub mod flow_service;
pub mod layout_service;
pub mod worker;

pub use error::{AppError, AppResult};
pub use flow_service::{FlowOptions, FlowResponse, build_network, build_parts, compute_flows};
pub use layout_service::{PartSummary, list_parts, load_layout, save_layout, validate_layout};
pub use worker::{FlowResult, FlowWorker, WorkerConfig};
