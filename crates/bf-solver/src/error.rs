use bf_core::{Coord, PartId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Graph error: {0}")]
    Graph(#[from] bf_graph::GraphError),

    #[error("Core error: {0}")]
    Core(#[from] bf_core::CoreError),

    #[error(
        "Topology inconsistency at part '{part}' ({coord}): {live} live branches but {splits} splits"
    )]
    TopologyInconsistency {
        part: PartId,
        coord: Coord,
        live: usize,
        splits: usize,
    },

    #[error("Degenerate network at part '{part}' ({coord}): {what}")]
    DegenerateNetwork {
        part: PartId,
        coord: Coord,
        what: String,
    },

    #[error("Unknown source route {route} at part #{part} ({entry})")]
    UnknownSource {
        part: usize,
        entry: Coord,
        route: usize,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;
