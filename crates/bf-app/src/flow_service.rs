//! Layout -> network -> flows.

use bf_core::timing::{PerfStats, Timer};
use bf_core::{PartId, Real, Rotation, Tolerances};
use bf_graph::{Network, NetworkBuilder, StatePart};
use bf_parts::{Pose, Registry};
use bf_project::Layout;
use bf_solver::{
    FlowMap, SolveOptions, SourceFailure, calculate_flows_with, normalize_flows, unbalanced_parts,
};

use crate::error::{AppError, AppResult};

/// Tolerance for reporting a part as unbalanced.
const BALANCE_TOLERANCE: Tolerances = Tolerances {
    abs: 1e-9,
    rel: 1e-9,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct FlowOptions {
    pub solve: SolveOptions,
    /// Re-key each part's flows relative to its own anchor.
    pub local: bool,
}

#[derive(Debug, Clone)]
pub struct FlowResponse {
    pub flows: FlowMap,
    pub failures: Vec<SourceFailure>,
    /// Parts whose flows do not sum to zero.
    pub unbalanced: Vec<(PartId, Real)>,
    pub perf: PerfStats,
}

/// Resolve every layout part through the registry.
pub fn build_parts(layout: &Layout, registry: &Registry) -> AppResult<Vec<StatePart>> {
    layout
        .parts
        .iter()
        .map(|def| {
            let part_error = |message: String| AppError::Part {
                id: def.id.clone(),
                message,
            };
            let rotation = Rotation::from_degrees(def.rotate).map_err(|e| part_error(e.to_string()))?;
            registry
                .instantiate(
                    PartId::new(def.id.as_str()),
                    &def.kind,
                    Pose::new(def.x, def.y, rotation, def.flipped),
                    &def.settings,
                )
                .map_err(|e| part_error(e.to_string()))
        })
        .collect()
}

pub fn build_network(layout: &Layout, registry: &Registry) -> AppResult<Network> {
    let parts = build_parts(layout, registry)?;
    Ok(parts.into_iter().collect::<NetworkBuilder>().build()?)
}

/// Calculate the flows of a layout.
///
/// Sources that fail under [`bf_solver::ErrorPolicy::SkipSource`] are logged
/// and returned in the response; with `Abort` the first failure is an error.
pub fn compute_flows(
    layout: &Layout,
    registry: &Registry,
    options: &FlowOptions,
) -> AppResult<FlowResponse> {
    let mut perf = PerfStats::default();

    let timer = Timer::start("translate");
    let network = build_network(layout, registry)?;
    perf.translate_time_s = timer.stop().unwrap_or_default();

    let timer = Timer::start("solve");
    let report = calculate_flows_with(&network, &options.solve)?;
    perf.solve_time_s = timer.stop().unwrap_or_default();
    perf.sources = report.sources;
    perf.failed_sources = report.failures.len();

    for failure in &report.failures {
        tracing::warn!(
            part = %failure.part,
            entry = %failure.entry,
            error = %failure.error,
            "liquid source skipped"
        );
    }

    let unbalanced = unbalanced_parts(&report.flows, BALANCE_TOLERANCE);
    for (part, net) in &unbalanced {
        tracing::warn!(%part, net, "part flows do not balance");
    }

    let flows = if options.local {
        normalize_flows(&network, report.flows)
    } else {
        report.flows
    };

    perf.log_summary();
    Ok(FlowResponse {
        flows,
        failures: report.failures,
        unbalanced,
        perf,
    })
}
