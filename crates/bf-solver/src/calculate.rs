//! Entry points: superpose every source of a network and merge the result.

use bf_core::timing::{Timer, flow_timing};
use bf_core::{Coord, PartId};
use bf_graph::{Network, NetworkBuilder, SourceRef, StatePart, normalize_keys};

use crate::error::{SolverError, SolverResult};
use crate::flows::{FlowMap, accumulate, empty_flow_map};
use crate::merge::merge_flows;
use crate::superposition::{SourceContribution, source_contribution};

/// What to do when one source cannot be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failing source and return its error.
    Abort,
    /// Drop the failing source, keep every other contribution and report
    /// the failure.
    #[default]
    SkipSource,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    pub error_policy: ErrorPolicy,
}

impl SolveOptions {
    pub fn strict() -> Self {
        Self {
            error_policy: ErrorPolicy::Abort,
        }
    }

    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

/// A source that was dropped under [`ErrorPolicy::SkipSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub part: PartId,
    pub entry: Coord,
    pub error: SolverError,
}

#[derive(Debug, Clone, Default)]
pub struct FlowReport {
    /// Merged flows of every part, in shared coordinates.
    pub flows: FlowMap,
    pub failures: Vec<SourceFailure>,
    /// Liquid source routes found in the network.
    pub sources: usize,
    /// Sources that reached a sink, including ones at zero pressure difference.
    pub contributing: usize,
}

impl FlowReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Solve every source, failing on the first source that cannot be solved.
pub fn calculate_flows(network: &Network) -> SolverResult<FlowMap> {
    calculate_flows_with(network, &SolveOptions::strict()).map(|report| report.flows)
}

/// Solve every source under `options`.
///
/// Sources are evaluated independently (in parallel with the `parallel`
/// feature) and committed in network order, so the result does not depend
/// on evaluation order.
pub fn calculate_flows_with(network: &Network, options: &SolveOptions) -> SolverResult<FlowReport> {
    let sources: Vec<SourceRef> = network.sources().collect();
    let results = evaluate(network, &sources);

    let mut total = empty_flow_map(network);
    let mut report = FlowReport {
        sources: sources.len(),
        ..FlowReport::default()
    };
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(Some(contribution)) => {
                report.contributing += 1;
                accumulate(&mut total, contribution.flows);
            }
            Ok(None) => {}
            Err(error) => match options.error_policy {
                ErrorPolicy::Abort => return Err(error),
                ErrorPolicy::SkipSource => {
                    let part = network
                        .part(source.part)
                        .map(|p| p.id.clone())
                        .unwrap_or_default();
                    tracing::debug!(%part, entry = %source.entry, %error, "source skipped");
                    report.failures.push(SourceFailure {
                        part,
                        entry: source.entry,
                        error,
                    });
                }
            },
        }
    }

    let timer = Timer::start("merge");
    report.flows = merge_flows(&total);
    timer.stop_into(&flow_timing::MERGE);

    tracing::debug!(
        sources = report.sources,
        contributing = report.contributing,
        failed = report.failures.len(),
        "flows calculated"
    );
    Ok(report)
}

type Evaluated = SolverResult<Option<SourceContribution>>;

#[cfg(not(feature = "parallel"))]
fn evaluate(network: &Network, sources: &[SourceRef]) -> Vec<Evaluated> {
    sources
        .iter()
        .map(|&source| source_contribution(network, source))
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate(network: &Network, sources: &[SourceRef]) -> Vec<Evaluated> {
    use rayon::prelude::*;

    sources
        .par_iter()
        .map(|&source| source_contribution(network, source))
        .collect()
}

/// Re-key every part's flows into its own anchor-relative frame.
pub fn normalize_flows(network: &Network, flows: FlowMap) -> FlowMap {
    flows
        .into_iter()
        .map(|(id, part_flows)| {
            let normalized = match network.position(&id).ok().and_then(|i| network.part(i)) {
                Some(part) => normalize_keys(&part.placement, part_flows),
                None => part_flows,
            };
            (id, normalized)
        })
        .collect()
}

/// Translate, solve strictly and normalize in one go.
pub fn calculate_normalized_flows(parts: Vec<StatePart>) -> SolverResult<FlowMap> {
    let network = parts.into_iter().collect::<NetworkBuilder>().build()?;
    let flows = calculate_flows(&network)?;
    Ok(normalize_flows(&network, flows))
}
