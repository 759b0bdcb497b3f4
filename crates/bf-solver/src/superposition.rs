//! Per-source flow distribution.
//!
//! Every liquid source is solved on its own; the resulting maps are summed by
//! the caller. A source's contribution is built in a private map, so a source
//! that fails half-way leaves nothing behind.

use bf_core::timing::{Timer, flow_timing};
use bf_core::{CoreError, Coord, PartId, Real, SegmentId, ensure_finite};
use bf_graph::{Network, SourceRef};

use crate::error::{SolverError, SolverResult};
use crate::flows::{FlowMap, add_flow};
use crate::friction::{PathFriction, Resolution, resolve};
use crate::path::build_source_path;
use crate::segment::SegmentTree;

/// Flow contributed by one source route.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceContribution {
    pub source: SourceRef,
    /// Reduced path seen from the source.
    pub friction: PathFriction,
    /// Total flow leaving the source, over all of its liquids.
    pub flow: Real,
    pub flows: FlowMap,
}

/// Solve one source in isolation.
///
/// `Ok(None)` when the source contributes nothing: no sink reachable or the
/// path pushes backwards (negative pressure difference). A source at zero
/// pressure difference contributes zero-valued entries along its path.
pub fn source_contribution(
    network: &Network,
    source: SourceRef,
) -> SolverResult<Option<SourceContribution>> {
    let route = network
        .source_route(source)
        .ok_or(SolverError::UnknownSource {
            part: source.part,
            entry: source.entry,
            route: source.route,
        })?;

    let timer = Timer::start("path build");
    let tree = build_source_path(network, source)?;
    timer.stop_into(&flow_timing::PATH_BUILD);
    let Some(tree) = tree else {
        return Ok(None);
    };

    let timer = Timer::start("friction resolve");
    let resolution = resolve(&tree, network)?;
    timer.stop_into(&flow_timing::FRICTION_RESOLVE);

    let total = resolution.total;
    if total.pressure_diff < 0.0 {
        tracing::trace!(part = source.part, entry = %source.entry, "source pushes backwards, skipped");
        return Ok(None);
    }
    // A zero pressure difference still marks where the liquid sits.
    let flow = ensure_finite(total.pressure_diff / total.friction, "source flow")?;

    let timer = Timer::start("flow apply");
    let mut flows = FlowMap::new();
    let mut distributor = Distributor {
        network,
        tree: &tree,
        resolution: &resolution,
        liquids: &route.liquids,
        share: 1.0 / route.liquids.len() as Real,
        out: &mut flows,
    };
    distributor.apply(tree.root(), flow, None)?;
    timer.stop_into(&flow_timing::FLOW_APPLY);

    tracing::debug!(
        part = source.part,
        entry = %source.entry,
        flow,
        friction = total.friction,
        "source solved"
    );
    Ok(Some(SourceContribution {
        source,
        friction: total,
        flow,
        flows,
    }))
}

/// Walks a resolved tree writing signed flows into a scratch map.
struct Distributor<'a> {
    network: &'a Network,
    tree: &'a SegmentTree,
    resolution: &'a Resolution,
    liquids: &'a [String],
    /// Fraction of the flow carried by each liquid.
    share: Real,
    out: &'a mut FlowMap,
}

impl Distributor<'_> {
    fn part_id(&self, part: usize) -> PartId {
        self.network
            .part(part)
            .map(|p| p.id.clone())
            .unwrap_or_default()
    }

    fn assign(&mut self, part: &PartId, coord: Coord, flow: Real) {
        for liquid in self.liquids {
            add_flow(self.out, part, coord, liquid, flow * self.share);
        }
    }

    /// `exit` is where flow leaves the part when a chain was cut short by
    /// reconvergence merging: the inbound coordinate of the shared tail.
    fn apply(&mut self, id: SegmentId, flow: Real, exit: Option<Coord>) -> SolverResult<()> {
        let tree = self.tree;
        let seg = &tree[id];
        if seg.is_terminal() {
            return Ok(());
        }
        let part = self.part_id(seg.part);
        self.assign(&part, seg.entry(), -flow);

        let next_entry = seg.next.map(|n| tree[n].entry());
        if !seg.splits.is_empty() {
            let block = self.resolution.block(id).ok_or(CoreError::Invariant {
                what: "parallel block was not resolved",
            })?;
            let shares = block.branch_flows(flow);
            let branch_exit = next_entry.or(exit);
            for (&split, share) in seg.splits.iter().zip(shares) {
                let share = ensure_finite(share, "branch flow")?;
                self.assign(&part, tree[split].entry(), share);
                self.apply(split, share, branch_exit)?;
            }
            if let Some(next) = seg.next {
                self.apply(next, flow, exit)?;
            }
        } else if let Some(next) = seg.next {
            if let Some(at) = next_entry {
                self.assign(&part, at, flow);
            }
            self.apply(next, flow, exit)?;
        } else if let Some(at) = exit {
            self.assign(&part, at, flow);
        }
        Ok(())
    }
}
