//! Flow maps produced by the solver.
//!
//! Flows are signed: negative where liquid enters a part through a
//! coordinate, positive where it leaves.

use std::collections::BTreeMap;

use bf_core::{Coord, PartId, Real};
use bf_graph::Network;

/// Liquid name -> flow at one coordinate.
pub type LiquidFlow = BTreeMap<String, Real>;

/// Coordinate -> flows of every liquid passing it, for one part.
pub type PartFlows = BTreeMap<Coord, LiquidFlow>;

/// Part id -> that part's flows.
pub type FlowMap = BTreeMap<PartId, PartFlows>;

/// Empty map with an entry for every part of `network`.
pub fn empty_flow_map(network: &Network) -> FlowMap {
    network
        .parts()
        .iter()
        .map(|p| (p.id.clone(), PartFlows::new()))
        .collect()
}

/// Add `flow` of `liquid` at `coord` on `part`.
pub fn add_flow(map: &mut FlowMap, part: &PartId, coord: Coord, liquid: &str, flow: Real) {
    let per_liquid = map
        .entry(part.clone())
        .or_default()
        .entry(coord)
        .or_default();
    match per_liquid.get_mut(liquid) {
        Some(v) => *v += flow,
        None => {
            per_liquid.insert(liquid.to_owned(), flow);
        }
    }
}

/// Sum `from` into `into`, entry by entry.
pub fn accumulate(into: &mut FlowMap, from: FlowMap) {
    for (part, coords) in from {
        let target = into.entry(part).or_default();
        for (coord, liquids) in coords {
            let slot = target.entry(coord).or_default();
            for (liquid, flow) in liquids {
                *slot.entry(liquid).or_insert(0.0) += flow;
            }
        }
    }
}
