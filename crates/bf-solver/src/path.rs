//! Path builder: depth-first walk from an entry point to every reachable sink.
//!
//! Each branch carries its own set of traversed edges, so a branch never
//! walks an edge (or its reverse) twice while sibling branches stay free to
//! use it. Branches that reach no sink are dropped. Sibling branches that
//! end in identical tails are folded back together so the tail becomes the
//! reconvergence point of a parallel block.

use std::collections::{BTreeSet, HashSet};

use bf_core::{Coord, SegmentId};
use bf_graph::{Network, Route, SourceRef};

use crate::error::{SolverError, SolverResult};
use crate::segment::{Segment, SegmentTree, chain_end, same_shape};

/// Traversed `(from, to)` coordinate pairs of one branch.
type Visited = HashSet<(Coord, Coord)>;

/// Build the segment tree reachable from `entry` on part `part`.
///
/// Returns `Ok(None)` when no sink can be reached.
pub fn build_path(network: &Network, part: usize, entry: Coord) -> SolverResult<Option<SegmentTree>> {
    build(network, part, entry, None)
}

/// Build the segment tree of one liquid source: like [`build_path`], but the
/// first hop is restricted to the source route itself.
pub fn build_source_path(network: &Network, source: SourceRef) -> SolverResult<Option<SegmentTree>> {
    if network.source_route(source).is_none() {
        return Err(SolverError::UnknownSource {
            part: source.part,
            entry: source.entry,
            route: source.route,
        });
    }
    build(network, source.part, source.entry, Some(source.route))
}

fn build(
    network: &Network,
    part: usize,
    entry: Coord,
    only_route: Option<usize>,
) -> SolverResult<Option<SegmentTree>> {
    let mut builder = PathBuilder {
        network,
        nodes: Vec::new(),
    };
    let root_route = Route::new(entry).with_friction(0.0).as_internal();
    let Some(root) = builder.walk(part, root_route, &Visited::new(), only_route) else {
        tracing::trace!(part, %entry, "no sink reachable");
        return Ok(None);
    };
    let tree = SegmentTree::new(builder.nodes, root);
    tree.check_consistency(network)?;
    tracing::trace!(part, %entry, segments = tree.len(), "path built");
    Ok(Some(tree))
}

struct PathBuilder<'n> {
    network: &'n Network,
    nodes: Vec<Segment>,
}

impl PathBuilder<'_> {
    fn push(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId::from_index(self.nodes.len() as u32);
        self.nodes.push(segment);
        id
    }

    fn is_live(visited: &Visited, from: Coord, route: &Route) -> bool {
        !visited.contains(&(from, route.target))
    }

    /// First part in network order, other than `current`, with a live route
    /// leaving `coord`.
    fn adjacent(&self, current: usize, coord: Coord, visited: &Visited) -> Option<usize> {
        self.network.parts_at(coord).iter().copied().find(|&idx| {
            idx != current
                && self
                    .network
                    .routes(idx, coord)
                    .iter()
                    .any(|r| Self::is_live(visited, coord, r))
        })
    }

    fn walk(
        &mut self,
        part: usize,
        in_route: Route,
        visited: &Visited,
        only_route: Option<usize>,
    ) -> Option<SegmentId> {
        let network = self.network;
        let here = in_route.target;
        let live: Vec<&Route> = network
            .routes(part, here)
            .iter()
            .enumerate()
            .filter(|&(i, r)| only_route.is_none_or(|only| only == i) && Self::is_live(visited, here, r))
            .map(|(_, r)| r)
            .collect();
        if live.is_empty() {
            return None;
        }

        let mut branches = Vec::with_capacity(live.len());
        for route in live {
            if route.sink {
                let terminal = self.push(Segment {
                    part,
                    in_route: route.clone(),
                    next: None,
                    splits: Vec::new(),
                    sinks: BTreeSet::from([route.target]),
                    fanout: 0,
                    rejoins: false,
                });
                branches.push(terminal);
                continue;
            }

            let mut branch_visited = visited.clone();
            branch_visited.insert((here, route.target));
            branch_visited.insert((route.target, here));

            let next_part = if route.internal {
                Some(part)
            } else {
                self.adjacent(part, route.target, &branch_visited)
            };
            let Some(next_part) = next_part else {
                tracing::trace!(part, target = %route.target, "dead end");
                continue;
            };
            if let Some(child) = self.walk(next_part, route.clone(), &branch_visited, None) {
                branches.push(child);
            }
        }

        let fanout = branches.len();
        let mut distinct: Vec<SegmentId> = Vec::with_capacity(branches.len());
        for branch in branches {
            if !distinct.iter().any(|&d| same_shape(&self.nodes, d, branch)) {
                distinct.push(branch);
            }
        }
        if distinct.is_empty() {
            return None;
        }

        let sinks: BTreeSet<Coord> = distinct
            .iter()
            .flat_map(|&b| self.nodes[b.index() as usize].sinks.iter().copied())
            .collect();
        let (next, splits) = if distinct.len() == 1 {
            (Some(distinct[0]), Vec::new())
        } else {
            (self.merge_tails(&distinct), distinct)
        };

        Some(self.push(Segment {
            part,
            in_route,
            next,
            splits,
            sinks,
            fanout,
            rejoins: false,
        }))
    }

    /// Pop identical trailing segments off every branch and chain them into
    /// one shared tail, returned as the head of that tail.
    fn merge_tails(&mut self, heads: &[SegmentId]) -> Option<SegmentId> {
        let mut tail = None;
        loop {
            let mut ends = Vec::with_capacity(heads.len());
            for &head in heads {
                match chain_end(&self.nodes, head) {
                    (Some(prev), last) => ends.push((prev, last)),
                    (None, _) => return tail,
                }
            }
            let (_, keep) = ends[0];
            if !ends.iter().all(|&(_, last)| same_shape(&self.nodes, keep, last)) {
                return tail;
            }
            for &(prev, _) in &ends {
                let prev = &mut self.nodes[prev.index() as usize];
                prev.next = None;
                prev.rejoins = true;
            }
            let kept = &mut self.nodes[keep.index() as usize];
            kept.next = tail;
            kept.rejoins = false;
            tail = Some(keep);
        }
    }
}
