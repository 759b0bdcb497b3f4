//! Segment trees built by the path builder.
//!
//! A segment is one hop of a path: the part being entered and the route that
//! led into it. Segments are stored in an arena and linked by [`SegmentId`].
//! A segment continues either with a single `next` or with parallel
//! `splits`. After reconvergence both are present: the splits form a
//! parallel block that rejoins at `next`.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::ops::Index;

use bf_core::{Coord, SegmentId};
use bf_graph::{Network, Route};

use crate::error::{SolverError, SolverResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Index of the part in the network.
    pub part: usize,
    /// Route that entered this segment; its target is the entry coordinate.
    pub in_route: Route,
    pub next: Option<SegmentId>,
    pub splits: Vec<SegmentId>,
    /// Sink coordinates reachable from here.
    pub sinks: BTreeSet<Coord>,
    /// Live continuations that reached a sink, counted before identical
    /// branches were folded and before reconvergence merging.
    pub fanout: usize,
    /// The continuation was handed to the enclosing block's shared tail.
    pub rejoins: bool,
}

impl Segment {
    pub fn entry(&self) -> Coord {
        self.in_route.target
    }

    /// Entered through a sink route; flow leaves the network here.
    pub fn is_terminal(&self) -> bool {
        self.in_route.sink
    }
}

/// Arena of segments with a designated root.
#[derive(Debug, Clone)]
pub struct SegmentTree {
    nodes: Vec<Segment>,
    root: SegmentId,
}

impl SegmentTree {
    pub(crate) fn new(nodes: Vec<Segment>, root: SegmentId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> SegmentId {
        self.root
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.nodes.get(id.index() as usize)
    }

    /// Number of segments in the arena, including unreachable ones left
    /// behind by reconvergence merging.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sinks reachable from the root.
    pub fn sinks(&self) -> &BTreeSet<Coord> {
        &self[self.root].sinks
    }

    /// Reachable segments in depth-first order (splits before `next`),
    /// paired with their nesting depth.
    pub fn preorder(&self) -> Vec<(usize, SegmentId)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self.root)];
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            let seg = &self[id];
            if let Some(next) = seg.next {
                stack.push((depth, next));
            }
            for &split in seg.splits.iter().rev() {
                stack.push((depth + 1, split));
            }
        }
        out
    }

    /// One line per reachable segment: `part-id @ entry`, indented by depth.
    pub fn describe(&self, network: &Network) -> String {
        let mut out = String::new();
        for (depth, id) in self.preorder() {
            let seg = &self[id];
            let name = network.part(seg.part).map_or("?", |p| p.id.as_str());
            let _ = write!(out, "{:indent$}{name} @ {}", "", seg.entry(), indent = depth * 2);
            if seg.is_terminal() {
                out.push_str(" [sink]");
            }
            out.push('\n');
        }
        out
    }

    /// Every reachable non-sink segment must carry its live continuations:
    /// as a parallel block of at least two splits (never more than were
    /// live), or as a single `next` or shared tail.
    pub fn check_consistency(&self, network: &Network) -> SolverResult<()> {
        for (_, id) in self.preorder() {
            let seg = &self[id];
            if seg.is_terminal() {
                continue;
            }
            let carried = if seg.splits.is_empty() {
                seg.next.is_some() || seg.rejoins
            } else {
                seg.splits.len() >= 2 && seg.splits.len() <= seg.fanout
            };
            if seg.fanout == 0 || !carried {
                let part = network
                    .part(seg.part)
                    .map(|p| p.id.clone())
                    .unwrap_or_default();
                return Err(SolverError::TopologyInconsistency {
                    part,
                    coord: seg.entry(),
                    live: seg.fanout,
                    splits: seg.splits.len(),
                });
            }
        }
        Ok(())
    }
}

impl Index<SegmentId> for SegmentTree {
    type Output = Segment;

    fn index(&self, id: SegmentId) -> &Segment {
        &self.nodes[id.index() as usize]
    }
}

/// Same parts entered through the same routes, same sinks, all the way down.
pub(crate) fn same_shape(nodes: &[Segment], a: SegmentId, b: SegmentId) -> bool {
    if a == b {
        return true;
    }
    let (sa, sb) = (&nodes[a.index() as usize], &nodes[b.index() as usize]);
    if sa.part != sb.part
        || sa.in_route != sb.in_route
        || sa.sinks != sb.sinks
        || sa.splits.len() != sb.splits.len()
    {
        return false;
    }
    let next_same = match (sa.next, sb.next) {
        (None, None) => true,
        (Some(x), Some(y)) => same_shape(nodes, x, y),
        _ => false,
    };
    next_same
        && sa
            .splits
            .iter()
            .zip(&sb.splits)
            .all(|(&x, &y)| same_shape(nodes, x, y))
}

/// Last segment of the `next` chain starting at `head`, with its
/// predecessor (`None` when the chain is only the head).
pub(crate) fn chain_end(nodes: &[Segment], head: SegmentId) -> (Option<SegmentId>, SegmentId) {
    let mut prev = None;
    let mut cur = head;
    while let Some(next) = nodes[cur.index() as usize].next {
        prev = Some(cur);
        cur = next;
    }
    (prev, cur)
}
