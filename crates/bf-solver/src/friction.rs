//! Friction resolver.
//!
//! A path is reduced to one [`PathFriction`]: chains add in series, parallel
//! blocks reduce with Millman's theorem. Branches may carry their own driving
//! pressure (pumps inside a branch), so a block is a pair of equivalent
//! pressure and equivalent friction rather than a plain resistance.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use bf_core::{Real, SegmentId, Tolerances, nearly_equal};
use bf_graph::{Network, Route};

use crate::error::{SolverError, SolverResult};
use crate::segment::{Segment, SegmentTree};

/// Pressure difference driving a path and the friction opposing it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathFriction {
    pub pressure_diff: Real,
    pub friction: Real,
}

impl PathFriction {
    pub const ZERO: PathFriction = PathFriction::new(0.0, 0.0);

    pub const fn new(pressure_diff: Real, friction: Real) -> Self {
        Self {
            pressure_diff,
            friction,
        }
    }

    /// Contribution of a single route.
    pub fn of_route(route: &Route) -> Self {
        Self::new(route.pressure_or_zero(), route.friction_or_default())
    }

    /// `pressure_diff / friction`, or `None` for a frictionless path.
    pub fn flow(&self) -> Option<Real> {
        (self.friction != 0.0).then(|| self.pressure_diff / self.friction)
    }

    pub fn is_finite(&self) -> bool {
        self.pressure_diff.is_finite() && self.friction.is_finite()
    }
}

impl Add for PathFriction {
    type Output = PathFriction;

    fn add(self, rhs: PathFriction) -> PathFriction {
        PathFriction::new(
            self.pressure_diff + rhs.pressure_diff,
            self.friction + rhs.friction,
        )
    }
}

/// Series combination: pressures and frictions both add.
pub fn series(parts: impl IntoIterator<Item = PathFriction>) -> PathFriction {
    parts.into_iter().fold(PathFriction::ZERO, Add::add)
}

/// Why a parallel block cannot be reduced.
#[derive(Debug, Clone, PartialEq)]
pub enum Degenerate {
    NoBranches,
    /// Two frictionless branches drive different pressures.
    ConflictingShorts { first: Real, second: Real },
    NonFinite,
}

impl fmt::Display for Degenerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degenerate::NoBranches => write!(f, "parallel block without branches"),
            Degenerate::ConflictingShorts { first, second } => write!(
                f,
                "frictionless parallel branches at different pressures ({first} vs {second})"
            ),
            Degenerate::NonFinite => write!(f, "non-finite parallel reduction"),
        }
    }
}

/// A reduced parallel block together with its branches.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelBlock {
    pub branches: Vec<PathFriction>,
    /// Equivalent source: node potential `E` and friction `R`.
    pub equivalent: PathFriction,
}

impl ParallelBlock {
    fn is_shorted(&self) -> bool {
        self.equivalent.friction == 0.0
    }

    /// Split `total` flow through the block over its branches.
    ///
    /// Each branch carries `(I·R - E + p_i) / f_i`. With shorted branches
    /// present, the others carry `(p_i - E) / f_i` and the shorts divide what
    /// is left evenly.
    pub fn branch_flows(&self, total: Real) -> Vec<Real> {
        let eq = self.equivalent;
        if !self.is_shorted() {
            return self
                .branches
                .iter()
                .map(|b| (total * eq.friction - eq.pressure_diff + b.pressure_diff) / b.friction)
                .collect();
        }

        let mut flows: Vec<Real> = self
            .branches
            .iter()
            .map(|b| {
                if b.friction == 0.0 {
                    0.0
                } else {
                    (b.pressure_diff - eq.pressure_diff) / b.friction
                }
            })
            .collect();
        let shorts = self.branches.iter().filter(|b| b.friction == 0.0).count();
        let remainder = total - flows.iter().sum::<Real>();
        let each = remainder / shorts as Real;
        for (flow, branch) in flows.iter_mut().zip(&self.branches) {
            if branch.friction == 0.0 {
                *flow = each;
            }
        }
        flows
    }
}

/// Parallel combination via Millman's theorem.
///
/// `E = Σ(p_i/f_i) / Σ(1/f_i)`, `R = 1 / Σ(1/f_i)`. Frictionless branches
/// short the block: `R = 0` and `E` is their common pressure.
pub fn parallel(branches: &[PathFriction]) -> Result<ParallelBlock, Degenerate> {
    if branches.is_empty() {
        return Err(Degenerate::NoBranches);
    }
    if branches.iter().any(|b| !b.is_finite()) {
        return Err(Degenerate::NonFinite);
    }

    let mut shorts = branches.iter().filter(|b| b.friction == 0.0);
    let equivalent = if let Some(first) = shorts.next() {
        if let Some(other) = shorts.find(|b| {
            !nearly_equal(b.pressure_diff, first.pressure_diff, Tolerances::default())
        }) {
            return Err(Degenerate::ConflictingShorts {
                first: first.pressure_diff,
                second: other.pressure_diff,
            });
        }
        PathFriction::new(first.pressure_diff, 0.0)
    } else {
        let conductance: Real = branches.iter().map(|b| 1.0 / b.friction).sum();
        let weighted: Real = branches.iter().map(|b| b.pressure_diff / b.friction).sum();
        PathFriction::new(weighted / conductance, 1.0 / conductance)
    };

    if !equivalent.is_finite() {
        return Err(Degenerate::NonFinite);
    }
    Ok(ParallelBlock {
        branches: branches.to_vec(),
        equivalent,
    })
}

/// A resolved path: the total seen from the root and every parallel block
/// keyed by its branch-point segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub total: PathFriction,
    pub blocks: BTreeMap<SegmentId, ParallelBlock>,
}

impl Resolution {
    pub fn block(&self, id: SegmentId) -> Option<&ParallelBlock> {
        self.blocks.get(&id)
    }

    /// Flow through the root of the path.
    pub fn flow(&self) -> Option<Real> {
        self.total.flow()
    }
}

/// Reduce a whole segment tree.
///
/// Fails with [`SolverError::DegenerateNetwork`] when the path has no
/// friction at all or when any reduction is non-finite.
pub fn resolve(tree: &SegmentTree, network: &Network) -> SolverResult<Resolution> {
    let mut blocks = BTreeMap::new();
    let total = resolve_segment(tree, tree.root(), network, &mut blocks)?;
    let root = &tree[tree.root()];
    if !total.is_finite() {
        return Err(degenerate(network, root, "non-finite path friction".into()));
    }
    if total.friction == 0.0 {
        return Err(degenerate(network, root, "path has zero total friction".into()));
    }
    Ok(Resolution { total, blocks })
}

fn resolve_segment(
    tree: &SegmentTree,
    id: SegmentId,
    network: &Network,
    blocks: &mut BTreeMap<SegmentId, ParallelBlock>,
) -> SolverResult<PathFriction> {
    let seg = &tree[id];
    let mut total = PathFriction::of_route(&seg.in_route);

    if !seg.splits.is_empty() {
        let branches = seg
            .splits
            .iter()
            .map(|&split| resolve_segment(tree, split, network, blocks))
            .collect::<SolverResult<Vec<_>>>()?;
        let block = parallel(&branches).map_err(|d| degenerate(network, seg, d.to_string()))?;
        total = total + block.equivalent;
        blocks.insert(id, block);
    }

    if let Some(next) = seg.next {
        total = total + resolve_segment(tree, next, network, blocks)?;
    }
    Ok(total)
}

fn degenerate(network: &Network, seg: &Segment, what: String) -> SolverError {
    SolverError::DegenerateNetwork {
        part: network
            .part(seg.part)
            .map(|p| p.id.clone())
            .unwrap_or_default(),
        coord: seg.entry(),
        what,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn series_adds_both_terms() {
        let total = series([
            PathFriction::new(10.0, 1.0),
            PathFriction::new(0.0, 0.5),
            PathFriction::new(-2.0, 2.0),
        ]);
        assert_eq!(total, PathFriction::new(8.0, 3.5));
        assert_eq!(series([]), PathFriction::ZERO);
    }

    #[test]
    fn passive_branches_reduce_to_parallel_resistance() {
        let block = parallel(&[PathFriction::new(0.0, 2.0), PathFriction::new(0.0, 2.0)]).unwrap();
        assert!((block.equivalent.friction - 1.0).abs() < TOL);
        assert_eq!(block.equivalent.pressure_diff, 0.0);
        assert_eq!(block.branch_flows(4.0), [2.0, 2.0]);
    }

    #[test]
    fn passive_split_follows_conductance() {
        let block = parallel(&[PathFriction::new(0.0, 1.0), PathFriction::new(0.0, 3.0)]).unwrap();
        let flows = block.branch_flows(4.0);
        assert!((flows[0] - 3.0).abs() < TOL);
        assert!((flows[1] - 1.0).abs() < TOL);
    }

    #[test]
    fn driven_branch_pushes_more() {
        // Millman: E = (6/1 + 0/1) / 2 = 3, R = 0.5.
        let block = parallel(&[PathFriction::new(6.0, 1.0), PathFriction::new(0.0, 1.0)]).unwrap();
        assert!((block.equivalent.pressure_diff - 3.0).abs() < TOL);
        assert!((block.equivalent.friction - 0.5).abs() < TOL);
        // With no outer flow the pump just circulates through the block.
        let flows = block.branch_flows(0.0);
        assert!((flows[0] - 3.0).abs() < TOL);
        assert!((flows[1] + 3.0).abs() < TOL);
    }

    #[test]
    fn shorted_block_sends_everything_through_the_short() {
        let block = parallel(&[PathFriction::new(0.0, 1.0), PathFriction::new(0.0, 0.0)]).unwrap();
        assert_eq!(block.equivalent, PathFriction::ZERO);
        assert_eq!(block.branch_flows(5.0), [0.0, 5.0]);
    }

    #[test]
    fn conflicting_shorts_are_degenerate() {
        let err =
            parallel(&[PathFriction::new(1.0, 0.0), PathFriction::new(2.0, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            Degenerate::ConflictingShorts {
                first: 1.0,
                second: 2.0
            }
        );
        assert_eq!(parallel(&[]).unwrap_err(), Degenerate::NoBranches);
        assert_eq!(
            parallel(&[PathFriction::new(Real::NAN, 1.0)]).unwrap_err(),
            Degenerate::NonFinite
        );
    }

    #[test]
    fn flow_requires_friction() {
        assert_eq!(PathFriction::new(10.0, 4.0).flow(), Some(2.5));
        assert_eq!(PathFriction::new(10.0, 0.0).flow(), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn branch_flows_sum_to_total(
                branches in prop::collection::vec((-20.0..20.0f64, 0.1..10.0f64), 1..6),
                total in -50.0..50.0f64,
            ) {
                let branches: Vec<PathFriction> = branches
                    .into_iter()
                    .map(|(p, f)| PathFriction::new(p, f))
                    .collect();
                let block = parallel(&branches).unwrap();
                let sum: f64 = block.branch_flows(total).iter().sum();
                prop_assert!((sum - total).abs() < 1e-6 * (1.0 + total.abs()));
            }

            #[test]
            fn identical_branches_share_evenly(
                n in 2usize..6,
                friction in 0.1..10.0f64,
                total in 0.0..50.0f64,
            ) {
                let block = parallel(&vec![PathFriction::new(0.0, friction); n]).unwrap();
                for flow in block.branch_flows(total) {
                    prop_assert!((flow - total / n as f64).abs() < 1e-9 * (1.0 + total));
                }
            }
        }
    }
}
