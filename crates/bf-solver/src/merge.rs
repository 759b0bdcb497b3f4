//! Flow merger: collapse opposite-direction contributions.
//!
//! Superposition can leave one coordinate with liquid flowing in and out at
//! the same time. Only the dominant direction survives, scaled down to the
//! net flow.

use bf_core::{PartId, Real, Tolerances, nearly_equal};

use crate::flows::{FlowMap, LiquidFlow, PartFlows};

/// Merge the liquids at one coordinate.
pub fn merge_liquid_flow(flow: &LiquidFlow) -> LiquidFlow {
    let positive_total: Real = flow.values().filter(|v| **v >= 0.0).sum();
    let negative_total: Real = flow.values().filter(|v| **v < 0.0).sum();
    let net = positive_total + negative_total;

    let mut merged: LiquidFlow = if positive_total != 0.0 && negative_total != 0.0 {
        let (keep_positive, side_total) = if positive_total >= -negative_total {
            (true, positive_total)
        } else {
            (false, negative_total)
        };
        let factor = net / side_total;
        flow.iter()
            .filter(|(_, v)| (**v >= 0.0) == keep_positive)
            .map(|(liquid, v)| (liquid.clone(), v * factor))
            .collect()
    } else {
        flow.clone()
    };

    if net != 0.0 {
        merged.retain(|_, v| *v != 0.0);
    }
    for v in merged.values_mut() {
        // Scaling a negative entry by zero yields -0.0.
        if *v == 0.0 {
            *v = 0.0;
        }
    }
    merged
}

pub fn merge_part_flows(flows: &PartFlows) -> PartFlows {
    flows
        .iter()
        .map(|(coord, liquids)| (*coord, merge_liquid_flow(liquids)))
        .collect()
}

pub fn merge_flows(map: &FlowMap) -> FlowMap {
    map.iter()
        .map(|(part, flows)| (part.clone(), merge_part_flows(flows)))
        .collect()
}

/// Sum of every entry of a part: zero for a part that neither sources nor
/// sinks liquid.
pub fn net_flow(flows: &PartFlows) -> Real {
    flows.values().flat_map(|liquids| liquids.values()).sum()
}

/// Parts whose net flow is not zero within `tol`, in id order.
pub fn unbalanced_parts(map: &FlowMap, tol: Tolerances) -> Vec<(PartId, Real)> {
    map.iter()
        .map(|(part, flows)| (part, net_flow(flows)))
        .filter(|(_, net)| !nearly_equal(*net, 0.0, tol))
        .map(|(part, net)| (part.clone(), net))
        .collect()
}
