//! End-to-end scenarios on hand-built networks.

use bf_core::{Coord, PartId, Rotation, ShapeSize, Tolerances};
use bf_graph::{Network, NetworkBuilder, Placement, Route, StatePart, Transitions};
use bf_solver::flows::{FlowMap, accumulate, empty_flow_map};
use bf_solver::{
    SolverError, calculate_flows, merge_flows, net_flow, source_contribution, unbalanced_parts,
};

fn c(s: &str) -> Coord {
    s.parse().unwrap()
}

fn part(id: &str, routes: &[(&str, Route)]) -> StatePart {
    let mut transitions = Transitions::new();
    for (from, route) in routes {
        transitions
            .entry(c(from))
            .or_insert_with(Vec::new)
            .push(route.clone());
    }
    StatePart {
        id: PartId::from(id),
        kind: "Test".into(),
        placement: Placement::new(0, 0, Rotation::Deg0, false, ShapeSize::UNIT),
        transitions,
    }
}

fn network(parts: Vec<StatePart>) -> Network {
    parts.into_iter().collect::<NetworkBuilder>().build().unwrap()
}

fn flow(map: &FlowMap, part: &str, coord: &str, liquid: &str) -> f64 {
    map[&PartId::from(part)][&c(coord)][liquid]
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn straight_pipe() -> Network {
    straight_pipe_at(10.0)
}

fn straight_pipe_at(pressure: f64) -> Network {
    network(vec![
        part(
            "S",
            &[(
                "0,0,0",
                Route::new(c("1,0,0"))
                    .with_friction(0.0)
                    .with_pressure(pressure)
                    .as_source()
                    .with_liquids(["wort"]),
            )],
        ),
        part("P", &[("1,0,0", Route::new(c("2,0,0")))]),
        part(
            "K",
            &[("2,0,0", Route::new(c("3,0,0")).with_friction(0.0).as_sink())],
        ),
    ])
}

/// Feed of friction 0.5 into two parallel pipes of friction 1 that rejoin
/// before the drain.
fn parallel_pipes() -> Network {
    network(vec![
        part(
            "S",
            &[(
                "0,1,0",
                Route::new(c("1,1,0"))
                    .with_friction(0.5)
                    .with_pressure(10.0)
                    .as_source()
                    .with_liquids(["wort"]),
            )],
        ),
        part(
            "T1",
            &[
                ("1,1,0", Route::new(c("2,0,0")).with_friction(0.0)),
                ("1,1,0", Route::new(c("2,2,0")).with_friction(0.0)),
            ],
        ),
        part(
            "P1",
            &[
                ("2,0,0", Route::new(c("3,0,0"))),
                ("3,0,0", Route::new(c("2,0,0"))),
            ],
        ),
        part(
            "P2",
            &[
                ("2,2,0", Route::new(c("3,2,0"))),
                ("3,2,0", Route::new(c("2,2,0"))),
            ],
        ),
        part(
            "T2",
            &[
                ("3,0,0", Route::new(c("4,1,0")).with_friction(0.0)),
                ("3,2,0", Route::new(c("4,1,0")).with_friction(0.0)),
            ],
        ),
        part(
            "K",
            &[("4,1,0", Route::new(c("5,1,0")).with_friction(0.0).as_sink())],
        ),
    ])
}

/// Two equal sources pushing into opposite ends of one pipe; each end
/// drains what arrives from the other side.
fn opposing_sources() -> Network {
    let source = |liquid: &str, to: &str| {
        Route::new(c(to))
            .with_friction(0.0)
            .with_pressure(10.0)
            .as_source()
            .with_liquids([liquid])
    };
    network(vec![
        part(
            "A",
            &[
                ("0,0,0", source("cold", "1,0,0")),
                ("1,0,0", Route::new(c("0.5,0,0")).with_friction(0.0).as_sink()),
            ],
        ),
        part(
            "P",
            &[
                ("1,0,0", Route::new(c("2,0,0"))),
                ("2,0,0", Route::new(c("1,0,0"))),
            ],
        ),
        part(
            "B",
            &[
                ("3,0,0", source("hot", "2,0,0")),
                ("2,0,0", Route::new(c("2.5,0,0")).with_friction(0.0).as_sink()),
            ],
        ),
    ])
}

#[test]
fn straight_pipe_carries_pressure_over_friction() {
    let flows = calculate_flows(&straight_pipe()).unwrap();
    assert_close(flow(&flows, "P", "1,0,0", "wort"), -10.0);
    assert_close(flow(&flows, "P", "2,0,0", "wort"), 10.0);
    assert_close(flow(&flows, "K", "3,0,0", "wort"), 10.0);
}

#[test]
fn still_source_marks_its_path_with_zero_flow() {
    let net = straight_pipe_at(0.0);
    let source = net.sources().next().unwrap();
    let contribution = source_contribution(&net, source).unwrap().unwrap();
    assert_eq!(contribution.flow, 0.0);

    let flows = calculate_flows(&net).unwrap();
    for (part, coord) in [("P", "1,0,0"), ("P", "2,0,0"), ("K", "3,0,0")] {
        let liquids = &flows[&PartId::from(part)][&c(coord)];
        assert_eq!(liquids.get("wort"), Some(&0.0), "{part} at {coord}");
        assert!(liquids["wort"].is_sign_positive(), "{part} at {coord}");
    }
}

#[test]
fn chains_conserve_flow() {
    let flows = calculate_flows(&straight_pipe()).unwrap();
    assert!(unbalanced_parts(&flows, Tolerances::default()).is_empty());
    for part in ["S", "P", "K"] {
        assert_close(net_flow(&flows[&PartId::from(part)]), 0.0);
    }
}

#[test]
fn parallel_pipes_split_evenly_and_rejoin() {
    let net = parallel_pipes();
    let source = net.sources().next().unwrap();
    let contribution = source_contribution(&net, source).unwrap().unwrap();
    assert_close(contribution.friction.friction, 1.0);
    assert_close(contribution.flow, 10.0);

    let flows = calculate_flows(&net).unwrap();
    assert_close(flow(&flows, "T1", "2,0,0", "wort"), 5.0);
    assert_close(flow(&flows, "T1", "2,2,0", "wort"), 5.0);
    assert_close(flow(&flows, "P1", "3,0,0", "wort"), 5.0);
    assert_close(flow(&flows, "P2", "3,2,0", "wort"), 5.0);
    assert_close(flow(&flows, "T2", "4,1,0", "wort"), 10.0);
    assert_close(flow(&flows, "K", "4,1,0", "wort"), -10.0);
}

#[test]
fn frictionless_loop_is_degenerate() {
    let net = network(vec![
        part(
            "S",
            &[
                (
                    "0,0,0",
                    Route::new(c("1,0,0"))
                        .with_friction(0.0)
                        .with_pressure(10.0)
                        .as_source()
                        .with_liquids(["wort"]),
                ),
                ("2,0,0", Route::new(c("0.5,0,0")).with_friction(0.0).as_sink()),
            ],
        ),
        part(
            "L",
            &[("1,0,0", Route::new(c("2,0,0")).with_friction(0.0))],
        ),
    ]);
    match calculate_flows(&net) {
        Err(SolverError::DegenerateNetwork { part, .. }) => assert_eq!(part, PartId::from("S")),
        other => panic!("expected a degenerate network, got {other:?}"),
    }
}

#[test]
fn opposing_sources_cancel() {
    let flows = calculate_flows(&opposing_sources()).unwrap();
    let pipe = &flows[&PartId::from("P")];
    assert_close(net_flow(pipe), 0.0);
    for liquids in pipe.values() {
        assert!(liquids.values().all(|v| *v == 0.0), "{liquids:?}");
    }
}

#[test]
fn recalculation_is_bit_identical() {
    let net = parallel_pipes();
    let first = calculate_flows(&net).unwrap();
    let second = calculate_flows(&net).unwrap();
    assert_eq!(first, second);
}

#[test]
fn independent_sources_add_up() {
    let net = opposing_sources();
    let mut total = empty_flow_map(&net);
    for source in net.sources() {
        let contribution = source_contribution(&net, source).unwrap().unwrap();
        assert_close(contribution.flow, 10.0);
        accumulate(&mut total, contribution.flows);
    }
    // Before merging both directions are still visible on the pipe.
    assert_close(flow(&total, "P", "1,0,0", "cold"), -10.0);
    assert_close(flow(&total, "P", "1,0,0", "hot"), 10.0);

    assert_eq!(merge_flows(&total), calculate_flows(&net).unwrap());
}
