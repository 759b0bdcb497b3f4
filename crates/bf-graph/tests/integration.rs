//! Integration tests for bf-graph.

use bf_core::{Coord, PartId, Rotation, ShapeSize};
use bf_graph::{GraphError, NetworkBuilder, Placement, Route, StatePart, Transitions};

fn c(s: &str) -> Coord {
    s.parse().unwrap()
}

const LEFT: &str = "0,0.5,0";
const UP: &str = "0.5,0,0";
const RIGHT: &str = "1,0.5,0";
const CENTER: &str = "0.5,0.5,0";

fn part(id: &str, kind: &str, x: i32, y: i32, rotation: Rotation, transitions: Transitions) -> StatePart {
    StatePart {
        id: PartId::from(id),
        kind: kind.into(),
        placement: Placement::new(x, y, rotation, false, ShapeSize::UNIT),
        transitions,
    }
}

fn tube() -> Transitions {
    let mut t = Transitions::new();
    t.insert(c(LEFT), vec![Route::new(c(RIGHT))]);
    t.insert(c(RIGHT), vec![Route::new(c(LEFT))]);
    t
}

fn tee() -> Transitions {
    let mut t = Transitions::new();
    for edge in [LEFT, UP, RIGHT] {
        t.insert(
            c(edge),
            vec![Route::new(c(CENTER)).with_friction(0.5).as_internal()],
        );
    }
    t.insert(
        c(CENTER),
        [LEFT, UP, RIGHT]
            .iter()
            .map(|e| Route::new(c(e)).with_friction(0.5))
            .collect(),
    );
    t
}

#[test]
fn chain_shares_connection_points() {
    let network: NetworkBuilder = [
        part("t1", "StraightTube", 1, 2, Rotation::Deg0, tube()),
        part("t2", "StraightTube", 2, 2, Rotation::Deg0, tube()),
        part("t3", "StraightTube", 3, 2, Rotation::Deg180, tube()),
    ]
    .into_iter()
    .collect();
    let network = network.build().unwrap();

    assert_eq!(network.len(), 3);
    assert_eq!(network.parts_at(c("2,2.5,0")), &[0, 1]);
    assert_eq!(network.parts_at(c("3,2.5,0")), &[1, 2]);
    assert_eq!(network.routes(2, c("4,2.5,0"))[0].target, c("3,2.5,0"));
    assert_eq!(network.index().junctions().count(), 2);
}

#[test]
fn rotated_tee_opens_up_and_down() {
    let mut builder = NetworkBuilder::new();
    builder.add_part(part("tee", "TeeTube", 3, 2, Rotation::Deg270, tee()));
    let network = builder.build().unwrap();
    let tee = &network.parts()[0];

    let entries: Vec<String> = tee.transitions.keys().map(ToString::to_string).collect();
    assert_eq!(entries, ["3,2.5,0", "3.5,2,0", "3.5,2.5,0", "3.5,3,0"]);

    let from_center: Vec<String> = tee.transitions[&c("3.5,2.5,0")]
        .iter()
        .map(|r| r.target.to_string())
        .collect();
    assert_eq!(from_center, ["3.5,3,0", "3,2.5,0", "3.5,2,0"]);
}

#[test]
fn invalid_friction_names_the_part() {
    let mut t = tube();
    t.insert(c(CENTER), vec![Route::new(c(LEFT)).with_friction(f64::NAN)]);
    let mut builder = NetworkBuilder::new();
    builder.add_part(part("bad", "StraightTube", 0, 0, Rotation::Deg0, t));
    match builder.build() {
        Err(GraphError::InvalidFriction { part, entry, .. }) => {
            assert_eq!(part, PartId::from("bad"));
            assert_eq!(entry, c(CENTER));
        }
        other => panic!("expected invalid friction, got {other:?}"),
    }
}
