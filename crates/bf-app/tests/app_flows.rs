//! Service layer end to end: layout text in, flows out.

use std::time::Duration;

use bf_app::{
    AppError, FlowOptions, FlowWorker, WorkerConfig, compute_flows, list_parts, load_layout,
    validate_layout,
};
use bf_core::{Coord, PartId};
use bf_parts::Registry;
use bf_project::{Layout, from_yaml_str};
use bf_solver::{ErrorPolicy, SolveOptions};

const PUMP_LINE: &str = r#"
version: 1
name: Pump line
parts:
  - id: in
    type: SystemIO
    x: 3
    y: 2
    rotate: 180
    settings: {enabled: true, pressure: 9, liquids: [WORT]}
  - id: pump
    type: Pump
    x: 2
    y: 2
    settings: {enabled: true, pressure: 12}
  - id: out
    type: SystemIO
    x: 1
    y: 2
"#;

fn c(s: &str) -> Coord {
    s.parse().unwrap()
}

fn pump_line() -> Layout {
    from_yaml_str(PUMP_LINE).unwrap()
}

#[test]
fn yaml_layout_to_flows() {
    let layout = pump_line();
    let registry = Registry::standard();
    validate_layout(&layout, &registry).unwrap();

    let response = compute_flows(&layout, &registry, &FlowOptions::default()).unwrap();
    assert!(response.failures.is_empty());
    assert!(response.unbalanced.is_empty());
    let pump = &response.flows[&PartId::from("pump")];
    assert!((pump[&c("2,2.5,0")]["WORT"] - 7.0).abs() < 1e-9);
}

#[test]
fn local_flows_are_anchor_relative() {
    let layout = pump_line();
    let options = FlowOptions {
        local: true,
        ..FlowOptions::default()
    };
    let response = compute_flows(&layout, &Registry::standard(), &options).unwrap();
    let pump = &response.flows[&PartId::from("pump")];
    assert!((pump[&c("0,0.5,0")]["WORT"] - 7.0).abs() < 1e-9);
    assert!((pump[&c("1,0.5,0")]["WORT"] + 7.0).abs() < 1e-9);
}

#[test]
fn unknown_part_type_names_the_part() {
    let mut layout = pump_line();
    layout.parts[1].kind = "Centrifuge".into();
    let err = compute_flows(&layout, &Registry::standard(), &FlowOptions::default()).unwrap_err();
    match err {
        AppError::Part { id, .. } => assert_eq!(id, "pump"),
        other => panic!("expected part error, got {other}"),
    }
}

#[test]
fn strict_options_surface_solver_errors() {
    // A kettle outlet straight into another kettle: no friction anywhere.
    let yaml = r#"
version: 1
name: Short circuit
parts:
  - {id: k1, type: Kettle, x: 0, y: 0, settings: {pressure: 5, liquids: [WORT], width: 1, height: 1}}
  - {id: k2, type: Kettle, x: 1, y: 0, settings: {width: 1, height: 1}}
"#;
    let layout = from_yaml_str(yaml).unwrap();
    let registry = Registry::standard();

    let lenient = compute_flows(&layout, &registry, &FlowOptions::default()).unwrap();
    assert_eq!(lenient.failures.len(), 1);
    assert_eq!(lenient.failures[0].part, PartId::from("k1"));

    let strict = FlowOptions {
        solve: SolveOptions::default().with_error_policy(ErrorPolicy::Abort),
        ..FlowOptions::default()
    };
    assert!(matches!(
        compute_flows(&layout, &registry, &strict),
        Err(AppError::Solver(_))
    ));
}

#[test]
fn layout_files_load_from_disk() {
    let path = std::env::temp_dir().join("bf_app_pump_line.yaml");
    std::fs::write(&path, PUMP_LINE).unwrap();
    let layout = load_layout(&path).unwrap();
    let parts = list_parts(&layout);
    assert_eq!(parts.len(), 3);
    assert!(parts[0].is_source);
    assert!(!parts[1].is_source);
    assert_eq!(parts[0].rotate, 180);
}

#[test]
fn worker_debounces_bursts() {
    let mut worker = FlowWorker::start(WorkerConfig {
        debounce: Duration::from_millis(100),
        ..WorkerConfig::default()
    });
    let mut last = 0;
    for _ in 0..5 {
        last = worker.request(pump_line()).unwrap();
    }
    assert_eq!(last, 5);

    let first = worker
        .results()
        .recv_timeout(Duration::from_secs(10))
        .unwrap();
    assert_eq!(first.generation, 5);
    assert!(first.result.is_ok());
    assert!(
        worker
            .results()
            .recv_timeout(Duration::from_millis(400))
            .is_err()
    );

    let next = worker.request(pump_line()).unwrap();
    let second = worker
        .results()
        .recv_timeout(Duration::from_secs(10))
        .unwrap();
    assert_eq!(second.generation, next);
    worker.shutdown();
}
