//! Integration tests for the Graph API
//!
//! These tests drive a graph through its public surface with a recording
//! renderer registered under the name `stub`.

use std::{cell::RefCell, rc::Rc};

use float_cmp::approx_eq;

use trellis::{
    ElementLike, Event, EventKind, Extension, ExtensionKind, Graph, Registry, Renderer,
    TrellisError,
    config::ExtensionConfig,
    data::{ElementSpec, GraphData},
    value::{Position, Value},
};

type Log = Rc<RefCell<Vec<(EventKind, Vec<String>)>>>;

struct StubRenderer {
    log: Log,
}

impl Renderer for StubRenderer {
    fn notify(&self, event: &Event) {
        let ids = event.ids().iter().map(ToString::to_string).collect();
        self.log.borrow_mut().push((event.kind(), ids));
    }
}

fn registry_with_stub() -> (Registry, Log) {
    let log: Log = Rc::default();
    let shared = Rc::clone(&log);
    let mut registry = Registry::with_builtins();
    registry.register(
        "stub",
        Extension::renderer(move |_| {
            Rc::new(StubRenderer {
                log: Rc::clone(&shared),
            }) as Rc<dyn Renderer>
        }),
    );
    (registry, log)
}

fn stub_graph(data: GraphData, layout: &str) -> (Graph, Log) {
    let (registry, log) = registry_with_stub();
    let graph = Graph::builder()
        .with_renderer(ExtensionConfig::new("stub"))
        .with_layout(ExtensionConfig::new(layout))
        .with_data(data)
        .build(&registry)
        .expect("Failed to build graph");
    log.borrow_mut().clear();
    (graph, log)
}

fn kinds(log: &Log) -> Vec<EventKind> {
    log.borrow().iter().map(|(kind, _)| *kind).collect()
}

fn two_nodes_one_edge() -> GraphData {
    GraphData::new(
        vec![ElementSpec::node("a"), ElementSpec::node("b")],
        vec![ElementSpec::edge("ab", "a", "b")],
    )
}

#[test]
fn test_build_with_initial_elements() {
    let registry = Registry::with_builtins();
    let graph = Graph::builder()
        .with_data(two_nodes_one_edge())
        .build(&registry)
        .expect("Failed to build graph");

    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.edges().len(), 1);
    assert_eq!(graph.node("a").unwrap().group(), "node");
    assert_eq!(graph.edge("ab").unwrap().group(), "edge");

    let edge = graph.edge("ab").expect("edge ab should exist");
    assert_eq!(edge.data("source"), Some(Value::from("a")));
    assert_eq!(edge.data("target"), Some(Value::from("b")));
    assert_eq!(edge.source(), graph.node("a"));
}

#[test]
fn test_add_node_notifies_once() {
    let (graph, log) = stub_graph(GraphData::default(), "preset");

    graph
        .add_node(ElementSpec::new().with_id("x"))
        .expect("Failed to add node");

    assert_eq!(*log.borrow(), [(EventKind::Add, vec!["x".to_string()])]);
}

#[test]
fn test_duplicate_id_is_rejected() {
    let (graph, log) = stub_graph(GraphData::default(), "preset");

    graph
        .add_node(ElementSpec::new().with_id("dup"))
        .expect("Failed to add node");
    let err = graph
        .add_node(ElementSpec::new().with_id("dup"))
        .expect_err("Second node with the same id should fail");

    assert!(matches!(err, TrellisError::DuplicateId { ref id, .. } if id == "dup"));
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_node_and_edge_ids_are_separate() {
    let (graph, _) = stub_graph(GraphData::default(), "preset");

    graph.add_node(ElementSpec::new().with_id("x")).unwrap();
    graph
        .add_edge(ElementSpec::edge("x", "x", "x"))
        .expect("Edge ids do not collide with node ids");
}

#[test]
fn test_unknown_layout_fails_before_loading() {
    let (registry, log) = registry_with_stub();

    let err = Graph::builder()
        .with_renderer(ExtensionConfig::new("stub"))
        .with_layout(ExtensionConfig::new("nonexistent"))
        .with_data(two_nodes_one_edge())
        .build(&registry)
        .expect_err("Unknown layout should fail");

    assert!(matches!(
        err,
        TrellisError::UnknownExtension {
            kind: ExtensionKind::Layout,
            ..
        }
    ));
    assert!(log.borrow().is_empty(), "No element should have been loaded");
}

#[test]
fn test_unknown_renderer_fails() {
    let err = Graph::builder()
        .with_renderer(ExtensionConfig::new("svg"))
        .build(&Registry::with_builtins())
        .expect_err("Unknown renderer should fail");

    assert_eq!(err.to_string(), "no renderer named `svg` is registered");
}

#[test]
fn test_extension_names_are_case_insensitive() {
    let (registry, _) = registry_with_stub();
    let graph = Graph::builder()
        .with_renderer(ExtensionConfig::new("STUB"))
        .with_layout(ExtensionConfig::new("Grid"))
        .build(&registry);

    assert!(graph.is_ok());
}

#[test]
fn test_layout_positions_emit_one_event() {
    let (mut graph, log) = stub_graph(
        GraphData::new(
            vec![
                ElementSpec::node("a"),
                ElementSpec::node("b"),
                ElementSpec::node("c"),
                ElementSpec::node("d"),
            ],
            vec![],
        ),
        "preset",
    );

    graph
        .layout(Some(
            ExtensionConfig::new("grid")
                .with_option("columns", 2)
                .with_option("spacing", 50.0),
        ))
        .expect("Failed to run layout");

    assert_eq!(kinds(&log), [EventKind::Position]);

    let d = graph.node("d").unwrap().position();
    assert!(approx_eq!(f64, d["x"], 50.0, ulps = 2));
    assert!(approx_eq!(f64, d["y"], 50.0, ulps = 2));
}

#[test]
fn test_preset_layout_moves_listed_nodes_only() {
    let (registry, _) = registry_with_stub();
    let positions = Value::Map(
        [(
            "a".to_string(),
            Value::from(Position::from([("x".to_string(), 7.5), ("y".to_string(), -2.0)])),
        )]
        .into_iter()
        .collect(),
    );

    let graph = Graph::builder()
        .with_renderer(ExtensionConfig::new("stub"))
        .with_layout(ExtensionConfig::new("preset").with_option("positions", positions))
        .with_data(two_nodes_one_edge())
        .build(&registry)
        .expect("Failed to build graph");

    let a = graph.node("a").unwrap().position();
    assert!(approx_eq!(f64, a["x"], 7.5, ulps = 2));
    assert!(approx_eq!(f64, a["y"], -2.0, ulps = 2));
    assert!(graph.node("b").unwrap().position().is_empty());
}

#[test]
fn test_remove_is_idempotent() {
    let (graph, log) = stub_graph(two_nodes_one_edge(), "preset");
    let node = graph.node("a").unwrap();

    node.remove();
    node.remove();
    graph.remove(&node);

    assert_eq!(*log.borrow(), [(EventKind::Remove, vec!["a".to_string()])]);
    assert!(graph.node("a").is_none());
    assert!(node.is_removed());
}

#[test]
fn test_reads_and_writes_are_copies() {
    let (graph, _) = stub_graph(GraphData::default(), "preset");

    let mut tags = Value::List(vec![Value::from("red")]);
    let node = graph
        .add_node(ElementSpec::node("a").with_data("tags", tags.clone()))
        .unwrap();

    if let Value::List(items) = &mut tags {
        items.push(Value::from("mutated"));
    }
    let mut read = node.data("tags").unwrap();
    if let Value::List(items) = &mut read {
        items.clear();
    }

    assert_eq!(
        node.data("tags"),
        Some(Value::List(vec![Value::from("red")]))
    );

    let mut position = Position::from([("x".to_string(), 1.0)]);
    node.set_position(position.clone());
    position.insert("x".to_string(), 99.0);
    assert_eq!(node.position()["x"], 1.0);
}

#[test]
fn test_collection_behaves_like_each_member() {
    let (single_graph, single_log) = stub_graph(two_nodes_one_edge(), "preset");
    let (many_graph, many_log) = stub_graph(two_nodes_one_edge(), "preset");

    let element = single_graph.node("a").unwrap();
    element.set_data("weight", 4).select().unwrap();

    let collection = many_graph.nodes();
    let returned = collection.set_data("weight", 4).select().unwrap();

    assert!(std::ptr::eq(returned, &collection));
    for member in &collection {
        assert_eq!(member.data("weight"), element.data("weight"));
        assert_eq!(member.is_selected(), element.is_selected());
    }
    assert_eq!(kinds(&single_log), kinds(&many_log));
    assert_eq!(collection.data("weight").len(), collection.len());
}

#[test]
fn test_listener_error_reaches_caller() {
    let (graph, _) = stub_graph(two_nodes_one_edge(), "preset");
    let node = graph.node("a").unwrap();

    node.bind("select", |_, _| Err("rejected".into()));
    let err = node.select().expect_err("Listener error should propagate");

    assert!(matches!(err, TrellisError::Listener { .. }));
    assert_eq!(err.to_string(), "listener for `select` failed: rejected");
    // The state change and the renderer notification happened before dispatch.
    assert!(node.is_selected());
}

#[test]
fn test_ids_are_not_reused_after_removal() {
    let (graph, _) = stub_graph(GraphData::default(), "preset");

    let first = graph.add_node(ElementSpec::new()).unwrap();
    let second = graph.add_node(ElementSpec::new()).unwrap();
    first.remove();
    let third = graph.add_node(ElementSpec::new()).unwrap();

    assert_eq!(first.id(), "n0");
    assert_eq!(second.id(), "n1");
    assert_eq!(third.id(), "n2");
}

#[test]
fn test_large_numeric_ids_stay_distinct() {
    let (graph, _) = stub_graph(GraphData::default(), "preset");

    let first = graph
        .add_node(ElementSpec::new().with_data("id", 1e20))
        .expect("Failed to add node");
    let second = graph
        .add_node(ElementSpec::new().with_data("id", 1e21))
        .expect("Distinct numeric ids should not collide");

    assert_eq!(first.id(), "100000000000000000000");
    assert_ne!(first.id(), second.id());
    assert_eq!(graph.nodes().len(), 2);
}

#[test]
fn test_generated_id_skips_explicit_ids() {
    let (graph, _) = stub_graph(GraphData::default(), "preset");

    graph.add_node(ElementSpec::new().with_id("n0")).unwrap();
    let generated = graph.add_node(ElementSpec::new()).unwrap();

    assert_eq!(generated.id(), "n1");
}

#[test]
fn test_reentrant_renderer() {
    struct Echo {
        graph_nodes: Rc<RefCell<Vec<trellis::Element>>>,
    }

    impl Renderer for Echo {
        fn notify(&self, event: &Event) {
            if event.kind() == EventKind::Add {
                for element in event.elements() {
                    // Reading and writing from inside a notification is allowed.
                    element.set_data("seen", true);
                    self.graph_nodes.borrow_mut().push(element.clone());
                }
            }
        }
    }

    let seen: Rc<RefCell<Vec<trellis::Element>>> = Rc::default();
    let shared = Rc::clone(&seen);
    let mut registry = Registry::with_builtins();
    registry.register(
        "echo",
        Extension::renderer(move |_| {
            Rc::new(Echo {
                graph_nodes: Rc::clone(&shared),
            }) as Rc<dyn Renderer>
        }),
    );

    let graph = Graph::builder()
        .with_renderer(ExtensionConfig::new("echo"))
        .with_layout(ExtensionConfig::new("preset"))
        .build(&registry)
        .expect("Failed to build graph");
    let node = graph.add_node(ElementSpec::node("a")).unwrap();

    assert_eq!(node.data("seen"), Some(Value::Bool(true)));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let registry = Registry::with_builtins();
    let graph = Graph::builder()
        .with_data(two_nodes_one_edge())
        .build(&registry)
        .expect("Failed to build graph");

    let format = registry
        .format(&ExtensionConfig::new("json"))
        .expect("json format is built in");
    let text = format.serialize(&graph.snapshot()).unwrap();
    let reloaded = Graph::builder()
        .with_data(format.parse(&text).unwrap())
        .build(&registry)
        .expect("Failed to rebuild graph");

    assert_eq!(reloaded.snapshot(), graph.snapshot());
}
