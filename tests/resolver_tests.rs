//! Walker contract tests: capability priority, failure sentinels, and
//! reserved-root selection.

use chronopath::graph::{ObjectNode, Value};
use chronopath::path::PropertyPath;
use chronopath::resolve::{Accessor, Resolution, Resolver, RootChoice, RootRegistry};
use im::HashMap;

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<HashMap<_, _>>(),
    )
}

/// A scene shaped like the host's: objects under an attribute, each object
/// carrying attributes, custom properties, and a location vector.
fn sample_scene() -> Value {
    let cube = ObjectNode::animated()
        .with_attr(
            "location",
            Value::List(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ]),
        )
        .with_attr("name", Value::String("Cube".into()))
        .with_prop("name", Value::String("shadowed".into()))
        .with_prop("date", Value::Number(0.0));
    Value::Object(
        ObjectNode::new().with_attr("objects", map(&[("Cube", Value::Object(cube))])),
    )
}

fn resolve(path: &str, root: &Value) -> Resolution {
    let registry = RootRegistry::new();
    Resolver::new(&registry).resolve(&PropertyPath::parse(path), root)
}

#[test]
fn empty_path_is_unresolved() {
    assert_eq!(resolve("", &sample_scene()), Resolution::Unresolved);
}

#[test]
fn walks_attr_key_and_index() {
    let scene = sample_scene();
    let resolution = resolve("objects[\"Cube\"].location.1", &scene);
    let slot = resolution.slot().expect("path should resolve");
    assert_eq!(slot.value(), &Value::Number(2.0));
    assert_eq!(slot.accessor(), &Accessor::Index(1));
    assert_eq!(
        slot.parent_trace(),
        &[
            Accessor::Attr("objects".into()),
            Accessor::Key("Cube".into()),
            Accessor::Attr("location".into()),
        ]
    );
}

#[test]
fn attribute_wins_over_key_of_same_name() {
    let scene = sample_scene();
    let slot = resolve("objects[\"Cube\"].name", &scene)
        .into_slot()
        .expect("path should resolve");
    assert_eq!(slot.value(), &Value::String("Cube".into()));
    assert_eq!(slot.accessor(), &Accessor::Attr("name".into()));
}

#[test]
fn out_of_bounds_index_is_unresolved() {
    let scene = sample_scene();
    assert_eq!(
        resolve("objects[\"Cube\"].location.5", &scene),
        Resolution::Unresolved
    );
}

#[test]
fn non_numeric_index_on_sequence_is_unresolved() {
    let scene = sample_scene();
    assert_eq!(
        resolve("objects[\"Cube\"].location.x", &scene),
        Resolution::Unresolved
    );
}

#[test]
fn missing_attribute_fails_without_attempting_later_segments() {
    let scene = sample_scene();
    assert_eq!(
        resolve("objects[\"Missing\"].location.0", &scene),
        Resolution::Unresolved
    );
}

#[test]
fn scalar_mid_path_is_unresolved() {
    let scene = sample_scene();
    assert_eq!(
        resolve("objects[\"Cube\"].location.0.deeper", &scene),
        Resolution::Unresolved
    );
}

#[test]
fn terminal_missing_key_is_a_valid_unset_target() {
    // Distinct from a failed walk: the container supports keys, the key just
    // is not set yet.
    let root = map(&[]);
    let slot = resolve("[\"x\"]", &root)
        .into_slot()
        .expect("unset key on a mapping should still resolve");
    assert!(slot.value().is_nil());
    assert_eq!(slot.accessor(), &Accessor::Key("x".into()));
    assert!(slot.parent_trace().is_empty());
}

#[test]
fn intermediate_missing_key_is_unresolved() {
    let root = map(&[]);
    assert_eq!(resolve("[\"x\"].deeper", &root), Resolution::Unresolved);
}

#[test]
fn registered_root_token_selects_that_root() {
    let subgraph = map(&[("x", Value::Number(7.0))]);
    let mut registry = RootRegistry::new();
    registry
        .register("bpy", Value::Object(ObjectNode::new().with_attr("data", subgraph.clone())))
        .expect("token registers");
    let resolver = Resolver::new(&registry);

    let through_root = resolver
        .resolve(&PropertyPath::parse("bpy.data[\"x\"]"), &Value::Nil)
        .into_slot()
        .expect("registered root path resolves");
    assert_eq!(through_root.root(), &RootChoice::Registered("bpy".into()));

    // Same target reached by handing the subgraph over as the default root.
    let direct = resolver
        .resolve(&PropertyPath::parse("[\"x\"]"), &subgraph)
        .into_slot()
        .expect("direct path resolves");
    assert_eq!(direct.root(), &RootChoice::Default);
    assert_eq!(through_root.value(), direct.value());
}

#[test]
fn bare_root_token_addresses_no_slot() {
    let mut registry = RootRegistry::new();
    registry.register("bpy", map(&[])).expect("token registers");
    let resolution = Resolver::new(&registry).resolve(&PropertyPath::parse("bpy"), &Value::Nil);
    assert_eq!(resolution, Resolution::Unresolved);
}

#[test]
fn registry_rejects_empty_and_duplicate_tokens() {
    let mut registry = RootRegistry::new();
    assert!(registry.register("", Value::Nil).is_err());
    registry.register("bpy", Value::Nil).expect("first registration");
    assert!(registry.register("bpy", Value::Nil).is_err());
}
