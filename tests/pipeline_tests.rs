//! End-to-end pipeline tests: tokenize, resolve, write, keyframe, plus the
//! writer's silent no-op behavior and dependent refresh.

use chronopath::calendar::CalendarProps;
use chronopath::engine::{Engine, Scene, WriteOutcome};
use chronopath::graph::{ObjectNode, Value};
use chronopath::path::PropertyPath;
use chronopath::resolve::{Accessor, Resolver, RootRegistry};
use chronopath::write::write_slot;
use im::HashMap;

fn empty_map() -> Value {
    Value::Map(HashMap::new())
}

fn scene_with_cube() -> Scene {
    let cube = ObjectNode::animated()
        .with_attr(
            "location",
            Value::List(vec![
                Value::Number(0.0),
                Value::Number(0.0),
                Value::Number(0.0),
            ]),
        )
        .with_prop("date", Value::Number(0.0));
    let mut objects = HashMap::new();
    objects.insert("Cube".to_string(), Value::Object(cube));
    let root = Value::Object(ObjectNode::new().with_attr("objects", Value::Map(objects)));
    Scene::new(root).with_frame(42)
}

#[test]
fn write_into_empty_map_creates_the_key() {
    let mut engine = Engine::new(Scene::new(empty_map()));
    let outcome = engine.set_keyframe_with_path("[\"x\"]", Value::Number(1_700_000_000.0));
    // A plain mapping cannot record keyframes.
    assert_eq!(outcome, WriteOutcome::Written { keyframed: false });

    let slot = engine
        .resolve("[\"x\"]")
        .into_slot()
        .expect("written key should resolve");
    assert_eq!(slot.value(), &Value::Number(1_700_000_000.0));
    assert_eq!(slot.accessor(), &Accessor::Key("x".into()));
    assert!(slot.parent_trace().is_empty());
}

#[test]
fn write_read_round_trip_through_a_deep_path() {
    let mut engine = Engine::new(scene_with_cube());
    let path = "objects[\"Cube\"].location.2";
    let outcome = engine.set_keyframe_with_path(path, Value::Number(9.5));
    assert!(outcome.is_written());

    let slot = engine.resolve(path).into_slot().expect("slot resolves");
    assert_eq!(slot.value(), &Value::Number(9.5));
}

#[test]
fn write_prefers_the_attribute_over_a_prop_of_the_same_name() {
    let cube = ObjectNode::animated()
        .with_attr("name", Value::String("Cube".into()))
        .with_prop("name", Value::String("shadowed".into()));
    let mut objects = HashMap::new();
    objects.insert("Cube".to_string(), Value::Object(cube));
    let root = Value::Object(ObjectNode::new().with_attr("objects", Value::Map(objects)));
    let mut engine = Engine::new(Scene::new(root));

    let outcome =
        engine.set_keyframe_with_path("objects[\"Cube\"].name", Value::String("Renamed".into()));
    assert!(outcome.is_written());

    let cube = engine
        .resolve("objects[\"Cube\"]")
        .into_slot()
        .expect("cube resolves")
        .value()
        .clone();
    let object = cube.as_object().expect("cube is an object");
    // The writable attribute wins; the same-named prop is untouched.
    assert_eq!(object.attrs.get("name"), Some(&Value::String("Renamed".into())));
    assert_eq!(
        object.props.get("name"),
        Some(&Value::String("shadowed".into()))
    );
}

#[test]
fn writing_an_object_prop_records_a_keyframe() {
    let mut engine = Engine::new(scene_with_cube());
    let outcome =
        engine.set_keyframe_with_path("objects[\"Cube\"][\"date\"]", Value::Number(123.0));
    assert_eq!(outcome, WriteOutcome::Written { keyframed: true });

    let cube = engine
        .resolve("objects[\"Cube\"]")
        .into_slot()
        .expect("cube resolves")
        .value()
        .clone();
    let object = cube.as_object().expect("cube is an object");
    let animation = object.animation.as_ref().expect("cube is animated");
    assert_eq!(animation.keyframes.len(), 1);
    let keyframe = &animation.keyframes[0];
    assert_eq!(keyframe.data_path, "[\"date\"]");
    assert_eq!(keyframe.frame, 42);
    // The keyframe samples the value the write just landed.
    assert_eq!(keyframe.value, Value::Number(123.0));
}

#[test]
fn unresolvable_path_leaves_the_graph_untouched() {
    let mut engine = Engine::new(scene_with_cube());
    let before = engine.scene.root.clone();
    let outcome = engine.set_keyframe_with_path("objects[\"Missing\"].x", Value::Number(1.0));
    assert_eq!(outcome, WriteOutcome::Unresolved);
    assert_eq!(engine.scene.root, before);
}

#[test]
fn stale_slot_write_is_a_silent_no_op() {
    // Resolve against one graph, write against another whose list shrank:
    // the trace no longer reaches a container, so nothing happens.
    let long = Value::List(vec![Value::Number(1.0), Value::Number(2.0)]);
    let mut objects = HashMap::new();
    objects.insert("items".to_string(), long);
    let root = Value::Map(objects);

    let registry = RootRegistry::new();
    let slot = Resolver::new(&registry)
        .resolve(&PropertyPath::parse("[\"items\"].1"), &root)
        .into_slot()
        .expect("index 1 resolves against the long list");

    let mut shrunk = HashMap::new();
    shrunk.insert("items".to_string(), Value::List(vec![Value::Number(1.0)]));
    let stale_root = Value::Map(shrunk);

    assert_eq!(
        write_slot(&stale_root, slot.parent_trace(), slot.accessor(), Value::Nil),
        None
    );
}

#[test]
fn scalar_container_swallows_the_write() {
    assert_eq!(
        write_slot(
            &Value::Number(5.0),
            &[],
            &Accessor::Key("x".into()),
            Value::Nil
        ),
        None
    );
}

#[test]
fn writes_through_a_registered_root_land_in_the_registry() {
    let mut registry = RootRegistry::new();
    registry
        .register(
            "bpy",
            Value::Object(ObjectNode::new().with_attr("data", empty_map())),
        )
        .expect("token registers");
    let mut engine = Engine::with_registry(Scene::new(Value::Nil), registry);

    let outcome = engine.set_keyframe_with_path("bpy.data[\"x\"]", Value::Number(4.0));
    assert!(outcome.is_written());

    let slot = engine
        .resolve("bpy.data[\"x\"]")
        .into_slot()
        .expect("written registry slot resolves");
    assert_eq!(slot.value(), &Value::Number(4.0));
    // The scene's own root was never involved.
    assert_eq!(engine.scene.root, Value::Nil);
}

#[test]
fn add_date_keyframe_writes_the_timestamp() {
    let mut engine = Engine::new(scene_with_cube());
    let mut props = CalendarProps::new(2023, 11, 14, 22, 13, 20);
    props.target_path = Some("objects[\"Cube\"][\"date\"]".to_string());
    engine.scene.props = props;

    let outcome = engine.add_date_keyframe().expect("valid date");
    assert_eq!(outcome, WriteOutcome::Written { keyframed: true });

    let slot = engine
        .resolve("objects[\"Cube\"][\"date\"]")
        .into_slot()
        .expect("date prop resolves");
    assert_eq!(slot.value(), &Value::Number(1_700_000_000.0));
}

#[test]
fn absent_target_path_is_a_no_op() {
    let mut engine = Engine::new(scene_with_cube());
    engine.scene.props.target_path = None;
    let before = engine.scene.root.clone();
    assert_eq!(
        engine.add_date_keyframe().expect("no date math involved"),
        WriteOutcome::Unresolved
    );
    assert_eq!(engine.scene.root, before);
}

#[test]
fn impossible_date_is_an_error_before_anything_is_written() {
    let mut engine = Engine::new(scene_with_cube());
    let mut props = CalendarProps::new(2023, 2, 30, 0, 0, 0);
    props.target_path = Some("objects[\"Cube\"][\"date\"]".to_string());
    engine.scene.props = props;
    let before = engine.scene.root.clone();

    assert!(engine.add_date_keyframe().is_err());
    assert_eq!(engine.scene.root, before);
}

#[test]
fn refresh_dependents_touches_only_the_named_objects() {
    let driven = ObjectNode::new().with_driver("frame / fps");
    let bystander = ObjectNode::new().with_driver("var * 2");
    let plain = ObjectNode::new();
    let mut objects = HashMap::new();
    objects.insert("Driven".to_string(), Value::Object(driven));
    objects.insert("Bystander".to_string(), Value::Object(bystander));
    objects.insert("Plain".to_string(), Value::Object(plain));
    let root = Value::Object(ObjectNode::new().with_attr("objects", Value::Map(objects)));
    let mut engine = Engine::new(Scene::new(root));

    let refreshed =
        engine.refresh_dependents(&["objects[\"Driven\"]", "objects[\"Plain\"]", "objects[\"Ghost\"]"]);
    assert_eq!(refreshed, 1);

    let count_of = |engine: &Engine, name: &str| {
        engine
            .resolve(&format!("objects[\"{name}\"]"))
            .into_slot()
            .and_then(|slot| {
                let object = slot.value().as_object()?.clone();
                Some(
                    object
                        .animation
                        .map(|animation| {
                            animation
                                .drivers
                                .iter()
                                .map(|driver| driver.refresh_count)
                                .sum::<u32>()
                        })
                        .unwrap_or(0),
                )
            })
            .unwrap_or(0)
    };
    assert_eq!(count_of(&engine, "Driven"), 1);
    assert_eq!(count_of(&engine, "Bystander"), 0);
}
