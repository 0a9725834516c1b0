//! The graph node type.

use super::capability::{AttributeHolder, IndexedSequence, KeyedMapping};
use super::object::{AnimationData, Driver, Keyframe, ObjectNode};
use im::HashMap;
use serde::{Deserialize, Serialize};

/// One node of the object graph a property path walks.
///
/// # Examples
///
/// ```rust
/// use chronopath::graph::Value;
/// let n = Value::Number(3.14);
/// assert_eq!(n.type_name(), "Number");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Nil,
    Number(f64),
    String(String),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    Object(ObjectNode),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Bool(_) => "Bool",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Object(_) => "Object",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Capability dispatch: the only surface the walker and writer use.
    // ------------------------------------------------------------------

    pub fn has_attr(&self, name: &str) -> bool {
        matches!(self, Value::Object(object) if object.has_attr(name))
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.attr(name),
            _ => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::List(items) => IndexedSequence::index(items, index),
            _ => None,
        }
    }

    pub fn supports_keys(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Object(_))
    }

    pub fn key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => KeyedMapping::key(map, key),
            Value::Object(object) => KeyedMapping::key(object, key),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Value::Map(map) => KeyedMapping::contains_key(map, key),
            Value::Object(object) => KeyedMapping::contains_key(object, key),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Scene-file notation
    // ------------------------------------------------------------------

    /// Builds a graph from plain JSON. Objects are spelled
    /// `{"$object": {"attrs": .., "props": .., "animated": .., "drivers": ..}}`;
    /// every other JSON object is a `Map`.
    pub fn from_json(json: &serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            Json::Object(fields) => match fields.get("$object") {
                Some(spec) => Value::Object(object_from_json(spec)),
                None => Value::Map(
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::from_json(v)))
                        .collect(),
                ),
            },
        }
    }

    /// Inverse of [`from_json`](Value::from_json); recorded keyframes are
    /// included so a dumped scene shows what a write did.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::{json, Value as Json};
        match self {
            Value::Nil => Json::Null,
            Value::Number(n) => json!(n),
            Value::String(s) => json!(s),
            Value::Bool(b) => json!(b),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Object(object) => object_to_json(object),
        }
    }
}

fn object_from_json(spec: &serde_json::Value) -> ObjectNode {
    let mut object = ObjectNode::new();
    let Some(fields) = spec.as_object() else {
        return object;
    };
    if let Some(attrs) = fields.get("attrs").and_then(|v| v.as_object()) {
        for (name, value) in attrs {
            object.attrs.insert(name.clone(), Value::from_json(value));
        }
    }
    if let Some(props) = fields.get("props").and_then(|v| v.as_object()) {
        for (name, value) in props {
            object.props.insert(name.clone(), Value::from_json(value));
        }
    }
    let animated = fields.get("animated").and_then(|v| v.as_bool()).unwrap_or(false);
    let drivers: Vec<Driver> = fields
        .get("drivers")
        .and_then(|v| v.as_array())
        .map(|exprs| {
            exprs
                .iter()
                .filter_map(|e| e.as_str())
                .map(Driver::new)
                .collect()
        })
        .unwrap_or_default();
    if animated || !drivers.is_empty() {
        object.animation = Some(AnimationData {
            keyframes: Vec::new(),
            drivers,
        });
    }
    object
}

fn object_to_json(object: &ObjectNode) -> serde_json::Value {
    use serde_json::{json, Map as JsonMap, Value as Json};
    let mut spec = JsonMap::new();
    if !object.attrs.is_empty() {
        spec.insert(
            "attrs".into(),
            Json::Object(
                object
                    .attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        );
    }
    if !object.props.is_empty() {
        spec.insert(
            "props".into(),
            Json::Object(
                object
                    .props
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        );
    }
    if let Some(animation) = &object.animation {
        spec.insert("animated".into(), json!(true));
        if !animation.drivers.is_empty() {
            spec.insert(
                "drivers".into(),
                Json::Array(
                    animation
                        .drivers
                        .iter()
                        .map(|d| json!(d.expression))
                        .collect(),
                ),
            );
        }
        if !animation.keyframes.is_empty() {
            spec.insert(
                "keyframes".into(),
                Json::Array(animation.keyframes.iter().map(keyframe_to_json).collect()),
            );
        }
    }
    json!({ "$object": Json::Object(spec) })
}

fn keyframe_to_json(keyframe: &Keyframe) -> serde_json::Value {
    serde_json::json!({
        "data_path": keyframe.data_path,
        "frame": keyframe.frame,
        "value": keyframe.value.to_json(),
    })
}
