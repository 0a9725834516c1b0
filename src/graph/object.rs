//! Attribute-bearing host objects.
//!
//! An [`ObjectNode`] models what the core needs from a host object: built-in
//! named attributes, a separate free-form custom-property mapping reached by
//! quoted-key access, and (optionally) animation data that grants the
//! keyframe-insertion capability.

use super::capability::{AttributeHolder, KeyedMapping, KeyframeSink};
use super::Value;
use im::HashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectNode {
    pub attrs: HashMap<String, Value>,
    pub props: HashMap<String, Value>,
    pub animation: Option<AnimationData>,
}

impl ObjectNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// An object carrying empty animation data, i.e. one that accepts
    /// keyframe requests.
    pub fn animated() -> Self {
        Self {
            animation: Some(AnimationData::default()),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attrs.insert(name.into(), value);
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn with_driver(mut self, expression: impl Into<String>) -> Self {
        let animation = self.animation.get_or_insert_with(AnimationData::default);
        animation.drivers.push(Driver::new(expression));
        self
    }

    /// Nudges every driver expression so the host rebuilds its dependency
    /// graph. Returns how many drivers were touched.
    pub fn refresh_drivers(&mut self) -> usize {
        let Some(animation) = self.animation.as_mut() else {
            return 0;
        };
        for driver in &mut animation.drivers {
            driver.refresh();
        }
        animation.drivers.len()
    }
}

impl AttributeHolder for ObjectNode {
    fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    fn set_attr(&mut self, name: &str, value: Value) -> bool {
        // Only attributes the object already carries are writable; new names
        // belong in the custom-property mapping.
        if !self.attrs.contains_key(name) {
            return false;
        }
        self.attrs.insert(name.to_string(), value);
        true
    }
}

impl KeyedMapping for ObjectNode {
    fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    fn key(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    fn set_key(&mut self, key: &str, value: Value) {
        self.props.insert(key.to_string(), value);
    }
}

impl KeyframeSink for ObjectNode {
    fn keyframe_capable(&self) -> bool {
        self.animation.is_some()
    }

    fn insert_keyframe(&mut self, data_path: &str, frame: i64, value: Value) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        animation.keyframes.push(Keyframe {
            data_path: data_path.to_string(),
            frame,
            value,
        });
        true
    }
}

/// Recorded keyframes and driver expressions attached to one object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationData {
    pub keyframes: Vec<Keyframe>,
    pub drivers: Vec<Driver>,
}

/// A recorded (time, value) sample addressed by the host data path that
/// produced it, e.g. `["date"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub data_path: String,
    pub frame: i64,
    pub value: Value,
}

/// A driver expression whose dependency graph goes stale when the values it
/// reads are edited behind the host's back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub expression: String,
    /// How many times this driver has been nudged since load.
    pub refresh_count: u32,
}

impl Driver {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            refresh_count: 0,
        }
    }

    /// Re-assigning the expression, even unchanged, is what forces the host
    /// to re-evaluate the driver's dependencies.
    pub fn refresh(&mut self) {
        self.expression.push(' ');
        self.expression.pop();
        self.refresh_count += 1;
    }
}
