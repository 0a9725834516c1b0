//! Capability seams for graph traversal.
//!
//! These are runtime capability classes, not an inheritance hierarchy: any
//! container that can answer "has this attribute", "is this index in bounds",
//! or "does this key exist" qualifies, and the walker and writer depend on
//! nothing else about it.

use super::Value;

/// An object with named, writable attributes.
pub trait AttributeHolder {
    fn has_attr(&self, name: &str) -> bool;
    fn attr(&self, name: &str) -> Option<&Value>;
    /// Returns false when the attribute is not writable on this holder.
    fn set_attr(&mut self, name: &str, value: Value) -> bool;
}

/// An ordered, index-addressable sequence.
pub trait IndexedSequence {
    fn len(&self) -> usize;
    fn index(&self, index: usize) -> Option<&Value>;
    /// Returns false when the index is out of bounds.
    fn set_index(&mut self, index: usize, value: Value) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A mapping supporting key containment, lookup, and assignment.
pub trait KeyedMapping {
    fn contains_key(&self, key: &str) -> bool;
    fn key(&self, key: &str) -> Option<&Value>;
    fn set_key(&mut self, key: &str, value: Value);
}

/// A container that can record its current value at a key as a keyframe.
///
/// Not every resolved or writable slot is animatable; callers probe
/// [`keyframe_capable`](KeyframeSink::keyframe_capable) and treat a missing
/// capability as a silent no-op.
pub trait KeyframeSink {
    fn keyframe_capable(&self) -> bool;
    /// Records `value` under `data_path` at `frame`. Returns false when the
    /// sink is not capable.
    fn insert_keyframe(&mut self, data_path: &str, frame: i64, value: Value) -> bool;
}

impl IndexedSequence for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn index(&self, index: usize) -> Option<&Value> {
        self.get(index)
    }

    fn set_index(&mut self, index: usize, value: Value) -> bool {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl KeyedMapping for im::HashMap<String, Value> {
    fn contains_key(&self, key: &str) -> bool {
        im::HashMap::contains_key(self, key)
    }

    fn key(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn set_key(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}
