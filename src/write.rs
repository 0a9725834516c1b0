//! Slot writing and keyframe requests.
//!
//! The graph is updated functionally: a write rebuilds the spine from the
//! root down to the slot and shares everything else, returning the new root.
//! `None` consistently means "nothing happened" — the trace no longer reaches
//! a container, or the container refuses this kind of write. Callers observe
//! failure only as the absence of the side effect.

use crate::graph::{AttributeHolder, IndexedSequence, KeyedMapping, KeyframeSink, Value};
use crate::resolve::Accessor;

/// Writes `value` into the slot below `parent` named by `accessor`, returning
/// the rebuilt root.
///
/// Capability priority mirrors resolution: a writable attribute named by the
/// accessor text wins, then an in-bounds sequence index, then key assignment.
/// A container that matches none of the three swallows the write.
pub fn write_slot(
    root: &Value,
    parent: &[Accessor],
    accessor: &Accessor,
    value: Value,
) -> Option<Value> {
    update_at(root, parent, &|container| {
        write_terminal(container, accessor, value.clone())
    })
}

/// Asks the container below `parent` to record its current value at `key` as
/// a keyframe for timeline position `frame`, returning the rebuilt root.
///
/// The data path identifying the slot is the host's keyed-access expression
/// `["<key>"]`. Containers without the keyframe capability ignore the
/// request.
pub fn request_keyframe(
    root: &Value,
    parent: &[Accessor],
    key: &str,
    frame: i64,
) -> Option<Value> {
    update_at(root, parent, &|container| {
        let Value::Object(object) = container else {
            return None;
        };
        if !object.keyframe_capable() {
            return None;
        }
        let current = object
            .key(key)
            .or_else(|| object.attr(key))
            .cloned()
            .unwrap_or_default();
        let mut object = object.clone();
        object.insert_keyframe(&format!("[\"{key}\"]"), frame, current);
        Some(Value::Object(object))
    })
}

/// Applies `update` to the value at `trace` below `current`, rebuilding the
/// spine. Descends through existing structure only; a broken trace aborts the
/// whole update.
pub(crate) fn update_at<F>(current: &Value, trace: &[Accessor], update: &F) -> Option<Value>
where
    F: Fn(&Value) -> Option<Value>,
{
    let Some((accessor, rest)) = trace.split_first() else {
        return update(current);
    };

    match (current, accessor) {
        (Value::Object(object), Accessor::Attr(name)) => {
            let new_child = update_at(object.attr(name)?, rest, update)?;
            let mut object = object.clone();
            object.attrs.insert(name.clone(), new_child);
            Some(Value::Object(object))
        }
        (Value::Object(object), Accessor::Key(key)) => {
            let new_child = update_at(KeyedMapping::key(object, key)?, rest, update)?;
            let mut object = object.clone();
            object.props.insert(key.clone(), new_child);
            Some(Value::Object(object))
        }
        (Value::Map(map), Accessor::Key(key)) => {
            let new_child = update_at(map.get(key)?, rest, update)?;
            let mut map = map.clone();
            map.insert(key.clone(), new_child);
            Some(Value::Map(map))
        }
        (Value::List(items), Accessor::Index(index)) => {
            let new_child = update_at(items.get(*index)?, rest, update)?;
            let mut items = items.clone();
            items[*index] = new_child;
            Some(Value::List(items))
        }
        _ => None,
    }
}

fn write_terminal(container: &Value, accessor: &Accessor, value: Value) -> Option<Value> {
    let text = accessor.text();
    match container {
        Value::Object(object) if object.has_attr(&text) => {
            let mut object = object.clone();
            object.set_attr(&text, value).then(|| Value::Object(object))
        }
        Value::List(items) => {
            let index = text.parse::<usize>().ok()?;
            let mut items = items.clone();
            items.set_index(index, value).then(|| Value::List(items))
        }
        Value::Object(object) => {
            let mut object = object.clone();
            KeyedMapping::set_key(&mut object, &text, value);
            Some(Value::Object(object))
        }
        Value::Map(map) => {
            let mut map = map.clone();
            map.set_key(&text, value);
            Some(Value::Map(map))
        }
        // Scalars hold no slots; the write is swallowed.
        _ => None,
    }
}
