//! The dynamic object graph the resolver walks.
//!
//! Host objects are not matched by concrete type: traversal and writing go
//! through a closed set of capability seams (attribute holder, indexed
//! sequence, keyed mapping, keyframe sink). [`Value`] is the graph node that
//! dispatches over them.

pub mod capability;
pub mod object;
pub mod value;

pub use capability::{AttributeHolder, IndexedSequence, KeyedMapping, KeyframeSink};
pub use object::{AnimationData, Driver, Keyframe, ObjectNode};
pub use value::Value;
