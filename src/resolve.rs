//! Graph walking: turning a parsed path into a concrete slot.
//!
//! Resolution is stateless and computed fresh on every call; if the graph
//! changed shape since the last walk, the next walk sees the new shape. An
//! unresolvable path is an expected outcome, not an error: the path usually
//! comes from a text field the user is still typing in.

use crate::errors::ChronopathError;
use crate::graph::Value;
use crate::path::{PropertyPath, Segment};
use im::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

static NIL: Value = Value::Nil;

/// One disambiguated access step produced by the walker.
///
/// Unlike a [`Segment`], an accessor knows how it reached the child: an
/// attribute by name, a sequence element by index, or a mapping entry by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accessor {
    Attr(String),
    Index(usize),
    Key(String),
}

impl Accessor {
    /// The textual key this accessor addresses its container with.
    pub fn text(&self) -> String {
        match self {
            Accessor::Attr(name) | Accessor::Key(name) => name.clone(),
            Accessor::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Attr(name) => write!(f, "{name}"),
            Accessor::Index(index) => write!(f, "{index}"),
            Accessor::Key(key) => write!(f, "[\"{key}\"]"),
        }
    }
}

/// Which root a resolution started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootChoice {
    /// The first segment matched a reserved token in the [`RootRegistry`].
    Registered(String),
    /// The caller-supplied default root.
    Default,
}

/// A successfully resolved slot: where it lives and what it held before any
/// write.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSlot {
    root: RootChoice,
    trace: Vec<Accessor>,
    value: Value,
}

impl ResolvedSlot {
    pub fn root(&self) -> &RootChoice {
        &self.root
    }

    /// The full accessor chain from the root to the terminal value.
    pub fn trace(&self) -> &[Accessor] {
        &self.trace
    }

    /// The chain addressing the immediate container of the terminal value.
    pub fn parent_trace(&self) -> &[Accessor] {
        &self.trace[..self.trace.len() - 1]
    }

    /// The accessor that reaches the terminal value from its container.
    pub fn accessor(&self) -> &Accessor {
        // trace is never empty: a walk with no steps is Unresolved
        &self.trace[self.trace.len() - 1]
    }

    /// Snapshot of the terminal value at resolution time, before any write.
    /// `Nil` may mean a valid target that is currently unset.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Outcome of a walk. Callers must handle both branches; there is no
/// null-like sentinel to forget to check.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedSlot),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn slot(&self) -> Option<&ResolvedSlot> {
        match self {
            Resolution::Resolved(slot) => Some(slot),
            Resolution::Unresolved => None,
        }
    }

    pub fn into_slot(self) -> Option<ResolvedSlot> {
        match self {
            Resolution::Resolved(slot) => Some(slot),
            Resolution::Unresolved => None,
        }
    }
}

/// Reserved root tokens and the graphs they select.
///
/// A path whose first segment equals a registered token starts its walk at
/// that root instead of the caller-supplied default, consuming the segment.
/// The registry is explicit state handed to the resolver; there is no
/// process-wide implicit root.
#[derive(Debug, Clone, Default)]
pub struct RootRegistry {
    roots: HashMap<String, Value>,
}

impl RootRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        token: impl Into<String>,
        root: Value,
    ) -> Result<(), ChronopathError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ChronopathError::EmptyRootToken);
        }
        if self.roots.contains_key(&token) {
            return Err(ChronopathError::DuplicateRoot { token });
        }
        self.roots.insert(token, root);
        Ok(())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.roots.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<&Value> {
        self.roots.get(token)
    }

    /// Replaces the graph behind an already-registered token. Returns false
    /// when the token is unknown.
    pub fn replace(&mut self, token: &str, root: Value) -> bool {
        if !self.roots.contains_key(token) {
            return false;
        }
        self.roots.insert(token.to_string(), root);
        true
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }
}

/// The object-graph walker.
pub struct Resolver<'a> {
    registry: &'a RootRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a RootRegistry) -> Self {
        Self { registry }
    }

    /// Walks `path` from its root, one segment at a time.
    ///
    /// Per-segment capability priority: attribute lookup by name, then
    /// sequence indexing, then keyed lookup. The first capability the current
    /// container offers wins; if it then fails (missing attribute, index out
    /// of bounds, non-numeric index), the walk ends `Unresolved` without
    /// attempting later segments. Intermediate containers are never created.
    pub fn resolve(&self, path: &PropertyPath, default_root: &Value) -> Resolution {
        let segments = path.segments();
        let Some(first) = segments.first() else {
            return Resolution::Unresolved;
        };

        // One-time root choice before walking begins.
        let (mut current, remaining, root) = match first {
            Segment::Attr(token) if self.registry.contains(token) => {
                let Some(registered) = self.registry.get(token) else {
                    return Resolution::Unresolved;
                };
                (registered, &segments[1..], RootChoice::Registered(token.clone()))
            }
            _ => (default_root, segments, RootChoice::Default),
        };

        let mut trace = Vec::with_capacity(remaining.len());
        for (position, segment) in remaining.iter().enumerate() {
            let terminal = position + 1 == remaining.len();
            match step_into(current, segment, terminal) {
                Some((accessor, child)) => {
                    trace.push(accessor);
                    current = child;
                }
                None => return Resolution::Unresolved,
            }
        }

        // A bare root token addresses no slot.
        if trace.is_empty() {
            return Resolution::Unresolved;
        }

        Resolution::Resolved(ResolvedSlot {
            root,
            trace,
            value: current.clone(),
        })
    }
}

fn step_into<'v>(
    current: &'v Value,
    segment: &Segment,
    terminal: bool,
) -> Option<(Accessor, &'v Value)> {
    let text = segment.text();

    // (a) attribute lookup by name
    if current.has_attr(text) {
        let child = current.attr(text)?;
        return Some((Accessor::Attr(text.to_string()), child));
    }

    // (b) sequence indexing; a sequence claims the segment even when the
    // index fails to parse or is out of bounds
    if current.is_sequence() {
        let index = text.parse::<usize>().ok()?;
        let child = current.index(index)?;
        return Some((Accessor::Index(index), child));
    }

    // (c) keyed lookup; a missing key is a dead end mid-walk, but at the
    // terminal position it is a valid target that is currently unset
    if current.supports_keys() {
        if let Some(child) = current.key(text) {
            return Some((Accessor::Key(text.to_string()), child));
        }
        if terminal {
            return Some((Accessor::Key(text.to_string()), &NIL));
        }
    }

    None
}
