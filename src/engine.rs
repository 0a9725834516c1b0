//! End-to-end pipeline: tokenize, resolve, write, keyframe.
//!
//! Every operation runs to completion inside one host callback: no retries,
//! no persisted intermediate state. An invocation either fully completes or
//! silently stops at the first unsatisfied capability check, and the outcome
//! says which.

use crate::calendar::{CalendarProps, DateChange};
use crate::errors::ChronopathError;
use crate::graph::Value;
use crate::path::PropertyPath;
use crate::resolve::{Resolution, Resolver, RootChoice, RootRegistry};
use crate::write::{request_keyframe, update_at, write_slot};

/// The host-owned state one engine instance edits: the default resolution
/// root and the timeline position keyframes are recorded at.
#[derive(Debug, Clone)]
pub struct Scene {
    pub root: Value,
    pub frame_current: i64,
    pub props: CalendarProps,
}

impl Scene {
    pub fn new(root: Value) -> Self {
        Self {
            root,
            frame_current: 1,
            props: CalendarProps::now(),
        }
    }

    pub fn with_frame(mut self, frame: i64) -> Self {
        self.frame_current = frame;
        self
    }

    pub fn with_props(mut self, props: CalendarProps) -> Self {
        self.props = props;
        self
    }
}

/// What an end-to-end write actually did. Failure is the absence of the side
/// effect, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Path empty, absent, or unresolvable; nothing was touched.
    Unresolved,
    /// The slot resolved but its container refused the write.
    NotWritten,
    /// The value landed; `keyframed` reports whether the container also
    /// recorded a keyframe.
    Written { keyframed: bool },
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }
}

/// Owns the root registry and the scene, and wires the four pipeline stages
/// together.
pub struct Engine {
    registry: RootRegistry,
    pub scene: Scene,
}

impl Engine {
    pub fn new(scene: Scene) -> Self {
        Self {
            registry: RootRegistry::new(),
            scene,
        }
    }

    pub fn with_registry(scene: Scene, registry: RootRegistry) -> Self {
        Self { registry, scene }
    }

    pub fn registry(&self) -> &RootRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RootRegistry {
        &mut self.registry
    }

    /// Tokenizes and walks `path_text` against the scene root, without
    /// writing anything. Useful for read-only inspection and pre-write
    /// validation.
    pub fn resolve(&self, path_text: &str) -> Resolution {
        let path = PropertyPath::parse(path_text);
        Resolver::new(&self.registry).resolve(&path, &self.scene.root)
    }

    /// The full pipeline: tokenize, resolve, write, then request a keyframe
    /// at the current frame if the written container supports it.
    pub fn set_keyframe_with_path(&mut self, path_text: &str, value: Value) -> WriteOutcome {
        let path = PropertyPath::parse(path_text);
        let resolution = Resolver::new(&self.registry).resolve(&path, &self.scene.root);
        let Resolution::Resolved(slot) = resolution else {
            return WriteOutcome::Unresolved;
        };

        let root = match slot.root() {
            RootChoice::Registered(token) => match self.registry.get(token) {
                Some(root) => root.clone(),
                None => return WriteOutcome::Unresolved,
            },
            RootChoice::Default => self.scene.root.clone(),
        };

        let Some(written) = write_slot(&root, slot.parent_trace(), slot.accessor(), value) else {
            return WriteOutcome::NotWritten;
        };

        let keyframed = request_keyframe(
            &written,
            slot.parent_trace(),
            &slot.accessor().text(),
            self.scene.frame_current,
        );
        let had_keyframe = keyframed.is_some();
        let final_root = keyframed.unwrap_or(written);

        match slot.root() {
            RootChoice::Registered(token) => {
                self.registry.replace(token, final_root);
            }
            RootChoice::Default => self.scene.root = final_root,
        }
        WriteOutcome::Written {
            keyframed: had_keyframe,
        }
    }

    /// Combines the calendar fields into a timestamp and writes it to the
    /// configured target path. An absent or empty target path is a no-op, not
    /// an error; a date that does not exist on the civil calendar is.
    pub fn add_date_keyframe(&mut self) -> Result<WriteOutcome, ChronopathError> {
        let Some(path_text) = self.scene.props.target_path.clone() else {
            return Ok(WriteOutcome::Unresolved);
        };
        let timestamp = self.scene.props.timestamp()?;
        Ok(self.set_keyframe_with_path(&path_text, Value::Number(timestamp)))
    }

    /// Applies a partial date edit from a panel control.
    pub fn change_date(&mut self, change: DateChange) {
        change.apply(&mut self.scene.props);
    }

    /// Nudges the driver expressions of the named objects so the host
    /// re-evaluates their dependencies. Only the objects named are touched;
    /// unknown names and driverless objects are skipped. Returns how many
    /// objects were refreshed.
    pub fn refresh_dependents(&mut self, names: &[&str]) -> usize {
        let mut refreshed = 0;
        for name in names {
            let resolution =
                Resolver::new(&self.registry).resolve(&PropertyPath::parse(name), &self.scene.root);
            let Resolution::Resolved(slot) = resolution else {
                continue;
            };
            if !matches!(slot.root(), RootChoice::Default) {
                continue;
            }
            let nudged = update_at(&self.scene.root, slot.trace(), &|value| {
                let Value::Object(object) = value else {
                    return None;
                };
                let mut object = object.clone();
                if object.refresh_drivers() == 0 {
                    return None;
                }
                Some(Value::Object(object))
            });
            if let Some(new_root) = nudged {
                self.scene.root = new_root;
                refreshed += 1;
            }
        }
        refreshed
    }
}
