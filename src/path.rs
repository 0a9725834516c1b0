//! Property paths and the segment tokenizer.
//!
//! A path is a dotted/bracketed string addressing one slot in an object
//! graph: `scene.objects["Cube"].location.0`. Tokenizing is best-effort by
//! contract: the string usually comes from a text field the user is still
//! typing in, so malformed residue is dropped rather than reported.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed step of a property path.
///
/// Whether an `Attr` segment names an attribute or a sequence index is not
/// decided here; the resolver disambiguates against the container it actually
/// meets. `a.b["c"].2` tokenizes to attr/attr/key/attr.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// A bare run of characters between separators.
    Attr(String),
    /// A `["literal"]` quoted-key access.
    Key(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Attr(text) | Segment::Key(text) => text,
        }
    }
}

/// An ordered sequence of segments addressing one slot in an object graph.
///
/// Order is resolution order, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyPath(pub Vec<Segment>);

// Anchored: one segment at the front of the remaining input. A quoted key is
// never split, whatever it contains short of the closing `"]`.
static SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(?:\["([^"]+)"\]|([^."\[\]]+))"#).expect("segment pattern"));

impl PropertyPath {
    /// Tokenizes a path string. The empty string yields the empty path, which
    /// downstream treats as "no target".
    ///
    /// Unbalanced brackets and empty segments do not match; tokenizing stops
    /// there and the residue is dropped.
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = text;
        while let Some(caps) = SEGMENT.captures(rest) {
            if let Some(key) = caps.get(1) {
                segments.push(Segment::Key(key.as_str().to_string()));
            } else if let Some(attr) = caps.get(2) {
                segments.push(Segment::Attr(attr.as_str().to_string()));
            }
            let end = caps.get(0).map_or(rest.len(), |m| m.end());
            rest = &rest[end..];
            // `.` separates segments; a bracketed key may also follow directly.
            rest = rest.strip_prefix('.').unwrap_or(rest);
        }
        PropertyPath(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Attr(name) => {
                    if position > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                Segment::Key(key) => write!(f, "[\"{key}\"]")?,
            }
        }
        Ok(())
    }
}
