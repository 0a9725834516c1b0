//! Error taxonomy for the crate.
//!
//! The path core never errors: malformed paths drop their residue, failed
//! resolutions come back as [`Resolution::Unresolved`](crate::resolve::Resolution),
//! and refused writes are silent no-ops. Everything that *is* an error lives
//! outside that boundary: calendar input that names no real date, registry
//! configuration mistakes, and scene I/O in the CLI.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ChronopathError {
    /// The six calendar fields combined into a date that does not exist on
    /// the civil calendar (e.g. February 30th).
    #[error("no such date: {year:04}-{month:02}-{day:02}")]
    #[diagnostic(
        code(chronopath::calendar::invalid_date),
        help("the day field exceeds the length of the month")
    )]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("root token may not be empty")]
    #[diagnostic(code(chronopath::registry::empty_token))]
    EmptyRootToken,

    #[error("root token {token:?} is already registered")]
    #[diagnostic(
        code(chronopath::registry::duplicate_root),
        help("each reserved root token selects exactly one root graph")
    )]
    DuplicateRoot { token: String },

    #[error("cannot read scene file {path}")]
    #[diagnostic(code(chronopath::scene::io))]
    SceneIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("scene file {path} is not valid JSON")]
    #[diagnostic(code(chronopath::scene::json))]
    SceneJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write scene file {path}")]
    #[diagnostic(code(chronopath::scene::write))]
    SceneWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
