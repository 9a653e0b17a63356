//! # Snowflake Errors
//!
//! Error types for the snowflake composition engine.
//!
//! User-level rejections (extending a foreign node, attaching a child that
//! would close a cycle) are silent no-ops and never reach this type; an
//! error here signals a violated structural invariant.

use thiserror::Error;

/// Errors that can occur during snowflake re-derivation and serialization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnowflakeError {
    /// The topological ordering of the dependency set got stuck: no
    /// remaining snowflake has all of its children processed. Structurally
    /// impossible while the insertion-time cycle check holds.
    #[error("topological ordering failed: snowflake dependencies contain a cycle")]
    DependencyCycle,
}
