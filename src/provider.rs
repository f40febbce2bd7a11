//! Clef-facing endpoint layout (data) and response classification (behavior).
//!
//! `endpoints` derives the versioned authorize/info/logout URLs from a root URL. `classify`
//! turns a raw provider response into either the decoded JSON payload or a specific
//! [`Error`] variant, using the exact `error` strings Clef is known to return.

pub mod classify;
pub mod endpoints;

pub use classify::*;
pub use endpoints::*;

/// JSON object as decoded from a Clef response body.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
