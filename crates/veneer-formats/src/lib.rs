//! Wire formats for rendered documents.
//!
//! The core `veneer` crate stops at an ordered [`serde_json::Value`]
//! document; this crate turns that document into response bodies:
//!
//! - [`json`]: compact and pretty JSON
//! - [`xml`]: an XML rendition with hyphenated tags and singularized
//!   collection item tags
//! - [`jsonp`]: JSON wrapped in a callback invocation, gated per type by
//!   the engine [`Config`](veneer::Config)
//!
//! Adapters are pure functions of the document (plus naming strategy for
//! XML); they never touch the domain objects the document came from.

pub mod json;
pub mod jsonp;
pub mod xml;

use thiserror::Error;

/// Errors raised while turning a document into a response body.
#[derive(Debug, Error)]
pub enum FormatError {
    /// JSON serialization failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// XML writing failed.
    #[error("xml serialization failed: {0}")]
    Xml(String),

    /// JSONP was requested for a type the engine config does not allow
    /// callbacks for.
    #[error("jsonp callbacks are not enabled for type \"{api_type}\"")]
    CallbackRefused { api_type: String },

    /// The callback parameter is not a plausible JavaScript function path.
    #[error("invalid jsonp callback name \"{name}\"")]
    InvalidCallback { name: String },
}
