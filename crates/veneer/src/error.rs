//! Error types for template registration and rendering.
//!
//! Two error families with different lifecycles: [`RegistrationError`] is
//! raised at load time and is fatal to startup; [`RenderError`] is raised
//! per render call and surfaces to the caller. The shallow-dump fallback is
//! deliberately not an error (see the crate docs).

use thiserror::Error;

/// Which lookup channel a field declaration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Attribute,
    Method,
    Association,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Attribute => f.write_str("attribute"),
            FieldKind::Method => f.write_str("method"),
            FieldKind::Association => f.write_str("association"),
        }
    }
}

/// Errors raised while declaring templates, before any rendering happens.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A template extension chain loops back onto itself.
    ///
    /// Only reachable through re-registration (a fresh template cannot
    /// extend one that does not exist yet), but still detected eagerly so
    /// it never surfaces at render time.
    #[error("cyclic template extension on type \"{api_type}\": {chain}")]
    CyclicExtension { api_type: String, chain: String },

    /// A template extends a template that is not registered on its type.
    #[error(
        "template \"{template}\" on type \"{api_type}\" extends unknown template \"{parent}\""
    )]
    UnknownParent {
        api_type: String,
        template: String,
        parent: String,
    },

    /// A different default template is already designated for the type.
    #[error(
        "type \"{api_type}\" already has default template \"{current}\"; \
         clear it before designating \"{requested}\""
    )]
    DefaultConflict {
        api_type: String,
        current: String,
        requested: String,
    },

    /// The template named as default is not registered on the type.
    #[error("cannot designate unknown template \"{template}\" as default for type \"{api_type}\"")]
    UnknownDefault { api_type: String, template: String },
}

/// Errors raised during a render call.
///
/// A render fails atomically: on error the partially built document is
/// discarded and nothing is returned.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A named template was requested on a type that has templates, but not
    /// that one. (A type with no templates at all falls back to the shallow
    /// attribute dump instead.)
    #[error("template \"{template}\" not found on type \"{api_type}\"")]
    TemplateNotFound { api_type: String, template: String },

    /// A declared field's source is absent on the instance.
    ///
    /// The field holding the looked-up name is `source_name`, not `source`:
    /// thiserror reserves the latter for a wrapped error.
    #[error("field \"{key}\" on type \"{api_type}\" has no {kind} named \"{source_name}\"")]
    FieldResolution {
        api_type: String,
        key: String,
        kind: FieldKind,
        source_name: String,
    },

    /// The association graph recursed past the defensive depth cap.
    #[error("render of type \"{api_type}\" exceeded the association depth limit of {limit}")]
    RecursionLimit { api_type: String, limit: usize },
}
