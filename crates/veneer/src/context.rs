//! Per-call render options and the context handed to block fields.

use serde_json::{Map, Value};

/// Options for a single render call.
///
/// Built with chained setters:
///
/// ```rust
/// use veneer::RenderOptions;
///
/// let options = RenderOptions::new()
///     .template("name_only")
///     .meta("page", 1)
///     .meta("total", 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Template to render with. `None` falls back to the type's default
    /// template, then to the shallow attribute dump.
    pub template: Option<String>,

    /// Explicit root key, overriding the name derived from the type.
    /// Forces root wrapping even for types outside the configured set.
    pub root: Option<String>,

    /// Value injected under a synthetic `"prefix"` key at the front of a
    /// singular document.
    pub prefix: Option<Value>,

    /// Value injected under a synthetic `"postfix"` key at the back of a
    /// singular document.
    pub postfix: Option<Value>,

    /// Auxiliary key/value pairs merged as siblings of the root key.
    /// Ignored when the render produces no root key.
    pub meta: Option<Map<String, Value>>,
}

impl RenderOptions {
    /// Creates empty options (default template, no wrapping extras).
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the template to render with.
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    /// Overrides the derived root key.
    pub fn root(mut self, key: impl Into<String>) -> Self {
        self.root = Some(key.into());
        self
    }

    /// Injects a `"prefix"` key at the front of the singular document.
    pub fn prefix(mut self, value: impl Into<Value>) -> Self {
        self.prefix = Some(value.into());
        self
    }

    /// Injects a `"postfix"` key at the back of the singular document.
    pub fn postfix(mut self, value: impl Into<Value>) -> Self {
        self.postfix = Some(value.into());
        self
    }

    /// Adds one meta entry. Repeated calls accumulate.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Information available to block fields at render time.
///
/// Ephemeral: one context exists per object being projected and is never
/// shared across render calls.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Name of the resolved template the field belongs to.
    pub template: &'a str,

    /// The options of the enclosing render call.
    pub options: &'a RenderOptions,
}
