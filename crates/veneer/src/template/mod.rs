//! Template declaration: named, ordered lists of field mappings.
//!
//! A [`Template`] belongs to exactly one type and describes how to project
//! an instance of that type into a document: an ordered list of
//! [`FieldSpec`] entries, each with an output key, a value source, and an
//! optional condition. Templates may extend other templates of the same
//! type; inheritance is flattened at resolution time by the
//! [`registry`](crate::template::TemplateRegistry).
//!
//! Declarations use a chaining builder, no metaprogramming involved:
//!
//! ```rust
//! use veneer::Template;
//!
//! let template = Template::new("public")
//!     .extends("name_only")
//!     .attribute("age")
//!     .method_as("display_name", "name")
//!     .association("tasks")
//!     .block("active", |obj, _ctx| obj.attribute("age").is_some().into());
//! ```

mod registry;

pub use registry::{ResolvedTemplate, TemplateRegistry};
pub(crate) use registry::Lookup;

use std::rc::Rc;

use serde_json::Value;

use crate::context::RenderContext;
use crate::model::Exposed;

/// An inline computed field: bypasses templating for that single field.
///
/// Stored as `Rc` rather than `Arc`: renders are single-threaded and the
/// closures never cross threads.
pub type BlockFn = dyn Fn(&dyn Exposed, &RenderContext<'_>) -> Value;

/// A per-field condition: when it returns false the field is omitted
/// entirely from the document.
pub type ConditionFn = dyn Fn(&dyn Exposed) -> bool;

/// Where a field's value comes from.
#[derive(Clone)]
pub enum FieldSource {
    /// Read the named attribute verbatim.
    Attribute(String),

    /// Invoke the named zero-argument accessor; the result is recursively
    /// documented when it is itself an enrolled object.
    Method(String),

    /// Invoke a caller-supplied closure.
    Block(Rc<BlockFn>),

    /// Render the named association through the target type's templates,
    /// optionally pinning a specific template name.
    Association {
        name: String,
        template: Option<String>,
    },
}

impl std::fmt::Debug for FieldSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSource::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            FieldSource::Method(name) => f.debug_tuple("Method").field(name).finish(),
            FieldSource::Block(_) => f.write_str("Block(..)"),
            FieldSource::Association { name, template } => f
                .debug_struct("Association")
                .field("name", name)
                .field("template", template)
                .finish(),
        }
    }
}

/// One template entry: output key, value source, optional condition.
#[derive(Clone)]
pub struct FieldSpec {
    /// The key the value is emitted under.
    pub key: String,

    /// Where the value comes from.
    pub source: FieldSource,

    /// Omits the field when the condition returns false.
    pub condition: Option<Rc<ConditionFn>>,
}

impl FieldSpec {
    /// Creates an unconditional field.
    pub fn new(key: impl Into<String>, source: FieldSource) -> Self {
        Self {
            key: key.into(),
            source,
            condition: None,
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("key", &self.key)
            .field("source", &self.source)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

/// A named, ordered set of field mappings for one type.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    extends: Vec<String>,
    fields: Vec<FieldSpec>,
}

impl Template {
    /// Creates an empty template with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Declares that this template inherits the flattened fields of another
    /// template of the same type. May be called multiple times; parents are
    /// flattened in declaration order, own fields last.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends.push(parent.into());
        self
    }

    /// Adds an attribute field emitted under the attribute's own name.
    pub fn attribute(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let source = FieldSource::Attribute(name.clone());
        self.field(FieldSpec::new(name, source))
    }

    /// Adds an attribute field emitted under a different key.
    pub fn attribute_as(self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.field(FieldSpec::new(key, FieldSource::Attribute(name.into())))
    }

    /// Adds a zero-argument accessor field emitted under the accessor's name.
    pub fn method(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let source = FieldSource::Method(name.clone());
        self.field(FieldSpec::new(name, source))
    }

    /// Adds a zero-argument accessor field emitted under a different key.
    pub fn method_as(self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.field(FieldSpec::new(key, FieldSource::Method(name.into())))
    }

    /// Adds an inline computed field.
    pub fn block<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Exposed, &RenderContext<'_>) -> Value + 'static,
    {
        self.field(FieldSpec::new(key, FieldSource::Block(Rc::new(f))))
    }

    /// Adds an association field rendered through the target type's default
    /// template.
    pub fn association(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let source = FieldSource::Association {
            name: name.clone(),
            template: None,
        };
        self.field(FieldSpec::new(name, source))
    }

    /// Adds an association field emitted under a different key.
    pub fn association_as(self, name: impl Into<String>, key: impl Into<String>) -> Self {
        let source = FieldSource::Association {
            name: name.into(),
            template: None,
        };
        self.field(FieldSpec::new(key, source))
    }

    /// Adds an association field rendered through a specific template of the
    /// target type.
    pub fn association_with(self, name: impl Into<String>, template: impl Into<String>) -> Self {
        let name = name.into();
        let source = FieldSource::Association {
            name: name.clone(),
            template: Some(template.into()),
        };
        self.field(FieldSpec::new(name, source))
    }

    /// Attaches a condition to the most recently declared field. The field
    /// is omitted from the document when the condition returns false.
    pub fn only_if<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn Exposed) -> bool + 'static,
    {
        if let Some(last) = self.fields.last_mut() {
            last.condition = Some(Rc::new(f));
        }
        self
    }

    /// Adds a pre-built field spec.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// The template's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the templates this one extends, in declaration order.
    pub fn parents(&self) -> &[String] {
        &self.extends
    }

    /// The template's own (unflattened) fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}
