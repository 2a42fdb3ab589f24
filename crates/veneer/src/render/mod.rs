//! Projection of enrolled objects into documents.
//!
//! The renderer walks a resolved template field by field, pulling values
//! through the object's lookup channels and assembling an ordered document.
//! Associations and accessor-returned objects recurse through the same
//! machinery, so a nested object is always documented by its own type's
//! templates.
//!
//! # Design
//!
//! A [`Renderer`] borrows the registry, the config, and a naming strategy
//! for the duration of a call; it owns nothing and carries no state between
//! calls. Renders fail atomically: any field the template names that the
//! instance cannot produce aborts the whole render with a
//! [`RenderError::FieldResolution`], and the partial document is discarded.
//!
//! Objects whose type has no applicable template are not an error. They
//! render through the shallow-dump fallback: every name in
//! [`attribute_names`](crate::Exposed::attribute_names), in order, read
//! through [`attribute`](crate::Exposed::attribute); an empty name list
//! renders as `null`.

mod association;
mod wrap;

use serde_json::{Map, Value};
use tracing::trace;

use crate::config::Config;
use crate::context::{RenderContext, RenderOptions};
use crate::error::{FieldKind, RenderError};
use crate::model::{Exposed, Field};
use crate::naming::{BasicInflector, NamingStrategy};
use crate::template::{FieldSource, Lookup, TemplateRegistry};

/// Hard cap on association recursion. Template graphs are finite, but an
/// association cycle in the data (user -> tasks -> owner -> tasks -> ..)
/// would otherwise never terminate.
pub const MAX_ASSOCIATION_DEPTH: usize = 64;

static DEFAULT_NAMING: BasicInflector = BasicInflector;

/// Renders enrolled objects into documents.
///
/// # Example
///
/// ```
/// use serde_json::{json, Value};
/// use veneer::{Config, Exposed, Renderer, RenderOptions, Template, TemplateRegistry};
///
/// struct User {
///     first_name: String,
/// }
///
/// impl Exposed for User {
///     fn api_type(&self) -> &str {
///         "User"
///     }
///
///     fn attribute(&self, name: &str) -> Option<Value> {
///         (name == "first_name").then(|| Value::from(self.first_name.as_str()))
///     }
/// }
///
/// let mut registry = TemplateRegistry::new();
/// registry
///     .register("User", Template::new("name_only").attribute("first_name"))
///     .unwrap();
///
/// let config = Config::default();
/// let renderer = Renderer::new(&registry, &config);
/// let user = User { first_name: "Han".into() };
///
/// let doc = renderer
///     .render_one(&user, &RenderOptions::new().template("name_only"))
///     .unwrap();
/// assert_eq!(doc, json!({"first_name": "Han"}));
/// ```
pub struct Renderer<'a> {
    registry: &'a TemplateRegistry,
    config: &'a Config,
    naming: &'a dyn NamingStrategy,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer with the regular-English naming strategy.
    pub fn new(registry: &'a TemplateRegistry, config: &'a Config) -> Self {
        Self {
            registry,
            config,
            naming: &DEFAULT_NAMING,
        }
    }

    /// Swaps in a custom naming strategy for root keys and XML tags.
    pub fn with_naming(mut self, naming: &'a dyn NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    pub(crate) fn naming(&self) -> &dyn NamingStrategy {
        self.naming
    }

    /// Renders a single object.
    ///
    /// The template is taken from `options.template`, falling back to the
    /// type's default template and then to the shallow attribute dump.
    /// Prefix/postfix keys and root wrapping are applied per `options` and
    /// the engine config.
    pub fn render_one(
        &self,
        object: &dyn Exposed,
        options: &RenderOptions,
    ) -> Result<Value, RenderError> {
        let doc = self.project(object, options.template.as_deref(), options, 0)?;
        let doc = wrap::apply_affixes(doc, options);
        Ok(self.wrap_one(object.api_type(), doc, options))
    }

    /// Renders a sequence of objects into an array document.
    ///
    /// Each element is projected exactly as [`render_one`](Self::render_one)
    /// would project it, minus prefix/postfix (those are singular-only).
    /// The collection root key is derived from the first element's type;
    /// an empty sequence renders as a bare array unless `options.root`
    /// forces a key.
    pub fn render_many<'o>(
        &self,
        objects: impl IntoIterator<Item = &'o dyn Exposed>,
        options: &RenderOptions,
    ) -> Result<Value, RenderError> {
        let mut items = Vec::new();
        let mut derived_key: Option<String> = None;

        for object in objects {
            let api_type = object.api_type();
            if items.is_empty() && self.config.wraps(api_type) {
                derived_key = Some(self.naming.plural_key(api_type));
            }

            let doc = self.project(object, options.template.as_deref(), options, 0)?;
            items.push(self.wrap_element(api_type, doc));
        }

        Ok(self.wrap_many(Value::Array(items), derived_key, options))
    }

    /// Projects one object through template resolution into a bare document,
    /// with no wrapping applied.
    fn project(
        &self,
        object: &dyn Exposed,
        requested: Option<&str>,
        options: &RenderOptions,
        depth: usize,
    ) -> Result<Value, RenderError> {
        let api_type = object.api_type();
        if depth > MAX_ASSOCIATION_DEPTH {
            return Err(RenderError::RecursionLimit {
                api_type: api_type.to_string(),
                limit: MAX_ASSOCIATION_DEPTH,
            });
        }

        let resolved = match self.registry.lookup(api_type, requested)? {
            Lookup::Template(resolved) => resolved,
            Lookup::Fallback => {
                trace!(api_type, "no applicable template, shallow dump");
                return Ok(fallback_document(object));
            }
        };

        trace!(api_type, template = %resolved.name, depth, "projecting");

        let ctx = RenderContext {
            template: &resolved.name,
            options,
        };

        let mut out = Map::new();
        for field in &resolved.fields {
            if let Some(condition) = &field.condition {
                if !condition(object) {
                    continue;
                }
            }

            let value = match &field.source {
                FieldSource::Attribute(name) => object.attribute(name).ok_or_else(|| {
                    field_error(api_type, &field.key, FieldKind::Attribute, name)
                })?,
                FieldSource::Method(name) => {
                    let result = object.accessor(name).ok_or_else(|| {
                        field_error(api_type, &field.key, FieldKind::Method, name)
                    })?;
                    match result {
                        Field::Value(value) => value,
                        Field::Object(inner) => self.project(inner, None, options, depth + 1)?,
                    }
                }
                FieldSource::Block(f) => f(object, &ctx),
                FieldSource::Association { name, template } => {
                    let related = object.association(name).ok_or_else(|| {
                        field_error(api_type, &field.key, FieldKind::Association, name)
                    })?;
                    self.resolve_association(related, template.as_deref(), options, depth + 1)?
                }
            };

            out.insert(field.key.clone(), value);
        }

        Ok(Value::Object(out))
    }
}

/// Shallow attribute dump for objects with no applicable template: every
/// declared attribute name in order, or `null` when the type declares none.
fn fallback_document(object: &dyn Exposed) -> Value {
    let names = object.attribute_names();
    if names.is_empty() {
        return Value::Null;
    }

    let mut out = Map::new();
    for name in names {
        let value = object.attribute(name).unwrap_or(Value::Null);
        out.insert(name.to_string(), value);
    }
    Value::Object(out)
}

fn field_error(api_type: &str, key: &str, kind: FieldKind, source_name: &str) -> RenderError {
    RenderError::FieldResolution {
        api_type: api_type.to_string(),
        key: key.to_string(),
        kind,
        source_name: source_name.to_string(),
    }
}
