//! Per-type template store: registration, inheritance, defaults, lookup.
//!
//! This module provides [`TemplateRegistry`], the process-wide store mapping
//! `(type, template name)` to a flattened field list.
//!
//! # Design
//!
//! The registry uses a two-phase approach:
//!
//! 1. Registration: templates are declared per type, validated eagerly
//!    (unknown parents, extension cycles, default conflicts all fail here)
//! 2. Resolution: a lookup flattens the inheritance chain into a single
//!    ordered field list
//!
//! This separation guarantees that structural mistakes surface at startup,
//! never in the middle of a render.
//!
//! # Inheritance flattening
//!
//! Each extended template's flattened fields are laid down in declaration
//! order, then the extending template's own fields are appended. A field
//! whose key already exists replaces the earlier definition *in place*:
//! the last definition wins, but the field keeps its first-declared
//! position. Keys are unique after flattening.
//!
//! # Resolution rules
//!
//! Render-time lookup ([`TemplateRegistry::lookup`]) follows these rules:
//!
//! | Requested | Type state                    | Outcome                 |
//! |-----------|-------------------------------|-------------------------|
//! | name      | has that template             | flattened template      |
//! | name      | has templates, not that one   | `TemplateNotFound`      |
//! | name      | has no templates at all       | shallow-dump fallback   |
//! | none      | has a default template        | flattened default       |
//! | none      | no default / not enrolled     | shallow-dump fallback   |
//!
//! The fallback keeps plain, non-participating values renderable and is a
//! documented behavior, not an error.
//!
//! # Concurrency
//!
//! The registry is read-mostly after startup. Concurrent reads during
//! rendering are safe; concurrent writes require external synchronization
//! (no internal locking). Re-registration replaces a template's field list,
//! which is what reload and test-isolation scenarios need.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{FieldSpec, Template};
use crate::error::{RegistrationError, RenderError};

/// The flattened result of resolving `(type, template name)`.
#[derive(Clone, Debug)]
pub struct ResolvedTemplate {
    /// The resolved template's name.
    pub name: String,

    /// The inheritance-flattened fields, in declaration order with
    /// last-defined-wins overrides applied.
    pub fields: Vec<FieldSpec>,
}

/// Render-time lookup outcome: a template, or the shallow-dump fallback.
#[derive(Debug)]
pub(crate) enum Lookup {
    Template(ResolvedTemplate),
    Fallback,
}

#[derive(Default)]
struct TypeEntry {
    templates: HashMap<String, Template>,
    default: Option<String>,
}

/// Store of named templates per enrolled type.
///
/// # Example
///
/// ```rust
/// use veneer::{Template, TemplateRegistry};
///
/// let mut registry = TemplateRegistry::new();
/// registry
///     .register("User", Template::new("name_only").attribute("first_name"))
///     .unwrap();
/// registry.set_default("User", "name_only").unwrap();
///
/// let resolved = registry.resolve("User", "name_only").unwrap();
/// assert_eq!(resolved.fields.len(), 1);
/// ```
#[derive(Default)]
pub struct TemplateRegistry {
    types: HashMap<String, TypeEntry>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template on a type, replacing any previous template with
    /// the same name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::UnknownParent`] if the template extends
    /// a template not registered on the type, and
    /// [`RegistrationError::CyclicExtension`] if accepting the template
    /// would close an extension cycle. On error the registry is unchanged.
    pub fn register(
        &mut self,
        api_type: impl Into<String>,
        template: Template,
    ) -> Result<(), RegistrationError> {
        let api_type = api_type.into();
        let existing = self.types.get(&api_type);

        for parent in template.parents() {
            // The candidate's own name counts as known so that
            // self-extension reaches the cycle check below.
            let known = parent == template.name()
                || existing.is_some_and(|e| e.templates.contains_key(parent));
            if !known {
                return Err(RegistrationError::UnknownParent {
                    api_type,
                    template: template.name().to_string(),
                    parent: parent.clone(),
                });
            }
        }

        // Check the extension graph as it would look with this template in
        // place. Re-registration can close a cycle through older templates.
        if let Some(chain) = extension_cycle(existing, &template) {
            return Err(RegistrationError::CyclicExtension { api_type, chain });
        }

        debug!(
            api_type = %api_type,
            template = %template.name(),
            fields = template.fields().len(),
            "registered api template"
        );
        self.types
            .entry(api_type)
            .or_default()
            .templates
            .insert(template.name().to_string(), template);
        Ok(())
    }

    /// Designates a type's default template, used when a render call names
    /// no template.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::UnknownDefault`] if the template is not
    /// registered, and [`RegistrationError::DefaultConflict`] if a
    /// *different* default is already designated (clear it first).
    pub fn set_default(&mut self, api_type: &str, name: &str) -> Result<(), RegistrationError> {
        let entry = self
            .types
            .get_mut(api_type)
            .filter(|e| e.templates.contains_key(name))
            .ok_or_else(|| RegistrationError::UnknownDefault {
                api_type: api_type.to_string(),
                template: name.to_string(),
            })?;

        match &entry.default {
            Some(current) if current != name => Err(RegistrationError::DefaultConflict {
                api_type: api_type.to_string(),
                current: current.clone(),
                requested: name.to_string(),
            }),
            _ => {
                debug!(api_type = %api_type, template = %name, "designated default template");
                entry.default = Some(name.to_string());
                Ok(())
            }
        }
    }

    /// Clears a type's default-template designation.
    pub fn clear_default(&mut self, api_type: &str) {
        if let Some(entry) = self.types.get_mut(api_type) {
            entry.default = None;
        }
    }

    /// The type's default template name, if designated.
    pub fn default_template(&self, api_type: &str) -> Option<&str> {
        self.types.get(api_type)?.default.as_deref()
    }

    /// True if the type has at least one registered template.
    pub fn has_templates(&self, api_type: &str) -> bool {
        self.types
            .get(api_type)
            .is_some_and(|e| !e.templates.is_empty())
    }

    /// Names of the templates registered on a type, in no particular order.
    pub fn template_names(&self, api_type: &str) -> Vec<&str> {
        self.types
            .get(api_type)
            .map(|e| e.templates.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }

    /// Resolves a named template on a type, flattening its inheritance
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] if the type or template is
    /// unknown. For the render-time fallback rules, see the module docs.
    pub fn resolve(&self, api_type: &str, name: &str) -> Result<ResolvedTemplate, RenderError> {
        let entry = self
            .types
            .get(api_type)
            .filter(|e| e.templates.contains_key(name))
            .ok_or_else(|| RenderError::TemplateNotFound {
                api_type: api_type.to_string(),
                template: name.to_string(),
            })?;

        Ok(self.flatten(entry, &entry.templates[name]))
    }

    /// Render-time lookup: explicit name, then default, then fallback.
    pub(crate) fn lookup(
        &self,
        api_type: &str,
        requested: Option<&str>,
    ) -> Result<Lookup, RenderError> {
        let Some(entry) = self.types.get(api_type).filter(|e| !e.templates.is_empty()) else {
            return Ok(Lookup::Fallback);
        };

        let name = match requested {
            Some(name) => name,
            None => match &entry.default {
                Some(default) => default.as_str(),
                None => return Ok(Lookup::Fallback),
            },
        };

        let template =
            entry
                .templates
                .get(name)
                .ok_or_else(|| RenderError::TemplateNotFound {
                    api_type: api_type.to_string(),
                    template: name.to_string(),
                })?;

        Ok(Lookup::Template(self.flatten(entry, template)))
    }

    fn flatten(&self, entry: &TypeEntry, template: &Template) -> ResolvedTemplate {
        let mut fields = Vec::new();
        flatten_into(entry, template, &mut fields);
        ResolvedTemplate {
            name: template.name().to_string(),
            fields,
        }
    }
}

/// Lays down `template`'s flattened fields into `out`, parents first.
/// A key collision replaces the earlier definition in place.
fn flatten_into(entry: &TypeEntry, template: &Template, out: &mut Vec<FieldSpec>) {
    for parent in template.parents() {
        // Parents are validated at registration; a missing one here would
        // mean the parent was never re-registered after a failed cycle.
        if let Some(parent) = entry.templates.get(parent) {
            flatten_into(entry, parent, out);
        }
    }
    for field in template.fields() {
        match out.iter().position(|f| f.key == field.key) {
            Some(i) => out[i] = field.clone(),
            None => out.push(field.clone()),
        }
    }
}

/// Searches the type's extension graph, with `candidate` standing in for
/// any same-named template, for a cycle reachable from `candidate`.
/// Returns the cycle rendered as `"a -> b -> a"`.
fn extension_cycle<'a>(entry: Option<&'a TypeEntry>, candidate: &'a Template) -> Option<String> {
    fn walk<'a>(
        name: &'a str,
        parents_of: &dyn Fn(&str) -> Option<&'a [String]>,
        path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> bool {
        if done.contains(name) {
            return false;
        }
        if path.contains(&name) {
            path.push(name);
            return true;
        }
        path.push(name);
        if let Some(parents) = parents_of(name) {
            for parent in parents {
                if walk(parent.as_str(), parents_of, path, done) {
                    return true;
                }
            }
        }
        path.pop();
        done.insert(name);
        false
    }

    let parents_of = |name: &str| -> Option<&'a [String]> {
        if name == candidate.name() {
            Some(candidate.parents())
        } else {
            entry
                .and_then(|e| e.templates.get(name))
                .map(|t| t.parents())
        }
    };

    let mut path = Vec::new();
    let mut done = HashSet::new();
    walk(candidate.name(), &parents_of, &mut path, &mut done).then(|| path.join(" -> "))
}
