//! Root-node wrapping, prefix/postfix keys, and meta merging.
//!
//! Wrapping is a render-time concern driven by [`Config`](crate::Config)
//! and the per-call [`RenderOptions`](crate::RenderOptions); templates know
//! nothing about it. An explicit `options.root` always wins and forces a
//! root node even for types outside the configured set.

use serde_json::{Map, Value};

use crate::context::RenderOptions;
use crate::render::Renderer;

impl Renderer<'_> {
    /// Wraps a singular document in a root node when config or options ask
    /// for one, merging any meta entries as siblings of the root key.
    pub(super) fn wrap_one(&self, api_type: &str, doc: Value, options: &RenderOptions) -> Value {
        let key = match &options.root {
            Some(key) => Some(key.clone()),
            None if self.config.wraps(api_type) => Some(self.naming().singular_key(api_type)),
            None => None,
        };

        match key {
            Some(key) => {
                let mut out = Map::new();
                out.insert(key, doc);
                merge_meta(&mut out, options);
                Value::Object(out)
            }
            None => doc,
        }
    }

    /// Wraps a collection array in a root node. `derived_key` is the plural
    /// key computed from the first element's type, already gated on config;
    /// an explicit `options.root` overrides it and also forces wrapping of
    /// an empty collection.
    pub(super) fn wrap_many(
        &self,
        array: Value,
        derived_key: Option<String>,
        options: &RenderOptions,
    ) -> Value {
        match options.root.clone().or(derived_key) {
            Some(key) => {
                let mut out = Map::new();
                out.insert(key, array);
                merge_meta(&mut out, options);
                Value::Object(out)
            }
            None => array,
        }
    }

    /// Legacy per-element wrapping: each element of a collection under its
    /// own singular key, when the engine is configured for it and the
    /// element's type is in the root-node set.
    pub(super) fn wrap_element(&self, api_type: &str, doc: Value) -> Value {
        if self.config.wraps_collection_elements() && self.config.wraps(api_type) {
            let mut out = Map::new();
            out.insert(self.naming().singular_key(api_type), doc);
            Value::Object(out)
        } else {
            doc
        }
    }
}

/// Injects the synthetic `"prefix"` and `"postfix"` keys into a singular
/// object document. Non-object documents (the `null` fallback) pass through
/// untouched.
pub(super) fn apply_affixes(doc: Value, options: &RenderOptions) -> Value {
    if options.prefix.is_none() && options.postfix.is_none() {
        return doc;
    }

    let Value::Object(inner) = doc else {
        return doc;
    };

    let mut out = Map::new();
    if let Some(prefix) = &options.prefix {
        out.insert("prefix".to_string(), prefix.clone());
    }
    out.extend(inner);
    if let Some(postfix) = &options.postfix {
        out.insert("postfix".to_string(), postfix.clone());
    }
    Value::Object(out)
}

/// Merges meta entries as siblings of an existing root key. Callers only
/// invoke this when a root key is present; meta is silently dropped for
/// unwrapped renders.
fn merge_meta(out: &mut Map<String, Value>, options: &RenderOptions) {
    if let Some(meta) = &options.meta {
        for (key, value) in meta {
            out.insert(key.clone(), value.clone());
        }
    }
}
