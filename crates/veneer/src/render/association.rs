//! Recursive rendering of association values.
//!
//! An association field hands the renderer a [`Related`] value; this module
//! turns it into a document fragment. Singular associations keep their key
//! with a `null` value when absent; plural associations render in iteration
//! order and become `[]` when empty. Either way the target objects go
//! through their own type's templates, never the template of the object
//! that referenced them.

use serde_json::Value;

use crate::context::RenderOptions;
use crate::error::RenderError;
use crate::model::Related;
use crate::render::Renderer;

impl Renderer<'_> {
    /// Renders an association value at the given recursion depth.
    ///
    /// `template` pins a template on every target; `None` lets each target
    /// resolve its own default (or the shallow-dump fallback for types with
    /// no templates at all).
    pub(super) fn resolve_association(
        &self,
        related: Related<'_>,
        template: Option<&str>,
        options: &RenderOptions,
        depth: usize,
    ) -> Result<Value, RenderError> {
        match related {
            Related::One(None) => Ok(Value::Null),
            Related::One(Some(object)) => self.project(object, template, options, depth),
            Related::Many(objects) => {
                let mut items = Vec::new();
                for object in objects {
                    items.push(self.project(object, template, options, depth)?);
                }
                Ok(Value::Array(items))
            }
        }
    }
}
