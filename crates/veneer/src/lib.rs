//! Template-driven projection of domain objects into documents.
//!
//! veneer turns enrolled domain objects into ordered JSON-shaped documents
//! through named, per-type templates. A type declares what it exposes by
//! implementing [`Exposed`]; templates declare which of those names appear
//! in a given representation, in what order, under what keys, and under
//! what conditions. The output is a [`serde_json::Value`] that format
//! adapters (see the `veneer-formats` crate) serialize to JSON, XML, or
//! JSONP.
//!
//! # Design
//!
//! The engine is split along the data flow:
//!
//! - [`model`]: the [`Exposed`] capability trait domain types implement
//! - [`template`]: template declaration and the per-type registry with
//!   inheritance flattening
//! - [`config`]: engine-wide wrapping and JSONP policy
//! - [`render`]: the renderer that projects objects through resolved
//!   templates into documents
//! - [`naming`]: the inflection strategy for root keys and XML tags
//!
//! Everything is single-threaded and synchronous. Template closures are
//! stored behind `Rc`, registries are plain maps, and a render call borrows
//! its inputs for the duration of the call only. Set up one engine per
//! thread if you need parallelism.
//!
//! # Quick start
//!
//! ```rust
//! use serde_json::{json, Value};
//! use veneer::prelude::*;
//!
//! struct User {
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! impl Exposed for User {
//!     fn api_type(&self) -> &str {
//!         "User"
//!     }
//!
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "first_name" => Some(Value::from(self.first_name.as_str())),
//!             "last_name" => Some(Value::from(self.last_name.as_str())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut registry = TemplateRegistry::new();
//! registry.register(
//!     "User",
//!     Template::new("name_only")
//!         .attribute("first_name")
//!         .attribute("last_name"),
//! )?;
//!
//! let config = Config::default().add_root_node_for("User");
//! let renderer = Renderer::new(&registry, &config);
//!
//! let user = User {
//!     first_name: "Han".into(),
//!     last_name: "Solo".into(),
//! };
//! let doc = renderer.render_one(&user, &RenderOptions::new().template("name_only"))?;
//!
//! assert_eq!(
//!     doc,
//!     json!({"user": {"first_name": "Han", "last_name": "Solo"}})
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Fallback
//!
//! An object whose type has no applicable template still renders: every
//! name from [`Exposed::attribute_names`] is dumped shallowly in order, or
//! `null` when the type declares none. Missing templates are only an error
//! when a template is asked for *by name* on a type that has templates.

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod naming;
pub mod render;
pub mod template;

pub mod prelude;

pub use config::Config;
pub use context::{RenderContext, RenderOptions};
pub use error::{FieldKind, RegistrationError, RenderError};
pub use model::{Exposed, Field, Related};
pub use naming::{BasicInflector, NamingStrategy};
pub use render::{Renderer, MAX_ASSOCIATION_DEPTH};
pub use template::{FieldSource, FieldSpec, ResolvedTemplate, Template, TemplateRegistry};
