//! Capability surface for template-aware domain objects.
//!
//! The engine never reflects over concrete types. Instead, a domain type
//! enrolls by implementing [`Exposed`], an explicit name-to-value map with
//! three lookup channels:
//!
//! 1. [`attribute`](Exposed::attribute): read a named value verbatim
//! 2. [`accessor`](Exposed::accessor): invoke a named zero-argument accessor,
//!    whose result may itself be another enrolled object
//! 3. [`association`](Exposed::association): look up a related object or
//!    collection, rendered recursively through its own templates
//!
//! A channel returning `None` means the name does not exist on this type;
//! the renderer turns that into a field-resolution error. An association
//! that exists but is empty is `Some(Related::One(None))` or
//! `Some(Related::Many(..))` over an empty iterator: present but null/empty,
//! which is a very different thing from absent.
//!
//! # Example
//!
//! ```rust
//! use serde_json::Value;
//! use veneer::{Exposed, Related};
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
//!
//!     fn attribute_names(&self) -> Vec<&str> {
//!         vec!["first_name", "last_name"]
//!     }
//! }
//! ```

use serde_json::Value;

/// The result of a zero-argument accessor invocation.
///
/// Accessors usually produce plain values, but they may also hand back
/// another enrolled object. Such objects are recursively documented through
/// their own type's default template, never by blindly re-applying the
/// template currently being rendered.
pub enum Field<'a> {
    /// A plain document value, emitted verbatim.
    Value(Value),

    /// An enrolled object, rendered through its own default template
    /// (or the shallow-dump fallback when it has none).
    Object(&'a dyn Exposed),
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Field::Object(obj) => f.debug_tuple("Object").field(&obj.api_type()).finish(),
        }
    }
}

/// The value of an association lookup: one related object (possibly absent)
/// or a sequentially-iterable collection of them.
///
/// The engine requires only sequential access to plural associations, so any
/// source that can produce an iterator works: a slice, a pre-filtered scope,
/// a lazily-evaluated query result. Iteration order is preserved in the
/// rendered document.
pub enum Related<'a> {
    /// A singular association. `None` renders as `null` (the key is kept).
    One(Option<&'a dyn Exposed>),

    /// A plural association. An empty iterator renders as `[]` (the key is
    /// kept, and the value is never `null`).
    Many(Box<dyn Iterator<Item = &'a dyn Exposed> + 'a>),
}

impl<'a> Related<'a> {
    /// A present singular association.
    pub fn one(object: &'a dyn Exposed) -> Self {
        Related::One(Some(object))
    }

    /// An absent singular association (renders as `null`).
    pub fn none() -> Self {
        Related::One(None)
    }

    /// A plural association over any sequential source.
    pub fn many<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn Exposed>,
        I::IntoIter: 'a,
    {
        Related::Many(Box::new(objects.into_iter()))
    }
}

impl std::fmt::Debug for Related<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Related::One(obj) => f
                .debug_tuple("One")
                .field(&obj.map(|o| o.api_type()))
                .finish(),
            Related::Many(_) => f.write_str("Many(..)"),
        }
    }
}

/// A type enrolled in the projection engine.
///
/// Single-threaded by design (see the crate docs on concurrency):
/// implementations need no `Send + Sync` bounds, and lookups borrow from
/// `self` for the duration of a render call only. The rendered document
/// holds no reference back to the source object.
pub trait Exposed {
    /// The type identifier used for template lookup, config checks, and
    /// root-key derivation. Conventionally the bare type name
    /// (e.g. `"User"`, `"TaskList"`).
    fn api_type(&self) -> &str;

    /// Reads a named plain attribute. `None` means the attribute does not
    /// exist on this type.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// The names of the visible simple attributes, in declaration order.
    ///
    /// Drives the shallow-dump fallback used when no template applies.
    /// The default (empty) makes the fallback render as `null`.
    fn attribute_names(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Invokes a named zero-argument accessor.
    ///
    /// The default delegates to [`attribute`](Self::attribute), which is
    /// right for types whose computed values are exposed the same way as
    /// stored ones. Override to hand back [`Field::Object`] for accessors
    /// returning enrolled objects.
    fn accessor(&self, name: &str) -> Option<Field<'_>> {
        self.attribute(name).map(Field::Value)
    }

    /// Looks up a named association. `None` means no such association is
    /// declared on this type (a template referencing it fails the render).
    fn association(&self, _name: &str) -> Option<Related<'_>> {
        None
    }
}
