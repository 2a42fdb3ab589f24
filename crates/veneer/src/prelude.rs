//! One-stop import for the common surface.
//!
//! ```rust
//! use veneer::prelude::*;
//! ```

pub use crate::config::Config;
pub use crate::context::{RenderContext, RenderOptions};
pub use crate::error::{RegistrationError, RenderError};
pub use crate::model::{Exposed, Field, Related};
pub use crate::naming::{BasicInflector, NamingStrategy};
pub use crate::render::Renderer;
pub use crate::template::{Template, TemplateRegistry};
