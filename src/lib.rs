//! Declarative contract configuration.
//!
//! Turns flat, untyped [`ConfigNode`]s into validated requirement and
//! parameter objects. Every object kind declares its fields once; parsing,
//! type coercion, defaults and error accumulation are shared.
//!
//! ```text
//! text ─▶ ConfigNode ─▶ Validation::parse (per field, never short-circuits)
//!                           │
//!                           ├─ contractType ─▶ registry::resolve
//!                           ▼
//!                  factory / requirement ─▶ generate / check
//!                           │
//!                           └─ save ⇄ restore (session state)
//! ```

#[macro_use]
mod macros;
mod api;
mod error;
mod field;
mod localization;
mod node;
pub mod parameters;
pub mod registry;
pub mod requirements;
mod validation;

pub use api::{Definition, LoadReport, load_document, load_nodes};
pub use error::{ConversionError, Diagnostic, Error, FieldError, LoadError, NodeError, RegistryError, Result};
pub use field::{Converter, Duration, FieldKind, FieldSpec, FieldValue, parse_field};
pub use localization::{Localizer, NoLocalization, StringTable};
pub use node::ConfigNode;
pub use registry::TypeRegistry;
pub use validation::Validation;

/// What every load needs besides the node itself.
///
/// The registry is borrowed, never global: whoever built it decides who sees it.
#[derive(Debug, Clone, Copy)]
pub struct LoadContext<'a> {
    pub registry: &'a TypeRegistry,
}

impl<'a> LoadContext<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        LoadContext { registry }
    }
}
