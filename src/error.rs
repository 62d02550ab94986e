//! Error and diagnostic types.
//!
//! Loading never stops at the first problem: every failure inside a load is
//! captured as a [`Diagnostic`], and a failed load hands all of them back in
//! one [`LoadError`].

use thiserror::Error;

/// Failure to convert one raw string into a field's semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("expected 'true' or 'false'")]
    InvalidBool,

    #[error("expected an unsigned integer between 0 and {max}")]
    InvalidUnsigned { max: u32 },

    #[error("expected a non-negative number of seconds")]
    InvalidDuration,

    #[error("{0}")]
    Custom(String),
}

/// Failure of a single field parse, before it is attributed to an owner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing required field '{field}'")]
    Missing { field: String },

    #[error("error parsing '{field}': '{raw}' is not a valid {target} ({source})")]
    Conversion { field: String, raw: String, target: &'static str, source: ConversionError },
}

/// One problem found while loading a definition, attributed to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("{owner}: missing required field '{field}'")]
    MissingField { owner: String, field: String },

    #[error("{owner}: error parsing '{field}': '{raw}' is not a valid {target} ({reason})")]
    Conversion { owner: String, field: String, raw: String, target: &'static str, reason: ConversionError },

    #[error(
        "{owner}: contractType '{identifier}' must either name a declarative contract type or a registered compiled contract type"
    )]
    UnresolvedIdentifier { owner: String, identifier: String },

    #[error("{owner}: {message}")]
    Invalid { owner: String, message: String },
}

impl Diagnostic {
    /// Attribute a field failure to `owner`.
    pub fn from_field(owner: &str, err: FieldError) -> Self {
        match err {
            FieldError::Missing { field } => Diagnostic::MissingField { owner: owner.to_string(), field },
            FieldError::Conversion { field, raw, target, source } => {
                Diagnostic::Conversion { owner: owner.to_string(), field, raw, target, reason: source }
            }
        }
    }

    pub fn owner(&self) -> &str {
        match self {
            Diagnostic::MissingField { owner, .. }
            | Diagnostic::Conversion { owner, .. }
            | Diagnostic::UnresolvedIdentifier { owner, .. }
            | Diagnostic::Invalid { owner, .. } => owner,
        }
    }

    /// Name of the field the diagnostic is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Diagnostic::MissingField { field, .. } | Diagnostic::Conversion { field, .. } => Some(field),
            Diagnostic::UnresolvedIdentifier { .. } => Some("contractType"),
            Diagnostic::Invalid { .. } => None,
        }
    }
}

/// A composite load that failed, with every diagnostic it produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{owner}: {} error(s) while loading", .diagnostics.len())]
pub struct LoadError {
    pub owner: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Malformed config text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("line {line}: expected 'key = value', found '{text}'")]
    Malformed { line: usize, text: String },

    #[error("line {line}: '{name}' opens a nested block; config nodes are flat")]
    NestedBlock { line: usize, name: String },

    #[error("line {line}: value outside of a block")]
    ValueOutsideBlock { line: usize },

    #[error("line {line}: '}}' without a matching block")]
    UnbalancedClose { line: usize },

    #[error("line {line}: block '{name}' is missing its opening '{{'")]
    MissingOpen { line: usize, name: String },

    #[error("block '{name}' is never closed")]
    Unclosed { name: String },
}

/// Registry construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("declarative contract type '{0}' is registered more than once")]
    DuplicateDeclarative(String),

    #[error("compiled contract type key '{0}' is registered more than once")]
    DuplicateCompiled(String),

    #[error("declarative contract type names must not be empty")]
    EmptyName,
}

/// Umbrella error for the document API and the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Node(#[from] NodeError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
