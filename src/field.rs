//! Field parsing.
//!
//! A field is read from a [`ConfigNode`] against a [`FieldSpec`]: its name, an
//! optional default and an optional converter. The semantic type is the Rust
//! type the caller asks for; each supported type implements [`FieldValue`],
//! which is the canonical string-to-value strategy for that type.
//!
//! ```text
//! node ─┬─ key absent ─┬─ default     ──▶ Ok(default)
//!       │              └─ no default  ──▶ Err(Missing)
//!       └─ key present ─┬─ converter  ──▶ converter(values)
//!                       └─ FieldValue ──▶ T::from_raw(values)
//! ```
//!
//! Scalars read the first value under the key. Sequences read every value in
//! node order. Attribution to an owner and logging happen one level up, in
//! [`Validation::parse`](crate::Validation::parse).

use crate::error::{ConversionError, FieldError};
use crate::node::ConfigNode;
use std::fmt;

/// Semantic types understood by the field parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Bool,
    UnsignedInteger,
    Duration,
    StringList,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Bool => "boolean",
            FieldKind::UnsignedInteger => "unsigned integer",
            FieldKind::Duration => "duration",
            FieldKind::StringList => "list of strings",
        }
    }

    /// Sequence kinds collect every repeated value instead of the first one.
    pub fn is_sequence(self) -> bool {
        matches!(self, FieldKind::StringList)
    }
}

/// A span of game time, stored as seconds.
///
/// `Duration(0.0)` means "no duration limit". An explicit `0.0` and an absent
/// field defaulted to `0.0` are the same value once parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Duration(f64);

impl Duration {
    pub const UNLIMITED: Duration = Duration(0.0);

    /// Returns `None` for negative or non-finite input.
    pub fn from_secs(seconds: f64) -> Option<Self> {
        (seconds.is_finite() && seconds >= 0.0).then_some(Duration(seconds))
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    pub fn is_unlimited(self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical conversion from raw node values to a typed value.
///
/// `values` is never empty: the parser only calls this when the key exists.
pub trait FieldValue: Sized {
    const KIND: FieldKind;

    fn from_raw(values: &[&str]) -> Result<Self, ConversionError>;
}

fn first<'a>(values: &[&'a str]) -> &'a str {
    values.first().copied().unwrap_or_default()
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn from_raw(values: &[&str]) -> Result<Self, ConversionError> {
        Ok(first(values).to_string())
    }
}

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_raw(values: &[&str]) -> Result<Self, ConversionError> {
        let raw = first(values).trim();
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::InvalidBool)
        }
    }
}

impl FieldValue for u32 {
    const KIND: FieldKind = FieldKind::UnsignedInteger;

    fn from_raw(values: &[&str]) -> Result<Self, ConversionError> {
        let raw = first(values).trim();
        // `u32::from_str` accepts a leading '+'; config values never carry one.
        if raw.starts_with('+') {
            return Err(ConversionError::InvalidUnsigned { max: u32::MAX });
        }
        raw.parse::<u32>().map_err(|_| ConversionError::InvalidUnsigned { max: u32::MAX })
    }
}

impl FieldValue for Duration {
    const KIND: FieldKind = FieldKind::Duration;

    fn from_raw(values: &[&str]) -> Result<Self, ConversionError> {
        first(values)
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Duration::from_secs)
            .ok_or(ConversionError::InvalidDuration)
    }
}

impl FieldValue for Vec<String> {
    const KIND: FieldKind = FieldKind::StringList;

    fn from_raw(values: &[&str]) -> Result<Self, ConversionError> {
        Ok(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Nullable field: present means `Some`, absent falls back to the default
/// (normally `None`).
impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn from_raw(values: &[&str]) -> Result<Self, ConversionError> {
        T::from_raw(values).map(Some)
    }
}

pub type Converter<'a, T> = Box<dyn Fn(&[&str]) -> Result<T, ConversionError> + 'a>;

/// What to read, and what to do when it is missing.
pub struct FieldSpec<'a, T> {
    name: &'a str,
    default: Option<T>,
    converter: Option<Converter<'a, T>>,
}

impl<'a, T: FieldValue> FieldSpec<'a, T> {
    /// A mandatory field.
    pub fn new(name: &'a str) -> Self {
        FieldSpec { name, default: None, converter: None }
    }

    /// Make the field optional, falling back to `default` when absent.
    pub fn or(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    /// Replace the canonical conversion for this field.
    pub fn with_converter(mut self, converter: impl Fn(&[&str]) -> Result<T, ConversionError> + 'a) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn is_mandatory(&self) -> bool {
        self.default.is_none()
    }
}

impl<T: fmt::Debug> fmt::Debug for FieldSpec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("converter", &self.converter.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// Read one field from `node`.
///
/// Consumes the spec so the default can be moved out instead of cloned.
pub fn parse_field<T: FieldValue>(node: &ConfigNode, spec: FieldSpec<'_, T>) -> Result<T, FieldError> {
    let FieldSpec { name, default, converter } = spec;

    let values = if T::KIND.is_sequence() {
        node.get_values(name)
    } else {
        node.get_value(name).into_iter().collect()
    };

    if values.is_empty() {
        return default.ok_or_else(|| FieldError::Missing { field: name.to_string() });
    }

    let converted = match &converter {
        Some(convert) => convert(values.as_slice()),
        None => T::from_raw(values.as_slice()),
    };

    converted.map_err(|source| FieldError::Conversion {
        field: name.to_string(),
        raw: values.join(", "),
        target: T::KIND.name(),
        source,
    })
}
