//! Validation accumulator.
//!
//! Every composite load threads one [`Validation`] through all of its field
//! parses. The flag starts out `true` and is AND-ed with each result, but no
//! parse ever returns early: a node with three mistakes reports three
//! diagnostics from a single load.
//!
//! ```text
//! Validation::new(owner)
//!   ├─ parse(minCount)  ── ok     valid = true
//!   ├─ parse(maxCount)  ── error  valid = false, diagnostics += 1
//!   ├─ parse(tag)       ── ok     valid = false
//!   └─ finish()         ── Err(LoadError { diagnostics })
//! ```
//!
//! Each diagnostic is written to `tracing` as it is recorded, so the log and
//! the returned error always agree.

use crate::error::{Diagnostic, LoadError};
use crate::field::{FieldSpec, FieldValue, parse_field};
use crate::node::ConfigNode;
use tracing::error;

#[derive(Debug, Clone)]
pub struct Validation {
    owner: String,
    valid: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Validation {
    pub fn new(owner: impl Into<String>) -> Self {
        Validation { owner: owner.into(), valid: true, diagnostics: Vec::new() }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Rename the owner used for diagnostics recorded from now on.
    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    /// Parse one field and fold the outcome into the accumulated result.
    ///
    /// On failure the diagnostic is recorded and `T::default()` is returned so
    /// the caller can keep parsing; the value must not be used once
    /// [`finish`](Self::finish) reports the load as invalid.
    pub fn parse<T: FieldValue + Default>(&mut self, node: &ConfigNode, spec: FieldSpec<'_, T>) -> T {
        match parse_field(node, spec) {
            Ok(value) => value,
            Err(err) => {
                let diagnostic = Diagnostic::from_field(&self.owner, err);
                self.record(diagnostic);
                T::default()
            }
        }
    }

    /// Cross-field constraint: records `message` when `ok` is false.
    pub fn check(&mut self, ok: bool, message: impl FnOnce() -> String) -> bool {
        if !ok {
            let diagnostic = Diagnostic::Invalid { owner: self.owner.clone(), message: message() };
            self.record(diagnostic);
        }
        ok
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        error!(owner = %self.owner, "{diagnostic}");
        self.valid = false;
        self.diagnostics.push(diagnostic);
    }

    /// Fold in a nested accumulator (for example the base fields of a kind).
    pub fn merge(&mut self, other: Validation) {
        self.valid &= other.valid;
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `Ok` only if every parse and check succeeded.
    pub fn finish(self) -> Result<(), LoadError> {
        if self.valid { Ok(()) } else { Err(LoadError { owner: self.owner, diagnostics: self.diagnostics }) }
    }

    /// Like [`finish`](Self::finish), handing back a value that is only
    /// produced when its own inputs were valid.
    pub fn finish_with<T>(mut self, value: Option<T>) -> Result<T, LoadError> {
        match value {
            Some(value) if self.valid => Ok(value),
            Some(_) => Err(LoadError { owner: self.owner, diagnostics: self.diagnostics }),
            None => {
                if self.valid {
                    self.check(false, || "definition is incomplete".to_string());
                }
                Err(LoadError { owner: self.owner, diagnostics: self.diagnostics })
            }
        }
    }
}
