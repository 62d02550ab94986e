//! Parameters: the goals of a contract.
//!
//! A parameter factory is loaded once from config and then asked to
//! [`generate`](ParameterFactory::generate) a fresh runtime parameter for
//! every contract that uses it. Generation never parses: a factory only exists
//! if its load succeeded.

mod base;
mod duration;
mod vessel_group;

#[cfg(test)]
mod tests;

pub use base::ParameterBase;
pub use duration::{DurationFactory, DurationParameter};
pub use vessel_group::{VesselParameterGroup, VesselParameterGroupFactory};

use crate::LoadContext;
use crate::error::LoadError;
use crate::field::FieldSpec;
use crate::node::ConfigNode;
use crate::validation::Validation;
use std::fmt;

/// The contract a parameter is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub name: String,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Contract { name: name.into() }
    }
}

/// Runtime parameters handed to the evaluation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    VesselGroup(VesselParameterGroup),
    Duration(DurationParameter),
}

pub trait ParameterFactory: fmt::Debug {
    fn base(&self) -> &ParameterBase;

    fn generate(&self, contract: &Contract) -> Parameter;
}

type LoadFn = fn(&ConfigNode, &LoadContext<'_>) -> Result<Box<dyn ParameterFactory>, LoadError>;

pub struct ParameterKind {
    pub name: &'static str,
    pub load: LoadFn,
}

impl fmt::Debug for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterKind").field("name", &self.name).finish()
    }
}

fn load_vessel_group(node: &ConfigNode, ctx: &LoadContext<'_>) -> Result<Box<dyn ParameterFactory>, LoadError> {
    Ok(Box::new(VesselParameterGroupFactory::load(node, ctx)?))
}

fn load_duration(node: &ConfigNode, ctx: &LoadContext<'_>) -> Result<Box<dyn ParameterFactory>, LoadError> {
    Ok(Box::new(DurationFactory::load(node, ctx)?))
}

static CATALOG: &[ParameterKind] = &[
    ParameterKind { name: "VesselParameterGroup", load: load_vessel_group },
    ParameterKind { name: "Duration", load: load_duration },
];

pub fn catalog() -> &'static [ParameterKind] {
    CATALOG
}

pub fn find_kind(name: &str) -> Option<&'static ParameterKind> {
    CATALOG.iter().find(|kind| kind.name == name)
}

/// Load an authored parameter node, dispatching on its `type`.
pub fn load(node: &ConfigNode, ctx: &LoadContext<'_>) -> Result<Box<dyn ParameterFactory>, LoadError> {
    let mut v = Validation::new(node.name());
    let kind: Option<String> = v.parse(node, FieldSpec::new("type"));
    let found = kind.as_deref().and_then(find_kind);
    if let Some(kind) = &kind {
        v.check(found.is_some(), || format!("unknown parameter type '{kind}'"));
    }
    let found = v.finish_with(found)?;
    (found.load)(node, ctx)
}
