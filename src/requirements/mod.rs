//! Requirements: conditions a contract must meet before it is offered (and,
//! optionally, while it is active).
//!
//! Each requirement kind is listed in [`catalog`] with a `load` function for
//! authored config and a `restore` function for saved state. [`load`] and
//! [`restore`] read the node's `type` and dispatch.
//!
//! ```text
//! authored node ── load ────┐
//!                           ├─▶ Box<dyn ContractRequirement> ── save ──▶ session node
//! session node ─── restore ─┘                                              │
//!        ▲                                                                 │
//!        └─────────────────────────────────────────────────────────────────┘
//! ```

mod base;
mod contract_check;

#[cfg(test)]
mod tests;

pub use base::RequirementBase;
pub use contract_check::{CheckKind, ContractCheck, ContractRecord, ContractStates};

use crate::LoadContext;
use crate::error::LoadError;
use crate::field::FieldSpec;
use crate::localization::Localizer;
use crate::node::ConfigNode;
use crate::registry::TypeRegistry;
use crate::validation::Validation;
use std::fmt;

/// A loaded, valid requirement.
pub trait ContractRequirement: fmt::Debug {
    fn base(&self) -> &RequirementBase;

    /// The kind's own check, before `checkOnActiveContract` and inversion.
    fn requirement_met(&self, contracts: &[ContractRecord]) -> bool;

    fn title(&self, registry: &TypeRegistry, localizer: &dyn Localizer) -> String;

    /// Write the kind's state; the base fields are written by [`save`].
    fn on_save(&self, node: &mut ConfigNode);
}

impl ContractRequirement for ContractCheck {
    fn base(&self) -> &RequirementBase {
        &self.base
    }

    fn requirement_met(&self, contracts: &[ContractRecord]) -> bool {
        self.check_counts(contracts)
    }

    fn title(&self, registry: &TypeRegistry, localizer: &dyn Localizer) -> String {
        ContractCheck::title(self, registry, localizer)
    }

    fn on_save(&self, node: &mut ConfigNode) {
        ContractCheck::on_save(self, node)
    }
}

type LoadFn = fn(&ConfigNode, &LoadContext<'_>) -> Result<Box<dyn ContractRequirement>, LoadError>;
type RestoreFn = fn(&ConfigNode, &LoadContext<'_>, RequirementBase) -> Result<Box<dyn ContractRequirement>, LoadError>;

/// One entry of the requirement catalog.
pub struct RequirementKind {
    pub name: &'static str,
    pub load: LoadFn,
    pub restore: RestoreFn,
}

impl fmt::Debug for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequirementKind").field("name", &self.name).finish()
    }
}

fn load_complete(node: &ConfigNode, ctx: &LoadContext<'_>) -> Result<Box<dyn ContractRequirement>, LoadError> {
    Ok(Box::new(ContractCheck::load(node, ctx, CheckKind::Complete)?))
}

fn load_accept(node: &ConfigNode, ctx: &LoadContext<'_>) -> Result<Box<dyn ContractRequirement>, LoadError> {
    Ok(Box::new(ContractCheck::load(node, ctx, CheckKind::Accept)?))
}

fn restore_complete(
    node: &ConfigNode,
    ctx: &LoadContext<'_>,
    base: RequirementBase,
) -> Result<Box<dyn ContractRequirement>, LoadError> {
    Ok(Box::new(ContractCheck::on_load(node, ctx, CheckKind::Complete, base)?))
}

fn restore_accept(
    node: &ConfigNode,
    ctx: &LoadContext<'_>,
    base: RequirementBase,
) -> Result<Box<dyn ContractRequirement>, LoadError> {
    Ok(Box::new(ContractCheck::on_load(node, ctx, CheckKind::Accept, base)?))
}

static CATALOG: &[RequirementKind] = &[
    RequirementKind { name: "CompleteContract", load: load_complete, restore: restore_complete },
    RequirementKind { name: "AcceptContract", load: load_accept, restore: restore_accept },
];

/// Every requirement kind known to this crate.
pub fn catalog() -> &'static [RequirementKind] {
    CATALOG
}

pub fn find_kind(name: &str) -> Option<&'static RequirementKind> {
    CATALOG.iter().find(|kind| kind.name == name)
}

/// Look up the node's `type`; records a diagnostic when it is missing or unknown.
fn kind_of(node: &ConfigNode, v: &mut Validation) -> Option<&'static RequirementKind> {
    let kind: Option<String> = v.parse(node, FieldSpec::new("type"));
    let kind = kind?;
    let found = find_kind(&kind);
    v.check(found.is_some(), || format!("unknown requirement type '{kind}'"));
    found
}

/// Load an authored requirement node.
pub fn load(node: &ConfigNode, ctx: &LoadContext<'_>) -> Result<Box<dyn ContractRequirement>, LoadError> {
    let mut v = Validation::new(node.name());
    let kind = kind_of(node, &mut v);
    let kind = v.finish_with(kind)?;
    (kind.load)(node, ctx)
}

/// Save a requirement for a later [`restore`].
pub fn save(requirement: &dyn ContractRequirement, node: &mut ConfigNode) {
    requirement.base().save(node);
    requirement.on_save(node);
}

/// Rebuild a requirement from a node written by [`save`].
pub fn restore(node: &ConfigNode, ctx: &LoadContext<'_>) -> Result<Box<dyn ContractRequirement>, LoadError> {
    let mut v = Validation::new(node.name());
    let base = RequirementBase::restore(node, &mut v);
    let kind = match base.kind.as_str() {
        "" => None,
        name => {
            let found = find_kind(name);
            v.check(found.is_some(), || format!("unknown requirement type '{name}'"));
            found
        }
    };
    let kind = v.finish_with(kind)?;
    (kind.restore)(node, ctx, base)
}

/// Evaluate a requirement the way the engine does: skipped while the parent
/// contract is active unless `checkOnActiveContract`, then inverted if asked.
pub fn check(requirement: &dyn ContractRequirement, contracts: &[ContractRecord], parent_active: bool) -> bool {
    let base = requirement.base();
    if !base.applies(parent_active) {
        return true;
    }
    requirement.requirement_met(contracts) != base.invert
}
