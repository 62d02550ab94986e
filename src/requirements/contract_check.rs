//! Requirements that count other contracts.
//!
//! A contract check names its contracts either by tag or by `contractType`
//! (resolved through the [`TypeRegistry`]) and is met when the number of
//! matching contracts in the right states lies within `[minCount, maxCount]`.

use super::base::RequirementBase;
use crate::LoadContext;
use crate::error::LoadError;
use crate::field::FieldSpec;
use crate::localization::Localizer;
use crate::node::ConfigNode;
use crate::registry::{ContractTarget, ContractTypeRef, TypeRegistry, resolve};
use crate::validation::Validation;
use tracing::debug;

bitflags::bitflags! {
    /// Contract lifecycle states a check counts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ContractStates: u8 {
        const OFFERED   = 1 << 0;
        const ACTIVE    = 1 << 1;
        const COMPLETED = 1 << 2;
        const FAILED    = 1 << 3;
    }
}

/// A contract as seen by the evaluation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRecord {
    /// Declarative type name, or compiled bare name.
    pub type_name: String,
    pub tags: Vec<String>,
    pub state: ContractStates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// `CompleteContract`: counts completed contracts.
    Complete,
    /// `AcceptContract`: counts contracts that were accepted (active or since completed).
    Accept,
}

impl CheckKind {
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Complete => "CompleteContract",
            CheckKind::Accept => "AcceptContract",
        }
    }

    pub fn states(self) -> ContractStates {
        match self {
            CheckKind::Complete => ContractStates::COMPLETED,
            CheckKind::Accept => ContractStates::ACTIVE | ContractStates::COMPLETED,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            CheckKind::Complete => "Must have completed",
            CheckKind::Accept => "Must have accepted",
        }
    }
}

const TAG_TITLE_KEY: &str = "#cc.contracttag.OfType.";

#[derive(Debug, Clone, PartialEq)]
pub struct ContractCheck {
    pub base: RequirementBase,
    pub kind: CheckKind,
    pub target: ContractTarget,
    pub min_count: u32,
    pub max_count: u32,
}

impl ContractCheck {
    /// Declarative load from an authored config node.
    pub fn load(node: &ConfigNode, ctx: &LoadContext<'_>, kind: CheckKind) -> Result<Self, LoadError> {
        let mut v = Validation::new(kind.name());
        let base = RequirementBase::load(node, &mut v);

        let tag: Option<String> = v.parse(node, FieldSpec::new("tag").or(None));
        let target = target_from(node, ctx.registry, tag, &mut v);

        let min_count: u32 = v.parse(node, FieldSpec::new("minCount").or(1));
        let max_count: u32 = v.parse(node, FieldSpec::new("maxCount").or(u32::MAX));
        v.check(min_count <= max_count, || format!("minCount ({min_count}) must not exceed maxCount ({max_count})"));

        let target = v.finish_with(target)?;
        debug!(name = %base.name, kind = kind.name(), ?target, "loaded contract check");

        Ok(ContractCheck { base, kind, target, min_count, max_count })
    }

    /// Persist the state needed to rebuild this check. Writes exactly one of
    /// `tag` and `contractType`.
    pub fn on_save(&self, node: &mut ConfigNode) {
        node.add_value("minCount", self.min_count);
        node.add_value("maxCount", self.max_count);
        node.add_value("checkOnActiveContract", self.base.check_on_active_contract);
        match &self.target {
            ContractTarget::Tag(tag) => node.add_value("tag", tag),
            ContractTarget::Type(ty) => node.add_value("contractType", ty.identifier()),
        }
    }

    /// Rebuild a check from a node written by [`on_save`](Self::on_save).
    ///
    /// Counts have no defaults here: the node came from a check that was
    /// already valid, so a missing count is corruption.
    pub fn on_load(
        node: &ConfigNode,
        ctx: &LoadContext<'_>,
        kind: CheckKind,
        mut base: RequirementBase,
    ) -> Result<Self, LoadError> {
        let mut v = Validation::new(base.name.clone());

        let min_count: u32 = v.parse(node, FieldSpec::new("minCount"));
        let max_count: u32 = v.parse(node, FieldSpec::new("maxCount"));
        base.check_on_active_contract = v.parse(node, FieldSpec::new("checkOnActiveContract").or(true));

        let tag = node.get_value("tag").map(str::to_string);
        let target = target_from(node, ctx.registry, tag, &mut v);

        let target = v.finish_with(target)?;
        Ok(ContractCheck { base, kind, target, min_count, max_count })
    }

    /// Display name of the contracts this check counts.
    ///
    /// Fallbacks, in order: localized tag text, `of type {tag}`, the declarative
    /// type's generic title, the declarative identifier, the compiled bare name.
    pub fn contract_title(&self, registry: &TypeRegistry, localizer: &dyn Localizer) -> String {
        match &self.target {
            ContractTarget::Tag(tag) => match localizer.try_get_string_by_tag(&format!("{TAG_TITLE_KEY}{tag}")) {
                Some(text) => text.into_owned(),
                None => format!("of type {tag}"),
            },
            ContractTarget::Type(ContractTypeRef::Declarative(identifier)) => match registry.valid_declarative(identifier)
            {
                Some(ty) => ty.generic_title.clone(),
                None => identifier.clone(),
            },
            ContractTarget::Type(ContractTypeRef::Compiled { ty, .. }) => ty.name.clone(),
        }
    }

    pub fn title(&self, registry: &TypeRegistry, localizer: &dyn Localizer) -> String {
        if let Some(title) = &self.base.title {
            return title.clone();
        }

        let contract = self.contract_title(registry, localizer);
        let count = match (self.min_count, self.max_count) {
            (min, max) if min == max => format!("exactly {min}"),
            (0, u32::MAX) => "any number of".to_string(),
            (0, max) => format!("at most {max}"),
            (min, u32::MAX) => format!("at least {min}"),
            (min, max) => format!("between {min} and {max}"),
        };
        format!("{} {count} contract(s): {contract}", self.kind.verb())
    }

    pub fn matches(&self, record: &ContractRecord) -> bool {
        if !self.kind.states().intersects(record.state) {
            return false;
        }
        match &self.target {
            ContractTarget::Tag(tag) => record.tags.iter().any(|t| t == tag),
            ContractTarget::Type(ty) => record.type_name == ty.type_name(),
        }
    }

    /// Count matching contracts and compare against the bounds.
    pub fn check_counts(&self, contracts: &[ContractRecord]) -> bool {
        let count = contracts.iter().filter(|c| self.matches(c)).count();
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        (self.min_count..=self.max_count).contains(&count)
    }
}

/// Tag wins; otherwise `contractType` is mandatory and resolved.
fn target_from(
    node: &ConfigNode,
    registry: &TypeRegistry,
    tag: Option<String>,
    v: &mut Validation,
) -> Option<ContractTarget> {
    if let Some(tag) = tag {
        return Some(ContractTarget::Tag(tag));
    }

    let identifier: Option<String> = v.parse(node, FieldSpec::new("contractType"));
    let identifier = identifier?;
    match resolve(registry, &identifier, v.owner()) {
        Ok(ty) => Some(ContractTarget::Type(ty)),
        Err(diagnostic) => {
            v.record(diagnostic);
            None
        }
    }
}
