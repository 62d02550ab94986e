use crate::field::FieldSpec;
use crate::node::ConfigNode;
use crate::validation::Validation;

/// Fields every requirement carries, whatever its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementBase {
    pub name: String,
    /// Catalog name of the requirement kind (`type` in config).
    pub kind: String,
    /// Met when the underlying check fails, and vice versa.
    pub invert: bool,
    /// Re-check while the parent contract is active, not only when offering it.
    pub check_on_active_contract: bool,
    pub title: Option<String>,
}

impl RequirementBase {
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        RequirementBase { name: kind.clone(), kind, invert: false, check_on_active_contract: true, title: None }
    }

    /// Parse the shared fields. Renames the accumulator's owner to the
    /// requirement's name so later diagnostics point at it.
    pub fn load(node: &ConfigNode, v: &mut Validation) -> Self {
        let kind: String = v.parse(node, FieldSpec::new("type"));
        let name: String = v.parse(node, FieldSpec::new("name").or(kind.clone()));
        if !name.is_empty() {
            v.set_owner(name.clone());
        }

        RequirementBase {
            invert: v.parse(node, FieldSpec::new("invertRequirement").or(false)),
            check_on_active_contract: v.parse(node, FieldSpec::new("checkOnActiveContract").or(true)),
            title: v.parse(node, FieldSpec::new("title").or(None)),
            name,
            kind,
        }
    }

    /// Write the shared fields ahead of the kind's own state.
    /// `checkOnActiveContract` belongs to the kind's `on_save`.
    pub fn save(&self, node: &mut ConfigNode) {
        node.add_value("name", &self.name);
        node.add_value("type", &self.kind);
        node.add_value("invertRequirement", self.invert);
        if let Some(title) = &self.title {
            node.add_value("title", title);
        }
    }

    /// Read back what [`save`](Self::save) wrote.
    pub fn restore(node: &ConfigNode, v: &mut Validation) -> Self {
        let kind: String = v.parse(node, FieldSpec::new("type"));
        let name: String = v.parse(node, FieldSpec::new("name").or(kind.clone()));
        if !name.is_empty() {
            v.set_owner(name.clone());
        }

        RequirementBase {
            invert: v.parse(node, FieldSpec::new("invertRequirement").or(false)),
            check_on_active_contract: true,
            title: v.parse(node, FieldSpec::new("title").or(None)),
            name,
            kind,
        }
    }

    /// Whether the requirement has to be evaluated at all right now.
    pub fn applies(&self, parent_active: bool) -> bool {
        !parent_active || self.check_on_active_contract
    }
}
