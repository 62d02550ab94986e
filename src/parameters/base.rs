use crate::field::FieldSpec;
use crate::node::ConfigNode;
use crate::validation::Validation;

/// Fields every parameter factory carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBase {
    pub name: String,
    pub kind: String,
    pub title: Option<String>,
    /// Failing an optional parameter does not fail the contract.
    pub optional: bool,
    pub hidden: bool,
    /// Only completable after the parameters listed before it.
    pub complete_in_sequence: bool,
}

impl ParameterBase {
    pub fn load(node: &ConfigNode, v: &mut Validation) -> Self {
        let kind: String = v.parse(node, FieldSpec::new("type"));
        let name: String = v.parse(node, FieldSpec::new("name").or(kind.clone()));
        if !name.is_empty() {
            v.set_owner(name.clone());
        }

        ParameterBase {
            title: v.parse(node, FieldSpec::new("title").or(None)),
            optional: v.parse(node, FieldSpec::new("optional").or(false)),
            hidden: v.parse(node, FieldSpec::new("hidden").or(false)),
            complete_in_sequence: v.parse(node, FieldSpec::new("completeInSequence").or(false)),
            name,
            kind,
        }
    }
}
