use super::base::ParameterBase;
use super::{Contract, Parameter, ParameterFactory};
use crate::LoadContext;
use crate::error::LoadError;
use crate::field::{Duration, FieldSpec};
use crate::node::ConfigNode;
use crate::validation::Validation;

/// Groups vessel parameters so they must all hold for the same vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselParameterGroupFactory {
    pub base: ParameterBase,
    /// How long the child parameters must hold; `0` means no wait.
    pub duration: Duration,
    /// Name under which the completing vessel is remembered.
    pub define: Option<String>,
    /// Vessels allowed to complete the group; empty means any.
    pub vessels: Vec<String>,
}

impl VesselParameterGroupFactory {
    pub fn load(node: &ConfigNode, _ctx: &LoadContext<'_>) -> Result<Self, LoadError> {
        let mut v = Validation::new("VesselParameterGroup");
        let base = ParameterBase::load(node, &mut v);

        let duration: Duration = v.parse(node, FieldSpec::new("duration").or(Duration::UNLIMITED));
        let define: Option<String> = v.parse(node, FieldSpec::new("define").or(None));
        let vessels: Vec<String> = v.parse(node, FieldSpec::new("vessel").or(Vec::new()));

        v.finish()?;
        Ok(VesselParameterGroupFactory { base, duration, define, vessels })
    }
}

/// Runtime vessel group produced by [`VesselParameterGroupFactory`].
#[derive(Debug, Clone, PartialEq)]
pub struct VesselParameterGroup {
    pub contract: String,
    pub title: Option<String>,
    pub define: Option<String>,
    pub vessels: Vec<String>,
    /// Seconds; `0.0` means no wait.
    pub duration: f64,
}

impl ParameterFactory for VesselParameterGroupFactory {
    fn base(&self) -> &ParameterBase {
        &self.base
    }

    fn generate(&self, contract: &Contract) -> Parameter {
        Parameter::VesselGroup(VesselParameterGroup {
            contract: contract.name.clone(),
            title: self.base.title.clone(),
            define: self.define.clone(),
            vessels: self.vessels.clone(),
            duration: self.duration.as_secs(),
        })
    }
}
