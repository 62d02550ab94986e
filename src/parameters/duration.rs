use super::base::ParameterBase;
use super::{Contract, Parameter, ParameterFactory};
use crate::LoadContext;
use crate::error::{ConversionError, LoadError};
use crate::field::{Duration, FieldSpec, FieldValue};
use crate::node::ConfigNode;
use crate::validation::Validation;

/// A wait timer inside a contract.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationFactory {
    pub base: ParameterBase,
    pub duration: Duration,
    pub pre_wait_text: Option<String>,
    pub waiting_text: Option<String>,
    pub completion_text: Option<String>,
}

impl DurationFactory {
    pub fn load(node: &ConfigNode, _ctx: &LoadContext<'_>) -> Result<Self, LoadError> {
        let mut v = Validation::new("Duration");
        let base = ParameterBase::load(node, &mut v);

        let duration: Duration = v.parse(node, FieldSpec::new("duration").with_converter(positive_duration));

        let factory = DurationFactory {
            base,
            duration,
            pre_wait_text: v.parse(node, FieldSpec::new("preWaitText").or(None)),
            waiting_text: v.parse(node, FieldSpec::new("waitingText").or(None)),
            completion_text: v.parse(node, FieldSpec::new("completionText").or(None)),
        };

        v.finish()?;
        Ok(factory)
    }
}

fn positive_duration(values: &[&str]) -> Result<Duration, ConversionError> {
    match Duration::from_raw(values)? {
        d if d.is_unlimited() => Err(ConversionError::Custom("duration must be greater than zero".to_string())),
        d => Ok(d),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationParameter {
    pub contract: String,
    pub title: Option<String>,
    pub duration: f64,
    pub pre_wait_text: Option<String>,
    pub waiting_text: Option<String>,
    pub completion_text: Option<String>,
}

impl ParameterFactory for DurationFactory {
    fn base(&self) -> &ParameterBase {
        &self.base
    }

    fn generate(&self, contract: &Contract) -> Parameter {
        Parameter::Duration(DurationParameter {
            contract: contract.name.clone(),
            title: self.base.title.clone(),
            duration: self.duration.as_secs(),
            pre_wait_text: self.pre_wait_text.clone(),
            waiting_text: self.waiting_text.clone(),
            completion_text: self.completion_text.clone(),
        })
    }
}
