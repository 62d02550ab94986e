use crate::LoadContext;
use crate::error::{Diagnostic, LoadError, NodeError};
use crate::node::ConfigNode;
use crate::parameters::{self, ParameterFactory};
use crate::requirements::{self, ContractRequirement};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Block name of requirement definitions.
pub const REQUIREMENT_NODE: &str = "REQUIREMENT";
/// Block name of parameter definitions.
pub const PARAMETER_NODE: &str = "PARAMETER";

/// A successfully loaded definition.
#[derive(Debug)]
pub enum Definition {
    Requirement(Box<dyn ContractRequirement>),
    Parameter(Box<dyn ParameterFactory>),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Requirement(r) => &r.base().name,
            Definition::Parameter(p) => &p.base().name,
        }
    }
}

/// Result of [`load_document`] and [`load_nodes`].
///
/// Loading continues past failed definitions, so one run reports every
/// problem in the document.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Valid definitions, in document order.
    pub definitions: Vec<Definition>,
    /// One entry per definition that failed, with all of its diagnostics.
    pub failures: Vec<LoadError>,
    /// Names of blocks that are neither requirements nor parameters.
    pub skipped: Vec<String>,
    /// Total elapsed time spent loading.
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Every diagnostic across all failed definitions.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.failures.iter().flat_map(|f| f.diagnostics.iter())
    }

    pub fn requirements(&self) -> impl Iterator<Item = &(dyn ContractRequirement + 'static)> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Requirement(r) => Some(r.as_ref()),
            Definition::Parameter(_) => None,
        })
    }

    pub fn parameters(&self) -> impl Iterator<Item = &(dyn ParameterFactory + 'static)> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Parameter(p) => Some(p.as_ref()),
            Definition::Requirement(_) => None,
        })
    }
}

/// Parse `text` and load every definition block in it.
///
/// # Example
/// ```
/// use contractor::{LoadContext, TypeRegistry, load_document};
/// use contractor::registry::CompiledType;
///
/// let registry = TypeRegistry::builder().compiled(CompiledType::new("Contracts.PartTest")).build().unwrap();
/// let text = "REQUIREMENT\n{\n    type = CompleteContract\n    contractType = PartTest\n}\n";
/// let report = load_document(text, &LoadContext::new(&registry)).unwrap();
/// assert!(report.is_valid());
/// assert_eq!(report.definitions.len(), 1);
/// ```
pub fn load_document(text: &str, ctx: &LoadContext<'_>) -> Result<LoadReport, NodeError> {
    let nodes = ConfigNode::parse_document(text)?;
    Ok(load_nodes(&nodes, ctx))
}

/// Load already-parsed nodes.
pub fn load_nodes(nodes: &[ConfigNode], ctx: &LoadContext<'_>) -> LoadReport {
    let start = Instant::now();
    let mut report = LoadReport::default();

    for node in nodes {
        let loaded = match node.name() {
            REQUIREMENT_NODE => requirements::load(node, ctx).map(Definition::Requirement),
            PARAMETER_NODE => parameters::load(node, ctx).map(Definition::Parameter),
            other => {
                warn!(block = other, "skipping unknown block");
                report.skipped.push(other.to_string());
                continue;
            }
        };

        match loaded {
            Ok(definition) => report.definitions.push(definition),
            Err(err) => report.failures.push(err),
        }
    }

    report.elapsed = start.elapsed();
    debug!(
        loaded = report.definitions.len(),
        failed = report.failures.len(),
        skipped = report.skipped.len(),
        elapsed = ?report.elapsed,
        "document loaded"
    );
    report
}
