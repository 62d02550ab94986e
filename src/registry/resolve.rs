//! Identifier resolution.

use super::types::{CompiledType, TypeRegistry};
use crate::error::Diagnostic;
use std::sync::Arc;
use tracing::warn;

/// What a `contractType` string resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractTypeRef {
    /// The identifier as written; it starts with a declarative type name.
    Declarative(String),
    /// A compiled type and the registry key it was found under.
    Compiled { key: String, ty: Arc<CompiledType> },
}

impl ContractTypeRef {
    /// Identifier to persist: the declarative string, or the registry key of
    /// the compiled type. Resolving it again yields an equal reference.
    pub fn identifier(&self) -> &str {
        match self {
            ContractTypeRef::Declarative(identifier) => identifier,
            ContractTypeRef::Compiled { key, .. } => key,
        }
    }

    /// Name contracts of this type carry at runtime.
    pub fn type_name(&self) -> &str {
        match self {
            ContractTypeRef::Declarative(identifier) => identifier,
            ContractTypeRef::Compiled { ty, .. } => &ty.name,
        }
    }
}

/// Which contracts a contract-check requirement looks at.
///
/// A tag and a type are mutually exclusive; when a node carries both the tag
/// wins and the type is never resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractTarget {
    Tag(String),
    Type(ContractTypeRef),
}

/// Resolve `identifier` against `registry`.
///
/// Prefix match against declarative types first, exact compiled lookup
/// second. The same identifier always resolves to the same reference.
pub fn resolve(registry: &TypeRegistry, identifier: &str, owner: &str) -> Result<ContractTypeRef, Diagnostic> {
    if registry.declarative_prefix_of(identifier).is_some() {
        if registry.is_shadowed(identifier) {
            warn!(
                owner,
                identifier, "contractType matches a declarative type prefix and a compiled type; using the declarative type"
            );
        }
        return Ok(ContractTypeRef::Declarative(identifier.to_string()));
    }

    match registry.compiled(identifier) {
        Some(ty) => Ok(ContractTypeRef::Compiled { key: identifier.to_string(), ty: Arc::clone(ty) }),
        None => {
            Err(Diagnostic::UnresolvedIdentifier { owner: owner.to_string(), identifier: identifier.to_string() })
        }
    }
}
