//! Registry entries and the builder that freezes them.

use crate::error::RegistryError;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::debug;

/// A contract type defined in config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarativeType {
    pub name: String,
    /// Display title used when a requirement refers to this type.
    pub generic_title: String,
    /// Types that failed their own load stay known (for resolution) but are
    /// not offered as titles.
    pub valid: bool,
}

impl DeclarativeType {
    pub fn new(name: impl Into<String>, generic_title: impl Into<String>) -> Self {
        DeclarativeType { name: name.into(), generic_title: generic_title.into(), valid: true }
    }

    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }
}

/// A contract type built into the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledType {
    /// Bare type name, e.g. `PartTest`.
    pub name: String,
    /// Fully qualified path, e.g. `Contracts.Templates.PartTest`.
    pub path: String,
}

impl CompiledType {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit(['.', ':']).next().unwrap_or(path.as_str()).to_string();
        CompiledType { name, path }
    }
}

/// Collects discovered types, then freezes them into a [`TypeRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    declarative: Vec<DeclarativeType>,
    compiled: Vec<(String, CompiledType)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declarative(mut self, ty: DeclarativeType) -> Self {
        self.declarative.push(ty);
        self
    }

    /// Register a compiled type under its bare name.
    pub fn compiled(self, ty: CompiledType) -> Self {
        let key = ty.name.clone();
        self.compiled_as(key, ty)
    }

    /// Register a compiled type under an explicit key.
    pub fn compiled_as(mut self, key: impl Into<String>, ty: CompiledType) -> Self {
        self.compiled.push((key.into(), ty));
        self
    }

    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        let mut seen = HashSet::new();
        for ty in &self.declarative {
            if ty.name.is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if !seen.insert(ty.name.as_str()) {
                return Err(RegistryError::DuplicateDeclarative(ty.name.clone()));
            }
        }

        let mut compiled = HashMap::with_capacity(self.compiled.len());
        for (key, ty) in self.compiled {
            match compiled.entry(key) {
                Entry::Occupied(e) => return Err(RegistryError::DuplicateCompiled(e.key().clone())),
                Entry::Vacant(e) => {
                    e.insert(Arc::new(ty));
                }
            }
        }

        debug!(declarative = self.declarative.len(), compiled = compiled.len(), "contract type registry built");

        Ok(TypeRegistry { declarative: self.declarative, compiled })
    }
}

/// Every contract type known to the process, read-only after [`RegistryBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    declarative: Vec<DeclarativeType>,
    compiled: HashMap<String, Arc<CompiledType>>,
}

impl TypeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// All declarative types, valid or not, in registration order.
    pub fn declarative_types(&self) -> &[DeclarativeType] {
        &self.declarative
    }

    /// First declarative type whose name `identifier` starts with.
    pub fn declarative_prefix_of(&self, identifier: &str) -> Option<&DeclarativeType> {
        self.declarative.iter().find(|ty| identifier.starts_with(ty.name.as_str()))
    }

    /// Valid declarative type with exactly this name.
    pub fn valid_declarative(&self, name: &str) -> Option<&DeclarativeType> {
        self.declarative.iter().find(|ty| ty.valid && ty.name == name)
    }

    pub fn compiled(&self, key: &str) -> Option<&Arc<CompiledType>> {
        self.compiled.get(key)
    }

    /// True when `identifier` matches a declarative prefix and is also an
    /// exact compiled key. Resolution picks the declarative reading.
    pub fn is_shadowed(&self, identifier: &str) -> bool {
        self.declarative_prefix_of(identifier).is_some() && self.compiled.contains_key(identifier)
    }
}
