//! Contract type registry and identifier resolution.
//!
//! Contract-check requirements name the contracts they look at with a
//! free-form `contractType` string. That string can mean one of two things:
//!
//! - a **declarative** contract type, defined entirely in config and
//!   discovered at startup, or
//! - a **compiled** contract type, built into the host and registered by its
//!   exact name.
//!
//! ```text
//! startup discovery ──▶ RegistryBuilder ──build()──▶ TypeRegistry (read-only)
//!                                                        │
//! "contractType" ──▶ resolve(registry, identifier) ◀─────┘
//!                     1. prefix of a declarative name ─▶ Declarative(identifier)
//!                     2. exact compiled key           ─▶ Compiled { key, ty }
//!                     3. neither                      ─▶ UnresolvedIdentifier
//! ```
//!
//! Declarative types are matched by prefix so suffixed variants of one base
//! name (`Rescue`, `RescueKerbal`, `Rescue.Hard`) resolve without registering
//! each variant. Compiled types are a closed set and use exact lookup.
//!
//! ## Invariants
//!
//! - The registry is immutable once built and is passed by reference; there
//!   is no global instance.
//! - Declarative names are unique and non-empty; compiled keys are unique.
//! - An identifier that is both a declarative prefix match and an exact
//!   compiled key resolves as declarative. [`TypeRegistry::is_shadowed`]
//!   exposes the collision and the resolver logs it.

#[path = "registry/resolve.rs"]
mod resolve;
#[path = "registry/types.rs"]
mod types;


pub use resolve::{ContractTarget, ContractTypeRef, resolve};
pub use types::{CompiledType, DeclarativeType, RegistryBuilder, TypeRegistry};
