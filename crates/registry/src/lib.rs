//! Per-profile capability resolution.
//!
//! A registry holds trees of [`CapabilityNode`]s. Each node carries ordered
//! [`VariantDeclaration`]s conditioned on a target profile (a product family plus a
//! version). Resolving a registry against one [`ProfileDescriptor`] yields an immutable
//! [`Snapshot`] answering which capabilities exist for that profile and what their
//! default payload is. Snapshots are cached per profile and built at most once.
//!
//! # Modules
//!
//! - [`profile`] - Profiles and canonical cache keys
//! - [`predicate`] - Family/version predicates and first-match selection
//! - [`index`] - Validated, frozen registry contents
//! - [`resolver`] - Hierarchical resolution into snapshots
//! - [`cache`] - Single-flight snapshot cache
//! - [`registry`] - Registration, freeze and queries
//! - [`db`] - Process-wide registries
//!
//! # Example
//!
//! ```ignore
//! use capdex_registry::*;
//!
//! const A: FamilyId = FamilyId::new(1);
//!
//! let registry = Registry::new("widgets");
//! registry.register_root(
//!     CapabilityNode::new("Widget")
//!         .variant(VariantDeclaration::unavailable(VariantPredicate::family(A).until(Version::major(60))))
//!         .variant(VariantDeclaration::available(VariantPredicate::family(A)).with_value("X")),
//! )?;
//! registry.freeze()?;
//!
//! let profile = ProfileDescriptor::new(A, Version::major(61));
//! assert!(registry.has(profile, "Widget")?);
//! ```

pub mod blob;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod node;
pub mod predicate;
pub mod profile;
pub mod registry;
pub mod resolver;
pub mod snapshot;
pub mod value;

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
mod invariants;

pub use cache::SnapshotCache;
pub use config::{OverlapPolicy, RegistryConfig};
pub use error::{KeyKind, LateRegistrationError, LoadError, RegistrationError, RegistryError};
pub use index::{CapabilityIndex, IndexBuilder, Slot};
pub use node::CapabilityNode;
pub use predicate::{VariantDeclaration, VariantPredicate, select_declaration};
pub use profile::{FamilyId, ParseVersionError, ProfileDescriptor, ProfileKey, Version};
pub use registry::Registry;
pub use resolver::{resolve_all, resolve_node};
pub use snapshot::{ResolvedEntry, Snapshot};
pub use value::{EMPTY_VALUE, Value};
