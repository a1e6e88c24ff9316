//! Registry lifecycle: registration, explicit freeze, cached resolution.
//!
//! # Lifecycle
//!
//! 1. Startup: roots are added with [`Registry::register_root`] or
//!    [`Registry::register_blob`]. Each root is validated on entry.
//! 2. [`Registry::freeze`] publishes the immutable index. Registration after this point
//!    is a [`LateRegistrationError::AlreadyFrozen`].
//! 3. Steady state: queries resolve through the [`SnapshotCache`]. Any query before the
//!    freeze is a [`LateRegistrationError::NotFrozen`].

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::blob::{decode_catalog, node_from_spec};
use crate::cache::SnapshotCache;
use crate::config::RegistryConfig;
use crate::error::{LateRegistrationError, RegistryError};
use crate::index::{CapabilityIndex, IndexBuilder};
use crate::node::CapabilityNode;
use crate::profile::ProfileDescriptor;
use crate::snapshot::{ResolvedEntry, Snapshot};
use crate::value::Value;


/// Append-only capability registry that freezes into a snapshot cache.
pub struct Registry {
	label: &'static str,
	config: RegistryConfig,
	/// `None` once frozen.
	builder: Mutex<Option<IndexBuilder>>,
	frozen: OnceLock<SnapshotCache>,
}

impl Registry {
	pub fn new(label: &'static str) -> Self {
		Self::with_config(label, RegistryConfig::default())
	}

	pub fn with_config(label: &'static str, config: RegistryConfig) -> Self {
		let builder = IndexBuilder::new(label, &config);
		Self {
			label,
			config,
			builder: Mutex::new(Some(builder)),
			frozen: OnceLock::new(),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Validates and appends a root node.
	pub fn register_root(&self, root: CapabilityNode) -> Result<(), RegistryError> {
		let mut guard = self.builder.lock();
		let builder = guard
			.as_mut()
			.ok_or(LateRegistrationError::AlreadyFrozen(self.label))?;
		builder.register_root(root)?;
		Ok(())
	}

	/// Decodes a compiled catalogue and registers its roots in order.
	///
	/// Returns the number of roots registered. Conversion failures poison the registry
	/// like any other registration failure; header and decode failures do not.
	pub fn register_blob(&self, data: &[u8]) -> Result<usize, RegistryError> {
		let catalog = decode_catalog(data)?;
		let mut guard = self.builder.lock();
		let builder = guard
			.as_mut()
			.ok_or(LateRegistrationError::AlreadyFrozen(self.label))?;

		let count = catalog.roots.len();
		for spec in catalog.roots {
			let root = match node_from_spec(spec) {
				Ok(root) => root,
				Err(err) => {
					builder.poison(err.clone());
					return Err(err.into());
				}
			};
			builder.register_root(root)?;
		}
		tracing::debug!(registry = self.label, catalog = %catalog.name, roots = count, "catalogue loaded");
		Ok(count)
	}

	/// Freezes the registry. Fails if any registration failed or if already frozen.
	pub fn freeze(&self) -> Result<(), RegistryError> {
		let mut guard = self.builder.lock();
		let builder = guard
			.take()
			.ok_or(LateRegistrationError::AlreadyFrozen(self.label))?;
		if let Some(err) = builder.poisoned().cloned() {
			*guard = Some(builder);
			return Err(err.into());
		}

		let index = Arc::new(builder.freeze()?);
		self.frozen
			.set(SnapshotCache::new(index, &self.config))
			.map_err(|_| LateRegistrationError::AlreadyFrozen(self.label))?;
		Ok(())
	}

	pub fn is_frozen(&self) -> bool {
		self.frozen.get().is_some()
	}

	pub fn cache(&self) -> Result<&SnapshotCache, LateRegistrationError> {
		self.frozen
			.get()
			.ok_or(LateRegistrationError::NotFrozen(self.label))
	}

	pub fn index(&self) -> Result<&Arc<CapabilityIndex>, LateRegistrationError> {
		Ok(self.cache()?.index())
	}

	/// Returns the snapshot for `profile`, building it at most once.
	pub fn snapshot(&self, profile: ProfileDescriptor) -> Result<Arc<Snapshot>, LateRegistrationError> {
		Ok(self.cache()?.get(profile))
	}

	/// Resolves one key. `Ok(None)` means the key was never registered.
	pub fn resolve(
		&self,
		profile: ProfileDescriptor,
		key: &str,
	) -> Result<Option<ResolvedEntry>, LateRegistrationError> {
		Ok(self.snapshot(profile)?.get(key).cloned())
	}

	/// True only if `key` is known and available for `profile`.
	pub fn has(&self, profile: ProfileDescriptor, key: &str) -> Result<bool, LateRegistrationError> {
		Ok(self.snapshot(profile)?.has(key))
	}

	pub fn default_value(
		&self,
		profile: ProfileDescriptor,
		key: &str,
	) -> Result<Value, LateRegistrationError> {
		Ok(self.snapshot(profile)?.default_value(key).clone())
	}

	/// Available, enumerable capabilities for `profile`, in registration order.
	pub fn resolve_all(
		&self,
		profile: ProfileDescriptor,
	) -> Result<Vec<(Arc<str>, ResolvedEntry)>, LateRegistrationError> {
		let snap = self.snapshot(profile)?;
		Ok(snap
			.enumerable()
			.map(|(key, entry)| (Arc::clone(key), entry.clone()))
			.collect())
	}

	/// Drops the cached snapshot for `profile`. No-op before freeze.
	pub fn invalidate(&self, profile: ProfileDescriptor) {
		if let Some(cache) = self.frozen.get() {
			cache.invalidate(profile);
		}
	}

	/// Drops every cached snapshot. No-op before freeze.
	pub fn reset(&self) {
		if let Some(cache) = self.frozen.get() {
			cache.reset();
		}
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("label", &self.label)
			.field("frozen", &self.is_frozen())
			.finish_non_exhaustive()
	}
}
