//! Immutable per-profile resolution results and the query API.

use std::sync::Arc;

use crate::index::CapabilityIndex;
use crate::predicate::VariantDeclaration;
use crate::profile::{ProfileDescriptor, ProfileKey};
use crate::value::{EMPTY_VALUE, Value};

/// Resolved state of one capability for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
	pub available: bool,
	pub value: Option<Value>,
	pub enumerable: bool,
}

impl ResolvedEntry {
	/// Known but unavailable.
	pub const UNAVAILABLE: ResolvedEntry = ResolvedEntry {
		available: false,
		value: None,
		enumerable: false,
	};

	/// Entry for a node whose authoritative declaration is `decl`.
	pub fn from_declaration(decl: &VariantDeclaration) -> Self {
		if !decl.available {
			return Self::UNAVAILABLE;
		}
		Self {
			available: true,
			value: decl.value.clone(),
			enumerable: decl.enumerable,
		}
	}

	pub fn is_listed(&self) -> bool {
		self.available && self.enumerable
	}
}

/// The fully resolved registry for one profile.
///
/// Entries are stored per slot of the shared [`CapabilityIndex`], so primary and alias
/// keys reach the same entry and iteration follows registration order.
#[derive(Debug)]
pub struct Snapshot {
	profile: ProfileDescriptor,
	index: Arc<CapabilityIndex>,
	entries: Box<[ResolvedEntry]>,
}

impl Snapshot {
	pub(crate) fn new(
		profile: ProfileDescriptor,
		index: Arc<CapabilityIndex>,
		entries: Box<[ResolvedEntry]>,
	) -> Self {
		debug_assert_eq!(entries.len(), index.len());
		Self {
			profile,
			index,
			entries,
		}
	}

	pub fn profile(&self) -> ProfileDescriptor {
		self.profile
	}

	pub fn profile_key(&self) -> ProfileKey {
		self.profile.canonical_key()
	}

	/// Number of known capabilities (aliases not counted).
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// True only if `key` is known and resolved available.
	pub fn has(&self, key: &str) -> bool {
		self.get(key).is_some_and(|entry| entry.available)
	}

	/// Returns the entry for a primary or alias key, available or not.
	///
	/// `None` means the key was never registered.
	pub fn get(&self, key: &str) -> Option<&ResolvedEntry> {
		self.index.slot_of(key).map(|slot| &self.entries[slot])
	}

	/// Returns the default payload, or [`EMPTY_VALUE`] when the key is unknown,
	/// unavailable, or has no value.
	pub fn default_value(&self, key: &str) -> &Value {
		self.get(key)
			.filter(|entry| entry.available)
			.and_then(|entry| entry.value.as_ref())
			.unwrap_or(&EMPTY_VALUE)
	}

	/// Every capability under its primary key, in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &ResolvedEntry)> + '_ {
		self.index
			.slots()
			.iter()
			.zip(self.entries.iter())
			.map(|(slot, entry)| (&slot.key, entry))
	}

	/// Available, enumerable capabilities in registration order.
	pub fn enumerable(&self) -> impl Iterator<Item = (&Arc<str>, &ResolvedEntry)> + '_ {
		self.iter().filter(|(_, entry)| entry.is_listed())
	}

	/// `(key, value)` pairs of available, enumerable capabilities in registration order.
	pub fn list_enumerable(&self) -> Vec<(&str, Option<&Value>)> {
		self.enumerable()
			.map(|(key, entry)| (&**key, entry.value.as_ref()))
			.collect()
	}
}
