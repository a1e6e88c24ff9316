//! Frozen capability index.
//!
//! # Mental Model
//!
//! 1. **Build Phase:** [`IndexBuilder`] validates each registered root (keys, ranges,
//!    overlaps) before accepting it. The first failure poisons the builder.
//! 2. **Freeze:** [`IndexBuilder::freeze`] flattens every tree in pre-order into slots
//!    and binds each primary and alias key to its slot, once.
//! 3. **Consumption:** every snapshot resolved from this index shares its key map and
//!    only stores one resolved entry per slot.
//!
//! # Invariants
//!
//! - Slot order is registration order: roots in `register_root` order, each tree
//!   visited parent-first.
//! - Every primary and alias key maps to exactly one slot.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::node::CapabilityNode;

mod build;

pub use build::IndexBuilder;


/// One node as seen by snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
	pub key: Arc<str>,
	pub alias: Option<Arc<str>>,
}

/// Immutable, validated registry contents.
#[derive(Debug)]
pub struct CapabilityIndex {
	pub(crate) label: &'static str,
	pub(crate) roots: Box<[CapabilityNode]>,
	pub(crate) slots: Box<[Slot]>,
	pub(crate) by_key: FxHashMap<Arc<str>, u32>,
}

impl CapabilityIndex {
	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn roots(&self) -> &[CapabilityNode] {
		&self.roots
	}

	pub fn slots(&self) -> &[Slot] {
		&self.slots
	}

	/// Number of nodes across all trees.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Resolves a primary or alias key to its slot.
	#[inline]
	pub fn slot_of(&self, key: &str) -> Option<usize> {
		self.by_key.get(key).map(|&idx| idx as usize)
	}
}
