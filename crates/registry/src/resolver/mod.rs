//! Hierarchical resolution of a frozen index against one profile.
//!
//! Resolution walks every tree parent-first. A node is available only if its parent is
//! available and its first matching declaration says so; an unavailable node forces its
//! whole subtree unavailable regardless of the children's own declarations. A node with
//! no matching declaration is unavailable, which is not an error.

use std::sync::Arc;

use crate::index::CapabilityIndex;
use crate::node::CapabilityNode;
use crate::predicate::select_declaration;
use crate::profile::ProfileDescriptor;
use crate::snapshot::{ResolvedEntry, Snapshot};


/// Resolves `node` and its subtree, appending one entry per node in pre-order.
///
/// Appending in pre-order keeps `out` aligned with the index slots, which already map
/// both the primary and alias key of every node.
pub fn resolve_node(
	node: &CapabilityNode,
	profile: &ProfileDescriptor,
	parent_available: bool,
	out: &mut Vec<ResolvedEntry>,
) {
	let entry = if parent_available {
		select_declaration(&node.variants, profile)
			.map(ResolvedEntry::from_declaration)
			.unwrap_or(ResolvedEntry::UNAVAILABLE)
	} else {
		ResolvedEntry::UNAVAILABLE
	};

	let available = entry.available;
	out.push(entry);
	for child in &node.children {
		resolve_node(child, profile, available, out);
	}
}

/// Resolves every root of `index` into a snapshot for `profile`.
pub fn resolve_all(index: &Arc<CapabilityIndex>, profile: ProfileDescriptor) -> Snapshot {
	let mut entries = Vec::with_capacity(index.len());
	for root in index.roots() {
		resolve_node(root, &profile, true, &mut entries);
	}
	Snapshot::new(profile, Arc::clone(index), entries.into_boxed_slice())
}
