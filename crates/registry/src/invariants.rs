//! Property checks for resolution.
//!
//! Registries are generated as random forests with random declarations over a small
//! family/version space, so overlaps, gaps and gated subtrees all occur.

use std::sync::Arc;

use proptest::prelude::*;

use crate::config::{OverlapPolicy, RegistryConfig};
use crate::index::{CapabilityIndex, IndexBuilder};
use crate::node::CapabilityNode;
use crate::predicate::{VariantDeclaration, VariantPredicate, select_declaration};
use crate::profile::{FamilyId, ProfileDescriptor, Version};
use crate::resolver::resolve_all;
use crate::snapshot::ResolvedEntry;

fn arb_predicate() -> impl Strategy<Value = VariantPredicate> {
	(
		prop::collection::vec(0u16..3, 0..3),
		prop::option::of(0u32..8),
		prop::option::of(0u32..8),
	)
		.prop_map(|(families, lo, hi)| {
			let mut pred = VariantPredicate::families(families.into_iter().map(FamilyId::new));
			// Keep ranges well formed; registration rejects the rest.
			match (lo, hi) {
				(Some(lo), Some(hi)) if lo < hi => {
					pred = pred.since(Version::major(lo)).until(Version::major(hi));
				}
				(Some(lo), None) => pred = pred.since(Version::major(lo)),
				(None, Some(hi)) => pred = pred.until(Version::major(hi)),
				_ => {}
			}
			pred
		})
}

fn arb_declaration() -> impl Strategy<Value = VariantDeclaration> {
	(arb_predicate(), any::<bool>(), prop::option::of(-3i64..3), any::<bool>()).prop_map(
		|(pred, available, value, enumerable)| VariantDeclaration {
			predicate: pred,
			available,
			value: value.map(Into::into),
			enumerable,
		},
	)
}

/// Nodes with placeholder keys; [`number`] makes them unique.
fn arb_tree() -> impl Strategy<Value = CapabilityNode> {
	let leaf = prop::collection::vec(arb_declaration(), 0..4).prop_map(|variants| CapabilityNode {
		variants,
		..CapabilityNode::new("_")
	});
	leaf.prop_recursive(3, 24, 4, |inner| {
		(prop::collection::vec(arb_declaration(), 0..4), prop::collection::vec(inner, 0..4)).prop_map(
			|(variants, children)| CapabilityNode {
				variants,
				children,
				..CapabilityNode::new("_")
			},
		)
	})
}

fn number(node: &mut CapabilityNode, next: &mut usize) {
	node.key = format!("n{next}").into();
	*next += 1;
	for child in &mut node.children {
		number(child, next);
	}
}

fn arb_index() -> impl Strategy<Value = Arc<CapabilityIndex>> {
	prop::collection::vec(arb_tree(), 1..4).prop_map(|mut roots| {
		let mut next = 0;
		let config = RegistryConfig::default().with_overlap_policy(OverlapPolicy::Allow);
		let mut b = IndexBuilder::new("prop", &config);
		for root in &mut roots {
			number(root, &mut next);
		}
		for root in roots {
			b.register_root(root).expect("generated roots are valid");
		}
		Arc::new(b.freeze().expect("generated registry freezes"))
	})
}

fn arb_profile() -> impl Strategy<Value = ProfileDescriptor> {
	(0u16..4, 0u32..9).prop_map(|(f, v)| ProfileDescriptor::new(FamilyId::new(f), Version::major(v)))
}

fn check_gating(node: &CapabilityNode, snap: &crate::snapshot::Snapshot) {
	let parent = snap.get(&node.key).expect("registered key resolves");
	for child in &node.children {
		if !parent.available {
			assert!(!snap.get(&child.key).expect("child resolves").available);
		}
		check_gating(child, snap);
	}
}

fn check_first_match(node: &CapabilityNode, profile: &ProfileDescriptor, snap: &crate::snapshot::Snapshot) {
	let entry = snap.get(&node.key).expect("registered key resolves");
	if entry.available {
		let decl = select_declaration(&node.variants, profile).expect("available implies a match");
		assert_eq!(entry, &ResolvedEntry::from_declaration(decl));
	}
	if select_declaration(&node.variants, profile).is_none() {
		assert_eq!(entry, &ResolvedEntry::UNAVAILABLE);
	}
	for child in &node.children {
		check_first_match(child, profile, snap);
	}
}

proptest! {
	#[test]
	fn resolution_is_idempotent(index in arb_index(), profile in arb_profile()) {
		let first = resolve_all(&index, profile);
		let second = resolve_all(&index, profile);
		prop_assert!(first.iter().eq(second.iter()));
	}

	#[test]
	fn unavailable_parents_gate_children(index in arb_index(), profile in arb_profile()) {
		let snap = resolve_all(&index, profile);
		for root in index.roots() {
			check_gating(root, &snap);
		}
	}

	#[test]
	fn first_declared_match_wins(index in arb_index(), profile in arb_profile()) {
		let snap = resolve_all(&index, profile);
		for root in index.roots() {
			check_first_match(root, &profile, &snap);
		}
	}

	#[test]
	fn enumeration_follows_registration_order(index in arb_index(), profile in arb_profile()) {
		let snap = resolve_all(&index, profile);
		let order: Vec<usize> = snap
			.list_enumerable()
			.into_iter()
			.map(|(key, _)| index.slot_of(key).expect("listed key is registered"))
			.collect();
		prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
		prop_assert_eq!(snap.iter().count(), index.len());
	}

	#[test]
	fn trailing_overlap_never_changes_a_match(index in arb_index(), profile in arb_profile(), extra in arb_declaration()) {
		let base = resolve_all(&index, profile);
		let config = RegistryConfig::default().with_overlap_policy(OverlapPolicy::Allow);
		let mut b = IndexBuilder::new("prop", &config);
		for root in index.roots() {
			let mut root = root.clone();
			root.variants.push(extra.clone());
			b.register_root(root).expect("still valid");
		}
		let extended = resolve_all(&Arc::new(b.freeze().expect("freezes")), profile);

		for root in index.roots() {
			if select_declaration(&root.variants, &profile).is_some() {
				prop_assert_eq!(extended.get(&root.key), base.get(&root.key));
			}
		}
	}
}
