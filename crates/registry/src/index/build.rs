use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::{CapabilityIndex, Slot};
use crate::config::{OverlapPolicy, RegistryConfig};
use crate::error::{KeyKind, RegistrationError};
use crate::node::CapabilityNode;
use crate::predicate::overlapping_pairs;

/// Owner of a claimed key: its kind and the path of the node holding it.
type Claims = FxHashMap<Arc<str>, (KeyKind, Arc<str>)>;

/// Append-only collection of root nodes, validated on entry.
pub struct IndexBuilder {
	label: &'static str,
	overlap_policy: OverlapPolicy,
	roots: Vec<CapabilityNode>,
	claims: Claims,
	poisoned: Option<RegistrationError>,
}

impl IndexBuilder {
	pub fn new(label: &'static str, config: &RegistryConfig) -> Self {
		Self {
			label,
			overlap_policy: config.overlap_policy,
			roots: Vec::new(),
			claims: Claims::default(),
			poisoned: None,
		}
	}

	/// Number of accepted roots.
	pub fn len(&self) -> usize {
		self.roots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.roots.is_empty()
	}

	/// Returns the error that poisoned this builder, if any.
	pub fn poisoned(&self) -> Option<&RegistrationError> {
		self.poisoned.as_ref()
	}

	/// Latches `err` unless an earlier failure is already latched.
	pub(crate) fn poison(&mut self, err: RegistrationError) {
		self.poisoned.get_or_insert(err);
	}

	/// Validates and appends a root.
	///
	/// A rejected root is not added, and the error is latched: every later call and
	/// [`IndexBuilder::freeze`] report it.
	pub fn register_root(&mut self, root: CapabilityNode) -> Result<(), RegistrationError> {
		if let Some(err) = &self.poisoned {
			return Err(err.clone());
		}

		let mut staged = Claims::default();
		if let Err(err) = self.validate(&root, None, &mut staged) {
			self.poisoned = Some(err.clone());
			return Err(err);
		}

		self.claims.extend(staged);
		self.roots.push(root);
		Ok(())
	}

	fn validate(
		&self,
		node: &CapabilityNode,
		parent: Option<&str>,
		staged: &mut Claims,
	) -> Result<(), RegistrationError> {
		let path: Arc<str> = match parent {
			Some(parent) => format!("{parent}/{}", node.key).into(),
			None => node.key.clone(),
		};

		self.claim(KeyKind::Primary, &node.key, &path, staged)?;
		if let Some(alias) = &node.alias {
			self.claim(KeyKind::Alias, alias, &path, staged)?;
		}

		for (index, decl) in node.variants.iter().enumerate() {
			if !decl.predicate.is_well_formed() {
				return Err(RegistrationError::InvalidRange {
					path,
					index,
					min: decl.predicate.min().map(|v| v.to_string()).unwrap_or_default(),
					max: decl.predicate.max().map(|v| v.to_string()).unwrap_or_default(),
				});
			}
		}

		if self.overlap_policy != OverlapPolicy::Allow {
			for (first, second) in overlapping_pairs(&node.variants) {
				let first_pred = node.variants[first].predicate.to_string();
				let second_pred = node.variants[second].predicate.to_string();
				if self.overlap_policy == OverlapPolicy::Reject {
					return Err(RegistrationError::OverlappingVariants {
						path,
						first,
						second,
						first_pred,
						second_pred,
					});
				}
				warn!(
					registry = self.label,
					path = %path,
					first,
					second,
					first_pred = %first_pred,
					second_pred = %second_pred,
					"overlapping variant declarations; first match wins",
				);
			}
		}

		for child in &node.children {
			self.validate(child, Some(&path), staged)?;
		}
		Ok(())
	}

	fn claim(
		&self,
		kind: KeyKind,
		key: &Arc<str>,
		path: &Arc<str>,
		staged: &mut Claims,
	) -> Result<(), RegistrationError> {
		if key.is_empty() {
			return Err(RegistrationError::EmptyKey {
				kind,
				path: path.clone(),
			});
		}
		if let Some((_, existing)) = self.claims.get(key).or_else(|| staged.get(key)) {
			return Err(RegistrationError::DuplicateKey {
				kind,
				key: key.clone(),
				existing: existing.clone(),
				incoming: path.clone(),
			});
		}
		staged.insert(key.clone(), (kind, path.clone()));
		Ok(())
	}

	/// Flattens the accepted roots into a [`CapabilityIndex`].
	pub fn freeze(self) -> Result<CapabilityIndex, RegistrationError> {
		if let Some(err) = self.poisoned {
			return Err(err);
		}

		let total: usize = self.roots.iter().map(CapabilityNode::subtree_len).sum();
		let mut slots = Vec::with_capacity(total);
		let mut by_key = FxHashMap::with_capacity_and_hasher(self.claims.len(), Default::default());
		for root in &self.roots {
			root.walk(&mut |node| {
				let idx = slots.len() as u32;
				by_key.insert(node.key.clone(), idx);
				if let Some(alias) = &node.alias {
					by_key.insert(alias.clone(), idx);
				}
				slots.push(Slot {
					key: node.key.clone(),
					alias: node.alias.clone(),
				});
			});
		}

		debug!(
			registry = self.label,
			roots = self.roots.len(),
			nodes = slots.len(),
			keys = by_key.len(),
			"capability registry frozen",
		);

		Ok(CapabilityIndex {
			label: self.label,
			roots: self.roots.into_boxed_slice(),
			slots: slots.into_boxed_slice(),
			by_key,
		})
	}
}
