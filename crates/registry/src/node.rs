use std::sync::Arc;

use crate::predicate::VariantDeclaration;

/// A named unit whose availability and payload depend on the profile.
///
/// Nodes are built once during registration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityNode {
	pub key: Arc<str>,
	pub alias: Option<Arc<str>>,
	pub variants: Vec<VariantDeclaration>,
	pub children: Vec<CapabilityNode>,
}

impl CapabilityNode {
	pub fn new(key: impl Into<Arc<str>>) -> Self {
		Self {
			key: key.into(),
			alias: None,
			variants: Vec::new(),
			children: Vec::new(),
		}
	}

	pub fn alias(mut self, alias: impl Into<Arc<str>>) -> Self {
		self.alias = Some(alias.into());
		self
	}

	/// Appends a declaration. Order is significant: the first match wins.
	pub fn variant(mut self, decl: VariantDeclaration) -> Self {
		self.variants.push(decl);
		self
	}

	pub fn child(mut self, child: CapabilityNode) -> Self {
		self.children.push(child);
		self
	}

	/// Number of nodes in this subtree, including `self`.
	pub fn subtree_len(&self) -> usize {
		1 + self.children.iter().map(CapabilityNode::subtree_len).sum::<usize>()
	}

	/// Visits this subtree in pre-order, which is registration order.
	pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a CapabilityNode)) {
		f(self);
		for child in &self.children {
			child.walk(f);
		}
	}
}
