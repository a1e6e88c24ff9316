//! Variant predicates and declarations.
//!
//! A [`VariantPredicate`] restricts a declaration to a set of families and a half-open
//! version interval `[min, max)`. Either bound may be open. Declarations on a node are
//! tried in authored order and the first match is authoritative.

use smallvec::SmallVec;

use crate::profile::{FamilyId, ProfileDescriptor, Version};
use crate::value::Value;

/// Family and version-range condition over a [`ProfileDescriptor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantPredicate {
	families: SmallVec<[FamilyId; 2]>,
	min: Option<Version>,
	max: Option<Version>,
}

impl VariantPredicate {
	/// Matches every profile.
	pub fn any() -> Self {
		Self::default()
	}

	/// Matches every version of one family.
	pub fn family(family: FamilyId) -> Self {
		Self::any().or_family(family)
	}

	pub fn families(families: impl IntoIterator<Item = FamilyId>) -> Self {
		let mut pred = Self::any();
		for family in families {
			pred = pred.or_family(family);
		}
		pred
	}

	/// Adds another family to the accepted set.
	pub fn or_family(mut self, family: FamilyId) -> Self {
		if !self.families.contains(&family) {
			self.families.push(family);
		}
		self
	}

	/// Sets the inclusive lower bound.
	pub fn since(mut self, min: Version) -> Self {
		self.min = Some(min);
		self
	}

	/// Sets the exclusive upper bound.
	pub fn until(mut self, max: Version) -> Self {
		self.max = Some(max);
		self
	}

	pub fn family_set(&self) -> &[FamilyId] {
		&self.families
	}

	pub fn min(&self) -> Option<Version> {
		self.min
	}

	pub fn max(&self) -> Option<Version> {
		self.max
	}

	pub fn matches(&self, profile: &ProfileDescriptor) -> bool {
		if !self.families.is_empty() && !self.families.contains(&profile.family) {
			return false;
		}
		self.min.is_none_or(|min| min <= profile.version)
			&& self.max.is_none_or(|max| profile.version < max)
	}

	/// Returns false when the interval is inverted or empty.
	pub fn is_well_formed(&self) -> bool {
		match (self.min, self.max) {
			(Some(min), Some(max)) => min < max,
			_ => true,
		}
	}

	/// Returns true if some profile could satisfy both predicates.
	pub fn overlaps(&self, other: &VariantPredicate) -> bool {
		let families_meet = self.families.is_empty()
			|| other.families.is_empty()
			|| self.families.iter().any(|f| other.families.contains(f));
		if !families_meet {
			return false;
		}

		// `None < Some(_)`, so the larger lower bound treats open as -inf.
		let lo = self.min.max(other.min);
		let hi = match (self.max, other.max) {
			(Some(a), Some(b)) => Some(a.min(b)),
			(a, b) => a.or(b),
		};
		match (lo, hi) {
			(Some(lo), Some(hi)) => lo < hi,
			_ => true,
		}
	}
}

impl std::fmt::Display for VariantPredicate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.families.is_empty() {
			f.write_str("*")?;
		} else {
			for (i, family) in self.families.iter().enumerate() {
				if i > 0 {
					f.write_str("|")?;
				}
				write!(f, "{family}")?;
			}
		}
		f.write_str(" [")?;
		match self.min {
			Some(min) => write!(f, "{min}")?,
			None => f.write_str("-inf")?,
		}
		f.write_str(", ")?;
		match self.max {
			Some(max) => write!(f, "{max}")?,
			None => f.write_str("+inf")?,
		}
		f.write_str(")")
	}
}

/// One conditional rule attached to a capability node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDeclaration {
	pub predicate: VariantPredicate,
	pub available: bool,
	pub value: Option<Value>,
	pub enumerable: bool,
}

impl VariantDeclaration {
	pub fn available(predicate: VariantPredicate) -> Self {
		Self {
			predicate,
			available: true,
			value: None,
			enumerable: true,
		}
	}

	pub fn unavailable(predicate: VariantPredicate) -> Self {
		Self {
			available: false,
			..Self::available(predicate)
		}
	}

	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn non_enumerable(mut self) -> Self {
		self.enumerable = false;
		self
	}
}

/// Returns the first declaration, in authored order, whose predicate matches `profile`.
pub fn select_declaration<'a>(
	variants: &'a [VariantDeclaration],
	profile: &ProfileDescriptor,
) -> Option<&'a VariantDeclaration> {
	variants.iter().find(|decl| decl.predicate.matches(profile))
}

/// Index pairs `(earlier, later)` of declarations whose predicates overlap.
pub(crate) fn overlapping_pairs(
	variants: &[VariantDeclaration],
) -> impl Iterator<Item = (usize, usize)> + '_ {
	variants.iter().enumerate().flat_map(move |(i, a)| {
		variants[i + 1..]
			.iter()
			.enumerate()
			.filter(move |(_, b)| a.predicate.overlaps(&b.predicate))
			.map(move |(j, _)| (i, i + 1 + j))
	})
}
