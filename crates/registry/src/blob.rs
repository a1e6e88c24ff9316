//! Loading of compiled catalogue blobs into capability nodes.

use std::sync::Arc;

use capdex_registry_spec::{CapabilitySpec, CatalogSpec, VariantSpec, validate_blob};

use crate::error::{LoadError, RegistrationError};
use crate::node::CapabilityNode;
use crate::predicate::{VariantDeclaration, VariantPredicate};
use crate::profile::{FamilyId, Version};

/// Validates the header and decodes the catalogue payload.
pub fn decode_catalog(data: &[u8]) -> Result<CatalogSpec, LoadError> {
	let payload = validate_blob(data).ok_or(LoadError::BadHeader)?;
	Ok(postcard::from_bytes(payload)?)
}

/// Converts a spec tree into a node tree, parsing version bounds.
pub fn node_from_spec(spec: CapabilitySpec) -> Result<CapabilityNode, RegistrationError> {
	convert(spec, None)
}

fn convert(spec: CapabilitySpec, parent: Option<&str>) -> Result<CapabilityNode, RegistrationError> {
	let path: Arc<str> = match parent {
		Some(parent) => format!("{parent}/{}", spec.key).into(),
		None => spec.key.as_str().into(),
	};

	let mut node = CapabilityNode::new(spec.key);
	if let Some(alias) = spec.alias {
		node = node.alias(alias);
	}
	for variant in spec.variants {
		node = node.variant(declaration(variant, &path)?);
	}
	for child in spec.children {
		node = node.child(convert(child, Some(&path))?);
	}
	Ok(node)
}

fn declaration(spec: VariantSpec, path: &Arc<str>) -> Result<VariantDeclaration, RegistrationError> {
	let parse = |raw: &str| {
		raw.parse::<Version>()
			.map_err(|source| RegistrationError::InvalidVersion {
				path: path.clone(),
				source,
			})
	};

	let mut predicate = VariantPredicate::families(spec.families.into_iter().map(FamilyId::new));
	if let Some(min) = spec.min.as_deref() {
		predicate = predicate.since(parse(min)?);
	}
	if let Some(max) = spec.max.as_deref() {
		predicate = predicate.until(parse(max)?);
	}

	let mut decl = if spec.available {
		VariantDeclaration::available(predicate)
	} else {
		VariantDeclaration::unavailable(predicate)
	};
	if let Some(value) = spec.value {
		decl = decl.with_value(value);
	}
	if !spec.enumerable {
		decl = decl.non_enumerable();
	}
	Ok(decl)
}
