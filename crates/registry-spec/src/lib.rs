//! Catalogue specs for capability registries.
//!
//! A catalogue is authored as data (a tree of [`CapabilitySpec`]s), compiled to a
//! versioned blob by the `compile` feature, and loaded by `capdex-registry` at startup.
//! Versions stay as strings here; they are parsed and validated at load time.

use serde::{Deserialize, Serialize};

#[cfg(feature = "compile")]
pub mod compile;

#[cfg(test)]
mod tests;

/// Magic bytes identifying a compiled capability catalogue.
pub const MAGIC: &[u8; 8] = b"CAPDEXCT";

/// Schema version for blob format compatibility.
pub const SCHEMA_VERSION: u32 = 1;

/// Total header size in bytes (magic + version).
pub const HEADER_SIZE: usize = MAGIC.len() + size_of::<u32>();

/// A named catalogue of root capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSpec {
	pub name: String,
	#[serde(default)]
	pub roots: Vec<CapabilitySpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySpec {
	pub key: String,
	#[serde(default)]
	pub alias: Option<String>,
	/// Declarations in authored order. The first matching one wins.
	#[serde(default)]
	pub variants: Vec<VariantSpec>,
	#[serde(default)]
	pub children: Vec<CapabilitySpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSpec {
	/// Family ids this variant applies to. Empty means every family.
	#[serde(default)]
	pub families: Vec<u16>,
	/// Inclusive lower version bound, e.g. `"60"` or `"17.4"`.
	#[serde(default)]
	pub min: Option<String>,
	/// Exclusive upper version bound.
	#[serde(default)]
	pub max: Option<String>,
	#[serde(default = "default_true")]
	pub available: bool,
	#[serde(default)]
	pub value: Option<ValueSpec>,
	#[serde(default = "default_true")]
	pub enumerable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSpec {
	Bool(bool),
	Int(i64),
	String(String),
}

fn default_true() -> bool {
	true
}

/// Validates a blob header and returns the payload slice.
///
/// Returns `None` on short input, magic mismatch or schema version mismatch.
pub fn validate_blob(data: &[u8]) -> Option<&[u8]> {
	if data.len() < HEADER_SIZE {
		return None;
	}
	if &data[..MAGIC.len()] != MAGIC {
		return None;
	}
	let version = u32::from_le_bytes(data[MAGIC.len()..HEADER_SIZE].try_into().ok()?);
	if version != SCHEMA_VERSION {
		return None;
	}
	Some(&data[HEADER_SIZE..])
}
