//! [`CatalogSpec`] → blob compiler.

use crate::{CatalogSpec, MAGIC, SCHEMA_VERSION};

/// Serializes a catalogue into a headered postcard blob.
pub fn encode(spec: &CatalogSpec) -> Result<Vec<u8>, postcard::Error> {
	let payload = postcard::to_stdvec(spec)?;
	let mut out = Vec::with_capacity(crate::HEADER_SIZE + payload.len());
	out.extend_from_slice(MAGIC);
	out.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
	out.extend_from_slice(&payload);
	Ok(out)
}
