use super::*;

#[test]
fn variant_defaults_apply_when_omitted() {
	let spec: CatalogSpec = serde_json::from_str(
		r#"{
			"name": "style",
			"roots": [
				{ "key": "color", "variants": [ { "value": { "string": "black" } } ] }
			]
		}"#,
	)
	.expect("catalogue should parse");

	let variant = &spec.roots[0].variants[0];
	assert!(variant.available);
	assert!(variant.enumerable);
	assert!(variant.families.is_empty());
	assert_eq!(variant.min, None);
	assert_eq!(variant.value, Some(ValueSpec::String("black".into())));
	assert!(spec.roots[0].children.is_empty());
}

#[test]
fn validate_blob_rejects_bad_headers() {
	assert!(validate_blob(b"short").is_none());

	let mut wrong_magic = b"NOTMAGIC".to_vec();
	wrong_magic.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
	assert!(validate_blob(&wrong_magic).is_none());

	let mut wrong_version = MAGIC.to_vec();
	wrong_version.extend_from_slice(&(SCHEMA_VERSION + 1).to_le_bytes());
	assert!(validate_blob(&wrong_version).is_none());
}

#[test]
fn validate_blob_returns_payload() {
	let mut blob = MAGIC.to_vec();
	blob.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
	blob.extend_from_slice(&[1, 2, 3]);
	assert_eq!(validate_blob(&blob), Some(&[1u8, 2, 3][..]));
}

#[cfg(feature = "compile")]
#[test]
fn encode_writes_header() {
	let spec = CatalogSpec {
		name: "empty".into(),
		roots: Vec::new(),
	};
	let blob = compile::encode(&spec).expect("encode");
	assert_eq!(&blob[..MAGIC.len()], MAGIC);
	let payload = validate_blob(&blob).expect("header should validate");
	let decoded: CatalogSpec = postcard::from_bytes(payload).expect("decode");
	assert_eq!(decoded, spec);
}
