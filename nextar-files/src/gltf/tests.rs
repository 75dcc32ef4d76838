use crate::ParserError;
use crate::gltf::reader::GltfReader;

#[test]
fn accepts_gltf_2() -> Result<(), anyhow::Error> {
    let document = GltfReader::parse_document(
        r#"{"asset":{"version":"2.0","generator":"Blender"},"scenes":[{"nodes":[0]}]}"#,
    )?;
    assert_eq!(document.asset.version, "2.0");
    assert_eq!(document.asset.generator.as_deref(), Some("Blender"));
    Ok(())
}

#[test]
fn broken_json_is_rejected() {
    assert!(matches!(
        GltfReader::parse_document("{ this is not json"),
        Err(ParserError::JsonError(_))
    ));
    assert!(matches!(
        GltfReader::parse_document(r#"{"asset":{"version":"2.0"}"#),
        Err(ParserError::JsonError(_))
    ));
}

#[test]
fn asset_version_is_mandatory() {
    assert!(matches!(GltfReader::parse_document("{}"), Err(ParserError::JsonError(_))));
    assert!(matches!(
        GltfReader::parse_document(r#"{"asset":{}}"#),
        Err(ParserError::JsonError(_))
    ));
    assert!(matches!(GltfReader::parse_document("[1, 2]"), Err(ParserError::JsonError(_))));
}

#[test]
fn gltf_1_document_is_rejected() {
    assert!(matches!(
        GltfReader::parse_document(r#"{"asset":{"version":"1.0"}}"#),
        Err(ParserError::UnsupportedVersion { version: 1 })
    ));
    assert!(matches!(
        GltfReader::parse_document(r#"{"asset":{"version":"two"}}"#),
        Err(ParserError::FormatError { .. })
    ));
}
