use log::{debug, warn};
use nextar_files::ParserError;
use nextar_files::glb::reader::GlbReader;
use nextar_files::glb::types::GLB_MAGIC;
use nextar_files::gltf::reader::GltfReader;
use nextar_placement::source::{ModelFormat, ModelLocation};

use crate::io::common::loader::{AssetLoader, LoadError, RawAssetLoader};
use crate::io::fs::loader::FsModelLoader;
use crate::io::http::loader::HttpModelLoader;
use crate::rendering::common::types::LoadedModel;

pub struct ModelLoader {
    fs: FsModelLoader,
    http: HttpModelLoader,
}

impl ModelLoader {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            fs: FsModelLoader::new(),
            http: HttpModelLoader::new()?,
        })
    }

    /// Validates the raw bytes against the format hint.
    pub fn import(source: &str, format: ModelFormat, buf: Vec<u8>) -> Result<LoadedModel, LoadError> {
        match format {
            ModelFormat::Glb => Self::import_glb(source, &buf),
            ModelFormat::Gltf => {
                let document = String::from_utf8(buf).map_err(ParserError::from)?;
                let parsed = GltfReader::parse_document(&document)?;
                debug!("Imported {}: glTF {}", source, parsed.asset.version);

                Ok(LoadedModel {
                    source: source.to_string(),
                    format,
                    document,
                    buffer: None,
                })
            }
            ModelFormat::Unknown => {
                // Raw-content urls often lack the extension, sniff for a container instead.
                if buf.len() >= 4 && buf[0..4] == GLB_MAGIC.to_le_bytes() {
                    debug!("{} has no known extension but is a binary glTF", source);
                    return Self::import_glb(source, &buf);
                }

                warn!("Refusing to import {} ({} bytes)", source, buf.len());
                Err(LoadError::UnsupportedFormat {
                    format,
                    reason: "only glTF models can be placed",
                })
            }
        }
    }

    fn import_glb(source: &str, buf: &[u8]) -> Result<LoadedModel, LoadError> {
        let asset = GlbReader::parse_asset(buf)?;
        debug!("Imported {}: {:?}", source, asset);
        Ok(LoadedModel {
            source: source.to_string(),
            format: ModelFormat::Glb,
            document: asset.json,
            buffer: asset.bin,
        })
    }
}

impl AssetLoader<Result<LoadedModel, LoadError>> for ModelLoader {
    fn load(&self, location: &ModelLocation, format: ModelFormat) -> Result<LoadedModel, LoadError> {
        let buf = match location {
            ModelLocation::RemoteUrl(url) => self.http.load_raw_owned(url)?,
            ModelLocation::LocalPath(path) => self.fs.load_raw_owned(path)?,
            ModelLocation::Unresolved => return Err(LoadError::Unresolved),
        };

        Self::import(&location.to_string(), format, buf)
    }
}

#[cfg(test)]
mod tests {
    use nextar_files::glb::types::{CHUNK_TYPE_BIN, CHUNK_TYPE_JSON};

    use super::*;

    const DOCUMENT: &str = r#"{"asset":{"version":"2.0"},"scenes":[]}"#;

    fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
        let mut json = json.as_bytes().to_vec();
        while json.len() % 4 != 0 {
            json.push(b' ');
        }
        let mut bin = bin.to_vec();
        while bin.len() % 4 != 0 {
            bin.push(0);
        }

        let mut body = Vec::new();
        for (chunk_type, data) in [(CHUNK_TYPE_JSON, &json), (CHUNK_TYPE_BIN, &bin)] {
            body.extend_from_slice(&(data.len() as u32).to_le_bytes());
            body.extend_from_slice(&chunk_type.to_le_bytes());
            body.extend_from_slice(data);
        }

        let mut buf = Vec::new();
        buf.extend_from_slice(&GLB_MAGIC.to_le_bytes());
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&(12 + body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&body);
        buf
    }

    #[test]
    fn imports_binary_gltf() -> Result<(), anyhow::Error> {
        let model = ModelLoader::import("car.glb", ModelFormat::Glb, glb(DOCUMENT, &[7; 8]))?;
        assert_eq!(model.format, ModelFormat::Glb);
        assert_eq!(model.document.trim_end(), DOCUMENT);
        assert_eq!(model.buffer, Some(vec![7; 8]));
        Ok(())
    }

    #[test]
    fn imports_json_gltf() -> Result<(), anyhow::Error> {
        let model = ModelLoader::import("car.gltf", ModelFormat::Gltf, DOCUMENT.as_bytes().to_vec())?;
        assert_eq!(model.document, DOCUMENT);
        assert!(model.buffer.is_none());
        Ok(())
    }

    #[test]
    fn rejects_broken_json() {
        let broken = b"{ this is not json".to_vec();
        assert!(matches!(
            ModelLoader::import("car.gltf", ModelFormat::Gltf, broken),
            Err(LoadError::Parse(ParserError::JsonError(_)))
        ));

        let in_container = glb("{ this is not json", &[]);
        assert!(matches!(
            ModelLoader::import("car.glb", ModelFormat::Glb, in_container),
            Err(LoadError::Parse(ParserError::JsonError(_)))
        ));

        let without_version = br#"{"scenes":[]}"#.to_vec();
        assert!(ModelLoader::import("car.gltf", ModelFormat::Gltf, without_version).is_err());
    }

    #[test]
    fn sniffs_extensionless_containers() -> Result<(), anyhow::Error> {
        let model = ModelLoader::import("https://host/raw/main/car", ModelFormat::Unknown, glb(DOCUMENT, &[]))?;
        assert_eq!(model.format, ModelFormat::Glb);
        Ok(())
    }

    #[test]
    fn rejects_other_formats() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n".to_vec();
        let err = ModelLoader::import("car.obj", ModelFormat::Unknown, obj).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn rejects_mislabeled_content() {
        let html = b"<!DOCTYPE html><html></html>".to_vec();
        assert!(matches!(
            ModelLoader::import("car.glb", ModelFormat::Glb, html.clone()),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            ModelLoader::import("car.gltf", ModelFormat::Gltf, html),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_storage() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("nextar-model-loader-{}.glb", std::process::id()));
        std::fs::write(&path, glb(DOCUMENT, &[1, 2, 3, 4]))?;
        let location = ModelLocation::LocalPath(path.to_string_lossy().into_owned());

        let loaded = ModelLoader::new()?.load(&location, ModelFormat::from_location(&location));
        std::fs::remove_file(&path)?;

        let model = loaded?;
        assert_eq!(model.byte_len(), model.document.len() + 4);
        Ok(())
    }

    #[test]
    fn unresolved_location_fails() -> Result<(), anyhow::Error> {
        let result = ModelLoader::new()?.load(&ModelLocation::Unresolved, ModelFormat::Unknown);
        assert!(matches!(result, Err(LoadError::Unresolved)));
        Ok(())
    }
}
