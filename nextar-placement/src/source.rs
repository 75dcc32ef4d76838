use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use log::{debug, trace};

/// Path segment a file viewer permalink uses for the interactive page of a file.
pub const VIEW_SEGMENT: &str = "blob";
/// Path segment that serves the same file as raw content.
pub const RAW_SEGMENT: &str = "raw";
/// Models picked from the device storage live in this folder below the storage root.
pub const LOCAL_MODEL_SUBDIRECTORY: &str = "Download";

pub const REMOTE_URL_KEY: &str = "remote_url";
pub const MODEL_DIRECTORY_KEY: &str = "model_directory";
pub const MODEL_FILE_NAME_KEY: &str = "model_file_name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLocation {
    RemoteUrl(String),
    LocalPath(String),
    Unresolved,
}

impl ModelLocation {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ModelLocation::Unresolved)
    }

    /// The string handed to the loader, `None` for [`ModelLocation::Unresolved`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ModelLocation::RemoteUrl(url) => Some(url),
            ModelLocation::LocalPath(path) => Some(path),
            ModelLocation::Unresolved => None,
        }
    }
}

impl Display for ModelLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelLocation::RemoteUrl(url) => write!(f, "remote model {}", url),
            ModelLocation::LocalPath(path) => write!(f, "local model {}", path),
            ModelLocation::Unresolved => write!(f, "<no model source>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDescriptor {
    pub directory: String,
    pub filename: String,
}

impl LocalDescriptor {
    pub fn new(directory: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            filename: filename.into(),
        }
    }
}

/// The two descriptors as they arrive from the selection screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDescriptors {
    pub remote: Option<String>,
    pub local: Option<LocalDescriptor>,
}

impl SourceDescriptors {
    /// Reads the descriptors from a key-value parameter bundle. A local descriptor is only
    /// formed when both the directory and the file name keys are present.
    pub fn from_bundle(bundle: &HashMap<String, String>) -> Self {
        let remote = bundle.get(REMOTE_URL_KEY).cloned();
        let local = match (
            bundle.get(MODEL_DIRECTORY_KEY),
            bundle.get(MODEL_FILE_NAME_KEY),
        ) {
            (Some(directory), Some(filename)) => Some(LocalDescriptor::new(directory, filename)),
            _ => None,
        };

        Self { remote, local }
    }

    pub fn resolve(&self) -> ModelLocation {
        resolve(self.remote.as_deref(), self.local.as_ref())
    }
}

/// Turns the descriptors into a single model location. The remote descriptor wins whenever it is
/// non-empty, the local one is only consulted otherwise.
pub fn resolve(remote: Option<&str>, local: Option<&LocalDescriptor>) -> ModelLocation {
    if let Some(permalink) = remote.filter(|permalink| !permalink.is_empty()) {
        let url = permalink_to_raw(permalink);
        debug!("Resolved permalink {} to {}", permalink, url);
        return ModelLocation::RemoteUrl(url);
    }

    if let Some(local) = local.filter(|local| !local.directory.is_empty() && !local.filename.is_empty()) {
        let path = format!(
            "{}/{}/{}",
            local.directory, LOCAL_MODEL_SUBDIRECTORY, local.filename
        );
        debug!("Resolved local model to {}", path);
        return ModelLocation::LocalPath(path);
    }

    trace!("Neither a remote nor a local model descriptor was supplied");
    ModelLocation::Unresolved
}

/// Path index of the view segment in `/<owner>/<repo>/blob/<ref>/<file>` permalinks.
const VIEW_SEGMENT_INDEX: usize = 2;

/// Rewrites the [`VIEW_SEGMENT`] of the url path into [`RAW_SEGMENT`]. The view segment is the one
/// following owner and repository; permalinks of another shape fall back to the first standalone
/// `blob` segment. Scheme, host, query and fragment are never touched, neither is a segment that
/// merely contains the word (e.g. `blobs` or `my-blob.glb`). Urls without such a segment are
/// returned as is.
pub fn permalink_to_raw(permalink: &str) -> String {
    let path_start = match permalink.find("://") {
        Some(scheme_end) => permalink[scheme_end + 3..]
            .find('/')
            .map(|host_len| scheme_end + 3 + host_len + 1),
        None => Some(0),
    };

    let Some(path_start) = path_start else {
        return permalink.to_string();
    };

    let path_end = permalink[path_start..]
        .find(['?', '#'])
        .map_or(permalink.len(), |idx| path_start + idx);

    // (byte offset, segment)
    let mut segments = Vec::new();
    let mut offset = path_start;
    for segment in permalink[path_start..path_end].split('/') {
        segments.push((offset, segment));
        offset += segment.len() + 1;
    }

    let view = segments
        .get(VIEW_SEGMENT_INDEX)
        .filter(|(_, segment)| *segment == VIEW_SEGMENT)
        .or_else(|| segments.iter().find(|(_, segment)| *segment == VIEW_SEGMENT));

    match view {
        Some(&(offset, segment)) => format!(
            "{}{}{}",
            &permalink[..offset],
            RAW_SEGMENT,
            &permalink[offset + segment.len()..]
        ),
        None => permalink.to_string(),
    }
}

/// The format hint passed to the loader alongside the location.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModelFormat {
    /// Binary glTF container
    Glb,
    /// glTF JSON document
    Gltf,
    Unknown,
}

impl ModelFormat {
    pub fn from_location(location: &ModelLocation) -> Self {
        let Some(location) = location.as_str() else {
            return ModelFormat::Unknown;
        };

        // strip query and fragment, the remote urls may carry e.g. ?raw=true
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();

        if path.ends_with(".glb") {
            ModelFormat::Glb
        } else if path.ends_with(".gltf") {
            ModelFormat::Gltf
        } else {
            ModelFormat::Unknown
        }
    }
}
