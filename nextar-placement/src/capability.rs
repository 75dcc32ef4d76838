use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::{info, warn};
use thiserror::Error;

/// Android 7.0 (Nougat), the first platform level the tracking runtime supports.
pub const MIN_PLATFORM_API_LEVEL: u32 = 24;
pub const MIN_GRAPHICS_API_VERSION: GraphicsApiVersion = GraphicsApiVersion { major: 3, minor: 0 };

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    #[error("Platform too old: API level {actual}, at least {required} is required")]
    PlatformTooOld { actual: u32, required: u32 },

    #[error("Graphics too old: OpenGL ES {actual}, at least {required} is required")]
    GraphicsTooOld {
        actual: GraphicsApiVersion,
        required: GraphicsApiVersion,
    },

    #[error("Graphics too old: unrecognized OpenGL ES version \"{0}\"")]
    UnknownGraphicsVersion(String),
}

impl Unsupported {
    pub fn is_platform(&self) -> bool {
        matches!(self, Unsupported::PlatformTooOld { .. })
    }

    pub fn is_graphics(&self) -> bool {
        !self.is_platform()
    }
}

/// `major.minor`, compared component wise so that e.g. 3.10 sorts after 3.2.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GraphicsApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl PartialOrd for GraphicsApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GraphicsApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
    }
}

impl Display for GraphicsApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for GraphicsApiVersion {
    type Err = String;

    // "3", "3.0", "3.2"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (major, minor) = trimmed.split_once('.').unwrap_or((trimmed, "0"));

        let major = major
            .parse::<u32>()
            .map_err(|e| format!("Invalid major version in \"{}\": {}", s, e))?;
        let minor = minor
            .parse::<u32>()
            .map_err(|e| format!("Invalid minor version in \"{}\": {}", s, e))?;

        Ok(GraphicsApiVersion { major, minor })
    }
}

/// Decides once per session whether the device can run the placement pipeline at all.
/// The platform level is checked first, so an old platform is reported as such even if the
/// graphics version is fine (or garbage).
pub fn check(platform_api_level: u32, graphics_api_version: &str) -> Result<(), Unsupported> {
    if platform_api_level < MIN_PLATFORM_API_LEVEL {
        let err = Unsupported::PlatformTooOld {
            actual: platform_api_level,
            required: MIN_PLATFORM_API_LEVEL,
        };
        warn!("{}", err);
        return Err(err);
    }

    let version = match graphics_api_version.parse::<GraphicsApiVersion>() {
        Ok(version) => version,
        Err(reason) => {
            warn!("{}", reason);
            return Err(Unsupported::UnknownGraphicsVersion(
                graphics_api_version.to_string(),
            ));
        }
    };

    if version < MIN_GRAPHICS_API_VERSION {
        let err = Unsupported::GraphicsTooOld {
            actual: version,
            required: MIN_GRAPHICS_API_VERSION,
        };
        warn!("{}", err);
        return Err(err);
    }

    info!(
        "Device supported: API level {}, OpenGL ES {}",
        platform_api_level, version
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_dotted_versions() {
        assert_eq!("3".parse(), Ok(GraphicsApiVersion { major: 3, minor: 0 }));
        assert_eq!(" 3.2 ".parse(), Ok(GraphicsApiVersion { major: 3, minor: 2 }));
        assert!("three".parse::<GraphicsApiVersion>().is_err());
        assert!("3.x".parse::<GraphicsApiVersion>().is_err());
    }

    #[test]
    fn minor_versions_compare_numerically() {
        let v3_2: GraphicsApiVersion = "3.2".parse().unwrap();
        let v3_10: GraphicsApiVersion = "3.10".parse().unwrap();
        assert!(v3_10 > v3_2);
    }

    #[test]
    fn unparseable_version_is_a_graphics_failure() {
        let err = check(30, "OpenGL ES").unwrap_err();
        assert!(err.is_graphics());
        assert!(err.to_string().starts_with("Graphics too old"));
    }
}
