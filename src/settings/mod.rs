use std::collections::HashMap;
use std::str::FromStr;

use clap::{Parser, Subcommand, value_parser};
use itertools::Itertools;
use nextar_placement::asset::AssetProfile;
use nextar_placement::capability::MIN_PLATFORM_API_LEVEL;
use nextar_placement::pose::RealWorldExtent;
use nextar_placement::source::{MODEL_DIRECTORY_KEY, MODEL_FILE_NAME_KEY, REMOTE_URL_KEY};

#[derive(Parser, Debug)]
#[command(name = "nextar")]
#[command(version = concat!(env!("VERGEN_GIT_BRANCH"), "/",env!("VERGEN_GIT_SHA")))]
#[command(about = "Places a 3D model onto a tracked plane or reference image")]
pub struct CliArgs {
    /// Platform API level of the device the session runs on
    #[arg(long, env = "NEXTAR_PLATFORM_API_LEVEL", default_value_t = MIN_PLATFORM_API_LEVEL)]
    pub platform_api_level: u32,

    /// OpenGL ES version string as reported by the device, e.g. "3.2"
    #[arg(long, env = "NEXTAR_GRAPHICS_VERSION", default_value = "3.2")]
    pub graphics_version: String,

    /// Number of camera frames the scripted tracker plays back
    #[arg(long, env = "NEXTAR_FRAMES", default_value_t = 120)]
    pub frames: u32,

    /// Time between two camera frames, in milliseconds
    #[arg(long, env = "NEXTAR_FRAME_INTERVAL", default_value_t = 16)]
    pub frame_interval_ms: u64,

    /// How long to wait for a pending model once the camera stopped, in seconds
    #[arg(long, env = "NEXTAR_LOAD_TIMEOUT", default_value_t = 30)]
    pub load_timeout_secs: u64,

    /// World position of the tapped plane or the recognized image, "(x, y, z)"
    #[arg(long, env = "NEXTAR_ANCHOR", value_parser = value_parser!(Vector3), default_value = "(0, 0, -1)")]
    pub anchor: Vector3,

    /// Place on a recognized reference image with this database index instead of a plane tap
    #[arg(long, env = "NEXTAR_IMAGE")]
    pub image: Option<u32>,

    /// Measured size of the reference image in meters, "(width, depth)"
    #[arg(long, env = "NEXTAR_IMAGE_EXTENT", value_parser = value_parser!(Extent), default_value = "(0.2, 0.15)")]
    pub image_extent: Extent,

    #[command(flatten)]
    pub asset: AssetArgs,

    #[command(subcommand)]
    pub model_source: ModelSource,
}

/// Native-unit description of the placed model, defaults to the bundled CAD model.
#[derive(clap::Args, Debug, Clone)]
pub struct AssetArgs {
    /// The model's footprint along its longest horizontal edge, in native units
    #[arg(long, env = "NEXTAR_REFERENCE_SIZE", default_value_t = AssetProfile::BUNDLED_CAD.reference_size)]
    pub reference_size: f32,

    /// Displacement of the model origin from its visual center, in native units, "(x, y, z)"
    #[arg(long, env = "NEXTAR_MODEL_OFFSET", value_parser = value_parser!(Vector3), default_value = "(-251.3, 0, 29)")]
    pub model_offset: Vector3,

    /// Divisor applied to the vertical scale factor
    #[arg(
        long,
        env = "NEXTAR_VERTICAL_SCALE_DIVISOR",
        default_value_t = AssetProfile::BUNDLED_CAD.vertical_scale_divisor
    )]
    pub vertical_scale_divisor: f32,
}

impl AssetArgs {
    pub fn profile(&self) -> AssetProfile {
        AssetProfile {
            reference_size: self.reference_size,
            offset: self.model_offset.clone().into(),
            vertical_scale_divisor: self.vertical_scale_divisor,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ModelSource {
    /// Load the model from a file viewer permalink (e.g. on github.com)
    Online {
        #[arg(env = "NEXTAR_PERMALINK")]
        permalink: String,
    },
    /// Load the model from the device storage
    Phone {
        #[arg(long, env = "NEXTAR_MODEL_DIRECTORY")]
        model_directory: String,
        #[arg(long, env = "NEXTAR_MODEL_FILE_NAME")]
        model_file_name: String,
    },
}

impl ModelSource {
    /// The parameter bundle a selection screen would hand over.
    pub fn to_bundle(&self) -> HashMap<String, String> {
        let mut bundle = HashMap::new();
        match self {
            ModelSource::Online { permalink } => {
                bundle.insert(REMOTE_URL_KEY.to_string(), permalink.clone());
            }
            ModelSource::Phone {
                model_directory,
                model_file_name,
            } => {
                bundle.insert(MODEL_DIRECTORY_KEY.to_string(), model_directory.clone());
                bundle.insert(MODEL_FILE_NAME_KEY.to_string(), model_file_name.clone());
            }
        }
        bundle
    }
}

#[derive(Debug, Clone)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vector3> for glam::Vec3 {
    fn from(value: Vector3) -> Self {
        glam::Vec3::new(value.x, value.y, value.z)
    }
}

#[derive(Debug, Clone)]
pub struct Extent {
    pub width: f32,
    pub depth: f32,
}

impl From<Extent> for RealWorldExtent {
    fn from(value: Extent) -> Self {
        RealWorldExtent::new(value.width, value.depth)
    }
}

fn trim_brackets(input: &str) -> &str {
    let mut chars = input.chars();
    chars.next(); // skip first
    chars.next_back(); // skip last
    chars.as_str()
}

// (a, b, ...)
fn parse_components(s: &str, expected: usize) -> Result<Vec<f32>, String> {
    let string: String = s.chars().filter(|&c| !c.is_whitespace()).collect();
    if !string.starts_with("(") || !string.ends_with(")") {
        return Err("Missing start or end bracket".to_string());
    }

    let trimmed_str = trim_brackets(string.as_str());
    let splits = trimmed_str.split(',').collect_vec();

    if splits.len() != expected {
        return Err(format!(
            "Comma splitting resulted in {} splits, not {}!",
            splits.len(),
            expected
        ));
    }

    splits
        .iter()
        .map(|&split| {
            split
                .parse::<f32>()
                .map_err(|e| format!("Failed to parse component \"{}\": {}", split, e))
        })
        .collect::<Result<Vec<_>, _>>()
}

impl FromStr for Vector3 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = parse_components(s, 3)?;
        Ok(Vector3 {
            x: components[0],
            y: components[1],
            z: components[2],
        })
    }
}

impl FromStr for Extent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = parse_components(s, 2)?;
        if components.iter().any(|c| *c < 0.0) {
            return Err("Extents can't be negative".to_string());
        }

        Ok(Extent {
            width: components[0],
            depth: components[1],
        })
    }
}
