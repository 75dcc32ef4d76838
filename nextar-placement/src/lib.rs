//! The placement core: everything that decides *where* and *how big* a model ends up relative to
//! a tracked anchor, independent of any camera, renderer or asset backend.
//!
//! The host drives it roughly like this:
//! 1. [`capability::check`] once when the session starts,
//! 2. [`source::resolve`] the model location from the UI supplied descriptors,
//! 3. feed anchoring events into a [`placement::PlacementController`],
//! 4. per frame, [`pose::PoseNormalizer::normalize`] every visible anchor and pick a
//!    [`tint::tint_for`] the detected target.
use thiserror::Error;

pub mod asset;
pub mod capability;
pub mod placement;
pub mod pose;
pub mod source;
pub mod tint;

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("Invalid asset configuration: {reason}")]
    Configuration { reason: String },

    #[error("No model source configured")]
    UnresolvedSource,

    #[error(transparent)]
    UnsupportedPlatform(#[from] capability::Unsupported),

    #[error("Could not dispatch the model load: {reason}")]
    LoadDispatch { reason: String },

    #[error("Invalid session transition: {reason}")]
    InvalidTransition { reason: &'static str },
}
