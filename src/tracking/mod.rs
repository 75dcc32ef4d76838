//! The camera side of a session. A [`FrameSource`] hands the scene thread one [`Frame`] per camera
//! frame and doubles as the [`Tracker`] that turns anchoring events into anchors.
use glam::{Affine3A, Mat4, Vec3, Vec4};
use nextar_placement::placement::{AnchorId, AnchoringEvent, Tracker};
use nextar_placement::pose::RealWorldExtent;

pub mod scripted;

/// Where a tracked anchor is this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnchorObservation {
    pub anchor: AnchorId,
    pub pose: Affine3A,
    /// The measured size of an image target. Estimates start out at zero and grow while tracking
    /// refines them. Planes don't report one.
    pub extent: Option<RealWorldExtent>,
}

/// Manipulation of the selected model, in anchor space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    Drag(Vec3),
    /// Rotation around the anchor's up axis, in radians
    Twist(f32),
    /// Relative scale change
    Pinch(f32),
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u32,
    pub view: Mat4,
    pub projection: Mat4,
    /// Light estimate, multiplied into every drawn model
    pub color_correction: Vec4,
    pub events: Vec<AnchoringEvent>,
    pub observations: Vec<AnchorObservation>,
    pub gestures: Vec<Gesture>,
}

impl Frame {
    pub fn observation(&self, anchor: AnchorId) -> Option<&AnchorObservation> {
        self.observations.iter().find(|o| o.anchor == anchor)
    }
}

pub trait FrameSource: Tracker {
    /// Blocks until the next camera frame, `None` once the camera stopped.
    fn next_frame(&mut self) -> Option<Frame>;
}
