use std::time::Duration;

use glam::{Affine3A, Mat4, Vec2, Vec3, Vec4};
use log::{debug, trace};
use nextar_placement::placement::{Anchor, AnchorId, AnchoringEvent, DetectionTarget, PlaneHandle, Tracker};
use nextar_placement::pose::RealWorldExtent;

use crate::tracking::{AnchorObservation, Frame, FrameSource, Gesture};

/// The frame the user taps (or the image comes into view). The event repeats on the next frame,
/// sessions have to ignore it.
const PLACEMENT_FRAME: u32 = 1;
/// Image extents grow from zero to their real size over this many frames.
const EXTENT_REFINEMENT_FRAMES: u32 = 10;
const SCRIPTED_PLANE: PlaneHandle = PlaneHandle(1);

const CAMERA_DISTANCE: f32 = 0.6;
const CAMERA_HEIGHT: f32 = 0.4;
const ORBIT_SPEED: f32 = 0.01;
// portrait phone screen
const ASPECT_RATIO: f32 = 1080.0 / 2340.0;
const COLOR_CORRECTION: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.9);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedTarget {
    Plane,
    Image { identity: u32, extent: RealWorldExtent },
}

#[derive(Debug, Clone)]
pub struct ScriptConfig {
    pub frames: u32,
    pub frame_interval: Duration,
    pub anchor_position: Vec3,
    pub target: ScriptedTarget,
}

/// Replays a fixed session: the camera orbits the anchor position, the user taps (or the image is
/// recognized) early on, and later drags, twists and pinches the placed model.
pub struct ScriptedTracker {
    config: ScriptConfig,
    frame: u32,
    anchors: Vec<(Anchor, Affine3A)>,
}

impl ScriptedTracker {
    pub fn new(config: ScriptConfig) -> Self {
        Self {
            config,
            frame: 0,
            anchors: Vec::new(),
        }
    }

    fn target_pose(&self) -> Affine3A {
        Affine3A::from_translation(self.config.anchor_position)
    }

    fn extent(&self, frame: u32) -> Option<RealWorldExtent> {
        match self.config.target {
            ScriptedTarget::Plane => None,
            ScriptedTarget::Image { extent, .. } => {
                let progress = (frame as f32 / EXTENT_REFINEMENT_FRAMES as f32).min(1.0);
                Some(RealWorldExtent::new(extent.width * progress, extent.depth * progress))
            }
        }
    }

    fn events(&self, frame: u32) -> Vec<AnchoringEvent> {
        if frame != PLACEMENT_FRAME && frame != PLACEMENT_FRAME + 1 {
            return vec![];
        }

        let event = match self.config.target {
            ScriptedTarget::Plane => AnchoringEvent::PlaneTap {
                screen_point: Vec2::new(0.5, 0.5),
                plane: SCRIPTED_PLANE,
            },
            ScriptedTarget::Image { identity, .. } => AnchoringEvent::ImageEntered {
                identity,
                extent: self.extent(frame).unwrap_or_default(),
                pose: self.target_pose(),
            },
        };
        vec![event]
    }

    fn gestures(&self, frame: u32) -> Vec<Gesture> {
        let frames = self.config.frames;
        if frame == frames / 4 {
            vec![Gesture::Drag(Vec3::new(0.05, 0.0, 0.0))]
        } else if frame == frames / 2 {
            vec![Gesture::Twist(std::f32::consts::FRAC_PI_4)]
        } else if frame == frames * 3 / 4 {
            vec![Gesture::Pinch(1.5)]
        } else {
            vec![]
        }
    }

    fn camera(&self, frame: u32) -> (Mat4, Mat4) {
        let angle = frame as f32 * ORBIT_SPEED;
        let target = self.config.anchor_position;
        let eye = target + Vec3::new(angle.sin() * CAMERA_DISTANCE, CAMERA_HEIGHT, angle.cos() * CAMERA_DISTANCE);

        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let projection = Mat4::perspective_rh_gl(60.0f32.to_radians(), ASPECT_RATIO, 0.1, 100.0);
        (view, projection)
    }
}

impl Tracker for ScriptedTracker {
    fn create_anchor(&mut self, event: &AnchoringEvent) -> Option<Anchor> {
        let (target, pose) = match event {
            AnchoringEvent::PlaneTap { screen_point, plane } => {
                // The scripted plane fills the whole screen, so the hit test only fails off-screen.
                let on_screen = (0.0..=1.0).contains(&screen_point.x) && (0.0..=1.0).contains(&screen_point.y);
                if !on_screen || *plane != SCRIPTED_PLANE {
                    debug!("Hit test at {} missed", screen_point);
                    return None;
                }
                (DetectionTarget::Plane(*plane), self.target_pose())
            }
            AnchoringEvent::ImageEntered { identity, pose, .. } => (DetectionTarget::Image(*identity), *pose),
        };

        let anchor = Anchor {
            id: AnchorId(self.anchors.len() as u64 + 1),
            target,
        };
        debug!("Created {:?}", anchor);
        self.anchors.push((anchor, pose));
        Some(anchor)
    }
}

impl FrameSource for ScriptedTracker {
    fn next_frame(&mut self) -> Option<Frame> {
        if self.frame >= self.config.frames {
            return None;
        }

        if self.frame > 0 && !self.config.frame_interval.is_zero() {
            std::thread::sleep(self.config.frame_interval);
        }

        let index = self.frame;
        self.frame += 1;

        let (view, projection) = self.camera(index);
        let extent = self.extent(index);
        let observations = self
            .anchors
            .iter()
            .map(|(anchor, pose)| AnchorObservation {
                anchor: anchor.id,
                pose: *pose,
                extent,
            })
            .collect();

        trace!("Frame {}", index);
        Some(Frame {
            index,
            view,
            projection,
            color_correction: COLOR_CORRECTION,
            events: self.events(index),
            observations,
            gestures: self.gestures(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target: ScriptedTarget) -> ScriptConfig {
        ScriptConfig {
            frames: 40,
            frame_interval: Duration::ZERO,
            anchor_position: Vec3::new(0.0, 0.0, -1.0),
            target,
        }
    }

    #[test]
    fn plays_back_the_configured_frames() {
        let mut tracker = ScriptedTracker::new(config(ScriptedTarget::Plane));
        let mut count = 0;
        while let Some(frame) = tracker.next_frame() {
            assert_eq!(frame.index, count);
            count += 1;
        }
        assert_eq!(count, 40);
        assert!(tracker.next_frame().is_none());
    }

    #[test]
    fn taps_twice() {
        let mut tracker = ScriptedTracker::new(config(ScriptedTarget::Plane));
        let events = (0..5)
            .filter_map(|_| tracker.next_frame())
            .map(|frame| frame.events.len())
            .collect::<Vec<_>>();
        assert_eq!(events, vec![0, 1, 1, 0, 0]);
    }

    #[test]
    fn image_extent_refines_from_zero() {
        let extent = RealWorldExtent::new(0.2, 0.15);
        let mut tracker = ScriptedTracker::new(config(ScriptedTarget::Image { identity: 3, extent }));

        let _ = tracker.next_frame();
        let event = tracker.next_frame().unwrap().events[0];
        let anchor = tracker.create_anchor(&event).unwrap();
        assert_eq!(anchor.target, DetectionTarget::Image(3));

        let mut frames = Vec::new();
        while let Some(frame) = tracker.next_frame() {
            frames.push(frame);
        }

        let first = frames[0].observation(anchor.id).unwrap().extent.unwrap();
        assert!(first.width < extent.width);
        let last = frames.last().unwrap().observation(anchor.id).unwrap().extent.unwrap();
        assert_eq!(last, extent);
    }

    #[test]
    fn off_screen_taps_miss() {
        let mut tracker = ScriptedTracker::new(config(ScriptedTarget::Plane));
        let miss = AnchoringEvent::PlaneTap {
            screen_point: Vec2::new(1.5, 0.5),
            plane: SCRIPTED_PLANE,
        };
        assert!(tracker.create_anchor(&miss).is_none());
        assert!(tracker.next_frame().unwrap().observations.is_empty());
    }
}
