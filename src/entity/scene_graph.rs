use std::sync::Arc;

use glam::Mat4;
use hecs::{Entity, World};
use itertools::Itertools;
use log::{debug, trace};
use nextar_placement::placement::Anchor;

use crate::entity::components::scene::{AnchorNode, ChildOf, ModelRenderable, Selected, Transformable};
use crate::rendering::ModelHandle;
use crate::rendering::common::types::LoadedModel;
use crate::tracking::Gesture;

/// A model in the scene, ready to be placed on its anchor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable {
    pub anchor: Anchor,
    pub handle: ModelHandle,
    /// The user's manipulation, applied in anchor space
    pub local_transform: Mat4,
}

/// Owned by the scene thread alone, hence no locking.
#[derive(Default)]
pub struct SceneGraph {
    world: World,
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph::default()
    }

    #[cfg(test)]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Creates the anchor node and the model below it, and selects the model.
    pub fn attach_model(&mut self, anchor: Anchor, handle: ModelHandle, model: Arc<LoadedModel>) -> Entity {
        let anchor_node = self.world.spawn((AnchorNode(anchor),));
        let model_node = self.world.spawn((
            ChildOf(anchor_node),
            Transformable::default(),
            ModelRenderable { handle, model },
        ));
        debug!("Attached {:?} to {:?}", handle, anchor);

        self.select(model_node);
        model_node
    }

    pub fn select(&mut self, entity: Entity) {
        let selected = self
            .world
            .query_mut::<&Selected>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect_vec();

        for previous in selected {
            let _ = self.world.remove_one::<Selected>(previous);
        }

        if self.world.insert_one(entity, Selected).is_err() {
            debug!("Can't select {:?}, it no longer exists", entity);
        }
    }

    /// Returns whether a node was selected to receive the gesture.
    pub fn apply_gesture(&mut self, gesture: &Gesture) -> bool {
        let mut applied = false;
        for (entity, (transformable, _)) in self.world.query_mut::<(&mut Transformable, &Selected)>() {
            match *gesture {
                Gesture::Drag(delta) => transformable.translate(delta),
                Gesture::Twist(radians) => transformable.rotate(radians),
                Gesture::Pinch(factor) => transformable.scale_by(factor),
            }
            trace!("{:?} on {:?}: {:?}", gesture, entity, transformable);
            applied = true;
        }
        applied
    }

    pub fn drawables(&self) -> Vec<Drawable> {
        self.world
            .query::<(&ChildOf, &Transformable, &ModelRenderable)>()
            .iter()
            .filter_map(|(_, (parent, transformable, renderable))| {
                let anchor_node = self.world.get::<&AnchorNode>(parent.0).ok()?;
                Some(Drawable {
                    anchor: anchor_node.0,
                    handle: renderable.handle,
                    local_transform: transformable.local_transform(),
                })
            })
            .collect_vec()
    }

    pub fn model_count(&self) -> usize {
        self.world.query::<&ModelRenderable>().iter().count()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use nextar_placement::placement::{AnchorId, DetectionTarget, PlaneHandle};
    use nextar_placement::source::ModelFormat;

    use super::*;
    use crate::entity::components::scene::{MAX_SCALE, MIN_SCALE};

    fn anchor(id: u64) -> Anchor {
        Anchor {
            id: AnchorId(id),
            target: DetectionTarget::Plane(PlaneHandle(1)),
        }
    }

    fn model() -> Arc<LoadedModel> {
        Arc::new(LoadedModel {
            source: "car.gltf".to_string(),
            format: ModelFormat::Gltf,
            document: "{}".to_string(),
            buffer: None,
        })
    }

    #[test]
    fn attached_model_is_selected() {
        let mut scene = SceneGraph::new();
        let entity = scene.attach_model(anchor(1), ModelHandle(1), model());

        assert_eq!(scene.model_count(), 1);
        assert!(scene.world().get::<&Selected>(entity).is_ok());

        let drawables = scene.drawables();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].anchor, anchor(1));
        assert_eq!(drawables[0].local_transform, Mat4::IDENTITY);
    }

    #[test]
    fn only_one_node_is_selected() {
        let mut scene = SceneGraph::new();
        let first = scene.attach_model(anchor(1), ModelHandle(1), model());
        let second = scene.attach_model(anchor(2), ModelHandle(2), model());

        assert!(scene.world().get::<&Selected>(first).is_err());
        assert!(scene.world().get::<&Selected>(second).is_ok());

        scene.select(first);
        assert!(scene.world().get::<&Selected>(first).is_ok());
        assert!(scene.world().get::<&Selected>(second).is_err());
    }

    #[test]
    fn gestures_need_a_selection() {
        let mut scene = SceneGraph::new();
        assert!(!scene.apply_gesture(&Gesture::Drag(Vec3::X)));

        scene.attach_model(anchor(1), ModelHandle(1), model());
        assert!(scene.apply_gesture(&Gesture::Drag(Vec3::X)));
        assert!(scene.apply_gesture(&Gesture::Twist(0.5)));

        let local = scene.drawables()[0].local_transform;
        assert!(local.w_axis.truncate().abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn pinch_is_clamped() {
        let mut scene = SceneGraph::new();
        let entity = scene.attach_model(anchor(1), ModelHandle(1), model());
        let scale = |scene: &SceneGraph| scene.world().get::<&Transformable>(entity).unwrap().scale;

        scene.apply_gesture(&Gesture::Pinch(10.0));
        assert_eq!(scale(&scene), MAX_SCALE);

        scene.apply_gesture(&Gesture::Pinch(0.01));
        assert_eq!(scale(&scene), MIN_SCALE);

        scene.apply_gesture(&Gesture::Pinch(-1.0));
        assert_eq!(scale(&scene), MIN_SCALE);
    }
}
