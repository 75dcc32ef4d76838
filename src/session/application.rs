use std::sync::Arc;
use std::sync::mpsc::channel;
use std::time::Duration;

use log::{debug, error, info, trace};
use nextar_placement::PlacementError;
use nextar_placement::placement::{LoadStatus, PlacementController, PlacementDecision, PlacementState};
use nextar_placement::pose::PoseNormalizer;
use nextar_placement::source::ModelLocation;

use crate::entity::scene_graph::SceneGraph;
use crate::rendering::anchor_renderer::AnchorRenderer;
use crate::rendering::common::types::MaterialProperties;
use crate::rendering::{DrawCall, Renderer};
use crate::session::load_handlers::{LoadHandlers, LoadOutcome, ModelAssetLoader, ThreadedLoadDispatcher};
use crate::tracking::{Frame, FrameSource};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The camera stopped before anything could be anchored
    NothingPlaced,
    Attached,
    /// The camera stopped and the load didn't finish in time
    StillLoading,
    LoadFailed(String),
}

/// One placement session. Lives on the scene thread, which owns the scene graph and the placement
/// state; the only other thread is the model loader, reporting back through a channel.
pub struct ARApplication {
    controller: PlacementController,
    scene: SceneGraph,
    anchor_renderer: AnchorRenderer,
    dispatcher: ThreadedLoadDispatcher,
    load_handlers: LoadHandlers,
    load_timeout: Duration,
}

impl ARApplication {
    pub fn new(
        location: ModelLocation,
        normalizer: PoseNormalizer,
        loader: Arc<ModelAssetLoader>,
        load_timeout: Duration,
    ) -> Result<Self, PlacementError> {
        let controller = PlacementController::new(location)?;
        let (sender, receiver) = channel();

        Ok(Self {
            controller,
            scene: SceneGraph::new(),
            anchor_renderer: AnchorRenderer::new(normalizer),
            dispatcher: ThreadedLoadDispatcher::new(loader, sender),
            load_handlers: LoadHandlers::new(receiver),
            load_timeout,
        })
    }

    pub fn state(&self) -> &PlacementState {
        self.controller.state()
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn run<S: FrameSource, R: Renderer>(
        &mut self,
        source: &mut S,
        renderer: &mut R,
    ) -> Result<SessionOutcome, PlacementError> {
        info!("Session started, placing {}", self.controller.location());

        while let Some(frame) = source.next_frame() {
            if let Some(outcome) = self.load_handlers.poll() {
                self.handle_load(outcome, renderer)?;
            }

            if self.has_failed() {
                break;
            }

            for event in &frame.events {
                match self
                    .controller
                    .on_anchoring_event(event, source, &self.dispatcher)
                {
                    Ok(PlacementDecision::Dispatched(anchor)) => debug!("Frame {}: placed on {:?}", frame.index, anchor),
                    Ok(decision) => trace!("Frame {}: {:?}", frame.index, decision),
                    Err(err) => error!("Something is not right: {}", err),
                }
            }

            if self.has_failed() {
                break;
            }

            for gesture in &frame.gestures {
                if !self.scene.apply_gesture(gesture) {
                    trace!("Nothing selected for {:?}", gesture);
                }
            }

            self.draw(&frame, renderer);
        }

        if self.controller.state() == &PlacementState::Placed(LoadStatus::Pending) {
            info!("Camera stopped, waiting up to {:?} for the model", self.load_timeout);
            if let Some(outcome) = self.load_handlers.wait(self.load_timeout) {
                self.handle_load(outcome, renderer)?;
            }
        }

        let outcome = match self.controller.state() {
            PlacementState::Idle => SessionOutcome::NothingPlaced,
            PlacementState::Placed(LoadStatus::Pending) => SessionOutcome::StillLoading,
            PlacementState::Placed(LoadStatus::Attached) => SessionOutcome::Attached,
            PlacementState::Placed(LoadStatus::Failed(reason)) => SessionOutcome::LoadFailed(reason.clone()),
        };
        info!("Session ended: {}", self.controller.state());
        Ok(outcome)
    }

    fn has_failed(&self) -> bool {
        matches!(self.controller.state(), PlacementState::Placed(LoadStatus::Failed(_)))
    }

    fn handle_load<R: Renderer>(&mut self, outcome: LoadOutcome, renderer: &mut R) -> Result<(), PlacementError> {
        match outcome.result {
            Ok(model) => {
                self.controller.complete_load(Ok(()))?;
                let model = Arc::new(model);
                let handle = renderer.upload(&model, &MaterialProperties::PLACED_MODEL);
                self.scene.attach_model(outcome.anchor, handle, model);
            }
            Err(err) => {
                let reason = err.to_string();
                self.controller.complete_load(Err(reason.clone()))?;
                // Stands in for the blocking dialog, the session is over after this.
                error!("Something is not right: {}", reason);
            }
        }
        Ok(())
    }

    fn draw<R: Renderer>(&self, frame: &Frame, renderer: &mut R) {
        for drawable in self.scene.drawables() {
            let Some(observation) = frame.observation(drawable.anchor.id) else {
                trace!("{:?} is not tracked in frame {}", drawable.anchor, frame.index);
                continue;
            };

            let Some(placement) = self
                .anchor_renderer
                .placement(&drawable.anchor.target, observation)
            else {
                continue;
            };

            renderer.draw(&DrawCall {
                handle: drawable.handle,
                view: frame.view,
                projection: frame.projection,
                model_matrix: placement.model_matrix * drawable.local_transform,
                scale: placement.scale,
                tint: placement.tint,
                color_correction: frame.color_correction,
            });
        }
    }
}
