//! The one-model-per-session state machine.
//!
//! A session starts [`PlacementState::Idle`] and moves to [`PlacementState::Placed`] on the first
//! anchoring event the tracker can create an anchor for. The transition happens *before* the load
//! is dispatched, so a second tap that arrives while the first load is still running never starts
//! another one. `Placed` is terminal: a failed load does not re-arm the session.
use std::fmt::{Display, Formatter};

use glam::{Affine3A, Vec2};
use log::{debug, error, info, trace};

use crate::PlacementError;
use crate::pose::RealWorldExtent;
use crate::source::{ModelFormat, ModelLocation};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaneHandle(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

/// What an anchor was created from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DetectionTarget {
    Plane(PlaneHandle),
    /// A recognized reference image, by its index in the image database.
    Image(u32),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Anchor {
    pub id: AnchorId,
    pub target: DetectionTarget,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AnchoringEvent {
    /// An accepted tap on a detected plane
    PlaneTap { screen_point: Vec2, plane: PlaneHandle },
    /// A reference image entered tracking
    ImageEntered {
        identity: u32,
        extent: RealWorldExtent,
        pose: Affine3A,
    },
}

/// The part of the tracking runtime the controller needs: turning an event into an anchor.
pub trait Tracker {
    /// `None` when the event can't be anchored (e.g. the hit test came back empty), such an event
    /// does not count as a placement.
    fn create_anchor(&mut self, event: &AnchoringEvent) -> Option<Anchor>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub anchor: Anchor,
    pub location: ModelLocation,
    pub format: ModelFormat,
}

/// Starts the asynchronous model load. Implementations must return immediately; the outcome is
/// reported back through [`PlacementController::complete_load`] on the scene thread.
pub trait LoadDispatcher {
    fn dispatch(&self, request: LoadRequest) -> Result<(), PlacementError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Attached,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementState {
    Idle,
    Placed(LoadStatus),
}

impl PlacementState {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementState::Placed(_))
    }
}

impl Display for PlacementState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementState::Idle => write!(f, "Idle"),
            PlacementState::Placed(LoadStatus::Pending) => write!(f, "Placed (loading)"),
            PlacementState::Placed(LoadStatus::Attached) => write!(f, "Placed (attached)"),
            PlacementState::Placed(LoadStatus::Failed(reason)) => write!(f, "Placed (failed: {})", reason),
        }
    }
}

/// What happened to an anchoring event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlacementDecision {
    /// The event placed the model, a load for this anchor is in flight.
    Dispatched(Anchor),
    /// Already placed, the event has no effect.
    Ignored,
    /// The tracker could not anchor the event, the session is still waiting.
    NotAnchored,
}

pub struct PlacementController {
    location: ModelLocation,
    format: ModelFormat,
    state: PlacementState,
    anchor: Option<Anchor>,
}

impl PlacementController {
    /// The location is resolved once at session entry. Without a source there is no session.
    pub fn new(location: ModelLocation) -> Result<Self, PlacementError> {
        if !location.is_resolved() {
            return Err(PlacementError::UnresolvedSource);
        }

        let format = ModelFormat::from_location(&location);
        debug!("Placement session for {} ({:?})", location, format);
        Ok(Self {
            location,
            format,
            state: PlacementState::Idle,
            anchor: None,
        })
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn location(&self) -> &ModelLocation {
        &self.location
    }

    /// The anchor the model was placed on, once placed.
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub fn on_anchoring_event<T: Tracker, D: LoadDispatcher>(
        &mut self,
        event: &AnchoringEvent,
        tracker: &mut T,
        dispatcher: &D,
    ) -> Result<PlacementDecision, PlacementError> {
        if self.state.is_placed() {
            trace!("Ignoring {:?}, the model has already been placed", event);
            return Ok(PlacementDecision::Ignored);
        }

        let Some(anchor) = tracker.create_anchor(event) else {
            debug!("Tracker could not anchor {:?}", event);
            return Ok(PlacementDecision::NotAnchored);
        };

        // Transition first: whatever happens with the dispatch, this session has placed.
        self.state = PlacementState::Placed(LoadStatus::Pending);
        self.anchor = Some(anchor);
        info!("Placing {} on {:?}", self.location, anchor.target);

        let request = LoadRequest {
            anchor,
            location: self.location.clone(),
            format: self.format,
        };

        if let Err(err) = dispatcher.dispatch(request) {
            error!("{}", err);
            self.state = PlacementState::Placed(LoadStatus::Failed(err.to_string()));
            return Err(err);
        }

        Ok(PlacementDecision::Dispatched(anchor))
    }

    /// Records the outcome of the dispatched load. Must be called on the scene thread, before the
    /// host attaches (or reports) anything.
    pub fn complete_load(&mut self, result: Result<(), String>) -> Result<(), PlacementError> {
        match &self.state {
            PlacementState::Idle => {
                return Err(PlacementError::InvalidTransition {
                    reason: "a load completed before anything was placed",
                });
            }
            PlacementState::Placed(LoadStatus::Pending) => {}
            PlacementState::Placed(_) => {
                return Err(PlacementError::InvalidTransition {
                    reason: "the load has already completed",
                });
            }
        }

        self.state = match result {
            Ok(()) => {
                info!("Model attached");
                PlacementState::Placed(LoadStatus::Attached)
            }
            Err(reason) => {
                error!("Model could not be loaded: {}", reason);
                PlacementState::Placed(LoadStatus::Failed(reason))
            }
        };

        Ok(())
    }
}
