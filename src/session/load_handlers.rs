use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

use log::{debug, warn};
use nextar_placement::PlacementError;
use nextar_placement::placement::{Anchor, LoadDispatcher, LoadRequest};

use crate::io::common::loader::{AssetLoader, LoadError};
use crate::rendering::common::types::LoadedModel;

const WAIT_SLICE: Duration = Duration::from_millis(100);

pub type ModelAssetLoader = dyn AssetLoader<Result<LoadedModel, LoadError>>;

/// What the loader thread reports back to the scene thread.
#[derive(Debug)]
pub struct LoadOutcome {
    pub anchor: Anchor,
    pub result: Result<LoadedModel, LoadError>,
}

/// Runs every load on its own "Model Loader" thread. The thread never touches the scene, it only
/// sends its outcome.
pub struct ThreadedLoadDispatcher {
    loader: Arc<ModelAssetLoader>,
    sender: Sender<LoadOutcome>,
}

impl ThreadedLoadDispatcher {
    pub fn new(loader: Arc<ModelAssetLoader>, sender: Sender<LoadOutcome>) -> Self {
        Self { loader, sender }
    }
}

impl LoadDispatcher for ThreadedLoadDispatcher {
    fn dispatch(&self, request: LoadRequest) -> Result<(), PlacementError> {
        let loader = self.loader.clone();
        let sender = self.sender.clone();

        std::thread::Builder::new()
            .name("Model Loader".into())
            .spawn(move || {
                debug!("Loading {}", request.location);
                let result = loader.load(&request.location, request.format);
                let outcome = LoadOutcome {
                    anchor: request.anchor,
                    result,
                };

                if sender.send(outcome).is_err() {
                    warn!("Session ended before {} finished loading", request.location);
                }
            })
            .map_err(|err| PlacementError::LoadDispatch {
                reason: err.to_string(),
            })?;

        Ok(())
    }
}

/// The scene thread's end of the loader channel.
pub struct LoadHandlers {
    receiver: Receiver<LoadOutcome>,
}

impl LoadHandlers {
    pub fn new(receiver: Receiver<LoadOutcome>) -> Self {
        Self { receiver }
    }

    /// Never blocks, called once per frame.
    pub fn poll(&self) -> Option<LoadOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("LoadHandlers: Broken Pipe");
                None
            }
        }
    }

    /// Blocks until an outcome arrives or `timeout` passed. A timeout too large to be a point in
    /// time waits without a deadline.
    pub fn wait(&self, timeout: Duration) -> Option<LoadOutcome> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let slice = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return None;
                    }
                    remaining.min(WAIT_SLICE)
                }
                None => WAIT_SLICE,
            };

            match self.receiver.recv_timeout(slice) {
                Ok(outcome) => return Some(outcome),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("LoadHandlers: Broken Pipe");
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use nextar_placement::placement::{AnchorId, DetectionTarget};

    use super::*;

    fn outcome() -> LoadOutcome {
        LoadOutcome {
            anchor: Anchor {
                id: AnchorId(1),
                target: DetectionTarget::Image(0),
            },
            result: Err(LoadError::Unresolved),
        }
    }

    #[test]
    fn unbounded_timeout_still_receives() {
        let (sender, receiver) = channel();
        let handlers = LoadHandlers::new(receiver);

        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            sender.send(outcome()).unwrap();
        });

        assert!(handlers.wait(Duration::from_secs(u64::MAX)).is_some());
    }

    #[test]
    fn wait_gives_up() {
        let (_sender, receiver) = channel::<LoadOutcome>();
        let handlers = LoadHandlers::new(receiver);
        assert!(handlers.wait(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn poll_never_blocks() {
        let (sender, receiver) = channel();
        let handlers = LoadHandlers::new(receiver);
        assert!(handlers.poll().is_none());

        sender.send(outcome()).unwrap();
        assert!(handlers.poll().is_some());

        drop(sender);
        assert!(handlers.poll().is_none());
    }
}
