use std::sync::mpsc::{Receiver, TryRecvError};

/// Future-like slot for an asset loaded off the render thread.
///
/// The render loop calls `poll()` once per frame and simply skips the
/// asset while it is pending. Resolution and failure each happen at most
/// once; failure is recoverable (logged by the loader, slot stays empty).
pub enum AssetSlot<T> {
    Pending(Receiver<anyhow::Result<T>>),
    Ready(T),
    Failed,
}

impl<T: Send + 'static> AssetSlot<T> {
    /// Run `load` on a background thread; the result arrives at some
    /// later frame boundary.
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    {
        let (sender, receiver) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            // Receiver dropped means the demo shut down first; fine.
            let _ = sender.send(load());
        });
        Self::Pending(receiver)
    }

    /// Wrap an already-connected channel. Test seam.
    pub fn from_channel(receiver: Receiver<anyhow::Result<T>>) -> Self {
        Self::Pending(receiver)
    }

    /// Check for completion without blocking. Returns true exactly once,
    /// on the frame the asset resolved.
    pub fn poll(&mut self) -> bool {
        let Self::Pending(receiver) = self else {
            return false;
        };
        match receiver.try_recv() {
            Ok(Ok(value)) => {
                *self = Self::Ready(value);
                true
            }
            Ok(Err(err)) => {
                log::error!("asset load failed: {err:#}");
                *self = Self::Failed;
                false
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                log::error!("asset loader thread exited without a result");
                *self = Self::Failed;
                false
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}
