use crate::frame::Frame;
use parking_lot::Mutex;

/// Rendering layer a view presents its frames onto.
///
/// Called synchronously from bus delivery, so implementations must be quick and
/// must not block on the publishing thread.
pub trait Surface: Send + Sync {
    fn present(&self, frame: &Frame);
}

/// In-memory surface keeping every presented frame.
#[derive(Debug, Default)]
pub struct BufferSurface {
    frames: Mutex<Vec<Frame>>,
}

impl BufferSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }
}

impl Surface for BufferSurface {
    fn present(&self, frame: &Frame) {
        self.frames.lock().push(frame.clone());
    }
}
