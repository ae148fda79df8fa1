use relay_screens::{Frame, Surface};
use std::io::Write;
use tracing::warn;

/// Writes every frame to stdout, separated by a blank line.
#[derive(Debug, Default)]
pub(crate) struct TerminalSurface;

impl TerminalSurface {
    pub(crate) const fn stdout() -> Self {
        Self
    }
}

impl Surface for TerminalSurface {
    fn present(&self, frame: &Frame) {
        let mut out = std::io::stdout().lock();
        if let Err(err) = write!(out, "\n{frame}").and_then(|()| out.flush()) {
            warn!(error = %err, "Failed to write frame to stdout");
        }
    }
}
