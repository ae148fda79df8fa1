use std::fmt;

/// Screens reachable in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Root list of received notifications.
    Receiver,
    /// "View2", pushed on top of the receiver.
    Sender,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Receiver => "receiver",
            Self::Sender => "sender",
        })
    }
}

/// Two-level navigation stack rooted at [`Screen::Receiver`].
///
/// The root is never popped; the sender is pushed at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    sender_open: bool,
}

impl Navigator {
    #[must_use]
    pub const fn new() -> Self {
        Self { sender_open: false }
    }

    #[must_use]
    pub const fn current(&self) -> Screen {
        if self.sender_open { Screen::Sender } else { Screen::Receiver }
    }

    /// Pushes the sender. Returns `false` if it is already shown.
    pub const fn open_sender(&mut self) -> bool {
        let changed = !self.sender_open;
        self.sender_open = true;
        changed
    }

    /// Pops back to the receiver. Returns `false` when already at the root.
    pub const fn back(&mut self) -> bool {
        let changed = self.sender_open;
        self.sender_open = false;
        changed
    }

    /// Number of screens on the stack.
    #[must_use]
    pub const fn depth(&self) -> usize {
        if self.sender_open { 2 } else { 1 }
    }
}
