use std::fmt;

/// Lifecycle of a view-state holder. The only transition is `Active -> Disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HolderStatus {
    /// Subscribed and appending incoming events.
    #[default]
    Active,
    /// Unsubscribed; the message list is frozen.
    Disposed,
}

impl HolderStatus {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for HolderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Disposed => "disposed",
        })
    }
}
