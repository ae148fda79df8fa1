use crate::error::EventBusError;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Validated name of a logical event topic.
///
/// Cheap to clone; two channels are equal when their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(Arc<str>);

impl Channel {
    /// Validates `name` and wraps it as a channel.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidChannel`] if the name is empty, consists only of
    /// whitespace, or contains control characters.
    pub fn new(name: impl AsRef<str>) -> Result<Self, EventBusError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(EventBusError::InvalidChannel {
                message: "channel name cannot be empty".into(),
                context: None,
            });
        }
        if name.trim().is_empty() {
            return Err(EventBusError::InvalidChannel {
                message: "channel name cannot be blank".into(),
                context: None,
            });
        }
        if name.chars().any(char::is_control) {
            return Err(EventBusError::InvalidChannel {
                message: format!("channel name {name:?} contains control characters").into(),
                context: None,
            });
        }
        Ok(Self(Arc::from(name)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Channel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Channel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Channel {
    type Err = EventBusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Channel {
    type Error = EventBusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Channel {
    type Error = EventBusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Anything the bus accepts as a channel: a validated [`Channel`] or a raw name.
///
/// Raw names are validated on every call.
pub trait IntoChannel {
    /// # Errors
    /// Returns [`EventBusError::InvalidChannel`] for an invalid raw name.
    fn into_channel(self) -> Result<Channel, EventBusError>;
}

impl IntoChannel for Channel {
    fn into_channel(self) -> Result<Channel, EventBusError> {
        Ok(self)
    }
}

impl IntoChannel for &Channel {
    fn into_channel(self) -> Result<Channel, EventBusError> {
        Ok(self.clone())
    }
}

impl IntoChannel for &str {
    fn into_channel(self) -> Result<Channel, EventBusError> {
        Channel::new(self)
    }
}

impl IntoChannel for String {
    fn into_channel(self) -> Result<Channel, EventBusError> {
        Channel::new(self)
    }
}

impl IntoChannel for &String {
    fn into_channel(self) -> Result<Channel, EventBusError> {
        Channel::new(self)
    }
}
