//! Well-known channel names and the payload defaults that travel on them.

/// Channel the Sender screen ("View2") publishes on and the Receiver observes.
pub const VIEW2_MESSAGE: &str = "View2Msg";

/// Greeting prefix of the default Sender payload (`"{greeting} at {timestamp}"`).
pub const DEFAULT_GREETING: &str = "Hello from View2";
