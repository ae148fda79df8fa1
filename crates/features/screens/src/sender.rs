use crate::error::ScreenError;
use crate::frame::{Frame, Line};
use chrono::Local;
use relay_domain::channels::DEFAULT_GREETING;
use relay_event_bus::{Channel, Delivery, EventBus};
use std::sync::Arc;
use tracing::debug;

pub const SENDER_TITLE: &str = "View2";
pub const SEND_BUTTON: &str = "Send Message to ContentView";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// The "View2" screen: a title and one button that broadcasts a greeting.
///
/// Holds no state beyond its wiring; it never learns who received the message.
#[derive(Debug, Clone)]
pub struct SenderView {
    bus: EventBus,
    channel: Channel,
    greeting: Arc<str>,
}

impl SenderView {
    #[must_use]
    pub fn new(bus: EventBus, channel: Channel) -> Self {
        Self { bus, channel, greeting: Arc::from(DEFAULT_GREETING) }
    }

    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<Arc<str>>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// The button action: publishes `"{greeting} at {now}"`.
    ///
    /// # Errors
    /// Returns [`ScreenError::Bus`] if the bus rejects the publish.
    pub fn send(&self) -> Result<Delivery, ScreenError> {
        let payload = format!("{} at {}", self.greeting, Local::now().format(TIMESTAMP_FORMAT));
        self.send_text(payload)
    }

    /// Publishes a custom payload on the sender's channel.
    ///
    /// # Errors
    /// Returns [`ScreenError::Bus`] if the bus rejects the publish.
    pub fn send_text(&self, text: impl Into<Arc<str>>) -> Result<Delivery, ScreenError> {
        let delivery = self.bus.publish(&self.channel, text)?;
        debug!(channel = %self.channel, delivered = delivery.delivered, "Sender published");
        Ok(delivery)
    }

    #[must_use]
    pub fn render(&self) -> Frame {
        Frame::new(SENDER_TITLE).with_line(Line::Action(SEND_BUTTON.to_owned()))
    }

    #[must_use]
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }
}
