use crate::error::ScreenError;
use crate::frame::{Frame, Line};
use crate::surface::Surface;
use relay_event_bus::{Channel, EventBus, Subscription};
use relay_inbox::Inbox;
use std::sync::Arc;
use tracing::debug;

pub const RECEIVER_TITLE: &str = "Notification Center Demo";
pub const SENDER_LINK: &str = "Goto View2";

/// The root screen: a navigation entry to the sender and the list of received messages.
///
/// Re-renders onto its surface on every inbox change, including while another
/// screen is in front of it.
pub struct ReceiverView {
    inbox: Inbox,
    surface: Arc<dyn Surface>,
    observer: Subscription,
}

impl ReceiverView {
    /// Attaches a fresh inbox to `channel`, wires re-rendering and renders once.
    ///
    /// # Errors
    /// Returns [`ScreenError::Inbox`] if the inbox cannot subscribe.
    pub fn mount(
        bus: &EventBus,
        channel: &Channel,
        surface: Arc<dyn Surface>,
    ) -> Result<Self, ScreenError> {
        let inbox = Inbox::attach(bus, channel)?;

        let reader = inbox.downgrade();
        let target = Arc::clone(&surface);
        let observer = inbox.on_change(move |_| {
            if let Some(inbox) = reader.upgrade() {
                target.present(&render_inbox(&inbox));
            }
            Ok(())
        });

        let view = Self { inbox, surface, observer };
        view.refresh();
        debug!(channel = %channel, "Receiver mounted");
        Ok(view)
    }

    #[must_use]
    pub fn render(&self) -> Frame {
        render_inbox(&self.inbox)
    }

    /// Presents the current frame.
    pub fn refresh(&self) {
        self.surface.present(&self.render());
    }

    /// Marks the list read, as when the screen comes back into view.
    pub fn mark_read(&self) -> bool {
        self.inbox.mark_read()
    }

    #[must_use]
    pub const fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    /// Disposes the inbox. The list keeps what it had and stops growing.
    pub fn unmount(&self) {
        if self.inbox.dispose() {
            debug!(channel = %self.inbox.channel(), "Receiver unmounted");
        }
    }
}

impl std::fmt::Debug for ReceiverView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiverView")
            .field("inbox", &self.inbox)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

fn render_inbox(inbox: &Inbox) -> Frame {
    let mut frame = Frame::new(RECEIVER_TITLE).with_line(Line::Action(SENDER_LINK.to_owned()));
    frame
        .lines
        .extend(inbox.messages().into_iter().map(|m| Line::Row { id: m.id, text: m.text }));
    frame
}
