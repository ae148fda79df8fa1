use anyhow::{Context, bail};
use relay_kernel::AppContext;
use relay_screens::{Frame, Line, Navigator, ReceiverView, Screen, SenderView, Surface};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

const HELP: [&str; 5] = [
    "open         go to View2",
    "send [text]  on View2: send the greeting or a custom text",
    "back         return to the notification list",
    "list         redraw the current screen",
    "quit         exit",
];

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Open,
    Send(Option<String>),
    Back,
    List,
    Help,
    Quit,
}

impl Command {
    pub(crate) fn parse(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "open" => Self::Open,
            "send" if rest.is_empty() => Self::Send(None),
            "send" => Self::Send(Some(rest.to_owned())),
            "back" => Self::Back,
            "list" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("Unknown command `{other}`, try `help`"),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Forwards frames only while its screen is in front.
struct Slot {
    target: Arc<dyn Surface>,
    visible: AtomicBool,
}

impl Slot {
    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Release);
    }
}

impl Surface for Slot {
    fn present(&self, frame: &Frame) {
        if self.visible.load(Ordering::Acquire) {
            self.target.present(frame);
        }
    }
}

/// Screens, navigation and the shared context of one shell session.
pub(crate) struct App {
    ctx: AppContext,
    nav: Navigator,
    surface: Arc<dyn Surface>,
    receiver_slot: Arc<Slot>,
    receiver: ReceiverView,
    sender: SenderView,
}

impl App {
    pub(crate) fn new(ctx: AppContext, surface: Arc<dyn Surface>) -> anyhow::Result<Self> {
        let receiver_slot =
            Arc::new(Slot { target: Arc::clone(&surface), visible: AtomicBool::new(true) });
        let receiver = ReceiverView::mount(&ctx.bus, &ctx.channel, receiver_slot.clone())
            .context("Failed to mount the receiver screen")?;
        let sender = SenderView::new(ctx.bus.clone(), ctx.channel.clone())
            .with_greeting(ctx.config.sender.greeting.as_str());

        info!(channel = %ctx.channel, "Shell ready");
        Ok(Self { ctx, nav: Navigator::new(), surface, receiver_slot, receiver, sender })
    }

    pub(crate) fn handle(&mut self, command: Command) -> Flow {
        debug!(?command, screen = %self.nav.current(), "Handling command");
        match command {
            Command::Open => {
                if self.nav.open_sender() {
                    self.receiver_slot.set_visible(false);
                }
                self.surface.present(&self.sender.render());
            },
            Command::Send(text) => self.send(text),
            Command::Back => {
                if self.nav.back() {
                    self.receiver_slot.set_visible(true);
                }
                // mark_read re-renders through the change observer when something was unread.
                if !self.receiver.mark_read() {
                    self.receiver.refresh();
                }
            },
            Command::List => match self.nav.current() {
                Screen::Receiver => self.receiver.refresh(),
                Screen::Sender => self.surface.present(&self.sender.render()),
            },
            Command::Help => {
                let frame = HELP
                    .iter()
                    .fold(Frame::new("Commands"), |frame, line| {
                        frame.with_line(Line::Text((*line).to_owned()))
                    });
                self.surface.present(&frame);
            },
            Command::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    fn send(&self, text: Option<String>) {
        if self.nav.current() != Screen::Sender {
            warn!("Nothing to send from here; `open` View2 first");
            return;
        }
        let result = match text {
            Some(text) => self.sender.send_text(text),
            None => self.sender.send(),
        };
        match result {
            Ok(delivery) => info!(delivered = delivery.delivered, "Message sent"),
            Err(err) => warn!(label = err.label(), error = %err, "Send failed"),
        }
    }

    pub(crate) fn shutdown(self) {
        self.receiver.unmount();
        let channels = self.ctx.bus.shutdown();
        info!(channels, "Shell stopped");
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("nav", &self.nav)
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_kernel::domain::config::AppConfig;
    use relay_screens::BufferSurface;

    fn app() -> (App, Arc<BufferSurface>) {
        let surface = Arc::new(BufferSurface::new());
        let ctx = AppContext::new(AppConfig::default()).unwrap();
        (App::new(ctx, surface.clone()).unwrap(), surface)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("open").unwrap(), Command::Open);
        assert_eq!(Command::parse("  SEND  ").unwrap(), Command::Send(None));
        assert_eq!(Command::parse("send hi there").unwrap(), Command::Send(Some("hi there".into())));
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert!(Command::parse("launch").is_err());
    }

    #[test]
    fn full_session_round_trip() {
        let (mut app, surface) = app();
        assert_eq!(surface.last().unwrap().title, "Notification Center Demo");

        assert_eq!(app.handle(Command::Open), Flow::Continue);
        assert_eq!(surface.last().unwrap().title, "View2");

        app.handle(Command::Send(None));
        app.handle(Command::Send(Some("second".into())));
        assert_eq!(surface.last().unwrap().title, "View2", "receiver renders stay hidden");
        assert_eq!(app.receiver.inbox().len(), 2);

        app.handle(Command::Back);
        let frame = surface.last().unwrap();
        let rows: Vec<&str> = frame.rows().collect();
        assert_eq!(frame.title, "Notification Center Demo");
        assert!(rows[0].starts_with("Hello from View2 at "));
        assert_eq!(rows[1], "second");
        assert!(!app.receiver.inbox().has_unread());

        assert_eq!(app.handle(Command::Quit), Flow::Exit);
        app.shutdown();
    }

    #[test]
    fn send_is_ignored_on_the_receiver_screen() {
        let (mut app, surface) = app();
        let frames = surface.len();

        app.handle(Command::Send(Some("nope".into())));

        assert!(app.receiver.inbox().is_empty());
        assert_eq!(surface.len(), frames);
    }

    #[test]
    fn list_redraws_current_screen() {
        let (mut app, surface) = app();

        app.handle(Command::List);
        assert_eq!(surface.last().unwrap().title, "Notification Center Demo");

        app.handle(Command::Open);
        app.handle(Command::List);
        assert_eq!(surface.last().unwrap().title, "View2");
    }
}
