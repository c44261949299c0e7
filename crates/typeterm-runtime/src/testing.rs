use crate::command::{Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::time::Duration;
use tokio::sync::mpsc;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// Messages from [`Command::message`] are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages). Subscriptions only run
/// inside [`run_for`](TestProgram::run_for); everywhere else tests feed
/// messages by hand, which keeps time fully deterministic.
///
/// # Example
///
/// ```rust,ignore
/// let mut prog = TestProgram::<ConsoleApp>::new(ConsoleConfig::default());
/// prog.send(Msg::Key(KeyEvent::from(KeyCode::Char('h'))));
/// let screen = prog.render_string(60, 10);
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    quit: bool,
    rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let (tx, rx) = mpsc::unbounded_channel();
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            quit: false,
            rx,
            subscriptions: SubscriptionManager::new(tx),
        };
        program.collect(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process pending command messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Run the model's subscriptions for `duration` of tokio time, applying
    /// every message they emit. Subscriptions are reconciled after each
    /// update, as the real runtime does, and keep running across calls.
    ///
    /// Meant for `#[tokio::test(start_paused = true)]`, where the clock jumps
    /// straight to the next timer.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            self.subscriptions.reconcile(self.model.subscriptions());
            tokio::select! {
                biased;
                Some(msg) = self.rx.recv() => {
                    self.send(msg);
                    self.drain_messages();
                }
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }
    }

    /// Number of subscriptions started by [`run_for`](TestProgram::run_for)
    /// that are still running.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.active_count()
    }

    /// Whether any update so far returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Run the model's teardown hook and stop its subscriptions, as the
    /// runtime does on exit.
    pub fn unmount(&mut self) {
        self.model.unmount();
        self.subscriptions.shutdown();
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending_messages.push(msg),
            CommandInner::Quit => self.quit = true,
        }
    }
}

impl<M: Model> Drop for TestProgram<M> {
    fn drop(&mut self) {
        self.subscriptions.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::{subscribe, Subscription};
    use crate::subscriptions::Every;
    use ratatui::widgets::Paragraph;

    struct Echo {
        lines: Vec<String>,
        ticks_left: u32,
        unmounted: bool,
    }

    #[derive(Debug)]
    enum EchoMsg {
        Say(String),
        Relay(String),
        Want(u32),
        Tick,
        Stop,
    }

    impl Model for Echo {
        type Message = EchoMsg;
        type Flags = Vec<String>;

        fn init(lines: Vec<String>) -> (Self, Command<EchoMsg>) {
            (
                Echo {
                    lines,
                    ticks_left: 0,
                    unmounted: false,
                },
                Command::none(),
            )
        }

        fn update(&mut self, msg: EchoMsg) -> Command<EchoMsg> {
            match msg {
                EchoMsg::Say(s) => {
                    self.lines.push(s);
                    Command::none()
                }
                EchoMsg::Relay(s) => Command::message(EchoMsg::Say(s)),
                EchoMsg::Want(n) => {
                    self.ticks_left = n;
                    Command::none()
                }
                EchoMsg::Tick => {
                    self.ticks_left = self.ticks_left.saturating_sub(1);
                    self.lines.push("tick".into());
                    Command::none()
                }
                EchoMsg::Stop => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.lines.join(",")), frame.area());
        }

        fn subscriptions(&self) -> Vec<Subscription<EchoMsg>> {
            if self.ticks_left == 0 {
                return vec![];
            }
            vec![subscribe(Every::new(Duration::from_millis(10), &"echo")).map(|_| EchoMsg::Tick)]
        }

        fn unmount(&mut self) {
            self.unmounted = true;
        }
    }

    #[test]
    fn init_uses_flags() {
        let prog = TestProgram::<Echo>::new(vec!["a".into()]);
        assert_eq!(prog.model().lines, vec!["a"]);
    }

    #[test]
    fn chained_messages_need_draining() {
        let mut prog = TestProgram::<Echo>::new(vec![]);
        prog.send(EchoMsg::Relay("x".into()));
        assert!(prog.model().lines.is_empty());
        prog.drain_messages();
        assert_eq!(prog.model().lines, vec!["x"]);
    }

    #[test]
    fn quit_and_unmount_are_observable() {
        let mut prog = TestProgram::<Echo>::new(vec![]);
        prog.send(EchoMsg::Stop);
        assert!(prog.quit_requested());
        prog.unmount();
        assert!(prog.model().unmounted);
    }

    #[test]
    fn render_string_shows_view() {
        let mut prog = TestProgram::<Echo>::new(vec![]);
        prog.send(EchoMsg::Say("hello".into()));
        assert!(prog.render_string(20, 1).starts_with("hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn run_for_drives_and_stops_subscriptions() {
        let mut prog = TestProgram::<Echo>::new(vec![]);
        prog.run_for(Duration::from_millis(100)).await;
        assert!(prog.model().lines.is_empty());

        let mut prog = TestProgram::<Echo>::new(vec![]);
        // The ticker is dropped once the third tick arrived.
        prog.send(EchoMsg::Say("go".into()));
        prog.send(EchoMsg::Want(3));
        prog.run_for(Duration::from_millis(35)).await;
        assert_eq!(prog.model().lines, vec!["go", "tick", "tick", "tick"]);
        assert_eq!(prog.active_subscriptions(), 0);

        prog.run_for(Duration::from_millis(50)).await;
        assert_eq!(prog.model().lines.len(), 4);
    }
}
