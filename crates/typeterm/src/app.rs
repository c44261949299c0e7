use crate::view;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tracing::info;
use typeterm_core::{ConsoleConfig, Key, Message, Session, Topic};
use typeterm_runtime::{terminal_events, Command, Model, Subscription, TerminalEvent};

/// The console wrapped as a runtime [`Model`], plus the topic badge that
/// follows the last selected topic.
pub struct ConsoleApp {
    session: Session,
    topic: Option<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Session(Message),
    Redraw,
    Quit,
}

/// Map a raw key to an app message. Esc and Ctrl-C quit; everything else goes
/// to the session.
fn key_to_msg(key: KeyEvent) -> Option<Msg> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Msg::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
        _ => Key::from_event(&key).map(|k| Msg::Session(Message::Key(k))),
    }
}

impl Model for ConsoleApp {
    type Message = Msg;
    type Flags = ConsoleConfig;

    fn init(config: ConsoleConfig) -> (Self, Command<Msg>) {
        let (session, cmd) = Session::mount(config);
        (
            ConsoleApp {
                session,
                topic: None,
            },
            cmd.map(Msg::Session),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Session(msg) => {
                if let Message::TopicSelected(topic) = msg {
                    info!(topic = topic.key(), "topic selected");
                    self.topic = Some(topic);
                }
                self.session.update(msg).map(Msg::Session)
            }
            Msg::Redraw => Command::none(),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        view::render(frame, &self.session.snapshot(), self.topic);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => key_to_msg(key),
            TerminalEvent::Resize(..) => Some(Msg::Redraw),
            TerminalEvent::Other => None,
        })];
        subs.extend(
            self.session
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Session)),
        );
        subs
    }

    fn unmount(&mut self) {
        self.session.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeterm_runtime::testing::TestProgram;

    fn program() -> TestProgram<ConsoleApp> {
        TestProgram::new(ConsoleConfig::default())
    }

    fn type_line(prog: &mut TestProgram<ConsoleApp>, line: &str) {
        for c in line.chars() {
            prog.send(Msg::Session(Message::Key(Key::Char(c))));
        }
        prog.send(Msg::Session(Message::Key(Key::Enter)));
    }

    fn settle(prog: &mut TestProgram<ConsoleApp>) {
        loop {
            let runs = prog.model().session.active_runs();
            if runs.is_empty() {
                break;
            }
            for token in runs {
                prog.send(Msg::Session(Message::Tick(token)));
            }
        }
    }

    #[test]
    fn banner_reveals_before_prompt_cursor_shows() {
        let mut prog = program();
        let screen = prog.render_string(60, 5);
        assert!(screen.contains("$ "));
        assert!(!screen.contains('█'));

        settle(&mut prog);
        let screen = prog.render_string(60, 5);
        assert!(screen.starts_with("Welcome! Please type 'help' to get started"));
        assert!(screen.contains("$ █"));
    }

    #[test]
    fn help_output_is_rendered() {
        let mut prog = program();
        settle(&mut prog);
        type_line(&mut prog, "help");
        settle(&mut prog);

        let screen = prog.render_string(70, 20);
        assert!(screen.contains("$ help"));
        assert!(screen.contains("Available commands:"));
        assert!(screen.contains("Type 'clear' to reset the terminal"));
    }

    #[test]
    fn topic_selection_shows_badge() {
        let mut prog = program();
        type_line(&mut prog, "4");
        assert_eq!(prog.model().topic, None);

        prog.drain_messages();
        assert_eq!(prog.model().topic, Some(Topic::Projects));
        let screen = prog.render_string(60, 5);
        let first_row = screen.lines().next().unwrap();
        assert!(first_row.ends_with(" projects "));
    }

    #[test]
    fn quit_keys_stay_out_of_the_session() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(key_to_msg(esc), Some(Msg::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_msg(ctrl_c), Some(Msg::Quit));

        let c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(key_to_msg(c), Some(Msg::Session(Message::Key(Key::Char('c')))));

        let released = KeyEvent::new_with_kind(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(key_to_msg(released), None);

        let mut prog = program();
        prog.send(Msg::Quit);
        assert!(prog.quit_requested());
    }

    #[test]
    fn unmount_stops_the_session() {
        let mut prog = program();
        type_line(&mut prog, "help");
        assert_eq!(prog.model().subscriptions().len(), 3);

        prog.unmount();
        assert!(prog.model().session.is_idle());
        assert_eq!(prog.model().subscriptions().len(), 1);
    }
}
