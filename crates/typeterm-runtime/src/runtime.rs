use crate::command::{Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor, execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, Level};

/// Messages applied per wake-up before the loop yields back to `select!`.
const MAX_BATCH: usize = 64;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// A global tracing subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only what you need:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("typeterm".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Upper bound on redraws per second (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Draw on the alternate screen (default: true).
    pub alt_screen: bool,
    /// Terminal window title.
    pub title: Option<String>,
    /// Restore the terminal before a panic message is printed (default: true).
    pub catch_panics: bool,
    /// Stop on a ctrl-c signal (default: true).
    pub handle_signals: bool,
    /// Write `tracing` output to this file. The terminal belongs to the UI,
    /// so logs never go to stdout or stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
        }
    }
}

impl ProgramOptions {
    fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.clamp(1, 120)))
    }
}

/// The terminal in raw mode, restored when dropped.
struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    alt_screen: bool,
    restored: bool,
}

impl Screen {
    fn enter(options: &ProgramOptions) -> io::Result<Self> {
        if options.catch_panics {
            install_panic_hook(options.alt_screen);
        }

        enable_raw_mode()?;
        let mut out = stdout();
        if options.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if let Some(title) = &options.title {
            execute!(out, SetTitle(title))?;
        }
        execute!(out, cursor::Hide)?;

        Ok(Screen {
            terminal: Terminal::new(CrosstermBackend::new(out))?,
            alt_screen: options.alt_screen,
            restored: false,
        })
    }

    fn leave(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        restore_terminal(self.alt_screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Drives a [`Model`] against the real terminal.
///
/// Everything runs on one task: subscriptions and commands only push onto a
/// channel, and messages are applied to the model one at a time, so the model
/// never needs a lock.
pub struct Program<M: Model> {
    model: M,
    screen: Screen,
    tx: mpsc::UnboundedSender<M::Message>,
    rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    dirty: bool,
    quitting: bool,
}

impl<M: Model> Program<M> {
    /// Install logging (if asked for), take over the terminal, and initialize
    /// the model.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(path) = &options.log_file {
            init_logging(path)?;
        }

        let screen = Screen::enter(&options)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);

        let mut program = Self {
            model,
            screen,
            subscriptions: SubscriptionManager::new(tx.clone()),
            tx,
            rx,
            options,
            dirty: true,
            quitting: false,
        };
        info!(
            fps = program.options.fps,
            alt_screen = program.options.alt_screen,
            "program started"
        );

        program.perform(init_cmd);
        program.sync_subscriptions();
        Ok(program)
    }

    /// Run until the model quits or ctrl-c arrives. The model is unmounted,
    /// its subscriptions aborted and the terminal restored, then the model is
    /// handed back.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;

        self.model.unmount();
        self.subscriptions.shutdown();
        self.screen.leave()?;
        info!("program stopped");

        outcome?;
        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.draw()?;

        let mut frames = tokio::time::interval(self.options.frame_period());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.options.handle_signals;

        while !self.quitting {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    debug!("ctrl-c signal");
                    break;
                }

                Some(msg) = self.rx.recv() => {
                    self.apply(msg);
                    // A burst of ticks is applied together and costs one
                    // redraw.
                    for _ in 1..MAX_BATCH {
                        if self.quitting {
                            break;
                        }
                        match self.rx.try_recv() {
                            Ok(msg) => self.apply(msg),
                            Err(_) => break,
                        }
                    }
                }

                _ = frames.tick() => {
                    if self.dirty {
                        self.draw()?;
                    }
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.perform(cmd);
        self.sync_subscriptions();
        self.dirty = true;
    }

    fn sync_subscriptions(&mut self) {
        let declared = self.model.subscriptions();
        self.subscriptions.reconcile(declared);
    }

    fn perform(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                let _ = self.tx.send(msg);
            }
            CommandInner::Quit => {
                debug!("quit requested");
                self.quitting = true;
            }
        }
    }

    fn draw(&mut self) -> Result<(), ProgramError> {
        let model = &self.model;
        self.screen.terminal.draw(|frame| model.view(frame))?;
        self.dirty = false;
        Ok(())
    }
}

/// Install a global `tracing` subscriber that appends plain-text records to
/// `path`.
pub fn init_logging(path: impl AsRef<Path>) -> Result<(), ProgramError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// Once per process, so repeated programs do not stack hooks.
fn install_panic_hook(alt_screen: bool) {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal(alt_screen);
            previous(info);
        }));
    });
}

// Every step runs even if an earlier one fails; only raw mode is reported.
fn restore_terminal(alt_screen: bool) -> io::Result<()> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    let _ = execute!(out, cursor::Show);
    if alt_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }
    raw
}
