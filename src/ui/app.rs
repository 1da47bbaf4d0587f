//! The driver loop.
//!
//! [`App`] owns the engine and is the only thing that mutates it. One
//! control flow interleaves two sources:
//!
//! - a one-second `tokio::time::interval`
//! - terminal events read on a dedicated thread and forwarded over a
//!   channel
//!
//! Every message is followed by a redraw.

use std::env;
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::keys::{action_for, Action};
use super::view;
use crate::config::{format_duration, ConfigOverrides, ConfigStore, TimerConfig};
use crate::notifier::{Alerts, Notifier};
use crate::timer::{RunState, TimerEngine, TICK};

/// How long the input thread waits for an event before checking for stop.
const INPUT_POLL: Duration = Duration::from_millis(100);

const DEFAULT_EDITOR: &str = "vi";

/// What the run loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    EditConfig,
    Quit,
}

enum Message {
    Tick,
    Input(io::Result<Event>),
}

// ============================================================================
// App
// ============================================================================

/// The interactive timer.
pub struct App {
    engine: TimerEngine,
    notifier: Notifier,
    store: ConfigStore,
    overrides: ConfigOverrides,
}

impl App {
    pub fn new(
        engine: TimerEngine,
        notifier: Notifier,
        store: ConfigStore,
        overrides: ConfigOverrides,
    ) -> Self {
        Self {
            engine,
            notifier,
            store,
            overrides,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Runs until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be drawn to or read from.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut input = InputReader::spawn(tx.clone());

        let mut ticker = time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // the first tick completes immediately
        ticker.tick().await;

        let result = loop {
            if let Err(e) = terminal.draw(|frame| view::render(frame, &self.engine)) {
                break Err(anyhow!(e).context("failed to draw the timer"));
            }

            let message = tokio::select! {
                _ = ticker.tick() => Message::Tick,
                event = recv(&mut rx) => Message::Input(event),
            };

            let control = match message {
                Message::Tick => {
                    self.on_tick();
                    Control::Continue
                }
                Message::Input(Ok(Event::Key(key))) => match action_for(key) {
                    Some(action) => self.handle_action(action),
                    None => Control::Continue,
                },
                // resize and the rest only need a redraw
                Message::Input(Ok(_)) => Control::Continue,
                Message::Input(Err(e)) => break Err(anyhow!(e).context("failed to read input")),
            };

            match control {
                Control::Continue => {}
                Control::Quit => break Ok(()),
                Control::EditConfig => {
                    input.stop();
                    let edited = edit_config(terminal, self.store.path());
                    input = InputReader::spawn(tx.clone());
                    match edited {
                        Ok(()) => self.reload_config(),
                        Err(e) => warn!("Config edit failed: {:#}", e),
                    }
                }
            }
        };

        input.stop();
        result
    }

    /// Advances the countdown by one second.
    pub fn on_tick(&mut self) {
        if let Some(event) = self.engine.tick() {
            self.notifier.notify(event, &self.engine);
        }
    }

    /// Applies a key action to the engine.
    pub fn handle_action(&mut self, action: Action) -> Control {
        match action {
            Action::Toggle => {
                match self.engine.toggle() {
                    Some(event) => {
                        self.notifier.notify(event, &self.engine);
                    }
                    None => {
                        let verb = match self.engine.run_state() {
                            RunState::Paused => "Paused",
                            _ => "Resumed",
                        };
                        self.record(format!("{} {} session", verb, self.engine.mode()));
                    }
                }
                Control::Continue
            }
            Action::Reset => {
                self.engine.reset();
                self.record(format!("Reset {} session", self.engine.mode()));
                Control::Continue
            }
            Action::Skip => {
                let event = self.engine.skip();
                self.notifier.notify(event, &self.engine);
                self.record(format!("Skipped to {}", self.engine.mode()));
                Control::Continue
            }
            Action::Adjust(delta) => {
                self.engine.adjust_time(delta);
                self.record(format!(
                    "Adjusted {} by {} (now {})",
                    self.engine.mode(),
                    format_delta(delta),
                    format_duration(self.engine.current_duration())
                ));
                Control::Continue
            }
            Action::EditConfig => Control::EditConfig,
            Action::Quit => Control::Quit,
        }
    }

    /// Re-reads the config file and applies its sound and voice settings.
    ///
    /// Durations are left alone; the engine keeps the values it was built
    /// with until the next launch.
    pub fn reload_config(&mut self) {
        match self.load_config() {
            Ok(config) => {
                self.notifier.set_alerts(Alerts::from_config(&config));
                info!("Reloaded config from {}", self.store.path().display());
            }
            Err(e) => warn!("Keeping previous settings: {:#}", e),
        }
    }

    fn load_config(&self) -> Result<TimerConfig> {
        let mut config = self.store.load()?;
        config.apply_overrides(&self.overrides);
        config.validate()?;
        Ok(config)
    }

    fn record(&mut self, message: String) {
        self.notifier.record(&message);
    }
}

async fn recv(rx: &mut UnboundedReceiver<io::Result<Event>>) -> io::Result<Event> {
    rx.recv().await.unwrap_or_else(|| {
        Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "input thread stopped",
        ))
    })
}

fn format_delta(delta_secs: i64) -> String {
    let sign = if delta_secs < 0 { '-' } else { '+' };
    let magnitude = Duration::from_secs(delta_secs.unsigned_abs());
    format!("{}{}", sign, format_duration(magnitude))
}

// ============================================================================
// Input thread
// ============================================================================

/// Reads terminal events on a background thread until stopped.
struct InputReader {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl InputReader {
    fn spawn(tx: UnboundedSender<io::Result<Event>>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !flag.load(Ordering::SeqCst) {
                let next = match event::poll(INPUT_POLL) {
                    Ok(true) => event::read(),
                    Ok(false) => continue,
                    Err(e) => Err(e),
                };
                let failed = next.is_err();
                if tx.send(next).is_err() || failed {
                    break;
                }
            }
            debug!("Input thread stopped");
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stops the thread and waits for it, so nothing else competes for
    /// terminal input afterwards.
    fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Input thread panicked");
            }
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}

// ============================================================================
// Editor
// ============================================================================

/// Suspends the terminal UI, runs the editor on `path` and restores the UI.
fn edit_config(terminal: &mut DefaultTerminal, path: &Path) -> Result<()> {
    let mut command = editor_command(&editor(), path)?;

    ratatui::try_restore().context("failed to restore the terminal")?;
    let status = command.status();
    *terminal = ratatui::try_init().context("failed to reinitialise the terminal")?;
    terminal.clear()?;

    let status = status.context("failed to launch the editor")?;
    if !status.success() {
        bail!("editor exited with {}", status);
    }
    Ok(())
}

/// `$EDITOR`, or `vi` when unset or blank.
fn editor() -> String {
    env::var("EDITOR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Builds the editor invocation, honouring shell-style quoting in `editor`.
fn editor_command(editor: &str, path: &Path) -> Result<Command> {
    let words = shlex::split(editor).ok_or_else(|| anyhow!("invalid EDITOR: {}", editor))?;
    let (program, args) = words
        .split_first()
        .ok_or_else(|| anyhow!("EDITOR is empty"))?;

    let mut command = Command::new(program);
    command.args(args).arg(path);
    Ok(command)
}

// ============================================================================
// Tests
// ============================================================================
