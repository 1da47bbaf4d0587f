//! Turns timer events into side effects.
//!
//! The engine only returns [`TimerEvent`]s. The notifier decides which
//! sounds and phrases each one produces, writes the journal line and hands
//! the playback to tokio's blocking pool. Nothing is awaited: a slow speech
//! command never holds up the next tick, and a failed one is only logged.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::{SoundsConfig, TimerConfig, VoiceConfig};
use crate::journal::Journal;
use crate::sound::SoundPlayer;
use crate::timer::{TimerEngine, TimerEvent};

/// A single side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Beep,
    PlayFile(PathBuf),
    Speak { voice: String, message: String },
}

/// The sound and voice settings the notifier acts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alerts {
    pub sounds: SoundsConfig,
    pub voice: VoiceConfig,
}

impl Alerts {
    pub fn from_config(config: &TimerConfig) -> Self {
        Self {
            sounds: config.sounds.clone(),
            voice: config.voice.clone(),
        }
    }

    fn alert(&self) -> Effect {
        match &self.sounds.file {
            Some(path) => Effect::PlayFile(path.clone()),
            None => Effect::Beep,
        }
    }

    fn speak(&self, message: &str) -> Option<Effect> {
        (self.voice.enabled && !message.is_empty()).then(|| Effect::Speak {
            voice: self.voice.voice.clone(),
            message: message.to_string(),
        })
    }
}

/// Dispatches the side effects of timer events.
pub struct Notifier {
    alerts: Alerts,
    player: Arc<dyn SoundPlayer>,
    journal: Journal,
}

impl Notifier {
    pub fn new(alerts: Alerts, player: Arc<dyn SoundPlayer>, journal: Journal) -> Self {
        Self {
            alerts,
            player,
            journal,
        }
    }

    pub fn alerts(&self) -> &Alerts {
        &self.alerts
    }

    /// Replaces the sound and voice settings, e.g. after the config file
    /// was edited.
    pub fn set_alerts(&mut self, alerts: Alerts) {
        self.alerts = alerts;
    }

    /// Effects produced by `event`, in dispatch order.
    pub fn effects_for(&self, event: TimerEvent) -> Vec<Effect> {
        let alerts = &self.alerts;
        let messages = &alerts.voice.messages;

        let (sound, phrase) = match event {
            TimerEvent::Tick => (alerts.sounds.tick.then_some(Effect::Beep), None),
            TimerEvent::Started => (None, alerts.speak(&messages.start)),
            TimerEvent::WorkDone => (
                alerts.sounds.finish.then(|| alerts.alert()),
                alerts.speak(&messages.work_done),
            ),
            TimerEvent::BreakDone => (
                alerts.sounds.break_done.then(|| alerts.alert()),
                alerts.speak(&messages.break_done),
            ),
        };

        sound.into_iter().chain(phrase).collect()
    }

    /// Journals `event` and spawns its effects.
    ///
    /// `engine` must already reflect the event. The returned handles may be
    /// dropped; the effects keep running.
    pub fn notify(&mut self, event: TimerEvent, engine: &TimerEngine) -> Vec<JoinHandle<()>> {
        if let Some(line) = journal_line(event, engine) {
            self.record(&line);
        }

        self.effects_for(event)
            .into_iter()
            .map(|effect| self.dispatch(effect))
            .collect()
    }

    /// Writes a line to the journal. Failures are logged and dropped.
    pub fn record(&mut self, message: &str) {
        debug!("{}", message);
        if let Err(e) = self.journal.record(message) {
            warn!("Journal write failed: {}", e);
        }
    }

    fn dispatch(&self, effect: Effect) -> JoinHandle<()> {
        let player = Arc::clone(&self.player);
        tokio::task::spawn_blocking(move || run_effect(player.as_ref(), &effect))
    }
}

fn journal_line(event: TimerEvent, engine: &TimerEngine) -> Option<String> {
    match event {
        TimerEvent::Tick => None,
        TimerEvent::Started => Some(format!("Started {} session", engine.mode())),
        TimerEvent::WorkDone => Some(format!(
            "Work session completed (cycle {})",
            engine.cycle()
        )),
        TimerEvent::BreakDone => Some("Break completed, starting work".to_string()),
    }
}

fn run_effect(player: &dyn SoundPlayer, effect: &Effect) {
    let result = match effect {
        Effect::Beep => player.beep(),
        Effect::Speak { voice, message } => player.speak(voice, message),
        Effect::PlayFile(path) => match player.play_file(path) {
            Err(e) if e.should_fallback_to_beep() => {
                warn!("Falling back to beep: {}", e);
                player.beep()
            }
            other => other,
        },
    };

    if let Err(e) = result {
        warn!("Alert failed: {}", e);
    }
}
