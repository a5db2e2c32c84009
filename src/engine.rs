//! The typing session engine.
//!
//! `Engine` owns the session configuration, the generated target text and the
//! single live `SessionState`. Every input reaches it as an `EngineEvent`, is
//! handled synchronously, and may produce `Signal`s for cue collaborators
//! (sound, flash). Renderers read a `ViewModel` after each event.
//!
//! Timer cancellation works through epochs: every fresh session gets a new
//! epoch, and ticks stamped with an older epoch are dropped.

use crate::keyboard::{resolve_key, Finger, KeyPosition, KeyboardLayout};
use crate::session::{
    FinishReason, LastKeystroke, Phase, SessionConfig, SessionState, TimeLimit,
};
use crate::stats::{FinalResult, LiveStats};
use crate::time_series::WpmSeries;
use crate::typing_policy::{diff_buffers, CharClass, Outcome};
use crate::word_generator::{GeneratedContent, WordGenConfig, WordGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Insert(char),
    Delete,
    /// Whole-buffer replacement, as a text field would report it.
    SyncBuffer(String),
    Tick { epoch: u64 },
    Stop,
    Reconfigure(SessionConfig),
    Restart,
}

/// Discrete cues for collaborators. The engine never decides how they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    SessionStarted { epoch: u64 },
    CorrectKeystroke,
    IncorrectKeystroke,
    SessionFinished(FinishReason, FinalResult),
}

/// The key that produces the next expected character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub finger: Finger,
    pub position: KeyPosition,
    pub label: &'static str,
}

/// Snapshot consumed by the renderer after every event.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a> {
    pub phase: Phase,
    pub time_limit: TimeLimit,
    pub remaining_or_elapsed: u32,
    pub live: LiveStats,
    pub target: &'a [char],
    pub classification: Vec<CharClass>,
    pub cursor: usize,
    pub next_expected: Option<char>,
    pub key_hint: Option<KeyHint>,
    pub last_keystroke: Option<LastKeystroke>,
    pub final_result: Option<FinalResult>,
    pub wpm_series: &'a WpmSeries,
}

impl ViewModel<'_> {
    pub fn target_finger(&self) -> Option<Finger> {
        self.key_hint.map(|hint| hint.finger)
    }
}

pub struct Engine {
    config: SessionConfig,
    custom_prompt: Option<String>,
    content: GeneratedContent,
    session: SessionState,
    epoch: u64,
    key_hint: Option<KeyHint>,
    rng: StdRng,
}

impl Engine {
    pub fn new(config: SessionConfig) -> Self {
        Self::build(config, None, StdRng::from_entropy())
    }

    /// Engine with reproducible content generation.
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::build(config, None, StdRng::seed_from_u64(seed))
    }

    /// Engine that practices `prompt` instead of generated content.
    pub fn with_prompt(config: SessionConfig, prompt: impl Into<String>) -> Self {
        Self::build(config, Some(prompt.into()), StdRng::from_entropy())
    }

    fn build(config: SessionConfig, custom_prompt: Option<String>, rng: StdRng) -> Self {
        let mut engine = Self {
            config,
            custom_prompt,
            content: GeneratedContent::default(),
            session: SessionState::new("", config.time_limit),
            epoch: 0,
            key_hint: None,
            rng,
        };
        engine.fresh_session();
        engine
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn content(&self) -> &GeneratedContent {
        &self.content
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn layout(&self) -> &'static KeyboardLayout {
        KeyboardLayout::for_language(self.config.language)
    }

    pub fn handle(&mut self, event: EngineEvent) -> Vec<Signal> {
        match event {
            EngineEvent::Insert(c) => self.insert(c),
            EngineEvent::Delete => {
                self.delete();
                Vec::new()
            }
            EngineEvent::SyncBuffer(buffer) => self.sync_buffer(&buffer),
            EngineEvent::Tick { epoch } => self.tick(epoch),
            EngineEvent::Stop => self.stop(),
            EngineEvent::Reconfigure(config) => {
                self.reconfigure(config);
                Vec::new()
            }
            EngineEvent::Restart => {
                self.restart();
                Vec::new()
            }
        }
    }

    pub fn insert(&mut self, c: char) -> Vec<Signal> {
        let was_idle = self.session.phase() == Phase::Idle;
        let Some(evaluation) = self.session.insert(c) else {
            return Vec::new();
        };

        let mut signals = Vec::with_capacity(3);
        if was_idle {
            signals.push(Signal::SessionStarted { epoch: self.epoch });
        }
        signals.push(match evaluation.outcome {
            Outcome::Correct => Signal::CorrectKeystroke,
            Outcome::Incorrect => Signal::IncorrectKeystroke,
        });
        signals.extend(self.finished_signal());
        self.refresh_key_hint();
        signals
    }

    pub fn delete(&mut self) {
        if self.session.delete() {
            self.refresh_key_hint();
        }
    }

    /// Apply a whole new buffer: keep the common prefix, then score each appended character.
    pub fn sync_buffer(&mut self, buffer: &str) -> Vec<Signal> {
        if self.session.has_finished() {
            return Vec::new();
        }
        let current: Vec<char> = buffer.chars().collect();
        let edit = diff_buffers(self.session.input(), &current);
        if edit.is_noop(self.session.input().len()) {
            return Vec::new();
        }

        self.session.truncate(edit.keep);
        self.refresh_key_hint();
        edit.appended
            .into_iter()
            .flat_map(|c| self.insert(c))
            .collect()
    }

    /// One-second tick stamped with the epoch it was scheduled for.
    pub fn tick(&mut self, epoch: u64) -> Vec<Signal> {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "dropping stale tick");
            return Vec::new();
        }
        if self.session.phase() != Phase::Active {
            return Vec::new();
        }
        self.session.tick();
        if !self.session.has_finished() {
            return Vec::new();
        }
        self.key_hint = None;
        self.finished_signal().into_iter().collect()
    }

    pub fn stop(&mut self) -> Vec<Signal> {
        if !self.session.stop() {
            return Vec::new();
        }
        self.key_hint = None;
        self.finished_signal().into_iter().collect()
    }

    /// Discard the current session and start a fresh, idle one for `config`.
    pub fn reconfigure(&mut self, config: SessionConfig) {
        info!(
            from = ?self.config,
            to = ?config,
            phase = ?self.session.phase(),
            "reconfiguring session"
        );
        self.config = config;
        self.fresh_session();
    }

    /// Fresh session with new content and the same configuration.
    pub fn restart(&mut self) {
        debug!(epoch = self.epoch, "restarting session");
        self.fresh_session();
    }

    pub fn expire_feedback(&mut self, now: Instant) {
        self.session.expire_last_keystroke(now);
    }

    pub fn view(&self) -> ViewModel<'_> {
        ViewModel {
            phase: self.session.phase(),
            time_limit: self.config.time_limit,
            remaining_or_elapsed: self.session.clock().display_secs(),
            live: self.session.live_stats(),
            target: self.session.target(),
            classification: self.session.classification(),
            cursor: self.session.input().len(),
            next_expected: self.session.next_expected(),
            key_hint: self.key_hint,
            last_keystroke: self.session.last_keystroke().copied(),
            final_result: self.session.final_result().copied(),
            wpm_series: self.session.wpm_series(),
        }
    }

    fn fresh_session(&mut self) {
        self.epoch += 1;
        let generator = WordGenerator::new(WordGenConfig {
            mode: self.config.mode,
            language: self.config.language,
            number_of_words: self.config.time_limit.token_budget(),
            binary: self.config.binary,
            custom_prompt: self.custom_prompt.clone(),
        });
        self.content = generator.generate_with(&mut self.rng);
        self.session = SessionState::new(&self.content.text(), self.config.time_limit);
        self.refresh_key_hint();
        debug!(
            epoch = self.epoch,
            tokens = self.content.token_count(),
            "new session"
        );
    }

    fn finished_signal(&self) -> Option<Signal> {
        match (self.session.finish_reason(), self.session.final_result()) {
            (Some(reason), Some(result)) if self.session.has_finished() => {
                Some(Signal::SessionFinished(reason, *result))
            }
            _ => None,
        }
    }

    fn refresh_key_hint(&mut self) {
        let layout = self.layout();
        self.key_hint = self.session.next_expected().and_then(|c| {
            resolve_key(c, layout).map(|target| KeyHint {
                finger: target.key.finger,
                position: target.position,
                label: target.key.label,
            })
        });
    }
}
