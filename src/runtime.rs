use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::debug;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(AppEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => continue,
                Err(_) => break,
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// Turns frequent UI ticks into whole-period engine ticks for one session epoch.
///
/// Arming records the epoch of the session that started. `due` reports how many
/// full periods have passed since the last report, so a slow frame never drops
/// seconds. Cancelling disarms; nothing is delivered until the next `arm`.
#[derive(Debug, Clone)]
pub struct Metronome {
    period: Duration,
    armed: Option<(u64, Instant)>,
}

impl Metronome {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
        }
    }

    pub fn arm(&mut self, epoch: u64, now: Instant) {
        debug!(epoch, "metronome armed");
        self.armed = Some((epoch, now));
    }

    pub fn cancel(&mut self) {
        if let Some((epoch, _)) = self.armed.take() {
            debug!(epoch, "metronome cancelled");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn epoch(&self) -> Option<u64> {
        self.armed.map(|(epoch, _)| epoch)
    }

    /// Epoch and number of whole periods elapsed since the last call, if any.
    pub fn due(&mut self, now: Instant) -> Option<(u64, u32)> {
        let (epoch, last) = self.armed.as_mut()?;
        let elapsed = now.saturating_duration_since(*last);
        let periods = (elapsed.as_nanos() / self.period.as_nanos().max(1)) as u32;
        if periods == 0 {
            return None;
        }
        *last += self.period * periods;
        Some((*epoch, periods))
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            AppEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            AppEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn metronome_idle_until_armed() {
        let mut metronome = Metronome::default();
        let now = Instant::now();
        assert!(!metronome.is_armed());
        assert_eq!(metronome.due(now + Duration::from_secs(5)), None);
    }

    #[test]
    fn metronome_reports_whole_periods() {
        let mut metronome = Metronome::default();
        let start = Instant::now();
        metronome.arm(3, start);

        assert_eq!(metronome.due(start + Duration::from_millis(900)), None);
        assert_eq!(metronome.due(start + Duration::from_millis(1100)), Some((3, 1)));
        assert_eq!(metronome.due(start + Duration::from_millis(1900)), None);
        // a slow frame catches up on every missed second
        assert_eq!(metronome.due(start + Duration::from_millis(4050)), Some((3, 3)));
    }

    #[test]
    fn metronome_cancel_stops_delivery() {
        let mut metronome = Metronome::default();
        let start = Instant::now();
        metronome.arm(1, start);
        metronome.cancel();
        assert_eq!(metronome.due(start + Duration::from_secs(2)), None);

        metronome.arm(2, start + Duration::from_secs(2));
        assert_eq!(metronome.epoch(), Some(2));
        assert_eq!(
            metronome.due(start + Duration::from_secs(3)),
            Some((2, 1))
        );
    }
}
