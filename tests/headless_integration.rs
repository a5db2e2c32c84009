use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pixeltype::engine::{Engine, Signal};
use pixeltype::runtime::{AppEvent, FixedTicker, Metronome, Runner, TestEventSource};
use pixeltype::session::{FinishReason, Phase, SessionConfig, TimeLimit};

fn config(time_limit: TimeLimit) -> SessionConfig {
    SessionConfig {
        time_limit,
        ..SessionConfig::default()
    }
}

// Headless integration using the runtime + Engine without a TTY
// Verifies that a minimal typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let mut engine = Engine::with_prompt(config(TimeLimit::Secs30), "hi");

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    for c in ['h', 'i'] {
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }

    let mut finished = None;
    for _ in 0..100u32 {
        if let AppEvent::Key(key) = runner.step() {
            if let KeyCode::Char(c) = key.code {
                for signal in engine.insert(c) {
                    if let Signal::SessionFinished(reason, result) = signal {
                        finished = Some((reason, result));
                    }
                }
            }
        }
        if finished.is_some() {
            break;
        }
    }

    let (reason, result) = finished.expect("session should have finished");
    assert_eq!(reason, FinishReason::Completed);
    assert_eq!(result.accuracy, 100);
    assert_eq!(result.total_chars, 2);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let mut engine = Engine::with_prompt(config(TimeLimit::Secs15), "hello");
    // compress a second into 10ms so the test stays fast
    let mut metronome = Metronome::new(Duration::from_millis(10));

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for signal in engine.insert('h') {
        if let Signal::SessionStarted { epoch } = signal {
            metronome.arm(epoch, Instant::now());
        }
    }

    for _ in 0..400u32 {
        if let AppEvent::Tick = runner.step() {
            if let Some((epoch, periods)) = metronome.due(Instant::now()) {
                for _ in 0..periods {
                    engine.tick(epoch);
                }
            }
        }
        if engine.session().has_finished() {
            break;
        }
    }

    assert_eq!(engine.session().phase(), Phase::Finished);
    assert_eq!(
        engine.session().finish_reason(),
        Some(FinishReason::TimedOut)
    );
    assert_eq!(engine.session().final_result().unwrap().correct_chars, 1);
}

#[test]
fn headless_restart_drops_ticks_for_old_session() {
    let mut engine = Engine::with_prompt(config(TimeLimit::Secs15), "hello");
    let mut metronome = Metronome::new(Duration::from_millis(1));
    let start = Instant::now();

    for signal in engine.insert('h') {
        if let Signal::SessionStarted { epoch } = signal {
            metronome.arm(epoch, start);
        }
    }
    let (stale_epoch, _) = metronome.due(start + Duration::from_millis(3)).unwrap();

    // a tick that was already in flight when the restart happened
    engine.restart();
    engine.insert('h');
    engine.tick(stale_epoch);

    assert_eq!(engine.session().clock().display_secs(), 15);
    assert_eq!(engine.session().phase(), Phase::Active);
}
