mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pixeltype::{
    config::{Config, ConfigStore, FileConfigStore},
    engine::{Engine, Signal},
    language::Language,
    runtime::{
        AppEvent, CrosstermEventSource, EventSource, FixedTicker, Metronome, Runner, Ticker,
    },
    session::{Phase, SessionConfig, TimeLimit},
    stats::FinalResult,
    word_generator::Mode,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::{info, warn, Level};

const TICK_RATE_MS: u64 = 100;

/// retro typing practice with live stats and finger guidance
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A retro typing practice TUI: generated words and sentences in six languages, live WPM and accuracy, and a hint for the key and finger that type the next character."
)]
pub struct Cli {
    /// language to practice (defaults to the remembered one)
    #[clap(short, long, value_enum)]
    language: Option<Language>,

    /// kind of practice text
    #[clap(short, long, value_enum)]
    mode: Option<Mode>,

    /// session length in seconds, or unbounded
    #[clap(short, long, value_enum)]
    time: Option<TimeLimit>,

    /// custom prompt to use
    #[clap(short, long)]
    prompt: Option<String>,

    /// render every token as 8-bit binary groups
    #[clap(long)]
    binary: bool,

    /// plain text even if binary was remembered
    #[clap(long, conflicts_with = "binary")]
    no_binary: bool,

    /// do not remember these settings for next time
    #[clap(long)]
    no_save: bool,

    /// write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log at debug level
    #[clap(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command line overrides on top of the remembered preferences
    fn session_config(&self, saved: &Config) -> SessionConfig {
        let base = saved.session_config();
        SessionConfig {
            time_limit: self.time.unwrap_or(base.time_limit),
            mode: self.mode.unwrap_or(base.mode),
            language: self.language.unwrap_or(base.language),
            binary: !self.no_binary && (self.binary || base.binary),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub struct App {
    pub engine: Engine,
    pub state: AppState,
    pub metronome: Metronome,
    pub last_result: Option<FinalResult>,
}

impl App {
    pub fn new(cli: &Cli, config: SessionConfig) -> Self {
        let engine = match cli.prompt {
            Some(ref prompt) => Engine::with_prompt(config, prompt.clone()),
            None => Engine::new(config),
        };
        Self::with_engine(engine)
    }

    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            state: AppState::Typing,
            metronome: Metronome::default(),
            last_result: None,
        }
    }

    fn apply_signals(&mut self, signals: Vec<Signal>, now: Instant) {
        for signal in signals {
            match signal {
                Signal::SessionStarted { epoch } => self.metronome.arm(epoch, now),
                Signal::SessionFinished(reason, result) => {
                    self.metronome.cancel();
                    self.last_result = Some(result);
                    self.state = AppState::Results;
                    info!(?reason, wpm = result.wpm, "showing results");
                }
                Signal::CorrectKeystroke | Signal::IncorrectKeystroke => {}
            }
        }
    }

    /// Cancel pending ticks before the engine builds a fresh session.
    fn reconfigure(&mut self, config: SessionConfig) {
        self.metronome.cancel();
        self.engine.reconfigure(config);
        self.state = AppState::Typing;
    }

    fn restart(&mut self) {
        self.metronome.cancel();
        self.engine.restart();
        self.state = AppState::Typing;
    }

    /// Wait for the next event and handle it, stamped with when it arrived.
    pub fn step<E: EventSource, T: Ticker>(&mut self, runner: &Runner<E, T>) -> KeyOutcome {
        let event = runner.step();
        let now = Instant::now();
        match event {
            AppEvent::Tick => {
                self.on_tick(now);
                KeyOutcome::Continue
            }
            AppEvent::Resize => KeyOutcome::Continue,
            AppEvent::Key(key) => self.on_key(key, now),
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some((epoch, periods)) = self.metronome.due(now) {
            for _ in 0..periods {
                let signals = self.engine.tick(epoch);
                self.apply_signals(signals, now);
            }
        }
        self.engine.expire_feedback(now);
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Continue;
        }
        let config = self.engine.config();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Quit;
            }
            KeyCode::Esc => {
                if self.engine.session().phase() != Phase::Active {
                    return KeyOutcome::Quit;
                }
                let signals = self.engine.stop();
                self.apply_signals(signals, now);
            }
            KeyCode::Tab => self.restart(),
            KeyCode::F(1) => self.reconfigure(SessionConfig {
                time_limit: config.time_limit.cycle(),
                ..config
            }),
            KeyCode::F(2) => self.reconfigure(SessionConfig {
                mode: config.mode.cycle(),
                ..config
            }),
            KeyCode::F(3) => self.reconfigure(SessionConfig {
                language: config.language.cycle(),
                ..config
            }),
            KeyCode::F(4) => self.reconfigure(SessionConfig {
                binary: !config.binary,
                ..config
            }),
            KeyCode::Backspace if self.state == AppState::Typing => self.engine.delete(),
            KeyCode::Char(c)
                if self.state == AppState::Typing
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let signals = self.engine.insert(c);
                self.apply_signals(signals, now);
            }
            _ => {}
        }
        KeyOutcome::Continue
    }
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    // the terminal belongs to the ui, so logs only go to an explicit file
    let Some(ref path) = cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    pixeltype::init()?;

    let store = FileConfigStore::new();
    let config = cli.session_config(&store.load());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli, config);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !cli.no_save {
        if let Err(err) = store.save(&Config::from(app.engine.config())) {
            warn!(%err, path = %store.path().display(), "failed to save config");
        }
    }

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        if app.step(&runner) == KeyOutcome::Quit {
            break;
        }
    }

    Ok(())
}
