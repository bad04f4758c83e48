pub mod challenge;
pub mod config;
pub mod game;
pub mod lexicon;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod ui;
pub mod util;

use crate::{
    challenge::ChallengePool,
    config::{Config, ConfigStore, FileConfigStore, Overrides},
    game::{Game, GameRules, TICK_RATE_MS},
    lexicon::{bundled_challenges, Lexicon, SupportedLexicon},
    runtime::GameEvent,
    session::{SessionRecord, SessionSummary},
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    sync::mpsc,
    thread,
    time::Duration,
};

/// The summary screen starts a fresh round after 10 seconds.
pub const SUMMARY_RESTART_TICKS: u16 = 100;

/// terminal sentence-building typing game
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type free sentences toward a score goal. Longer words and longer sentences are worth more, random challenge phrases must be worked into your sentence while active, and reaching the goal blasts off into a session summary."
)]
pub struct Cli {
    /// bundled lexicon to play with
    #[clap(short = 'l', long, value_enum)]
    lexicon: Option<SupportedLexicon>,

    /// custom word list file: one word per line, first token wins
    #[clap(short = 'w', long)]
    wordlist: Option<String>,

    /// custom challenge file: one phrase per line
    #[clap(short = 'c', long)]
    challenges: Option<String>,

    /// check every word against the word list before accepting a sentence
    #[clap(long)]
    validate: bool,

    /// drop blank lines when parsing word and challenge files
    #[clap(long)]
    strict_parse: bool,

    /// probability of issuing a challenge after an accepted sentence
    #[clap(short = 'p', long)]
    challenge_probability: Option<f64>,

    /// total score that ends the session
    #[clap(short = 'g', long)]
    goal: Option<f64>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            lexicon: self.lexicon.map(|l| l.to_string().to_lowercase()),
            wordlist: self.wordlist.clone(),
            challenges: self.challenges.clone(),
            validate: self.validate.then_some(true),
            strict_parse: self.strict_parse.then_some(true),
            challenge_probability: self.challenge_probability,
            goal: self.goal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Playing,
    Summary,
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub state: AppState,
    pub summary_ticks_remaining: u16,
    pub config: Config,
}

impl App {
    pub fn with_config(config: Config) -> Result<Self, Box<dyn Error>> {
        let game = build_game(&config)?;
        Ok(Self {
            game,
            state: AppState::Playing,
            summary_ticks_remaining: SUMMARY_RESTART_TICKS,
            config,
        })
    }

    /// Fresh round with the same settings.
    pub fn reset(&mut self) -> Result<(), Box<dyn Error>> {
        self.game = build_game(&self.config)?;
        self.state = AppState::Playing;
        self.summary_ticks_remaining = SUMMARY_RESTART_TICKS;
        Ok(())
    }
}

fn resolve_lexicon(name: &str) -> Result<SupportedLexicon, Box<dyn Error>> {
    SupportedLexicon::from_str(name, true).map_err(Into::into)
}

fn build_game(config: &Config) -> Result<Game, Box<dyn Error>> {
    let lexicon = match config.wordlist {
        Some(ref path) => Lexicon::from_file(path, config.strict_parse)?,
        None => Lexicon::bundled(resolve_lexicon(&config.lexicon)?, config.strict_parse),
    };

    let pool = match config.challenges {
        Some(ref path) => {
            ChallengePool::parse(&std::fs::read_to_string(path)?, config.strict_parse)
        }
        None => ChallengePool::parse(
            bundled_challenges(resolve_lexicon(&config.lexicon)?),
            config.strict_parse,
        ),
    };

    let rules = GameRules {
        validate: config.validate,
        challenge_probability: config.challenge_probability,
        goal: config.goal,
    };

    Ok(Game::new(lexicon, pool, rules))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load().overridden_by(&cli.overrides());
    let mut app = App::with_config(config)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

#[derive(Debug)]
enum ExitType {
    Restart,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let game_events = get_game_events();

    loop {
        let mut exit_type = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match game_events.recv()? {
                GameEvent::Tick => {
                    match app.state {
                        AppState::Playing => {
                            app.game.on_tick();
                            if app.game.is_over() {
                                finish_session(app);
                            }
                        }
                        AppState::Summary => {
                            app.summary_ticks_remaining =
                                app.summary_ticks_remaining.saturating_sub(1);
                            if app.summary_ticks_remaining == 0 {
                                exit_type = ExitType::Restart;
                                break;
                            }
                        }
                    }

                    // Redraw on ticks only while something is animating
                    if app.game.has_active_animation() || app.state == AppState::Summary {
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                GameEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                GameEvent::Key(key) => {
                    match key.code {
                        KeyCode::Esc => {
                            break;
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        _ => match app.state {
                            AppState::Playing => match key.code {
                                KeyCode::Backspace => app.game.backspace(),
                                KeyCode::Enter => app.game.commit(),
                                KeyCode::Char(c)
                                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                                {
                                    app.game.type_char(c)
                                }
                                // modifiers, tab, arrows and the rest are ignored
                                _ => {}
                            },
                            AppState::Summary => {
                                if key.code == KeyCode::Char('r') {
                                    exit_type = ExitType::Restart;
                                    break;
                                }
                            }
                        },
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => app.reset()?,
            ExitType::Quit => break,
        }
    }

    Ok(())
}

/// Goal reached: log the result row and switch to the summary screen.
/// Runs at most once per round; the state check keeps it idempotent.
fn finish_session(app: &mut App) {
    if app.state == AppState::Summary {
        return;
    }

    let summary = SessionSummary::from_sentences(&app.game.accepted);
    let record = SessionRecord::new(&summary, app.game.total_score, app.game.elapsed_secs());
    if let Some(path) = session::default_log_path() {
        let _ = session::append_record(path, &record);
    }

    app.state = AppState::Summary;
    app.summary_ticks_remaining = SUMMARY_RESTART_TICKS;
}

fn get_game_events() -> mpsc::Receiver<GameEvent> {
    let (tx, rx) = mpsc::channel();

    let tick_tx = tx.clone();
    thread::spawn(move || loop {
        if tick_tx.send(GameEvent::Tick).is_err() {
            break;
        }

        thread::sleep(Duration::from_millis(TICK_RATE_MS))
    });

    thread::spawn(move || loop {
        let evt = match event::read() {
            Ok(Event::Key(key)) => Some(GameEvent::Key(key)),
            Ok(Event::Resize(_, _)) => Some(GameEvent::Resize),
            Ok(_) => None,
            Err(_) => break,
        };

        if let Some(evt) = evt {
            if tx.send(evt).is_err() {
                break;
            }
        }
    });

    rx
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
