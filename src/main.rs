use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use arcade_snake::config::DEFAULT_GRID;
use arcade_snake::game::{GamePhase, GameState};
use arcade_snake::input::{GameInput, InputHandler};
use arcade_snake::score::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
use arcade_snake::terminal_runtime::TerminalSession;
use arcade_snake::theme::ThemeChoice;
use arcade_snake::ui::hud::HudInfo;
use clap::Parser;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed the apple RNG for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Colour theme.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Default)]
    theme: ThemeChoice,

    /// Read and write the high score at this path instead of the default.
    #[arg(long = "scores-file", value_name = "PATH", conflicts_with = "no_save")]
    scores_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "no-save")]
    no_save: bool,

    /// Write logs to this file; filter with RUST_LOG (default: info).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let store = high_score_store(&cli);
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(DEFAULT_GRID, seed, store),
        None => GameState::new(store),
    };
    log::info!("starting, high score {}", state.high_score());

    let mut session = TerminalSession::enter()?;
    run(&mut session, &mut state, cli.theme)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn high_score_store(cli: &Cli) -> Box<dyn HighScoreStore> {
    if cli.no_save {
        return Box::new(MemoryHighScoreStore::new());
    }

    match &cli.scores_file {
        Some(path) => Box::new(FileHighScoreStore::new(path)),
        None => Box::new(FileHighScoreStore::at_default_location()),
    }
}

fn run(session: &mut TerminalSession, state: &mut GameState, theme: ThemeChoice) -> io::Result<()> {
    let hud_info = HudInfo {
        theme: theme.theme(),
    };
    let mut input = InputHandler::new();
    let started = Instant::now();
    let mut last_tick = 0;

    loop {
        let now_ms = elapsed_ms(started);
        session.draw(&state.snapshot(now_ms), hud_info)?;

        for game_input in input.poll_inputs()? {
            if game_input == GameInput::Quit {
                return Ok(());
            }
            handle_input(state, game_input, now_ms);
        }

        let now_ms = elapsed_ms(started);
        if now_ms.saturating_sub(last_tick) >= state.tick_interval_ms() {
            state.tick(now_ms);
            last_tick = now_ms;
        }

        thread::sleep(FRAME_INTERVAL);
    }
}

/// Enter/Space doubles as "play again" on the game-over screen.
fn handle_input(state: &mut GameState, input: GameInput, now_ms: u64) {
    match input {
        GameInput::Start if state.phase == GamePhase::GameOver => {
            state.apply_input(GameInput::Restart, now_ms);
        }
        other => state.apply_input(other, now_ms),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
