mod app;
mod cli;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod render;
mod ticker;
mod util;
use crate::app::App;
use crate::cli::{Invocation, USAGE};
use crate::config::Config;
use crate::game::GameSession;
use crate::highscores::FileHighscores;
use crate::util::error_chain;
use anyhow::Context;
use log::{info, warn, LevelFilter};
use simplelog::WriteLogger;
use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config_path = match Invocation::from_parser(lexopt::Parser::from_env())? {
        Invocation::Run { config } => config,
        Invocation::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Invocation::Version => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };
    let config = match config_path {
        Some(ref p) => Config::load(p, false),
        None => Config::default_path().and_then(|p| Config::load(&p, true)),
    }
    .context("failed to load configuration")?;
    init_logging(config.log_level, &config.files.log_path()?)?;
    info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    let settings = config.game.settings().context("invalid configuration")?;
    info!(
        "Play area: {} units, {} per cell; {} speed tiers; bonus food odds 1 in {}",
        settings.grid.extent(),
        settings.grid.cell_size(),
        settings.difficulty.tiers().len(),
        settings.spawn_policy.roll_sides()
    );
    let highscore_path = config.files.highscore_path()?;
    let store = FileHighscores::load(highscore_path.clone()).unwrap_or_else(|e| {
        warn!("{}; starting without a highscore", error_chain(&e));
        FileHighscores::empty(highscore_path)
    });
    info!("Highscore file: {}", store.path().display());
    let session = GameSession::new(settings, rand::rng(), store);

    let terminal = ratatui::init();
    let r = App::new(session).run(terminal);
    ratatui::restore();
    match r {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        r => r.context("terminal I/O failed"),
    }
}

fn init_logging(level: LevelFilter, path: &Path) -> anyhow::Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::File::create(path)?;
    WriteLogger::init(level, simplelog::Config::default(), file)
        .context("failed to initialize logging")?;
    Ok(())
}
