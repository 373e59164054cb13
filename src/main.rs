//! Strictly Linepaint - Unified CLI
//!
//! Terminal front end for the line-painting puzzle.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use strictly_linepaint::{
    Direction, EventLogger, GameConfig, LEVEL_KEY, LevelCatalog, PaintGame, ProgressStore,
    ProgressionState, PuzzleEvent, REWARD_KEY, TomlFileStore, sound_enabled, toggle_sound,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            levels,
            save,
        } => run_play(config, levels, save),
        Command::Validate { levels } => run_validate(levels),
        Command::Progress { save, reset } => run_progress(save, reset),
    }
}

/// Loads the config file, falling back to defaults when it is absent.
#[instrument]
fn load_config(path: &Path) -> Result<GameConfig> {
    if path.exists() {
        Ok(GameConfig::from_file(path)?)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(GameConfig::default())
    }
}

/// Play the level pack on stdin/stdout
#[instrument]
fn run_play(config: PathBuf, levels: Option<PathBuf>, save: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(&config)?;
    if let Some(levels) = levels {
        config = config.with_levels_path(levels);
    }
    if let Some(save) = save {
        config = config.with_save_path(save);
    }

    let catalog = LevelCatalog::from_file(config.levels_path())
        .with_context(|| format!("loading {}", config.levels_path().display()))?;
    let store = TomlFileStore::open(config.save_path())?;
    let mut game = PaintGame::new(catalog, store, &config)?;

    game.subscribe(EventLogger);
    game.subscribe(|event: &PuzzleEvent| {
        if let PuzzleEvent::LevelCompleted { reward_total, .. } = event {
            println!("Level complete! Reward: {}", reward_total);
        }
    });

    print_help();
    print_board(&game);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "q" | "quit" => break,
            "h" | "help" => print_help(),
            "r" | "retry" => {
                game.reload_level()?;
                print_board(&game);
            }
            "n" | "next" => {
                if game.is_solved() {
                    game.reload_level()?;
                    print_board(&game);
                } else {
                    println!("Finish the level first, or press r to retry.");
                }
            }
            "m" | "sound" => {
                let enabled = toggle_sound(game.store_mut())?;
                println!("Sound {}", if enabled { "on" } else { "off" });
            }
            other => match Direction::parse(other) {
                Some(direction) => {
                    match game.swipe(direction) {
                        Ok(Some(outcome)) if outcome.is_blocked() => println!("Blocked."),
                        Ok(Some(_)) => {}
                        Ok(None) => println!("Level solved. Press n for the next level."),
                        Err(err) => warn!(error = %err, "Progress could not be saved"),
                    }
                    print_board(&game);
                }
                None => println!("Unknown input '{}'. Press h for help.", other),
            },
        }
    }

    Ok(())
}

fn print_help() {
    println!("Swipe with w/a/s/d (or up/left/down/right).");
    println!("r = retry, n = next level, m = toggle sound, q = quit");
}

fn print_board<S: ProgressStore>(game: &PaintGame<S>) {
    let progression = game.progression();
    let remaining = game.puzzle().map(|p| p.missing().len()).unwrap_or(0);
    println!();
    println!(
        "Level {}/{}  Reward {}  Missing {}",
        game.level_number(),
        game.catalog().len(),
        progression.total_reward(),
        remaining
    );
    println!("{}", game.display());
    let _ = std::io::stdout().flush();
}

/// Validate a level pack
#[instrument]
fn run_validate(levels: PathBuf) -> Result<()> {
    let catalog = LevelCatalog::from_file(&levels)
        .with_context(|| format!("validating {}", levels.display()))?;

    println!("{}: {} level(s)", levels.display(), catalog.len());
    let mut unwinnable = 0;
    for (index, level) in catalog.levels().iter().enumerate() {
        let duplicates = level.duplicate_targets();
        let note = if duplicates > 0 {
            unwinnable += 1;
            format!("  UNWINNABLE: {} duplicate edge(s)", duplicates)
        } else {
            String::new()
        };
        println!(
            "  #{:<3} {}x{}  start {}  {} edge(s){}",
            index + 1,
            level.width(),
            level.height(),
            level.brush_start(),
            level.target().len(),
            note
        );
    }

    if unwinnable > 0 {
        anyhow::bail!("{} level(s) can never be completed", unwinnable);
    }
    Ok(())
}

/// Show or reset saved progression
#[instrument]
fn run_progress(save: PathBuf, reset: bool) -> Result<()> {
    let mut store = TomlFileStore::open(&save)?;

    if reset {
        ProgressionState::default().save(&mut store)?;
        info!("Progression reset");
    }

    println!("Level index: {}", store.get_int_or(LEVEL_KEY, 0)?);
    println!("Reward:      {}", store.get_int_or(REWARD_KEY, 0)?);
    println!(
        "Sound:       {}",
        if sound_enabled(&store)? { "on" } else { "off" }
    );
    Ok(())
}
