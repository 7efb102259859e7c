mod play;
mod report;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use memedle_game::{GameEngine, PhraseBook, parse_date};

use play::Mode;
use store::{FileStore, LocalClock};

#[derive(Debug, Parser)]
#[command(name = "memedle", version)]
#[command(about = "Daily meme-phrase guessing puzzle for the terminal")]
struct Args {
    /// Directory for saved progress (default: $MEMEDLE_DATA_DIR or ~/.memedle)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play today's puzzle (the default)
    Play,
    /// Play a chosen date's puzzle without touching saved progress
    Practice {
        /// Puzzle date, YYYY-MM-DD
        date: String,
    },
    /// Show lifetime stats
    Stats,
    /// Show this cycle's day-by-day results
    History,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let data_dir = resolve_data_dir(args.data_dir);
    log::debug!("using data dir {}", data_dir.display());

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let mut engine = build_engine(data_dir);
            play::run(&mut engine, Mode::Daily)
        }
        Command::Practice { date } => {
            let date = parse_date(&date).context("invalid practice date")?;
            let mut engine = build_engine(data_dir);
            if date < engine.book().epoch() {
                println!(
                    "{}",
                    format!("Dates before {} play the first puzzle.", engine.book().epoch())
                        .yellow()
                );
            }
            engine.initialize(Some(date));
            play::run(&mut engine, Mode::Practice)
        }
        Command::Stats => {
            let saved = report::load_saved(&FileStore::new(data_dir))?;
            report::print_stats(&saved.stats);
            Ok(())
        }
        Command::History => {
            let saved = report::load_saved(&FileStore::new(data_dir))?;
            report::print_history(&saved);
            Ok(())
        }
    }
}

fn build_engine(data_dir: PathBuf) -> GameEngine<LocalClock, FileStore> {
    GameEngine::new(LocalClock, FileStore::new(data_dir), PhraseBook::builtin())
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Some(dir) = std::env::var_os("MEMEDLE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".memedle"))
        .unwrap_or_else(|| PathBuf::from(".memedle"))
}
