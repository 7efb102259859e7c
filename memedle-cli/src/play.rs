//! Interactive play loop and board rendering.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::{Local, NaiveTime};
use colored::Colorize;
use memedle_game::{
    Clock, GameEngine, GameStatus, KeyboardTracker, StateStore, SubmitError, TileMark,
};

use crate::report;

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Today's puzzle; every guess persists.
    Daily,
    /// An arbitrary date's puzzle; nothing persists.
    Practice,
}

/// Drive a session to completion over stdin lines. Each line is one row
/// attempt; `quit` leaves mid-game (daily progress is already saved).
pub fn run<C: Clock, S: StateStore>(engine: &mut GameEngine<C, S>, mode: Mode) -> Result<()> {
    report_warnings(engine);
    announce(engine, mode);
    render_board(engine);

    if engine.session().is_over() {
        finish(engine, mode);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let row = engine.session().guesses().len() + 1;
        let budget = engine.session().max_attempts();
        let need = engine.session().target_len();
        print!("\n[{row}/{budget}] {need} letters> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        // One prompt line is one full row; stale buffer letters go first.
        while engine.handle_backspace() {}
        for ch in trimmed.chars() {
            engine.handle_letter(ch);
        }

        match engine.submit_guess() {
            Ok(outcome) => {
                let session = engine.session();
                let guess = &session.guesses()[outcome.row];
                println!(
                    "{}",
                    render_marked_row(session.display(), guess, &outcome.marks)
                );
                println!("{}", render_keyboard(session.keyboard()));
                match outcome.status {
                    GameStatus::InProgress => {
                        println!("{} attempts left", outcome.attempts_remaining);
                    }
                    GameStatus::Win | GameStatus::Fail => {
                        finish(engine, mode);
                        return Ok(());
                    }
                }
            }
            Err(SubmitError::IncompleteGuess { have, need }) => {
                println!("{}", format!("✏️  Need {need} letters, got {have}").yellow());
            }
            Err(SubmitError::GameOver) => return Ok(()),
            Err(err) => {
                log::error!("submit failed: {err}");
                println!("{}", err.to_string().red());
            }
        }
    }
}

fn report_warnings<C: Clock, S: StateStore>(engine: &mut GameEngine<C, S>) {
    for warning in engine.take_warnings() {
        log::warn!("{warning}");
        eprintln!("{}", format!("⚠️  {warning}").yellow());
    }
}

fn announce<C: Clock, S: StateStore>(engine: &GameEngine<C, S>, mode: Mode) {
    println!("{}", "🧩 Memedle".bright_cyan().bold());
    println!("{}", "=".repeat(28).cyan());
    let session = engine.session();
    match mode {
        Mode::Daily => println!("Daily puzzle for {}", session.date().to_string().bold()),
        Mode::Practice => println!(
            "{} {}",
            "Practice puzzle for".magenta(),
            session.date().to_string().bold()
        ),
    }
    println!(
        "{} letters, {} attempts. Type a guess and press enter; 'quit' to leave.",
        session.target_len(),
        session.max_attempts()
    );
    println!();
}

fn render_board<C: Clock, S: StateStore>(engine: &GameEngine<C, S>) {
    let session = engine.session();
    println!("{}", render_shape(session.display()));
    for (guess, marks) in session.guesses().iter().zip(session.scored_rows()) {
        println!("{}", render_marked_row(session.display(), guess, marks));
    }
    if !session.guesses().is_empty() {
        println!("{}", render_keyboard(session.keyboard()));
    }
}

fn finish<C: Clock, S: StateStore>(engine: &GameEngine<C, S>, mode: Mode) {
    let session = engine.session();
    println!();
    match session.status() {
        GameStatus::Win => {
            let line = format!("🎉 Solved in {} of {}!", session.attempts_used(), session.max_attempts());
            println!("{}", line.green().bold());
        }
        GameStatus::Fail => {
            println!(
                "{} {}",
                "❌ Out of attempts. The phrase was".red(),
                session.display().bold()
            );
        }
        GameStatus::InProgress => return,
    }

    match mode {
        Mode::Practice => println!("{}", "Practice round, nothing saved.".bright_black()),
        Mode::Daily => {
            println!();
            report::print_stats(&engine.stats_snapshot());
            println!("\n⏳ Next puzzle in {}", time_until_midnight().bold());
        }
    }
}

/// Empty board row showing the phrase shape: one slot per letter, word
/// gaps preserved.
fn render_shape(display: &str) -> String {
    let mut out = String::new();
    for slot in display.chars() {
        if slot.is_alphabetic() {
            out.push_str(&" ▢ ".bright_black().to_string());
        } else if slot == ' ' {
            out.push_str("   ");
        } else {
            out.push_str(&format!(" {slot} ").bright_black().to_string());
        }
    }
    out
}

/// Map a scored guess onto the display shape. Guess letters fill the
/// alphabetic slots left to right; spaces and punctuation render as gaps.
fn render_marked_row(display: &str, guess: &str, marks: &[TileMark]) -> String {
    let mut letters = guess.chars().zip(marks.iter().copied());
    let mut out = String::new();
    for slot in display.chars() {
        if slot.is_alphabetic() {
            match letters.next() {
                Some((ch, mark)) => out.push_str(&paint_cell(ch, mark)),
                None => out.push_str("   "),
            }
        } else if slot == ' ' {
            out.push_str("   ");
        } else {
            out.push_str(&format!(" {slot} ").bright_black().to_string());
        }
    }
    out
}

fn paint_cell(ch: char, mark: TileMark) -> String {
    let cell = format!(" {ch} ");
    match mark {
        TileMark::Correct => cell.black().on_green().to_string(),
        TileMark::Present => cell.black().on_yellow().to_string(),
        TileMark::Absent => cell.white().on_bright_black().to_string(),
    }
}

fn render_keyboard(tracker: &KeyboardTracker) -> String {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let keys = row
                .chars()
                .map(|key| paint_key(key, tracker.state(key)))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}{keys}", " ".repeat(indent))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn paint_key(key: char, state: Option<TileMark>) -> String {
    let cell = key.to_string();
    match state {
        Some(TileMark::Correct) => cell.black().on_green().to_string(),
        Some(TileMark::Present) => cell.black().on_yellow().to_string(),
        Some(TileMark::Absent) => cell.bright_black().to_string(),
        None => cell,
    }
}

fn time_until_midnight() -> String {
    let now = Local::now().naive_local();
    let midnight = now
        .date()
        .checked_add_days(chrono::Days::new(1))
        .unwrap_or(now.date())
        .and_time(NaiveTime::MIN);
    let total = midnight.signed_duration_since(now).num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
