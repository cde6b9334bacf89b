// src/terminal.rs
// This module handles terminal input/output for the BINGO caller.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use rand::Rng;

use crate::card::Card;
use crate::defs::{ball_label, Column, Mode, Number};
use crate::game::Game;
use crate::marking::{numbers_missing, winning_cards};
use crate::pattern::Pattern;

/// Key presses the caller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Enter,
    Backspace,
    Esc,
    Other,
}

/// What the caller screen shows besides the game itself.
pub struct Screen<'a> {
    pub pattern: Option<&'a Pattern>,
    pub cards: &'a [Card],
    pub review_count: usize,
    pub typed: &'a str,
    pub message: Option<&'a str>,
}

fn highlight(number: Number, newest: Option<Number>, drawn: bool) -> String {
    if Some(number) == newest {
        format!("\x1b[1;32m{number:2}\x1b[0m") // Bold green for the last number
    } else if drawn {
        format!("\x1b[1;33m{number:2}\x1b[0m") // Bold yellow for drawn numbers
    } else {
        format!("\x1b[2m{number:2}\x1b[0m")
    }
}

pub fn print_board<R: Rng>(game: &Game<R>) {
    let newest = game.newest();
    for column in Column::ALL {
        let row: Vec<String> = game
            .board()
            .column_entries(column)
            .into_iter()
            .map(|(number, drawn)| highlight(number, newest, drawn))
            .collect();
        println!("\x1b[1m{}\x1b[0m  {}", column.letter(), row.join(" "));
    }
}

pub fn print_pattern(pattern: &Pattern) {
    println!("Bingo pattern: \x1b[1m{}\x1b[0m", pattern.label);
    if pattern.masks.len() > 1 {
        println!("  (any of {} shapes)", pattern.masks.len());
        return;
    }
    if let Some(mask) = pattern.masks.first() {
        for row in mask.to_rows() {
            let cells: Vec<&str> = row
                .chars()
                .map(|c| if c == 'X' { "■" } else { "·" })
                .collect();
            println!("  {}", cells.join(" "));
        }
    }
}

fn print_cards_status<R: Rng>(game: &Game<R>, pattern: &Pattern, cards: &[Card]) {
    let winners = winning_cards(cards, game.history(), pattern);
    if !winners.is_empty() {
        let labels: Vec<String> = winners.iter().map(|i| format!("#{}", i + 1)).collect();
        println!(
            "\n\x1b[1;33mBINGO!!! Card {} completes {}\x1b[0m",
            labels.join(", "),
            pattern.label
        );
        return;
    }

    let closest = cards
        .iter()
        .enumerate()
        .filter_map(|(i, card)| numbers_missing(card, game.history(), pattern).map(|m| (m, i)))
        .min();
    if let Some((missing, index)) = closest {
        println!("\nClosest card: #{} needs {missing} more", index + 1);
    }
}

pub fn show_on_terminal<R: Rng>(game: &Game<R>, screen: &Screen) {
    let mode = game.mode();
    println!("Community Chest BINGO - {} mode", mode.as_str());
    println!();

    match game.newest() {
        Some(newest) => println!("Last number: \x1b[1;32m{}\x1b[0m", ball_label(newest)),
        None => println!("Last number: -"),
    }
    let previous: Vec<String> = game
        .board()
        .get_last_numbers(screen.review_count)
        .into_iter()
        .map(ball_label)
        .collect();
    println!("Previous numbers: {}", previous.join(" "));
    println!("\nCurrent board:");
    print_board(game);
    println!();

    if let Some(pattern) = screen.pattern {
        print_pattern(pattern);
        if !screen.cards.is_empty() {
            print_cards_status(game, pattern, screen.cards);
        }
    }

    match game.pouch().len() {
        0 => println!("\nThe pouch is empty!"),
        left => println!("\nRemaining in pouch: {left}"),
    }

    if let Some(message) = screen.message {
        println!("\n\x1b[1;31m{message}\x1b[0m");
    }

    println!();
    match mode {
        Mode::Auto => println!("[Space/Enter] draw"),
        Mode::Manual => println!("Type a number and press Enter: {}", screen.typed),
    }
    println!("[m] manual  [a] auto  [n] next pattern  [u] undo  [r] reset  [o] restore  [Esc] quit");
}

fn wait_for_key() -> std::io::Result<Input> {
    // Clear any pending events in the buffer
    while event::poll(std::time::Duration::from_millis(0))? {
        event::read()?;
    }

    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                return Ok(match key_event.code {
                    KeyCode::Esc => Input::Esc,
                    KeyCode::Enter => Input::Enter,
                    KeyCode::Backspace => Input::Backspace,
                    KeyCode::Char(c) => Input::Char(c),
                    _ => Input::Other,
                });
            }
        }
    }
}

/// Runs `body` between `enable` and `disable`. `disable` runs even when
/// `body` fails; the body's error takes precedence.
fn in_raw_mode<T>(
    enable: impl FnOnce() -> std::io::Result<()>,
    body: impl FnOnce() -> std::io::Result<T>,
    disable: impl FnOnce() -> std::io::Result<()>,
) -> std::io::Result<T> {
    enable()?;
    let result = body();
    let restored = disable();
    let value = result?;
    restored?;
    Ok(value)
}

/// Waits for one key press in raw mode and clears the screen afterwards.
pub fn read_input() -> std::io::Result<Input> {
    let result = in_raw_mode(enable_raw_mode, wait_for_key, disable_raw_mode);
    print!("\x1Bc"); // Clear the screen
    result
}
