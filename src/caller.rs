// src/caller.rs
// Operator controls of the caller: turns key presses into Game operations
// and keeps the transient UI state (typed digits, pending confirmations,
// status message).

use rand::Rng;

use crate::card::Card;
use crate::defs::{ball_label, Mode, Number};
use crate::error::{BingoError, BingoResult};
use crate::game::Game;
use crate::logging::{log_info, log_warning};
use crate::marking::winning_cards;
use crate::pattern::{Pattern, PatternCatalog};
use crate::terminal::{Input, Screen};

/// Action waiting for a `y` from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Undo,
    Reset,
    Restore,
}

impl Confirm {
    fn prompt(&self) -> &'static str {
        match self {
            Confirm::Undo => "Undo the last ball? (y/n)",
            Confirm::Reset => "Reset the board? (y/n)",
            Confirm::Restore => "Restore the last game? (y/n)",
        }
    }
}

pub struct Caller<R: Rng> {
    pub game: Game<R>,
    catalog: PatternCatalog,
    cards: Vec<Card>,
    review_count: usize,
    typed: String,
    pending: Option<Confirm>,
    message: Option<String>,
    announced: Vec<usize>,
    running: bool,
}

impl<R: Rng> Caller<R> {
    pub fn new(
        game: Game<R>,
        catalog: PatternCatalog,
        cards: Vec<Card>,
        review_count: usize,
    ) -> Self {
        Self {
            game,
            catalog,
            cards,
            review_count,
            typed: String::new(),
            pending: None,
            message: None,
            announced: Vec::new(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn pending(&self) -> Option<Confirm> {
        self.pending
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn current_pattern(&self) -> Option<&Pattern> {
        self.catalog.get(self.game.pattern_key())
    }

    pub fn screen(&self) -> Screen<'_> {
        Screen {
            pattern: self.current_pattern(),
            cards: &self.cards,
            review_count: self.review_count,
            typed: &self.typed,
            message: self.message.as_deref(),
        }
    }

    pub fn handle_input(&mut self, input: Input) {
        self.message = None;

        if let Some(confirm) = self.pending.take() {
            if input == Input::Char('y') || input == Input::Char('Y') {
                self.confirm(confirm);
            } else {
                log_info(&format!("{confirm:?} canceled."));
            }
            return;
        }

        match input {
            Input::Esc => {
                self.running = false;
                log_info("Quit event received, exiting game.");
            }
            Input::Char('m') | Input::Char('M') => self.game.set_mode(Mode::Manual),
            Input::Char('a') | Input::Char('A') => self.game.set_mode(Mode::Auto),
            Input::Char('n') | Input::Char('N') => self.next_pattern(),
            Input::Char('u') | Input::Char('U') => self.request(Confirm::Undo),
            Input::Char('r') | Input::Char('R') => self.request(Confirm::Reset),
            Input::Char('o') | Input::Char('O') => self.request(Confirm::Restore),
            other => match self.game.mode() {
                Mode::Auto => self.handle_auto(other),
                Mode::Manual => self.handle_manual(other),
            },
        }
    }

    fn request(&mut self, confirm: Confirm) {
        let allowed = match confirm {
            Confirm::Undo => !self.game.history().is_empty(),
            Confirm::Reset => true,
            Confirm::Restore => self.game.has_last_game(),
        };
        if allowed {
            self.pending = Some(confirm);
            self.message = Some(confirm.prompt().to_string());
        } else {
            let error = match confirm {
                Confirm::Undo => BingoError::NothingToUndo,
                _ => BingoError::NothingToRestore,
            };
            log_warning(&error.to_string());
            self.message = Some(error.to_string());
        }
    }

    fn confirm(&mut self, confirm: Confirm) {
        let result = match confirm {
            Confirm::Undo => self.game.undo_last().map(|n| format!("Took back {}", ball_label(n))),
            Confirm::Reset => {
                self.game.reset();
                Ok("New game started".to_string())
            }
            Confirm::Restore => self
                .game
                .restore_last_game()
                .map(|_| "Previous game restored".to_string()),
        };
        self.announced.clear();
        self.message = Some(result.unwrap_or_else(|e| e.to_string()));
    }

    fn next_pattern(&mut self) {
        if let Some(next) = self.catalog.next_after(self.game.pattern_key()) {
            let key = next.key.clone();
            self.game.set_pattern(&key);
            self.announced.clear();
        }
    }

    fn handle_auto(&mut self, input: Input) {
        if matches!(input, Input::Enter | Input::Char(' ')) {
            let result = self.game.draw_next();
            self.after_draw(result);
        }
    }

    fn handle_manual(&mut self, input: Input) {
        match input {
            Input::Char(c) if c.is_ascii_digit() => {
                if self.typed.len() < 2 {
                    self.typed.push(c);
                }
            }
            Input::Backspace => {
                self.typed.pop();
            }
            Input::Enter if !self.typed.is_empty() => {
                let typed = std::mem::take(&mut self.typed);
                let result = self.game.mark_manual_input(&typed);
                self.after_draw(result);
            }
            _ => {}
        }
    }

    fn after_draw(&mut self, result: BingoResult<Number>) {
        match result {
            Ok(_) => self.check_winners(),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn check_winners(&mut self) {
        let Some(pattern) = self.catalog.get(self.game.pattern_key()) else {
            return;
        };
        for index in winning_cards(&self.cards, self.game.history(), pattern) {
            if !self.announced.contains(&index) {
                log_info(&format!("Card #{} completes pattern {}", index + 1, pattern.label));
                self.announced.push(index);
            }
        }
    }

    /// Cards that have completed the current pattern, in the order they won.
    pub fn announced_winners(&self) -> &[usize] {
        &self.announced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn caller(cards: Vec<Card>) -> Caller<StdRng> {
        let game = Game::with_rng(StdRng::seed_from_u64(21));
        Caller::new(game, PatternCatalog::builtin().unwrap(), cards, 5)
    }

    fn type_number(caller: &mut Caller<StdRng>, text: &str) {
        for c in text.chars() {
            caller.handle_input(Input::Char(c));
        }
        caller.handle_input(Input::Enter);
    }

    #[test]
    fn test_auto_draws_on_space_and_enter() {
        let mut caller = caller(Vec::new());
        caller.handle_input(Input::Char(' '));
        caller.handle_input(Input::Enter);
        assert_eq!(caller.game.history().len(), 2);
    }

    #[test]
    fn test_manual_typing() {
        let mut caller = caller(Vec::new());
        caller.handle_input(Input::Char('m'));
        assert_eq!(caller.game.mode(), Mode::Manual);

        caller.handle_input(Input::Char('4'));
        caller.handle_input(Input::Char('9'));
        caller.handle_input(Input::Backspace);
        caller.handle_input(Input::Char('2'));
        assert_eq!(caller.typed(), "42");
        caller.handle_input(Input::Enter);
        assert_eq!(caller.game.history(), &[42]);

        type_number(&mut caller, "42");
        assert_eq!(caller.game.history(), &[42]);
        assert!(caller.message().unwrap().contains("already drawn"));

        type_number(&mut caller, "80");
        assert_eq!(caller.game.history(), &[42]);
        assert!(caller.message().is_some());
    }

    #[test]
    fn test_exhausted_pool_message() {
        let mut caller = caller(Vec::new());
        for _ in 0..75 {
            caller.handle_input(Input::Enter);
        }
        caller.handle_input(Input::Enter);
        assert_eq!(caller.message(), Some("All balls drawn! Reset to play again."));
        assert!(caller.is_running());
    }

    #[test]
    fn test_confirmations() {
        let mut caller = caller(Vec::new());
        caller.handle_input(Input::Char('u'));
        assert_eq!(caller.pending(), None);
        assert_eq!(caller.message(), Some("No balls to undo"));

        caller.handle_input(Input::Enter);
        caller.handle_input(Input::Enter);
        caller.handle_input(Input::Char('u'));
        assert_eq!(caller.pending(), Some(Confirm::Undo));
        caller.handle_input(Input::Char('n'));
        assert_eq!(caller.game.history().len(), 2);

        caller.handle_input(Input::Char('u'));
        caller.handle_input(Input::Char('y'));
        assert_eq!(caller.game.history().len(), 1);

        caller.handle_input(Input::Char('r'));
        caller.handle_input(Input::Char('y'));
        assert!(caller.game.history().is_empty());

        caller.handle_input(Input::Char('o'));
        caller.handle_input(Input::Char('y'));
        assert_eq!(caller.game.history().len(), 1);
    }

    #[test]
    fn test_pattern_cycling_and_quit() {
        let mut caller = caller(Vec::new());
        caller.handle_input(Input::Char('n'));
        assert_eq!(caller.game.pattern_key(), "T");
        assert_eq!(caller.current_pattern().unwrap().label, "T");
        caller.handle_input(Input::Esc);
        assert!(!caller.is_running());
    }

    #[test]
    fn test_winner_announced_once() {
        let mut rng = StdRng::seed_from_u64(4);
        let cards = CardGenerator::new().generate_unique_batch(2, &mut rng).unwrap();
        let target = cards[1];
        let mut caller = caller(cards);
        caller.handle_input(Input::Char('m'));

        // top row of card #2 is a regular line
        for col in 0..5 {
            let number = target.cell(0, col).number().unwrap();
            type_number(&mut caller, &number.to_string());
        }
        assert!(caller.announced_winners().contains(&1));
        let count = caller.announced_winners().len();

        type_number(&mut caller, "75");
        type_number(&mut caller, "74");
        assert!(caller.announced_winners().len() >= count);
        assert_eq!(caller.announced_winners().iter().filter(|&&i| i == 1).count(), 1);
    }
}
