// src/pouch.rs
// The pouch holds the balls that have not been drawn yet.

use rand::Rng;

use crate::defs::{is_valid_ball, Number, FIRSTNUMBER, LASTNUMBER};
use crate::error::{BingoError, BingoResult};

#[derive(Debug, Clone)]
pub struct Pouch {
    pub numbers: Vec<Number>,
}

impl Pouch {
    pub fn new() -> Self {
        Pouch {
            numbers: (FIRSTNUMBER..=LASTNUMBER).collect(),
        }
    }

    /// Pouch holding every ball except the given ones.
    pub fn without(drawn: &[Number]) -> Self {
        Pouch {
            numbers: (FIRSTNUMBER..=LASTNUMBER)
                .filter(|n| !drawn.contains(n))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, number: Number) -> bool {
        self.numbers.contains(&number)
    }

    pub fn refill(&mut self) {
        *self = Pouch::new();
    }

    /// Remaining balls in ascending order.
    pub fn sorted(&self) -> Vec<Number> {
        let mut numbers = self.numbers.clone();
        numbers.sort_unstable();
        numbers
    }

    /// Picks a ball uniformly at random and removes it.
    pub fn extract<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BingoResult<Number> {
        if self.is_empty() {
            return Err(BingoError::ExhaustedPool);
        }
        let random_index = rng.random_range(0..self.len());
        Ok(self.numbers.swap_remove(random_index))
    }

    /// Removes a specific ball chosen by the operator.
    pub fn take(&mut self, number: Number) -> BingoResult<Number> {
        if !is_valid_ball(number) {
            return Err(BingoError::invalid_ball(number, "is outside 1-75"));
        }
        match self.numbers.iter().position(|&n| n == number) {
            Some(index) => Ok(self.numbers.swap_remove(index)),
            None => Err(BingoError::invalid_ball(number, "is already drawn")),
        }
    }

    /// Puts a ball back, used when a draw is undone.
    pub fn put_back(&mut self, number: Number) {
        if is_valid_ball(number) && !self.contains(number) {
            self.numbers.push(number);
        }
    }
}

impl Default for Pouch {
    fn default() -> Self {
        Self::new()
    }
}
