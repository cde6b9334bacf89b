// src/board.rs
// The board records the drawn balls in draw order.

use crate::defs::{Column, Number};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board(Vec<Number>);

impl Board {
    pub fn new() -> Self {
        Board(Vec::new())
    }

    pub fn from_numbers(numbers: Vec<Number>) -> Self {
        Board(numbers)
    }

    pub fn push(&mut self, number: Number) {
        self.0.push(number);
    }

    pub fn pop(&mut self) -> Option<Number> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drawn balls, most recent last.
    pub fn get_numbers(&self) -> &[Number] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, number: Number) -> bool {
        self.0.contains(&number)
    }

    pub fn newest(&self) -> Option<Number> {
        self.0.last().copied()
    }

    /// The `n` balls drawn before the newest one, most recent first.
    pub fn get_last_numbers(&self, n: usize) -> Vec<Number> {
        if self.0.len() <= 1 {
            return Vec::new();
        }

        let available_previous = self.0.len() - 1;
        let numbers_to_show = std::cmp::min(n, available_previous);
        let start_index = self.0.len() - numbers_to_show - 1;
        let end_index = self.0.len() - 1;

        let mut result: Vec<Number> = self.0[start_index..end_index].to_vec();
        result.reverse();
        result
    }

    /// Every ball of a letter row with its drawn flag, for the caller display.
    pub fn column_entries(&self, column: Column) -> Vec<(Number, bool)> {
        column
            .range()
            .map(|number| (number, self.contains(number)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_newest() {
        let mut board = Board::new();
        assert_eq!(board.newest(), None);
        board.push(10);
        board.push(20);
        assert_eq!(board.newest(), Some(20));
        assert_eq!(board.get_numbers(), &[10, 20]);
        assert_eq!(board.pop(), Some(20));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_get_last_numbers_excludes_newest() {
        let board = Board::from_numbers(vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(board.get_last_numbers(5), vec![6, 5, 4, 3, 2]);
        assert_eq!(board.get_last_numbers(10), vec![6, 5, 4, 3, 2, 1]);

        let single = Board::from_numbers(vec![9]);
        assert!(single.get_last_numbers(5).is_empty());
    }

    #[test]
    fn test_column_entries_flags_drawn() {
        let board = Board::from_numbers(vec![16, 30]);
        let entries = board.column_entries(Column::I);
        assert_eq!(entries.len(), 15);
        assert_eq!(entries[0], (16, true));
        assert_eq!(entries[1], (17, false));
        assert_eq!(entries[14], (30, true));
    }
}
