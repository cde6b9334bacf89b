// src/card.rs
// BINGO card model and generator.
//
// Every column of a card is an ordered random sample from that column's
// range; the centre of the N column is the free cell. Batches never contain
// the same card twice.

use std::collections::HashSet;
use std::fmt;

use rand::seq::index;
use rand::Rng;

use crate::defs::{is_valid_ball, Column, Number, FREECELL, GRIDSIZE};
use crate::error::{BingoError, BingoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Number(Number),
    Free,
}

impl Cell {
    pub fn number(&self) -> Option<Number> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Free => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Free => write!(f, "Free"),
        }
    }
}

/// A 5x5 card, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub grid: [[Cell; GRIDSIZE]; GRIDSIZE],
}

impl Card {
    pub fn from_grid(grid: [[Cell; GRIDSIZE]; GRIDSIZE]) -> Self {
        Card { grid }
    }

    /// Builds a card from its five columns (top to bottom).
    pub fn from_columns(columns: [[Cell; GRIDSIZE]; GRIDSIZE]) -> Self {
        let mut grid = [[Cell::Free; GRIDSIZE]; GRIDSIZE];
        for (col, values) in columns.iter().enumerate() {
            for (row, cell) in values.iter().enumerate() {
                grid[row][col] = *cell;
            }
        }
        Card { grid }
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid[row][col]
    }

    pub fn column(&self, col: usize) -> [Cell; GRIDSIZE] {
        std::array::from_fn(|row| self.grid[row][col])
    }

    /// Every cell with its coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells.iter().enumerate().map(move |(col, cell)| (row, col, *cell))
            })
    }

    pub fn numbers(&self) -> Vec<Number> {
        self.cells().filter_map(|(_, _, cell)| cell.number()).collect()
    }

    /// Checks the card against a layout: one free cell at the centre, every
    /// number unique and inside its column's range.
    pub fn validate(&self, layout: &CardLayout) -> Result<(), String> {
        let mut seen = HashSet::new();
        for (row, col, cell) in self.cells() {
            match cell {
                Cell::Free if (row, col) == FREECELL => {}
                Cell::Free => {
                    return Err(format!("free cell at row {}, column {}", row + 1, col + 1));
                }
                Cell::Number(n) => {
                    if (row, col) == FREECELL {
                        return Err(format!("centre cell holds {n} instead of Free"));
                    }
                    let (low, high) = layout.columns[col];
                    if !(low..=high).contains(&n) {
                        return Err(format!(
                            "{n} is outside the {} range {low}-{high}",
                            Column::ALL[col].letter()
                        ));
                    }
                    if !seen.insert(n) {
                        return Err(format!("{n} appears twice"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Number range of each column, inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout {
    pub columns: [(Number, Number); GRIDSIZE],
}

impl Default for CardLayout {
    fn default() -> Self {
        CardLayout {
            columns: Column::ALL.map(|column| (*column.range().start(), *column.range().end())),
        }
    }
}

impl CardLayout {
    /// Numbers a column must supply: one less for the column holding the free cell.
    pub fn cells_needed(col: usize) -> usize {
        if col == FREECELL.1 { GRIDSIZE - 1 } else { GRIDSIZE }
    }

    pub fn validate(&self) -> BingoResult<()> {
        for (col, &(low, high)) in self.columns.iter().enumerate() {
            let letter = Column::ALL[col].letter();
            if !is_valid_ball(low) || !is_valid_ball(high) || low > high {
                return Err(BingoError::InvalidCardLayout(format!(
                    "column {letter} range {low}-{high} is not inside 1-75"
                )));
            }
            let size = (high - low) as usize + 1;
            if size < Self::cells_needed(col) {
                return Err(BingoError::InvalidCardLayout(format!(
                    "column {letter} range {low}-{high} has {size} numbers, needs {}",
                    Self::cells_needed(col)
                )));
            }
            for (other, &(other_low, other_high)) in self.columns.iter().enumerate().skip(col + 1) {
                if low <= other_high && other_low <= high {
                    return Err(BingoError::InvalidCardLayout(format!(
                        "columns {letter} and {} overlap",
                        Column::ALL[other].letter()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of distinct cards this layout can produce, saturating at `u128::MAX`.
    pub fn max_distinct_cards(&self) -> u128 {
        self.columns
            .iter()
            .enumerate()
            .fold(1u128, |total, (col, &(low, high))| {
                let size = (high as u128).saturating_sub(low as u128) + 1;
                let needed = Self::cells_needed(col) as u128;
                let orderings = (0..needed)
                    .fold(1u128, |acc, k| acc.saturating_mul(size.saturating_sub(k)));
                total.saturating_mul(orderings)
            })
    }
}

/// Largest batch generated in one request. Printed sheets never come close;
/// beyond it the request is refused instead of exhausting memory.
pub const MAX_BATCH_SIZE: usize = 100_000;

#[derive(Debug, Clone)]
pub struct CardGenerator {
    layout: CardLayout,
    max_attempts: Option<usize>,
}

impl CardGenerator {
    pub fn new() -> Self {
        Self {
            layout: CardLayout::default(),
            max_attempts: None,
        }
    }

    pub fn with_layout(layout: CardLayout) -> BingoResult<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            max_attempts: None,
        })
    }

    /// Caps the number of cards drawn while filling a unique batch.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    pub fn generate_card<R: Rng + ?Sized>(&self, rng: &mut R) -> Card {
        let columns: [[Cell; GRIDSIZE]; GRIDSIZE] = std::array::from_fn(|col| {
            let (low, high) = self.layout.columns[col];
            let size = (high - low) as usize + 1;
            let mut cells: Vec<Cell> = index::sample(rng, size, CardLayout::cells_needed(col))
                .into_iter()
                .map(|offset| Cell::Number(low + offset as Number))
                .collect();
            if col == FREECELL.1 {
                cells.insert(FREECELL.0, Cell::Free);
            }
            std::array::from_fn(|row| cells[row])
        });
        Card::from_columns(columns)
    }

    pub fn generate_unique_batch<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> BingoResult<Vec<Card>> {
        let max_cards = self.layout.max_distinct_cards();
        if count as u128 > max_cards {
            return Err(BingoError::CardGenerationStalled(format!(
                "{count} cards requested but this layout allows only {max_cards} distinct cards"
            )));
        }
        if count > MAX_BATCH_SIZE {
            return Err(BingoError::CardGenerationStalled(format!(
                "{count} cards requested, at most {MAX_BATCH_SIZE} per batch"
            )));
        }

        let max_attempts = self
            .max_attempts
            .unwrap_or_else(|| count.saturating_mul(64).saturating_add(1024));
        let mut cards = Vec::new();
        let mut seen = HashSet::new();
        let mut attempts = 0;

        while cards.len() < count {
            if attempts >= max_attempts {
                return Err(BingoError::CardGenerationStalled(format!(
                    "only {} of {count} unique cards after {attempts} attempts",
                    cards.len()
                )));
            }
            attempts += 1;

            let card = self.generate_card(rng);
            if seen.insert(card) {
                cards.push(card);
            }
        }

        Ok(cards)
    }
}

impl Default for CardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Always yields zero, so every generated card is identical.
    struct StuckRng;

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn minimal_layout() -> CardLayout {
        CardLayout {
            columns: [(1, 5), (16, 20), (31, 34), (46, 50), (61, 65)],
        }
    }

    #[test]
    fn test_generate_card_respects_columns() {
        let mut rng = StdRng::seed_from_u64(2024);
        let generator = CardGenerator::new();
        for _ in 0..200 {
            let card = generator.generate_card(&mut rng);
            assert_eq!(card.validate(generator.layout()), Ok(()));

            let free_cells: Vec<_> = card.cells().filter(|(_, _, c)| *c == Cell::Free).collect();
            assert_eq!(free_cells.len(), 1);
            assert_eq!((free_cells[0].0, free_cells[0].1), FREECELL);

            let mut numbers = card.numbers();
            assert_eq!(numbers.len(), 24);
            numbers.sort_unstable();
            numbers.dedup();
            assert_eq!(numbers.len(), 24);

            for column in Column::ALL {
                for cell in card.column(column.index()) {
                    if let Cell::Number(n) = cell {
                        assert!(column.range().contains(&n));
                    }
                }
            }
        }
    }

    #[test]
    fn test_unique_batch() {
        let mut rng = StdRng::seed_from_u64(11);
        let cards = CardGenerator::new().generate_unique_batch(250, &mut rng).unwrap();
        assert_eq!(cards.len(), 250);
        let distinct: HashSet<_> = cards.iter().collect();
        assert_eq!(distinct.len(), 250);
    }

    #[test]
    fn test_unique_batch_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(CardGenerator::new().generate_unique_batch(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_batch_above_combinatorial_maximum_stalls() {
        let generator = CardGenerator::with_layout(minimal_layout()).unwrap();
        // 5! per full column, 5*4*3*2 for the centre column
        assert_eq!(generator.layout().max_distinct_cards(), 120u128.pow(5));

        let mut rng = StdRng::seed_from_u64(3);
        let result = generator.generate_unique_batch(120usize.pow(5) + 1, &mut rng);
        assert!(matches!(result, Err(BingoError::CardGenerationStalled(_))));
    }

    #[test]
    fn test_huge_batch_is_refused() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = CardGenerator::new();
        for count in [usize::MAX, usize::MAX / 2, MAX_BATCH_SIZE + 1] {
            let result = generator.generate_unique_batch(count, &mut rng);
            assert!(matches!(result, Err(BingoError::CardGenerationStalled(_))));
        }
    }

    #[test]
    fn test_rejection_loop_is_bounded() {
        let generator = CardGenerator::new().with_max_attempts(50);
        let result = generator.generate_unique_batch(2, &mut StuckRng);
        assert!(matches!(result, Err(BingoError::CardGenerationStalled(_))));

        let single = generator.generate_unique_batch(1, &mut StuckRng).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_default_layout_maximum() {
        let max = CardLayout::default().max_distinct_cards();
        let full_column: u128 = 15 * 14 * 13 * 12 * 11;
        let centre_column: u128 = 15 * 14 * 13 * 12;
        assert_eq!(max, full_column.pow(4) * centre_column);
    }

    #[test]
    fn test_layout_validation() {
        let mut overlapping = CardLayout::default();
        overlapping.columns[1] = (10, 25);
        assert!(matches!(overlapping.validate(), Err(BingoError::InvalidCardLayout(_))));

        let mut too_small = CardLayout::default();
        too_small.columns[0] = (1, 4);
        assert!(matches!(too_small.validate(), Err(BingoError::InvalidCardLayout(_))));

        let mut out_of_range = CardLayout::default();
        out_of_range.columns[4] = (61, 80);
        assert!(matches!(out_of_range.validate(), Err(BingoError::InvalidCardLayout(_))));

        assert!(CardGenerator::with_layout(minimal_layout()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_cards() {
        let layout = CardLayout::default();
        let mut rng = StdRng::seed_from_u64(5);
        let card = CardGenerator::new().generate_card(&mut rng);

        let mut wrong_range = card;
        wrong_range.grid[0][0] = Cell::Number(75);
        assert!(wrong_range.validate(&layout).is_err());

        let mut duplicate = card;
        duplicate.grid[1][0] = duplicate.grid[0][0];
        assert!(duplicate.validate(&layout).is_err());

        let mut no_free = card;
        no_free.grid[2][2] = Cell::Number(31);
        assert!(no_free.validate(&layout).is_err());
    }
}
