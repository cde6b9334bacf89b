// src/marking.rs
// Derives the marked cells of a card from the draw history and checks them
// against the selected pattern.

use crate::card::{Card, Cell};
use crate::defs::Number;
use crate::pattern::{GridMask, Pattern};

/// Marked cells of a card. Always derived, never edited directly.
pub type MarkedSet = GridMask;

/// A cell is marked when its number has been drawn; the free cell always is.
pub fn compute_marked(card: &Card, history: &[Number]) -> MarkedSet {
    let mut marked = GridMask::empty();
    for (row, col, cell) in card.cells() {
        let is_marked = match cell {
            Cell::Free => true,
            Cell::Number(n) => history.contains(&n),
        };
        if is_marked {
            marked.insert(row, col);
        }
    }
    marked
}

/// Indices of the cards that complete `pattern` with the given history.
pub fn winning_cards(cards: &[Card], history: &[Number], pattern: &Pattern) -> Vec<usize> {
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| pattern.is_won(&compute_marked(card, history)))
        .map(|(index, _)| index)
        .collect()
}

/// Numbers a card still needs for its closest mask of `pattern`.
pub fn numbers_missing(card: &Card, history: &[Number], pattern: &Pattern) -> Option<usize> {
    let marked = compute_marked(card, history);
    pattern
        .masks
        .iter()
        .map(|mask| mask.cells().filter(|&(row, col)| !marked.contains(row, col)).count())
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardGenerator;
    use crate::defs::FREECELL;
    use crate::pattern::{is_complete, PatternCatalog};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn sample_card() -> Card {
        let mut rng = StdRng::seed_from_u64(42);
        CardGenerator::new().generate_card(&mut rng)
    }

    #[test]
    fn test_free_cell_always_marked() {
        let card = sample_card();
        let marked = compute_marked(&card, &[]);
        assert_eq!(marked.len(), 1);
        assert!(marked.contains(FREECELL.0, FREECELL.1));
    }

    #[test]
    fn test_marked_follows_history() {
        let card = sample_card();
        let history = vec![card.cell(0, 0).number().unwrap(), card.cell(4, 4).number().unwrap()];
        let marked = compute_marked(&card, &history);
        assert!(marked.contains(0, 0));
        assert!(marked.contains(4, 4));
        assert!(!marked.contains(0, 1));
        assert_eq!(marked.len(), 3);
    }

    #[test]
    fn test_marking_is_monotonic() {
        let card = sample_card();
        let mut rng = StdRng::seed_from_u64(9);
        let mut balls: Vec<Number> = (1..=75).collect();
        balls.shuffle(&mut rng);

        let mut previous = compute_marked(&card, &[]);
        for drawn in 1..=balls.len() {
            let current = compute_marked(&card, &balls[..drawn]);
            assert!(previous.is_subset_of(&current));
            previous = current;
        }
        assert_eq!(previous, GridMask::full());
    }

    #[test]
    fn test_blackout_needs_every_number() {
        let card = sample_card();
        let blackout = GridMask::full();
        let mut history = card.numbers();
        assert!(is_complete(&compute_marked(&card, &history), &blackout));

        let missing = history.pop().unwrap();
        assert!(!is_complete(&compute_marked(&card, &history), &blackout));

        // unrelated balls do not help
        let others: Vec<Number> = (1..=75).filter(|n| *n != missing).collect();
        assert!(!is_complete(&compute_marked(&card, &others), &blackout));
    }

    #[test]
    fn test_winning_cards_and_missing_count() {
        let catalog = PatternCatalog::builtin().unwrap();
        let cross = catalog.require("CROSS").unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let cards = CardGenerator::new().generate_unique_batch(3, &mut rng).unwrap();

        let history: Vec<Number> = cross.masks[0]
            .cells()
            .filter_map(|(row, col)| cards[1].cell(row, col).number())
            .collect();
        assert_eq!(winning_cards(&cards, &history, cross), vec![1]);
        assert_eq!(numbers_missing(&cards[1], &history, cross), Some(0));
        assert_eq!(numbers_missing(&cards[1], &history[1..], cross), Some(1));
    }
}
