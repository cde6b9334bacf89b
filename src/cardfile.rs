// src/cardfile.rs
// Plain text card sheets: one block per card with a title, the BINGO header,
// a rule and five rows of tab separated cells. Blocks end with a blank line.

use std::fs;
use std::path::{Path, PathBuf};

use crate::card::{Card, CardLayout, Cell};
use crate::defs::{Column, Number, GRIDSIZE};
use crate::error::{BingoError, BingoResult};

const FREE_LABEL: &str = "Free";
const RULE: &str = "--------------------------";

fn header() -> String {
    Column::ALL
        .iter()
        .map(|c| c.letter().to_string())
        .collect::<Vec<_>>()
        .join("\t")
}

/// Text lines of one card, without the trailing blank line.
pub fn format_card(title: &str, card: &Card) -> Vec<String> {
    let mut lines = vec![title.to_string(), header(), RULE.to_string()];
    for row in &card.grid {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| format!("{:<4}", cell.to_string()))
            .collect();
        lines.push(cells.join("\t"));
    }
    lines
}

pub fn format_cards(title: &str, cards: &[Card]) -> String {
    let mut out = String::new();
    for card in cards {
        for line in format_card(title, card) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

pub fn write_cards<P: AsRef<Path>>(path: P, title: &str, cards: &[Card]) -> BingoResult<()> {
    fs::write(path, format_cards(title, cards))?;
    Ok(())
}

/// First `<base>_<n>.txt` (n = 1, 2, ...) that does not exist yet.
pub fn next_available_path(base: &str) -> PathBuf {
    let mut file_number = 1;
    loop {
        let candidate = PathBuf::from(format!("{base}_{file_number}.txt"));
        if !candidate.exists() {
            return candidate;
        }
        file_number += 1;
    }
}

fn is_header(line: &str) -> bool {
    let letters: Vec<&str> = line.split_whitespace().collect();
    letters == ["B", "I", "N", "G", "O"]
}

fn parse_row(card: usize, line: &str) -> BingoResult<[Cell; GRIDSIZE]> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != GRIDSIZE {
        return Err(BingoError::MalformedCardFile {
            card,
            reason: format!("row '{}' has {} cells", line.trim(), tokens.len()),
        });
    }

    let mut cells = [Cell::Free; GRIDSIZE];
    for (cell, token) in cells.iter_mut().zip(tokens) {
        *cell = if token.eq_ignore_ascii_case(FREE_LABEL) {
            Cell::Free
        } else {
            let number = token.parse::<Number>().map_err(|_| BingoError::MalformedCardFile {
                card,
                reason: format!("'{token}' is not a number"),
            })?;
            Cell::Number(number)
        };
    }
    Ok(cells)
}

/// Reads every card of a sheet and checks it against `layout`.
pub fn parse_cards(text: &str, layout: &CardLayout) -> BingoResult<Vec<Card>> {
    let mut cards = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        if !is_header(line) {
            continue;
        }
        let card_number = cards.len() + 1;

        let is_rule = |l: &&str| !l.trim().is_empty() && l.trim().chars().all(|c| c == '-');
        if lines.peek().is_some_and(is_rule) {
            lines.next();
        }

        let mut grid = [[Cell::Free; GRIDSIZE]; GRIDSIZE];
        for row in grid.iter_mut() {
            match lines.next() {
                Some(line) if !line.trim().is_empty() => *row = parse_row(card_number, line)?,
                _ => {
                    return Err(BingoError::MalformedCardFile {
                        card: card_number,
                        reason: format!("expected {GRIDSIZE} rows"),
                    });
                }
            }
        }

        let card = Card::from_grid(grid);
        card.validate(layout)
            .map_err(|reason| BingoError::MalformedCardFile { card: card_number, reason })?;
        cards.push(card);
    }

    Ok(cards)
}

pub fn read_cards<P: AsRef<Path>>(path: P, layout: &CardLayout) -> BingoResult<Vec<Card>> {
    let content = fs::read_to_string(path)?;
    parse_cards(&content, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SHEET: &str = concat!(
        "Alvadore Community Chest Bingo Card\n",
        "B\tI\tN\tG\tO\n",
        "--------------------------\n",
        "3   \t18  \t31  \t47  \t61  \n",
        "7   \t22  \t40  \t55  \t75  \n",
        "1   \t16  \tFree\t60  \t70  \n",
        "15  \t30  \t45  \t46  \t66  \n",
        "9   \t25  \t33  \t52  \t68  \n",
        "\n",
    );

    #[test]
    fn test_format_card_layout() {
        let cards = parse_cards(SHEET, &CardLayout::default()).unwrap();
        let lines = format_card("Alvadore Community Chest Bingo Card", &cards[0]);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "B\tI\tN\tG\tO");
        assert_eq!(lines[4], "1   \t16  \tFree\t60  \t70  ");
        assert_eq!(format_cards("Alvadore Community Chest Bingo Card", &cards), SHEET);
    }

    #[test]
    fn test_parse_sheet() {
        let cards = parse_cards(SHEET, &CardLayout::default()).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].cell(0, 0), Cell::Number(3));
        assert_eq!(cards[0].cell(2, 2), Cell::Free);
        assert_eq!(cards[0].column(4)[1], Cell::Number(75));
    }

    #[test]
    fn test_generated_batch_reads_back() {
        let mut rng = StdRng::seed_from_u64(6);
        let cards = CardGenerator::new().generate_unique_batch(6, &mut rng).unwrap();
        let text = format_cards("Title", &cards);
        assert_eq!(parse_cards(&text, &CardLayout::default()).unwrap(), cards);
    }

    #[test]
    fn test_parse_rejects_out_of_range_column() {
        let broken = SHEET.replacen("3   \t18", "33  \t18", 1);
        let result = parse_cards(&broken, &CardLayout::default());
        assert!(matches!(result, Err(BingoError::MalformedCardFile { card: 1, .. })));
    }

    #[test]
    fn test_parse_rejects_short_card() {
        let short: String = SHEET.lines().take(6).map(|l| format!("{l}\n")).collect();
        let result = parse_cards(&short, &CardLayout::default());
        assert!(matches!(result, Err(BingoError::MalformedCardFile { .. })));
    }

    #[test]
    fn test_parse_rejects_garbage_cell() {
        let broken = SHEET.replacen("Free", "XX", 1);
        let result = parse_cards(&broken, &CardLayout::default());
        assert!(matches!(result, Err(BingoError::MalformedCardFile { .. })));
    }

    #[test]
    fn test_next_available_path_skips_existing() {
        let dir = std::env::temp_dir().join(format!("bingo-cardfile-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let base = dir.join("Cards").to_string_lossy().to_string();

        assert_eq!(next_available_path(&base), PathBuf::from(format!("{base}_1.txt")));
        fs::write(format!("{base}_1.txt"), "").unwrap();
        fs::write(format!("{base}_2.txt"), "").unwrap();
        assert_eq!(next_available_path(&base), PathBuf::from(format!("{base}_3.txt")));

        fs::remove_dir_all(&dir).unwrap();
    }
}
