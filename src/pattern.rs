// src/pattern.rs
// Winning patterns are plain data: sets of grid cells that must be marked.
// A pattern may list several alternative masks (e.g. "any line"); it is won
// when one of them is fully covered.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::defs::{CELLSPERCARD, GRIDSIZE};
use crate::error::{BingoError, BingoResult};

/// A set of cells on the 5x5 grid, one bit per cell in row-major order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridMask(u32);

impl GridMask {
    const ALL_BITS: u32 = (1 << CELLSPERCARD) - 1;

    pub fn empty() -> Self {
        GridMask(0)
    }

    pub fn full() -> Self {
        GridMask(Self::ALL_BITS)
    }

    fn bit(row: usize, col: usize) -> u32 {
        debug_assert!(row < GRIDSIZE && col < GRIDSIZE);
        1 << (row * GRIDSIZE + col)
    }

    pub fn from_cells<I: IntoIterator<Item = (usize, usize)>>(cells: I) -> Self {
        let mut mask = GridMask::empty();
        for (row, col) in cells {
            mask.insert(row, col);
        }
        mask
    }

    pub fn row(row: usize) -> Self {
        Self::from_cells((0..GRIDSIZE).map(|col| (row, col)))
    }

    pub fn column(col: usize) -> Self {
        Self::from_cells((0..GRIDSIZE).map(|row| (row, col)))
    }

    pub fn diagonal() -> Self {
        Self::from_cells((0..GRIDSIZE).map(|i| (i, i)))
    }

    pub fn anti_diagonal() -> Self {
        Self::from_cells((0..GRIDSIZE).map(|i| (i, GRIDSIZE - 1 - i)))
    }

    pub fn insert(&mut self, row: usize, col: usize) {
        self.0 |= Self::bit(row, col);
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.0 & Self::bit(row, col) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_subset_of(&self, other: &GridMask) -> bool {
        self.0 & other.0 == self.0
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GRIDSIZE)
            .flat_map(|row| (0..GRIDSIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.contains(row, col))
    }

    /// Parses five rows of five characters. `X`, `#` or `1` select a cell;
    /// `.`, `-`, `_` or `0` leave it out.
    pub fn parse_rows<S: AsRef<str>>(name: &str, rows: &[S]) -> BingoResult<Self> {
        if rows.len() != GRIDSIZE {
            return Err(BingoError::malformed_pattern(
                name,
                format!("expected {GRIDSIZE} rows, found {}", rows.len()),
            ));
        }

        let mut mask = GridMask::empty();
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref().trim();
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != GRIDSIZE {
                return Err(BingoError::malformed_pattern(
                    name,
                    format!("row {} has {} cells, expected {GRIDSIZE}", row + 1, chars.len()),
                ));
            }
            for (col, ch) in chars.into_iter().enumerate() {
                match ch {
                    'X' | 'x' | '#' | '1' => mask.insert(row, col),
                    '.' | '-' | '_' | '0' => {}
                    other => {
                        return Err(BingoError::malformed_pattern(
                            name,
                            format!("unexpected character '{other}' in row {}", row + 1),
                        ));
                    }
                }
            }
        }

        if mask.is_empty() {
            return Err(BingoError::malformed_pattern(name, "mask selects no cells"));
        }
        Ok(mask)
    }

    /// Text rows for display, `X` for selected cells.
    pub fn to_rows(&self) -> Vec<String> {
        (0..GRIDSIZE)
            .map(|row| {
                (0..GRIDSIZE)
                    .map(|col| if self.contains(row, col) { 'X' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

/// Pattern mask selected by the operator.
pub type PatternMask = GridMask;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub key: String,
    pub label: String,
    pub masks: Vec<PatternMask>,
}

/// On-disk form of a pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDef {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    pub masks: Vec<Vec<String>>,
}

impl Pattern {
    pub fn new(key: &str, label: &str, masks: Vec<PatternMask>) -> Self {
        Pattern {
            key: key.to_string(),
            label: label.to_string(),
            masks,
        }
    }

    fn from_rows(key: &str, label: &str, rows: [&str; GRIDSIZE]) -> BingoResult<Self> {
        Ok(Pattern::new(key, label, vec![GridMask::parse_rows(key, &rows)?]))
    }

    pub fn from_def(def: &PatternDef) -> BingoResult<Self> {
        let key = def.key.trim();
        if key.is_empty() {
            return Err(BingoError::malformed_pattern("<unnamed>", "empty pattern key"));
        }
        if def.masks.is_empty() {
            return Err(BingoError::malformed_pattern(key, "no masks defined"));
        }
        let masks = def
            .masks
            .iter()
            .map(|rows| GridMask::parse_rows(key, rows))
            .collect::<BingoResult<Vec<_>>>()?;
        let label = def.label.clone().unwrap_or_else(|| key.to_string());
        Ok(Pattern::new(key, &label, masks))
    }

    /// Pattern won by a card whose marked cells cover any of the masks.
    pub fn is_won(&self, marked: &GridMask) -> bool {
        self.masks.iter().any(|mask| is_complete(marked, mask))
    }
}

/// True iff every cell of `mask` is in `marked`.
pub fn is_complete(marked: &GridMask, mask: &PatternMask) -> bool {
    mask.is_subset_of(marked)
}

#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl PatternCatalog {
    pub fn empty() -> Self {
        PatternCatalog { patterns: Vec::new() }
    }

    /// The patterns offered at the community chest games.
    pub fn builtin() -> BingoResult<Self> {
        let mut lines: Vec<PatternMask> = (0..GRIDSIZE).map(GridMask::row).collect();
        lines.extend((0..GRIDSIZE).map(GridMask::column));
        lines.push(GridMask::diagonal());
        lines.push(GridMask::anti_diagonal());

        let mut catalog = PatternCatalog::empty();
        catalog.add(Pattern::new("REGULAR", "Regular", lines))?;
        catalog.add(Pattern::from_rows("T", "T", ["XXXXX", "..X..", "..X..", "..X..", "..X.."])?)?;
        catalog.add(Pattern::from_rows(
            "TOP_MIDDLE_BOTTOM",
            "Top-middle-bottom",
            ["XXXXX", ".....", "XXXXX", ".....", "XXXXX"],
        )?)?;
        catalog.add(Pattern::from_rows("Y", "Y", ["X...X", ".X.X.", "..X..", "..X..", "..X.."])?)?;
        catalog.add(Pattern::from_rows(
            "CROSS",
            "Cross",
            ["..X..", "..X..", "XXXXX", "..X..", "..X.."],
        )?)?;
        catalog.add(Pattern::from_rows(
            "ARROW",
            "Arrow",
            ["XXX..", "XX...", "X.X..", "...X.", "....X"],
        )?)?;
        catalog.add(Pattern::new("BLACKOUT", "BLACKOUT", vec![GridMask::full()]))?;
        Ok(catalog)
    }

    /// Adds a pattern; a key already present is rejected and the first
    /// definition stays.
    pub fn add(&mut self, pattern: Pattern) -> BingoResult<()> {
        if self.get(&pattern.key).is_some() {
            return Err(BingoError::malformed_pattern(&pattern.key, "duplicate pattern key"));
        }
        self.patterns.push(pattern);
        Ok(())
    }

    /// Adds every well-formed definition and returns the errors of the rest.
    pub fn extend_from_defs(&mut self, defs: &[PatternDef]) -> Vec<BingoError> {
        let mut errors = Vec::new();
        for def in defs {
            match Pattern::from_def(def).and_then(|pattern| self.add(pattern)) {
                Ok(()) => {}
                Err(e) => errors.push(e),
            }
        }
        errors
    }

    pub fn extend_from_json(&mut self, content: &str) -> BingoResult<Vec<BingoError>> {
        let defs: Vec<PatternDef> = serde_json::from_str(content)?;
        Ok(self.extend_from_defs(&defs))
    }

    /// Loads extra patterns from a JSON file. The outer error covers an
    /// unreadable file; per-pattern errors are returned in the list.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> BingoResult<Vec<BingoError>> {
        let content = fs::read_to_string(path)?;
        self.extend_from_json(&content)
    }

    pub fn get(&self, key: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.key.eq_ignore_ascii_case(key))
    }

    pub fn require(&self, key: &str) -> BingoResult<&Pattern> {
        self.get(key).ok_or_else(|| BingoError::UnknownPattern(key.to_string()))
    }

    /// Pattern following `key` in catalog order, wrapping around.
    pub fn next_after(&self, key: &str) -> Option<&Pattern> {
        if self.patterns.is_empty() {
            return None;
        }
        let next_index = match self.patterns.iter().position(|p| p.key.eq_ignore_ascii_case(key)) {
            Some(index) => (index + 1) % self.patterns.len(),
            None => 0,
        };
        self.patterns.get(next_index)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
