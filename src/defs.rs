// src/defs.rs
// Shared constants and the BINGO column layout.

pub type Number = u8;

pub const FIRSTNUMBER: Number = 1;
pub const LASTNUMBER: Number = 75;
pub const NUMBERSPERCOLUMN: Number = 15;

/// Side of a card grid (rows and columns).
pub const GRIDSIZE: usize = 5;
pub const CELLSPERCARD: usize = GRIDSIZE * GRIDSIZE;
/// Row and column of the free cell.
pub const FREECELL: (usize, usize) = (GRIDSIZE / 2, GRIDSIZE / 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    B,
    I,
    N,
    G,
    O,
}

impl Column {
    pub const ALL: [Column; GRIDSIZE] = [Column::B, Column::I, Column::N, Column::G, Column::O];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Column::B => 'B',
            Column::I => 'I',
            Column::N => 'N',
            Column::G => 'G',
            Column::O => 'O',
        }
    }

    pub fn from_letter(letter: char) -> Option<Column> {
        match letter.to_ascii_uppercase() {
            'B' => Some(Column::B),
            'I' => Some(Column::I),
            'N' => Some(Column::N),
            'G' => Some(Column::G),
            'O' => Some(Column::O),
            _ => None,
        }
    }

    /// Standard ball range for this letter (B: 1-15 ... O: 61-75).
    pub fn range(self) -> std::ops::RangeInclusive<Number> {
        let start = FIRSTNUMBER + self as Number * NUMBERSPERCOLUMN;
        start..=start + NUMBERSPERCOLUMN - 1
    }

    /// Column a ball belongs to, or None outside 1-75.
    pub fn of(number: Number) -> Option<Column> {
        if !is_valid_ball(number) {
            return None;
        }
        Some(Column::ALL[((number - FIRSTNUMBER) / NUMBERSPERCOLUMN) as usize])
    }
}

pub fn is_valid_ball(number: Number) -> bool {
    (FIRSTNUMBER..=LASTNUMBER).contains(&number)
}

/// Caller label for a ball, e.g. `B7` or `O75`.
pub fn ball_label(number: Number) -> String {
    match Column::of(number) {
        Some(column) => format!("{}{}", column.letter(), number),
        None => format!("?{number}"),
    }
}

/// Operating mode of the caller. Only decides which draw entry point the
/// front-end invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Manual,
    Auto,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Manual => "Manual",
            Mode::Auto => "Auto",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" | "m" => Ok(Mode::Manual),
            "auto" | "a" => Ok(Mode::Auto),
            other => Err(format!("unknown mode '{other}' (expected manual or auto)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_ranges_partition_balls() {
        let mut seen = Vec::new();
        for column in Column::ALL {
            let range = column.range();
            assert_eq!(range.clone().count(), NUMBERSPERCOLUMN as usize);
            for n in range {
                assert_eq!(Column::of(n), Some(column));
                seen.push(n);
            }
        }
        assert_eq!(seen, (FIRSTNUMBER..=LASTNUMBER).collect::<Vec<_>>());
    }

    #[test]
    fn test_ball_labels() {
        assert_eq!(ball_label(1), "B1");
        assert_eq!(ball_label(15), "B15");
        assert_eq!(ball_label(16), "I16");
        assert_eq!(ball_label(42), "N42");
        assert_eq!(ball_label(75), "O75");
        assert_eq!(Column::of(0), None);
        assert_eq!(Column::of(76), None);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Manual".parse::<Mode>(), Ok(Mode::Manual));
        assert_eq!("auto".parse::<Mode>(), Ok(Mode::Auto));
        assert!("random".parse::<Mode>().is_err());
    }
}
