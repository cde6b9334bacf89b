// src/config.rs
// Key = value configuration files for the caller and the card maker.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::card::CardLayout;
use crate::defs::{Mode, Number, GRIDSIZE};
use crate::logging::{log_info, log_warning};

pub const CALLER_CONFIG_PATH: &str = "conf/caller.conf";
pub const CARDMAKER_CONFIG_PATH: &str = "conf/cardmaker.conf";

#[derive(Debug, Clone)]
pub struct CallerConfig {
    pub mode: Mode,
    pub pattern: String,
    pub review_count: usize,
    pub patterns_file: Option<PathBuf>,
    pub cards_file: Option<PathBuf>,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CardMakerConfig {
    pub count: usize,
    pub title: String,
    pub output_base: String,
    pub layout: CardLayout,
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            pattern: "REGULAR".to_string(),
            review_count: 5,
            patterns_file: None,
            cards_file: None,
            log_file: PathBuf::from("logs/bingo-caller.log"),
        }
    }
}

impl Default for CardMakerConfig {
    fn default() -> Self {
        Self {
            count: 6,
            title: "Alvadore Community Chest Bingo Card".to_string(),
            output_base: "Alvadore_Community_Chest_Bingo_Cards".to_string(),
            layout: CardLayout::default(),
        }
    }
}

impl CallerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_str_content(&content)
    }

    fn from_str_content(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config_map = parse_config(content)?;
        let defaults = Self::default();

        let mode = match config_map.get("mode") {
            Some(m) => m.parse::<Mode>()?,
            None => defaults.mode,
        };

        let pattern = config_map.get("pattern").cloned().unwrap_or(defaults.pattern);

        let review_count = config_map
            .get("review_count")
            .and_then(|r| r.parse::<usize>().ok())
            .unwrap_or(defaults.review_count);

        let patterns_file = config_map.get("patterns_file").map(PathBuf::from);
        let cards_file = config_map.get("cards_file").map(PathBuf::from);
        let log_file = config_map
            .get("log_file")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        Ok(CallerConfig { mode, pattern, review_count, patterns_file, cards_file, log_file })
    }

    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path.unwrap_or(Path::new(CALLER_CONFIG_PATH));

        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded caller configuration from {}", config_path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!(
                    "Could not load caller config from {}: {}. Using defaults.",
                    config_path.display(),
                    e
                ));
                Self::default()
            }
        }
    }
}

impl CardMakerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_str_content(&content)
    }

    fn from_str_content(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config_map = parse_config(content)?;
        let defaults = Self::default();

        let count = config_map
            .get("count")
            .and_then(|c| c.parse::<usize>().ok())
            .unwrap_or(defaults.count);

        let title = config_map.get("title").cloned().unwrap_or(defaults.title);

        let output_base = config_map
            .get("output_base")
            .cloned()
            .unwrap_or(defaults.output_base);

        let layout = match config_map.get("ranges") {
            Some(ranges) => parse_ranges(ranges)?,
            None => defaults.layout,
        };

        Ok(CardMakerConfig { count, title, output_base, layout })
    }

    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path.unwrap_or(Path::new(CARDMAKER_CONFIG_PATH));

        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!(
                    "Loaded card maker configuration from {}",
                    config_path.display()
                ));
                config
            }
            Err(e) => {
                log_warning(&format!(
                    "Could not load card maker config from {}: {}. Using defaults.",
                    config_path.display(),
                    e
                ));
                Self::default()
            }
        }
    }
}

/// Parses `low-high` column ranges in B, I, N, G, O order, e.g.
/// `1-15, 16-30, 31-45, 46-60, 61-75`.
fn parse_ranges(value: &str) -> Result<CardLayout, Box<dyn std::error::Error>> {
    let ranges = value
        .split(',')
        .map(|range| -> Result<(Number, Number), Box<dyn std::error::Error>> {
            let (low, high) = range
                .trim()
                .split_once('-')
                .ok_or_else(|| format!("range '{}' is not low-high", range.trim()))?;
            Ok((low.trim().parse::<Number>()?, high.trim().parse::<Number>()?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let columns: [(Number, Number); GRIDSIZE] = ranges
        .try_into()
        .map_err(|r: Vec<_>| format!("expected {GRIDSIZE} column ranges, found {}", r.len()))?;
    let layout = CardLayout { columns };
    layout.validate()?;
    Ok(layout)
}

fn parse_config(content: &str) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse key = value pairs
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_string();
            let value = value.trim().to_string();
            config.insert(key, value);
        }
    }

    Ok(config)
}
