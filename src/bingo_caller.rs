// src/bingo_caller.rs
// Terminal BINGO caller: draws balls automatically or records the balls the
// operator draws by hand, and watches a card sheet for winners.
//
// Interactive Controls:
// - SPACE/ENTER: Draw the next ball (auto mode)
// - digits + ENTER: Record a ball drawn by hand (manual mode)
// - m / a: Switch to manual / auto mode
// - n: Next pattern
// - u / r / o: Undo last ball / reset board / restore last game (asks y/n)
// - ESC: Exit

use std::path::PathBuf;

use clap::Parser;

use bingo::caller::Caller;
use bingo::card::CardLayout;
use bingo::cardfile::read_cards;
use bingo::config::CallerConfig;
use bingo::defs::Mode;
use bingo::game::Game;
use bingo::logging::{init_log_file, log_error, log_info, log_warning};
use bingo::pattern::PatternCatalog;
use bingo::terminal;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "BINGO Caller - Draw and announce balls for a live game")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Game mode: manual or auto
    #[arg(long)]
    mode: Option<Mode>,

    /// Pattern key to start with (e.g. REGULAR, T, CROSS, BLACKOUT)
    #[arg(long)]
    pattern: Option<String>,

    /// JSON file with extra patterns
    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Card sheet written by the card maker, checked for winners
    #[arg(long)]
    cards: Option<PathBuf>,

    /// Number of previous balls shown
    #[arg(long)]
    review: Option<usize>,

    /// Configuration file (default: conf/caller.conf)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn build_catalog(patterns_file: Option<&PathBuf>) -> PatternCatalog {
    let mut catalog = match PatternCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            log_error(&format!("Built-in patterns failed to load: {e}"));
            PatternCatalog::empty()
        }
    };

    if let Some(path) = patterns_file {
        match catalog.load_file(path) {
            Ok(errors) => {
                for e in errors {
                    log_warning(&format!("Skipping pattern: {e}"));
                }
                log_info(&format!("Loaded patterns from {}", path.display()));
            }
            Err(e) => log_error(&format!("Could not read patterns from {}: {e}", path.display())),
        }
    }
    catalog
}

fn main() {
    let args = Args::parse();

    let mut config = CallerConfig::load_or_default(args.config.as_deref());
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(pattern) = args.pattern {
        config.pattern = pattern;
    }
    if let Some(patterns) = args.patterns {
        config.patterns_file = Some(patterns);
    }
    if let Some(cards) = args.cards {
        config.cards_file = Some(cards);
    }
    if let Some(review) = args.review {
        config.review_count = review;
    }

    if let Err(e) = init_log_file(&config.log_file) {
        log_warning(&format!("Could not open log file {}: {e}", config.log_file.display()));
    }

    let catalog = build_catalog(config.patterns_file.as_ref());

    let cards = match &config.cards_file {
        Some(path) => match read_cards(path, &CardLayout::default()) {
            Ok(cards) => {
                log_info(&format!("Watching {} cards from {}", cards.len(), path.display()));
                cards
            }
            Err(e) => {
                log_error(&format!("Could not load cards from {}: {e}", path.display()));
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let mut game = Game::new();
    game.set_mode(config.mode);
    match catalog.require(&config.pattern) {
        Ok(pattern) => game.set_pattern(&pattern.key),
        Err(e) => log_warning(&format!("{e}, using {}", game.pattern_key())),
    }
    log_info(&format!("Created new game instance: {}", game.game_info()));

    let mut caller = Caller::new(game, catalog, cards, config.review_count);

    print!("\x1Bc");
    while caller.is_running() {
        terminal::show_on_terminal(&caller.game, &caller.screen());
        match terminal::read_input() {
            Ok(input) => caller.handle_input(input),
            Err(e) => {
                log_error(&format!("Terminal input failed: {e}"));
                break;
            }
        }
    }

    log_info(&format!("Game ended: {}", caller.game.game_info()));
    println!("Exiting the game.");
}
