// src/card_maker.rs
// Prints a batch of unique BINGO cards and saves them to the next free
// numbered text file.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use bingo::card::CardGenerator;
use bingo::cardfile::{format_cards, next_available_path, write_cards};
use bingo::config::CardMakerConfig;
use bingo::error::BingoResult;
use bingo::logging::{log_error, log_info};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "BINGO Card Maker - Generate unique printable cards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Number of cards to generate
    #[arg(short, long)]
    count: Option<usize>,

    /// Title printed above every card
    #[arg(long)]
    title: Option<String>,

    /// Output file name without the _<n>.txt suffix
    #[arg(long)]
    output_base: Option<String>,

    /// Seed for a reproducible batch
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file (default: conf/cardmaker.conf)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(args: Args) -> BingoResult<PathBuf> {
    let mut config = CardMakerConfig::load_or_default(args.config.as_deref());
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(title) = args.title {
        config.title = title;
    }
    if let Some(output_base) = args.output_base {
        config.output_base = output_base;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let generator = CardGenerator::with_layout(config.layout)?;
    let cards = generator.generate_unique_batch(config.count, &mut rng)?;
    log_info(&format!("Generated {} unique cards", cards.len()));

    print!("{}", format_cards(&config.title, &cards));

    let path = next_available_path(&config.output_base);
    write_cards(&path, &config.title, &cards)?;
    Ok(path)
}

fn main() {
    let args = Args::parse();
    match run(args) {
        Ok(path) => println!("\nBingo cards saved as '{}'", path.display()),
        Err(e) => {
            log_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
