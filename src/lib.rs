// lib.rs
// Library modules for the BINGO caller and card maker

pub mod defs;
pub mod error;
pub mod logging;
pub mod config;
pub mod pouch;
pub mod board;
pub mod pattern;
pub mod card;
pub mod cardfile;
pub mod marking;
pub mod game;
pub mod caller;
pub mod terminal;
