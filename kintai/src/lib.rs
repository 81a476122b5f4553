pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod labels;
pub mod store;
pub mod time_utils;
pub mod token;

#[cfg(test)]
mod testing;

pub use commands::{run, Context};
