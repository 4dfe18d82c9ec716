//! Cotafrete - freight quote management for a transport brokerage
//!
//! A CLI tool that records carriers, compares freight quotes against the
//! invoice value and keeps a searchable history with Excel export.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
