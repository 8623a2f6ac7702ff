//! CLI entry point for the tile catalog builder

use clap::Parser;
use tilecatalog::io::cli::{Cli, FileProcessor};

fn main() -> tilecatalog::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
