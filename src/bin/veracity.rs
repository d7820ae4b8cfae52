//! Veracity CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use veracity::cli::args::*;
use veracity::cli::commands::*;

fn main() {
    let args = VeracityArgs::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    let default_level = config.log_level.parse().unwrap_or(LevelFilter::Warn);
    Builder::new()
        .filter_level(args.log_level(default_level))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match execute_command(&args, &config) {
        Ok(EXIT_SUCCESS) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILURE);
        }
    }
}
