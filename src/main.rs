mod cli;
mod commands;
mod logging;

use crate::cli::args::Args;
use crate::commands::run_command;
use crate::logging::init_logging;
use clap::Parser;
use log::error;
use std::process::exit;

fn main() {
    let args = Args::parse();

    if let Err(error) = init_logging(args.log_config.as_deref()) {
        eprintln!("Failed to initialize logging: {error:#}");
        exit(1);
    }

    match run_command(args.command, args.json) {
        Ok(output) => println!("{output}"),
        Err(error) => {
            error!("{error:#}");
            eprintln!("Error: {error:#}");
            exit(1);
        }
    }
}
