//! noisegen - random MP3 file generator
//!
//! Writes random noise into an AIFF container and transcodes it to MP3 with
//! ffmpeg. Useful for throwaway audio fixtures.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use noisegen_cli::cli_args::Cli;
use noisegen_cli::commands;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match commands::generate::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", commands::generate::error_label(&e).red(), e);
            ExitCode::from(1)
        }
    }
}
