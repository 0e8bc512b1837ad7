//! Generate command implementation
//!
//! Writes a random-noise AIFF container next to the requested output and
//! transcodes it to MP3 with the configured encoder.

use anyhow::{anyhow, Result};
use colored::Colorize;
use std::process::ExitCode;

use noisegen_core::encoder::DEFAULT_ENCODER;
use noisegen_core::{
    AudioParams, EncoderStatus, GenerateConfig, Generator, NoiseError, PathSearch, SystemRunner,
};

use crate::cli_args::Cli;

/// Environment variable overriding the encoder program.
pub const ENCODER_ENV: &str = "NOISEGEN_FFMPEG";

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success, otherwise the encoder's exit code
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let params = audio_params(cli)?;
    let encoder = resolve_encoder(cli.ffmpeg.as_deref(), std::env::var(ENCODER_ENV).ok());
    log::debug!("using encoder {encoder}");

    let config = GenerateConfig::default().encoder(encoder);
    let generator = Generator::with_config(config, PathSearch::from_env(), SystemRunner);
    let outcome = generator.generate(&cli.output, &params)?;

    if !outcome.status.success() {
        log::warn!(
            "{} exited with {}",
            generator.config().encoder,
            outcome.status
        );
        return Ok(exit_code(outcome.status));
    }

    if !cli.quiet {
        println!(
            "{} {} (from {}, {} bytes)",
            "wrote".green(),
            outcome.output.display(),
            outcome.container.display(),
            outcome.summary.file_len()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Builds audio parameters from parsed arguments.
///
/// The bit rate is given in kb/s on the command line and in bits per second
/// to the encoder.
pub fn audio_params(cli: &Cli) -> Result<AudioParams> {
    let bit_rate = cli
        .bitrate
        .checked_mul(1000)
        .ok_or_else(|| anyhow!("bit rate of {} kb/s is too large", cli.bitrate))?;

    Ok(AudioParams {
        channels: cli.channels.channels(),
        sample_width: cli.sampwidth,
        frame_rate: cli.framerate,
        frame_count: cli.nframes,
        bit_rate,
    })
}

/// Picks the encoder program: flag, then environment, then the default.
pub fn resolve_encoder(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::to_string)
        .or(env.filter(|value| !value.is_empty()))
        .unwrap_or_else(|| DEFAULT_ENCODER.to_string())
}

/// Prefix for a failed run, e.g. `error[NOISEGEN_001]`.
///
/// Errors that did not come from the generator get a bare `error`.
pub fn error_label(err: &anyhow::Error) -> String {
    match err.downcast_ref::<NoiseError>() {
        Some(noise) => format!("error[{}]", noise.code()),
        None => "error".to_string(),
    }
}

/// Maps an encoder status onto this process's exit code.
pub fn exit_code(status: EncoderStatus) -> ExitCode {
    ExitCode::from(exit_byte(status))
}

/// Codes keep their low 8 bits; a non-zero code whose low byte is zero,
/// or termination by signal, becomes 1.
fn exit_byte(status: EncoderStatus) -> u8 {
    match status.code {
        Some(0) => 0,
        Some(code) => match (code & 0xff) as u8 {
            0 => 1,
            low => low,
        },
        None => 1,
    }
}
