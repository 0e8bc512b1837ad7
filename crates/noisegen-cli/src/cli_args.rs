//! CLI argument definitions for the noisegen command-line interface.

use clap::{Parser, ValueEnum};

/// Channel layout of the generated noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelMode {
    Mono,
    Stereo,
}

impl ChannelMode {
    /// Number of channels for this mode.
    pub fn channels(self) -> u16 {
        match self {
            ChannelMode::Mono => 1,
            ChannelMode::Stereo => 2,
        }
    }
}

/// Random MP3 file generator
#[derive(Debug, Parser)]
#[command(name = "noisegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output file (".mp3" is appended if missing)
    #[arg(value_name = "OUTPUT.MP3")]
    pub output: String,

    /// Number of channels
    #[arg(short, long, value_enum, default_value_t = ChannelMode::Mono)]
    pub channels: ChannelMode,

    /// Number of bytes of each sample
    #[arg(short = 'w', long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..))]
    pub sampwidth: u16,

    /// Sampling frequency in frames per second
    #[arg(short = 'r', long, default_value_t = 44_100, value_parser = clap::value_parser!(u32).range(1..))]
    pub framerate: u32,

    /// Number of frames
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
    pub nframes: u32,

    /// Bit rate used in mp3 encoding (in kb/s)
    #[arg(short, long, default_value_t = 128, value_parser = clap::value_parser!(u32).range(1..))]
    pub bitrate: u32,

    /// Encoder program name or path [env: NOISEGEN_FFMPEG]
    #[arg(long, value_name = "PROGRAM")]
    pub ffmpeg: Option<String>,

    /// Do not print the summary on success
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["noisegen", "out"]).unwrap();
        assert_eq!(cli.output, "out");
        assert_eq!(cli.channels, ChannelMode::Mono);
        assert_eq!(cli.sampwidth, 2);
        assert_eq!(cli.framerate, 44_100);
        assert_eq!(cli.nframes, 8);
        assert_eq!(cli.bitrate, 128);
        assert_eq!(cli.ffmpeg, None);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "noisegen",
            "-c",
            "stereo",
            "-w",
            "3",
            "-r",
            "22050",
            "-n",
            "100",
            "-b",
            "320",
            "--ffmpeg",
            "/opt/bin/ffmpeg",
            "--quiet",
            "noise.mp3",
        ])
        .unwrap();
        assert_eq!(cli.channels, ChannelMode::Stereo);
        assert_eq!(cli.channels.channels(), 2);
        assert_eq!(cli.sampwidth, 3);
        assert_eq!(cli.framerate, 22_050);
        assert_eq!(cli.nframes, 100);
        assert_eq!(cli.bitrate, 320);
        assert_eq!(cli.ffmpeg.as_deref(), Some("/opt/bin/ffmpeg"));
        assert!(cli.quiet);
        assert_eq!(cli.output, "noise.mp3");
    }

    #[test]
    fn test_cli_requires_exactly_one_output() {
        assert!(Cli::try_parse_from(["noisegen"]).is_err());
        assert!(Cli::try_parse_from(["noisegen", "a", "b"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_channel_mode() {
        assert!(Cli::try_parse_from(["noisegen", "-c", "surround", "out"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_values() {
        for flag in ["-w", "-r", "-n", "-b"] {
            assert!(
                Cli::try_parse_from(["noisegen", flag, "0", "out"]).is_err(),
                "{flag} 0 should be rejected"
            );
        }
    }
}
