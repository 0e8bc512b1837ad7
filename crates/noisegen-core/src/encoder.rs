//! External encoder invocation.
//!
//! The encoder is launched as a blocking child process. Its console output is
//! not inspected; the exit status is the only result.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{NoiseError, NoiseResult};

/// Default encoder program name.
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Output format forced on the encoder.
pub const OUTPUT_FORMAT: &str = "mp3";

/// Exit status of a finished encoder process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderStatus {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl EncoderStatus {
    /// A status with the given exit code.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Returns true if the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for EncoderStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for EncoderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Launches a program and waits for it to exit.
pub trait ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<EncoderStatus>;
}

/// Runs programs with [`std::process::Command`], inheriting stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<EncoderStatus> {
        let status = Command::new(program).args(args).status()?;
        Ok(status.into())
    }
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<EncoderStatus> {
        (**self).run(program, args)
    }
}

/// Builds the encoder argument list.
///
/// `-i <input> -f mp3 -ab <bit_rate> -ar <frame_rate> <output>`
pub fn encoder_args(input: &Path, output: &Path, bit_rate: u32, frame_rate: u32) -> Vec<OsString> {
    vec![
        OsString::from("-i"),
        input.as_os_str().to_owned(),
        OsString::from("-f"),
        OsString::from(OUTPUT_FORMAT),
        OsString::from("-ab"),
        OsString::from(bit_rate.to_string()),
        OsString::from("-ar"),
        OsString::from(frame_rate.to_string()),
        output.as_os_str().to_owned(),
    ]
}

/// Transcodes an uncompressed container with a located encoder.
pub struct Transcoder<R> {
    encoder: PathBuf,
    runner: R,
}

impl<R: ProcessRunner> Transcoder<R> {
    /// Creates a transcoder for the encoder at `encoder`.
    pub fn new(encoder: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            encoder: encoder.into(),
            runner,
        }
    }

    /// Runs the encoder and blocks until it exits.
    ///
    /// # Arguments
    /// * `input` - Uncompressed container to read
    /// * `output` - Compressed file to produce
    /// * `bit_rate` - Target bit rate in bits per second
    /// * `frame_rate` - Target frame rate in Hz
    ///
    /// # Returns
    /// The encoder's exit status, unmodified
    pub fn transcode(
        &self,
        input: &Path,
        output: &Path,
        bit_rate: u32,
        frame_rate: u32,
    ) -> NoiseResult<EncoderStatus> {
        let args = encoder_args(input, output, bit_rate, frame_rate);
        log::info!("running {} {:?}", self.encoder.display(), args);

        let status = self
            .runner
            .run(&self.encoder, &args)
            .map_err(|source| NoiseError::SpawnFailed {
                program: self.encoder.clone(),
                source,
            })?;

        log::debug!("{} finished with {}", self.encoder.display(), status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRunner {
        calls: RefCell<Vec<(PathBuf, Vec<OsString>)>>,
        exit_code: i32,
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, program: &Path, args: &[OsString]) -> io::Result<EncoderStatus> {
            self.calls
                .borrow_mut()
                .push((program.to_path_buf(), args.to_vec()));
            Ok(EncoderStatus::from_code(self.exit_code))
        }
    }

    struct FailingRunner;

    impl ProcessRunner for FailingRunner {
        fn run(&self, _program: &Path, _args: &[OsString]) -> io::Result<EncoderStatus> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_encoder_args() {
        let args = encoder_args(Path::new("a.aiff"), Path::new("a.mp3"), 128_000, 44_100);
        let args: Vec<_> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            vec!["-i", "a.aiff", "-f", "mp3", "-ab", "128000", "-ar", "44100", "a.mp3"]
        );
    }

    #[test]
    fn test_transcode_passes_arguments() {
        let runner = RecordingRunner::default();
        let transcoder = Transcoder::new("/usr/bin/ffmpeg", &runner);

        let status = transcoder
            .transcode(Path::new("x.aiff"), Path::new("x.mp3"), 64_000, 22_050)
            .unwrap();
        assert!(status.success());

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from("/usr/bin/ffmpeg"));
        assert_eq!(
            calls[0].1,
            encoder_args(Path::new("x.aiff"), Path::new("x.mp3"), 64_000, 22_050)
        );
    }

    #[test]
    fn test_transcode_forwards_failure_status() {
        let runner = RecordingRunner {
            exit_code: 69,
            ..Default::default()
        };
        let transcoder = Transcoder::new("ffmpeg", runner);

        let status = transcoder
            .transcode(Path::new("x.aiff"), Path::new("x.mp3"), 128_000, 44_100)
            .unwrap();
        assert_eq!(status, EncoderStatus::from_code(69));
        assert!(!status.success());
    }

    #[test]
    fn test_transcode_spawn_failure() {
        let transcoder = Transcoder::new("ffmpeg", FailingRunner);
        let err = transcoder
            .transcode(Path::new("x.aiff"), Path::new("x.mp3"), 128_000, 44_100)
            .unwrap_err();
        assert!(matches!(err, NoiseError::SpawnFailed { .. }));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(EncoderStatus::from_code(3).to_string(), "exit code 3");
        assert_eq!(EncoderStatus { code: None }.to_string(), "terminated by signal");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let status = SystemRunner
            .run(
                Path::new("sh"),
                &[OsString::from("-c"), OsString::from("exit 7")],
            )
            .unwrap();
        assert_eq!(status.code, Some(7));
    }
}
