//! Noise file generation pipeline.
//!
//! Locate the encoder, derive the output and container names, write the
//! noise container, then transcode it. Each step runs only if the previous
//! one succeeded.

use std::path::PathBuf;

use rand::Rng;

use crate::aiff::{write_noise_container, ContainerSummary};
use crate::encoder::{EncoderStatus, ProcessRunner, Transcoder, DEFAULT_ENCODER};
use crate::error::{NoiseError, NoiseResult};
use crate::locator::ToolLocator;
use crate::params::AudioParams;

/// Extension of the compressed output.
pub const COMPRESSED_EXT: &str = ".mp3";

/// Extension of the intermediate uncompressed container.
///
/// The file itself is AIFF-C (`FORM`/`AIFC`), since only that variant's
/// `COMM` chunk carries the `NONE` compression marker and description.
pub const CONTAINER_EXT: &str = ".aiff";

/// Configuration for the generation pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Encoder program name or path.
    pub encoder: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            encoder: DEFAULT_ENCODER.to_string(),
        }
    }
}

impl GenerateConfig {
    /// Sets the encoder program name or path.
    pub fn encoder(mut self, encoder: impl Into<String>) -> Self {
        self.encoder = encoder.into();
        self
    }
}

/// Artifacts of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    /// Compressed output requested from the encoder.
    pub output: PathBuf,
    /// Uncompressed container fed to the encoder.
    pub container: PathBuf,
    /// Sizes of the container as written.
    pub summary: ContainerSummary,
    /// Encoder exit status.
    pub status: EncoderStatus,
}

/// Appends the compressed extension unless `output` already ends with it.
pub fn normalize_output(output: &str) -> String {
    if output.ends_with(COMPRESSED_EXT) {
        output.to_string()
    } else {
        format!("{output}{COMPRESSED_EXT}")
    }
}

/// Derives the container name from a normalized output name.
///
/// Only the trailing extension is replaced, so directories or stems that
/// contain the extension text are left intact.
pub fn container_name(normalized: &str) -> String {
    match normalized.strip_suffix(COMPRESSED_EXT) {
        Some(stem) => format!("{stem}{CONTAINER_EXT}"),
        None => format!("{normalized}{CONTAINER_EXT}"),
    }
}

/// Runs the generation pipeline against injected collaborators.
pub struct Generator<L, P> {
    config: GenerateConfig,
    locator: L,
    runner: P,
}

impl<L: ToolLocator, P: ProcessRunner> Generator<L, P> {
    /// Creates a generator with default configuration.
    pub fn new(locator: L, runner: P) -> Self {
        Self::with_config(GenerateConfig::default(), locator, runner)
    }

    /// Creates a generator with the given configuration.
    pub fn with_config(config: GenerateConfig, locator: L, runner: P) -> Self {
        Self {
            config,
            locator,
            runner,
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Generates `output` (normalized to `.mp3`) from fresh random noise.
    pub fn generate(&self, output: &str, params: &AudioParams) -> NoiseResult<GenerateOutcome> {
        self.generate_with_rng(output, params, &mut rand::thread_rng())
    }

    /// Like [`Generator::generate`], drawing noise from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        output: &str,
        params: &AudioParams,
        rng: &mut R,
    ) -> NoiseResult<GenerateOutcome> {
        let encoder = self
            .locator
            .locate(&self.config.encoder)
            .ok_or_else(|| NoiseError::encoder_not_found(&self.config.encoder))?;

        params.validate()?;

        let output = normalize_output(output);
        let container = PathBuf::from(container_name(&output));
        let output = PathBuf::from(output);
        log::debug!(
            "container {} -> output {}",
            container.display(),
            output.display()
        );

        let summary = write_noise_container(&container, params, rng)?;

        let transcoder = Transcoder::new(encoder, &self.runner);
        let status = transcoder.transcode(&container, &output, params.bit_rate, params.frame_rate)?;

        Ok(GenerateOutcome {
            output,
            container,
            summary,
            status,
        })
    }
}
