//! noisegen core - random-noise audio fixtures.
//!
//! Writes an uncompressed AIFF-C container filled with random bytes and
//! transcodes it to MP3 with an external encoder (`ffmpeg` by default).
//!
//! # Example
//!
//! ```no_run
//! use noisegen_core::{AudioParams, Generator, PathSearch, SystemRunner};
//!
//! let generator = Generator::new(PathSearch::from_env(), SystemRunner);
//! let outcome = generator.generate("sample", &AudioParams::mono())?;
//! assert!(outcome.status.success());
//! # Ok::<(), noisegen_core::NoiseError>(())
//! ```

pub mod aiff;
pub mod encoder;
pub mod error;
pub mod generate;
pub mod locator;
pub mod params;

pub use aiff::{write_noise_container, ContainerSummary};
pub use encoder::{EncoderStatus, ProcessRunner, SystemRunner, Transcoder};
pub use error::{NoiseError, NoiseResult};
pub use generate::{
    container_name, normalize_output, GenerateConfig, GenerateOutcome, Generator,
};
pub use locator::{PathSearch, ToolLocator};
pub use params::AudioParams;
