//! Audio parameters shared by the container writer and the encoder.

use crate::error::{NoiseError, NoiseResult};

/// Default sample width in bytes.
pub const DEFAULT_SAMPLE_WIDTH: u16 = 2;

/// Default frame rate in Hz.
pub const DEFAULT_FRAME_RATE: u32 = 44_100;

/// Default number of frames.
pub const DEFAULT_FRAME_COUNT: u32 = 8;

/// Default encoder bit rate in bits per second.
pub const DEFAULT_BIT_RATE: u32 = 128_000;

/// Sample geometry and encoder bit rate for one generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioParams {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Bytes per sample, per channel.
    pub sample_width: u16,
    /// Frames per second.
    pub frame_rate: u32,
    /// Total number of frames.
    pub frame_count: u32,
    /// Target encoder bit rate in bits per second.
    pub bit_rate: u32,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_width: DEFAULT_SAMPLE_WIDTH,
            frame_rate: DEFAULT_FRAME_RATE,
            frame_count: DEFAULT_FRAME_COUNT,
            bit_rate: DEFAULT_BIT_RATE,
        }
    }
}

impl AudioParams {
    /// Creates mono parameters with default geometry.
    pub fn mono() -> Self {
        Self::default()
    }

    /// Creates stereo parameters with default geometry.
    pub fn stereo() -> Self {
        Self {
            channels: 2,
            ..Self::default()
        }
    }

    /// Sets the sample width in bytes.
    pub fn sample_width(mut self, bytes: u16) -> Self {
        self.sample_width = bytes;
        self
    }

    /// Sets the frame rate in Hz.
    pub fn frame_rate(mut self, hz: u32) -> Self {
        self.frame_rate = hz;
        self
    }

    /// Sets the number of frames.
    pub fn frame_count(mut self, frames: u32) -> Self {
        self.frame_count = frames;
        self
    }

    /// Sets the bit rate in bits per second.
    pub fn bit_rate(mut self, bits_per_sec: u32) -> Self {
        self.bit_rate = bits_per_sec;
        self
    }

    /// Bytes per frame across all channels.
    pub fn block_align(&self) -> u64 {
        u64::from(self.channels) * u64::from(self.sample_width)
    }

    /// Number of payload bytes: `channels * sample_width * frame_count`.
    pub fn payload_len(&self) -> u64 {
        self.block_align() * u64::from(self.frame_count)
    }

    /// Sample size in bits as stored in the container header.
    pub fn sample_bits(&self) -> u32 {
        u32::from(self.sample_width) * 8
    }

    /// Checks that every field is positive and fits the AIFF header fields.
    pub fn validate(&self) -> NoiseResult<()> {
        if self.channels == 0 {
            return Err(NoiseError::invalid_params(
                "channel count must be greater than zero",
            ));
        }
        if self.channels > i16::MAX as u16 {
            return Err(NoiseError::invalid_params(format!(
                "channel count {} exceeds {}",
                self.channels,
                i16::MAX
            )));
        }
        if self.sample_width == 0 {
            return Err(NoiseError::invalid_params(
                "sample width must be greater than zero",
            ));
        }
        if self.sample_bits() > i16::MAX as u32 {
            return Err(NoiseError::invalid_params(format!(
                "sample width of {} bytes does not fit a 16-bit sample size",
                self.sample_width
            )));
        }
        if self.frame_rate == 0 {
            return Err(NoiseError::invalid_params(
                "frame rate must be greater than zero",
            ));
        }
        if self.frame_count == 0 {
            return Err(NoiseError::invalid_params(
                "frame count must be greater than zero",
            ));
        }
        if self.bit_rate == 0 {
            return Err(NoiseError::invalid_params(
                "bit rate must be greater than zero",
            ));
        }
        Ok(())
    }
}
