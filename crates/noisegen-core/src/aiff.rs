//! AIFF-C container writer for random-noise payloads.
//!
//! The container is written uncompressed: a `COMM` chunk carrying the sample
//! geometry plus the `NONE` compression type, followed by an `SSND` chunk
//! holding the raw payload bytes. All integers are big-endian.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, WriteBytesExt};
use rand::Rng;

use crate::error::{NoiseError, NoiseResult};
use crate::params::AudioParams;

/// AIFC format version 1 timestamp, the only version defined.
pub const AIFC_VERSION_1: u32 = 0xA280_5140;

/// Compression type marker for uncompressed samples.
pub const COMPRESSION_NONE: &[u8; 4] = b"NONE";

/// Human-readable compression description stored in the `COMM` chunk.
pub const COMPRESSION_NAME: &str = "Uncompressed file";

/// Noise is generated and written in chunks of this many bytes.
pub const NOISE_CHUNK_LEN: usize = 64 * 1024;

/// Header fields describing the sample geometry of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub channels: u16,
    pub frame_count: u32,
    pub sample_bits: u16,
    pub frame_rate: u32,
    pub compression_type: [u8; 4],
    pub compression_name: String,
}

impl ContainerHeader {
    /// Builds an uncompressed header for the given parameters.
    pub fn uncompressed(params: &AudioParams) -> Self {
        Self {
            channels: params.channels,
            frame_count: params.frame_count,
            sample_bits: u16::try_from(params.sample_bits()).unwrap_or(u16::MAX),
            frame_rate: params.frame_rate,
            compression_type: *COMPRESSION_NONE,
            compression_name: COMPRESSION_NAME.to_string(),
        }
    }

    /// Size of the `COMM` chunk body in bytes.
    fn comm_len(&self) -> u32 {
        // channels + frames + bits + rate + compression type
        let fixed = 2 + 4 + 2 + 10 + 4;
        fixed + pstring_len(&self.compression_name) as u32
    }
}

/// What ended up on disk after a container was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub path: PathBuf,
    pub header_len: u64,
    pub payload_len: u64,
}

impl ContainerSummary {
    /// Total file size in bytes.
    pub fn file_len(&self) -> u64 {
        self.header_len + self.payload_len + (self.payload_len & 1)
    }
}

/// Number of bytes written before the first payload byte.
pub fn header_len(header: &ContainerHeader) -> u64 {
    // FORM + size + AIFC, FVER chunk, COMM chunk, SSND header + offset + block size
    12 + 12 + 8 + u64::from(header.comm_len()) + 16
}

/// Writes a complete AIFF-C container to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `header` - Sample geometry and compression fields
/// * `payload` - Raw sample bytes
pub fn encode_container<W: Write>(
    writer: &mut W,
    header: &ContainerHeader,
    payload: &[u8],
) -> io::Result<()> {
    let payload_len = payload.len() as u64;
    write_header(writer, header, payload_len)?;
    writer.write_all(payload)?;
    write_pad(writer, payload_len)
}

/// Writes every chunk header up to and including the `SSND` preamble.
///
/// Fails with `InvalidInput` if a field does not fit its AIFF type.
pub fn write_header<W: Write>(
    writer: &mut W,
    header: &ContainerHeader,
    payload_len: u64,
) -> io::Result<()> {
    let form_len = u32::try_from(header_len(header) - 8 + payload_len + (payload_len & 1))
        .map_err(|_| invalid_input("payload too large for AIFF"))?;
    let channels =
        i16::try_from(header.channels).map_err(|_| invalid_input("channel count exceeds 32767"))?;
    let sample_bits = i16::try_from(header.sample_bits)
        .map_err(|_| invalid_input("sample size exceeds 32767 bits"))?;

    writer.write_all(b"FORM")?;
    writer.write_u32::<BigEndian>(form_len)?;
    writer.write_all(b"AIFC")?;

    writer.write_all(b"FVER")?;
    writer.write_u32::<BigEndian>(4)?;
    writer.write_u32::<BigEndian>(AIFC_VERSION_1)?;

    writer.write_all(b"COMM")?;
    writer.write_u32::<BigEndian>(header.comm_len())?;
    writer.write_i16::<BigEndian>(channels)?;
    writer.write_u32::<BigEndian>(header.frame_count)?;
    writer.write_i16::<BigEndian>(sample_bits)?;
    writer.write_all(&extended_from_u32(header.frame_rate))?;
    writer.write_all(&header.compression_type)?;
    write_pstring(writer, &header.compression_name)?;

    // form_len fitting u32 bounds the SSND size as well
    writer.write_all(b"SSND")?;
    writer.write_u32::<BigEndian>(8 + payload_len as u32)?;
    writer.write_u32::<BigEndian>(0)?; // offset
    writer.write_u32::<BigEndian>(0)?; // block size
    Ok(())
}

/// Streams `len` random bytes, each uniform over `0..=255`, to `writer`.
pub fn write_noise<W: Write, R: Rng + ?Sized>(
    writer: &mut W,
    len: u64,
    rng: &mut R,
) -> io::Result<()> {
    let mut chunk = vec![0u8; NOISE_CHUNK_LEN.min(usize::try_from(len).unwrap_or(usize::MAX))];
    let mut remaining = len;
    while remaining > 0 {
        let n = chunk.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
        rng.fill(&mut chunk[..n]);
        writer.write_all(&chunk[..n])?;
        remaining -= n as u64;
    }
    Ok(())
}

fn write_pad<W: Write>(writer: &mut W, payload_len: u64) -> io::Result<()> {
    if payload_len & 1 == 1 {
        writer.write_u8(0)?;
    }
    Ok(())
}

fn invalid_input(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.to_string())
}

/// Writes an uncompressed container filled with random noise to `path`.
///
/// An existing file at `path` is overwritten. The payload is streamed, so
/// memory use does not grow with the frame count.
pub fn write_noise_container<R: Rng + ?Sized>(
    path: &Path,
    params: &AudioParams,
    rng: &mut R,
) -> NoiseResult<ContainerSummary> {
    params.validate()?;

    let payload_len = params.payload_len();
    let header = ContainerHeader::uncompressed(params);
    let header_bytes = header_len(&header);
    let form_len = header_bytes - 8 + payload_len + (payload_len & 1);
    if form_len > u64::from(u32::MAX) {
        return Err(NoiseError::ContainerTooLarge { bytes: payload_len });
    }

    let file = File::create(path).map_err(|e| NoiseError::write_container_failed(path, e))?;
    let mut writer = BufWriter::new(file);
    write_header(&mut writer, &header, payload_len)
        .and_then(|()| write_noise(&mut writer, payload_len, rng))
        .and_then(|()| write_pad(&mut writer, payload_len))
        .and_then(|()| writer.flush())
        .map_err(|e| NoiseError::write_container_failed(path, e))?;

    log::debug!(
        "wrote {} ({} header bytes, {} payload bytes)",
        path.display(),
        header_bytes,
        payload_len
    );

    Ok(ContainerSummary {
        path: path.to_path_buf(),
        header_len: header_bytes,
        payload_len,
    })
}

/// Converts an integer sample rate to an 80-bit IEEE 754 extended float.
pub fn extended_from_u32(value: u32) -> [u8; 10] {
    let mut out = [0u8; 10];
    if value == 0 {
        return out;
    }

    let msb = 31 - value.leading_zeros();
    let exponent = 16_383 + msb as u16;
    let mantissa = u64::from(value) << (63 - msb);

    out[..2].copy_from_slice(&exponent.to_be_bytes());
    out[2..].copy_from_slice(&mantissa.to_be_bytes());
    out
}

/// Pascal string length including the count byte and the even-length pad.
fn pstring_len(s: &str) -> usize {
    let len = 1 + s.len().min(255);
    len + (len & 1)
}

fn write_pstring<W: Write>(writer: &mut W, s: &str) -> io::Result<()> {
    let bytes = &s.as_bytes()[..s.len().min(255)];
    writer.write_u8(bytes.len() as u8)?;
    writer.write_all(bytes)?;
    if (1 + bytes.len()) % 2 == 1 {
        writer.write_u8(0)?;
    }
    Ok(())
}
