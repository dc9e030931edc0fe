//! Stream inflation and word decoding
//!
//! All three map files are deflate streams wrapped in a zlib header. Gzip
//! framing is accepted too since older exports used it. The inflated bytes are
//! a flat array of little-endian `i32` words.

use byteorder::{ByteOrder, LittleEndian};
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

/// Size of one decoded word in bytes
pub const WORD_SIZE: usize = 4;

/// Gzip member magic
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Errors from inflating a compressed buffer
#[derive(Debug, thiserror::Error)]
pub enum InflateError {
    #[error("Empty input")]
    Empty,

    #[error("Corrupt compressed stream: {0}")]
    Corrupt(#[from] std::io::Error),

    #[error("Inflated length {0} is not a multiple of 4 bytes")]
    Misaligned(usize),
}

/// Inflate a zlib (or gzip) compressed buffer
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>, InflateError> {
    if compressed.is_empty() {
        return Err(InflateError::Empty);
    }

    let mut raw = Vec::with_capacity(compressed.len() * 4);
    if compressed.starts_with(&GZIP_MAGIC) {
        GzDecoder::new(compressed).read_to_end(&mut raw)?;
    } else {
        ZlibDecoder::new(compressed).read_to_end(&mut raw)?;
    }

    Ok(raw)
}

/// Reinterpret inflated bytes as little-endian `i32` words
///
/// Trailing bytes that do not fill a whole word are rejected rather than
/// silently dropped.
pub fn words(raw: &[u8]) -> Result<Vec<i32>, InflateError> {
    if raw.len() % WORD_SIZE != 0 {
        return Err(InflateError::Misaligned(raw.len()));
    }

    let mut out = vec![0i32; raw.len() / WORD_SIZE];
    LittleEndian::read_i32_into(raw, &mut out);
    Ok(out)
}

/// Inflate a buffer and decode it as `i32` words
pub fn inflate_words(compressed: &[u8]) -> Result<Vec<i32>, InflateError> {
    let raw = inflate(compressed)?;
    let out = words(&raw)?;
    tracing::debug!(
        "Inflated {} -> {} bytes ({} words)",
        compressed.len(),
        raw.len(),
        out.len()
    );
    Ok(out)
}
