//! Tile grid decoding (`.map`)

use crate::index::Dimensions;
use crate::{Error, Result};

/// Take the first `width * height` tile ids in source order
///
/// Words beyond the first layer (additional depth layers) are ignored.
pub fn decode(words: &[i32], dims: &Dimensions) -> Result<Vec<i32>> {
    let expected = dims.cell_count()?;
    let tiles = words.get(..expected).ok_or(Error::MalformedMap {
        expected,
        actual: words.len(),
    })?;

    tracing::debug!(
        "Decoded {}x{} tile grid ({} extra words)",
        dims.width,
        dims.height,
        words.len() - expected
    );
    Ok(tiles.to_vec())
}
