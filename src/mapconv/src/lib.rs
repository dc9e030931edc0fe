//! # mapconv
//!
//! Decoder for compressed tile maps stored as three sibling files.
//!
//! Every map is split into:
//! - `<name>.idx` - dimensions (`width`, `height`, `depth`)
//! - `<name>.map` - tile ids, row-major, `width * height` per layer
//! - `<name>.obj` - placed objects as 5-word records `(id, x, y, prop, type)`
//!
//! Each file is a zlib stream that inflates to little-endian `i32` words.
//! The library turns one such triple into a [`MapDocument`], sorting object
//! records into seven categories (objects, units, doors, traps, stairs, medals,
//! interactables) and attaching the derived atlas tile and label for the
//! special ones.
//!
//! ## Example
//!
//! ```no_run
//! use std::fs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = mapconv::MapSource {
//!     idx: fs::read("town.idx")?,
//!     map: fs::read("town.map")?,
//!     obj: fs::read("town.obj")?,
//! };
//!
//! let options = mapconv::Options::default();
//! let converted = mapconv::convert(&source, &options)?;
//!
//! println!("{}x{} tiles", converted.document.width, converted.document.height);
//! println!("{} stairs", converted.document.stairs.len());
//! for diagnostic in &converted.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//!
//! // Serialize with the configured field names
//! let keyed = converted.document.keyed(&options.keys);
//! # let _ = keyed;
//! # Ok(())
//! # }
//! ```
//!
//! The binary format carries no tileset identifier, so the document's
//! `tileset` always comes from [`Options::tileset`].

pub mod classify;
pub mod document;
pub mod grid;
pub mod index;
pub mod inflate;
pub mod keys;
pub mod objects;
pub mod pipeline;

#[doc(inline)]
pub use classify::{
    classify, classify_record, Categories, Category, Classification, ClassifiedRecord,
};
#[doc(inline)]
pub use document::{assemble, KeyedDocument, MapDocument};
#[doc(inline)]
pub use index::Dimensions;
#[doc(inline)]
pub use inflate::{inflate, inflate_words, InflateError};
#[doc(inline)]
pub use keys::{KeyNames, RecordKeys};
#[doc(inline)]
pub use objects::{ObjectStream, RawRecord, RECORD_WORDS};
#[doc(inline)]
pub use pipeline::{convert, Converted, Diagnostic, MapSource, Options};

/// Errors that abort decoding of a single map
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Decompression failed: {0}")]
    Decompression(#[from] InflateError),

    #[error("Malformed index: {0}")]
    MalformedIndex(String),

    #[error("Malformed map: expected {expected} tiles, got {actual}")]
    MalformedMap { expected: usize, actual: usize },

    #[error("Map dimensions {width}x{height} are too large")]
    DimensionsOverflow { width: i32, height: i32 },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedIndex("expected at least 3 words, got 2".to_string());
        assert!(err.to_string().contains("Malformed index"));

        let err = Error::MalformedMap {
            expected: 80,
            actual: 79,
        };
        assert_eq!(err.to_string(), "Malformed map: expected 80 tiles, got 79");

        let err = Error::from(InflateError::Misaligned(7));
        assert!(err.to_string().starts_with("Decompression failed"));
    }
}
