//! Single-map conversion pipeline
//!
//! [`convert`] is a pure function of the three compressed buffers and the
//! options. It holds no state between calls, so separate maps can be
//! converted concurrently.

use crate::classify::classify;
use crate::document::{assemble, MapDocument};
use crate::index::Dimensions;
use crate::inflate::inflate_words;
use crate::keys::KeyNames;
use crate::objects::{self, RawRecord};
use crate::{grid, Result};

/// Tileset used when none is configured
pub const DEFAULT_TILESET: &str = "tilemap1";

/// Verbosity used when none is configured
pub const DEFAULT_VERBOSITY: u8 = 3;

/// Compressed contents of one map's `.idx`, `.map` and `.obj` files
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    pub idx: Vec<u8>,
    pub map: Vec<u8>,
    pub obj: Vec<u8>,
}

/// Conversion settings, passed explicitly to every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Output field names
    pub keys: KeyNames,
    /// Tileset tag written to every document. Never read from the map files,
    /// which do not record one.
    pub tileset: String,
    /// Diagnostics are logged when this is above 0
    pub verbosity: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            keys: KeyNames::default(),
            tileset: DEFAULT_TILESET.to_string(),
            verbosity: DEFAULT_VERBOSITY,
        }
    }
}

/// Non-fatal finding while converting a map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Record matched no category and was left out of the document
    UnrecognizedRecord(RawRecord),
    /// Object stream ended with an incomplete record
    TrailingPartialRecord { words: usize },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnrecognizedRecord(raw) => write!(f, "Unknown object ({})", raw),
            Diagnostic::TrailingPartialRecord { words } => write!(
                f,
                "Object stream ends with {} stray word(s), ignored",
                words
            ),
        }
    }
}

/// Result of converting one map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub document: MapDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode, classify and assemble one map
pub fn convert(source: &MapSource, options: &Options) -> Result<Converted> {
    let dims = Dimensions::decode(&inflate_words(&source.idx)?)?;
    let tiles = grid::decode(&inflate_words(&source.map)?, &dims)?;
    let stream = objects::decode(&inflate_words(&source.obj)?);

    let mut categories = classify(stream.records);

    let mut diagnostics: Vec<Diagnostic> = categories
        .unrecognized
        .drain(..)
        .map(Diagnostic::UnrecognizedRecord)
        .collect();
    if stream.trailing_words > 0 {
        diagnostics.push(Diagnostic::TrailingPartialRecord {
            words: stream.trailing_words,
        });
    }

    if options.verbosity > 0 {
        for diagnostic in &diagnostics {
            tracing::warn!("{}", diagnostic);
        }
    }

    let document = assemble(dims, tiles, categories, options.tileset.as_str());
    Ok(Converted {
        document,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflate::tests::{compress_bytes, compress_words};
    use crate::Error;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn source(idx: &[i32], map: &[i32], obj: &[i32]) -> MapSource {
        MapSource {
            idx: compress_words(idx),
            map: compress_words(map),
            obj: compress_words(obj),
        }
    }

    #[test]
    fn test_convert_reference_map() {
        let tiles: Vec<i32> = (0..80).collect();
        let src = source(
            &[10, 8, 1],
            &tiles,
            &[5, 1, 1, 0, 2, 0, 0, 0, 0, 0, 6, 2, 2, 0, 2],
        );
        let converted = convert(&src, &Options::default()).unwrap();
        let doc = &converted.document;

        assert_eq!((doc.width, doc.height, doc.depth), (10, 8, 1));
        assert_eq!(doc.tiles, tiles);
        assert_eq!(doc.tileset, DEFAULT_TILESET);
        assert_eq!(doc.stairs.len(), 2);
        assert_eq!((doc.stairs[0].tile, doc.stairs[0].label), (Some(232), Some("up")));
        assert_eq!((doc.stairs[1].tile, doc.stairs[1].label), (Some(231), Some("down")));
        assert!(doc.objects.is_empty() && doc.units.is_empty() && doc.doors.is_empty());
        assert!(doc.traps.is_empty() && doc.medals.is_empty() && doc.interactables.is_empty());
        assert!(converted.diagnostics.is_empty());
    }

    #[test]
    fn test_convert_reports_diagnostics() {
        let src = source(
            &[1, 1, 1],
            &[0],
            &[99, 0, 0, 0, 2, 4, 0, 0, 0, 7, 10, 3, 3, 0, 2, 1, 2],
        );
        let options = Options {
            verbosity: 0,
            ..Options::default()
        };
        let converted = convert(&src, &options).unwrap();

        assert_eq!(converted.document.medals.len(), 1);
        assert_eq!(
            converted.diagnostics,
            vec![
                Diagnostic::UnrecognizedRecord(RawRecord {
                    id: 99,
                    x: 0,
                    y: 0,
                    prop: 0,
                    kind: 2
                }),
                Diagnostic::UnrecognizedRecord(RawRecord {
                    id: 4,
                    x: 0,
                    y: 0,
                    prop: 0,
                    kind: 7
                }),
                Diagnostic::TrailingPartialRecord { words: 2 },
            ]
        );
    }

    #[test]
    fn test_convert_uses_configured_tileset() {
        let src = source(&[1, 1, 1], &[3], &[]);
        let options = Options {
            tileset: "dungeon".to_string(),
            ..Options::default()
        };
        assert_eq!(convert(&src, &options).unwrap().document.tileset, "dungeon");
    }

    #[test]
    fn test_convert_structural_errors() {
        let bad_idx = source(&[10, 8], &[0; 80], &[]);
        assert!(matches!(
            convert(&bad_idx, &Options::default()),
            Err(Error::MalformedIndex(_))
        ));

        let short_map = source(&[10, 8, 1], &[0; 79], &[]);
        assert!(matches!(
            convert(&short_map, &Options::default()),
            Err(Error::MalformedMap {
                expected: 80,
                actual: 79
            })
        ));

        let mut corrupt = source(&[1, 1, 1], &[0], &[]);
        corrupt.obj = b"garbage".to_vec();
        assert!(matches!(
            convert(&corrupt, &Options::default()),
            Err(Error::Decompression(_))
        ));

        let mut misaligned = source(&[1, 1, 1], &[0], &[]);
        misaligned.map = compress_bytes(&[1, 0, 0, 0, 9]);
        assert!(matches!(
            convert(&misaligned, &Options::default()),
            Err(Error::Decompression(_))
        ));
    }

    /// Log sink shared with a test subscriber
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_during(verbosity: u8, src: &MapSource) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let options = Options {
            verbosity,
            ..Options::default()
        };
        let converted = tracing::subscriber::with_default(subscriber, || convert(src, &options));
        assert_eq!(converted.unwrap().diagnostics.len(), 1);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_diagnostics_logged_by_verbosity() {
        let src = source(&[1, 1, 1], &[0], &[99, 0, 0, 0, 2]);

        assert_eq!(logged_during(0, &src), "");

        let logged = logged_during(3, &src);
        assert!(logged.contains("WARN"), "{logged}");
        assert!(
            logged.contains("Unknown object (id=99 x=0 y=0 prop=0 type=2)"),
            "{logged}"
        );

        assert!(logged_during(1, &src).contains("Unknown object"));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::TrailingPartialRecord { words: 3 };
        assert!(d.to_string().contains("3 stray word"));
    }
}
