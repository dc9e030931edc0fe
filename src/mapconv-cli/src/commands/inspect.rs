//! Inspect command handler

use anyhow::{Context, Result};
use mapconv::{Category, Converted, Options};
use std::path::Path;

use crate::scan::{read_source, split_map_path};

/// Convert one map and print what it contains
pub fn handle(map: &Path, options: &Options, json: bool) -> Result<()> {
    let (dir, name) = split_map_path(map)?;
    let source = read_source(&dir, &name)?;
    let converted =
        mapconv::convert(&source, options).with_context(|| format!("Failed to decode {}", name))?;

    if json {
        let keyed = converted.document.keyed(&options.keys);
        println!("{}", serde_json::to_string_pretty(&keyed)?);
        return Ok(());
    }

    print!("{}", summary(&name, &converted));
    Ok(())
}

fn summary(name: &str, converted: &Converted) -> String {
    let doc = &converted.document;
    let mut out = String::new();

    out.push_str(&format!("Map: {}\n", name));
    out.push_str(&format!(
        "Size: {}x{} (depth {}), {} tiles\n",
        doc.width,
        doc.height,
        doc.depth,
        doc.tiles.len()
    ));
    out.push_str(&format!("Tileset: {} (not stored in map files)\n", doc.tileset));

    for category in Category::ALL {
        out.push_str(&format!(
            "  {:<14} {}\n",
            category.name(),
            doc.category(category).len()
        ));
    }

    if !converted.diagnostics.is_empty() {
        out.push_str(&format!("Diagnostics ({}):\n", converted.diagnostics.len()));
        for diagnostic in &converted.diagnostics {
            out.push_str(&format!("  {}\n", diagnostic));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn compress(words: &[i32]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        for word in words {
            encoder.write_all(&word.to_le_bytes()).unwrap();
        }
        encoder.finish().unwrap()
    }

    #[test]
    fn test_summary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keep.idx"), compress(&[2, 2, 1])).unwrap();
        fs::write(dir.path().join("keep.map"), compress(&[1, 2, 3, 4])).unwrap();
        fs::write(
            dir.path().join("keep.obj"),
            compress(&[13, 0, 0, 0, 2, 20, 1, 1, 0, 2]),
        )
        .unwrap();

        let source = read_source(dir.path(), "keep").unwrap();
        let converted = mapconv::convert(&source, &Options::default()).unwrap();
        let text = summary("keep", &converted);

        assert!(text.contains("Size: 2x2 (depth 1), 4 tiles"));
        assert!(text.contains("Tileset: tilemap1"));
        assert!(text.contains("Diagnostics (1)"));
        assert!(text.contains("id=20"));

        assert!(handle(&dir.path().join("keep.obj"), &Options::default(), false).is_ok());
        assert!(handle(&dir.path().join("keep"), &Options::default(), true).is_ok());
        assert!(handle(&dir.path().join("gone"), &Options::default(), false).is_err());
    }
}
