//! Input folder scanning
//!
//! A map is usable only when all three sibling files exist. Base names missing
//! any of them are reported and skipped before decoding starts.

use anyhow::{bail, Context, Result};
use mapconv::MapSource;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling file extensions, in `idx`, `map`, `obj` order
pub const EXTENSIONS: [&str; 3] = ["idx", "map", "obj"];

/// Base names found in a folder
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Scan {
    /// Base names with all three sibling files
    pub valid: Vec<String>,
    /// Base names missing at least one sibling
    pub invalid: Vec<String>,
}

impl Scan {
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }
}

/// Collect base names from the files directly inside `dir`
pub fn scan_dir(dir: &Path) -> Result<Scan> {
    if !dir.is_dir() {
        bail!("Input folder {} does not exist", dir.display());
    }

    let mut names = BTreeSet::new();
    let mut files = BTreeSet::new();

    for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(stem) = entry.path().file_stem() {
            names.insert(stem.to_string_lossy().into_owned());
        }
        files.insert(file_name);
    }

    let mut scan = Scan::default();
    for name in names {
        let complete = EXTENSIONS
            .iter()
            .all(|ext| files.contains(&format!("{}.{}", name, ext)));
        if complete {
            scan.valid.push(name);
        } else {
            scan.invalid.push(name);
        }
    }

    Ok(scan)
}

/// Paths of the three sibling files for `base`
pub fn sibling_paths(dir: &Path, base: &str) -> [PathBuf; 3] {
    EXTENSIONS.map(|ext| dir.join(format!("{}.{}", base, ext)))
}

/// Read the compressed contents of one map
pub fn read_source(dir: &Path, base: &str) -> Result<MapSource> {
    let [idx, map, obj] = sibling_paths(dir, base).map(|path| {
        fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    });

    Ok(MapSource {
        idx: idx?,
        map: map?,
        obj: obj?,
    })
}

/// Split a user-supplied map path into folder and base name
///
/// Accepts `dir/town`, `dir/town.idx`, `dir/town.map` or `dir/town.obj`.
pub fn split_map_path(path: &Path) -> Result<(PathBuf, String)> {
    let has_sibling_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e));

    let name = if has_sibling_ext {
        path.file_stem()
    } else {
        path.file_name()
    }
    .with_context(|| format!("No map name in {}", path.display()))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    Ok((dir.to_path_buf(), name.to_string_lossy().into_owned()))
}
