//! Settings management for the mapconv CLI
//!
//! Settings use the same shape as the converter's legacy `config.json`
//! (`folders`, `keyNames`, `defaultTileset`, `verbosity`), so such a file can
//! be used as-is. TOML is the default format for newly written settings.

use anyhow::{bail, Context, Result};
use mapconv::{KeyNames, Options};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file picked up from the working directory
pub const LOCAL_SETTINGS: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Folders {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for Folders {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./input/"),
            output: PathBuf::from("./output/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub default_tileset: String,
    pub verbosity: u8,
    pub folders: Folders,
    pub key_names: KeyNames,
    /// Keys this tool does not use, written back unchanged on save
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        let options = Options::default();
        Self {
            default_tileset: options.tileset,
            verbosity: options.verbosity,
            folders: Folders::default(),
            key_names: options.keys,
            extra: BTreeMap::new(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

impl Settings {
    /// Get the path to the user settings file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("mapconv");

        Ok(config_dir.join("config.toml"))
    }

    /// Pick the settings file to use
    ///
    /// An explicit path always wins. Otherwise `./config.json` is used when it
    /// exists, then the user settings file.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = PathBuf::from(LOCAL_SETTINGS);
        if local.is_file() {
            return Ok(local);
        }

        Self::config_path()
    }

    /// Load settings from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Settings = match Format::of(path) {
            Format::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings file {}", path.display()))?,
            Format::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse settings file {}", path.display()))?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = match Format::of(path) {
            Format::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize settings")?
            }
            Format::Toml => toml::to_string_pretty(self).context("Failed to serialize settings")?,
        };

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }

    /// Reject key names that would collide in the output document
    pub fn validate(&self) -> Result<()> {
        let conflicts = self.key_names.conflicts();
        if !conflicts.is_empty() {
            bail!(
                "Duplicate output key name(s) in keyNames: {}",
                conflicts.join(", ")
            );
        }
        Ok(())
    }

    /// Conversion options for the library, with an optional tileset override
    pub fn options(&self, tileset: Option<&str>) -> Options {
        Options {
            keys: self.key_names.clone(),
            tileset: tileset.unwrap_or(&self.default_tileset).to_string(),
            verbosity: self.verbosity,
        }
    }
}
