//! Settings persistence
//!
//! The file is a TOML document with a single `[Settings]` table of strings:
//!
//! ```toml
//! [Settings]
//! StartHotkey = "s"
//! AlwaysOnTop = "no"
//! ```
//!
//! Key names are matched case-insensitively and written back canonically.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{SplitError, SplitResult},
    state::{SettingKey, Settings},
};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(rename = "Settings", default)]
    settings: BTreeMap<String, String>,
}

/// Owns the in-memory settings and the file they are persisted to
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Store backed by `path`. Nothing is read until `load()`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    /// Create the file with defaults if absent, then read every key from it
    pub fn open(path: impl Into<PathBuf>) -> SplitResult<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Config file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings as held in memory, including unsaved changes
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current in-memory value for `key`
    pub fn get(&self, key: SettingKey) -> &str {
        self.settings.get(key)
    }

    /// Update memory only; `save()` writes it out
    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) {
        let value = value.into();
        debug!("Setting {} = {:?} (unsaved)", key, value);
        self.settings.set(key, value);
    }

    /// Load settings from disk.
    ///
    /// Defaults are only written when the file does not exist yet. Keys missing
    /// from an existing file are an error.
    pub fn load(&mut self) -> SplitResult<()> {
        if !self.path.exists() {
            info!("No config at {}, writing defaults", self.path.display());
            write_document(&self.path, &Settings::defaults())?;
        }

        let content = fs::read_to_string(&self.path).map_err(|e| SplitError::io(&self.path, e))?;
        let document: ConfigDocument = toml::from_str(&content)?;
        self.settings = Settings::from_values(document.settings)?;
        info!("Loaded settings from {}", self.path.display());
        Ok(())
    }

    /// Overwrite the file with the full in-memory mapping
    pub fn save(&self) -> SplitResult<()> {
        write_document(&self.path, &self.settings)?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Write through a temp file and rename so a failed write never truncates the config
fn write_document(path: &Path, settings: &Settings) -> SplitResult<()> {
    let document = ConfigDocument {
        settings: settings.values().clone(),
    };
    let content = toml::to_string_pretty(&document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SplitError::io(parent, e))?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| SplitError::io(&temp_path, e))?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| SplitError::io(&temp_path, e))?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| SplitError::io(path, e))?;
    Ok(())
}
