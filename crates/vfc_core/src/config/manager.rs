//! Settings file loading.
//!
//! The file is created with defaults on first run. On later runs keys the
//! user left out are merged back in with `toml_edit`, so existing values
//! and comments stay as written.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::Settings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to edit config: {0}")]
    Edit(#[from] toml_edit::TomlError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the settings file path and the settings read from it.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Manager for `config_path` holding default settings until loaded.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.logs_folder)
    }

    /// Read the settings file, writing a default one if it does not exist.
    ///
    /// Missing sections and keys are filled in on disk; unknown sections
    /// are removed.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            self.settings = Settings::default();
            return self.save();
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;

        let mut doc: DocumentMut = content.parse()?;
        if merge_defaults(&mut doc, &self.settings)? {
            tracing::debug!("Completing config {}", self.config_path.display());
            write_replacing(&self.config_path, &doc.to_string())?;
        }
        Ok(())
    }

    /// Write the current settings, replacing the file.
    pub fn save(&self) -> ConfigResult<()> {
        let content = format!(
            "# Video Format Converter settings\n\n{}",
            toml::to_string_pretty(&self.settings)?
        );
        write_replacing(&self.config_path, &content)?;
        Ok(())
    }
}

/// Bring `doc` in line with the layout of `settings`. Returns whether
/// anything changed.
fn merge_defaults(doc: &mut DocumentMut, settings: &Settings) -> ConfigResult<bool> {
    let full: DocumentMut = toml::to_string(settings)?.parse()?;
    let mut changed = false;

    let unknown: Vec<String> = doc
        .iter()
        .map(|(name, _)| name.to_string())
        .filter(|name| !full.contains_key(name))
        .collect();
    for name in unknown {
        tracing::warn!("Dropping unknown config section [{}]", name);
        doc.remove(&name);
        changed = true;
    }

    for (name, item) in full.iter() {
        let Some(section) = item.as_table() else {
            continue;
        };
        match doc.get_mut(name).and_then(Item::as_table_mut) {
            Some(existing) => {
                for (key, value) in section.iter() {
                    if !existing.contains_key(key) {
                        existing.insert(key, value.clone());
                        changed = true;
                    }
                }
            }
            None => {
                doc.insert(name, Item::Table(section.clone()));
                changed = true;
            }
        }
    }

    Ok(changed)
}

/// Write through a sibling temp file and rename it over `path`.
fn write_replacing(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp, path)
}
