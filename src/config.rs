use crate::style;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const VENDOR: &str = "dirpeek";
pub const APPLICATION: &str = "dirpeek";

/// Session state persisted between runs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Last browsed root directory, empty when none was chosen
    pub root_dir: String,
    /// Width of the tree pane relative to the whole window (0..1)
    pub splitter_left_fraction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            root_dir: String::new(),
            splitter_left_fraction: style::DEFAULT_SPLIT_FRACTION,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine settings directory")]
    NoLocation,
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Key-value settings file scoped by vendor and application name.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn new(vendor: &str, application: &str) -> Self {
        let path = directories::ProjectDirs::from("", vendor, application)
            .map(|dirs| dirs.config_dir().join("settings.toml"));
        Self { path }
    }

    /// Store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load settings, or return defaults if the file is missing or unreadable
    pub fn load(&self) -> Settings {
        let Some(path) = &self.path else {
            log::warn!("No settings location available, using defaults");
            return Settings::default();
        };
        if !path.exists() {
            return Settings::default();
        }

        let mut settings = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Settings>(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Settings::default()
            }
        };
        settings.splitter_left_fraction = style::clamp_split_fraction(settings.splitter_left_fraction);
        settings
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let path = self.path.as_ref().ok_or(SettingsError::NoLocation)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(settings)?;
        fs::write(path, contents).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }
}
