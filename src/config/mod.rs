//! Configuration module
//!
//! Lookup order:
//! 1. Explicit path (`--config` / `NOTEBOOK_CONFIG`)
//! 2. `./notebook.toml`
//! 3. Per-user config dir (`~/.config/notebook/config.toml` on Linux)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::editor::SystemEditor;
use crate::core::listing::{ListingStyle, DEFAULT_PREVIEW_CHARS, DEFAULT_TIME_FORMAT};
use crate::core::notebook::DEFAULT_EXTENSION;

/// Name of the config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "notebook.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotesConfig {
    /// Folder holding one file per note
    #[serde(default = "default_notes_dir")]
    pub dir: PathBuf,

    /// Recognized text extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Characters shown in the Content column
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: default_notes_dir(),
            extension: default_extension(),
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_notes_dir() -> PathBuf {
    PathBuf::from("notes")
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EditorConfig {
    /// Editor command line; the note path is appended
    #[serde(default)]
    pub command: Option<String>,

    /// Wait for the editor to exit instead of asking the user
    #[serde(default)]
    pub wait: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// `strftime` pattern for the Date Edited column
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Clear the terminal before drawing the home screen
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
            clear_screen: default_clear_screen(),
        }
    }
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_clear_screen() -> bool {
    true
}

impl Config {
    /// Load config from `explicit`, or from the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Per-user config file path
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "notebook")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reject values that would only fail later, mid-session
    pub fn validate(&self) -> Result<()> {
        let extension = self.notes.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\', '.']) {
            bail!("notes.extension must be a plain extension like \"txt\"");
        }

        if self.notes.preview_chars == 0 {
            bail!("notes.preview_chars must be at least 1");
        }

        if StrftimeItems::new(&self.display.time_format).any(|item| matches!(item, Item::Error)) {
            bail!(
                "display.time_format is not a valid strftime pattern: {}",
                self.display.time_format
            );
        }

        Ok(())
    }

    /// Columns settings for the notes table
    pub fn listing_style(&self) -> ListingStyle {
        ListingStyle {
            time_format: self.display.time_format.clone(),
            preview_chars: self.notes.preview_chars,
        }
    }

    /// Editor resolved from config and environment
    pub fn editor(&self) -> SystemEditor {
        SystemEditor::resolve(self.editor.command.as_deref(), self.editor.wait)
    }
}
