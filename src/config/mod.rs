//! Configuration for a select control
//!
//! Static settings that do not change over the life of a control: mode,
//! labels, texts, style class names and the stale-response policy.
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! is_multi = true
//! placeholder = "Search regions..."
//! label = "Region"
//! empty_text = "No region matches '{search}'"
//! stale_responses = "discard_stale"
//!
//! [classes]
//! option = "region-option"
//! selected_option = "region-option--selected"
//! ```

use crate::control::StalePolicy;
use crate::model::SelectionMode;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Opaque style class identifiers handed to renderers
///
/// The control never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Root container
    pub root: String,
    /// Text input / trigger
    pub input: String,
    /// Dropdown container
    pub dropdown: String,
    /// Every option row
    pub option: String,
    /// Added to rows of selected options
    pub selected_option: String,
    /// Loading content
    pub loading: String,
    /// Empty-state content
    pub empty: String,
}

impl ClassNames {
    /// Classes for an option row, joined with a space when selected
    #[must_use]
    pub fn option_classes(&self, selected: bool) -> String {
        if selected && !self.selected_option.is_empty() {
            if self.option.is_empty() {
                self.selected_option.clone()
            } else {
                format!("{} {}", self.option, self.selected_option)
            }
        } else {
            self.option.clone()
        }
    }
}

/// Settings of one select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Multi mode when true
    pub is_multi: bool,
    /// Ignore interaction
    pub disabled: bool,
    /// Trigger text when nothing is selected
    pub placeholder: String,
    /// Optional label above the control
    pub label: Option<String>,
    /// Empty-state text; `{search}` is replaced by the current search
    pub empty_text: String,
    /// Loading text
    pub loading_text: String,
    /// Style class identifiers
    pub classes: ClassNames,
    /// Treatment of responses to superseded requests
    pub stale_responses: StalePolicy,
    /// Delay between blur and closing, in milliseconds
    pub blur_close_delay_ms: u64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            is_multi: false,
            disabled: false,
            placeholder: String::new(),
            label: None,
            empty_text: "No data".to_string(),
            loading_text: "Loading...".to_string(),
            classes: ClassNames::default(),
            stale_responses: StalePolicy::default(),
            blur_close_delay_ms: 200,
        }
    }
}

impl SelectConfig {
    /// Get the default path of the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("remote-select").join("config.toml"))
    }

    /// Load settings from a TOML file; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Load settings from the default path, or defaults if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Parse settings from a TOML string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the string is not valid TOML for these settings.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save settings to a TOML file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the settings
    /// cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Selection mode implied by `is_multi`
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        SelectionMode::from_multi(self.is_multi)
    }

    /// Blur delay as a `Duration`
    #[must_use]
    pub const fn blur_close_delay(&self) -> Duration {
        Duration::from_millis(self.blur_close_delay_ms)
    }

    /// Empty-state text for a search
    #[must_use]
    pub fn empty_text_for(&self, search: &str) -> String {
        self.empty_text.replace("{search}", search)
    }

    /// Enable multi mode
    #[must_use]
    pub const fn with_multi(mut self, is_multi: bool) -> Self {
        self.is_multi = is_multi;
        self
    }

    /// Disable interaction
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set placeholder text
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set label text
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set empty-state text
    #[must_use]
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Set the stale-response policy
    #[must_use]
    pub const fn with_stale_responses(mut self, policy: StalePolicy) -> Self {
        self.stale_responses = policy;
        self
    }

    /// Set style class identifiers
    #[must_use]
    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }
}
