//! Identifiers shared between the markup and the widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Templates are rendered elsewhere; this module records the element ids,
//! class names, and storage key they agree on. Pages may override any of
//! them with a JSON blob in `<script type="application/json"
//! id="site-ui-config">`; missing fields keep their defaults.

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Element id of the optional JSON override blob.
pub const CONFIG_ELEMENT_ID: &str = "site-ui-config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field `{0}` must not be empty")]
    Empty(&'static str),
    #[error("config field `{field}` contains a character not allowed in an element id: {value:?}")]
    InvalidId { field: &'static str, value: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub disclosure: DisclosureConfig,
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Parse an override blob and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Empty`] when an identifier is blank.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject blank identifiers; they would produce selectors matching
    /// nothing or class tokens the browser refuses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] naming the first blank field, or
    /// [`ConfigError::InvalidId`] when `disclosure.panel_id` cannot be placed
    /// inside a quoted attribute selector.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("disclosure.panel_id", &self.disclosure.panel_id),
            ("disclosure.hidden_class", &self.disclosure.hidden_class),
            ("disclosure.icon_selector", &self.disclosure.icon_selector),
            ("theme.storage_key", &self.theme.storage_key),
            ("theme.dark_class", &self.theme.dark_class),
            ("theme.media_query", &self.theme.media_query),
            ("theme.toggle_selector", &self.theme.toggle_selector),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Empty(*name));
        }
        let panel_id = &self.disclosure.panel_id;
        if panel_id.chars().any(|c| c == '"' || c == '\\' || c.is_whitespace() || c.is_control()) {
            return Err(ConfigError::InvalidId {
                field: "disclosure.panel_id",
                value: panel_id.clone(),
            });
        }
        Ok(())
    }
}

/// Page config that is only pinned once the override blob has been seen.
///
/// Before the blob is parsed the defaults are served uncached, so a later
/// lookup still picks the blob up.
#[derive(Debug, Default)]
pub struct ConfigCache {
    loaded: OnceCell<SiteConfig>,
}

impl ConfigCache {
    pub const fn new() -> Self {
        Self { loaded: OnceCell::new() }
    }

    /// Return the pinned config, or read the blob via `read_blob`.
    ///
    /// `read_blob` yields `None` while the blob element does not exist. A
    /// malformed blob is logged and pins the defaults.
    pub fn get_or_load(&self, read_blob: impl FnOnce() -> Option<String>) -> SiteConfig {
        if let Some(config) = self.loaded.get() {
            return config.clone();
        }
        let Some(raw) = read_blob() else {
            return SiteConfig::default();
        };
        let config = match SiteConfig::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
                SiteConfig::default()
            }
        };
        self.loaded.get_or_init(|| config).clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }
}

/// Mobile navigation disclosure settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    /// Id of the panel; the trigger names it in `aria-controls`.
    pub panel_id: String,
    pub hidden_class: String,
    /// Icons inside the trigger used when no `data-disclosure-icon` markers
    /// are present: first match is the closed icon, second the open icon.
    pub icon_selector: String,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            panel_id: "mobile-menu".into(),
            hidden_class: "hidden".into(),
            icon_selector: "svg".into(),
        }
    }
}

impl DisclosureConfig {
    pub fn trigger_selector(&self) -> String {
        format!("button[aria-controls=\"{}\"]", self.panel_id)
    }
}

/// Color mode settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    /// Marker class on the root element while dark mode is active.
    pub dark_class: String,
    pub media_query: String,
    /// Controls that flip the mode when clicked.
    pub toggle_selector: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            dark_class: "dark".into(),
            media_query: "(prefers-color-scheme: dark)".into(),
            toggle_selector: "[data-theme-toggle]".into(),
        }
    }
}
