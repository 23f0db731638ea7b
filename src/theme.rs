//! Light/dark color mode.
//!
//! The mode lives in two places: a marker class on the root element (what the
//! stylesheet reads) and the persisted preference (what the next page load
//! reads). Initialization only reads the preference; [`ThemeController::toggle`]
//! is the only writer.

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::dom::{DomError, Node};
use crate::storage::{KeyValueStore, PreferenceStore, StoredPreference};

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Exact match on the persisted literals; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

/// Pick the mode for a fresh page load.
///
/// A stored `"dark"` wins; with nothing stored the system preference
/// decides; any other stored value, `"light"` included, means light.
pub fn resolve_initial_mode(stored: &StoredPreference, system_prefers_dark: bool) -> ThemeMode {
    match stored {
        StoredPreference::Mode(ThemeMode::Dark) => ThemeMode::Dark,
        StoredPreference::Absent if system_prefers_dark => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

/// Applies and flips the color mode on one root element.
pub struct ThemeController<N, S> {
    root: N,
    store: PreferenceStore<S>,
    dark_class: String,
}

impl<N: Node, S: KeyValueStore> ThemeController<N, S> {
    pub fn new(root: N, backend: S, config: &ThemeConfig) -> Self {
        Self {
            root,
            store: PreferenceStore::new(backend, config.storage_key.clone()),
            dark_class: config.dark_class.clone(),
        }
    }

    pub fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    /// Mode currently shown, read from the root element.
    pub fn current(&self) -> ThemeMode {
        ThemeMode::from_dark(self.root.has_class(&self.dark_class))
    }

    /// Apply the mode derived from storage and the system preference.
    /// Never writes to storage.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the root element's class list rejects the
    /// marker class.
    pub fn initialize(&self, system_prefers_dark: bool) -> Result<ThemeMode, DomError> {
        let mode = resolve_initial_mode(&self.store.get(), system_prefers_dark);
        self.root.set_class(&self.dark_class, mode.is_dark())?;
        log::debug!("theme initialized: {}", mode.as_str());
        Ok(mode)
    }

    /// Flip the marker class and persist the resulting mode.
    ///
    /// A failed storage write is logged; the visible mode still changes.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the root element's class list rejects the
    /// marker class. Storage is not touched in that case.
    pub fn toggle(&self) -> Result<ThemeMode, DomError> {
        let mode = ThemeMode::from_dark(self.root.toggle_class(&self.dark_class)?);
        if let Err(e) = self.store.set(mode) {
            log::warn!("theme preference not saved: {e}");
        }
        Ok(mode)
    }
}
