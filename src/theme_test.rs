use super::*;
use crate::fakes::FakeNode;
use crate::storage::{MemoryStore, StorageError};

// =============================================================
// Helpers
// =============================================================

fn controller(stored: Option<&str>) -> (FakeNode, ThemeController<FakeNode, MemoryStore>) {
    let root = FakeNode::new("html");
    let backend = match stored {
        Some(value) => MemoryStore::with_entry("theme", value),
        None => MemoryStore::new(),
    };
    let controller = ThemeController::new(root.clone(), backend, &ThemeConfig::default());
    (root, controller)
}

fn stored_value(controller: &ThemeController<FakeNode, MemoryStore>) -> Option<String> {
    controller.store().backend().get("theme").expect("memory store read")
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

// =============================================================
// ThemeMode
// =============================================================

#[test]
fn parse_accepts_only_exact_literals() {
    assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
    assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
    assert_eq!(ThemeMode::parse("DARK"), None);
    assert_eq!(ThemeMode::parse(""), None);
}

#[test]
fn as_str_matches_parse() {
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        assert_eq!(ThemeMode::parse(mode.as_str()), Some(mode));
    }
}

#[test]
fn serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&ThemeMode::Dark).expect("serialize"), "\"dark\"");
    let mode: ThemeMode = serde_json::from_str("\"light\"").expect("deserialize");
    assert_eq!(mode, ThemeMode::Light);
}

// =============================================================
// resolve_initial_mode
// =============================================================

#[test]
fn stored_dark_wins_over_system() {
    let stored = StoredPreference::Mode(ThemeMode::Dark);
    assert_eq!(resolve_initial_mode(&stored, false), ThemeMode::Dark);
    assert_eq!(resolve_initial_mode(&stored, true), ThemeMode::Dark);
}

#[test]
fn stored_light_wins_over_system() {
    let stored = StoredPreference::Mode(ThemeMode::Light);
    assert_eq!(resolve_initial_mode(&stored, false), ThemeMode::Light);
    assert_eq!(resolve_initial_mode(&stored, true), ThemeMode::Light);
}

#[test]
fn absent_follows_system() {
    assert_eq!(resolve_initial_mode(&StoredPreference::Absent, true), ThemeMode::Dark);
    assert_eq!(resolve_initial_mode(&StoredPreference::Absent, false), ThemeMode::Light);
}

#[test]
fn unrecognized_value_counts_as_present_light() {
    let stored = StoredPreference::Unrecognized("auto".into());
    assert_eq!(resolve_initial_mode(&stored, true), ThemeMode::Light);
}

// =============================================================
// ThemeController::initialize
// =============================================================

#[test]
fn initialize_applies_stored_dark() {
    let (root, theme) = controller(Some("dark"));
    assert_eq!(theme.initialize(false), Ok(ThemeMode::Dark));
    assert!(root.has_class("dark"));
}

#[test]
fn initialize_removes_stale_marker_for_light() {
    let (root, theme) = controller(Some("light"));
    root.set_class("dark", true).expect("set class");
    assert_eq!(theme.initialize(true), Ok(ThemeMode::Light));
    assert!(!root.has_class("dark"));
}

#[test]
fn initialize_uses_system_when_nothing_stored() {
    let (root, theme) = controller(None);
    assert_eq!(theme.initialize(true), Ok(ThemeMode::Dark));
    assert!(root.has_class("dark"));
}

#[test]
fn initialize_never_writes_storage() {
    let (_root, theme) = controller(None);
    theme.initialize(true).expect("initialize");
    assert_eq!(stored_value(&theme), None);
}

#[test]
fn initialize_reports_dom_failure() {
    let (root, theme) = controller(Some("dark"));
    root.reject_writes();
    assert!(matches!(theme.initialize(false), Err(DomError::Js(_))));
}

// =============================================================
// ThemeController::toggle
// =============================================================

#[test]
fn toggle_from_light_sets_dark_and_persists() {
    let (root, theme) = controller(None);
    theme.initialize(false).expect("initialize");
    assert_eq!(theme.toggle(), Ok(ThemeMode::Dark));
    assert!(root.has_class("dark"));
    assert_eq!(stored_value(&theme).as_deref(), Some("dark"));
}

#[test]
fn toggle_twice_restores_mode_and_storage() {
    let (root, theme) = controller(Some("light"));
    theme.initialize(true).expect("initialize");
    theme.toggle().expect("toggle");
    assert_eq!(theme.toggle(), Ok(ThemeMode::Light));
    assert!(!root.has_class("dark"));
    assert_eq!(stored_value(&theme).as_deref(), Some("light"));
}

#[test]
fn toggle_overwrites_unrecognized_value() {
    let (_root, theme) = controller(Some("sepia"));
    theme.initialize(false).expect("initialize");
    theme.toggle().expect("toggle");
    assert_eq!(stored_value(&theme).as_deref(), Some("dark"));
}

#[test]
fn current_reads_root_marker() {
    let (_root, theme) = controller(None);
    assert_eq!(theme.current(), ThemeMode::Light);
    theme.toggle().expect("toggle");
    assert_eq!(theme.current(), ThemeMode::Dark);
}

#[test]
fn toggle_still_flips_when_storage_rejects_write() {
    let root = FakeNode::new("html");
    let theme = ThemeController::new(root.clone(), ReadOnlyStore, &ThemeConfig::default());
    assert_eq!(theme.toggle(), Ok(ThemeMode::Dark));
    assert!(root.has_class("dark"));
}

#[test]
fn toggle_uses_configured_class_and_key() {
    let config = ThemeConfig {
        storage_key: "site-theme".into(),
        dark_class: "theme-dark".into(),
        ..ThemeConfig::default()
    };
    let root = FakeNode::new("html");
    let theme = ThemeController::new(root.clone(), MemoryStore::new(), &config);
    theme.toggle().expect("toggle");
    assert!(root.has_class("theme-dark"));
    assert!(!root.has_class("dark"));
    assert_eq!(theme.store().get(), StoredPreference::Mode(ThemeMode::Dark));
}
