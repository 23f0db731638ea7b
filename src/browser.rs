//! `web_sys` adapters and the page entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`start`] runs when the WASM module is instantiated. The theme is applied
//! right away so the first paint already has the right mode; the disclosure
//! and the `[data-theme-toggle]` controls are bound once the document has
//! been parsed. [`toggle_theme`] is installed on `window` as `toggleTheme`
//! for markup that calls it from inline handlers; it is also a regular module
//! export.
//!
//! Event closures are leaked with `Closure::forget`; they must live as long as
//! the page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::{CONFIG_ELEMENT_ID, ConfigCache, SiteConfig, ThemeConfig};
use crate::disclosure::{DisclosureController, DisclosureError};
use crate::dom::{Document, DomError, Node};
use crate::storage::{KeyValueStore, StorageError};
use crate::theme::ThemeController;

/// Name of the global function inline `onclick` handlers call.
pub const TOGGLE_THEME_GLOBAL: &str = "toggleTheme";

thread_local! {
    static CONFIG: ConfigCache = const { ConfigCache::new() };
}

fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn dom_error(value: JsValue) -> DomError {
    DomError::Js(js_message(&value))
}

// =============================================================
// Node / Document
// =============================================================

pub struct WebNode(web_sys::Element);

impl Node for WebNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.0.set_attribute(name, value).map_err(dom_error)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn toggle_class(&self, class: &str) -> Result<bool, DomError> {
        self.0.class_list().toggle(class).map_err(dom_error)
    }

    fn set_class(&self, class: &str, present: bool) -> Result<(), DomError> {
        let list = self.0.class_list();
        let result = if present { list.add_1(class) } else { list.remove_1(class) };
        result.map_err(dom_error)
    }

    fn query(&self, selector: &str) -> Result<Option<Self>, DomError> {
        self.0
            .query_selector(selector)
            .map(|found| found.map(WebNode))
            .map_err(|e| DomError::InvalidSelector(format!("{selector}: {}", js_message(&e))))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Self>, DomError> {
        let list = self
            .0
            .query_selector_all(selector)
            .map_err(|e| DomError::InvalidSelector(format!("{selector}: {}", js_message(&e))))?;
        let mut out = Vec::new();
        for i in 0..list.length() {
            if let Some(node) = list.get(i) {
                if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                    out.push(WebNode(element));
                }
            }
        }
        Ok(out)
    }
}

pub struct WebDocument(web_sys::Document);

impl Document for WebDocument {
    type Node = WebNode;

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        self.0.get_element_by_id(id).map(WebNode)
    }

    fn query(&self, selector: &str) -> Result<Option<WebNode>, DomError> {
        self.0
            .query_selector(selector)
            .map(|found| found.map(WebNode))
            .map_err(|e| DomError::InvalidSelector(format!("{selector}: {}", js_message(&e))))
    }

    fn root(&self) -> Option<WebNode> {
        self.0.document_element().map(WebNode)
    }
}

// =============================================================
// Storage
// =============================================================

/// `window.localStorage`, or nothing when the browser denies access.
pub struct LocalStorage(Option<web_sys::Storage>);

impl LocalStorage {
    pub fn open(window: &web_sys::Window) -> Self {
        match window.local_storage() {
            Ok(storage) => Self(storage),
            Err(e) => {
                log::warn!("localStorage unavailable: {}", js_message(&e));
                Self(None)
            }
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.0.as_ref().ok_or(StorageError::Unavailable)?;
        storage.get_item(key).map_err(|e| StorageError::Read(js_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.0.as_ref().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StorageError::Write(js_message(&e)))
    }
}

// =============================================================
// Entry points
// =============================================================

/// Module start: logging, config, initial theme, deferred bindings.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let document = WebDocument(document);

    install_toggle_global(&window);
    let config = site_config(&document);
    init_theme(&window, &document, &config.theme);
    when_parsed(&document, || {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document = WebDocument(document);
        // Re-read: the override blob may only exist now.
        let config = site_config(&document);
        bind_disclosure(&document, &config);
        bind_theme_toggles(&document, &config.theme);
    });
}

/// Flip the color mode and persist it. Returns the new mode name.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Option<String> {
    let window = web_sys::window()?;
    let document = WebDocument(window.document()?);
    let config = site_config(&document);
    let theme = ThemeController::new(document.root()?, LocalStorage::open(&window), &config.theme);
    match theme.toggle() {
        Ok(mode) => Some(mode.as_str().to_owned()),
        Err(e) => {
            log::error!("theme toggle failed: {e}");
            None
        }
    }
}

/// Current color mode name as shown on the root element.
#[wasm_bindgen(js_name = currentTheme)]
pub fn current_theme() -> Option<String> {
    let window = web_sys::window()?;
    let document = WebDocument(window.document()?);
    let config = site_config(&document);
    let theme = ThemeController::new(document.root()?, LocalStorage::open(&window), &config.theme);
    Some(theme.current().as_str().to_owned())
}

// =============================================================
// Setup steps
// =============================================================

/// Page config; pinned once the override blob has been read.
fn site_config(document: &WebDocument) -> SiteConfig {
    CONFIG.with(|cache| {
        cache.get_or_load(|| {
            document
                .0
                .get_element_by_id(CONFIG_ELEMENT_ID)
                .and_then(|el| el.text_content())
        })
    })
}

/// Expose [`toggle_theme`] as `window.toggleTheme`.
fn install_toggle_global(window: &web_sys::Window) {
    let cb = Closure::<dyn FnMut() -> Option<String>>::new(toggle_theme);
    match js_sys::Reflect::set(window, &JsValue::from_str(TOGGLE_THEME_GLOBAL), cb.as_ref()) {
        Ok(true) => cb.forget(),
        Ok(false) => log::error!("window.{TOGGLE_THEME_GLOBAL} is not writable"),
        Err(e) => log::error!("window.{TOGGLE_THEME_GLOBAL} not installed: {}", js_message(&e)),
    }
}

fn prefers_dark(window: &web_sys::Window, media_query: &str) -> bool {
    match window.match_media(media_query) {
        Ok(Some(list)) => list.matches(),
        Ok(None) => false,
        Err(e) => {
            log::warn!("media query {media_query} failed: {}", js_message(&e));
            false
        }
    }
}

fn init_theme(window: &web_sys::Window, document: &WebDocument, config: &ThemeConfig) {
    let Some(root) = document.root() else {
        log::warn!("no root element; theme not applied");
        return;
    };
    let theme = ThemeController::new(root, LocalStorage::open(window), config);
    if let Err(e) = theme.initialize(prefers_dark(window, &config.media_query)) {
        log::error!("theme initialization failed: {e}");
    }
}

fn bind_disclosure(document: &WebDocument, config: &SiteConfig) {
    let controller = match DisclosureController::bind(document, &config.disclosure) {
        Ok(controller) => controller,
        Err(DisclosureError::AlreadyBound) => {
            log::debug!("disclosure already bound; skipping");
            return;
        }
        Err(e) => {
            log::error!("mobile menu not bound: {e}. Check the navbar markup.");
            return;
        }
    };
    let target = controller.trigger().0.clone();
    on_click(&target, move || {
        if let Err(e) = controller.toggle() {
            log::error!("mobile menu toggle failed: {e}");
        }
    });
}

fn bind_theme_toggles(document: &WebDocument, config: &ThemeConfig) {
    let Some(root) = document.root() else {
        return;
    };
    let controls = match root.query_all(&config.toggle_selector) {
        Ok(controls) => controls,
        Err(e) => {
            log::warn!("theme toggles not bound: {e}");
            return;
        }
    };
    for control in controls {
        on_click(&control.0, || {
            if let Some(mode) = toggle_theme() {
                log::debug!("theme switched to {mode}");
            }
        });
    }
    log::debug!("theme toggles bound");
}

// =============================================================
// Event wiring
// =============================================================

fn on_click(target: &web_sys::Element, handler: impl FnMut() + 'static) {
    let cb = Closure::<dyn FnMut()>::new(handler);
    match target.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref()) {
        Ok(()) => cb.forget(),
        Err(e) => log::error!("click listener not attached: {}", js_message(&e)),
    }
}

/// Run `f` once the document has been parsed.
fn when_parsed(document: &WebDocument, f: impl FnOnce() + 'static) {
    if document.0.ready_state() != "loading" {
        f();
        return;
    }
    let cb = Closure::once(f);
    match document
        .0
        .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
    {
        Ok(()) => cb.forget(),
        Err(e) => log::error!("DOMContentLoaded listener not attached: {}", js_message(&e)),
    }
}
