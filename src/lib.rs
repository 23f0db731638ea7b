//! # site-ui
//!
//! WASM behavior for the server-rendered site pages: the mobile navigation
//! disclosure toggle and the light/dark theme toggle.
//!
//! All decisions live in browser-free modules that operate on the [`dom`]
//! traits, so they can be exercised natively against in-memory fakes. The
//! `hydrate` feature adds [`browser`], which adapts `web_sys` to those traits
//! and wires the units to page events.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Element identifiers, class names, and the storage key |
//! | [`dom`] | Element/document capability traits and [`dom::DomError`] |
//! | [`disclosure`] | Trigger/panel/icon binding and the open/closed toggle |
//! | [`storage`] | Key/value backends and the theme [`storage::PreferenceStore`] |
//! | [`theme`] | Initial mode resolution and the dark-mode toggle |
//! | `browser` | `web_sys` adapters and the page entry point (`hydrate` only) |

pub mod config;
pub mod disclosure;
pub mod dom;
pub mod storage;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
#[path = "fakes_test.rs"]
pub(crate) mod fakes;
