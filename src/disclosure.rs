//! Mobile navigation disclosure.
//!
//! One trigger button shows and hides one panel and swaps a pair of icons.
//! `aria-expanded` on the trigger is the source of truth; the `hidden` class
//! on the panel and on each icon follows it.
//!
//! Icons are resolved by `data-disclosure-icon="closed"|"open"` markers when
//! the markup carries them, otherwise by document order inside the trigger
//! (first match closed, second match open). The closed icon is the one shown
//! while the panel is closed (the hamburger); the open icon replaces it while
//! the panel is open.

use std::fmt;

use crate::config::DisclosureConfig;
use crate::dom::{Document, DomError, Node};

#[cfg(test)]
#[path = "disclosure_test.rs"]
mod disclosure_test;

pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ICON_MARKER: &str = "data-disclosure-icon";
/// Set on a trigger once a controller owns it.
pub const BOUND_MARKER: &str = "data-disclosure-bound";

/// The four elements a disclosure needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Trigger,
    Panel,
    ClosedIcon,
    OpenIcon,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trigger => "trigger",
            Self::Panel => "panel",
            Self::ClosedIcon => "closed icon",
            Self::OpenIcon => "open icon",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisclosureError {
    #[error("disclosure {0} not found")]
    Missing(Part),
    #[error("disclosure trigger already bound")]
    AlreadyBound,
    #[error(transparent)]
    Dom(#[from] DomError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisclosureState {
    #[default]
    Closed,
    Open,
}

impl DisclosureState {
    /// Only the literal `"true"` means open; missing or other values are closed.
    pub fn from_attribute(value: Option<&str>) -> Self {
        if value == Some("true") { Self::Open } else { Self::Closed }
    }

    pub fn as_attribute(self) -> &'static str {
        match self {
            Self::Open => "true",
            Self::Closed => "false",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// Owns one bound trigger/panel/icon set.
pub struct DisclosureController<N> {
    trigger: N,
    panel: N,
    closed_icon: N,
    open_icon: N,
    hidden_class: String,
}

impl<N: Node> DisclosureController<N> {
    /// Locate the four elements and claim the trigger.
    ///
    /// On success `aria-expanded` is guaranteed to hold `"true"` or
    /// `"false"`; a missing or malformed value is rewritten as `"false"`.
    /// The `hidden` class on the panel and icons is then set to agree with
    /// that state, whatever the markup had.
    ///
    /// # Errors
    ///
    /// [`DisclosureError::Missing`] names the first element not found,
    /// [`DisclosureError::AlreadyBound`] means another controller owns the
    /// trigger, and [`DisclosureError::Dom`] wraps a failed lookup or write.
    /// Nothing is mutated on the missing/already-bound paths.
    pub fn bind<D>(document: &D, config: &DisclosureConfig) -> Result<Self, DisclosureError>
    where
        D: Document<Node = N>,
    {
        let trigger = document
            .query(&config.trigger_selector())?
            .ok_or(DisclosureError::Missing(Part::Trigger))?;
        if trigger.attribute(BOUND_MARKER).is_some() {
            return Err(DisclosureError::AlreadyBound);
        }
        let panel = document
            .element_by_id(&config.panel_id)
            .ok_or(DisclosureError::Missing(Part::Panel))?;
        let (closed_icon, open_icon) = resolve_icons(&trigger, &config.icon_selector)?;

        let current = trigger.attribute(ARIA_EXPANDED);
        let state = DisclosureState::from_attribute(current.as_deref());
        if current.as_deref() != Some(state.as_attribute()) {
            trigger.set_attribute(ARIA_EXPANDED, state.as_attribute())?;
        }
        trigger.set_attribute(BOUND_MARKER, "")?;

        let controller = Self {
            trigger,
            panel,
            closed_icon,
            open_icon,
            hidden_class: config.hidden_class.clone(),
        };
        controller.sync_classes(state)?;
        Ok(controller)
    }

    fn sync_classes(&self, state: DisclosureState) -> Result<(), DomError> {
        let open = state.is_open();
        self.panel.set_class(&self.hidden_class, !open)?;
        self.closed_icon.set_class(&self.hidden_class, open)?;
        self.open_icon.set_class(&self.hidden_class, !open)
    }

    pub fn state(&self) -> DisclosureState {
        DisclosureState::from_attribute(self.trigger.attribute(ARIA_EXPANDED).as_deref())
    }

    /// Flip open/closed in response to one activation of the trigger.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if an attribute or class write fails; writes
    /// already made are not rolled back.
    pub fn toggle(&self) -> Result<DisclosureState, DomError> {
        let next = self.state().toggled();
        self.trigger.set_attribute(ARIA_EXPANDED, next.as_attribute())?;
        self.panel.toggle_class(&self.hidden_class)?;
        self.closed_icon.toggle_class(&self.hidden_class)?;
        self.open_icon.toggle_class(&self.hidden_class)?;
        Ok(next)
    }

    pub fn trigger(&self) -> &N {
        &self.trigger
    }
}

fn resolve_icons<N: Node>(trigger: &N, icon_selector: &str) -> Result<(N, N), DisclosureError> {
    let closed = trigger.query(&format!("[{ICON_MARKER}=\"closed\"]"))?;
    let open = trigger.query(&format!("[{ICON_MARKER}=\"open\"]"))?;
    if closed.is_some() || open.is_some() {
        let closed = closed.ok_or(DisclosureError::Missing(Part::ClosedIcon))?;
        let open = open.ok_or(DisclosureError::Missing(Part::OpenIcon))?;
        return Ok((closed, open));
    }

    let mut icons = trigger.query_all(icon_selector)?.into_iter();
    let closed = icons.next().ok_or(DisclosureError::Missing(Part::ClosedIcon))?;
    let open = icons.next().ok_or(DisclosureError::Missing(Part::OpenIcon))?;
    Ok((closed, open))
}
