//! Element and document capabilities the widgets depend on.
//!
//! DESIGN
//! ======
//! The widgets never touch `web_sys` directly. They are written against
//! [`Node`] and [`Document`], which the `browser` module implements for real
//! elements and the test fakes implement in memory. Methods take `&self`
//! because DOM handles are shared references into a tree the browser owns.

/// Failure reported by the hosting document while reading or mutating it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
    #[error("DOM operation failed: {0}")]
    Js(String),
}

/// A single element in the hosting document.
pub trait Node: Sized {
    /// Current value of attribute `name`, if set.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set attribute `name` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the document rejects the write.
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;

    fn has_class(&self, class: &str) -> bool;

    /// Flip `class` and return whether it is present afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the class list rejects the token.
    fn toggle_class(&self, class: &str) -> Result<bool, DomError>;

    /// Force `class` to be present (`true`) or absent (`false`).
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the class list rejects the token.
    fn set_class(&self, class: &str, present: bool) -> Result<(), DomError>;

    /// First descendant matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] for selectors the document
    /// cannot parse.
    fn query(&self, selector: &str) -> Result<Option<Self>, DomError>;

    /// All descendants matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] for selectors the document
    /// cannot parse.
    fn query_all(&self, selector: &str) -> Result<Vec<Self>, DomError>;
}

/// The hosting document.
pub trait Document {
    type Node: Node;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element in the document matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] for selectors the document
    /// cannot parse.
    fn query(&self, selector: &str) -> Result<Option<Self::Node>, DomError>;

    /// The root (`<html>`) element.
    fn root(&self) -> Option<Self::Node>;
}
