//! Handles the components write through instead of querying the page.

pub const SKELETON_CLASS: &str = "is-skeleton";
pub const ACTIVE_CLASS: &str = "is-active";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("{0} is unavailable")]
    Missing(&'static str),
    #[error("failed to {action}: {detail}")]
    Dom {
        action: &'static str,
        detail: String,
    },
}

impl SurfaceError {
    pub fn dom(action: &'static str, detail: impl Into<String>) -> Self {
        Self::Dom {
            action,
            detail: detail.into(),
        }
    }
}

/// A single display field such as the username or balance label.
pub trait TextSlot {
    fn set_text(&self, text: &str);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// A dropdown menu that ends with a divider followed by trailing actions.
pub trait MenuSlot {
    fn contains_entry(&self, marker_class: &str) -> bool;
    fn insert_before_divider(&self, entry: &MenuEntry) -> Result<(), SurfaceError>;
    /// Returns false when no entry carries `marker_class`.
    fn mark_active(&self, marker_class: &str) -> bool;
}

pub trait Navigator {
    fn redirect(&self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub href: String,
    pub icon: &'static str,
    pub marker_class: &'static str,
}
