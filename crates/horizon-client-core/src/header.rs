//! Shared navigation header: layout model and mount logic.
//!
//! The host turns a [`HeaderLayout`] into page elements and hands back the
//! handles other components write through. Which user-menu entry is active
//! comes from [`HeaderConfig`] at mount time.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::profile::{ProfileFields, SELLER_ENTRY_CLASS};
use crate::surface::{MenuSlot, SurfaceError, TextSlot};

pub const LOGOUT_ENTRY_CLASS: &str = "logout-button";
pub const HEADER_TITLE: &str = "HORIZON GLOW";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UserMenuItem {
    Purchases,
    Profile,
    Topup,
    Support,
    Seller,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user menu item {0:?}")]
pub struct UnknownMenuItem(pub String);

impl TryFrom<String> for UserMenuItem {
    type Error = UnknownMenuItem;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or(UnknownMenuItem(raw))
    }
}

impl UserMenuItem {
    #[must_use]
    pub const fn marker_class(self) -> &'static str {
        match self {
            Self::Purchases => "purchases-button",
            Self::Profile => "edit-button",
            Self::Topup => "topup-button",
            Self::Support => "support-button",
            Self::Seller => SELLER_ENTRY_CLASS,
        }
    }

    /// Accepts the item name or the selector form older pages used
    /// (`.topup-button`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let name = normalized
            .trim_start_matches('.')
            .trim_end_matches("-button");
        match name {
            "purchases" => Some(Self::Purchases),
            "profile" | "edit" => Some(Self::Profile),
            "topup" => Some(Self::Topup),
            "support" => Some(Self::Support),
            "seller" => Some(Self::Seller),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderConfig {
    pub active_item: Option<UserMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Path(&'static str),
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub icon: &'static str,
    pub target: NavTarget,
    pub marker_class: Option<&'static str>,
}

impl NavLink {
    const fn path(label: &'static str, icon: &'static str, path: &'static str) -> Self {
        Self {
            label,
            icon,
            target: NavTarget::Path(path),
            marker_class: None,
        }
    }

    const fn user_item(
        label: &'static str,
        icon: &'static str,
        path: &'static str,
        item: UserMenuItem,
    ) -> Self {
        Self {
            label,
            icon,
            target: NavTarget::Path(path),
            marker_class: Some(item.marker_class()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub title: &'static str,
    pub home: NavLink,
    pub site_menu: Vec<NavLink>,
    pub user_menu: Vec<NavLink>,
    /// Entries after the divider.
    pub trailing: Vec<NavLink>,
    pub username_placeholder: &'static str,
    pub balance_placeholder: &'static str,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            title: HEADER_TITLE,
            home: NavLink::path("Home", "fa-house", "/"),
            site_menu: vec![
                NavLink::path("Rules", "fa-book", "/rules"),
                NavLink::path("News", "fa-newspaper", "/news"),
            ],
            user_menu: vec![
                NavLink::user_item(
                    "My purchases",
                    "fa-basket-shopping",
                    "/purchases",
                    UserMenuItem::Purchases,
                ),
                NavLink::user_item("Edit profile", "fa-user-pen", "/profile", UserMenuItem::Profile),
                NavLink::user_item("Topup balance", "fa-bitcoin", "/topup", UserMenuItem::Topup),
                NavLink::user_item("Support", "fa-comments", "#", UserMenuItem::Support),
            ],
            trailing: vec![NavLink {
                label: "Logout",
                icon: "fa-right-from-bracket",
                target: NavTarget::Logout,
                marker_class: Some(LOGOUT_ENTRY_CLASS),
            }],
            username_placeholder: "username",
            balance_placeholder: "$0.00",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderHandles<T, M> {
    pub username: T,
    pub balance: T,
    pub user_menu: M,
}

impl<T, M> HeaderHandles<T, M> {
    pub fn into_profile_fields(self) -> ProfileFields<T, M> {
        ProfileFields {
            username: self.username,
            balance: self.balance,
            user_menu: Some(self.user_menu),
        }
    }
}

pub trait HeaderHost {
    type Text: TextSlot;
    type Menu: MenuSlot;

    /// Handles of a header already on the page, if any.
    fn find_mounted(&self) -> Option<HeaderHandles<Self::Text, Self::Menu>>;

    /// Builds `layout` and inserts it as the first child of the content
    /// container.
    fn insert_header(
        &self,
        layout: &HeaderLayout,
    ) -> Result<HeaderHandles<Self::Text, Self::Menu>, SurfaceError>;
}

#[derive(Debug, Clone, Default)]
pub struct HeaderView {
    layout: HeaderLayout,
}

impl HeaderView {
    #[must_use]
    pub fn new(layout: HeaderLayout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub fn layout(&self) -> &HeaderLayout {
        &self.layout
    }

    pub fn mount<H: HeaderHost>(
        &self,
        host: &H,
        config: &HeaderConfig,
    ) -> Result<HeaderHandles<H::Text, H::Menu>, SurfaceError> {
        let handles = match host.find_mounted() {
            Some(existing) => {
                debug!("header already mounted; reusing it");
                existing
            }
            None => host.insert_header(&self.layout)?,
        };

        if let Some(item) = config.active_item {
            if !handles.user_menu.mark_active(item.marker_class()) {
                warn!(item = item.marker_class(), "active menu item not found");
            }
        }
        Ok(handles)
    }
}
