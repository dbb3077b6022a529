pub(crate) const CONFIG_GLOBAL: &str = "__HORIZON_GLOW_CONFIG__";
pub(crate) const CONTENT_CONTAINER_SELECTOR: &str = ".column.is-12";
pub(crate) const HEADER_ROOT_ID: &str = "horizon-glow-header";
pub(crate) const SITE_MENU_ID: &str = "menu-dropdown";
pub(crate) const USERNAME_ID: &str = "username";
pub(crate) const BALANCE_ID: &str = "balance";
pub(crate) const USER_MENU_ID: &str = "header-user-dropdown-menu";
pub(crate) const MENU_CONTENT_SELECTOR: &str = ".dropdown-content";
pub(crate) const MENU_DIVIDER_CLASS: &str = "dropdown-divider";
pub(crate) const NOTIFICATIONS_CONTAINER_CLASS: &str = "notifications";
pub(crate) const NOTIFICATION_ID: &str = "notification";
pub(crate) const NOTIFICATION_ICON: &str = "fa-triangle-exclamation";
pub(crate) const PROFILE_LOADED_EVENT: &str = "profileLoaded";
