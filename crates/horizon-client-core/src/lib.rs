//! Client core for the Horizon Glow storefront shell.
//!
//! Everything in here is target independent. The browser glue lives in the
//! web shell, which implements the [`surface`] traits, the [`api`] transport,
//! and [`notification::Timers`] on top of `web-sys` and `gloo`.

pub mod account;
pub mod api;
pub mod config;
pub mod error_report;
pub mod events;
pub mod header;
pub mod notification;
pub mod profile;
pub mod session;
pub mod surface;

#[cfg(test)]
mod test_support;

pub use account::{Balance, BalanceError, Profile};
pub use api::{ApiError, StorefrontApi};
pub use config::{ConfigError, StorefrontConfig};
pub use error_report::{ErrorDisposition, ErrorReporter, FailureSink, HttpFailure, classify_failure};
pub use events::{ProfileEvents, SubscriptionId};
pub use header::{HeaderConfig, HeaderHandles, HeaderHost, HeaderLayout, HeaderView, UserMenuItem};
pub use notification::{
    LiveToast, NotificationRecord, Notifier, Severity, Timers, Toaster, ToastPhase, ToastSlot,
    ToastSurface, ToastToken,
};
pub use profile::{ProfileFields, ProfileLoader};
pub use session::SessionController;
pub use surface::{MenuEntry, MenuSlot, Navigator, SurfaceError, TextSlot};
