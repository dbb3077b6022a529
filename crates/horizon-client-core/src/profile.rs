use tracing::{debug, warn};

use crate::account::Profile;
use crate::api::StorefrontApi;
use crate::error_report::FailureSink;
use crate::events::ProfileEvents;
use crate::surface::{MenuEntry, MenuSlot, SKELETON_CLASS, TextSlot};

pub const SELLER_ENTRY_CLASS: &str = "seller-button";
pub const SELLER_ENTRY_LABEL: &str = "Seller";
pub const SELLER_ENTRY_ICON: &str = "fa-store";

/// Display handles the loader writes into. `user_menu` is optional: pages
/// without the user dropdown still get their fields filled in.
#[derive(Debug, Clone)]
pub struct ProfileFields<T, M> {
    pub username: T,
    pub balance: T,
    pub user_menu: Option<M>,
}

pub struct ProfileLoader<A, T, M, R> {
    api: A,
    fields: ProfileFields<T, M>,
    reporter: R,
    events: ProfileEvents,
    seller_path: String,
}

impl<A, T, M, R> ProfileLoader<A, T, M, R>
where
    A: StorefrontApi,
    T: TextSlot,
    M: MenuSlot,
    R: FailureSink,
{
    pub fn new(
        api: A,
        fields: ProfileFields<T, M>,
        reporter: R,
        events: ProfileEvents,
        seller_path: impl Into<String>,
    ) -> Self {
        Self {
            api,
            fields,
            reporter,
            events,
            seller_path: seller_path.into(),
        }
    }

    /// Fetches the account once and applies it. Failures go to the reporter
    /// and leave the fields in their skeleton state.
    pub async fn load_profile(&self) {
        match self.api.fetch_account().await {
            Ok(profile) => self.apply(&profile),
            Err(error) => {
                warn!(%error, "account fetch failed");
                self.reporter.report(&error.failure());
            }
        }
    }

    pub fn apply(&self, profile: &Profile) {
        self.fields.username.set_text(&profile.username);
        self.fields.username.remove_class(SKELETON_CLASS);
        self.fields.balance.set_text(&profile.balance.to_string());
        self.fields.balance.remove_class(SKELETON_CLASS);

        if profile.is_seller {
            self.ensure_seller_entry();
        }

        let notified = self.events.publish();
        debug!(listeners = notified, "profile loaded");
    }

    fn ensure_seller_entry(&self) {
        let Some(menu) = self.fields.user_menu.as_ref() else {
            debug!("user menu absent; skipping seller entry");
            return;
        };
        if menu.contains_entry(SELLER_ENTRY_CLASS) {
            return;
        }
        let entry = MenuEntry {
            label: SELLER_ENTRY_LABEL,
            href: self.seller_path.clone(),
            icon: SELLER_ENTRY_ICON,
            marker_class: SELLER_ENTRY_CLASS,
        };
        match menu.insert_before_divider(&entry) {
            Ok(()) => debug!(href = %entry.href, "seller menu entry added"),
            Err(error) => warn!(%error, "failed to insert seller menu entry"),
        }
    }
}
