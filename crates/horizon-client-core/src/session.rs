use tracing::{info, warn};

use crate::api::StorefrontApi;
use crate::error_report::FailureSink;
use crate::surface::Navigator;

pub struct SessionController<A, N, R> {
    api: A,
    navigator: N,
    reporter: R,
    login_path: String,
}

impl<A, N, R> SessionController<A, N, R>
where
    A: StorefrontApi,
    N: Navigator,
    R: FailureSink,
{
    pub fn new(api: A, navigator: N, reporter: R, login_path: impl Into<String>) -> Self {
        Self {
            api,
            navigator,
            reporter,
            login_path: login_path.into(),
        }
    }

    /// Ends the session. On failure the page stays as it is; only the
    /// reporter reacts.
    pub async fn logout(&self) {
        match self.api.logout().await {
            Ok(()) => {
                info!("logged out");
                self.navigator.redirect(&self.login_path);
            }
            Err(error) => {
                warn!(%error, "logout failed");
                self.reporter.report(&error.failure());
            }
        }
    }
}
