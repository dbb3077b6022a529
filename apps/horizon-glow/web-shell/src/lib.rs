#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;
    use std::time::Duration;

    use async_trait::async_trait;
    use gloo_net::http::Request;
    use gloo_timers::future::sleep;
    use horizon_client_core::api::{check_status, decode_response};
    use horizon_client_core::header::{LOGOUT_ENTRY_CLASS, NavLink, NavTarget};
    use horizon_client_core::surface::{ACTIVE_CLASS, SKELETON_CLASS};
    use horizon_client_core::{
        ApiError, ConfigError, ErrorReporter, FailureSink, HeaderConfig, HeaderHandles, HeaderHost,
        HeaderLayout, HeaderView, HttpFailure, LiveToast, MenuEntry, MenuSlot, Navigator,
        Notifier, Profile, ProfileEvents, ProfileLoader, SessionController, Severity,
        StorefrontApi, StorefrontConfig, SurfaceError, TextSlot, Timers, ToastPhase, ToastSurface,
        ToastToken, UserMenuItem,
    };
    use tracing::level_filters::LevelFilter;
    use tracing::{Level, Metadata, debug, error, info, warn};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, Element};

    use crate::wasm_constants::*;

    mod dom;
    mod lifecycle;
    mod network;

    use dom::*;
    use lifecycle::*;
    use network::*;

    type ShellNotifier = Notifier<DomToastSurface, BrowserTimers>;
    type ShellReporter = ErrorReporter<BrowserNavigator, ShellNotifier>;
    type ShellProfileLoader = ProfileLoader<HttpStorefrontApi, DomText, DomMenu, ShellReporter>;
    type ShellSession = SessionController<HttpStorefrontApi, BrowserNavigator, ShellReporter>;

    struct WebShellApp {
        config: StorefrontConfig,
        api: HttpStorefrontApi,
        notifier: ShellNotifier,
        reporter: ShellReporter,
        events: ProfileEvents,
        header: HeaderView,
        profile: Option<Rc<ShellProfileLoader>>,
        session: Rc<ShellSession>,
    }

    thread_local! {
        static APP: RefCell<Option<WebShellApp>> = const { RefCell::new(None) };
        static LOGOUT_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let (config, config_error) = match read_shell_config() {
            Ok(config) => (config, None),
            Err(error) => (StorefrontConfig::default(), Some(error)),
        };
        install_logging(&config);
        if let Some(error) = config_error {
            warn!(%error, "ignoring page config; using defaults");
        }

        if let Err(error) = boot(config) {
            error!(%error, "storefront shell failed to start");
            return;
        }
        load_profile();
    }

    fn boot(config: StorefrontConfig) -> Result<(), ShellError> {
        if APP.with(|app| app.borrow().is_some()) {
            return Err(ShellError::AlreadyStarted);
        }

        let container = ensure_notifications_container()?;
        let notifier = Notifier::new(
            DomToastSurface::new(container),
            BrowserTimers,
            config.toast_exit_delay(),
        );
        let reporter = ErrorReporter::new(
            BrowserNavigator,
            notifier.clone(),
            config.login_path.clone(),
            config.error_toast_duration(),
        );
        let events = ProfileEvents::default();
        events.subscribe(dispatch_profile_loaded_event);

        let api = HttpStorefrontApi::new(&config);
        let session = Rc::new(SessionController::new(
            api.clone(),
            BrowserNavigator,
            reporter.clone(),
            config.login_path.clone(),
        ));
        let header_config = config.header_config();

        APP.with(|app| {
            *app.borrow_mut() = Some(WebShellApp {
                config,
                api,
                notifier,
                reporter,
                events,
                header: HeaderView::default(),
                profile: None,
                session,
            });
        });

        if let Err(error) = mount_header_with(&header_config) {
            // Profile loading stays disabled until a header is available.
            warn!(%error, "header not mounted");
        }
        info!("storefront shell started");
        Ok(())
    }

    /// Mounts the header with `active_item` (an item name such as `topup`,
    /// or the older selector form `.topup-button`) marked active.
    #[wasm_bindgen]
    pub fn mount_header(active_item: Option<String>) -> bool {
        let active_item = active_item.and_then(|raw| {
            let parsed = UserMenuItem::parse(&raw);
            if parsed.is_none() {
                warn!(item = %raw, "unknown active menu item");
            }
            parsed
        });
        match mount_header_with(&HeaderConfig { active_item }) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "header not mounted");
                false
            }
        }
    }

    fn mount_header_with(header_config: &HeaderConfig) -> Result<(), ShellError> {
        let (header, api, reporter, events, seller_path) = APP
            .with(|app| {
                app.borrow().as_ref().map(|app| {
                    (
                        app.header.clone(),
                        app.api.clone(),
                        app.reporter.clone(),
                        app.events.clone(),
                        app.config.seller_path.clone(),
                    )
                })
            })
            .ok_or(ShellError::NotStarted)?;

        let host = DocumentHeaderHost::new()?;
        let handles = header.mount(&host, header_config)?;
        let loader = Rc::new(ProfileLoader::new(
            api,
            handles.into_profile_fields(),
            reporter,
            events,
            seller_path,
        ));
        APP.with(|app| {
            if let Some(app) = app.borrow_mut().as_mut() {
                app.profile = Some(loader);
            }
        });
        debug!(active = ?header_config.active_item, "header mounted");
        Ok(())
    }

    #[wasm_bindgen]
    pub fn load_profile() {
        let loader = APP.with(|app| app.borrow().as_ref().and_then(|app| app.profile.clone()));
        let Some(loader) = loader else {
            warn!("profile requested before the header was mounted");
            return;
        };
        spawn_local(async move {
            loader.load_profile().await;
        });
    }

    #[wasm_bindgen]
    pub fn logout() {
        let session = APP.with(|app| app.borrow().as_ref().map(|app| Rc::clone(&app.session)));
        let Some(session) = session else {
            warn!("logout requested before the shell started");
            return;
        };
        spawn_local(async move {
            session.logout().await;
        });
    }

    /// Page-script entry for toasts. Unknown severities fall back to `info`.
    #[wasm_bindgen]
    pub fn notify(message: String, severity: String, duration_ms: u32) {
        let severity = Severity::parse(&severity).unwrap_or_else(|| {
            warn!(severity = %severity, "unknown notification severity");
            Severity::Info
        });
        let notifier = APP.with(|app| app.borrow().as_ref().map(|app| app.notifier.clone()));
        match notifier {
            Some(notifier) => notifier.notify(
                message,
                severity,
                Duration::from_millis(u64::from(duration_ms)),
            ),
            None => warn!("notification requested before the shell started"),
        }
    }

    /// Page-script entry for failed requests made outside the shell.
    #[wasm_bindgen]
    pub fn report_error(status: u16, body: String) {
        let reporter = APP.with(|app| app.borrow().as_ref().map(|app| app.reporter.clone()));
        match reporter {
            Some(reporter) => reporter.report(&HttpFailure::new(status, body)),
            None => warn!(status, "error reported before the shell started"),
        }
    }
}
