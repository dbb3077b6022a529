use super::*;

#[derive(Debug, thiserror::Error)]
pub(super) enum ShellError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("storefront shell is already running")]
    AlreadyStarted,
    #[error("storefront shell has not started")]
    NotStarted,
}

/// Reads `window.__HORIZON_GLOW_CONFIG__`. Pages that set nothing get the
/// defaults.
pub(super) fn read_shell_config() -> Result<StorefrontConfig, ConfigError> {
    let Some(window) = web_sys::window() else {
        return Ok(StorefrontConfig::default());
    };
    let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) else {
        return Ok(StorefrontConfig::default());
    };
    if value.is_undefined() || value.is_null() {
        return Ok(StorefrontConfig::default());
    }
    let raw = js_sys::JSON::stringify(&value)
        .map(String::from)
        .map_err(|_| ConfigError::Json("page config is not serializable".to_string()))?;
    StorefrontConfig::from_json(&raw)
}

pub(super) fn install_logging(config: &StorefrontConfig) {
    let level = config.log_level_filter().unwrap_or(LevelFilter::INFO);
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_max_level(level)
        .try_init();
}

pub(super) struct ConsoleMakeWriter;

pub(super) struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let line = JsValue::from_str(line.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct BrowserTimers;

impl Timers for BrowserTimers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        spawn_local(async move {
            sleep(delay).await;
            task();
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            warn!(%path, "window is unavailable; cannot redirect");
            return;
        };
        if let Err(error) = window.location().set_href(path) {
            warn!(?error, %path, "redirect failed");
        }
    }
}

/// Re-announces "profile loaded" on `document` for plain page scripts.
pub(super) fn dispatch_profile_loaded_event() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let event = match web_sys::CustomEvent::new(PROFILE_LOADED_EVENT) {
        Ok(event) => event,
        Err(error) => {
            warn!(?error, "failed to create profile event");
            return;
        }
    };
    if let Err(error) = document.dispatch_event(&event) {
        warn!(?error, "failed to dispatch profile event");
    }
}
