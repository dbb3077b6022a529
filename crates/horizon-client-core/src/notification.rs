use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::surface::SurfaceError;

pub const TOAST_EXIT_DELAY: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "is-info",
            Self::Success => "is-success",
            Self::Warning => "is-warning",
            Self::Error => "is-error",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            "warning" | "warn" => Some(Self::Warning),
            "error" | "danger" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl NotificationRecord {
    pub fn new(message: impl Into<String>, severity: Severity, duration: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            duration,
        }
    }
}

/// Identity of one displayed toast. A fresh token is issued for every
/// `notify`, so callbacks holding an older token become no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastToken(u64);

impl ToastToken {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Exiting,
}

impl ToastPhase {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Entering => "slideInRight",
            Self::Exiting => "slideOutRight",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveToast {
    pub token: ToastToken,
    pub record: NotificationRecord,
    pub phase: ToastPhase,
}

/// The single notification slot.
#[derive(Debug, Default)]
pub struct ToastSlot {
    live: Option<LiveToast>,
    next_token: u64,
}

impl ToastSlot {
    /// Puts `record` in the slot, returning the token it displaced (if any)
    /// and the new toast.
    pub fn show(&mut self, record: NotificationRecord) -> (Option<ToastToken>, LiveToast) {
        self.next_token = self.next_token.wrapping_add(1);
        let toast = LiveToast {
            token: ToastToken(self.next_token),
            record,
            phase: ToastPhase::Entering,
        };
        let displaced = self.live.replace(toast.clone()).map(|previous| previous.token);
        (displaced, toast)
    }

    /// Moves the toast to `Exiting`. Only the first call for a live token
    /// returns true.
    pub fn begin_exit(&mut self, token: ToastToken) -> bool {
        match self.live.as_mut() {
            Some(live) if live.token == token && live.phase == ToastPhase::Entering => {
                live.phase = ToastPhase::Exiting;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, token: ToastToken) -> bool {
        if self.live.as_ref().is_some_and(|live| live.token == token) {
            self.live = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn live(&self) -> Option<&LiveToast> {
        self.live.as_ref()
    }
}

/// Where toasts are drawn. Implementations keep at most one element and
/// treat `remove` of an unknown token as a no-op.
pub trait ToastSurface {
    fn render(&self, toast: &LiveToast, on_click: Box<dyn Fn()>) -> Result<(), SurfaceError>;
    fn set_phase(&self, token: ToastToken, phase: ToastPhase);
    fn remove(&self, token: ToastToken);
}

/// Deferred one-shot callbacks on the page event loop.
pub trait Timers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

pub trait Toaster {
    fn toast(&self, record: NotificationRecord);
}

pub struct Notifier<S, T> {
    inner: Rc<NotifierInner<S, T>>,
}

struct NotifierInner<S, T> {
    surface: S,
    timers: T,
    exit_delay: Duration,
    slot: RefCell<ToastSlot>,
}

impl<S, T> Clone for Notifier<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, T> Notifier<S, T>
where
    S: ToastSurface + 'static,
    T: Timers + 'static,
{
    pub fn new(surface: S, timers: T, exit_delay: Duration) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                surface,
                timers,
                exit_delay,
                slot: RefCell::new(ToastSlot::default()),
            }),
        }
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity, duration: Duration) {
        self.show(NotificationRecord::new(message, severity, duration));
    }

    pub fn show(&self, record: NotificationRecord) -> Option<ToastToken> {
        let duration = record.duration;
        let (displaced, toast) = self.inner.slot.borrow_mut().show(record);
        if let Some(previous) = displaced {
            self.inner.surface.remove(previous);
        }

        let token = toast.token;
        let on_click = {
            let weak = Rc::downgrade(&self.inner);
            Box::new(move || dismiss_weak(&weak, token)) as Box<dyn Fn()>
        };
        if let Err(error) = self.inner.surface.render(&toast, on_click) {
            warn!(%error, "failed to render notification");
            self.inner.slot.borrow_mut().remove(token);
            return None;
        }
        debug!(
            token = token.get(),
            severity = toast.record.severity.as_str(),
            "notification shown"
        );

        let weak = Rc::downgrade(&self.inner);
        self.inner
            .timers
            .schedule(duration, Box::new(move || dismiss_weak(&weak, token)));
        Some(token)
    }

    /// Starts the exit transition for `token`; removal follows after the
    /// exit delay. Stale or repeated calls do nothing.
    pub fn dismiss(&self, token: ToastToken) {
        dismiss(&self.inner, token);
    }

    #[must_use]
    pub fn live(&self) -> Option<LiveToast> {
        self.inner.slot.borrow().live().cloned()
    }
}

impl<S, T> Toaster for Notifier<S, T>
where
    S: ToastSurface + 'static,
    T: Timers + 'static,
{
    fn toast(&self, record: NotificationRecord) {
        self.show(record);
    }
}

fn dismiss_weak<S, T>(weak: &Weak<NotifierInner<S, T>>, token: ToastToken)
where
    S: ToastSurface + 'static,
    T: Timers + 'static,
{
    if let Some(inner) = weak.upgrade() {
        dismiss(&inner, token);
    }
}

fn dismiss<S, T>(inner: &Rc<NotifierInner<S, T>>, token: ToastToken)
where
    S: ToastSurface + 'static,
    T: Timers + 'static,
{
    if !inner.slot.borrow_mut().begin_exit(token) {
        return;
    }
    inner.surface.set_phase(token, ToastPhase::Exiting);

    let weak = Rc::downgrade(inner);
    inner.timers.schedule(
        inner.exit_delay,
        Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let removed = inner.slot.borrow_mut().remove(token);
            if removed {
                inner.surface.remove(token);
            }
        }),
    );
}
