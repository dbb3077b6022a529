//! In-memory page pieces for component tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::account::Profile;
use crate::api::{ApiError, StorefrontApi};
use crate::error_report::{FailureSink, HttpFailure};
use crate::header::{HeaderHandles, HeaderHost, HeaderLayout};
use crate::notification::{
    LiveToast, NotificationRecord, Severity, Timers, Toaster, ToastPhase, ToastSurface, ToastToken,
};
use crate::surface::{ACTIVE_CLASS, MenuEntry, MenuSlot, Navigator, SKELETON_CLASS, SurfaceError, TextSlot};

const DIVIDER_MARKER: &str = "divider";

#[derive(Debug, Default)]
struct TextState {
    text: String,
    classes: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeText {
    state: Rc<RefCell<TextState>>,
}

impl FakeText {
    pub(crate) fn skeleton(placeholder: &str) -> Self {
        let text = Self::default();
        text.set_text(placeholder);
        text.add_class(SKELETON_CLASS);
        text
    }

    pub(crate) fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }
}

impl TextSlot for FakeText {
    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }

    fn add_class(&self, class: &str) {
        self.state.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.remove(class);
    }
}

#[derive(Debug, Clone)]
struct FakeMenuEntry {
    marker: String,
    href: String,
    classes: BTreeSet<String>,
}

impl FakeMenuEntry {
    fn new(marker: &str, href: &str) -> Self {
        Self {
            marker: marker.to_string(),
            href: href.to_string(),
            classes: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeMenu {
    entries: Rc<RefCell<Vec<FakeMenuEntry>>>,
}

impl FakeMenu {
    pub(crate) fn from_layout(layout: &HeaderLayout) -> Self {
        let mut entries = layout
            .user_menu
            .iter()
            .map(|link| FakeMenuEntry::new(link.marker_class.unwrap_or_default(), "#"))
            .collect::<Vec<_>>();
        entries.push(FakeMenuEntry::new(DIVIDER_MARKER, ""));
        entries.extend(
            layout
                .trailing
                .iter()
                .map(|link| FakeMenuEntry::new(link.marker_class.unwrap_or_default(), "#")),
        );
        Self {
            entries: Rc::new(RefCell::new(entries)),
        }
    }

    pub(crate) fn user_menu() -> Self {
        Self::from_layout(&HeaderLayout::default())
    }

    pub(crate) fn markers(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| entry.marker.clone())
            .collect()
    }

    pub(crate) fn href_of(&self, marker: &str) -> Option<String> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.marker == marker)
            .map(|entry| entry.href.clone())
    }

    pub(crate) fn active_markers(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.classes.contains(ACTIVE_CLASS))
            .map(|entry| entry.marker.clone())
            .collect()
    }

    pub(crate) fn has_class_on(&self, marker: &str, class: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|entry| entry.marker == marker && entry.classes.contains(class))
    }
}

impl MenuSlot for FakeMenu {
    fn contains_entry(&self, marker_class: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|entry| entry.marker == marker_class)
    }

    fn insert_before_divider(&self, entry: &MenuEntry) -> Result<(), SurfaceError> {
        let mut entries = self.entries.borrow_mut();
        let divider = entries
            .iter()
            .position(|existing| existing.marker == DIVIDER_MARKER)
            .ok_or(SurfaceError::Missing("menu divider"))?;
        entries.insert(divider, FakeMenuEntry::new(entry.marker_class, &entry.href));
        Ok(())
    }

    fn mark_active(&self, marker_class: &str) -> bool {
        let mut entries = self.entries.borrow_mut();
        let Some(entry) = entries
            .iter_mut()
            .find(|entry| entry.marker == marker_class)
        else {
            return false;
        };
        entry.classes.insert(ACTIVE_CLASS.to_string());
        true
    }
}

#[derive(Debug)]
pub(crate) struct FakeHeaderHost {
    has_container: bool,
    mounted: RefCell<Option<HeaderHandles<FakeText, FakeMenu>>>,
    inserts: Cell<usize>,
}

impl Default for FakeHeaderHost {
    fn default() -> Self {
        Self {
            has_container: true,
            mounted: RefCell::new(None),
            inserts: Cell::new(0),
        }
    }
}

impl FakeHeaderHost {
    pub(crate) fn without_container() -> Self {
        Self {
            has_container: false,
            ..Self::default()
        }
    }

    pub(crate) fn insert_count(&self) -> usize {
        self.inserts.get()
    }
}

impl HeaderHost for FakeHeaderHost {
    type Text = FakeText;
    type Menu = FakeMenu;

    fn find_mounted(&self) -> Option<HeaderHandles<FakeText, FakeMenu>> {
        self.mounted.borrow().clone()
    }

    fn insert_header(
        &self,
        layout: &HeaderLayout,
    ) -> Result<HeaderHandles<FakeText, FakeMenu>, SurfaceError> {
        if !self.has_container {
            return Err(SurfaceError::Missing("content container"));
        }
        let handles = HeaderHandles {
            username: FakeText::skeleton(layout.username_placeholder),
            balance: FakeText::skeleton(layout.balance_placeholder),
            user_menu: FakeMenu::from_layout(layout),
        };
        self.inserts.set(self.inserts.get() + 1);
        *self.mounted.borrow_mut() = Some(handles.clone());
        Ok(handles)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShownToast {
    pub(crate) token: ToastToken,
    pub(crate) message: String,
    pub(crate) severity: Severity,
    pub(crate) phase: ToastPhase,
}

#[derive(Default)]
struct ToastSurfaceState {
    present: Vec<(ShownToast, Rc<dyn Fn()>)>,
    renders: usize,
    fail_next: bool,
}

#[derive(Clone, Default)]
pub(crate) struct FakeToastSurface {
    state: Rc<RefCell<ToastSurfaceState>>,
}

impl FakeToastSurface {
    pub(crate) fn present(&self) -> Vec<ShownToast> {
        self.state
            .borrow()
            .present
            .iter()
            .map(|(toast, _)| toast.clone())
            .collect()
    }

    pub(crate) fn render_count(&self) -> usize {
        self.state.borrow().renders
    }

    pub(crate) fn fail_next_render(&self) {
        self.state.borrow_mut().fail_next = true;
    }

    /// Clicking an element that is gone does nothing, as on a real page.
    pub(crate) fn click(&self, token: ToastToken) {
        let handler = self
            .state
            .borrow()
            .present
            .iter()
            .find(|(toast, _)| toast.token == token)
            .map(|(_, handler)| Rc::clone(handler));
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl ToastSurface for FakeToastSurface {
    fn render(&self, toast: &LiveToast, on_click: Box<dyn Fn()>) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next {
            state.fail_next = false;
            return Err(SurfaceError::dom("create notification", "scripted failure"));
        }
        state.renders += 1;
        state.present.push((
            ShownToast {
                token: toast.token,
                message: toast.record.message.clone(),
                severity: toast.record.severity,
                phase: toast.phase,
            },
            Rc::from(on_click),
        ));
        Ok(())
    }

    fn set_phase(&self, token: ToastToken, phase: ToastPhase) {
        let mut state = self.state.borrow_mut();
        for (toast, _) in &mut state.present {
            if toast.token == token {
                toast.phase = phase;
            }
        }
    }

    fn remove(&self, token: ToastToken) {
        self.state
            .borrow_mut()
            .present
            .retain(|(toast, _)| toast.token != token);
    }
}

struct PendingTask {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerState {
    now: Duration,
    next_seq: u64,
    queue: Vec<PendingTask>,
}

/// Timers driven by an explicit clock. Tasks due at the same instant run in
/// scheduling order.
#[derive(Clone, Default)]
pub(crate) struct ManualTimers {
    state: Rc<RefCell<TimerState>>,
}

impl ManualTimers {
    pub(crate) fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    pub(crate) fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let index = state
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due <= target)
                    .min_by_key(|(_, pending)| (pending.due, pending.seq))
                    .map(|(index, _)| index);
                index.map(|index| {
                    let pending = state.queue.remove(index);
                    state.now = pending.due;
                    pending.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }
}

impl Timers for ManualTimers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        state.next_seq += 1;
        let pending = PendingTask {
            due: state.now + delay,
            seq: state.next_seq,
            task,
        };
        state.queue.push(pending);
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingNavigator {
    redirects: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub(crate) fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingToaster {
    records: Rc<RefCell<Vec<NotificationRecord>>>,
}

impl RecordingToaster {
    pub(crate) fn records(&self) -> Vec<NotificationRecord> {
        self.records.borrow().clone()
    }
}

impl Toaster for RecordingToaster {
    fn toast(&self, record: NotificationRecord) {
        self.records.borrow_mut().push(record);
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSink {
    failures: Rc<RefCell<Vec<HttpFailure>>>,
}

impl RecordingSink {
    pub(crate) fn failures(&self) -> Vec<HttpFailure> {
        self.failures.borrow().clone()
    }
}

impl FailureSink for RecordingSink {
    fn report(&self, failure: &HttpFailure) {
        self.failures.borrow_mut().push(failure.clone());
    }
}

#[derive(Debug, Default)]
struct ScriptedResponses {
    account: VecDeque<Result<Profile, ApiError>>,
    logout: VecDeque<Result<(), ApiError>>,
    account_calls: usize,
    logout_calls: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedApi {
    responses: Rc<RefCell<ScriptedResponses>>,
}

impl ScriptedApi {
    pub(crate) fn push_account(&self, response: Result<Profile, ApiError>) {
        self.responses.borrow_mut().account.push_back(response);
    }

    pub(crate) fn push_logout(&self, response: Result<(), ApiError>) {
        self.responses.borrow_mut().logout.push_back(response);
    }

    pub(crate) fn account_calls(&self) -> usize {
        self.responses.borrow().account_calls
    }

    pub(crate) fn logout_calls(&self) -> usize {
        self.responses.borrow().logout_calls
    }
}

#[async_trait(?Send)]
impl StorefrontApi for ScriptedApi {
    async fn fetch_account(&self) -> Result<Profile, ApiError> {
        let mut responses = self.responses.borrow_mut();
        responses.account_calls += 1;
        responses
            .account
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut responses = self.responses.borrow_mut();
        responses.logout_calls += 1;
        responses
            .logout
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
    }
}
