use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// "Profile loaded" announcements. Carries no payload: listeners that need
/// the profile hold their own handles.
#[derive(Clone, Default)]
pub struct ProfileEvents {
    listeners: Rc<RefCell<Listeners>>,
}

impl ProfileEvents {
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        let mut listeners = self.listeners.borrow_mut();
        listeners.next_id = listeners.next_id.wrapping_add(1);
        let id = SubscriptionId(listeners.next_id);
        listeners.entries.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(existing, _)| *existing != id);
        listeners.entries.len() != before
    }

    /// Calls every listener subscribed at the time of the call and returns
    /// how many ran. Listeners may subscribe or unsubscribe while running.
    pub fn publish(&self) -> usize {
        let snapshot = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect::<Vec<_>>();
        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl fmt::Debug for ProfileEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
