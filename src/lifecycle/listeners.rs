use std::collections::BTreeSet;

use tracing::debug;

/// Host notifications the narrator subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Listener {
    FocusIn,
    KeyDown,
    Mutation,
}

impl Listener {
    pub const ALL: [Listener; 3] = [Listener::FocusIn, Listener::KeyDown, Listener::Mutation];
}

/// Which subscriptions are live. Notifications for a listener that is not
/// registered are ignored, which is how teardown guarantees no callback
/// runs afterwards.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: BTreeSet<Listener>,
}

impl ListenerRegistry {
    pub fn register(&mut self, listener: Listener) -> bool {
        let added = self.active.insert(listener);
        if added {
            debug!(?listener, "listener registered");
        }
        added
    }

    pub fn register_all(&mut self) {
        for listener in Listener::ALL {
            self.register(listener);
        }
    }

    /// Remove every subscription. Returns how many were live.
    pub fn unregister_all(&mut self) -> usize {
        let count = self.active.len();
        for listener in std::mem::take(&mut self.active) {
            debug!(?listener, "listener unregistered");
        }
        count
    }

    pub fn is_registered(&self, listener: Listener) -> bool {
        self.active.contains(&listener)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
