use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

/// Removes a registration by id. Implemented by observer lists.
pub(crate) trait Detach: Send + Sync {
    fn detach(&self, id: u64) -> bool;
}

/// A live callback registration.
///
/// Releasing the handle, explicitly via [`Subscription::unsubscribe`] or implicitly on
/// drop, unregisters the callback. Release is idempotent.
#[must_use = "Dropping a Subscription unregisters its callback immediately."]
pub struct Subscription {
    id: u64,
    scope: Arc<str>,
    active: Arc<AtomicBool>,
    owner: Weak<dyn Detach>,
}

impl Subscription {
    pub(crate) fn new(
        id: u64,
        scope: Arc<str>,
        active: Arc<AtomicBool>,
        owner: Weak<dyn Detach>,
    ) -> Self {
        Self { id, scope, active, owner }
    }

    /// Registration id, unique within its channel or observer list.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Name of the channel or observer list this subscription belongs to.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// `true` while the callback is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire) && self.owner.strong_count() > 0
    }

    /// Unregisters the callback.
    ///
    /// Returns `true` if this call released the registration, `false` if it was
    /// already released.
    pub fn unsubscribe(&self) -> bool {
        if !self.active.swap(false, Ordering::AcqRel) {
            return false;
        }
        if let Some(owner) = self.owner.upgrade() {
            owner.detach(self.id);
        }
        debug!(scope = %self.scope, subscription = self.id, "Subscription released");
        true
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
