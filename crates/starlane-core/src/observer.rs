//! Change notifications.
//!
//! Observers register against a [`ChangeEvent`] and are called, in
//! subscription order, after a mutation has been committed. A handler that
//! returns an error or panics is logged and skipped; the remaining handlers
//! still run and the mutation stands.

use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use starlane_types::{ChangeEvent, GameState};
use tracing::{error, warn};

/// Error a handler may report. Logged, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObserverError {
    /// The handler could not process the notification.
    #[error("observer failed: {message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl ObserverError {
    /// Build an [`ObserverError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Receives change notifications from the state manager.
pub trait Observer {
    /// Called once per committed change of `event`.
    fn on_change(&mut self, event: ChangeEvent, state: &GameState) -> Result<(), ObserverError>;
}

impl<F> Observer for F
where
    F: FnMut(ChangeEvent, &GameState) -> Result<(), ObserverError>,
{
    fn on_change(&mut self, event: ChangeEvent, state: &GameState) -> Result<(), ObserverError> {
        self(event, state)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl core::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Ordered handlers per change event.
#[derive(Default)]
pub struct ObserverRegistry {
    handlers: BTreeMap<ChangeEvent, Vec<(SubscriptionId, Box<dyn Observer>)>>,
    next_id: u64,
}

impl core::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(event, list)| (event.name(), list.len()))
            .collect();
        f.debug_struct("ObserverRegistry")
            .field("handlers", &counts)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ObserverRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one change event.
    pub fn subscribe(&mut self, event: ChangeEvent, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.handlers.entry(event).or_default().push((id, observer));
        id
    }

    /// Register a handler by event name.
    ///
    /// Unknown names register nothing: a warning is logged and `None`
    /// returned.
    pub fn subscribe_named(&mut self, name: &str, observer: Box<dyn Observer>) -> Option<SubscriptionId> {
        match name.parse::<ChangeEvent>() {
            Ok(event) => Some(self.subscribe(event, observer)),
            Err(err) => {
                warn!(name, %err, "Ignoring subscription to unknown change event");
                None
            }
        }
    }

    /// Remove a handler. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        for list in self.handlers.values_mut() {
            let before = list.len();
            list.retain(|(sub, _)| *sub != id);
            removed |= list.len() != before;
        }
        self.handlers.retain(|_, list| !list.is_empty());
        removed
    }

    /// Number of handlers registered for an event.
    pub fn count(&self, event: ChangeEvent) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }

    /// Deliver a notification to every handler of `event`.
    ///
    /// Returns the number of handlers that failed.
    pub fn notify(&mut self, event: ChangeEvent, state: &GameState) -> usize {
        let Some(list) = self.handlers.get_mut(&event) else {
            return 0;
        };
        let mut failures = 0_usize;
        for (id, observer) in list.iter_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| observer.on_change(event, state)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failures = failures.saturating_add(1);
                    error!(subscription = %id, event = event.name(), %err, "Observer returned an error");
                }
                Err(_) => {
                    failures = failures.saturating_add(1);
                    error!(subscription = %id, event = event.name(), "Observer panicked");
                }
            }
        }
        failures
    }
}
