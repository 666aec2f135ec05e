//! Waiting for a user's next interaction or message.
//!
//! A conversation step that needs input registers a [`Subscription`] under a key
//! (the user and modal, the channel and author, the prompt message...) and awaits
//! it. The event handler [`offer`](CollectorRegistry::offer)s every incoming
//! event to the matching registry before routing it anywhere else; an event
//! accepted by a subscription is consumed.
//!
//! Each wait ends with exactly one [`WaitOutcome`]. When the timer elapses the
//! subscription is unregistered before the outcome is decided, so an event offered
//! afterwards is handed back to the caller instead of being lost. A newer
//! registration on the same key supersedes the older one, whose wait ends with
//! [`WaitOutcome::Superseded`].

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use serenity::all::{ComponentInteraction, Message, ModalInteraction};
use tokio::sync::oneshot;

/// How long a subscription waits for its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitWindow {
    Bounded(Duration),
    Unbounded,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    Received(T),
    TimedOut,
    /// A newer subscription on the same key replaced this one.
    Superseded,
}

type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct Slot<T> {
    generation: u64,
    sender: oneshot::Sender<T>,
    filter: Option<Filter<T>>,
}

struct Slots<K, T> {
    next_generation: u64,
    by_key: HashMap<K, Slot<T>>,
}

/// Pending subscriptions for one kind of event, keyed by `K`.
///
/// Cheap to clone; clones share the same subscriptions.
pub struct CollectorRegistry<K, T> {
    slots: Arc<Mutex<Slots<K, T>>>,
}

impl<K, T> Clone for CollectorRegistry<K, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<K, T> Default for CollectorRegistry<K, T> {
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_generation: 0,
                by_key: HashMap::new(),
            })),
        }
    }
}

fn lock<K, T>(slots: &Mutex<Slots<K, T>>) -> MutexGuard<'_, Slots<K, T>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K, T> CollectorRegistry<K, T>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscription accepting any event offered under `key`.
    pub fn register(&self, key: K) -> Subscription<K, T> {
        self.insert(key, None)
    }

    /// Registers a subscription accepting only events for which `filter` holds.
    ///
    /// Rejected events stay with the caller of [`offer`](Self::offer) and the
    /// subscription keeps waiting.
    pub fn register_filtered(
        &self,
        key: K,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Subscription<K, T> {
        self.insert(key, Some(Box::new(filter)))
    }

    fn insert(&self, key: K, filter: Option<Filter<T>>) -> Subscription<K, T> {
        let (sender, receiver) = oneshot::channel();

        let mut slots = lock(&self.slots);
        let generation = slots.next_generation;
        slots.next_generation += 1;

        // Dropping the previous sender ends the older wait as superseded.
        slots.by_key.insert(
            key.clone(),
            Slot {
                generation,
                sender,
                filter,
            },
        );

        Subscription {
            key,
            generation,
            receiver,
            slots: self.slots.clone(),
        }
    }

    /// Hands an event to the subscription registered under `key`.
    ///
    /// # Returns
    /// - `Ok(())` - A waiting subscription took the event
    /// - `Err(T)` - No subscription wanted it; the event is returned for normal routing
    pub fn offer(&self, key: &K, value: T) -> Result<(), T> {
        let slot = {
            let mut slots = lock(&self.slots);

            let accepts = slots.by_key.get(key).is_some_and(|slot| {
                slot.filter.as_ref().map_or(true, |filter| filter(&value))
            });
            if !accepts {
                return Err(value);
            }

            match slots.by_key.remove(key) {
                Some(slot) => slot,
                None => return Err(value),
            }
        };

        slot.sender.send(value)
    }

    /// Whether a subscription is currently registered under `key`.
    pub fn is_waiting(&self, key: &K) -> bool {
        lock(&self.slots).by_key.contains_key(key)
    }
}

/// A registered wait for one event.
///
/// Dropping the subscription unregisters it.
pub struct Subscription<K, T>
where
    K: Eq + Hash,
{
    key: K,
    generation: u64,
    receiver: oneshot::Receiver<T>,
    slots: Arc<Mutex<Slots<K, T>>>,
}

impl<K, T> Subscription<K, T>
where
    K: Eq + Hash,
{
    /// Waits for the event, the end of the window, or replacement.
    pub async fn wait(mut self, window: WaitWindow) -> WaitOutcome<T> {
        let delivered = match window {
            WaitWindow::Unbounded => (&mut self.receiver).await,
            WaitWindow::Bounded(duration) => {
                match tokio::time::timeout(duration, &mut self.receiver).await {
                    Ok(delivered) => delivered,
                    Err(_) => {
                        self.unregister();
                        // An offer may have landed between the timer firing and the
                        // unregister above.
                        match self.receiver.try_recv() {
                            Ok(value) => Ok(value),
                            Err(oneshot::error::TryRecvError::Empty) => {
                                return WaitOutcome::TimedOut
                            }
                            Err(oneshot::error::TryRecvError::Closed) => {
                                return WaitOutcome::Superseded
                            }
                        }
                    }
                }
            }
        };

        match delivered {
            Ok(value) => WaitOutcome::Received(value),
            Err(_) => WaitOutcome::Superseded,
        }
    }

    fn unregister(&self) {
        let mut slots = lock(&self.slots);
        if slots
            .by_key
            .get(&self.key)
            .is_some_and(|slot| slot.generation == self.generation)
        {
            slots.by_key.remove(&self.key);
        }
    }
}

impl<K, T> Drop for Subscription<K, T>
where
    K: Eq + Hash,
{
    fn drop(&mut self) {
        self.unregister();
    }
}

/// Key of a modal wait: the submitting user and the modal's custom ID.
pub type ModalKey = (u64, String);
/// Key of a message wait: the channel and the author.
pub type MessageKey = (u64, u64);
/// Key of a component wait: the message carrying the components.
pub type ComponentKey = u64;

/// Every registry the event handler offers events to.
#[derive(Clone, Default)]
pub struct Collectors {
    pub modals: CollectorRegistry<ModalKey, ModalInteraction>,
    pub messages: CollectorRegistry<MessageKey, Message>,
    pub components: CollectorRegistry<ComponentKey, ComponentInteraction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: WaitWindow = WaitWindow::Bounded(Duration::from_secs(60));

    /// Tests that an offered event reaches the waiting subscription.
    ///
    /// Expected: Received(value), registration removed
    #[tokio::test(start_paused = true)]
    async fn delivers_offered_event() {
        let registry: CollectorRegistry<u64, &str> = CollectorRegistry::new();
        let subscription = registry.register(1);

        assert_eq!(registry.offer(&1, "Ana#EUW"), Ok(()));
        assert_eq!(subscription.wait(WINDOW).await, WaitOutcome::Received("Ana#EUW"));
        assert!(!registry.is_waiting(&1));
    }

    /// Tests that an unanswered window times out exactly once and that a late
    /// event is handed back instead of being processed.
    ///
    /// Expected: TimedOut after 60 s, late offer returns Err(value)
    #[tokio::test(start_paused = true)]
    async fn times_out_once_and_refuses_late_events() {
        let registry: CollectorRegistry<u64, &str> = CollectorRegistry::new();
        let subscription = registry.register(1);

        let waiter = tokio::spawn(subscription.wait(WINDOW));
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(waiter.await.unwrap(), WaitOutcome::TimedOut);
        assert!(!registry.is_waiting(&1));
        assert_eq!(registry.offer(&1, "late"), Err("late"));
    }

    /// Tests that an event arriving just before the deadline wins.
    ///
    /// Expected: Received, not TimedOut
    #[tokio::test(start_paused = true)]
    async fn event_before_deadline_wins() {
        let registry: CollectorRegistry<u64, &str> = CollectorRegistry::new();
        let subscription = registry.register(1);

        let waiter = tokio::spawn(subscription.wait(WINDOW));
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(registry.offer(&1, "just in time"), Ok(()));

        assert_eq!(waiter.await.unwrap(), WaitOutcome::Received("just in time"));
    }

    /// Tests that a second registration on the same key replaces the first.
    ///
    /// Expected: first wait Superseded, event goes to the second
    #[tokio::test(start_paused = true)]
    async fn newer_registration_supersedes_older() {
        let registry: CollectorRegistry<u64, &str> = CollectorRegistry::new();
        let first = registry.register(1);
        let second = registry.register(1);

        assert_eq!(first.wait(WINDOW).await, WaitOutcome::Superseded);
        assert!(registry.is_waiting(&1));

        assert_eq!(registry.offer(&1, "name"), Ok(()));
        assert_eq!(second.wait(WINDOW).await, WaitOutcome::Received("name"));
    }

    /// Tests that dropping a superseded subscription leaves the newer one in place.
    ///
    /// Expected: key still registered after the old subscription is dropped
    #[tokio::test]
    async fn dropping_old_subscription_keeps_newer() {
        let registry: CollectorRegistry<u64, &str> = CollectorRegistry::new();
        let first = registry.register(1);
        let _second = registry.register(1);

        drop(first);

        assert!(registry.is_waiting(&1));
    }

    /// Tests that a filtered subscription ignores events it does not accept.
    ///
    /// Expected: rejected event returned, subscription keeps waiting, accepted event
    /// delivered
    #[tokio::test]
    async fn filtered_subscription_skips_rejected_events() {
        let registry: CollectorRegistry<u64, String> = CollectorRegistry::new();
        let subscription = registry.register_filtered(1, |text: &String| text.trim() == "I agree");

        assert_eq!(registry.offer(&1, "hello".to_string()), Err("hello".to_string()));
        assert!(registry.is_waiting(&1));
        assert_eq!(registry.offer(&1, " I agree ".to_string()), Ok(()));

        assert_eq!(
            subscription.wait(WaitWindow::Unbounded).await,
            WaitOutcome::Received(" I agree ".to_string())
        );
    }

    /// Tests offering under a key nobody waits on.
    ///
    /// Expected: Err(value)
    #[tokio::test]
    async fn offer_without_subscription_returns_event() {
        let registry: CollectorRegistry<u64, u8> = CollectorRegistry::new();

        assert_eq!(registry.offer(&9, 3), Err(3));
    }
}
