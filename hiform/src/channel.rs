//! Publication channel.
//!
//! A [`Channel`] is a synchronous multicast stream that remembers the last
//! published value and replays it to each new subscriber. Sessions obtain
//! their channel from a [`Hub`]; once a channel is closed the hub hands out
//! a fresh one on the next request.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use formdom::EventKind;
use log::{debug, trace, warn};

use crate::event::FormEvent;
use crate::state::FormStore;

/// Identifies one subscription on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Subscriber callback.
pub type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct ChannelInner<T> {
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    latest: Option<T>,
    closed: bool,
    next_id: u64,
}

/// Multicast stream with replay of the latest value.
///
/// Cloning yields another handle to the same stream. Subscribers run
/// synchronously on the publishing thread, in subscription order, and no
/// lock is held while they run: a subscriber may publish, subscribe or
/// unsubscribe.
pub struct Channel<T> {
    inner: Arc<RwLock<ChannelInner<T>>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Channel<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ChannelInner {
                subscribers: Vec::new(),
                latest: None,
                closed: false,
                next_id: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ChannelInner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChannelInner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a subscriber. If a value was already published it is
    /// delivered to this subscriber immediately.
    ///
    /// Subscribing to a closed channel returns an id that never receives
    /// anything.
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let subscriber: Subscriber<T> = Arc::new(f);
        let (id, replay) = {
            let mut inner = self.write();
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            if inner.closed {
                warn!("Subscription {} on a closed channel", id.raw());
                return id;
            }
            inner.subscribers.push((id, Arc::clone(&subscriber)));
            (id, inner.latest.clone())
        };

        if let Some(latest) = replay {
            subscriber(&latest);
        }
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.write();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        inner.subscribers.len() != before
    }

    /// Publish a value to every subscriber and remember it for replay.
    /// Returns false, dropping the value, if the channel is closed.
    pub fn publish(&self, value: T) -> bool {
        let subscribers: Vec<Subscriber<T>> = {
            let mut inner = self.write();
            if inner.closed {
                return false;
            }
            inner.latest = Some(value.clone());
            inner.subscribers.iter().map(|(_, s)| Arc::clone(s)).collect()
        };

        for subscriber in &subscribers {
            subscriber(&value);
        }
        true
    }

    /// Close the channel, dropping every subscriber and the replay value.
    pub fn close(&self) {
        let mut inner = self.write();
        inner.closed = true;
        inner.subscribers.clear();
        inner.latest = None;
    }

    pub fn is_closed(&self) -> bool {
        self.read().closed
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().subscribers.len()
    }

    /// The value a new subscriber would receive on replay.
    pub fn latest(&self) -> Option<T> {
        self.read().latest.clone()
    }

    /// Whether both handles point to the same stream.
    pub fn same_channel(&self, other: &Channel<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Channel")
            .field("subscribers", &inner.subscribers.len())
            .field("has_latest", &inner.latest.is_some())
            .field("closed", &inner.closed)
            .finish()
    }
}

/// The stream form sessions publish on.
pub type FormChannel = Channel<FormEvent>;

/// Owner of the shared form channel.
///
/// Sessions built from clones of one hub publish on the same channel. When
/// that channel has been closed, [`Hub::channel`] replaces it with a fresh
/// one.
#[derive(Debug, Clone, Default)]
pub struct Hub {
    current: Arc<RwLock<FormChannel>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live channel, created anew if the previous one was closed.
    pub fn channel(&self) -> FormChannel {
        {
            let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
            if !current.is_closed() {
                return current.clone();
            }
        }

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if current.is_closed() {
            debug!("Form channel closed, creating a new one");
            *current = FormChannel::new();
        }
        current.clone()
    }
}

/// A session's publishing handle.
///
/// Every listener of a session holds a clone. The channel is looked up
/// through the hub on each publication, so a channel closed by another
/// session is replaced instead of swallowing events. Halting stops all
/// further publications from that session.
#[derive(Debug, Clone)]
pub struct Publisher {
    hub: Hub,
    active: Arc<AtomicBool>,
}

impl Publisher {
    pub fn new(hub: Hub) -> Self {
        Self {
            hub,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Publish a snapshot of `store` tagged with `event`.
    /// Returns false if nothing was published.
    pub fn publish(&self, event: EventKind, store: &FormStore) -> bool {
        if !self.is_active() {
            trace!("Publisher halted, dropping {event}");
            return false;
        }
        let captured = FormEvent::capture(event, store);
        trace!("Publishing {event}, form valid: {}", captured.form_state.is_valid);

        let published = self.hub.channel().publish(captured);
        if !published {
            warn!("Dropped {event} publication on a closed channel");
        }
        published
    }

    /// The live channel, recreated by the hub if it was closed.
    pub fn channel(&self) -> FormChannel {
        self.hub.channel()
    }

    /// Stop publishing for good.
    pub fn halt(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
