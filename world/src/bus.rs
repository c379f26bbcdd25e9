//! Topic-keyed subscriber lists backing the world's event bus.
//!
//! Dispatch works on a snapshot of the topic's list taken before the first
//! delivery. Subscribers added while an event is being delivered start with
//! the next publish; subscribers removed while an event is being delivered
//! still receive it if they were part of the snapshot. The world skips entity
//! subscribers whose entity has already been torn down.

use std::collections::BTreeMap;

use tank_arena_core::{EntityId, EventKind, SystemId};

/// Party that can receive events from the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subscriber {
    /// The entity registry, which tracks creation and teardown.
    Registry,
    /// The collision detector, which reacts to moves.
    CollisionDetector,
    /// An entity's own event handler.
    Sprite(EntityId),
    /// A reactive system answering with commands.
    System(SystemId),
}

#[derive(Debug, Default)]
pub(crate) struct EventBus {
    topics: BTreeMap<EventKind, Vec<Subscriber>>,
}

impl EventBus {
    /// Registers interest in `kinds`, keeping subscription order. Repeats are ignored.
    pub(crate) fn subscribe(&mut self, subscriber: Subscriber, kinds: &[EventKind]) {
        for kind in kinds {
            let list = self.topics.entry(*kind).or_default();
            if !list.contains(&subscriber) {
                list.push(subscriber);
            }
        }
    }

    /// Removes `subscriber` from every topic.
    pub(crate) fn unsubscribe(&mut self, subscriber: Subscriber) {
        for list in self.topics.values_mut() {
            list.retain(|existing| *existing != subscriber);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.topics.clear();
    }

    /// Copy of the subscribers for `kind` at this instant.
    pub(crate) fn snapshot(&self, kind: EventKind) -> Vec<Subscriber> {
        self.topics.get(&kind).cloned().unwrap_or_default()
    }

    pub(crate) fn is_subscribed(&self, subscriber: Subscriber, kind: EventKind) -> bool {
        self.topics
            .get(&kind)
            .is_some_and(|list| list.contains(&subscriber))
    }
}
