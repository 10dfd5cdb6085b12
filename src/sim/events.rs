//! Game events and the in-process listener registry
//!
//! Events are the only channel by which observers (HUD, audio, web bindings)
//! learn about round progress. Dispatch is synchronous and follows
//! registration order. Listeners only see the event, never the bus, so they
//! cannot re-dispatch from inside a callback.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A ring was resolved (points is 0 for a hit or miss)
    #[serde(rename_all = "camelCase")]
    RingPassed { ring_index: usize, points: u32 },
    /// Score went up
    #[serde(rename_all = "camelCase")]
    ScoreChanged { new_score: u32, points_added: u32 },
    GameStarted,
    GameEnded,
    GameReset,
}

impl GameEvent {
    pub fn topic(&self) -> EventTopic {
        match self {
            GameEvent::RingPassed { .. } => EventTopic::RingPassed,
            GameEvent::ScoreChanged { .. } => EventTopic::ScoreChanged,
            GameEvent::GameStarted => EventTopic::GameStarted,
            GameEvent::GameEnded => EventTopic::GameEnded,
            GameEvent::GameReset => EventTopic::GameReset,
        }
    }
}

/// Subscription topics, one per event variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTopic {
    RingPassed,
    ScoreChanged,
    GameStarted,
    GameEnded,
    GameReset,
}

impl EventTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventTopic::RingPassed => "ring_passed",
            EventTopic::ScoreChanged => "score_changed",
            EventTopic::GameStarted => "game_started",
            EventTopic::GameEnded => "game_ended",
            EventTopic::GameReset => "game_reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event topic: {0:?}")]
pub struct UnknownTopic(pub String);

impl FromStr for EventTopic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ring_passed" => Ok(EventTopic::RingPassed),
            "score_changed" => Ok(EventTopic::ScoreChanged),
            "game_started" => Ok(EventTopic::GameStarted),
            "game_ended" => Ok(EventTopic::GameEnded),
            "game_reset" => Ok(EventTopic::GameReset),
            _ => Err(UnknownTopic(s.to_string())),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

impl ListenerId {
    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

type Listener = Box<dyn FnMut(&GameEvent)>;

struct Subscription {
    id: ListenerId,
    topic: EventTopic,
    listener: Listener,
}

/// Topic-filtered observer list
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one topic
    pub fn subscribe<F>(&mut self, topic: EventTopic, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic,
            listener: Box::new(listener),
        });
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver an event to every listener of its topic, in registration order
    pub fn emit(&mut self, event: GameEvent) {
        let topic = event.topic();
        for sub in self.subscriptions.iter_mut().filter(|s| s.topic == topic) {
            (sub.listener)(&event);
        }
    }

    /// Number of listeners registered for a topic
    pub fn listener_count(&self, topic: EventTopic) -> usize {
        self.subscriptions.iter().filter(|s| s.topic == topic).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_registration_order() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = log.clone();
            bus.subscribe(EventTopic::GameStarted, move |_| log.borrow_mut().push(tag));
        }

        bus.emit(GameEvent::GameStarted);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_topic_filtering() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        bus.subscribe(EventTopic::ScoreChanged, move |_| *h.borrow_mut() += 1);

        bus.emit(GameEvent::GameStarted);
        bus.emit(GameEvent::RingPassed {
            ring_index: 0,
            points: 10,
        });
        assert_eq!(*hits.borrow(), 0);

        bus.emit(GameEvent::ScoreChanged {
            new_score: 10,
            points_added: 10,
        });
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        let id = bus.subscribe(EventTopic::GameEnded, move |_| *h.borrow_mut() += 1);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(GameEvent::GameEnded);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(bus.listener_count(EventTopic::GameEnded), 0);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(GameEvent::ScoreChanged {
            new_score: 30,
            points_added: 10,
        })
        .unwrap();
        assert_eq!(json["type"], "score_changed");
        assert_eq!(json["newScore"], 30);
        assert_eq!(json["pointsAdded"], 10);

        let json = serde_json::to_value(GameEvent::RingPassed {
            ring_index: 3,
            points: 0,
        })
        .unwrap();
        assert_eq!(json["type"], "ring_passed");
        assert_eq!(json["ringIndex"], 3);
    }

    #[test]
    fn test_topic_names_roundtrip() {
        for topic in [
            EventTopic::RingPassed,
            EventTopic::ScoreChanged,
            EventTopic::GameStarted,
            EventTopic::GameEnded,
            EventTopic::GameReset,
        ] {
            assert_eq!(topic.as_str().parse::<EventTopic>(), Ok(topic));
        }
        assert!("nope".parse::<EventTopic>().is_err());
    }
}
