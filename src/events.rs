//! Events emitted to rendering, audio and UI collaborators.
//!
//! Subscribers only observe. The one way back into the puzzle is a swipe.

use serde::Serialize;
use std::sync::mpsc::Sender;
use tracing::{debug, info, instrument};

use crate::games::linepaint::{Coordinate, Edge, SwipeOutcome, ToggleResult};

/// Something observable happened in the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PuzzleEvent {
    /// The brush moved to a neighboring cell.
    BrushMoved {
        /// Cell the brush left.
        from: Coordinate,
        /// Cell the brush entered.
        to: Coordinate,
    },
    /// An edge was drawn.
    ConnectionAdded {
        /// The drawn edge.
        edge: Edge,
    },
    /// An edge was erased.
    ConnectionRemoved {
        /// The erased edge.
        edge: Edge,
    },
    /// The drawing matched the target and progression advanced.
    LevelCompleted {
        /// Level to play next.
        new_level_index: usize,
        /// Reward after banking this level.
        reward_total: u64,
    },
}

impl PuzzleEvent {
    /// Events describing a swipe outcome: the toggle, then the brush move.
    ///
    /// A blocked swipe produces no events.
    pub fn from_outcome(outcome: &SwipeOutcome) -> Vec<PuzzleEvent> {
        let Some(stroke) = outcome.stroke() else {
            return Vec::new();
        };

        let connection = match stroke.toggle {
            ToggleResult::Added => PuzzleEvent::ConnectionAdded { edge: stroke.edge },
            ToggleResult::Removed => PuzzleEvent::ConnectionRemoved { edge: stroke.edge },
        };
        vec![
            connection,
            PuzzleEvent::BrushMoved {
                from: stroke.from(),
                to: stroke.position,
            },
        ]
    }
}

/// Receives puzzle events.
pub trait EventSubscriber {
    /// Handles one event.
    fn on_event(&mut self, event: &PuzzleEvent);
}

impl EventSubscriber for Sender<PuzzleEvent> {
    fn on_event(&mut self, event: &PuzzleEvent) {
        if self.send(*event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

impl<F> EventSubscriber for F
where
    F: FnMut(&PuzzleEvent),
{
    fn on_event(&mut self, event: &PuzzleEvent) {
        self(event)
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventLogger;

impl EventSubscriber for EventLogger {
    fn on_event(&mut self, event: &PuzzleEvent) {
        match event {
            PuzzleEvent::LevelCompleted {
                new_level_index,
                reward_total,
            } => info!(new_level_index, reward_total, "Level completed"),
            other => debug!(event = ?other, "Puzzle event"),
        }
    }
}

/// Fans events out to subscribers in subscription order.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn EventSubscriber>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber.
    pub fn subscribe(&mut self, subscriber: impl EventSubscriber + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// True if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers `event` to every subscriber.
    #[instrument(skip(self), fields(subscribers = self.subscribers.len()))]
    pub fn publish(&mut self, event: &PuzzleEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.on_event(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::linepaint::{BrushStroke, Direction};
    use std::sync::mpsc;

    fn stroke(toggle: ToggleResult) -> SwipeOutcome {
        let edge = Edge::new((0, 0).into(), (1, 0).into()).unwrap();
        SwipeOutcome::Moved(BrushStroke::new(Direction::Right, edge, toggle, (1, 0).into()))
    }

    #[test]
    fn test_added_stroke_events() {
        let events = PuzzleEvent::from_outcome(&stroke(ToggleResult::Added));
        assert!(matches!(events[0], PuzzleEvent::ConnectionAdded { .. }));
        assert_eq!(
            events[1],
            PuzzleEvent::BrushMoved {
                from: (0, 0).into(),
                to: (1, 0).into()
            }
        );
    }

    #[test]
    fn test_removed_stroke_events() {
        let events = PuzzleEvent::from_outcome(&stroke(ToggleResult::Removed));
        assert!(matches!(events[0], PuzzleEvent::ConnectionRemoved { .. }));
    }

    #[test]
    fn test_blocked_has_no_events() {
        let blocked = SwipeOutcome::Blocked {
            direction: Direction::Up,
            position: (0, 0).into(),
        };
        assert!(PuzzleEvent::from_outcome(&blocked).is_empty());
    }

    #[test]
    fn test_bus_delivers_to_all() {
        let (tx, rx) = mpsc::channel();
        let mut bus = EventBus::new();
        bus.subscribe(tx);
        bus.subscribe(EventLogger);
        bus.subscribe(|event: &PuzzleEvent| {
            assert!(matches!(event, PuzzleEvent::LevelCompleted { .. }));
        });
        assert_eq!(bus.len(), 3);

        let event = PuzzleEvent::LevelCompleted {
            new_level_index: 1,
            reward_total: 15,
        };
        bus.publish(&event);
        assert_eq!(rx.try_recv().unwrap(), event);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = PuzzleEvent::LevelCompleted {
            new_level_index: 2,
            reward_total: 30,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["event"], "level_completed");
        assert_eq!(json["reward_total"], 30);
    }
}
