//! Play session: drives puzzles level by level.
//!
//! A [`PaintGame`] owns the level catalog, the progression counters, the
//! persisted store and the active puzzle. Swipes enter here, events leave
//! through the [`EventBus`], and progression is written back to the store
//! only when a level is completed.

use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::events::{EventBus, EventSubscriber, PuzzleEvent};
use crate::games::linepaint::{
    Direction, LevelCatalog, LevelDefinition, LevelError, PuzzleInProgress, PuzzleSetup,
    PuzzleSolved, SwipeOutcome, SwipeTransition, VerticalAxis,
};
use crate::progression::ProgressionState;
use crate::store::{ProgressStore, StoreError};

/// Error surfaced by a play session.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The level could not be set up.
    #[display("{}", _0)]
    Level(LevelError),
    /// Progression could not be read or written.
    #[display("{}", _0)]
    Store(StoreError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Level(err) => Some(err),
            GameError::Store(err) => Some(err),
        }
    }
}

/// Phase of the active puzzle.
#[derive(Debug)]
enum ActivePuzzle {
    Playing(PuzzleInProgress),
    Solved(PuzzleSolved),
}

/// A play session over a level catalog.
#[derive(Debug)]
pub struct PaintGame<S: ProgressStore> {
    catalog: LevelCatalog,
    store: S,
    progression: ProgressionState,
    reward_per_level: u32,
    cell_size: f32,
    axis: VerticalAxis,
    bus: EventBus,
    active: Option<ActivePuzzle>,
}

impl<S: ProgressStore> PaintGame<S> {
    /// Starts a session at the level recorded in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the store cannot be read or the level's grid
    /// cannot be built.
    #[instrument(skip_all, fields(levels = catalog.len()))]
    pub fn new(catalog: LevelCatalog, store: S, config: &GameConfig) -> Result<Self, GameError> {
        let progression = ProgressionState::load(&store, catalog.len())?;
        info!(
            level = progression.current_level_index(),
            reward = progression.total_reward(),
            "Session starting"
        );

        let mut game = Self {
            catalog,
            store,
            progression,
            reward_per_level: *config.reward_per_level(),
            cell_size: *config.cell_size(),
            axis: *config.vertical_axis(),
            bus: EventBus::new(),
            active: None,
        };
        game.reload_level()?;
        Ok(game)
    }

    /// Adds an event subscriber.
    pub fn subscribe(&mut self, subscriber: impl EventSubscriber + 'static) {
        self.bus.subscribe(subscriber);
    }

    /// Applies one swipe to the active puzzle.
    ///
    /// Returns `Ok(None)` when the puzzle is already solved; input is
    /// ignored until [`PaintGame::reload_level`] starts the next one. On the
    /// swipe that solves the puzzle, progression advances once,
    /// `LevelCompleted` is published after the stroke events, and the new
    /// progression is saved.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Store`] if saving progression fails. The
    /// completion still stands in memory and `LevelCompleted` has already
    /// been published.
    #[instrument(skip(self), fields(level = self.progression.current_level_index()))]
    pub fn swipe(&mut self, direction: Direction) -> Result<Option<SwipeOutcome>, GameError> {
        let puzzle = match self.active.take() {
            Some(ActivePuzzle::Playing(puzzle)) => puzzle,
            other => {
                self.active = other;
                debug!("Puzzle already solved, swipe ignored");
                return Ok(None);
            }
        };

        let transition = puzzle.swipe(direction);
        let outcome = *transition.outcome();
        for event in PuzzleEvent::from_outcome(&outcome) {
            self.bus.publish(&event);
        }

        match transition {
            SwipeTransition::InProgress { puzzle, .. } => {
                self.active = Some(ActivePuzzle::Playing(puzzle));
            }
            SwipeTransition::Solved { puzzle, .. } => {
                self.active = Some(ActivePuzzle::Solved(puzzle));
                self.complete_level()?;
            }
        }

        Ok(Some(outcome))
    }

    #[instrument(skip(self))]
    fn complete_level(&mut self) -> Result<(), GameError> {
        let state = self
            .progression
            .on_level_complete(self.reward_per_level, self.catalog.len());

        self.bus.publish(&PuzzleEvent::LevelCompleted {
            new_level_index: state.current_level_index(),
            reward_total: state.total_reward(),
        });

        state.save(&mut self.store).map_err(|err| {
            warn!(error = %err, "Failed to persist progression");
            GameError::from(err)
        })
    }

    /// Starts the level at the current progression index from scratch.
    ///
    /// Serves both retry (mid-level) and next (after completion, since the
    /// index has already advanced).
    #[instrument(skip(self))]
    pub fn reload_level(&mut self) -> Result<(), GameError> {
        let index = self.catalog.wrap_index(self.progression.current_level_index());
        let level = self
            .catalog
            .get(index)
            .cloned()
            .ok_or(LevelError::EmptyCatalog)?;

        let setup = PuzzleSetup::new(level, self.cell_size, self.axis)?;
        self.active = Some(ActivePuzzle::Playing(setup.start()));
        info!(level = index, "Level started");
        Ok(())
    }

    /// Progression counters.
    pub fn progression(&self) -> ProgressionState {
        self.progression
    }

    /// Human-facing level number (1-based).
    pub fn level_number(&self) -> usize {
        self.progression.current_level_index() + 1
    }

    /// The level catalog.
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// The active level definition.
    pub fn level(&self) -> Option<&LevelDefinition> {
        match self.active.as_ref()? {
            ActivePuzzle::Playing(puzzle) => Some(puzzle.level()),
            ActivePuzzle::Solved(puzzle) => Some(puzzle.level()),
        }
    }

    /// The active puzzle, if still being drawn.
    pub fn puzzle(&self) -> Option<&PuzzleInProgress> {
        match self.active.as_ref()? {
            ActivePuzzle::Playing(puzzle) => Some(puzzle),
            ActivePuzzle::Solved(_) => None,
        }
    }

    /// The active puzzle, if solved.
    pub fn solved(&self) -> Option<&PuzzleSolved> {
        match self.active.as_ref()? {
            ActivePuzzle::Solved(puzzle) => Some(puzzle),
            ActivePuzzle::Playing(_) => None,
        }
    }

    /// True once the active puzzle is solved.
    pub fn is_solved(&self) -> bool {
        self.solved().is_some()
    }

    /// ASCII view of the active puzzle.
    pub fn display(&self) -> String {
        match self.active.as_ref() {
            Some(ActivePuzzle::Playing(puzzle)) => puzzle.display(),
            Some(ActivePuzzle::Solved(puzzle)) => puzzle.display(),
            None => String::new(),
        }
    }

    /// The persisted store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store, for settings such as sound.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LEVEL_KEY, MemoryStore, REWARD_KEY, StoreError};
    use std::sync::mpsc;

    const PACK: &str = r#"
[[levels]]
width = 3
height = 3
brush_start = [0, 0]
target = [[[0, 0], [1, 0]], [[1, 0], [1, 1]]]

[[levels]]
width = 2
height = 1
brush_start = [0, 0]
target = [[[0, 0], [1, 0]]]
"#;

    fn game() -> PaintGame<MemoryStore> {
        let catalog = LevelCatalog::from_toml_str(PACK).unwrap();
        PaintGame::new(catalog, MemoryStore::new(), &GameConfig::default()).unwrap()
    }

    #[test]
    fn test_swipes_after_solve_are_ignored() {
        let mut game = game();
        game.swipe(Direction::Right).unwrap();
        game.swipe(Direction::Down).unwrap();
        assert!(game.is_solved());
        assert_eq!(game.swipe(Direction::Up).unwrap(), None);
        assert_eq!(game.progression().total_reward(), 15);
    }

    #[test]
    fn test_completion_persists() {
        let mut game = game();
        game.swipe(Direction::Right).unwrap();
        game.swipe(Direction::Down).unwrap();
        assert_eq!(game.store().get_int(LEVEL_KEY).unwrap(), Some(1));
        assert_eq!(game.store().get_int(REWARD_KEY).unwrap(), Some(15));
    }

    #[test]
    fn test_no_write_before_completion() {
        let mut game = game();
        game.swipe(Direction::Right).unwrap();
        assert_eq!(game.store().get_int(LEVEL_KEY).unwrap(), None);
    }

    #[test]
    fn test_event_order_on_completion() {
        let (tx, rx) = mpsc::channel();
        let mut game = game();
        game.subscribe(tx);
        game.swipe(Direction::Right).unwrap();
        game.swipe(Direction::Down).unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[2], PuzzleEvent::ConnectionAdded { .. }));
        assert!(matches!(events[3], PuzzleEvent::BrushMoved { .. }));
        assert_eq!(
            events[4],
            PuzzleEvent::LevelCompleted {
                new_level_index: 1,
                reward_total: 15
            }
        );
    }

    #[test]
    fn test_reload_starts_next_level() {
        let mut game = game();
        game.swipe(Direction::Right).unwrap();
        game.swipe(Direction::Down).unwrap();
        game.reload_level().unwrap();

        assert_eq!(game.level_number(), 2);
        assert_eq!(*game.level().unwrap().width(), 2);
        assert!(game.puzzle().unwrap().ledger().is_empty());
    }

    struct FailingStore;

    impl ProgressStore for FailingStore {
        fn get_int(&self, _key: &str) -> Result<Option<i64>, StoreError> {
            Ok(None)
        }

        fn set_int(&mut self, _key: &str, _value: i64) -> Result<(), StoreError> {
            Err(StoreError::new("disk full"))
        }
    }

    #[test]
    fn test_save_failure_surfaces_without_double_award() {
        let catalog = LevelCatalog::from_toml_str(PACK).unwrap();
        let (tx, rx) = mpsc::channel();
        let mut game = PaintGame::new(catalog, FailingStore, &GameConfig::default()).unwrap();
        game.subscribe(tx);
        game.swipe(Direction::Right).unwrap();

        assert!(matches!(game.swipe(Direction::Down), Err(GameError::Store(_))));
        assert!(game.is_solved());
        assert_eq!(game.swipe(Direction::Left).unwrap(), None);
        assert_eq!(game.progression().total_reward(), 15);

        let completions: Vec<_> = rx
            .try_iter()
            .filter(|event| matches!(event, PuzzleEvent::LevelCompleted { .. }))
            .collect();
        assert_eq!(
            completions,
            vec![PuzzleEvent::LevelCompleted {
                new_level_index: 1,
                reward_total: 15
            }]
        );
    }
}
