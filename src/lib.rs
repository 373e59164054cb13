//! Strictly Linepaint - a type-safe single-stroke line-painting puzzle
//!
//! The player steers a brush across a rectangular grid of cells. Each swipe
//! moves the brush one cell and toggles the edge it crosses. A level is
//! solved when the drawn edges match the level's target pattern exactly.
//!
//! # Architecture
//!
//! - **Games**: the puzzle core (grid, edges, ledger, brush, win rules),
//!   modelled as typestate phases `PuzzleSetup -> PuzzleInProgress -> PuzzleSolved`
//! - **Progression**: level index and accumulated reward
//! - **Store**: integer key-value persistence for progression and settings
//! - **Events**: observer bus for renderers, audio and UI
//! - **Session**: [`PaintGame`], which ties the above together
//!
//! # Example
//!
//! ```no_run
//! use strictly_linepaint::{Direction, GameConfig, LevelCatalog, MemoryStore, PaintGame};
//!
//! # fn example() -> anyhow::Result<()> {
//! let catalog = LevelCatalog::from_file("levels.toml")?;
//! let mut game = PaintGame::new(catalog, MemoryStore::new(), &GameConfig::default())?;
//! game.swipe(Direction::Right)?;
//! println!("{}", game.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod events;
mod games;
mod progression;
mod session;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Events
pub use events::{EventBus, EventLogger, EventSubscriber, PuzzleEvent};

// Crate-level exports - Progression and persistence
pub use progression::{LEVEL_REWARD, ProgressionState};
pub use store::{
    LEVEL_KEY, MemoryStore, ProgressStore, REWARD_KEY, SOUND_KEY, StoreError, TomlFileStore,
    sound_enabled, toggle_sound,
};

// Crate-level exports - Session
pub use session::{GameError, PaintGame};

// Crate-level exports - Puzzle types
pub use games::linepaint::{
    BlockedIsNoOp, BrushOnGridInvariant, BrushSession, BrushStroke, CellCenter, ConnectionLedger,
    Coordinate, Direction, Edge, EdgeError, EdgesOnGridInvariant, Grid, Invariant, InvariantSet,
    InvariantViolation, LevelCatalog, LevelDefinition, LevelError, LinePaintInvariants,
    PuzzleInProgress, PuzzleResult, PuzzleSetup, PuzzleSolved, StrokeToggledOnce, SwipeContract,
    SwipeOutcome, SwipeTransition, ToggleResult, UniqueEdgesInvariant, VerticalAxis, extra_edges,
    is_complete, missing_edges, render,
};
