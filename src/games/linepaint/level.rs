//! Level definitions and level-pack loading.
//!
//! A level pack is an ordered list of levels, stored as TOML:
//!
//! ```toml
//! [[levels]]
//! width = 3
//! height = 3
//! brush_start = [0, 0]
//! target = [[[0, 0], [1, 0]], [[1, 0], [1, 1]]]
//! ```
//!
//! or the equivalent JSON object with a `levels` array. Every record is
//! validated on load; one bad record rejects the whole pack.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use super::edge::{Edge, EdgeError};
use super::grid::Coordinate;

/// Error loading or validating level data.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum LevelError {
    /// Width or height is zero or too large.
    #[display("Invalid grid dimensions {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A coordinate lies outside the grid.
    #[display("Coordinate {} is outside the {}x{} grid", coord, width, height)]
    OutOfBounds {
        /// Offending coordinate.
        coord: Coordinate,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// The target pattern has no edges.
    #[display("Target pattern is empty")]
    EmptyPattern,

    /// A target edge is malformed.
    #[display("Invalid target edge: {}", _0)]
    #[from]
    Edge(EdgeError),

    /// The pack contains no levels.
    #[display("Level pack contains no levels")]
    EmptyCatalog,

    /// A specific level in a pack failed validation.
    #[display("Level {}: {}", index, source)]
    InLevel {
        /// Zero-based level index.
        index: usize,
        /// Underlying validation failure.
        source: Box<LevelError>,
    },

    /// The pack file could not be read.
    #[display("Failed to read level pack '{}': {}", path, message)]
    Io {
        /// Pack path.
        path: String,
        /// I/O error text.
        message: String,
    },

    /// The pack could not be parsed.
    #[display("Failed to parse level pack: {}", _0)]
    Parse(String),

    /// The pack file extension is neither `.toml` nor `.json`.
    #[display("Unsupported level pack format: '{}'", _0)]
    UnsupportedFormat(String),
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Edge(err) => Some(err),
            LevelError::InLevel { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// A validated, immutable level.
#[derive(Debug, Clone, PartialEq, Getters, Serialize)]
pub struct LevelDefinition {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Cell the brush starts on.
    brush_start: Coordinate,
    /// Edges the drawing must match exactly.
    target: Vec<Edge>,
}

impl LevelDefinition {
    /// Validates and builds a level.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] for zero dimensions, an out-of-bounds brush or
    /// edge endpoint, a non-adjacent edge, or an empty target.
    #[instrument(skip(target), fields(edges = target.len()))]
    pub fn new(
        width: u32,
        height: u32,
        brush_start: Coordinate,
        target: Vec<Edge>,
    ) -> Result<Self, LevelError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(LevelError::InvalidDimensions { width, height });
        }

        let in_bounds = |coord: Coordinate| {
            coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < width && (coord.y as u32) < height
        };
        let out_of_bounds = |coord: Coordinate| LevelError::OutOfBounds {
            coord,
            width,
            height,
        };

        if !in_bounds(brush_start) {
            return Err(out_of_bounds(brush_start));
        }
        if target.is_empty() {
            return Err(LevelError::EmptyPattern);
        }
        for edge in &target {
            for endpoint in [edge.start(), edge.end()] {
                if !in_bounds(endpoint) {
                    return Err(out_of_bounds(endpoint));
                }
            }
        }

        let level = Self {
            width,
            height,
            brush_start,
            target,
        };
        let duplicates = level.duplicate_targets();
        if duplicates > 0 {
            warn!(duplicates, "Target pattern repeats edges; level cannot be completed");
        }
        Ok(level)
    }

    /// Number of target edges that repeat an earlier one.
    ///
    /// A level with any duplicates can never be completed, since a drawing
    /// holds each edge at most once.
    pub fn duplicate_targets(&self) -> usize {
        self.target
            .iter()
            .enumerate()
            .filter(|(i, edge)| self.target[..*i].contains(*edge))
            .count()
    }

    /// True if some drawing can match the target.
    pub fn is_winnable(&self) -> bool {
        self.duplicate_targets() == 0
    }
}

/// On-disk shape of a level record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRecord {
    width: u32,
    height: u32,
    brush_start: [i32; 2],
    target: Vec<[[i32; 2]; 2]>,
}

impl TryFrom<LevelRecord> for LevelDefinition {
    type Error = LevelError;

    fn try_from(record: LevelRecord) -> Result<Self, Self::Error> {
        let point = |[x, y]: [i32; 2]| Coordinate::new(x, y);
        let target = record
            .target
            .into_iter()
            .map(|[a, b]| Edge::new(point(a), point(b)))
            .collect::<Result<Vec<_>, _>>()?;
        LevelDefinition::new(record.width, record.height, point(record.brush_start), target)
    }
}

/// On-disk shape of a level pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PackRecord {
    levels: Vec<LevelRecord>,
}

/// Ordered, non-empty collection of levels.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Builds a catalog from validated levels.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::EmptyCatalog`] if `levels` is empty.
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        Ok(Self { levels })
    }

    /// Parses a TOML level pack.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, LevelError> {
        let pack: PackRecord =
            toml::from_str(content).map_err(|e| LevelError::Parse(e.to_string()))?;
        Self::from_pack(pack)
    }

    /// Parses a JSON level pack.
    #[instrument(skip(content))]
    pub fn from_json_str(content: &str) -> Result<Self, LevelError> {
        let pack: PackRecord =
            serde_json::from_str(content).map_err(|e| LevelError::Parse(e.to_string()))?;
        Self::from_pack(pack)
    }

    /// Loads a level pack, picking the format from the file extension.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        debug!("Loading level pack");
        let content = std::fs::read_to_string(path).map_err(|e| LevelError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let catalog = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => return Err(LevelError::UnsupportedFormat(path.display().to_string())),
        };

        info!(levels = catalog.len(), "Level pack loaded");
        Ok(catalog)
    }

    fn from_pack(pack: PackRecord) -> Result<Self, LevelError> {
        let levels = pack
            .levels
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                LevelDefinition::try_from(record).map_err(|e| LevelError::InLevel {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; a catalog holds at least one level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level at `index`, if defined.
    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    /// Maps any index onto a defined level.
    pub fn wrap_index(&self, index: usize) -> usize {
        index % self.levels.len()
    }

    /// Levels in pack order.
    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }
}
