#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Energy Grid engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative board, and pure systems. Adapters submit [`Command`] values
//! describing desired board mutations, the world executes those commands via
//! its `apply` entry point and reports [`Event`] values, and pure systems read
//! immutable [`BoardView`] snapshots to derive energy accounting and scores.

mod energy;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use energy::{EnergyReport, EnergySegment, Waypoint};

/// Highest level any tower can reach through upgrades.
pub const MAX_LEVEL: u8 = 5;

const LEVEL_COUNT: usize = MAX_LEVEL as usize;

const GENERATOR_BASE_ENERGY: [f64; LEVEL_COUNT] = [100.0, 125.0, 150.0, 175.0, 200.0];
const AMPLIFIER_MULTIPLIER: [f64; LEVEL_COUNT] = [1.25, 1.45, 1.60, 1.72, 1.82];
const COLLECTOR_EFFICIENCY: [f64; LEVEL_COUNT] = [0.60, 0.72, 0.81, 0.87, 0.91];

/// Commands that express all permissible board mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests placement of a tower on the provided cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Cell that receives the tower.
        cell: CellCoord,
    },
    /// Requests removal of the tower occupying the provided cell.
    RemoveTower {
        /// Cell whose tower should be removed.
        cell: CellCoord,
    },
    /// Requests that the tower on the provided cell gains one level.
    UpgradeTower {
        /// Cell whose tower should be upgraded.
        cell: CellCoord,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a tower was placed on the board.
    TowerPlaced {
        /// Cell that received the tower.
        cell: CellCoord,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Tower that previously occupied the cell and was overwritten.
        replaced: Option<TowerKind>,
    },
    /// Confirms that a tower was removed from the board.
    TowerRemoved {
        /// Cell that was cleared.
        cell: CellCoord,
        /// Type of tower that was removed.
        kind: TowerKind,
    },
    /// Confirms that a tower gained a level.
    TowerUpgraded {
        /// Cell holding the upgraded tower.
        cell: CellCoord,
        /// Type of the upgraded tower.
        kind: TowerKind,
        /// Level reached after the upgrade.
        level: TowerLevel,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
}

/// Location of a single grid cell expressed as column (`x`) and row (`y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the neighbouring cell in `direction` when it lies inside a
    /// square grid of side `size`.
    #[must_use]
    pub fn step(self, direction: Direction, size: u32) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        if column < size && row < size {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }

    /// Iterates over the in-bounds orthogonal neighbours of the cell.
    pub fn neighbors(self, size: u32) -> impl Iterator<Item = CellCoord> {
        Direction::EMISSION_ORDER
            .into_iter()
            .filter_map(move |direction| self.step(direction, size))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cardinal directions along which generators emit beams.
///
/// Rows grow downwards, so [`Direction::South`] moves towards larger row
/// indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Order in which a generator emits its four beams.
    pub const EMISSION_ORDER: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    /// Column and row deltas of a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Types of towers that can be constructed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Emits energy in all four cardinal directions.
    Generator,
    /// Multiplies passing energy without stopping it.
    Amplifier,
    /// Harvests a fraction of passing energy.
    Collector,
}

impl TowerKind {
    /// Every constructible tower kind in selection order.
    pub const ALL: [TowerKind; 3] = [
        TowerKind::Generator,
        TowerKind::Amplifier,
        TowerKind::Collector,
    ];

    /// One-letter symbol used by adapters and text layouts.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Generator => 'G',
            Self::Amplifier => 'A',
            Self::Collector => 'C',
        }
    }

    /// Human readable name of the tower kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generator => "Generator",
            Self::Amplifier => "Amplifier",
            Self::Collector => "Collector",
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<char> for TowerKind {
    type Error = TowerTypeError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol.to_ascii_uppercase() {
            'G' => Ok(Self::Generator),
            'A' => Ok(Self::Amplifier),
            'C' => Ok(Self::Collector),
            _ => Err(TowerTypeError::InvalidTowerType(symbol.to_string())),
        }
    }
}

impl FromStr for TowerKind {
    type Err = TowerTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let mut chars = trimmed.chars();
        if let (Some(symbol), None) = (chars.next(), chars.next()) {
            return Self::try_from(symbol);
        }

        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TowerTypeError::InvalidTowerType(trimmed.to_owned()))
    }
}

impl TryFrom<CellKind> for TowerKind {
    type Error = TowerTypeError;

    fn try_from(kind: CellKind) -> Result<Self, Self::Error> {
        match kind {
            CellKind::Tower(tower) => Ok(tower),
            other => Err(TowerTypeError::InvalidTowerType(other.to_string())),
        }
    }
}

/// Content occupying a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Nothing occupies the cell; beams pass freely.
    #[default]
    Empty,
    /// Permanent blocker placed when the board is created.
    Obstacle,
    /// A player-built tower.
    Tower(TowerKind),
}

impl CellKind {
    /// Returns the tower kind when the cell holds a tower.
    #[must_use]
    pub const fn tower(self) -> Option<TowerKind> {
        match self {
            Self::Tower(kind) => Some(kind),
            Self::Empty | Self::Obstacle => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Obstacle => f.write_str("Obstacle"),
            Self::Tower(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// Upgrade level of a tower, always within `1..=MAX_LEVEL`.
///
/// Deserialization goes through [`TowerLevel::new`], so decoded cells never
/// carry a level outside the stat tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TowerLevel(u8);

impl TowerLevel {
    /// Level assigned to freshly placed towers.
    pub const MIN: TowerLevel = TowerLevel(1);
    /// Highest reachable level.
    pub const MAX: TowerLevel = TowerLevel(MAX_LEVEL);

    /// Creates a level when `value` lies within `1..=MAX_LEVEL`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= MAX_LEVEL {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns the following level, or `None` at the ceiling.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u8> for TowerLevel {
    type Error = TowerLevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(TowerLevelError::OutOfRange(value))
    }
}

impl From<TowerLevel> for u8 {
    fn from(level: TowerLevel) -> Self {
        level.0
    }
}

impl Default for TowerLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for TowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Energy a generator emits per direction at the provided level.
#[must_use]
pub const fn generator_base_energy(level: TowerLevel) -> f64 {
    GENERATOR_BASE_ENERGY[level.index()]
}

/// Factor an amplifier applies to passing energy at the provided level.
#[must_use]
pub const fn amplifier_multiplier(level: TowerLevel) -> f64 {
    AMPLIFIER_MULTIPLIER[level.index()]
}

/// Fraction of passing energy a collector harvests at the provided level.
#[must_use]
pub const fn collector_efficiency(level: TowerLevel) -> f64 {
    COLLECTOR_EFFICIENCY[level.index()]
}

/// A single board slot together with its occupant and level.
///
/// Stat lookups return neutral values when the cell does not hold the tower
/// type they describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TowerCell {
    cell: CellCoord,
    kind: CellKind,
    level: TowerLevel,
}

impl TowerCell {
    /// Creates an empty level-one cell at the provided coordinate.
    #[must_use]
    pub const fn empty(cell: CellCoord) -> Self {
        Self {
            cell,
            kind: CellKind::Empty,
            level: TowerLevel::MIN,
        }
    }

    /// Coordinate of the cell.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Content occupying the cell.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Current level. Inert unless the cell holds a tower.
    #[must_use]
    pub const fn level(&self) -> TowerLevel {
        self.level
    }

    /// Tower kind occupying the cell, if any.
    #[must_use]
    pub const fn tower(&self) -> Option<TowerKind> {
        self.kind.tower()
    }

    /// Reports whether the cell holds an obstacle.
    #[must_use]
    pub const fn is_obstacle(&self) -> bool {
        matches!(self.kind, CellKind::Obstacle)
    }

    /// Reports whether the cell is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, CellKind::Empty)
    }

    /// Per-direction emission of a generator, zero for any other content.
    #[must_use]
    pub const fn base_energy(&self) -> f64 {
        match self.kind {
            CellKind::Tower(TowerKind::Generator) => generator_base_energy(self.level),
            _ => 0.0,
        }
    }

    /// Amplification factor, `1.0` for anything but an amplifier.
    #[must_use]
    pub const fn amplifier_multiplier(&self) -> f64 {
        match self.kind {
            CellKind::Tower(TowerKind::Amplifier) => amplifier_multiplier(self.level),
            _ => 1.0,
        }
    }

    /// Collection efficiency, `0.0` for anything but a collector.
    #[must_use]
    pub const fn collector_efficiency(&self) -> f64 {
        match self.kind {
            CellKind::Tower(TowerKind::Collector) => collector_efficiency(self.level),
            _ => 0.0,
        }
    }

    /// Turns the cell into an obstacle.
    pub fn set_obstacle(&mut self) {
        self.kind = CellKind::Obstacle;
        self.level = TowerLevel::MIN;
    }

    /// Places a tower, resetting the level and returning any overwritten tower.
    pub fn set_tower(&mut self, kind: TowerKind) -> Option<TowerKind> {
        let replaced = self.kind.tower();
        self.kind = CellKind::Tower(kind);
        self.level = TowerLevel::MIN;
        replaced
    }

    /// Reverts a tower cell to empty. Empty and obstacle cells are untouched.
    pub fn clear_tower(&mut self) -> Option<TowerKind> {
        let removed = self.kind.tower()?;
        self.kind = CellKind::Empty;
        self.level = TowerLevel::MIN;
        Some(removed)
    }

    /// Raises the level of a tower by one, returning the new level.
    ///
    /// Non-tower cells and towers at [`MAX_LEVEL`] are left unchanged.
    pub fn upgrade(&mut self) -> Option<TowerLevel> {
        if self.kind.tower().is_none() {
            return None;
        }
        let next = self.level.next()?;
        self.level = next;
        Some(next)
    }
}

/// Read-only view into a square board of tower cells stored row-major.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    cells: &'a [TowerCell],
    size: u32,
}

impl<'a> BoardView<'a> {
    /// Captures a view over `cells`, which must hold `size * size` entries in
    /// row-major order.
    #[must_use]
    pub fn new(cells: &'a [TowerCell], size: u32) -> Self {
        Self { cells, size }
    }

    /// Side length of the board in cells.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the cell at `coord`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&'a TowerCell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &'a TowerCell> + 'a {
        self.cells.iter()
    }

    /// Iterates over generator cells scanning columns left to right and each
    /// column top to bottom.
    pub fn generators(&self) -> impl Iterator<Item = &'a TowerCell> + 'a {
        let view = *self;
        (0..self.size)
            .flat_map(move |column| (0..view.size).map(move |row| CellCoord::new(column, row)))
            .filter_map(move |coord| view.cell(coord))
            .filter(|cell| cell.tower() == Some(TowerKind::Generator))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.size && cell.row() < self.size {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the board.
    OutOfBounds,
    /// The requested cell holds a permanent obstacle.
    Obstacle,
}

/// Rejection of a value that does not name a constructible tower.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TowerTypeError {
    /// The provided value is not one of Generator, Amplifier or Collector.
    #[error("invalid tower type `{0}`")]
    InvalidTowerType(String),
}

/// Rejection of a numeric level outside `1..=MAX_LEVEL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TowerLevelError {
    /// The value does not index the stat tables.
    #[error("tower level {0} is outside 1..=5")]
    OutOfRange(u8),
}

/// Problems detected while constructing a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardConfigError {
    /// Boards must contain at least one cell.
    #[error("board size must be positive")]
    ZeroSize,
    /// An explicit obstacle lies outside the board.
    #[error("obstacle {0} lies outside the board")]
    ObstacleOutOfBounds(CellCoord),
    /// Two explicit obstacles share an edge.
    #[error("obstacle {0} is orthogonally adjacent to another obstacle")]
    AdjacentObstacles(CellCoord),
}
