#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Energy Grid.

mod obstacles;

use energy_grid_core::{
    BoardConfigError, BoardView, CellCoord, Command, Event, PlacementError, TowerCell, TowerKind,
    TowerLevel,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

const DEFAULT_BOARD_SIZE: u32 = 8;
const DEFAULT_OBSTACLE_COUNT: usize = 10;

/// Dimensions and obstacle density used when constructing a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    size: u32,
    obstacle_count: usize,
}

impl BoardConfig {
    /// Creates a configuration for a `size` x `size` board that attempts to
    /// place `obstacle_count` obstacles.
    pub fn new(size: u32, obstacle_count: usize) -> Result<Self, BoardConfigError> {
        if size == 0 {
            return Err(BoardConfigError::ZeroSize);
        }

        Ok(Self {
            size,
            obstacle_count,
        })
    }

    /// Side length of the board in cells.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of obstacles the layout attempts to place.
    #[must_use]
    pub const fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
        }
    }
}

/// Represents the authoritative Energy Grid board.
///
/// The board exclusively owns one [`TowerCell`] per coordinate. Obstacles are
/// laid out once during construction and never move afterwards.
#[derive(Clone, Debug)]
pub struct Board {
    size: u32,
    cells: Vec<TowerCell>,
}

impl Board {
    /// Creates a board whose obstacle layout is drawn from `rng`.
    #[must_use]
    pub fn new<R>(config: BoardConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut board = Self::open(config.size);
        let placed = obstacles::scatter(&mut board, config.obstacle_count, rng);
        debug!(
            size = config.size,
            requested = config.obstacle_count,
            placed,
            "obstacle layout generated"
        );
        board
    }

    /// Creates a board whose obstacle layout is reproducible from `seed`.
    #[must_use]
    pub fn seeded(config: BoardConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    /// Creates a board with an explicit obstacle layout.
    ///
    /// The layout must lie inside the board and contain no orthogonally
    /// adjacent obstacles.
    pub fn with_obstacles<I>(size: u32, obstacles: I) -> Result<Self, BoardConfigError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        if size == 0 {
            return Err(BoardConfigError::ZeroSize);
        }

        let mut board = Self::open(size);
        for cell in obstacles {
            if board.index(cell).is_none() {
                return Err(BoardConfigError::ObstacleOutOfBounds(cell));
            }
            if board.touches_obstacle(cell) {
                return Err(BoardConfigError::AdjacentObstacles(cell));
            }
            if let Some(slot) = board.cell_mut(cell) {
                slot.set_obstacle();
            }
        }
        Ok(board)
    }

    fn open(size: u32) -> Self {
        let cells = (0..size)
            .flat_map(|row| {
                (0..size).map(move |column| TowerCell::empty(CellCoord::new(column, row)))
            })
            .collect();
        Self { size, cells }
    }

    /// Side length of the board in cells.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns a copy of the cell at `cell`, or `None` outside the board.
    #[must_use]
    pub fn get_cell(&self, cell: CellCoord) -> Option<TowerCell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Places a tower on `cell`, overwriting whatever the cell held and
    /// resetting the level to one.
    ///
    /// Returns the tower that was replaced, if any. Player-facing placement
    /// goes through [`apply`], which refuses obstacle cells.
    pub fn place_tower(
        &mut self,
        cell: CellCoord,
        kind: TowerKind,
    ) -> Result<Option<TowerKind>, PlacementError> {
        let slot = self.cell_mut(cell).ok_or(PlacementError::OutOfBounds)?;
        Ok(slot.set_tower(kind))
    }

    /// Reverts the tower on `cell` to an empty slot.
    ///
    /// Empty cells, obstacles and out-of-bounds coordinates are ignored.
    pub fn remove_tower(&mut self, cell: CellCoord) -> Option<TowerKind> {
        self.cell_mut(cell)?.clear_tower()
    }

    /// Raises the level of the tower on `cell`, returning the new level.
    ///
    /// Non-tower cells and towers already at the maximum level are ignored.
    pub fn upgrade(&mut self, cell: CellCoord) -> Option<TowerLevel> {
        self.cell_mut(cell)?.upgrade()
    }

    /// Captures an immutable view of the board for pure systems.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        BoardView::new(&self.cells, self.size)
    }

    fn cell_mut(&mut self, cell: CellCoord) -> Option<&mut TowerCell> {
        let index = self.index(cell)?;
        self.cells.get_mut(index)
    }

    fn touches_obstacle(&self, cell: CellCoord) -> bool {
        cell.neighbors(self.size).any(|neighbor| {
            self.get_cell(neighbor)
                .is_some_and(|candidate| candidate.is_obstacle())
        })
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

/// Applies the provided command to the board, mutating state deterministically.
///
/// Placement onto an obstacle is rejected so the layout stays fixed for the
/// whole session. Removal and upgrade requests against ineligible cells are
/// silent no-ops and report no event.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceTower { kind, cell } => match checked_placement(board, cell, kind) {
            Ok(replaced) => {
                debug!(%cell, %kind, "tower placed");
                out_events.push(Event::TowerPlaced {
                    cell,
                    kind,
                    replaced,
                });
            }
            Err(reason) => {
                debug!(%cell, %kind, ?reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected { cell, kind, reason });
            }
        },
        Command::RemoveTower { cell } => {
            if let Some(kind) = board.remove_tower(cell) {
                debug!(%cell, %kind, "tower removed");
                out_events.push(Event::TowerRemoved { cell, kind });
            }
        }
        Command::UpgradeTower { cell } => {
            let Some(level) = board.upgrade(cell) else {
                return;
            };
            let Some(kind) = board.get_cell(cell).and_then(|slot| slot.tower()) else {
                return;
            };
            debug!(%cell, %kind, %level, "tower upgraded");
            out_events.push(Event::TowerUpgraded { cell, kind, level });
        }
    }
}

fn checked_placement(
    board: &mut Board,
    cell: CellCoord,
    kind: TowerKind,
) -> Result<Option<TowerKind>, PlacementError> {
    if board.get_cell(cell).is_some_and(|slot| slot.is_obstacle()) {
        return Err(PlacementError::Obstacle);
    }
    board.place_tower(cell, kind)
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use energy_grid_core::{BoardView, CellCoord, TowerCell};

    use super::Board;

    /// Provides an immutable snapshot of every cell on the board.
    #[must_use]
    pub fn board_view(board: &Board) -> BoardView<'_> {
        board.view()
    }

    /// Retrieves the cell at the provided coordinate, if it exists.
    #[must_use]
    pub fn cell(board: &Board, cell: CellCoord) -> Option<TowerCell> {
        board.get_cell(cell)
    }

    /// Enumerates obstacle coordinates in row-major order.
    #[must_use]
    pub fn obstacles(board: &Board) -> Vec<CellCoord> {
        board
            .view()
            .iter()
            .filter(|slot| slot.is_obstacle())
            .map(TowerCell::cell)
            .collect()
    }

    /// Enumerates every tower cell in row-major order.
    #[must_use]
    pub fn towers(board: &Board) -> Vec<TowerCell> {
        board
            .view()
            .iter()
            .filter(|slot| slot.tower().is_some())
            .copied()
            .collect()
    }
}
