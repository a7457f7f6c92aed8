//! Common types for the game core: coordinates, cell states, attack outcomes and errors.

use core::fmt;

use crate::config::GRID_SIZE;

/// A board coordinate. `x` is the column, `y` is the row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

/// Orthogonal steps in the order the hunt strategies enqueue them.
const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// Position of this coordinate in a row-major flat grid.
    pub fn index(&self) -> usize {
        self.y * GRID_SIZE + self.x
    }

    pub fn from_index(idx: usize) -> Self {
        Self {
            x: idx % GRID_SIZE,
            y: idx / GRID_SIZE,
        }
    }

    /// Offset by (`dx`, `dy`), or `None` when the result leaves the board.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let c = Self { x, y };
        c.in_bounds().then_some(c)
    }

    /// In-bounds orthogonal neighbours: right, left, down, up.
    pub fn orthogonal_neighbours(self) -> impl Iterator<Item = Coord> {
        ORTHOGONAL
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// In-bounds cells of the 3×3 block centred on this coordinate, itself included.
    pub fn block(self) -> impl Iterator<Item = Coord> {
        (-1..=1isize).flat_map(move |dy| (-1..=1isize).filter_map(move |dx| self.offset(dx, dy)))
    }

    /// Chebyshev (king-move) distance between two coordinates.
    pub fn chebyshev(&self, other: &Coord) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// Unhit ship segment. Never revealed to the attacker.
    Ship,
    Hit,
    Miss,
    Destroyed,
}

impl CellState {
    /// `Hit`, `Miss` and `Destroyed` cells are no longer legal targets.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss | CellState::Destroyed)
    }

    /// What the attacker is allowed to see of this cell.
    pub fn revealed(self) -> CellState {
        match self {
            CellState::Ship => CellState::Empty,
            other => other,
        }
    }
}

/// Result of an attack on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Struck a ship segment that was not its last.
    Hit,
    /// Struck open water.
    Miss,
    /// Struck the last intact segment of a ship.
    Destroyed,
    /// The cell was already resolved; nothing changed.
    AlreadyResolved,
}

impl AttackOutcome {
    /// `Hit` and `Destroyed` both give the attacker another shot.
    pub fn is_hit(self) -> bool {
        matches!(self, AttackOutcome::Hit | AttackOutcome::Destroyed)
    }
}

/// Why a ship placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRejection {
    /// Part of the ship would hang off the board.
    OutOfBounds,
    /// The ship would overlap or touch (also diagonally) an existing ship.
    TouchesShip,
}

/// Errors returned by board and game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate is outside the board.
    OutOfBounds { x: usize, y: usize },
    /// Ship size outside `1..=MAX_SHIP_SIZE`.
    InvalidShipSize(usize),
    /// Ship could not be placed at the requested position.
    InvalidPlacement(PlacementRejection),
    /// The action is not allowed in the current phase.
    OutOfTurnAction { phase: crate::game::GamePhase },
    /// Random fleet placement failed repeatedly.
    ExhaustedPlacementRetries { resets: usize },
    /// No unresolved cell is left to target.
    NoTargetAvailable,
    /// A `Ship` cell had no ship recorded at that coordinate.
    UnknownShipHit(Coord),
}

impl From<PlacementRejection> for GameError {
    fn from(reason: PlacementRejection) -> Self {
        GameError::InvalidPlacement(reason)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { x, y } => write!(f, "Coordinate ({}, {}) is off the board", x, y),
            GameError::InvalidShipSize(size) => write!(f, "Invalid ship size {}", size),
            GameError::InvalidPlacement(PlacementRejection::OutOfBounds) => {
                write!(f, "Ship placement is out of bounds")
            }
            GameError::InvalidPlacement(PlacementRejection::TouchesShip) => {
                write!(f, "Ship placement touches another ship")
            }
            GameError::OutOfTurnAction { phase } => {
                write!(f, "Action not allowed during {:?}", phase)
            }
            GameError::ExhaustedPlacementRetries { resets } => {
                write!(f, "Unable to place fleet after {} resets", resets)
            }
            GameError::NoTargetAvailable => write!(f, "No unresolved cell left to attack"),
            GameError::UnknownShipHit(at) => write!(f, "Ship cell {} belongs to no ship", at),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
