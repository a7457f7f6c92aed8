//! Battle grid: a flat cell array plus the ships placed on it.

use alloc::vec::Vec;
use core::fmt;
use log::{debug, warn};
use rand::Rng;

use crate::common::{AttackOutcome, CellState, Coord, GameError, PlacementRejection};
use crate::config::{GRID_SIZE, MAX_FLEET_RESETS, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship};

/// Read-only snapshot of a board's cells, row-major.
///
/// A view taken with [`Board::revealed_view`] never contains [`CellState::Ship`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    cells: Vec<CellState>,
}

impl BoardView {
    /// State of the cell at `at`, or `None` off the board.
    pub fn get(&self, at: Coord) -> Option<CellState> {
        if !at.in_bounds() {
            return None;
        }
        self.cells.get(at.index()).copied()
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Every coordinate that is still a legal target.
    pub fn unresolved(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_resolved())
            .map(|(i, _)| Coord::from_index(i))
    }

    pub fn is_unresolved(&self, at: Coord) -> bool {
        self.get(at).is_some_and(|c| !c.is_resolved())
    }
}

/// Main board state: cell grid and ship list.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<CellState>,
    ships: Vec<Ship>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Board {
            cells: alloc::vec![CellState::Empty; GRID_SIZE * GRID_SIZE],
            ships: Vec::new(),
        }
    }

    /// Remove all ships and reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
        self.ships.clear();
    }

    /// Ground-truth state of a cell.
    pub fn cell(&self, at: Coord) -> Result<CellState, GameError> {
        if !at.in_bounds() {
            return Err(GameError::OutOfBounds { x: at.x, y: at.y });
        }
        Ok(self.cells[at.index()])
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Number of placed ships not yet destroyed.
    pub fn ships_alive(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_destroyed()).count()
    }

    /// Full view, ship positions included.
    pub fn view(&self) -> BoardView {
        BoardView {
            cells: self.cells.clone(),
        }
    }

    /// What an opponent may see: unhit ship segments appear as `Empty`.
    pub fn revealed_view(&self) -> BoardView {
        BoardView {
            cells: self.cells.iter().map(|c| c.revealed()).collect(),
        }
    }

    /// Build the ship and check it against the board without placing it.
    pub fn check_placement(
        &self,
        origin: Coord,
        size: usize,
        orientation: Orientation,
    ) -> Result<Ship, GameError> {
        let ship = Ship::new(size, orientation, origin)?;
        // the footprint plus its one-cell halo must be free of other ships
        let blocked = ship
            .segments()
            .iter()
            .copied()
            .chain(ship.halo())
            .any(|c| self.cells[c.index()] != CellState::Empty);
        if blocked {
            return Err(PlacementRejection::TouchesShip.into());
        }
        Ok(ship)
    }

    /// Place a ship with its first segment at `origin`. On error the board is unchanged.
    pub fn place_ship(
        &mut self,
        origin: Coord,
        size: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        let ship = self.check_placement(origin, size, orientation)?;
        for seg in ship.segments() {
            self.cells[seg.index()] = CellState::Ship;
        }
        debug!("placed {:?}", ship);
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random legal (origin, orientation) for a ship of `size`, giving up with
    /// `ExhaustedPlacementRetries { resets: 0 }` after `MAX_PLACEMENT_ATTEMPTS` tries.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(Coord, Orientation), GameError> {
        if size == 0 || size > GRID_SIZE {
            return Err(GameError::InvalidShipSize(size));
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orient {
                Orientation::Horizontal => (GRID_SIZE - size, GRID_SIZE - 1),
                Orientation::Vertical => (GRID_SIZE - 1, GRID_SIZE - size),
            };
            let origin = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            match self.check_placement(origin, size, orient) {
                Ok(_) => return Ok((origin, orient)),
                Err(GameError::InvalidPlacement(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(GameError::ExhaustedPlacementRetries { resets: 0 })
    }

    /// Clear the board and place every ship in `sizes` at random.
    ///
    /// A ship that finds no spot within `MAX_PLACEMENT_ATTEMPTS` tries restarts the whole
    /// fleet; after `MAX_FLEET_RESETS` restarts the board is left empty and an error returned.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        sizes: &[usize],
    ) -> Result<(), GameError> {
        'fleet: for reset in 0..MAX_FLEET_RESETS {
            self.clear();
            for &size in sizes {
                match self.random_placement(rng, size) {
                    Ok((origin, orient)) => self.place_ship(origin, size, orient)?,
                    Err(GameError::ExhaustedPlacementRetries { .. }) => {
                        warn!("no room for size-{} ship, resetting fleet (attempt {})", size, reset + 1);
                        continue 'fleet;
                    }
                    Err(e) => return Err(e),
                }
            }
            return Ok(());
        }
        self.clear();
        Err(GameError::ExhaustedPlacementRetries {
            resets: MAX_FLEET_RESETS,
        })
    }

    /// Place `sizes[n..]` at random around the `n` ships already on the board.
    ///
    /// When the ships already placed leave no room for the next one, they are discarded
    /// and the whole of `sizes` is placed from scratch with [`Board::place_fleet_randomly`].
    pub fn complete_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        sizes: &[usize],
    ) -> Result<(), GameError> {
        let placed = self.ships.len().min(sizes.len());
        for &size in &sizes[placed..] {
            match self.random_placement(rng, size) {
                Ok((origin, orient)) => self.place_ship(origin, size, orient)?,
                Err(GameError::ExhaustedPlacementRetries { .. }) => {
                    warn!(
                        "{} placed ships leave no room for a size-{} ship, redeploying the fleet",
                        self.ships.len(),
                        size
                    );
                    return self.place_fleet_randomly(rng, sizes);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Resolve an attack at `at`.
    ///
    /// Destroying a ship turns all its segments `Destroyed` and every `Empty` cell of its
    /// halo into `Miss`. Attacking a resolved cell is a no-op returning `AlreadyResolved`.
    pub fn attack(&mut self, at: Coord) -> Result<AttackOutcome, GameError> {
        match self.cell(at)? {
            CellState::Empty => {
                self.cells[at.index()] = CellState::Miss;
                Ok(AttackOutcome::Miss)
            }
            CellState::Ship => {
                let Some(ship) = self.ships.iter_mut().find(|s| s.contains(at)) else {
                    return Err(GameError::UnknownShipHit(at));
                };
                ship.register_hit(at);
                self.cells[at.index()] = CellState::Hit;
                if !ship.is_destroyed() {
                    return Ok(AttackOutcome::Hit);
                }
                for c in ship.halo() {
                    if self.cells[c.index()] == CellState::Empty {
                        self.cells[c.index()] = CellState::Miss;
                    }
                }
                for seg in ship.segments() {
                    self.cells[seg.index()] = CellState::Destroyed;
                }
                debug!("destroyed {:?}", ship);
                Ok(AttackOutcome::Destroyed)
            }
            CellState::Hit | CellState::Miss | CellState::Destroyed => {
                Ok(AttackOutcome::AlreadyResolved)
            }
        }
    }

    /// Returns `true` when every placed ship is destroyed.
    pub fn all_ships_destroyed(&self) -> bool {
        self.ships.iter().all(Ship::is_destroyed)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.cells.chunks(GRID_SIZE) {
            write!(f, "  ")?;
            for cell in row {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::Ship => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                    CellState::Destroyed => '#',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ships: {:?}\n}}", self.ships)
    }
}
