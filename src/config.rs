//! Fixed rules of the game: board dimensions and fleet composition.

/// Width and height of the square board.
pub const GRID_SIZE: usize = 10;
/// Number of ships in each fleet.
pub const NUM_SHIPS: usize = 10;
/// Ship sizes in the order they are placed.
pub const FLEET: [usize; NUM_SHIPS] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];
/// Largest ship the board accepts.
pub const MAX_SHIP_SIZE: usize = 4;

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Random origins tried for a single ship before the fleet is reset.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 200;
/// Whole-fleet restarts before random placement gives up.
pub const MAX_FLEET_RESETS: usize = 50;

/// Default pause before the computer fires, in milliseconds.
pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 800;
