use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    AttackOutcome, Board, CellState, Coord, GameError, Orientation, PlacementRejection, FLEET,
    GRID_SIZE, MAX_FLEET_RESETS, NUM_SHIPS, TOTAL_SHIP_CELLS,
};

fn c(x: usize, y: usize) -> Coord {
    Coord::new(x, y)
}

#[test]
fn test_destroying_ship_reveals_halo() {
    let mut board = Board::new();
    board.place_ship(c(2, 2), 3, Orientation::Horizontal).unwrap();

    assert_eq!(board.attack(c(2, 2)).unwrap(), AttackOutcome::Hit);
    assert_eq!(board.attack(c(3, 2)).unwrap(), AttackOutcome::Hit);
    assert_eq!(board.cell(c(1, 1)).unwrap(), CellState::Empty);
    assert_eq!(board.attack(c(4, 2)).unwrap(), AttackOutcome::Destroyed);

    for x in 2..=4 {
        assert_eq!(board.cell(c(x, 2)).unwrap(), CellState::Destroyed);
    }
    let halo = [
        c(1, 1), c(1, 2), c(1, 3),
        c(5, 1), c(5, 2), c(5, 3),
        c(2, 1), c(3, 1), c(4, 1),
        c(2, 3), c(3, 3), c(4, 3),
    ];
    for at in halo {
        assert_eq!(board.cell(at).unwrap(), CellState::Miss, "halo cell {}", at);
    }
    let misses = board.view().cells().iter().filter(|&&s| s == CellState::Miss).count();
    assert_eq!(misses, halo.len());
    assert!(board.all_ships_destroyed());
    assert_eq!(board.ships_alive(), 0);
}

#[test]
fn test_placement_in_buffer_zone_is_rejected() {
    let mut board = Board::new();
    board.place_ship(c(2, 2), 3, Orientation::Horizontal).unwrap();
    let before = board.clone();

    // diagonal contact with (4, 2)
    assert_eq!(
        board.place_ship(c(5, 3), 2, Orientation::Horizontal).unwrap_err(),
        GameError::InvalidPlacement(PlacementRejection::TouchesShip)
    );
    // side by side
    assert_eq!(
        board.place_ship(c(2, 3), 2, Orientation::Horizontal).unwrap_err(),
        GameError::InvalidPlacement(PlacementRejection::TouchesShip)
    );
    // overlap
    assert_eq!(
        board.place_ship(c(3, 1), 2, Orientation::Vertical).unwrap_err(),
        GameError::InvalidPlacement(PlacementRejection::TouchesShip)
    );
    assert_eq!(board, before);
    assert_eq!(board.ships().len(), 1);

    // one empty cell between ships is enough
    board.place_ship(c(6, 2), 2, Orientation::Horizontal).unwrap();
    assert_eq!(board.ships().len(), 2);
}

#[test]
fn test_out_of_bounds_placement_is_rejected() {
    let mut board = Board::new();
    assert_eq!(
        board.place_ship(c(8, 0), 3, Orientation::Horizontal).unwrap_err(),
        GameError::InvalidPlacement(PlacementRejection::OutOfBounds)
    );
    assert_eq!(
        board.place_ship(c(0, GRID_SIZE), 1, Orientation::Vertical).unwrap_err(),
        GameError::InvalidPlacement(PlacementRejection::OutOfBounds)
    );
    assert_eq!(board, Board::new());
}

#[test]
fn test_ships_may_touch_the_edges() {
    let mut board = Board::new();
    board.place_ship(c(0, 0), 4, Orientation::Vertical).unwrap();
    board.place_ship(c(6, 9), 4, Orientation::Horizontal).unwrap();
    board.place_ship(c(9, 0), 1, Orientation::Horizontal).unwrap();
    assert_eq!(board.ships_alive(), 3);
}

#[test]
fn test_repeat_attack_is_inert() {
    let mut board = Board::new();
    board.place_ship(c(0, 0), 2, Orientation::Horizontal).unwrap();

    assert_eq!(board.attack(c(5, 5)).unwrap(), AttackOutcome::Miss);
    assert_eq!(board.attack(c(5, 5)).unwrap(), AttackOutcome::AlreadyResolved);

    assert_eq!(board.attack(c(0, 0)).unwrap(), AttackOutcome::Hit);
    let after_hit = board.clone();
    assert_eq!(board.attack(c(0, 0)).unwrap(), AttackOutcome::AlreadyResolved);
    assert_eq!(board, after_hit);

    assert_eq!(board.attack(c(1, 0)).unwrap(), AttackOutcome::Destroyed);
    assert_eq!(board.attack(c(1, 0)).unwrap(), AttackOutcome::AlreadyResolved);
    // halo cell revealed by the destruction
    assert_eq!(board.attack(c(2, 1)).unwrap(), AttackOutcome::AlreadyResolved);
}

#[test]
fn test_attack_off_board_is_an_error() {
    let mut board = Board::new();
    assert_eq!(
        board.attack(c(GRID_SIZE, 0)).unwrap_err(),
        GameError::OutOfBounds { x: GRID_SIZE, y: 0 }
    );
}

#[test]
fn test_revealed_view_hides_ships() {
    let mut board = Board::new();
    board.place_ship(c(3, 3), 2, Orientation::Vertical).unwrap();
    board.attack(c(3, 3)).unwrap();

    let truth = board.view();
    let revealed = board.revealed_view();
    assert_eq!(truth.get(c(3, 4)), Some(CellState::Ship));
    assert_eq!(revealed.get(c(3, 4)), Some(CellState::Empty));
    assert_eq!(revealed.get(c(3, 3)), Some(CellState::Hit));
    assert!(revealed.cells().iter().all(|&s| s != CellState::Ship));
    assert_eq!(revealed.unresolved().count(), GRID_SIZE * GRID_SIZE - 1);
}

#[test]
fn test_view_lookup_off_board_is_none() {
    let mut board = Board::new();
    board.place_ship(c(0, 2), 1, Orientation::Horizontal).unwrap();
    assert_eq!(board.attack(c(0, 2)).unwrap(), AttackOutcome::Destroyed);

    let view = board.revealed_view();
    assert_eq!(view.get(c(0, 2)), Some(CellState::Destroyed));
    // (20, 0) shares its flat index with (0, 2)
    assert_eq!(view.get(c(20, 0)), None);
    assert_eq!(view.get(c(0, GRID_SIZE)), None);
    assert!(!view.is_unresolved(c(20, 0)));
}

#[test]
fn test_random_fleet_placement() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_fleet_randomly(&mut rng, &FLEET).unwrap();

    assert_eq!(board.ships().len(), NUM_SHIPS);
    let ship_cells = board.view().cells().iter().filter(|&&s| s == CellState::Ship).count();
    assert_eq!(ship_cells, TOTAL_SHIP_CELLS);
    let mut sizes: Vec<_> = board.ships().iter().map(|s| s.size()).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(sizes, FLEET.to_vec());
}

#[test]
fn test_random_placement_is_reproducible() {
    let mut a = Board::new();
    let mut b = Board::new();
    a.place_fleet_randomly(&mut SmallRng::seed_from_u64(7), &FLEET).unwrap();
    b.place_fleet_randomly(&mut SmallRng::seed_from_u64(7), &FLEET).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_impossible_fleet_gives_up() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let crowded = [4usize; 30];
    assert_eq!(
        board.place_fleet_randomly(&mut rng, &crowded).unwrap_err(),
        GameError::ExhaustedPlacementRetries {
            resets: MAX_FLEET_RESETS
        }
    );
    assert_eq!(board, Board::new());
}

/// Single-cell ships whose buffers leave no run of four free cells in any row or column.
const SIZE_FOUR_BLOCKERS: [(usize, usize); 8] = [
    (1, 1), (1, 5), (3, 2), (3, 8), (5, 1), (5, 5), (8, 4), (8, 8),
];

fn blocked_board() -> Board {
    let mut board = Board::new();
    for &(x, y) in &SIZE_FOUR_BLOCKERS {
        board.place_ship(c(x, y), 1, Orientation::Horizontal).unwrap();
    }
    assert_eq!(
        board.random_placement(&mut SmallRng::seed_from_u64(0), 4).unwrap_err(),
        GameError::ExhaustedPlacementRetries { resets: 0 }
    );
    board
}

#[test]
fn test_complete_fleet_keeps_placed_ships() {
    let mut board = Board::new();
    board.place_ship(c(0, 0), 4, Orientation::Vertical).unwrap();
    board.place_ship(c(9, 7), 3, Orientation::Vertical).unwrap();
    let placed = board.ships().to_vec();

    board.complete_fleet_randomly(&mut SmallRng::seed_from_u64(12), &FLEET).unwrap();
    assert_eq!(&board.ships()[..2], &placed[..]);
    let sizes: Vec<_> = board.ships().iter().map(|s| s.size()).collect();
    assert_eq!(sizes, FLEET.to_vec());
}

#[test]
fn test_complete_fleet_redeploys_when_boxed_in() {
    let mut board = blocked_board();
    let mut sizes = vec![1; SIZE_FOUR_BLOCKERS.len()];
    sizes.push(4);

    board.complete_fleet_randomly(&mut SmallRng::seed_from_u64(3), &sizes).unwrap();
    let placed: Vec<_> = board.ships().iter().map(|s| s.size()).collect();
    assert_eq!(placed, sizes);
    let ship_cells = board.view().cells().iter().filter(|&&s| s == CellState::Ship).count();
    assert_eq!(ship_cells, SIZE_FOUR_BLOCKERS.len() + 4);
}

#[test]
fn test_complete_fleet_clears_board_when_redeploy_fails() {
    let mut board = blocked_board();
    let mut sizes = vec![1; SIZE_FOUR_BLOCKERS.len()];
    sizes.extend([4; 30]);

    assert_eq!(
        board.complete_fleet_randomly(&mut SmallRng::seed_from_u64(3), &sizes).unwrap_err(),
        GameError::ExhaustedPlacementRetries {
            resets: MAX_FLEET_RESETS
        }
    );
    assert!(board.ships().is_empty());
    assert_eq!(board, Board::new());
}
