use seabattle::{Coord, GameError, Orientation, PlacementRejection, Ship};

#[test]
fn test_segments_follow_orientation() -> Result<(), GameError> {
    let h = Ship::new(3, Orientation::Horizontal, Coord::new(2, 2))?;
    assert_eq!(h.segments(), &[Coord::new(2, 2), Coord::new(3, 2), Coord::new(4, 2)]);

    let v = Ship::new(4, Orientation::Vertical, Coord::new(0, 0))?;
    assert_eq!(
        v.segments(),
        &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 3)]
    );
    assert!(v.contains(Coord::new(0, 3)));
    assert!(!v.contains(Coord::new(0, 4)));
    assert_eq!(v.hit_mask(), &[false; 4]);
    Ok(())
}

#[test]
fn test_register_hit_and_destroyed() -> Result<(), GameError> {
    let mut ship = Ship::new(2, Orientation::Horizontal, Coord::new(1, 1))?;
    assert!(!ship.is_destroyed());
    assert!(ship.register_hit(Coord::new(1, 1)));
    assert!(!ship.is_destroyed());
    assert_eq!(ship.hit_mask(), &[true, false]);
    // miss
    assert!(!ship.register_hit(Coord::new(0, 0)));
    assert!(ship.register_hit(Coord::new(2, 1)));
    assert!(ship.is_destroyed());
    Ok(())
}

#[test]
fn test_rejects_bad_geometry() {
    assert_eq!(
        Ship::new(0, Orientation::Horizontal, Coord::new(0, 0)).unwrap_err(),
        GameError::InvalidShipSize(0)
    );
    assert_eq!(
        Ship::new(5, Orientation::Horizontal, Coord::new(0, 0)).unwrap_err(),
        GameError::InvalidShipSize(5)
    );
    assert_eq!(
        Ship::new(4, Orientation::Horizontal, Coord::new(7, 0)).unwrap_err(),
        GameError::InvalidPlacement(PlacementRejection::OutOfBounds)
    );
    assert_eq!(
        Ship::new(2, Orientation::Vertical, Coord::new(3, 9)).unwrap_err(),
        GameError::InvalidPlacement(PlacementRejection::OutOfBounds)
    );
}

#[test]
fn test_halo_is_clipped_to_board() -> Result<(), GameError> {
    let corner = Ship::new(2, Orientation::Vertical, Coord::new(0, 0))?;
    let mut halo: Vec<_> = corner.halo().collect();
    halo.sort();
    assert_eq!(
        halo,
        vec![Coord::new(0, 2), Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)]
    );

    let middle = Ship::new(3, Orientation::Horizontal, Coord::new(2, 2))?;
    assert_eq!(middle.halo().count(), 12);
    assert!(middle.halo().all(|c| !middle.contains(c)));
    Ok(())
}

#[test]
fn test_orientation_rotates() {
    assert_eq!(Orientation::Horizontal.rotated(), Orientation::Vertical);
    assert_eq!(Orientation::Vertical.rotated(), Orientation::Horizontal);
}
