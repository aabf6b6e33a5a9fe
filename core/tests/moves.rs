use suraido_core::{
    cell_at_point, Cell, GridSize, ImageGeometry, MoveOutcome, PuzzleConfig, PuzzleEngine,
    RandomShuffle, ShufflePolicy, Tile,
};

fn shuffling_engine(side: u8) -> PuzzleEngine {
    let config = PuzzleConfig::new(GridSize::new(side), 200, 10);
    let mut engine = PuzzleEngine::new(config);
    engine.load_image(ImageGeometry::new(1024, 768).unwrap());
    engine
}

fn ready_engine(side: u8) -> PuzzleEngine {
    let mut engine = shuffling_engine(side);
    engine.finish_shuffle().unwrap();
    engine
}

#[test]
fn grid_is_identity_after_load_for_any_size() {
    for side in 2..=8u8 {
        let engine = shuffling_engine(side);
        let values: Vec<u16> = engine.grid().as_slice().iter().map(|t| t.value()).collect();
        let expected: Vec<u16> = (0..u16::from(side) * u16::from(side)).collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn four_by_four_scenario() {
    let mut engine = ready_engine(4);

    // 15 is the blank sentinel itself and never moveable
    assert_eq!(engine.request_move(Tile::new(15)), MoveOutcome::NotMoveable);

    // 11 sits directly above the bottom-right blank
    let outcome = engine.request_move(Tile::new(11));
    let transition = outcome.transition().expect("11 must be moveable");
    assert_eq!(transition.from, Cell::new(3, 2));
    assert_eq!(transition.to, Cell::new(3, 3));
    assert_eq!(engine.tile_at(Cell::new(3, 3)), Some(Tile::new(11)));
    assert_eq!(engine.tile_at(Cell::new(3, 2)), Some(Tile::new(15)));
}

#[test]
fn shuffle_applies_exactly_the_configured_move_count() {
    struct Counting {
        inner: RandomShuffle,
        picks: u32,
    }

    impl ShufflePolicy for Counting {
        fn pick(&mut self, moveable: &[Tile]) -> Tile {
            self.picks += 1;
            self.inner.pick(moveable)
        }
    }

    let mut engine = shuffling_engine(4);
    let mut policy = Counting {
        inner: RandomShuffle::from_seed(5),
        picks: 0,
    };
    engine.shuffle(&mut policy).unwrap();

    assert_eq!(policy.picks, 200);
    assert!(engine.is_ready());
}

#[test]
fn grid_stays_a_permutation_through_shuffle_and_play() {
    let mut engine = shuffling_engine(4);
    engine.shuffle(&mut RandomShuffle::from_seed(1234)).unwrap();
    assert!(engine.grid().is_permutation());

    // request every possible value after every committed move; invalid ones
    // must change nothing, valid ones must preserve the permutation
    let mut policy = RandomShuffle::from_seed(77);
    for _ in 0..50 {
        let moveable = engine.grid().moveable_tiles();
        let tile = policy.pick(&moveable);
        assert!(engine.request_move(tile).has_update());
        assert!(engine.grid().is_permutation());
    }
    for value in 0..=16u16 {
        engine.request_move(Tile::new(value));
        assert!(engine.grid().is_permutation());
    }
}

#[test]
fn moveable_set_bounds_hold_after_any_move_sequence() {
    let mut engine = shuffling_engine(4);
    let mut policy = RandomShuffle::from_seed(9000);
    let blank = Tile::new(15);

    for _ in 0..200 {
        engine.shuffle_move(&mut policy).unwrap();

        let moveable = engine.grid().moveable_tiles();
        assert!((2..=4).contains(&moveable.len()));
        assert!(!moveable.contains(&blank));

        let mut sorted: Vec<Tile> = moveable.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), moveable.len());
    }
}

#[test]
fn moveable_set_size_matches_blank_position_class() {
    let mut engine = ready_engine(3);

    // corner
    assert_eq!(engine.grid().moveable_tiles().len(), 2);

    // edge: blank one step up from the corner
    assert!(engine.request_move(Tile::new(5)).has_update());
    assert_eq!(engine.grid().moveable_tiles().len(), 3);

    // interior: blank in the center
    assert!(engine.request_move(Tile::new(4)).has_update());
    assert_eq!(engine.grid().moveable_tiles().len(), 4);
}

#[test]
fn click_translation_composes_with_move_requests() {
    let mut engine = ready_engine(4);
    let tile_size = 100.0;

    // click inside cell (3, 2) hits tile 11, the one above the blank
    let cell = cell_at_point(350.0, 250.0, tile_size, engine.config().size).unwrap();
    let tile = engine.tile_at(cell).unwrap();
    assert!(engine.request_move(tile).has_update());

    // same click now lands on the blank and is silently ignored
    let tile = engine.tile_at(cell).unwrap();
    assert_eq!(engine.request_move(tile), MoveOutcome::NotMoveable);
}
