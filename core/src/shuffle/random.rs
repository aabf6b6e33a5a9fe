use super::*;

/// Uniform pick over the moveable set. Keeps no move history, so a step may
/// immediately undo the previous one; every result stays reachable from the
/// solved state, which makes it solvable since moves are invertible.
#[derive(Clone, Debug)]
pub struct RandomShuffle {
    rng: rand::rngs::SmallRng,
}

impl RandomShuffle {
    pub fn from_seed(seed: u64) -> Self {
        use rand::prelude::*;
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl ShufflePolicy for RandomShuffle {
    fn pick(&mut self, moveable: &[Tile]) -> Tile {
        use rand::prelude::*;
        debug_assert!(!moveable.is_empty());
        moveable[self.rng.random_range(0..moveable.len())]
    }
}
