use crate::*;
pub use random::*;

mod random;

/// Chooses the next shuffle move from the current moveable set.
pub trait ShufflePolicy {
    fn pick(&mut self, moveable: &[Tile]) -> Tile;
}
