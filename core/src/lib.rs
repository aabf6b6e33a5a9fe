#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use frame::*;
pub use grid::*;
pub use shuffle::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod frame;
mod grid;
mod shuffle;
mod tile;
mod types;

/// Number of legal moves applied by the default shuffle.
pub const DEFAULT_SHUFFLE_MOVES: u16 = 200;
/// Number of interpolated frames per animated move.
pub const DEFAULT_ANIMATION_FRAMES: u8 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub size: GridSize,
    pub shuffle_moves: u16,
    pub animation_frames: u8,
}

impl PuzzleConfig {
    pub const fn new_unchecked(size: GridSize, shuffle_moves: u16, animation_frames: u8) -> Self {
        Self {
            size,
            shuffle_moves,
            animation_frames,
        }
    }

    pub fn new(size: GridSize, shuffle_moves: u16, animation_frames: u8) -> Self {
        let shuffle_moves = shuffle_moves.max(1);
        let animation_frames = animation_frames.max(1);
        Self::new_unchecked(size, shuffle_moves, animation_frames)
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::new_unchecked(
            GridSize::default(),
            DEFAULT_SHUFFLE_MOVES,
            DEFAULT_ANIMATION_FRAMES,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    NotMoveable,
    Moved(MoveTransition),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NotMoveable => false,
            Self::Moved(_) => true,
        }
    }

    pub const fn transition(self) -> Option<MoveTransition> {
        match self {
            Self::NotMoveable => None,
            Self::Moved(transition) => Some(transition),
        }
    }
}
