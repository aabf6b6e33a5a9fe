use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Image has zero width or height")]
    EmptyImage,
    #[error("Engine is not in the shuffling state")]
    NotShuffling,
}

pub type Result<T> = core::result::Result<T, GameError>;
