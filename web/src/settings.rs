use serde::{Deserialize, Serialize};
use suraido_core::{GridSize, PuzzleConfig};

use crate::utils::StorageKey;

/// Grid sides offered by the size selector.
pub(crate) const SIDE_CHOICES: [u8; 3] = [3, 4, 5];

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub show_preview: bool,
    pub side: u8,
}

impl Settings {
    pub(crate) fn puzzle_config(&self) -> PuzzleConfig {
        PuzzleConfig::new(
            GridSize::new(self.side),
            suraido_core::DEFAULT_SHUFFLE_MOVES,
            suraido_core::DEFAULT_ANIMATION_FRAMES,
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_preview: true,
            side: GridSize::DEFAULT_SIDE,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "suraido:settings:v1";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_build_the_classic_fifteen_config() {
        let config = Settings::default().puzzle_config();
        assert_eq!(config.size.side(), 4);
        assert_eq!(config.shuffle_moves, 200);
        assert_eq!(config.animation_frames, 10);
    }

    #[test]
    fn storage_key_uses_versioned_namespace() {
        assert_eq!(<Settings as StorageKey>::KEY, "suraido:settings:v1");
    }
}
