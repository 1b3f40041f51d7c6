//! Well geometry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("well width must be between 4 and 16 columns, got {0}")]
    Width(u8),
    #[error("well depth must be between 5 and 127 rows, got {0}")]
    Depth(u8),
    #[error("buffer zone must cover the 4-row spawn box, got {0} rows")]
    ShallowBar(u8),
    #[error("buffer zone of {bar} rows leaves no playfield in a well of depth {depth}")]
    Bar { bar: u8, depth: u8 },
}

/// Dimensions of the well. Rows are numbered from the top: rows
/// `0..bar` form the buffer zone, any occupancy there ends the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WellConfig {
    pub width: u8,
    pub depth: u8,
    pub bar: u8,
}

impl WellConfig {
    pub const fn hatetris() -> Self {
        Self {
            width: 10,
            depth: 20,
            bar: 4,
        }
    }

    /// Pieces spawn in a 4x4 box at the top of the well, so the box must
    /// fit across the well and inside the buffer zone. Poses use `i8`
    /// coordinates, which bounds the depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=16).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(5..=i8::MAX as u8).contains(&self.depth) {
            return Err(ConfigError::Depth(self.depth));
        }
        if self.bar < 4 {
            return Err(ConfigError::ShallowBar(self.bar));
        }
        if self.bar >= self.depth {
            return Err(ConfigError::Bar {
                bar: self.bar,
                depth: self.depth,
            });
        }
        Ok(())
    }

    /// Bitmask of a completely filled row.
    #[inline(always)]
    pub fn full_row(&self) -> u16 {
        (((1u32) << self.width) - 1) as u16
    }

    /// Column where new pieces spawn.
    #[inline(always)]
    pub fn spawn_x(&self) -> i8 {
        ((self.width as i16 - 4) / 2) as i8
    }
}

impl Default for WellConfig {
    fn default() -> Self {
        Self::hatetris()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hatetris_preset() {
        let cfg = WellConfig::hatetris();
        assert_eq!((cfg.width, cfg.depth, cfg.bar), (10, 20, 4));
        assert_eq!(cfg.full_row(), 0x3FF);
        assert_eq!(cfg.spawn_x(), 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_sixteen_wide_full_row() {
        let cfg = WellConfig {
            width: 16,
            ..WellConfig::hatetris()
        };
        assert_eq!(cfg.full_row(), u16::MAX);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_invalid_geometry() {
        let base = WellConfig::hatetris();
        assert_eq!(
            WellConfig { width: 17, ..base }.validate(),
            Err(ConfigError::Width(17))
        );
        assert_eq!(
            WellConfig { depth: 4, ..base }.validate(),
            Err(ConfigError::Depth(4))
        );
        assert_eq!(
            WellConfig { bar: 20, ..base }.validate(),
            Err(ConfigError::Bar { bar: 20, depth: 20 })
        );
    }

    #[test]
    fn test_spawn_box_must_fit() {
        let base = WellConfig::hatetris();
        assert_eq!(WellConfig { width: 3, ..base }.validate(), Err(ConfigError::Width(3)));
        assert_eq!(WellConfig { width: 0, ..base }.validate(), Err(ConfigError::Width(0)));
        assert_eq!(WellConfig { bar: 0, ..base }.validate(), Err(ConfigError::ShallowBar(0)));
        assert_eq!(WellConfig { bar: 3, ..base }.validate(), Err(ConfigError::ShallowBar(3)));
        assert!(WellConfig { width: 4, ..base }.validate().is_ok());
    }

    #[test]
    fn test_depth_fits_pose_coordinates() {
        let base = WellConfig::hatetris();
        assert!(WellConfig { depth: 127, ..base }.validate().is_ok());
        assert_eq!(WellConfig { depth: 128, ..base }.validate(), Err(ConfigError::Depth(128)));
        assert_eq!(WellConfig { depth: 200, ..base }.validate(), Err(ConfigError::Depth(200)));
    }
}
