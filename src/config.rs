//! Town generation configuration and builder

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TownError};

/// Town size presets
///
/// Each size maps to a parcel count for the inhabited core of the town.
/// The tessellation oversamples by 8x, so the countryside always extends
/// well past the walls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TownSize {
    /// ~6 urban parcels, a fortified village
    Village,
    /// ~10 urban parcels
    SmallTown,
    /// ~15 urban parcels (default)
    LargeTown,
    /// ~24 urban parcels
    SmallCity,
    /// ~40 urban parcels
    LargeCity,
    /// Custom urban parcel count (minimum 6)
    Custom {
        /// Number of inhabited parcels to generate
        patches: usize,
    },
}

impl TownSize {
    /// Number of inhabited parcels for this size
    pub fn patch_count(self) -> usize {
        match self {
            TownSize::Village => 6,
            TownSize::SmallTown => 10,
            TownSize::LargeTown => 15,
            TownSize::SmallCity => 24,
            TownSize::LargeCity => 40,
            TownSize::Custom { patches } => patches,
        }
    }

    /// Human-readable name for this size
    pub fn name(self) -> &'static str {
        match self {
            TownSize::Village => "Village",
            TownSize::SmallTown => "Small Town",
            TownSize::LargeTown => "Large Town",
            TownSize::SmallCity => "Small City",
            TownSize::LargeCity => "Large City",
            TownSize::Custom { .. } => "Custom",
        }
    }
}

impl Default for TownSize {
    fn default() -> Self {
        TownSize::LargeTown
    }
}

/// Configuration for deterministic town generation
///
/// The same configuration always produces the identical town: parcel
/// shapes, wall, gates, streets, district assignment and buildings.
/// Feature flags (plaza, citadel, walls) are not part of the configuration;
/// they are derived from the seed at the start of each attempt.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TownConfig {
    /// Random seed for deterministic generation
    pub seed: u64,

    /// Town size preset (determines inhabited parcel count)
    pub size: TownSize,

    /// Maximum number of generation attempts before giving up
    ///
    /// An attempt can fail on an unlucky layout (no usable gates, an
    /// unroutable street, a misshapen citadel); each failure reseeds and
    /// restarts from scratch.
    pub max_retries: usize,
}

impl TownConfig {
    /// Number of inhabited parcels for this configuration
    #[inline]
    pub fn patch_count(&self) -> usize {
        self.size.patch_count()
    }
}

impl Default for TownConfig {
    fn default() -> Self {
        TownConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating [`TownConfig`] with validation
///
/// # Example
///
/// ```rust
/// use medieval_town::*;
///
/// let config = TownConfigBuilder::new()
///     .seed(12345)
///     .size(TownSize::Village)
///     .build()
///     .unwrap();
/// assert_eq!(config.patch_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct TownConfigBuilder {
    seed: Option<u64>,
    size: TownSize,
    max_retries: usize,
}

impl TownConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random (generated from `rand::random`)
    /// - size: LargeTown (~15 urban parcels)
    /// - max_retries: 10
    pub fn new() -> Self {
        Self {
            seed: None,
            size: TownSize::default(),
            max_retries: 10,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the town size preset
    pub fn size(mut self, size: TownSize) -> Self {
        self.size = size;
        self
    }

    /// Set the maximum number of generation attempts
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the parcel count is below 6 (the pipeline
    /// needs at least that many urban parcels to place a wall and gates) or
    /// if `max_retries` is zero.
    pub fn build(self) -> Result<TownConfig> {
        if self.size.patch_count() < 6 {
            return Err(TownError::InvalidConfig(format!(
                "town size must be at least 6 parcels (got {})",
                self.size.patch_count()
            )));
        }
        if self.max_retries == 0 {
            return Err(TownError::InvalidConfig(
                "max_retries must be at least 1".to_string(),
            ));
        }
        let seed = self.seed.unwrap_or_else(rand::random);
        Ok(TownConfig {
            seed,
            size: self.size,
            max_retries: self.max_retries,
        })
    }
}

impl Default for TownConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
