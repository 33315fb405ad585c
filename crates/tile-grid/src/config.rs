// SPDX-License-Identifier: MIT
//
// Grid configuration.
//
// Everything a run needs to set up its grid and color machinery, read from
// JSON. Every field has a default, so `{}` is a valid config and a file only
// has to name what it changes.
//
//   {
//     "width": 80,
//     "height": 24,
//     "seed": 7,
//     "base256": false,
//     "separate": { "luminosity_gap": 50 },
//     "colors": { "moss": "#574", "ember": "#f40" }
//   }
//
// Extra colors are installed on top of the standard palette in name order.
// A value may be hex or the name of a color already in the palette.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use tile_color::{Palette, SeededRandom, SeparateParams};

use crate::buffer::DataBuffer;
use crate::error::Result;

/// Grid size, randomness and color settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
    /// Seed for color jitter. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Read numeric color inputs on the 0–255 scale.
    pub base256: bool,
    /// Legibility separation tuning.
    pub separate: SeparateParams,
    /// Extra named colors, name → hex or existing name.
    pub colors: BTreeMap<String, String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            seed: None,
            base256: false,
            separate: SeparateParams::default(),
            colors: BTreeMap::new(),
        }
    }
}

impl GridConfig {
    /// Parse a JSON config.
    ///
    /// # Errors
    ///
    /// [`GridError::Config`](crate::error::GridError::Config) on malformed
    /// JSON or a field of the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        debug!(
            "config: {}x{} grid, {} extra colors",
            config.width,
            config.height,
            config.colors.len()
        );
        Ok(config)
    }

    /// The standard palette plus this config's extra colors.
    ///
    /// # Errors
    ///
    /// [`GridError::Color`](crate::error::GridError::Color) if a color
    /// value does not parse.
    pub fn palette(&self) -> Result<Palette> {
        let mut palette = Palette::default();
        for (name, value) in &self.colors {
            let color = palette.make(value.as_str(), self.base256)?;
            palette.install(name, color);
        }
        Ok(palette)
    }

    /// The jitter source: seeded when a seed is configured.
    #[must_use]
    pub fn random_source(&self) -> SeededRandom {
        self.seed.map_or_else(SeededRandom::from_entropy, SeededRandom::new)
    }

    /// An unset grid of the configured size.
    #[must_use]
    pub fn data_buffer(&self) -> DataBuffer {
        DataBuffer::new(self.width, self.height)
    }
}
