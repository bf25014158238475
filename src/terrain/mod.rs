//! Terrain descriptors and palettes
//!
//! A palette is a plain slice of [`TerrainType`]s. Each entry carries a
//! `group` tag, which region-driven population uses to pick the subset of
//! the palette that belongs to a region.

mod strategy;

pub use strategy::{DefaultTerrainStrategy, FixedPalette, TerrainStrategy};
pub(crate) use strategy::PaletteOverride;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::random::{pick_index, RandomSource};

/// Descriptor of one kind of terrain
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerrainType {
    /// Display name, e.g. "Grass"
    pub name: String,
    /// Palette group tag, e.g. "floors"
    pub group: String,
    /// Foreground colours, in order of preference
    pub colors: Vec<String>,
    /// Background colour, if any
    pub bg_color: Option<String>,
    /// Display glyphs, in order of preference
    pub characters: Vec<char>,
    /// Whether this terrain stops line of sight
    pub blocks_vision: bool,
    /// Whether this terrain stops movement
    pub blocks_movement: bool,
}

impl TerrainType {
    /// Create a terrain with no colours or glyphs that blocks nothing
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            ..Default::default()
        }
    }

    /// Terrain placed when a palette offers nothing to choose from
    pub fn void() -> Self {
        Self::new("Void", "")
    }

    /// Set the foreground colours
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the background colour
    pub fn with_bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Set the display glyphs
    pub fn with_characters(mut self, characters: impl IntoIterator<Item = char>) -> Self {
        self.characters = characters.into_iter().collect();
        self
    }

    /// Mark the terrain as opaque (blocks vision)
    pub fn blocking_vision(mut self, blocks: bool) -> Self {
        self.blocks_vision = blocks;
        self
    }

    /// Mark the terrain as impassable
    pub fn blocking_movement(mut self, blocks: bool) -> Self {
        self.blocks_movement = blocks;
        self
    }

    /// Randomly shorten the glyph and colour lists of this instance
    ///
    /// A list with more than one entry keeps the suffix starting at a random
    /// index in `[0, len - 1]`, so the last entry always survives.
    pub fn vary_appearance(&mut self, rng: &mut dyn RandomSource) {
        if self.characters.len() > 1 {
            if let Some(start) = pick_index(rng, self.characters.len()) {
                self.characters.drain(..start);
            }
        }
        if self.colors.len() > 1 {
            if let Some(start) = pick_index(rng, self.colors.len()) {
                self.colors.drain(..start);
            }
        }
    }
}

/// Built-in palette used when no strategy is supplied
pub fn default_palette() -> Vec<TerrainType> {
    vec![
        TerrainType::new("Mountains", "floors")
            .with_colors(["grey"])
            .with_characters([',', '.']),
        TerrainType::new("Grass", "floors")
            .with_colors(["green"])
            .with_characters([',', '.']),
    ]
}

/// Entries of `palette` whose group equals `group`
pub fn filter_group<'a>(palette: &'a [TerrainType], group: &str) -> Vec<&'a TerrainType> {
    palette.iter().filter(|t| t.group == group).collect()
}
