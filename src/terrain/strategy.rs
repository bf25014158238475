//! Pluggable terrain selection
//!
//! Replaces mutable global callbacks with a strategy passed to the map.

use super::{default_palette, TerrainType};
use crate::random::{pick_index, RandomSource};

/// Decides which terrain a tile receives during plain initialization
///
/// `select_palette` produces candidates for a tile, `choose_terrain` picks
/// one of them. The default `choose_terrain` is a uniform pick.
///
/// Any `Fn(i32, i32) -> Vec<TerrainType>` closure is a strategy that only
/// overrides palette selection.
pub trait TerrainStrategy {
    /// Candidate terrains for tile `(x, y)`
    fn select_palette(&self, x: i32, y: i32) -> Vec<TerrainType>;

    /// Choose one terrain from `palette` for tile `(x, y)`
    ///
    /// Returns `None` when the palette is empty.
    fn choose_terrain(
        &self,
        palette: &[TerrainType],
        _x: i32,
        _y: i32,
        rng: &mut dyn RandomSource,
    ) -> Option<TerrainType> {
        pick_index(rng, palette.len()).map(|i| palette[i].clone())
    }
}

impl<F> TerrainStrategy for F
where
    F: Fn(i32, i32) -> Vec<TerrainType>,
{
    fn select_palette(&self, x: i32, y: i32) -> Vec<TerrainType> {
        self(x, y)
    }
}

/// Uniform pick from [`default_palette`] for every tile
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTerrainStrategy;

impl TerrainStrategy for DefaultTerrainStrategy {
    fn select_palette(&self, _x: i32, _y: i32) -> Vec<TerrainType> {
        default_palette()
    }
}

/// Uniform pick from the same palette for every tile
#[derive(Debug, Clone, Default)]
pub struct FixedPalette(pub Vec<TerrainType>);

impl TerrainStrategy for FixedPalette {
    fn select_palette(&self, _x: i32, _y: i32) -> Vec<TerrainType> {
        self.0.clone()
    }
}

/// Strategy that takes palettes from `select` and choices from `base`
pub(crate) struct PaletteOverride<'a, F> {
    pub(crate) select: F,
    pub(crate) base: &'a dyn TerrainStrategy,
}

impl<F> TerrainStrategy for PaletteOverride<'_, F>
where
    F: Fn(i32, i32) -> Vec<TerrainType>,
{
    fn select_palette(&self, x: i32, y: i32) -> Vec<TerrainType> {
        (self.select)(x, y)
    }

    fn choose_terrain(
        &self,
        palette: &[TerrainType],
        x: i32,
        y: i32,
        rng: &mut dyn RandomSource,
    ) -> Option<TerrainType> {
        self.base.choose_terrain(palette, x, y, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_picks_from_default_palette() {
        let strategy = DefaultTerrainStrategy;
        let palette = strategy.select_palette(3, 4);
        let mut last = |_min: f64, max: f64| max;

        let chosen = strategy.choose_terrain(&palette, 3, 4, &mut last).unwrap();
        assert_eq!(chosen.name, "Grass");
    }

    #[test]
    fn test_empty_palette_yields_none() {
        let strategy = FixedPalette(Vec::new());
        let mut rng = |min: f64, _max: f64| min;
        assert!(strategy.choose_terrain(&[], 0, 0, &mut rng).is_none());
        assert!(strategy.select_palette(0, 0).is_empty());
    }

    #[test]
    fn test_closure_strategy_by_position() {
        let strategy = |x: i32, _y: i32| {
            if x == 0 {
                vec![TerrainType::new("Wall", "walls").blocking_vision(true)]
            } else {
                vec![TerrainType::new("Floor", "floors")]
            }
        };
        assert_eq!(strategy.select_palette(0, 5)[0].name, "Wall");
        assert_eq!(strategy.select_palette(1, 5)[0].name, "Floor");
    }

    struct AlwaysFirst;

    impl TerrainStrategy for AlwaysFirst {
        fn select_palette(&self, _x: i32, _y: i32) -> Vec<TerrainType> {
            default_palette()
        }

        fn choose_terrain(
            &self,
            palette: &[TerrainType],
            _x: i32,
            _y: i32,
            _rng: &mut dyn RandomSource,
        ) -> Option<TerrainType> {
            palette.first().cloned()
        }
    }

    #[test]
    fn test_custom_choose_terrain() {
        let palette = AlwaysFirst.select_palette(0, 0);
        let mut rng = |_min: f64, max: f64| max;
        let chosen = AlwaysFirst.choose_terrain(&palette, 0, 0, &mut rng).unwrap();
        assert_eq!(chosen.name, "Mountains");
    }
}
