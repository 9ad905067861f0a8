use std::collections::{BTreeMap, BTreeSet};

use palette::{Hsl, IntoColor, Srgb};

/// An sRGB triple, kept renderer-independent so chart descriptions can be
/// serialised as-is.
pub type Rgb = [u8; 3];

/// Used for values a [`ColorMap`] has never seen.
pub const DEFAULT_COLOR: Rgb = [160, 160, 160];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
///
/// Built from the whole dataset, so a category keeps its colour no matter
/// which subset of rows a chart shows.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
}

impl ColorMap {
    pub fn new(values: &BTreeSet<String>) -> Self {
        let palette = generate_palette(values.len());
        let mapping = values.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &str) -> Rgb {
        self.mapping.get(value).copied().unwrap_or(DEFAULT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_distinct() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        let unique: BTreeSet<Rgb> = palette.iter().copied().collect();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_color_map_lookup() {
        let values: BTreeSet<String> = ["B4", "B5", "FT"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&values);
        assert_ne!(map.color_for("B4"), map.color_for("FT"));
        assert_eq!(map.color_for("unknown"), DEFAULT_COLOR);
    }
}
