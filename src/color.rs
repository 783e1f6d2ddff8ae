use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: location id → Color32
// ---------------------------------------------------------------------------

/// Maps every location id to a fixed distinct colour, shared by the
/// checklist swatches and the line chart.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build the map for a set of location ids.
    pub fn new(locations: &BTreeSet<String>) -> Self {
        let palette = generate_palette(locations.len());
        let mapping = locations
            .iter()
            .cloned()
            .zip(palette)
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a location id.
    pub fn color_for(&self, location: &str) -> Color32 {
        self.mapping
            .get(location)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }

    #[test]
    fn locations_get_distinct_stable_colours() {
        let locations: BTreeSet<String> =
            ["1", "2", "3", "4"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&locations);
        let colours: BTreeSet<_> = locations
            .iter()
            .map(|l| map.color_for(l).to_array())
            .collect();
        assert_eq!(colours.len(), 4);
        assert_eq!(map.color_for("1"), ColorMap::new(&locations).color_for("1"));
        assert_eq!(map.color_for("unknown"), Color32::GRAY);
    }
}
