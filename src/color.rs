use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::filter::BrandCount;

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
// Color mapping: brand label → Color32
// ---------------------------------------------------------------------------

/// Maps the top-ranked brand labels to distinct colours.  Brands outside
/// the ranking (and records with no brand) fall back to the grey
/// "Other" colour.
#[derive(Debug, Clone)]
pub struct BrandColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl BrandColorMap {
    /// Build a colour map from a top-brands ranking.
    pub fn new(top: &[BrandCount]) -> Self {
        let palette = generate_palette(top.len());
        let mapping: BTreeMap<String, Color32> = top
            .iter()
            .zip(palette.into_iter())
            .map(|(b, c)| (b.name.clone(), c))
            .collect();

        BrandColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a brand label; grey for unranked brands.
    pub fn color_for(&self, brand: Option<&str>) -> Color32 {
        brand
            .and_then(|b| self.mapping.get(b))
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging ramp for correlation cells
// ---------------------------------------------------------------------------

/// Map a correlation coefficient in `[-1, 1]` to a diverging colour:
/// saturated blue at −1, near-white at 0, saturated red at +1.
pub fn correlation_color(r: f64) -> Color32 {
    let r = r.clamp(-1.0, 1.0) as f32;
    let hue = if r < 0.0 { 220.0 } else { 10.0 };
    let strength = r.abs();
    let hsl = Hsl::new(hue, 0.85 * strength, 0.92 - 0.42 * strength);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(10).len(), 10);
    }

    #[test]
    fn unranked_brand_gets_default_color() {
        let map = BrandColorMap::new(&[BrandCount {
            name: "Honda".into(),
            count: 3,
        }]);
        assert_ne!(map.color_for(Some("Honda")), Color32::GRAY);
        assert_eq!(map.color_for(Some("Lada")), Color32::GRAY);
        assert_eq!(map.color_for(None), Color32::GRAY);
    }

    #[test]
    fn correlation_extremes_diverge() {
        let neg = correlation_color(-1.0);
        let pos = correlation_color(1.0);
        assert!(neg.b() > neg.r());
        assert!(pos.r() > pos.b());
    }
}
