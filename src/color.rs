use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use rusty_burette::render::MarkerKind;

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
            let hue = (i as f32 / n as f32) * 300.0 + 200.0;
            let hsl = Hsl::new(hue, 0.70, 0.45);
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
// Fixed colours for figure elements
// ---------------------------------------------------------------------------

pub const HISTOGRAM: Color32 = Color32::from_rgb(60, 160, 60);
pub const T_CURVE: Color32 = Color32::BLACK;
pub const KDE_CURVE: Color32 = Color32::from_rgb(200, 0, 200);
pub const PEAK: Color32 = Color32::BLACK;

/// Colour of a vertical reference line. Sigma lines fade with distance
/// from the mean.
pub fn marker_color(kind: MarkerKind) -> Color32 {
    match kind {
        MarkerKind::Mean => Color32::RED,
        MarkerKind::Target => Color32::BLUE,
        MarkerKind::TrimmedMean => Color32::from_rgb(0, 190, 190),
        MarkerKind::KdeMode => Color32::from_rgb(210, 180, 0),
        MarkerKind::Sigma(k) => {
            let alpha = match k.unsigned_abs() {
                1 => 255,
                2 => 153,
                _ => 102,
            };
            Color32::from_rgba_unmultiplied(128, 0, 128, alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn sigma_lines_fade_outward() {
        let a1 = marker_color(MarkerKind::Sigma(1)).a();
        let a3 = marker_color(MarkerKind::Sigma(-3)).a();
        assert!(a1 > a3);
    }
}
