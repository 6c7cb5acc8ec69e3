use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Label;

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
// Label colours
// ---------------------------------------------------------------------------

/// Fixed colour per quality label, shared by the scatter and the verdict.
#[derive(Debug, Clone)]
pub struct LabelColors {
    bad: Color32,
    good: Color32,
}

impl Default for LabelColors {
    fn default() -> Self {
        // Hue 0 (red) for bad, hue 180 (cyan) for good.
        let palette = generate_palette(2);
        LabelColors {
            bad: palette.first().copied().unwrap_or(Color32::RED),
            good: palette.get(1).copied().unwrap_or(Color32::LIGHT_BLUE),
        }
    }
}

impl LabelColors {
    pub fn color_for(&self, label: Label) -> Color32 {
        match label {
            Label::Bad => self.bad,
            Label::Good => self.good,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn labels_get_distinct_colours() {
        let colors = LabelColors::default();
        assert_ne!(colors.color_for(Label::Good), colors.color_for(Label::Bad));
    }
}
