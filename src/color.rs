use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::error::{OverlayError, Result};

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

/// CMS-recommended ten-colour cycle.
pub const CMS_PETROFF10: &[&str] = &[
    "#3f90da", "#ffa90e", "#bd1f01", "#94a4a2", "#832db6", "#a96b59", "#e76300", "#b9ac70",
    "#717581", "#92dadd",
];

pub const ATLAS_WONG: &[&str] =
    &["#0072b2", "#d55e00", "#56b4e9", "#e69f00", "#f0e442", "#009e73", "#cc79a7"];

pub const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex(s: &str) -> Result<Color32> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(OverlayError::Color(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| OverlayError::Color(s.to_string()))
    };
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

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
// Colour cycle: series index → Color32
// ---------------------------------------------------------------------------

/// Assigns colours to series in draw order, wrapping around when exhausted.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    colors: Vec<Color32>,
}

impl ColorCycle {
    /// Cycle over `hex` colours. An empty list falls back to `n` generated hues.
    pub fn new(hex: &[String], n: usize) -> Result<Self> {
        let colors = if hex.is_empty() {
            generate_palette(n.max(1))
        } else {
            hex.iter().map(|h| parse_hex(h)).collect::<Result<Vec<_>>>()?
        };
        Ok(Self { colors })
    }

    pub fn color_for(&self, index: usize) -> Color32 {
        self.colors[index % self.colors.len()]
    }
}
