use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{ATLAS_WONG, CMS_PETROFF10, TABLEAU10};
use crate::error::Result;

/// Styling passed explicitly into every render call (JSON or programmatic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    /// Outline width of every histogram trace, in points.
    pub line_width: f32,
    pub grid: bool,
    /// Colour cycle as `#rrggbb` strings; empty → generated hues.
    pub palette: Vec<String>,
    pub provenance: Provenance,
}

impl Default for StyleConfig {
    fn default() -> Self {
        BuiltinTheme::Cms.base_config()
    }
}

impl StyleConfig {
    /// Parse a JSON style. The `theme` key picks the base preset (CMS when
    /// absent); every other key present overrides that preset.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(json)?;
        let theme = overrides
            .get("theme")
            .and_then(Value::as_str)
            .unwrap_or("cms");
        let mut merged = serde_json::to_value(BuiltinTheme::parse(theme).base_config())?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }
}

/// Recursive object merge; non-object values replace.
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width_in: f32,
    pub height_in: f32,
    /// Width used when the legend is moved outside the axes.
    pub wide_width_in: f32,
    pub pixels_per_inch: f32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 8.0,
            height_in: 8.0,
            wide_width_in: 12.0,
            pixels_per_inch: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub label_size: f32,
    pub legend_size: f32,
    pub external_legend_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            label_size: 20.0,
            legend_size: 18.0,
            external_legend_size: 16.0,
        }
    }
}

/// Data-source stamp drawn on every figure (e.g. **CMS**, √s_NN = 13.6 TeV).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provenance {
    pub experiment: String,
    /// Real data; `false` adds a "Simulation" tag.
    pub data: bool,
    /// Free-form status after the experiment name ("Preliminary", ...).
    pub status: String,
    /// Right-aligned label, usually the centre-of-mass energy.
    pub right_label: String,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            experiment: "CMS".into(),
            data: true,
            status: String::new(),
            right_label: "\u{221A}s_NN = 13.6 TeV".into(),
        }
    }
}

impl Provenance {
    /// Italic text after the experiment name.
    pub fn tag(&self) -> String {
        match (self.data, self.status.is_empty()) {
            (true, true) => String::new(),
            (true, false) => self.status.clone(),
            (false, true) => "Simulation".into(),
            (false, false) => format!("Simulation {}", self.status),
        }
    }
}

/// Built-in style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    Cms,
    Atlas,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "atlas" => Self::Atlas,
            "minimal" => Self::Minimal,
            _ => Self::Cms,
        }
    }

    pub fn base_config(self) -> StyleConfig {
        match self {
            Self::Cms => cms(),
            Self::Atlas => atlas(),
            Self::Minimal => minimal(),
        }
    }
}

fn palette(hex: &[&str]) -> Vec<String> {
    hex.iter().map(|s| s.to_string()).collect()
}

fn cms() -> StyleConfig {
    StyleConfig {
        theme: "cms".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        line_width: 2.0,
        grid: true,
        palette: palette(CMS_PETROFF10),
        provenance: Provenance::default(),
    }
}

fn atlas() -> StyleConfig {
    StyleConfig {
        theme: "atlas".into(),
        figure: FigureConfig {
            width_in: 8.0,
            height_in: 6.0,
            ..FigureConfig::default()
        },
        palette: palette(ATLAS_WONG),
        provenance: Provenance {
            experiment: "ATLAS".into(),
            status: "Internal".into(),
            right_label: "\u{221A}s = 13.6 TeV".into(),
            ..Provenance::default()
        },
        ..cms()
    }
}

fn minimal() -> StyleConfig {
    StyleConfig {
        theme: "minimal".into(),
        font: FontConfig {
            label_size: 13.0,
            legend_size: 12.0,
            external_legend_size: 11.0,
        },
        line_width: 1.5,
        grid: false,
        palette: palette(TABLEAU10),
        provenance: Provenance {
            experiment: String::new(),
            right_label: String::new(),
            ..Provenance::default()
        },
        ..cms()
    }
}
