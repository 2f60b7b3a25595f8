//! Backend-independent description of one overlay figure.

use std::str::FromStr;

use eframe::egui::Color32;
use serde::Deserialize;

use crate::error::OverlayError;
use crate::histogram::Histogram;
use crate::layout::LegendLayout;
use crate::style::Provenance;

/// Axis scale transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    #[serde(alias = "logarithmic")]
    Log,
}

impl FromStr for Scale {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Scale::Linear),
            "log" | "logarithmic" => Ok(Scale::Log),
            _ => Err(OverlayError::InvalidScale(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: String,
    pub scale: Scale,
}

/// One outlined histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    pub color: Color32,
    pub line_width: f32,
    pub histogram: Histogram,
}

impl Trace {
    /// Outline vertices in plot coordinates.
    ///
    /// The outline rises from the baseline at the first edge, steps across
    /// every bin and drops back at the last edge. Log axes are plotted in
    /// `log10` space: y values below `y_floor` are raised to it and points
    /// with `x <= 0` are dropped.
    pub fn step_points(&self, x_scale: Scale, y_scale: Scale, y_floor: f64) -> Vec<[f64; 2]> {
        let h = &self.histogram;
        let (Some(&first), Some(&last)) = (h.edges.first(), h.edges.last()) else {
            return Vec::new();
        };
        let base = match y_scale {
            Scale::Linear => 0.0,
            Scale::Log => y_floor,
        };

        let mut raw = Vec::with_capacity(2 * h.n_bins() + 2);
        raw.push([first, base]);
        for (w, &c) in h.edges.windows(2).zip(&h.counts) {
            raw.push([w[0], c]);
            raw.push([w[1], c]);
        }
        raw.push([last, base]);

        raw.into_iter()
            .filter_map(|[x, y]| {
                let x = match x_scale {
                    Scale::Linear => x,
                    Scale::Log if x > 0.0 => x.log10(),
                    Scale::Log => return None,
                };
                let y = match y_scale {
                    Scale::Linear => y,
                    Scale::Log => y.max(y_floor).log10(),
                };
                Some([x, y])
            })
            .collect()
    }
}

/// Everything the backend needs to draw one overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width_px: f32,
    pub height_px: f32,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub grid: bool,
    /// Draw order and legend order.
    pub traces: Vec<Trace>,
    pub legend: LegendLayout,
    pub legend_font_size: f32,
    pub label_font_size: f32,
    pub provenance: Provenance,
}

impl Figure {
    /// Lowest y drawn on a log axis: one decade below the smallest positive
    /// bin content of any trace (0.1 when every bin is empty).
    pub fn log_floor(&self) -> f64 {
        self.traces
            .iter()
            .filter_map(|t| t.histogram.min_positive())
            .reduce(f64::min)
            .map(|m| 10f64.powi(m.log10().floor() as i32 - 1))
            .unwrap_or(0.1)
    }

    /// Largest bin content over all traces.
    pub fn max_count(&self) -> f64 {
        self.traces
            .iter()
            .map(|t| t.histogram.max_count())
            .fold(0.0, f64::max)
    }
}

/// Tick label for a coordinate on a log axis (plotted as `log10`).
/// Only whole decades are labelled.
pub fn log_tick_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 {
        return String::new();
    }
    format!("10{}", superscript(rounded as i32))
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207B}',
            '0' => '\u{2070}',
            '1' => '\u{00B9}',
            '2' => '\u{00B2}',
            '3' => '\u{00B3}',
            '4' => '\u{2074}',
            '5' => '\u{2075}',
            '6' => '\u{2076}',
            '7' => '\u{2077}',
            '8' => '\u{2078}',
            '9' => '\u{2079}',
            _ => c,
        })
        .collect()
}
