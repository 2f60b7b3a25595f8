use crate::style::FigureConfig;

/// Above this many series the legend leaves the axes.
pub const EXTERNAL_LEGEND_THRESHOLD: usize = 3;

/// Widening applied when a style's `wide_width_in` does not exceed `width_in`.
pub const FALLBACK_WIDEN_FACTOR: f32 = 1.5;

/// Where the legend box is anchored relative to the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendAnchor {
    UpperRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLayout {
    /// Default placement inside the axes.
    InAxes,
    /// Outside the plot area; the figure is widened to make room.
    Outside { anchor: LegendAnchor },
}

/// Legend placement for a figure with `series_count` traces.
pub fn legend_layout_for(series_count: usize) -> LegendLayout {
    if series_count > EXTERNAL_LEGEND_THRESHOLD {
        LegendLayout::Outside {
            anchor: LegendAnchor::UpperRight,
        }
    } else {
        LegendLayout::InAxes
    }
}

/// Figure size in pixels `(width, height)` for the given legend layout.
pub fn figure_size_px(layout: LegendLayout, figure: &FigureConfig) -> (f32, f32) {
    let width_in = match layout {
        LegendLayout::InAxes => figure.width_in,
        LegendLayout::Outside { .. } if figure.wide_width_in > figure.width_in => {
            figure.wide_width_in
        }
        LegendLayout::Outside { .. } => figure.width_in * FALLBACK_WIDEN_FACTOR,
    };
    (
        width_in * figure.pixels_per_inch,
        figure.height_in * figure.pixels_per_inch,
    )
}
