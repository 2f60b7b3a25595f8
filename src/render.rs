//! The overlay renderer: selected series in, one comparative figure out.

use crate::color::ColorCycle;
use crate::error::{OverlayError, Result};
use crate::figure::{Axis, Figure, Scale, Trace};
use crate::histogram::{BinSpec, Histogram};
use crate::layout::{figure_size_px, legend_layout_for, LegendLayout};
use crate::series::{SelectedValues, Series};
use crate::style::StyleConfig;

pub const DEFAULT_Y_LABEL: &str = "Events/bin";

/// The variable to histogram and how its axes look.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    pub field: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: BinSpec,
    pub x_scale: Scale,
    pub y_scale: Scale,
    /// Draw the running integral instead of per-bin contents.
    pub cumulative: bool,
}

impl VariableSpec {
    pub fn new(field: impl Into<String>, x_label: impl Into<String>, bins: impl Into<BinSpec>) -> Self {
        Self {
            field: field.into(),
            x_label: x_label.into(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            bins: bins.into(),
            x_scale: Scale::Linear,
            y_scale: Scale::Linear,
            cumulative: false,
        }
    }

    pub fn with_y_label(mut self, y_label: impl Into<String>) -> Self {
        self.y_label = y_label.into();
        self
    }

    pub fn with_x_scale(mut self, scale: Scale) -> Self {
        self.x_scale = scale;
        self
    }

    pub fn with_y_scale(mut self, scale: Scale) -> Self {
        self.y_scale = scale;
        self
    }

    pub fn cumulative(mut self, on: bool) -> Self {
        self.cumulative = on;
        self
    }
}

/// Something that can put a finished figure in front of the user.
pub trait FigureBackend {
    fn display(&mut self, figure: Figure) -> Result<()>;
}

/// Validate the inputs, fill one histogram per series on shared edges and
/// assemble the figure. Nothing is drawn here.
pub fn build_figure(
    series: &[Series<'_>],
    variable: &VariableSpec,
    style: &StyleConfig,
) -> Result<Figure> {
    if series.is_empty() {
        return Err(OverlayError::EmptyCollection);
    }
    variable.bins.validate()?;

    let selected = series
        .iter()
        .map(|s| s.selected_values(&variable.field))
        .collect::<Result<Vec<SelectedValues>>>()?;

    let edges = variable
        .bins
        .edges_for(selected.iter().map(|s| s.values.as_slice()))?;

    let colors = ColorCycle::new(&style.palette, series.len())?;
    let traces = series
        .iter()
        .zip(&selected)
        .enumerate()
        .map(|(i, (s, sel))| {
            let filled =
                Histogram::from_values(edges.clone(), &sel.values, sel.weights.as_deref())?;
            log::debug!(
                "series '{}': {} selected rows, {} in range, underflow {}, overflow {}",
                s.label,
                sel.values.len(),
                filled.entries,
                filled.underflow,
                filled.overflow
            );
            if filled.non_finite > 0 {
                log::warn!(
                    "series '{}': dropped {} non-finite values of '{}'",
                    s.label,
                    filled.non_finite,
                    variable.field
                );
            }
            let histogram = if variable.cumulative {
                filled.cumulative()
            } else {
                filled
            };
            Ok(Trace {
                label: s.label.clone(),
                color: colors.color_for(i),
                line_width: style.line_width,
                histogram,
            })
        })
        .collect::<Result<Vec<Trace>>>()?;

    let legend = legend_layout_for(series.len());
    let (width_px, height_px) = figure_size_px(legend, &style.figure);
    let legend_font_size = match legend {
        LegendLayout::InAxes => style.font.legend_size,
        LegendLayout::Outside { .. } => style.font.external_legend_size,
    };

    Ok(Figure {
        width_px,
        height_px,
        x_axis: Axis {
            label: variable.x_label.clone(),
            scale: variable.x_scale,
        },
        y_axis: Axis {
            label: variable.y_label.clone(),
            scale: variable.y_scale,
        },
        grid: style.grid,
        traces,
        legend,
        legend_font_size,
        label_font_size: style.font.label_size,
        provenance: style.provenance.clone(),
    })
}

/// Build the overlay figure and hand it to `backend` for display.
///
/// Every error is raised before the backend is touched.
pub fn render<B: FigureBackend + ?Sized>(
    series: &[Series<'_>],
    variable: &VariableSpec,
    style: &StyleConfig,
    backend: &mut B,
) -> Result<()> {
    let figure = build_figure(series, variable, style)?;
    log::info!(
        "displaying '{}' overlay with {} series ({}x{} px)",
        variable.field,
        figure.traces.len(),
        figure.width_px,
        figure.height_px
    );
    backend.display(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;
    use crate::layout::LegendAnchor;

    fn ramp(n: usize) -> Dataset {
        Dataset::from_columns(&[("x", (0..n).map(|i| i as f64).collect::<Vec<_>>())]).unwrap()
    }

    #[test]
    fn defaults() {
        let v = VariableSpec::new("mll", "m_ll [GeV]", 40usize);
        assert_eq!(v.y_label, "Events/bin");
        assert_eq!(v.x_scale, Scale::Linear);
        assert_eq!(v.y_scale, Scale::Linear);
        assert_eq!(v.bins, BinSpec::Count(40));
        assert!(!v.cumulative);
    }

    #[test]
    fn traces_share_edges_and_keep_order() {
        let a = ramp(10);
        let b = Dataset::from_columns(&[("x", vec![20.0, 30.0])]).unwrap();
        let series = [Series::new(&a, "a"), Series::new(&b, "b")];
        let fig = build_figure(&series, &VariableSpec::new("x", "x", 5usize), &StyleConfig::default())
            .unwrap();

        assert_eq!(fig.traces[0].label, "a");
        assert_eq!(fig.traces[1].label, "b");
        assert_eq!(fig.traces[0].histogram.edges, fig.traces[1].histogram.edges);
        assert_eq!(fig.traces[0].histogram.edges[0], 0.0);
        assert_eq!(*fig.traces[0].histogram.edges.last().unwrap(), 30.0);
        assert_eq!(fig.traces[0].histogram.integral(), 10.0);
        assert_eq!(fig.traces[1].histogram.integral(), 2.0);
        assert_ne!(fig.traces[0].color, fig.traces[1].color);
    }

    #[test]
    fn style_flows_into_figure() {
        let ds = ramp(4);
        let mut style = StyleConfig::default();
        style.grid = false;
        style.line_width = 3.5;
        style.provenance.experiment = "ALICE".into();
        let fig = build_figure(
            &[Series::new(&ds, "only")],
            &VariableSpec::new("x", "x [cm]", 2usize)
                .with_y_label("Entries")
                .with_y_scale(Scale::Log),
            &style,
        )
        .unwrap();
        assert!(!fig.grid);
        assert_eq!(fig.traces[0].line_width, 3.5);
        assert_eq!(fig.provenance.experiment, "ALICE");
        assert_eq!(fig.y_axis.label, "Entries");
        assert_eq!(fig.y_axis.scale, Scale::Log);
        assert_eq!(fig.x_axis.label, "x [cm]");
    }

    #[test]
    fn legend_moves_out_past_three_series() {
        let ds = ramp(4);
        let style = StyleConfig::default();
        let var = VariableSpec::new("x", "x", 2usize);

        let three: Vec<_> = (0..3).map(|i| Series::new(&ds, format!("s{i}"))).collect();
        let four: Vec<_> = (0..4).map(|i| Series::new(&ds, format!("s{i}"))).collect();
        let narrow = build_figure(&three, &var, &style).unwrap();
        let wide = build_figure(&four, &var, &style).unwrap();

        assert_eq!(narrow.legend, LegendLayout::InAxes);
        assert_eq!(
            wide.legend,
            LegendLayout::Outside {
                anchor: LegendAnchor::UpperRight
            }
        );
        assert!(wide.width_px > narrow.width_px);
        assert_eq!(wide.legend_font_size, style.font.external_legend_size);
    }

    #[test]
    fn cumulative_ends_at_total() {
        let ds = ramp(8);
        let fig = build_figure(
            &[Series::new(&ds, "c")],
            &VariableSpec::new("x", "x", 4usize).cumulative(true),
            &StyleConfig::default(),
        )
        .unwrap();
        assert_eq!(fig.traces[0].histogram.counts, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn weighted_series() {
        let ds = Dataset::from_columns(&[("x", vec![0.5, 1.5]), ("w", vec![2.0, 0.25])]).unwrap();
        let fig = build_figure(
            &[Series::new(&ds, "w").with_weights("w")],
            &VariableSpec::new("x", "x", vec![0.0, 1.0, 2.0]),
            &StyleConfig::default(),
        )
        .unwrap();
        assert_eq!(fig.traces[0].histogram.counts, vec![2.0, 0.25]);
    }

    #[test]
    fn zero_width_edges_give_one_bin() {
        let ds = Dataset::from_columns(&[("x", vec![1.0, 1.0, 2.0])]).unwrap();
        let fig = build_figure(
            &[Series::new(&ds, "spike")],
            &VariableSpec::new("x", "x", vec![1.0, 1.0]),
            &StyleConfig::default(),
        )
        .unwrap();
        let h = &fig.traces[0].histogram;
        assert_eq!(h.counts, vec![2.0]);
        assert_eq!(h.overflow, 1.0);
    }

    #[test]
    fn empty_collection_is_rejected() {
        let err = build_figure(&[], &VariableSpec::new("x", "x", 3usize), &StyleConfig::default());
        assert!(matches!(err, Err(OverlayError::EmptyCollection)));
    }

    #[test]
    fn bad_palette_is_rejected() {
        let ds = ramp(3);
        let mut style = StyleConfig::default();
        style.palette = vec!["not-a-colour".into()];
        let err = build_figure(&[Series::new(&ds, "s")], &VariableSpec::new("x", "x", 3usize), &style);
        assert!(matches!(err, Err(OverlayError::Color(_))));
    }

    #[test]
    fn invalid_bins_fail_before_data_access() {
        let ds = ramp(3);
        // Missing field and bad bins: the bin error wins.
        let err = build_figure(
            &[Series::new(&ds, "s")],
            &VariableSpec::new("missing", "x", vec![2.0, 1.0]),
            &StyleConfig::default(),
        );
        assert!(matches!(err, Err(OverlayError::InvalidBinSpec(_))));
    }
}
