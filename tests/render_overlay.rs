use hist_overlay::layout::LegendAnchor;
use hist_overlay::sample::uniform_dataset;
use hist_overlay::{
    render, BinSpec, Dataset, Figure, FigureBackend, LegendLayout, OverlayError, Result, Scale,
    Selection, Series, StyleConfig, VariableSpec,
};

/// Keeps every figure it is asked to display.
#[derive(Default)]
struct RecordingBackend {
    shown: Vec<Figure>,
}

impl FigureBackend for RecordingBackend {
    fn display(&mut self, figure: Figure) -> Result<()> {
        self.shown.push(figure);
        Ok(())
    }
}

fn mass_variable(bins: impl Into<BinSpec>) -> VariableSpec {
    VariableSpec::new("mass", "m [GeV]", bins)
}

fn draw(series: &[Series<'_>], variable: &VariableSpec) -> (Result<()>, RecordingBackend) {
    let mut backend = RecordingBackend::default();
    let result = render(series, variable, &StyleConfig::default(), &mut backend);
    (result, backend)
}

#[test]
fn single_series_counts_every_row() {
    let ds = uniform_dataset("mass", 100, 0.0, 10.0, 11);
    let series = [Series::new(&ds, "all")];
    let (result, backend) = draw(&series, &mass_variable(10usize));
    result.unwrap();

    assert_eq!(backend.shown.len(), 1);
    let fig = &backend.shown[0];
    assert_eq!(fig.traces.len(), 1);
    assert_eq!(fig.traces[0].label, "all");
    assert_eq!(fig.traces[0].histogram.n_bins(), 10);
    assert_eq!(fig.traces[0].histogram.integral(), 100.0);
    assert_eq!(fig.legend, LegendLayout::InAxes);
    assert_eq!(fig.y_axis.label, "Events/bin");
    assert_eq!(fig.x_axis.label, "m [GeV]");
}

#[test]
fn disjoint_selections_partition_the_rows() {
    let ds = uniform_dataset("mass", 100, 0.0, 10.0, 12);
    let low = Selection::from_indices(0..40, ds.len());
    let high = low.invert(ds.len());
    let series = [
        Series::new(&ds, "first 40").with_selection(low),
        Series::new(&ds, "last 60").with_selection(high),
    ];
    let (result, backend) = draw(&series, &mass_variable(10usize));
    result.unwrap();

    let fig = &backend.shown[0];
    let a = fig.traces[0].histogram.integral();
    let b = fig.traces[1].histogram.integral();
    assert_eq!(a, 40.0);
    assert_eq!(b, 60.0);
    assert_eq!(a + b, 100.0);
    assert_eq!(fig.traces[0].histogram.edges, fig.traces[1].histogram.edges);
    assert_ne!(fig.traces[0].color, fig.traces[1].color);
}

#[test]
fn many_series_move_the_legend_outside_and_widen_the_figure() {
    let ds = uniform_dataset("mass", 50, 0.0, 5.0, 13);
    let series: Vec<Series<'_>> = (0..5)
        .map(|i| Series::new(&ds, format!("copy {i}")))
        .collect();
    let (result, backend) = draw(&series, &mass_variable(20usize));
    result.unwrap();

    let fig = &backend.shown[0];
    assert_eq!(fig.traces.len(), 5);
    assert_eq!(
        fig.legend,
        LegendLayout::Outside {
            anchor: LegendAnchor::UpperRight
        }
    );
    let style = StyleConfig::default();
    assert!(fig.width_px > style.figure.width_in * style.figure.pixels_per_inch);
    assert_eq!(fig.legend_font_size, style.font.external_legend_size);
    // Legend order follows input order.
    let labels: Vec<&str> = fig.traces.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["copy 0", "copy 1", "copy 2", "copy 3", "copy 4"]);
}

#[test]
fn legend_moves_outside_only_above_three_series() {
    let ds = uniform_dataset("mass", 20, 0.0, 1.0, 14);
    let widths: Vec<(LegendLayout, f32)> = [3, 4]
        .into_iter()
        .map(|n| {
            let series: Vec<Series<'_>> = (0..n).map(|i| Series::new(&ds, format!("s{i}"))).collect();
            let (result, backend) = draw(&series, &mass_variable(5usize));
            result.unwrap();
            let fig = &backend.shown[0];
            (fig.legend, fig.width_px)
        })
        .collect();

    assert_eq!(widths[0].0, LegendLayout::InAxes);
    assert!(matches!(widths[1].0, LegendLayout::Outside { .. }));
    assert!(widths[1].1 > widths[0].1);
}

#[test]
fn short_mask_is_rejected_before_display() {
    let ds = uniform_dataset("mass", 100, 0.0, 10.0, 15);
    let series = [
        Series::new(&ds, "ok"),
        Series::new(&ds, "short").with_selection(vec![true; 99]),
    ];
    let (result, backend) = draw(&series, &mass_variable(10usize));

    match result {
        Err(OverlayError::ShapeMismatch {
            label,
            expected,
            actual,
        }) => {
            assert_eq!(label, "short");
            assert_eq!(expected, 100);
            assert_eq!(actual, 99);
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
    assert!(backend.shown.is_empty());
}

#[test]
fn missing_field_in_one_dataset_is_rejected_before_display() {
    let with_mass = uniform_dataset("mass", 30, 0.0, 10.0, 16);
    let without_mass = uniform_dataset("pt", 30, 0.0, 10.0, 17);
    let series = [
        Series::new(&with_mass, "has mass"),
        Series::new(&without_mass, "pt only"),
    ];
    let (result, backend) = draw(&series, &mass_variable(10usize));

    match result {
        Err(OverlayError::FieldNotFound { field, label }) => {
            assert_eq!(field, "mass");
            assert_eq!(label, "pt only");
        }
        other => panic!("expected FieldNotFound, got {other:?}"),
    }
    assert!(backend.shown.is_empty());
}

#[test]
fn bad_bins_and_empty_collections_are_rejected() {
    let ds = uniform_dataset("mass", 10, 0.0, 1.0, 18);
    let series = [Series::new(&ds, "a")];

    let (result, backend) = draw(&series, &mass_variable(0usize));
    assert!(matches!(result, Err(OverlayError::InvalidBinSpec(_))));
    assert!(backend.shown.is_empty());

    let (result, _) = draw(&series, &mass_variable(vec![0.0, 1.0, 0.5]));
    assert!(matches!(result, Err(OverlayError::InvalidBinSpec(_))));

    let (result, backend) = draw(&[], &mass_variable(10usize));
    assert!(matches!(result, Err(OverlayError::EmptyCollection)));
    assert!(backend.shown.is_empty());
}

#[test]
fn all_rows_matches_an_all_true_mask() {
    let ds = uniform_dataset("mass", 64, -3.0, 3.0, 19);
    let series = [
        Series::new(&ds, "implicit"),
        Series::new(&ds, "explicit").with_selection(vec![true; ds.len()]),
    ];
    let (result, backend) = draw(&series, &mass_variable(12usize));
    result.unwrap();

    let fig = &backend.shown[0];
    assert_eq!(fig.traces[0].histogram.counts, fig.traces[1].histogram.counts);
}

#[test]
fn explicit_edges_and_log_axis_are_carried_to_the_figure() {
    let ds = Dataset::from_columns(&[("mass", vec![0.5, 1.5, 1.5, 2.5, 9.0])]).unwrap();
    let variable = mass_variable(vec![0.0, 1.0, 2.0, 3.0]).with_y_scale(Scale::Log);
    let series = [Series::new(&ds, "data")];
    let (result, backend) = draw(&series, &variable);
    result.unwrap();

    let fig = &backend.shown[0];
    let h = &fig.traces[0].histogram;
    assert_eq!(h.counts, vec![1.0, 2.0, 1.0]);
    assert_eq!(h.overflow, 1.0);
    assert_eq!(fig.y_axis.scale, Scale::Log);
    assert_eq!(fig.provenance.experiment, "CMS");
}
