use std::ops::RangeInclusive;

use eframe::egui::{RichText, TextStyle, Ui};
use egui_plot::{Corner, GridMark, Legend, Line, Plot, PlotPoints};

use crate::app::LEGEND_TEXT_STYLE;
use crate::figure::{log_tick_label, Figure, Scale};
use crate::layout::LegendLayout;

// ---------------------------------------------------------------------------
// Overlay plot (central panel)
// ---------------------------------------------------------------------------

/// Draw every trace of `figure` as a step outline on shared axes.
pub fn overlay_plot(ui: &mut Ui, figure: &Figure) {
    let x_scale = figure.x_axis.scale;
    let y_scale = figure.y_axis.scale;
    let y_floor = figure.log_floor();

    let mut plot = Plot::new("histogram_overlay")
        .x_axis_label(RichText::new(&figure.x_axis.label).size(figure.label_font_size))
        .y_axis_label(RichText::new(&figure.y_axis.label).size(figure.label_font_size))
        .show_grid(figure.grid)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false);

    if figure.legend == LegendLayout::InAxes {
        plot = plot.legend(
            Legend::default()
                .position(Corner::RightTop)
                .text_style(TextStyle::Name(LEGEND_TEXT_STYLE.into())),
        );
    }

    plot = match y_scale {
        Scale::Linear => plot.include_y(0.0).include_y(figure.max_count() * 1.05),
        Scale::Log => plot
            .include_y(y_floor.log10())
            .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                log_tick_label(mark.value)
            }),
    };
    if x_scale == Scale::Log {
        plot = plot.x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            log_tick_label(mark.value)
        });
    }

    plot.show(ui, |plot_ui| {
        for trace in &figure.traces {
            let points = PlotPoints::new(trace.step_points(x_scale, y_scale, y_floor));
            let line = Line::new(points)
                .name(&trace.label)
                .color(trace.color)
                .width(trace.line_width);
            plot_ui.line(line);
        }
    });
}
