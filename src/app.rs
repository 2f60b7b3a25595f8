use eframe::egui::{self, FontId, TextStyle};

use crate::error::{OverlayError, Result};
use crate::figure::Figure;
use crate::layout::LegendLayout;
use crate::render::FigureBackend;
use crate::ui::{panels, plot};

/// Text style used for legend entries, sized per figure.
pub const LEGEND_TEXT_STYLE: &str = "legend";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Shows a single finished figure.
pub struct FigureApp {
    pub figure: Figure,
}

impl FigureApp {
    pub fn new(cc: &eframe::CreationContext<'_>, figure: Figure) -> Self {
        let legend_size = figure.legend_font_size;
        cc.egui_ctx.style_mut(|style| {
            style.text_styles.insert(
                TextStyle::Name(LEGEND_TEXT_STYLE.into()),
                FontId::proportional(legend_size),
            );
        });
        Self { figure }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: provenance annotation ----
        egui::TopBottomPanel::top("provenance").show(ctx, |ui| {
            panels::provenance_header(ui, &self.figure);
        });

        // ---- Right side panel: legend outside the axes ----
        if let LegendLayout::Outside { .. } = self.figure.legend {
            egui::SidePanel::right("legend_panel")
                .resizable(false)
                .show(ctx, |ui| {
                    panels::external_legend(ui, &self.figure);
                });
        }

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::overlay_plot(ui, &self.figure);
        });
    }
}

// ---------------------------------------------------------------------------
// Backend: one native window per figure
// ---------------------------------------------------------------------------

/// Displays figures in a native eframe window; `display` blocks until the
/// window is closed.
pub struct EguiBackend {
    pub window_title: String,
}

impl Default for EguiBackend {
    fn default() -> Self {
        Self {
            window_title: "Histogram overlay".into(),
        }
    }
}

impl FigureBackend for EguiBackend {
    fn display(&mut self, figure: Figure) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([figure.width_px, figure.height_px])
                .with_min_inner_size([400.0, 300.0]),
            ..Default::default()
        };

        eframe::run_native(
            &self.window_title,
            options,
            Box::new(move |cc| Ok(Box::new(FigureApp::new(cc, figure)))),
        )
        .map_err(|e| OverlayError::Backend(e.to_string()))
    }
}
