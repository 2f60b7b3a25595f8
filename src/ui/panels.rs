use eframe::egui::{self, Align, Layout, RichText, Sense, Stroke, Ui};

use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Top panel – provenance annotation
// ---------------------------------------------------------------------------

/// Experiment name (bold), data tag (italic) on the left, right label on the right.
pub fn provenance_header(ui: &mut Ui, figure: &Figure) {
    let p = &figure.provenance;
    let size = figure.label_font_size;
    ui.horizontal(|ui: &mut Ui| {
        if !p.experiment.is_empty() {
            ui.label(RichText::new(&p.experiment).strong().size(size * 1.3));
            let tag = p.tag();
            if !tag.is_empty() {
                ui.label(RichText::new(tag).italics().size(size));
            }
        }
        if !p.right_label.is_empty() {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                ui.label(RichText::new(&p.right_label).size(size));
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Right side panel – legend outside the axes
// ---------------------------------------------------------------------------

/// Legend entries stacked from the top of the panel (upper-right anchor).
pub fn external_legend(ui: &mut Ui, figure: &Figure) {
    let size = figure.legend_font_size;
    ui.add_space(8.0);
    for trace in &figure.traces {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(2.0 * size, size), Sense::hover());
            ui.painter().line_segment(
                [rect.left_center(), rect.right_center()],
                Stroke::new(trace.line_width, trace.color),
            );
            ui.label(RichText::new(&trace.label).size(size));
        });
    }
}
