// src/ui/density.rs
use eframe::egui;
use crate::analysis::{Bandwidth, DerivedTable};
use crate::state::DensitySelection;
use super::{carrier_checkboxes, no_data, parse_color, range_sliders};

/// Editable density controls. The manual factor survives switching back to
/// automatic bandwidth so the slider does not jump.
#[derive(Debug, Clone)]
pub struct DensityDraft {
    pub selection: DensitySelection,
    pub manual: bool,
    pub factor: f64,
}

impl DensityDraft {
    pub fn new(selection: &DensitySelection) -> Self {
        let mut draft = Self {
            selection: selection.clone(),
            manual: false,
            factor: 0.5,
        };
        draft.reset(selection);
        draft
    }

    pub fn reset(&mut self, selection: &DensitySelection) {
        self.selection = selection.clone();
        self.manual = !selection.bandwidth.is_auto();
        if let Bandwidth::Factor(factor) = selection.bandwidth {
            self.factor = factor;
        }
    }

    fn sync_bandwidth(&mut self) {
        self.selection.bandwidth = if self.manual {
            Bandwidth::Factor(self.factor)
        } else {
            Bandwidth::Scott
        };
    }
}

pub fn show_controls(ui: &mut egui::Ui, draft: &mut DensityDraft, carriers: &[String]) -> bool {
    let mut changed = false;

    ui.label("Carriers");
    changed |= carrier_checkboxes(ui, "density_carriers", carriers, &mut draft.selection.carriers);
    ui.separator();

    changed |= ui.checkbox(&mut draft.manual, "Choose Bandwidth (Else Auto)").changed();
    ui.add_enabled_ui(draft.manual, |ui| {
        changed |= ui.add(
            egui::Slider::new(&mut draft.factor, 0.1..=5.0)
                .step_by(0.1)
                .text("bandwidth")
        ).changed();
    });
    ui.add_space(4.0);
    changed |= range_sliders(ui, &mut draft.selection.range);

    if changed {
        draft.sync_bandwidth();
    }
    changed
}

pub fn show_plot(ui: &mut egui::Ui, table: &DerivedTable) {
    let (Some(labels), Some(colors), Some(xs), Some(ys)) = (
        table.text("label"),
        table.text("color"),
        table.float_lists("x"),
        table.float_lists("y"),
    ) else {
        return no_data(ui, "Density table is missing columns");
    };

    ui.heading(table.title().unwrap_or("Density"));
    if table.is_empty() {
        return no_data(ui, "No carrier has enough flights in this range");
    }

    let plot = egui_plot::Plot::new("delay_density")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Delay (min)")
        .y_axis_label("Density")
        .include_y(0.0);

    plot.show(ui, |plot_ui| {
        for i in 0..table.num_rows() {
            let points: Vec<[f64; 2]> = xs[i].iter()
                .zip(&ys[i])
                .map(|(x, y)| [*x, *y])
                .collect();

            plot_ui.line(
                egui_plot::Line::new(points)
                    .name(&labels[i])
                    .color(parse_color(&colors[i]))
                    .width(3.0)
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DelayRange;

    fn selection(bandwidth: Bandwidth) -> DensitySelection {
        DensitySelection {
            carriers: vec!["Delta".to_string()],
            range: DelayRange::new(-60.0, 120.0),
            bandwidth,
        }
    }

    #[test]
    fn test_draft_tracks_bandwidth_mode() {
        let mut draft = DensityDraft::new(&selection(Bandwidth::Scott));
        assert!(!draft.manual);

        draft.manual = true;
        draft.factor = 1.5;
        draft.sync_bandwidth();
        assert_eq!(draft.selection.bandwidth, Bandwidth::Factor(1.5));

        draft.manual = false;
        draft.sync_bandwidth();
        assert_eq!(draft.selection.bandwidth, Bandwidth::Scott);
        assert_eq!(draft.factor, 1.5);
    }

    #[test]
    fn test_reset_restores_committed_selection() {
        let mut draft = DensityDraft::new(&selection(Bandwidth::Factor(0.8)));
        assert!(draft.manual);
        assert_eq!(draft.factor, 0.8);

        draft.selection.range = DelayRange::new(50.0, 10.0);
        draft.reset(&selection(Bandwidth::Scott));
        assert!(!draft.manual);
        assert_eq!(draft.selection.range, DelayRange::new(-60.0, 120.0));
    }
}
