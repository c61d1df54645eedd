// src/ui/histogram.rs
use eframe::egui;
use crate::analysis::DerivedTable;
use crate::state::HistogramSelection;
use super::{carrier_checkboxes, no_data, parse_color, range_sliders, runs};

pub fn show_controls(ui: &mut egui::Ui, selection: &mut HistogramSelection, carriers: &[String]) -> bool {
    let mut changed = false;

    ui.label("Carriers");
    changed |= carrier_checkboxes(ui, "histogram_carriers", carriers, &mut selection.carriers);
    ui.separator();

    changed |= ui.add(
        egui::Slider::new(&mut selection.bin_width, 1.0..=30.0)
            .step_by(1.0)
            .text("bin width (min)")
    ).changed();
    ui.add_space(4.0);
    changed |= range_sliders(ui, &mut selection.range);

    changed
}

pub fn show_plot(ui: &mut egui::Ui, table: &DerivedTable) {
    let (Some(names), Some(colors), Some(lefts), Some(rights), Some(proportions), Some(f_proportions), Some(intervals)) = (
        table.text("name"),
        table.text("color"),
        table.floats("left"),
        table.floats("right"),
        table.floats("proportion"),
        table.text("f_proportion"),
        table.text("f_interval"),
    ) else {
        return no_data(ui, "Histogram table is missing columns");
    };

    ui.heading(table.title().unwrap_or("Histogram"));
    if table.is_empty() {
        return no_data(ui, "Select at least one carrier");
    }

    let plot = egui_plot::Plot::new("delay_histogram")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Delay (min)")
        .y_axis_label("Proportion")
        .include_y(0.0);

    plot.show(ui, |plot_ui| {
        for run in runs(names) {
            let color = parse_color(&colors[run.start]);
            let bars: Vec<egui_plot::Bar> = run.clone()
                .map(|i| {
                    egui_plot::Bar::new((lefts[i] + rights[i]) / 2.0, proportions[i])
                        .width(rights[i] - lefts[i])
                        .fill(color)
                        .name(format!("{} {}: {}", names[i], intervals[i], f_proportions[i]))
                })
                .collect();

            plot_ui.bar_chart(
                egui_plot::BarChart::new(bars)
                    .name(&names[run.start])
                    .color(color)
            );
        }
    });
}
