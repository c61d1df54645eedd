// src/ui/routes.rs
use eframe::egui;
use crate::analysis::DerivedTable;
use crate::analysis::routes::CARRIER_INDEX;
use crate::state::RouteSelection;
use super::{no_data, parse_color};

fn airport_combo(ui: &mut egui::Ui, label: &str, value: &mut String, airports: &[String]) -> bool {
    let mut changed = false;
    egui::ComboBox::from_label(label)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for airport in airports {
                changed |= ui.selectable_value(value, airport.clone(), airport).changed();
            }
        });
    changed
}

pub fn show_controls(ui: &mut egui::Ui, selection: &mut RouteSelection, origins: &[String], destinations: &[String]) -> bool {
    let origin = airport_combo(ui, "Origin", &mut selection.origin, origins);
    let destination = airport_combo(ui, "Destination", &mut selection.destination, destinations);
    origin || destination
}

pub fn show_plot(ui: &mut egui::Ui, table: &DerivedTable) {
    let (Some(x), Some(y), Some(names)) = (
        table.floats("x"),
        table.ints("y"),
        table.text("carrier"),
    ) else {
        return no_data(ui, "Route table is missing columns");
    };

    let title = table.title().unwrap_or("Route Details");
    if table.is_empty() {
        return no_data(ui, title);
    }
    ui.heading(title);

    let carriers: Vec<(i64, &str, egui::Color32)> = table.side_table(CARRIER_INDEX)
        .and_then(|index| {
            let (indices, names, colors) = (index.ints("index")?, index.text("carrier")?, index.text("color")?);
            Some(indices.iter()
                .zip(names)
                .zip(colors)
                .map(|((i, name), color)| (*i, name.as_str(), parse_color(color)))
                .collect())
        })
        .unwrap_or_default();

    ui.horizontal_wrapped(|ui| {
        for (index, carrier, _) in &carriers {
            ui.label(format!("{}: {}", index, carrier));
        }
    });

    let plot = egui_plot::Plot::new("route_delays")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Arrival Delay (min)")
        .y_axis_label("Carrier")
        .include_y(-0.5)
        .include_y(carriers.len() as f64 - 0.5);

    plot.show(ui, |plot_ui| {
        for (index, carrier, color) in &carriers {
            let points: Vec<[f64; 2]> = (0..x.len())
                .filter(|&i| y[i] == *index)
                .map(|i| [x[i], y[i] as f64])
                .collect();

            plot_ui.points(
                egui_plot::Points::new(points)
                    .name(carrier)
                    .filled(true)
                    .radius(6.0)
                    .color(color.gamma_multiply(0.6))
            );
        }
    });

    ui.label(format!("{} flights from {} carriers", names.len(), carriers.len()));
}
