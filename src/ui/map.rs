// src/ui/map.rs
use eframe::egui;
use crate::analysis::DerivedTable;
use crate::state::MapSelection;
use super::{carrier_checkboxes, no_data, parse_color, runs, with_alpha};

const REGION_OUTLINE: egui::Color32 = egui::Color32::from_rgb(120, 120, 120);

pub fn show_controls(ui: &mut egui::Ui, selection: &mut MapSelection, carriers: &[String]) -> bool {
    ui.label("Carriers");
    carrier_checkboxes(ui, "map_carriers", carriers, &mut selection.carriers)
}

/// Closed outline for one region.
fn outline(lons: &[f64], lats: &[f64]) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = lons.iter().zip(lats).map(|(x, y)| [*x, *y]).collect();
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

pub fn show_plot(ui: &mut egui::Ui, table: &DerivedTable) {
    let (Some(carriers), Some(colors), Some(flight_x), Some(flight_y)) = (
        table.text("carrier"),
        table.text("color"),
        table.float_lists("flight_x"),
        table.float_lists("flight_y"),
    ) else {
        return no_data(ui, "Map table is missing columns");
    };
    let (Some(origin_x), Some(origin_y), Some(dest_x), Some(dest_y)) = (
        table.floats("origin_x_loc"),
        table.floats("origin_y_loc"),
        table.floats("dest_x_loc"),
        table.floats("dest_y_loc"),
    ) else {
        return no_data(ui, "Map table is missing columns");
    };

    ui.heading(table.title().unwrap_or("Map"));

    let plot = egui_plot::Plot::new("flight_map")
        .legend(egui_plot::Legend::default())
        .data_aspect(1.0)
        .show_axes([false, false])
        .height(ui.available_height() * 0.7);

    plot.show(ui, |plot_ui| {
        if let Some(regions) = table.side_table("regions") {
            if let (Some(lons), Some(lats)) = (regions.float_lists("lons"), regions.float_lists("lats")) {
                for (lon, lat) in lons.iter().zip(lats) {
                    plot_ui.line(
                        egui_plot::Line::new(outline(lon, lat))
                            .color(REGION_OUTLINE)
                            .width(1.0)
                    );
                }
            }
        }

        for run in runs(carriers) {
            let name = &carriers[run.start];
            let color = parse_color(&colors[run.start]);

            for i in run.clone() {
                let path: Vec<[f64; 2]> = flight_x[i].iter().zip(&flight_y[i]).map(|(x, y)| [*x, *y]).collect();
                plot_ui.line(
                    egui_plot::Line::new(path)
                        .name(name)
                        .color(with_alpha(color, 200))
                        .width(2.0)
                );
            }

            let origins: Vec<[f64; 2]> = run.clone().map(|i| [origin_x[i], origin_y[i]]).collect();
            let destinations: Vec<[f64; 2]> = run.clone().map(|i| [dest_x[i], dest_y[i]]).collect();
            plot_ui.points(
                egui_plot::Points::new(origins)
                    .name(name)
                    .shape(egui_plot::MarkerShape::Square)
                    .filled(true)
                    .radius(4.0)
                    .color(color)
            );
            plot_ui.points(
                egui_plot::Points::new(destinations)
                    .name(name)
                    .shape(egui_plot::MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0)
                    .color(color)
            );
        }
    });

    show_route_list(ui, table);
}

/// Per-route statistics under the map.
fn show_route_list(ui: &mut egui::Ui, table: &DerivedTable) {
    let (Some(carriers), Some(origins), Some(dests), Some(counts)) = (
        table.text("carrier"),
        table.text("origin"),
        table.text("dest"),
        table.ints("count"),
    ) else {
        return;
    };
    let (Some(mean), Some(min), Some(max), Some(distance)) = (
        table.floats("mean_delay"),
        table.floats("min_delay"),
        table.floats("max_delay"),
        table.floats("distance"),
    ) else {
        return;
    };

    egui::CollapsingHeader::new(format!("Routes ({})", table.num_rows()))
        .default_open(false)
        .show(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("map_routes_grid")
                    .striped(true)
                    .num_columns(8)
                    .show(ui, |ui| {
                        for header in ["Carrier", "Origin", "Dest", "Flights", "Mean", "Min", "Max", "Distance"] {
                            ui.strong(header);
                        }
                        ui.end_row();

                        for i in 0..table.num_rows() {
                            ui.label(&carriers[i]);
                            ui.label(&origins[i]);
                            ui.label(&dests[i]);
                            ui.label(counts[i].to_string());
                            ui.label(format!("{:.2}", mean[i]));
                            ui.label(format!("{:.0}", min[i]));
                            ui.label(format!("{:.0}", max[i]));
                            ui.label(format!("{:.0} mi", distance[i]));
                            ui.end_row();
                        }
                    });
            });
        });
}
