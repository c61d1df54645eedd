// src/ui/table.rs
use eframe::egui;
use crate::analysis::{Column, DerivedTable};

fn format_cell(column: &Column, row: usize) -> String {
    match column {
        Column::Float(values) => values.get(row).map(|v| format!("{:.2}", v)).unwrap_or_default(),
        _ => column.cell(row).unwrap_or_default(),
    }
}

pub fn show_table(ui: &mut egui::Ui, table: &DerivedTable) {
    ui.heading(table.title().unwrap_or("Summary Statistics"));
    ui.add_space(8.0);

    egui::ScrollArea::both().show(ui, |ui| {
        egui::Grid::new("summary_grid")
            .striped(true)
            .num_columns(table.columns().len())
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for name in table.column_names() {
                    ui.strong(name);
                }
                ui.end_row();

                for row in 0..table.num_rows() {
                    for (_, column) in table.columns() {
                        ui.label(format_cell(column, row));
                    }
                    ui.end_row();
                }
            });
    });
}
