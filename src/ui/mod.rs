// src/ui/mod.rs
use std::collections::HashMap;
use std::ops::Range;
use eframe::egui;
use crate::analysis::{DerivationError, DerivedTable, TabKind};
use crate::state::{DelayRange, Presenter};

pub mod histogram;
pub mod density;
pub mod table;
pub mod map;
pub mod routes;

/// Slider bounds shared by the histogram and density range controls.
pub const RANGE_LIMITS: (f64, f64) = (-60.0, 180.0);

/// Presenter backing the egui front-end: the latest table per tab, swapped
/// wholesale on every update.
#[derive(Debug, Default)]
pub struct TableBoard {
    tables: HashMap<TabKind, DerivedTable>,
    errors: HashMap<TabKind, String>,
}

impl TableBoard {
    pub fn table(&self, tab: TabKind) -> Option<&DerivedTable> {
        self.tables.get(&tab)
    }

    pub fn error(&self, tab: TabKind) -> Option<&str> {
        self.errors.get(&tab).map(String::as_str)
    }
}

impl Presenter for TableBoard {
    fn render(&mut self, tab: TabKind, table: DerivedTable) {
        self.errors.remove(&tab);
        self.tables.insert(tab, table);
    }

    fn update(&mut self, tab: TabKind, table: DerivedTable) {
        self.errors.remove(&tab);
        self.tables.insert(tab, table);
    }

    fn report_error(&mut self, tab: TabKind, error: &DerivationError) {
        self.errors.insert(tab, error.to_string());
    }
}

/// `#rrggbb` to a colour; unparseable channels fall back to mid grey.
pub fn parse_color(hex: &str) -> egui::Color32 {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(128)
    };
    egui::Color32::from_rgb(channel(0), channel(2), channel(4))
}

pub fn with_alpha(color: egui::Color32, alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// One checkbox per carrier. Keeps `selected` in the order of `available`.
pub fn carrier_checkboxes(ui: &mut egui::Ui, id: &str, available: &[String], selected: &mut Vec<String>) -> bool {
    let mut changed = false;

    egui::ScrollArea::vertical()
        .id_source(id)
        .max_height(260.0)
        .show(ui, |ui| {
            for carrier in available {
                let mut checked = selected.contains(carrier);
                if ui.checkbox(&mut checked, carrier).changed() {
                    if checked {
                        selected.push(carrier.clone());
                    } else {
                        selected.retain(|c| c != carrier);
                    }
                    changed = true;
                }
            }
        });

    if changed {
        let chosen = std::mem::take(selected);
        selected.extend(available.iter().filter(|c| chosen.contains(c)).cloned());
    }
    changed
}

pub fn range_sliders(ui: &mut egui::Ui, range: &mut DelayRange) -> bool {
    let (low, high) = RANGE_LIMITS;
    ui.label("Range of Delays (min)");
    let start = ui.add(egui::Slider::new(&mut range.start, low..=high).step_by(5.0).text("from"));
    let end = ui.add(egui::Slider::new(&mut range.end, low..=high).step_by(5.0).text("to"));
    start.changed() || end.changed()
}

/// Contiguous runs of equal names, as index ranges. Derived tables keep each
/// carrier's rows together.
pub fn runs(names: &[String]) -> Vec<Range<usize>> {
    let mut out: Vec<Range<usize>> = Vec::new();
    for (i, name) in names.iter().enumerate() {
        match out.last_mut() {
            Some(run) if names[run.start] == *name => run.end = i + 1,
            _ => out.push(i..i + 1),
        }
    }
    out
}

pub fn no_data(ui: &mut egui::Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(message);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Column;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#1f77b4"), egui::Color32::from_rgb(0x1f, 0x77, 0xb4));
        assert_eq!(parse_color("oops"), egui::Color32::from_rgb(128, 128, 128));
    }

    #[test]
    fn test_runs() {
        let names: Vec<String> = ["A", "A", "B", "C", "C", "C"].iter().map(|s| s.to_string()).collect();
        assert_eq!(runs(&names), vec![0..2, 2..3, 3..6]);
        assert!(runs(&[]).is_empty());
    }

    #[test]
    fn test_board_keeps_latest_table_and_clears_errors() {
        let mut board = TableBoard::default();
        let first = DerivedTable::new("routes")
            .with_column("x", Column::Float(vec![1.0])).unwrap();
        let second = DerivedTable::new("routes")
            .with_column("x", Column::Float(Vec::new())).unwrap();

        board.render(TabKind::Routes, first.clone());
        board.report_error(TabKind::Routes, &DerivationError::InvalidSelection("bad".to_string()));
        assert_eq!(board.table(TabKind::Routes), Some(&first));
        assert!(board.error(TabKind::Routes).unwrap().contains("bad"));

        board.update(TabKind::Routes, second.clone());
        assert_eq!(board.table(TabKind::Routes), Some(&second));
        assert_eq!(board.error(TabKind::Routes), None);
        assert_eq!(board.table(TabKind::Map), None);
    }
}
