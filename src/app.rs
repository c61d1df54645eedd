// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use tracing::warn;

use crate::analysis::{DerivationError, TabKind};
use crate::config::{DashboardSettings, RegionsFile};
use crate::file::export::TableExporter;
use crate::state::{
    Dashboard, DashboardEvent, FlightStore, HistogramSelection, MapSelection, RouteSelection,
};
use crate::ui::{self, density::DensityDraft, TableBoard};

/// Uncommitted control values for each tab. A draft becomes the tab's
/// selection only once its derivation succeeds.
#[derive(Debug, Clone)]
struct Drafts {
    histogram: HistogramSelection,
    density: DensityDraft,
    map: MapSelection,
    routes: RouteSelection,
}

impl Drafts {
    fn from_dashboard(dashboard: &Dashboard) -> Self {
        Self {
            histogram: dashboard.histogram_selection().clone(),
            density: DensityDraft::new(dashboard.density_selection()),
            map: dashboard.map_selection().clone(),
            routes: dashboard.route_selection().clone(),
        }
    }
}

pub struct FlightsApp {
    dashboard: Dashboard,
    board: TableBoard,
    exporter: TableExporter,
    drafts: Drafts,
    origins: Vec<String>,
    destinations: Vec<String>,
    current_tab: TabKind,
    error_message: Option<String>,
}

impl FlightsApp {
    pub fn new(store: FlightStore, geography: &RegionsFile, settings: &DashboardSettings) -> Result<Self, DerivationError> {
        let origins = store.origins();
        let destinations = store.destinations();
        let dashboard = Dashboard::new(store, geography, settings)?;

        let mut board = TableBoard::default();
        dashboard.start(&mut board)?;

        Ok(Self {
            drafts: Drafts::from_dashboard(&dashboard),
            dashboard,
            board,
            exporter: TableExporter::new(settings.export_dir.clone()),
            origins,
            destinations,
            current_tab: TabKind::Histogram,
            error_message: None,
        })
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Export Table...").clicked() {
                    self.export_current_table();
                    ui.close_menu();
                }
            });

            ui.separator();

            for tab in TabKind::ALL {
                if ui.selectable_label(self.current_tab == tab, tab.title()).clicked() {
                    self.current_tab = tab;
                }
            }
        });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) -> Option<DashboardEvent> {
        ui.heading(self.current_tab.title());
        ui.separator();

        let carriers = self.dashboard.store().carriers();
        let event = match self.current_tab {
            TabKind::Histogram => ui::histogram::show_controls(ui, &mut self.drafts.histogram, carriers)
                .then(|| DashboardEvent::Histogram(self.drafts.histogram.clone())),
            TabKind::Density => ui::density::show_controls(ui, &mut self.drafts.density, carriers)
                .then(|| DashboardEvent::Density(self.drafts.density.selection.clone())),
            TabKind::Map => ui::map::show_controls(ui, &mut self.drafts.map, carriers)
                .then(|| DashboardEvent::Map(self.drafts.map.clone())),
            TabKind::Routes => ui::routes::show_controls(ui, &mut self.drafts.routes, &self.origins, &self.destinations)
                .then(|| DashboardEvent::Routes(self.drafts.routes.clone())),
            TabKind::Table => {
                ui.label("Statistics over every flight in the data set.");
                None
            }
        };

        if let Some(error) = self.board.error(self.current_tab) {
            ui.add_space(8.0);
            ui.colored_label(egui::Color32::RED, error);
        }

        ui.separator();
        if ui.button("Export Table...").clicked() {
            self.export_current_table();
        }

        event
    }

    fn show_view(&self, ui: &mut egui::Ui) {
        let Some(table) = self.board.table(self.current_tab) else {
            return ui::no_data(ui, "Nothing to show yet");
        };

        match self.current_tab {
            TabKind::Histogram => ui::histogram::show_plot(ui, table),
            TabKind::Density => ui::density::show_plot(ui, table),
            TabKind::Table => ui::table::show_table(ui, table),
            TabKind::Map => ui::map::show_plot(ui, table),
            TabKind::Routes => ui::routes::show_plot(ui, table),
        }
    }

    fn dispatch(&mut self, event: DashboardEvent) {
        let tab = event.tab();
        if let Err(e) = self.dashboard.dispatch(event, &mut self.board) {
            // Controls snap back to the selection that produced the visible table
            self.reset_draft(tab);
            self.error_message = Some(format!("{}: {}", tab, e));
        }
    }

    fn reset_draft(&mut self, tab: TabKind) {
        match tab {
            TabKind::Histogram => self.drafts.histogram = self.dashboard.histogram_selection().clone(),
            TabKind::Density => self.drafts.density.reset(self.dashboard.density_selection()),
            TabKind::Map => self.drafts.map = self.dashboard.map_selection().clone(),
            TabKind::Routes => self.drafts.routes = self.dashboard.route_selection().clone(),
            TabKind::Table => {}
        }
    }

    fn export_current_table(&mut self) {
        let Some(table) = self.board.table(self.current_tab) else {
            return;
        };

        let mut file_dialog = FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_title("Export Table")
            .set_file_name(TableExporter::default_file_name(table));
        if let Some(dir) = self.exporter.export_dir() {
            file_dialog = file_dialog.set_directory(dir);
        }

        if let Some(path) = file_dialog.save_file() {
            if let Err(e) = self.exporter.save(table, &path) {
                warn!(error = %e, "export failed");
                self.error_message = Some(format!("Error exporting table: {:#}", e));
            }
        }
    }
}

impl eframe::App for FlightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        let event = egui::SidePanel::left("controls_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.show_controls(ui))
            .inner;
        if let Some(event) = event {
            self.dispatch(event);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_view(ui);
        });

        let error_msg = self.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }
}
