// src/state/controller.rs
use tracing::{debug, error};
use crate::analysis::{
    Derivation, DerivationError, DerivedTable, TabKind,
    DensityDerivation, HistogramDerivation, MapDerivation, RouteDerivation, SummaryDerivation,
};
use crate::config::{DashboardSettings, RegionsFile};
use crate::state::FlightStore;
use crate::state::selection::{DensitySelection, HistogramSelection, MapSelection, RouteSelection};

/// The presentation layer. It receives each tab's table once at startup and
/// again, by value, after every successful recomputation.
pub trait Presenter {
    fn render(&mut self, tab: TabKind, table: DerivedTable);

    fn update(&mut self, tab: TabKind, table: DerivedTable);

    /// Called when a recomputation fails; the last table stays on screen.
    fn report_error(&mut self, _tab: TabKind, _error: &DerivationError) {}
}

/// A selection change carrying the tab's complete new selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Histogram(HistogramSelection),
    Density(DensitySelection),
    Map(MapSelection),
    Routes(RouteSelection),
}

impl DashboardEvent {
    pub fn tab(&self) -> TabKind {
        match self {
            DashboardEvent::Histogram(_) => TabKind::Histogram,
            DashboardEvent::Density(_) => TabKind::Density,
            DashboardEvent::Map(_) => TabKind::Map,
            DashboardEvent::Routes(_) => TabKind::Routes,
        }
    }
}

/// Owns one tab's selection and runs its derivation.
#[derive(Debug)]
pub struct TabController<D: Derivation> {
    derivation: D,
    selection: D::Selection,
    store: FlightStore,
}

impl<D: Derivation> TabController<D> {
    pub fn new(derivation: D, store: FlightStore, selection: D::Selection) -> Self {
        Self {
            derivation,
            selection,
            store,
        }
    }

    pub fn selection(&self) -> &D::Selection {
        &self.selection
    }

    pub fn start(&self, presenter: &mut dyn Presenter) -> Result<(), DerivationError> {
        let table = self.derivation.compute(&self.store, &self.selection)?;
        presenter.render(D::KIND, table);
        Ok(())
    }

    /// Recomputes with `selection`. The selection is only kept when the
    /// derivation succeeds; on failure nothing is pushed to the presenter.
    pub fn on_selection_changed(
        &mut self,
        selection: D::Selection,
        presenter: &mut dyn Presenter,
    ) -> Result<(), DerivationError> {
        debug!(tab = %D::KIND, ?selection, "selection changed");

        match self.derivation.compute(&self.store, &selection) {
            Ok(table) => {
                self.selection = selection;
                presenter.update(D::KIND, table);
                Ok(())
            }
            Err(e) => {
                error!(tab = %D::KIND, error = %e, "derivation failed, keeping previous table");
                presenter.report_error(D::KIND, &e);
                Err(e)
            }
        }
    }
}

/// All five tabs wired to a shared flight store.
#[derive(Debug)]
pub struct Dashboard {
    store: FlightStore,
    histogram: TabController<HistogramDerivation>,
    density: TabController<DensityDerivation>,
    summary: TabController<SummaryDerivation>,
    map: TabController<MapDerivation>,
    routes: TabController<RouteDerivation>,
}

impl Dashboard {
    pub fn new(store: FlightStore, geography: &RegionsFile, settings: &DashboardSettings) -> Result<Self, DerivationError> {
        let map = MapDerivation::new(geography, &settings.excluded_regions)?;

        Ok(Self {
            histogram: TabController::new(
                HistogramDerivation::default(),
                store.clone(),
                HistogramSelection::initial(settings, &store),
            ),
            density: TabController::new(
                DensityDerivation::default(),
                store.clone(),
                DensitySelection::initial(settings, &store),
            ),
            summary: TabController::new(SummaryDerivation, store.clone(), ()),
            map: TabController::new(map, store.clone(), MapSelection::initial(settings, &store)),
            routes: TabController::new(RouteDerivation::default(), store.clone(), RouteSelection::initial(settings)),
            store,
        })
    }

    /// Renders every tab once with its initial selection.
    pub fn start(&self, presenter: &mut dyn Presenter) -> Result<(), DerivationError> {
        self.histogram.start(presenter)?;
        self.density.start(presenter)?;
        self.summary.start(presenter)?;
        self.map.start(presenter)?;
        self.routes.start(presenter)?;
        Ok(())
    }

    pub fn dispatch(&mut self, event: DashboardEvent, presenter: &mut dyn Presenter) -> Result<(), DerivationError> {
        match event {
            DashboardEvent::Histogram(selection) => self.histogram.on_selection_changed(selection, presenter),
            DashboardEvent::Density(selection) => self.density.on_selection_changed(selection, presenter),
            DashboardEvent::Map(selection) => self.map.on_selection_changed(selection, presenter),
            DashboardEvent::Routes(selection) => self.routes.on_selection_changed(selection, presenter),
        }
    }

    pub fn store(&self) -> &FlightStore {
        &self.store
    }

    pub fn histogram_selection(&self) -> &HistogramSelection {
        self.histogram.selection()
    }

    pub fn density_selection(&self) -> &DensitySelection {
        self.density.selection()
    }

    pub fn map_selection(&self) -> &MapSelection {
        self.map.selection()
    }

    pub fn route_selection(&self) -> &RouteSelection {
        self.routes.selection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crate::analysis::fixtures::{carriers, flight, store};
    use crate::analysis::density::Bandwidth;
    use crate::state::selection::DelayRange;

    #[derive(Default)]
    struct RecordingPresenter {
        rendered: Vec<TabKind>,
        updates: Vec<TabKind>,
        tables: HashMap<TabKind, DerivedTable>,
        errors: Vec<(TabKind, DerivationError)>,
    }

    impl Presenter for RecordingPresenter {
        fn render(&mut self, tab: TabKind, table: DerivedTable) {
            self.rendered.push(tab);
            self.tables.insert(tab, table);
        }

        fn update(&mut self, tab: TabKind, table: DerivedTable) {
            self.updates.push(tab);
            self.tables.insert(tab, table);
        }

        fn report_error(&mut self, tab: TabKind, error: &DerivationError) {
            self.errors.push((tab, error.clone()));
        }
    }

    fn dashboard() -> Dashboard {
        let store = store(vec![
            flight("Delta", "JFK", "MIA", 10.0),
            flight("Delta", "JFK", "MIA", -5.0),
            flight("Delta", "JFK", "ATL", 25.0),
            flight("United", "EWR", "ORD", 3.0),
            flight("United", "EWR", "ORD", 48.0),
            flight("American", "LGA", "MIA", 0.0),
        ]);
        Dashboard::new(store, &RegionsFile::new(), &DashboardSettings::default()).unwrap()
    }

    #[test]
    fn test_start_renders_every_tab() {
        let dashboard = dashboard();
        let mut presenter = RecordingPresenter::default();
        dashboard.start(&mut presenter).unwrap();

        assert_eq!(presenter.rendered, TabKind::ALL.to_vec());
        assert!(presenter.updates.is_empty());
        assert_eq!(dashboard.histogram_selection().carriers, vec!["American", "Delta"]);
        assert_eq!(presenter.tables[&TabKind::Routes].num_rows(), 2);
    }

    #[test]
    fn test_event_recomputes_only_its_tab() {
        let mut dashboard = dashboard();
        let mut presenter = RecordingPresenter::default();
        dashboard.start(&mut presenter).unwrap();

        let selection = HistogramSelection {
            carriers: carriers(&["United"]),
            range: DelayRange::new(0.0, 50.0),
            bin_width: 10.0,
        };
        dashboard.dispatch(DashboardEvent::Histogram(selection.clone()), &mut presenter).unwrap();

        assert_eq!(presenter.updates, vec![TabKind::Histogram]);
        assert_eq!(presenter.tables[&TabKind::Histogram].num_rows(), 5);
        assert_eq!(dashboard.histogram_selection(), &selection);
    }

    #[test]
    fn test_failed_derivation_keeps_previous_state() {
        let mut dashboard = dashboard();
        let mut presenter = RecordingPresenter::default();
        dashboard.start(&mut presenter).unwrap();
        let before = presenter.tables[&TabKind::Density].clone();
        let previous_selection = dashboard.density_selection().clone();

        let bad = DensitySelection {
            carriers: carriers(&["Delta"]),
            range: DelayRange::new(-60.0, 120.0),
            bandwidth: Bandwidth::Factor(-1.0),
        };
        let result = dashboard.dispatch(DashboardEvent::Density(bad), &mut presenter);

        assert!(matches!(result, Err(DerivationError::InvalidSelection(_))));
        assert!(presenter.updates.is_empty());
        assert_eq!(presenter.errors.len(), 1);
        assert_eq!(presenter.tables[&TabKind::Density], before);
        assert_eq!(dashboard.density_selection(), &previous_selection);
    }

    #[test]
    fn test_empty_route_is_pushed_as_update() {
        let mut dashboard = dashboard();
        let mut presenter = RecordingPresenter::default();
        dashboard.start(&mut presenter).unwrap();

        let event = DashboardEvent::Routes(RouteSelection {
            origin: "JFK".to_string(),
            destination: "ZZZ".to_string(),
        });
        assert_eq!(event.tab(), TabKind::Routes);
        dashboard.dispatch(event, &mut presenter).unwrap();

        assert!(presenter.tables[&TabKind::Routes].is_empty());
        assert!(presenter.errors.is_empty());
    }
}
