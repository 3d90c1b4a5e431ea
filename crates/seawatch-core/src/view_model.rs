//! Dashboard view model.
//!
//! [`ViewModel`] owns the [`EventStore`] and the current selection, turns UI
//! actions into store calls, and returns fresh panel projections. The core
//! never pushes updates: after any mutating call the rendering layer asks
//! for the panels again.

use seawatch_types::{
    DetailView, Event, EventId, EventStatus, GeoPoint, Overlay, PageView, SidebarEntry,
};
use tracing::debug;

use crate::annotator;
use crate::error::TrackerError;
use crate::state_machine;
use crate::store::{EventStore, NewEvent};

/// Project an event into the detail panel.
pub fn detail_view(event: &Event) -> DetailView {
    DetailView {
        id: event.id.clone(),
        target_label: event.target_label.clone(),
        status: event.status,
        allowed_next_statuses: state_machine::allowed_next(event.status).to_vec(),
    }
}

/// Store plus selection, exposed as renderable panels.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    /// The authoritative event registry.
    store: EventStore,
    /// Event shown in the detail panel.
    selected: Option<EventId>,
}

impl ViewModel {
    /// Wrap an existing store with nothing selected.
    pub const fn new(store: EventStore) -> Self {
        Self {
            store,
            selected: None,
        }
    }

    /// Read-only access to the underlying store.
    pub const fn store(&self) -> &EventStore {
        &self.store
    }

    /// The currently selected event id, if any.
    pub const fn selected(&self) -> Option<&EventId> {
        self.selected.as_ref()
    }

    // -------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------

    /// Create an event and return its detail view.
    ///
    /// The selection is left unchanged.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`EventStore::create`].
    pub fn create_event(
        &mut self,
        target_label: impl Into<String>,
        location: Option<GeoPoint>,
        radius_meters: Option<f64>,
    ) -> Result<DetailView, TrackerError> {
        self.store
            .create(target_label, location, radius_meters)
            .map(detail_view)
    }

    /// Create an event from a full description and return its detail view.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`EventStore::create_with`].
    pub fn create_event_with(&mut self, new: NewEvent) -> Result<DetailView, TrackerError> {
        self.store.create_with(new).map(detail_view)
    }

    /// Select an event and return its detail view.
    ///
    /// Selecting the same event twice without a mutation in between returns
    /// identical views.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if the id is unknown. The previous
    /// selection is kept in that case.
    pub fn select_event(&mut self, id: &EventId) -> Result<DetailView, TrackerError> {
        let view = detail_view(self.store.get(id)?);
        debug!(event_id = %id, status = %view.status, "event selected");
        self.selected = Some(id.clone());
        Ok(view)
    }

    /// Clear the detail panel.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move an event to `new_status` and return the refreshed detail view.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] for an unknown id. An
    /// [`TrackerError::InvalidTransition`] is propagated unchanged and the
    /// event keeps its status.
    pub fn apply_transition(
        &mut self,
        id: &EventId,
        new_status: EventStatus,
    ) -> Result<DetailView, TrackerError> {
        self.store.update_status(id, new_status).map(detail_view)
    }

    /// Record a threat score and return the refreshed detail view.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] or
    /// [`TrackerError::InvalidThreatScore`].
    pub fn update_threat_score(
        &mut self,
        id: &EventId,
        score: u8,
    ) -> Result<DetailView, TrackerError> {
        self.store.update_threat_score(id, score).map(detail_view)
    }

    // -------------------------------------------------------------------
    // Panels
    // -------------------------------------------------------------------

    /// Sidebar rows in insertion order.
    pub fn render_sidebar(&self) -> Vec<SidebarEntry> {
        self.store.list().map(SidebarEntry::from).collect()
    }

    /// Map overlays for every located event.
    pub fn render_map(&self) -> Vec<Overlay> {
        annotator::annotate(self.store.list())
    }

    /// Detail panel for the current selection.
    pub fn render_detail(&self) -> Option<DetailView> {
        let id = self.selected.as_ref()?;
        self.store.get(id).ok().map(detail_view)
    }

    /// All three panels at once.
    pub fn render_page(&self) -> PageView {
        PageView {
            sidebar: self.render_sidebar(),
            overlays: self.render_map(),
            detail: self.render_detail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use seawatch_types::OverlayColor;

    use super::*;

    fn make_view_model() -> ViewModel {
        let mut vm = ViewModel::default();
        let here = Some(GeoPoint::new(23.5, 121.0));
        assert!(vm.create_event("暗船", here, Some(200_000.0)).is_ok());
        assert!(vm.create_event("指定船", None, None).is_ok());
        vm
    }

    #[test]
    fn detail_lists_allowed_next_statuses() {
        let mut vm = make_view_model();
        let view = vm.select_event(&EventId::from("EVT-001"));
        assert_eq!(
            view.map(|v| v.allowed_next_statuses),
            Ok(vec![EventStatus::Investigate, EventStatus::Dismissed])
        );
    }

    #[test]
    fn terminal_detail_has_no_next_statuses() {
        let mut vm = make_view_model();
        let id = EventId::from("EVT-002");
        let view = vm.apply_transition(&id, EventStatus::Dismissed);
        assert_eq!(view.map(|v| v.allowed_next_statuses), Ok(Vec::new()));
    }

    #[test]
    fn failed_select_keeps_previous_selection() {
        let mut vm = make_view_model();
        let id = EventId::from("EVT-002");
        assert!(vm.select_event(&id).is_ok());
        assert!(vm.select_event(&EventId::from("EVT-999")).is_err());
        assert_eq!(vm.selected(), Some(&id));
    }

    #[test]
    fn create_does_not_change_selection() {
        let mut vm = make_view_model();
        assert!(vm.select_event(&EventId::from("EVT-001")).is_ok());
        let created = vm.create_event("新事件", None, None).map(|v| v.id);
        assert_eq!(created, Ok(EventId::from("EVT-003")));
        assert_eq!(vm.selected(), Some(&EventId::from("EVT-001")));
    }

    #[test]
    fn render_detail_tracks_transitions() {
        let mut vm = make_view_model();
        let id = EventId::from("EVT-001");
        assert!(vm.render_detail().is_none());
        assert!(vm.select_event(&id).is_ok());
        assert!(vm.apply_transition(&id, EventStatus::Investigate).is_ok());
        let status = vm.render_detail().map(|d| d.status);
        assert_eq!(status, Some(EventStatus::Investigate));

        vm.clear_selection();
        assert!(vm.render_detail().is_none());
    }

    #[test]
    fn map_recolors_after_transition() {
        let mut vm = make_view_model();
        let id = EventId::from("EVT-001");
        let before = vm.render_map();
        assert_eq!(before.len(), 1);
        assert_eq!(before.first().map(|o| o.color), Some(OverlayColor::Amber));

        assert!(vm.apply_transition(&id, EventStatus::Investigate).is_ok());
        let after = vm.render_map();
        assert_eq!(after.first().map(|o| o.color), Some(OverlayColor::Red));
    }

    #[test]
    fn render_page_composes_panels() {
        let mut vm = make_view_model();
        assert!(vm.select_event(&EventId::from("EVT-002")).is_ok());
        let page = vm.render_page();
        assert_eq!(page.sidebar.len(), 2);
        assert_eq!(page.overlays.len(), 1);
        let label = page.detail.map(|d| d.target_label);
        assert_eq!(label.as_deref(), Some("指定船"));
    }

    #[test]
    fn threat_score_update_returns_detail() {
        let mut vm = make_view_model();
        let id = EventId::from("EVT-002");
        assert!(vm.update_threat_score(&id, 90).is_ok());
        assert_eq!(vm.store().get(&id).map(Event::alert_active), Ok(true));
        let missing = EventId::from("EVT-404");
        assert!(vm.update_threat_score(&missing, 90).is_err());
    }
}
