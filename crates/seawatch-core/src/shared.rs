//! Thread-safe handle around a [`ViewModel`].
//!
//! One [`Mutex`] guards the whole view model, store included. Every
//! operation, reads too, takes the lock and runs to completion before the
//! next one starts, so no two mutations ever overlap.

use std::sync::{Arc, Mutex, MutexGuard};

use seawatch_types::{DetailView, EventId, EventStatus, GeoPoint, Overlay, PageView, SidebarEntry};

use crate::error::TrackerError;
use crate::store::NewEvent;
use crate::view_model::ViewModel;

/// Cloneable, lock-guarded view model for concurrent front ends.
#[derive(Debug, Clone, Default)]
pub struct SharedViewModel {
    inner: Arc<Mutex<ViewModel>>,
}

impl SharedViewModel {
    /// Wrap a view model for sharing.
    pub fn new(view_model: ViewModel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(view_model)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ViewModel>, TrackerError> {
        self.inner
            .lock()
            .map_err(|_poisoned| TrackerError::LockPoisoned)
    }

    /// Run `f` with exclusive access to the view model.
    ///
    /// Useful for multi-step actions that must not interleave with other
    /// callers.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::LockPoisoned`] if another holder panicked,
    /// or whatever `f` returns.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut ViewModel) -> Result<T, TrackerError>,
    ) -> Result<T, TrackerError> {
        let mut guard = self.lock()?;
        f(&mut guard)
    }

    /// See [`ViewModel::create_event`].
    ///
    /// # Errors
    ///
    /// Lock poisoning or validation errors.
    pub fn create_event(
        &self,
        target_label: impl Into<String>,
        location: Option<GeoPoint>,
        radius_meters: Option<f64>,
    ) -> Result<DetailView, TrackerError> {
        self.lock()?
            .create_event(target_label, location, radius_meters)
    }

    /// See [`ViewModel::create_event_with`].
    ///
    /// # Errors
    ///
    /// Lock poisoning, duplicate id, or validation errors.
    pub fn create_event_with(&self, new: NewEvent) -> Result<DetailView, TrackerError> {
        self.lock()?.create_event_with(new)
    }

    /// See [`ViewModel::select_event`].
    ///
    /// # Errors
    ///
    /// Lock poisoning or [`TrackerError::NotFound`].
    pub fn select_event(&self, id: &EventId) -> Result<DetailView, TrackerError> {
        self.lock()?.select_event(id)
    }

    /// See [`ViewModel::apply_transition`].
    ///
    /// # Errors
    ///
    /// Lock poisoning, [`TrackerError::NotFound`], or
    /// [`TrackerError::InvalidTransition`].
    pub fn apply_transition(
        &self,
        id: &EventId,
        new_status: EventStatus,
    ) -> Result<DetailView, TrackerError> {
        self.lock()?.apply_transition(id, new_status)
    }

    /// See [`ViewModel::update_threat_score`].
    ///
    /// # Errors
    ///
    /// Lock poisoning, [`TrackerError::NotFound`], or
    /// [`TrackerError::InvalidThreatScore`].
    pub fn update_threat_score(&self, id: &EventId, score: u8) -> Result<DetailView, TrackerError> {
        self.lock()?.update_threat_score(id, score)
    }

    /// See [`ViewModel::render_sidebar`].
    ///
    /// # Errors
    ///
    /// Lock poisoning.
    pub fn render_sidebar(&self) -> Result<Vec<SidebarEntry>, TrackerError> {
        Ok(self.lock()?.render_sidebar())
    }

    /// See [`ViewModel::render_map`].
    ///
    /// # Errors
    ///
    /// Lock poisoning.
    pub fn render_map(&self) -> Result<Vec<Overlay>, TrackerError> {
        Ok(self.lock()?.render_map())
    }

    /// See [`ViewModel::render_page`].
    ///
    /// # Errors
    ///
    /// Lock poisoning.
    pub fn render_page(&self) -> Result<PageView, TrackerError> {
        Ok(self.lock()?.render_page())
    }
}

impl From<ViewModel> for SharedViewModel {
    fn from(view_model: ViewModel) -> Self {
        Self::new(view_model)
    }
}
