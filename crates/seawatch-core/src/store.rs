//! The event store: authoritative in-memory registry of incidents.
//!
//! [`EventStore`] owns every [`Event`]. Records are indexed by id for lookup
//! and kept in a separate insertion-order list for display. Vessel events
//! that carry an MMSI are also indexed by it, so a repeat sighting of the
//! same vessel resolves to the existing event. Nothing is ever removed, so
//! the list and the indexes always agree.
//!
//! Status changes go through [`state_machine::transition`] and threat
//! scores through [`ThreatPolicy::apply`]; callers never get a mutable
//! reference to a stored event.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::Utc;
use seawatch_types::{Event, EventId, EventKind, EventStatus, GeoPoint};
use tracing::info;

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::state_machine;
use crate::threat::ThreatPolicy;

/// Input for [`EventStore::create_with`].
///
/// Only the label is required. Leaving `id` unset lets the store assign the
/// next sequential id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    /// Explicit identifier, or `None` for a generated one.
    pub id: Option<EventId>,
    /// What produced the event.
    pub kind: EventKind,
    /// Vessel MMSI, if the transponder identity is known.
    pub mmsi: Option<String>,
    /// Human-readable subject.
    pub target_label: String,
    /// Position, if known.
    pub location: Option<GeoPoint>,
    /// Uncertainty / alert radius in meters.
    pub radius_meters: Option<f64>,
    /// Initial threat score.
    pub threat_score: Option<u8>,
}

impl NewEvent {
    /// Start describing a vessel event with the given label.
    pub fn new(target_label: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: EventKind::default(),
            mmsi: None,
            target_label: target_label.into(),
            location: None,
            radius_meters: None,
            threat_score: None,
        }
    }

    /// Use an explicit identifier instead of a generated one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Tie the event to a vessel's MMSI.
    #[must_use]
    pub fn with_mmsi(mut self, mmsi: impl Into<String>) -> Self {
        self.mmsi = Some(mmsi.into());
        self
    }

    /// Place the event on the map.
    #[must_use]
    pub const fn at(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach an uncertainty / alert radius in meters.
    #[must_use]
    pub const fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = Some(radius_meters);
        self
    }

    /// Attach an initial threat score.
    #[must_use]
    pub const fn with_threat_score(mut self, score: u8) -> Self {
        self.threat_score = Some(score);
        self
    }
}

/// In-memory mapping from event id to [`Event`], insertion order preserved.
#[derive(Debug, Clone)]
pub struct EventStore {
    /// All events indexed by identifier.
    events: BTreeMap<EventId, Event>,
    /// Identifiers in insertion order.
    order: Vec<EventId>,
    /// Vessel MMSI to the event tracking it.
    by_mmsi: BTreeMap<String, EventId>,
    /// Next candidate sequence number for generated ids.
    next_seq: u64,
    /// Prefix of generated ids.
    id_prefix: String,
    /// Zero-padding width of generated ids.
    id_width: usize,
    /// Threat alerting rules.
    threat: ThreatPolicy,
}

impl EventStore {
    /// Create an empty store with default id format and threat policy.
    pub fn new() -> Self {
        Self::from_config(&TrackerConfig::default())
    }

    /// Create an empty store using the `store` and `threat` config sections.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            events: BTreeMap::new(),
            order: Vec::new(),
            by_mmsi: BTreeMap::new(),
            next_seq: 1,
            id_prefix: config.store.id_prefix.clone(),
            id_width: config.store.id_width,
            threat: ThreatPolicy::from_config(&config.threat),
        }
    }

    // -------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------

    /// Create a vessel event with a generated id and status `TRIAGE`.
    ///
    /// # Errors
    ///
    /// Returns a validation error ([`TrackerError::InvalidLabel`],
    /// [`TrackerError::InvalidLocation`], [`TrackerError::InvalidRadius`])
    /// if an input is out of range. Nothing is inserted on error.
    pub fn create(
        &mut self,
        target_label: impl Into<String>,
        location: Option<GeoPoint>,
        radius_meters: Option<f64>,
    ) -> Result<&Event, TrackerError> {
        self.create_with(NewEvent {
            location,
            radius_meters,
            ..NewEvent::new(target_label)
        })
    }

    /// Create an event from a full description.
    ///
    /// Inputs are validated before an id is allocated, so a rejected call
    /// does not consume a sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidId`] for a blank explicit id,
    /// [`TrackerError::DuplicateId`] if an explicit id is taken,
    /// [`TrackerError::InvalidMmsi`] or [`TrackerError::DuplicateMmsi`] for
    /// a bad MMSI, or a validation error as for [`Self::create`] (plus
    /// [`TrackerError::InvalidThreatScore`]).
    pub fn create_with(&mut self, new: NewEvent) -> Result<&Event, TrackerError> {
        let target_label = validate_label(&new.target_label)?;
        if let Some(location) = new.location {
            validate_location(location)?;
        }
        if let Some(radius) = new.radius_meters {
            validate_radius(radius)?;
        }
        if let Some(score) = new.threat_score {
            ThreatPolicy::validate(score)?;
        }
        let mmsi = self.unclaimed_mmsi(new.mmsi.as_deref())?;

        let id = match new.id {
            Some(id) if id.is_blank() => return Err(TrackerError::InvalidId),
            Some(id) if self.contains(&id) => return Err(TrackerError::DuplicateId(id)),
            Some(id) => id,
            None => self.allocate_id()?,
        };

        let now = Utc::now();
        let event = Event {
            id: id.clone(),
            kind: new.kind,
            mmsi,
            target_label,
            status: EventStatus::Triage,
            location: new.location,
            radius_meters: new.radius_meters,
            threat_score: new.threat_score,
            alert_at: self.threat.alert_time(now, new.threat_score),
            created_at: now,
            updated_at: now,
        };

        match self.events.entry(id) {
            Entry::Occupied(slot) => Err(TrackerError::DuplicateId(slot.key().clone())),
            Entry::Vacant(slot) => {
                self.order.push(slot.key().clone());
                if let Some(mmsi) = &event.mmsi {
                    self.by_mmsi.insert(mmsi.clone(), slot.key().clone());
                }
                let event = slot.insert(event);
                info!(
                    event_id = %event.id,
                    kind = ?event.kind,
                    mmsi = ?event.mmsi,
                    located = event.location.is_some(),
                    alerting = event.alert_active(),
                    "event created"
                );
                Ok(event)
            }
        }
    }

    /// Take the next sequential id not already claimed explicitly.
    fn allocate_id(&mut self) -> Result<EventId, TrackerError> {
        loop {
            let candidate = EventId::sequential(&self.id_prefix, self.next_seq, self.id_width);
            self.next_seq = self
                .next_seq
                .checked_add(1)
                .ok_or(TrackerError::SequenceExhausted)?;
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }

    /// Normalize an MMSI and check no other event tracks it.
    fn unclaimed_mmsi(&self, raw: Option<&str>) -> Result<Option<String>, TrackerError> {
        let Some(raw) = raw else { return Ok(None) };
        let mmsi = raw.trim();
        if mmsi.is_empty() {
            return Err(TrackerError::InvalidMmsi);
        }
        if let Some(existing) = self.by_mmsi.get(mmsi) {
            return Err(TrackerError::DuplicateMmsi {
                mmsi: mmsi.to_owned(),
                existing: existing.clone(),
            });
        }
        Ok(Some(mmsi.to_owned()))
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Look up an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if no such event exists.
    pub fn get(&self, id: &EventId) -> Result<&Event, TrackerError> {
        self.events
            .get(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))
    }

    /// The event tracking the vessel with this MMSI, if any.
    pub fn find_by_mmsi(&self, mmsi: &str) -> Option<&Event> {
        let id = self.by_mmsi.get(mmsi.trim())?;
        self.events.get(id)
    }

    /// Iterate over all events in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Event> + '_ {
        self.order.iter().filter_map(|id| self.events.get(id))
    }

    /// Whether an event with this id exists.
    pub fn contains(&self, id: &EventId) -> bool {
        self.events.contains_key(id)
    }

    /// Number of events in the store.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The threat policy applied to new and updated scores.
    pub const fn threat_policy(&self) -> &ThreatPolicy {
        &self.threat
    }

    // -------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------

    /// Move an event to `new_status` through the state machine.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if the id is unknown, or
    /// [`TrackerError::InvalidTransition`] if the table forbids the move.
    pub fn update_status(
        &mut self,
        id: &EventId,
        new_status: EventStatus,
    ) -> Result<&Event, TrackerError> {
        let event = self
            .events
            .get_mut(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        state_machine::transition(event, new_status)?;
        Ok(event)
    }

    /// Record a new threat score, stamping or clearing the alert.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if the id is unknown, or
    /// [`TrackerError::InvalidThreatScore`] for scores above 100.
    pub fn update_threat_score(&mut self, id: &EventId, score: u8) -> Result<&Event, TrackerError> {
        let event = self
            .events
            .get_mut(id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        self.threat.apply(event, score)?;
        Ok(event)
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_label(label: &str) -> Result<String, TrackerError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::InvalidLabel);
    }
    Ok(trimmed.to_owned())
}

fn validate_location(location: GeoPoint) -> Result<(), TrackerError> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(TrackerError::InvalidLocation {
            lat: location.lat,
            lon: location.lon,
        })
    }
}

fn validate_radius(radius: f64) -> Result<(), TrackerError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(TrackerError::InvalidRadius(radius))
    }
}
