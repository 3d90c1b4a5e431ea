//! Error types for the `seawatch-core` crate.
//!
//! All fallible tracker operations return [`TrackerError`]. Every variant is
//! local and non-fatal: a failed call leaves the store exactly as it was.

use seawatch_types::{EventId, EventStatus};

/// Errors that can occur during store, state machine, or view operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    /// No event with this identifier exists.
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// The requested status change is not in the transition table.
    #[error("event {id} cannot move from {current} to {requested}")]
    InvalidTransition {
        /// The event that was asked to transition.
        id: EventId,
        /// Its status at the time of the request.
        current: EventStatus,
        /// The status that was requested.
        requested: EventStatus,
    },

    /// An explicitly supplied identifier is already in use.
    #[error("duplicate event id: {0}")]
    DuplicateId(EventId),

    /// An explicitly supplied identifier is empty or whitespace.
    #[error("event id must not be empty")]
    InvalidId,

    /// The MMSI is empty or whitespace.
    #[error("MMSI must not be empty")]
    InvalidMmsi,

    /// Another event already tracks this MMSI.
    #[error("MMSI {mmsi} is already tracked by event {existing}")]
    DuplicateMmsi {
        /// The rejected MMSI.
        mmsi: String,
        /// The event that already carries it.
        existing: EventId,
    },

    /// The target label is empty or whitespace.
    #[error("target label must not be empty")]
    InvalidLabel,

    /// The location is outside the valid latitude/longitude ranges.
    #[error("invalid location: lat {lat}, lon {lon}")]
    InvalidLocation {
        /// The rejected latitude.
        lat: f64,
        /// The rejected longitude.
        lon: f64,
    },

    /// The radius is negative or not finite.
    #[error("radius must be a non-negative finite number of meters, got {0}")]
    InvalidRadius(f64),

    /// The threat score is above 100.
    #[error("threat score must be between 0 and 100, got {0}")]
    InvalidThreatScore(u8),

    /// Arithmetic overflow while advancing the id sequence.
    #[error("event id sequence exhausted")]
    SequenceExhausted,

    /// A thread panicked while holding the shared view model lock.
    #[error("shared view model lock poisoned")]
    LockPoisoned,
}
