//! Event identifiers.
//!
//! Generated identifiers take the form `EVT-001`: a prefix, a dash, and a
//! zero-padded sequence number. Callers importing events from another
//! source may also supply their own identifier strings, which is why the
//! wrapper holds a [`String`] rather than the bare counter.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique, stable identifier for an event in the store.
///
/// Ordering and hashing match the inner string so a map keyed by
/// [`EventId`] can be queried with a plain `&str`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct EventId(String);

impl EventId {
    /// Prefix used by the default sequential generator.
    pub const DEFAULT_PREFIX: &'static str = "EVT";

    /// Minimum digit count of the sequence number in generated ids.
    pub const DEFAULT_WIDTH: usize = 3;

    /// Wrap an arbitrary identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build a sequential identifier such as `EVT-007`.
    ///
    /// Sequence numbers wider than `width` are rendered in full, so
    /// `sequential("EVT", 1234, 3)` yields `EVT-1234`.
    pub fn sequential(prefix: &str, seq: u64, width: usize) -> Self {
        Self(format!("{prefix}-{seq:0width$}"))
    }

    /// Whether the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EventId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}
