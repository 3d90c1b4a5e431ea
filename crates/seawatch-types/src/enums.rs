//! Enumeration types for the Seawatch incident tracker.
//!
//! Wire names are fixed: statuses serialize in `SCREAMING_SNAKE_CASE`
//! (`"TRIAGE"`), every other enum in lowercase.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Event status
// ---------------------------------------------------------------------------

/// Lifecycle status of an event.
///
/// New events start in [`EventStatus::Triage`]. [`EventStatus::Resolved`]
/// and [`EventStatus::Dismissed`] are terminal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum EventStatus {
    /// Awaiting an operator decision on whether to investigate.
    #[default]
    Triage,
    /// Under active investigation.
    Investigate,
    /// Investigation concluded with an outcome.
    Resolved,
    /// Closed without further action.
    Dismissed,
}

impl EventStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Triage,
        Self::Investigate,
        Self::Resolved,
        Self::Dismissed,
    ];

    /// Whether no further transitions are possible from this status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Dismissed)
    }

    /// The wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triage => "TRIAGE",
            Self::Investigate => "INVESTIGATE",
            Self::Resolved => "RESOLVED",
            Self::Dismissed => "DISMISSED",
        }
    }
}

impl core::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Event kind
// ---------------------------------------------------------------------------

/// What produced the event.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// A vessel of interest (dark vessel, designated vessel).
    #[default]
    Vessel,
    /// An RF emission with no matching AIS track.
    Rf,
    /// An area-of-interest monitoring window.
    Area,
}

// ---------------------------------------------------------------------------
// Map overlays
// ---------------------------------------------------------------------------

/// Fill color of a map overlay, derived from event status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum OverlayColor {
    /// Pending triage.
    Amber,
    /// Active investigation.
    Red,
    /// Resolved.
    Green,
    /// Dismissed.
    Gray,
}

impl OverlayColor {
    /// CSS hex value handed to the map widget.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Amber => "#f59e0b",
            Self::Red => "#ef4444",
            Self::Green => "#22c55e",
            Self::Gray => "#6b7280",
        }
    }
}

/// Geometry of a map overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum OverlayShape {
    /// A filled circle with a radius in meters.
    Circle,
    /// A point marker with no extent.
    Marker,
}
