//! Panel projections returned to the rendering layer.
//!
//! These are read-only snapshots. The rendering layer re-requests them after
//! every mutating call; nothing here is pushed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::EventStatus;
use crate::ids::EventId;
use crate::structs::{Event, Overlay};

/// One row of the sidebar event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SidebarEntry {
    /// Event identifier.
    pub id: EventId,
    /// Human-readable subject.
    pub target_label: String,
    /// Current status.
    pub status: EventStatus,
}

impl From<&Event> for SidebarEntry {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            target_label: event.target_label.clone(),
            status: event.status,
        }
    }
}

/// Contents of the detail panel for the selected event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DetailView {
    /// Event identifier.
    pub id: EventId,
    /// Human-readable subject.
    pub target_label: String,
    /// Current status.
    pub status: EventStatus,
    /// Statuses the event may move to next. Empty for terminal statuses.
    pub allowed_next_statuses: Vec<EventStatus>,
}

/// Everything needed to draw the dashboard in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PageView {
    /// Sidebar rows in insertion order.
    pub sidebar: Vec<SidebarEntry>,
    /// Map overlays in insertion order, unlocated events omitted.
    pub overlays: Vec<Overlay>,
    /// Detail panel for the current selection, if any.
    pub detail: Option<DetailView>,
}
