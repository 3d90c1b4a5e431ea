//! Shared type definitions for the Seawatch incident tracker.
//!
//! This crate is the single source of truth for the records that cross the
//! boundary between the tracker core and the dashboard. Types defined here
//! flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- The [`EventId`] wrapper and its sequential format
//! - [`enums`] -- Status, kind, and overlay enumerations
//! - [`structs`] -- Events, coordinates, and map overlays
//! - [`views`] -- Sidebar, detail, and page projections

pub mod enums;
pub mod ids;
pub mod structs;
pub mod views;

// Re-export all public types at crate root for convenience.
pub use enums::{EventKind, EventStatus, OverlayColor, OverlayShape};
pub use ids::EventId;
pub use structs::{Event, GeoPoint, METERS_PER_NAUTICAL_MILE, Overlay, nautical_miles_to_meters};
pub use views::{DetailView, PageView, SidebarEntry};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EventId::export_all();

        let _ = crate::enums::EventStatus::export_all();
        let _ = crate::enums::EventKind::export_all();
        let _ = crate::enums::OverlayColor::export_all();
        let _ = crate::enums::OverlayShape::export_all();

        let _ = crate::structs::GeoPoint::export_all();
        let _ = crate::structs::Event::export_all();
        let _ = crate::structs::Overlay::export_all();

        let _ = crate::views::SidebarEntry::export_all();
        let _ = crate::views::DetailView::export_all();
        let _ = crate::views::PageView::export_all();
    }
}
