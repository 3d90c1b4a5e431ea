//! Map annotation: events to overlay shapes.
//!
//! A pure, order-preserving transform. Events without a location produce
//! no overlay; everything else yields exactly one, colored by status.

use seawatch_types::{Event, EventStatus, Overlay, OverlayColor};

/// The overlay color for an event in `status`.
pub const fn status_color(status: EventStatus) -> OverlayColor {
    match status {
        EventStatus::Triage => OverlayColor::Amber,
        EventStatus::Investigate => OverlayColor::Red,
        EventStatus::Resolved => OverlayColor::Green,
        EventStatus::Dismissed => OverlayColor::Gray,
    }
}

/// The overlay for a single event, or `None` if it has no location.
pub fn overlay_for(event: &Event) -> Option<Overlay> {
    let center = event.location?;
    Some(Overlay {
        id: event.id.clone(),
        center,
        radius_meters: event.radius_meters,
        color: status_color(event.status),
    })
}

/// Derive overlays for `events`, in input order, skipping unlocated ones.
pub fn annotate<'a, I>(events: I) -> Vec<Overlay>
where
    I: IntoIterator<Item = &'a Event>,
{
    events.into_iter().filter_map(overlay_for).collect()
}
