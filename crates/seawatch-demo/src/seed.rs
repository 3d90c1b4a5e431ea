//! Prototype dashboard contents.
//!
//! The two events the dashboard opens with: a dark vessel already under
//! investigation with a 200 km search circle, and a designated vessel
//! waiting for triage with no fix yet.

use seawatch_core::ViewModel;
use seawatch_types::{EventId, EventStatus, GeoPoint};
use tracing::info;

use crate::error::DemoError;

/// Search radius around the dark vessel's last known position, in meters.
const DARK_VESSEL_RADIUS_M: f64 = 200_000.0;

/// Create the prototype events and return their ids in creation order.
///
/// # Errors
///
/// Returns [`DemoError::Tracker`] if the store rejects an event or a
/// transition.
pub fn seed_prototype_events(vm: &mut ViewModel) -> Result<Vec<EventId>, DemoError> {
    let dark = vm
        .create_event(
            "暗船",
            Some(GeoPoint::new(23.5, 121.0)),
            Some(DARK_VESSEL_RADIUS_M),
        )?
        .id;
    vm.apply_transition(&dark, EventStatus::Investigate)?;

    let designated = vm.create_event("指定船", None, None)?.id;

    info!(
        dark_vessel = %dark,
        designated_vessel = %designated,
        "prototype events seeded"
    );
    Ok(vec![dark, designated])
}
