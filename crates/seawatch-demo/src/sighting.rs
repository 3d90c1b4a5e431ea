//! Simulated vessel sightings.
//!
//! Stands in for a live AIS/RF feed. Sightings are drawn from a seeded
//! generator over the waters around Taiwan; those whose threat score meets
//! the alert threshold become vessel events in the tracker. A vessel that
//! is already tracked is rescored instead of raised again.

use rand::Rng;
use seawatch_core::{NewEvent, ViewModel};
use seawatch_types::{Event, EventId, EventKind, GeoPoint};
use tracing::{debug, info};

use crate::error::DemoError;

/// Latitude band of the simulated patrol area.
const LAT_RANGE: (f64, f64) = (22.0, 26.0);

/// Longitude band of the simulated patrol area.
const LON_RANGE: (f64, f64) = (119.0, 123.0);

/// Alert radius attached to events raised from sightings, in nautical miles.
const SIGHTING_RADIUS_NM: f64 = 5.0;

/// Vessel names reported by the simulated feed.
const VESSEL_NAMES: &[&str] = &[
    "未知船舶",
    "漁船阿勇號",
    "貨輪長榮號",
    "油輪海星號",
    "快艇",
    "漁船金滿號",
    "拖船",
    "遊艇",
];

/// One observation from the simulated feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    /// Maritime Mobile Service Identity, nine digits.
    pub mmsi: String,
    /// Reported vessel name.
    pub vessel_name: String,
    /// Observed position.
    pub location: GeoPoint,
    /// Risk rating, 0..=100.
    pub threat_score: u8,
}

/// Draw a single sighting.
pub fn generate_sighting(rng: &mut impl Rng) -> Sighting {
    let mmsi: u32 = rng.random_range(100_000..1_000_000);
    let idx = rng.random_range(0..VESSEL_NAMES.len());
    let vessel_name = VESSEL_NAMES.get(idx).copied().unwrap_or("未知船舶");

    Sighting {
        mmsi: format!("416{mmsi}"),
        vessel_name: String::from(vessel_name),
        location: GeoPoint::new(
            rng.random_range(LAT_RANGE.0..LAT_RANGE.1),
            rng.random_range(LON_RANGE.0..LON_RANGE.1),
        ),
        threat_score: rng.random_range(0..=100),
    }
}

/// Draw `count` sightings.
pub fn generate_sightings(rng: &mut impl Rng, count: u32) -> Vec<Sighting> {
    (0..count).map(|_| generate_sighting(rng)).collect()
}

/// What [`ingest`] did with a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Events created for vessels seen for the first time, in feed order.
    pub raised: Vec<EventId>,
    /// Tracked events whose threat score was refreshed, in feed order.
    pub rescored: Vec<EventId>,
}

/// Feed sightings into the tracker.
///
/// A sighting of a vessel whose MMSI is already tracked rescores that
/// event, which stamps or clears its alert. Any other sighting raises a
/// new event if it alerts under the store's threat policy.
///
/// # Errors
///
/// Returns [`DemoError::Tracker`] if the store rejects an event or score.
pub fn ingest(vm: &mut ViewModel, sightings: &[Sighting]) -> Result<IngestReport, DemoError> {
    let policy = *vm.store().threat_policy();
    let radius = seawatch_types::nautical_miles_to_meters(SIGHTING_RADIUS_NM);
    let mut report = IngestReport::default();

    for sighting in sightings {
        let tracked = vm.store().find_by_mmsi(&sighting.mmsi);
        if let Some(id) = tracked.map(|event| event.id.clone()) {
            vm.update_threat_score(&id, sighting.threat_score)?;
            let alerting = vm.store().get(&id).is_ok_and(Event::alert_active);
            info!(
                event_id = %id,
                mmsi = %sighting.mmsi,
                score = sighting.threat_score,
                alerting,
                "tracked vessel rescored"
            );
            report.rescored.push(id);
            continue;
        }

        if !policy.is_alerting(sighting.threat_score) {
            debug!(
                mmsi = %sighting.mmsi,
                score = sighting.threat_score,
                "sighting below threshold"
            );
            continue;
        }

        let view = vm.create_event_with(
            NewEvent::new(sighting.vessel_name.as_str())
                .with_kind(EventKind::Vessel)
                .with_mmsi(sighting.mmsi.as_str())
                .at(sighting.location)
                .with_radius(radius)
                .with_threat_score(sighting.threat_score),
        )?;
        info!(
            event_id = %view.id,
            mmsi = %sighting.mmsi,
            score = sighting.threat_score,
            position = %sighting.location,
            "sighting raised alert"
        );
        report.raised.push(view.id);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use seawatch_types::EventStatus;

    use super::*;

    fn sighting(mmsi: &str, score: u8) -> Sighting {
        Sighting {
            mmsi: String::from(mmsi),
            vessel_name: String::from("未知船舶"),
            location: GeoPoint::new(24.0, 119.5),
            threat_score: score,
        }
    }

    #[test]
    fn sightings_stay_in_patrol_area() {
        let mut rng = SmallRng::seed_from_u64(42);
        for s in generate_sightings(&mut rng, 200) {
            assert!((LAT_RANGE.0..LAT_RANGE.1).contains(&s.location.lat));
            assert!((LON_RANGE.0..LON_RANGE.1).contains(&s.location.lon));
            assert!(s.threat_score <= 100);
            assert_eq!(s.mmsi.len(), 9);
            assert!(s.mmsi.starts_with("416"));
        }
    }

    #[test]
    fn same_seed_same_feed() {
        let a = generate_sightings(&mut SmallRng::seed_from_u64(7), 20);
        let b = generate_sightings(&mut SmallRng::seed_from_u64(7), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn only_alerting_sightings_become_events() {
        let mut vm = ViewModel::default();
        let feed = [
            sighting("416000001", 85),
            sighting("416000002", 58),
            sighting("416000003", 70),
            sighting("416000004", 69),
        ];

        let report = ingest(&mut vm, &feed).unwrap_or_default();
        assert_eq!(report.raised.len(), 2);
        assert!(report.rescored.is_empty());
        assert_eq!(vm.store().len(), 2);

        for id in &report.raised {
            let event = vm.store().get(id).ok();
            assert_eq!(event.map(|e| e.status), Some(EventStatus::Triage));
            assert!(event.is_some_and(Event::alert_active));
            assert_eq!(event.and_then(|e| e.radius_meters), Some(9260.0));
        }
    }

    #[test]
    fn raised_events_carry_the_mmsi() {
        let mut vm = ViewModel::default();
        let feed = [sighting("416123456", 90)];
        let report = ingest(&mut vm, &feed).unwrap_or_default();

        let found = vm.store().find_by_mmsi("416123456");
        assert_eq!(found.map(|e| &e.id), report.raised.first());
        let label = found.map(|e| e.target_label.as_str());
        assert_eq!(label, Some("未知船舶"));
    }

    #[test]
    fn repeat_sighting_rescores_tracked_vessel() {
        let mut vm = ViewModel::default();
        let feed = [sighting("416123456", 85)];
        let first = ingest(&mut vm, &feed).unwrap_or_default();
        let again = ingest(&mut vm, &feed).unwrap_or_default();

        assert_eq!(first.raised.len(), 1);
        assert!(again.raised.is_empty());
        assert_eq!(again.rescored, first.raised);
        assert_eq!(vm.store().len(), 1);
    }

    #[test]
    fn low_repeat_sighting_clears_the_alert() {
        let mut vm = ViewModel::default();
        let feed = [sighting("416123456", 85), sighting("416123456", 40)];
        let report = ingest(&mut vm, &feed).unwrap_or_default();

        assert_eq!(report.raised.len(), 1);
        assert_eq!(report.rescored, report.raised);

        let event = vm.store().find_by_mmsi("416123456");
        assert_eq!(event.and_then(|e| e.threat_score), Some(40));
        assert!(!event.is_some_and(Event::alert_active));
    }

    #[test]
    fn untracked_low_sighting_raises_nothing() {
        let mut vm = ViewModel::default();
        let feed = [sighting("416123456", 40), sighting("416123456", 90)];
        let report = ingest(&mut vm, &feed).unwrap_or_default();

        assert!(report.rescored.is_empty());
        assert_eq!(report.raised.len(), 1);
        assert_eq!(vm.store().len(), 1);
    }

    #[test]
    fn raised_events_land_on_the_map() {
        let mut vm = ViewModel::default();
        let feed = [sighting("416123456", 95)];
        let report = ingest(&mut vm, &feed).unwrap_or_default();
        let overlays = vm.render_map();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays.first().map(|o| &o.id), report.raised.first());
    }
}
