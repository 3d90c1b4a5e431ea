//! Core entity structs: [`GeoPoint`], [`Event`], and the map [`Overlay`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EventKind, EventStatus, OverlayColor, OverlayShape};
use crate::ids::EventId;

/// Meters in one international nautical mile.
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Convert a distance in nautical miles to meters.
pub fn nautical_miles_to_meters(nautical_miles: f64) -> f64 {
    nautical_miles * METERS_PER_NAUTICAL_MILE
}

// ---------------------------------------------------------------------------
// GeoPoint
// ---------------------------------------------------------------------------

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeoPoint {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point. No range check is performed; see [`Self::is_valid`].
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both coordinates are finite and within their ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl core::fmt::Display for GeoPoint {
    /// Formats as `23.500°N, 121.000°E`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon < 0.0 { 'W' } else { 'E' };
        write!(f, "{:.3}°{ns}, {:.3}°{ew}", self.lat.abs(), self.lon.abs())
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A trackable incident, such as an unidentified vessel sighting.
///
/// Events are owned by the store. Status changes go through the state
/// machine; the identifier never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Unique, stable identifier.
    pub id: EventId,
    /// What produced the event.
    pub kind: EventKind,
    /// Maritime Mobile Service Identity of the vessel, if known. Repeat
    /// sightings of the same vessel are matched on this value.
    pub mmsi: Option<String>,
    /// Human-readable subject, e.g. "暗船" (dark vessel).
    pub target_label: String,
    /// Current lifecycle status.
    pub status: EventStatus,
    /// Position, if the event has been located.
    pub location: Option<GeoPoint>,
    /// Radius of the uncertainty / alert circle in meters.
    pub radius_meters: Option<f64>,
    /// Threat score from 0 to 100, if assessed.
    pub threat_score: Option<u8>,
    /// When the threat alert fires. Present only while the score is at or
    /// above the alert threshold.
    pub alert_at: Option<DateTime<Utc>>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether a threat alert is attached to this event.
    pub const fn alert_active(&self) -> bool {
        self.alert_at.is_some()
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// A map-renderable shape derived from an event's location and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Overlay {
    /// The event this overlay represents.
    pub id: EventId,
    /// Center of the shape.
    pub center: GeoPoint,
    /// Circle radius in meters; `None` renders as a point marker.
    pub radius_meters: Option<f64>,
    /// Fill color.
    pub color: OverlayColor,
}

impl Overlay {
    /// The geometry the map widget should draw.
    pub const fn shape(&self) -> OverlayShape {
        if self.radius_meters.is_some() {
            OverlayShape::Circle
        } else {
            OverlayShape::Marker
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_ranges() {
        assert!(GeoPoint::new(23.5, 121.0).is_valid());
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn geo_point_display_uses_hemispheres() {
        let north_east = GeoPoint::new(23.5, 121.0);
        assert_eq!(north_east.to_string(), "23.500°N, 121.000°E");
        let south_west = GeoPoint::new(-8.25, -35.125);
        assert_eq!(south_west.to_string(), "8.250°S, 35.125°W");
    }

    #[test]
    fn nautical_mile_conversion() {
        let meters = nautical_miles_to_meters(250.0);
        assert!((meters - 463_000.0).abs() < 1e-6);
    }

    #[test]
    fn overlay_shape_follows_radius() {
        let circle = Overlay {
            id: EventId::from("EVT-001"),
            center: GeoPoint::new(23.5, 121.0),
            radius_meters: Some(200_000.0),
            color: OverlayColor::Red,
        };
        assert_eq!(circle.shape(), OverlayShape::Circle);

        let marker = Overlay {
            radius_meters: None,
            ..circle
        };
        assert_eq!(marker.shape(), OverlayShape::Marker);
    }
}
