//! Threat scoring and alert stamping.
//!
//! An event whose threat score reaches the alert threshold carries an
//! `alert_at` timestamp of `created_at + alert_delay`. The timestamp is
//! kept while the score stays at or above the threshold and cleared when
//! it drops below.

use chrono::{DateTime, Duration, Utc};
use seawatch_types::Event;
use tracing::debug;

use crate::config::ThreatConfig;
use crate::error::TrackerError;

/// Highest valid threat score.
pub const MAX_THREAT_SCORE: u8 = 100;

/// Alerting rules applied to threat scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatPolicy {
    /// Scores at or above this value raise an alert.
    threshold: u8,
    /// Offset from creation time at which the alert is stamped.
    alert_delay: Duration,
}

impl ThreatPolicy {
    /// Create a policy from an explicit threshold and delay.
    pub const fn new(threshold: u8, alert_delay: Duration) -> Self {
        Self {
            threshold,
            alert_delay,
        }
    }

    /// Build the policy described by the `threat` config section.
    pub fn from_config(config: &ThreatConfig) -> Self {
        Self::new(config.alert_threshold, config.alert_delay())
    }

    /// The alert threshold.
    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Whether `score` is high enough to alert.
    pub const fn is_alerting(&self, score: u8) -> bool {
        score >= self.threshold
    }

    /// Reject scores above [`MAX_THREAT_SCORE`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidThreatScore`] for out-of-range scores.
    pub fn validate(score: u8) -> Result<u8, TrackerError> {
        if score > MAX_THREAT_SCORE {
            return Err(TrackerError::InvalidThreatScore(score));
        }
        Ok(score)
    }

    /// The alert timestamp for an event created at `created_at` with
    /// `score`, or `None` if the score is below the threshold.
    pub fn alert_time(
        &self,
        created_at: DateTime<Utc>,
        score: Option<u8>,
    ) -> Option<DateTime<Utc>> {
        let score = score?;
        if !self.is_alerting(score) {
            return None;
        }
        created_at.checked_add_signed(self.alert_delay)
    }

    /// Record a new threat score on `event`, stamping or clearing its alert.
    ///
    /// An alert already in place is kept as long as the score stays at or
    /// above the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidThreatScore`] for scores above 100.
    /// The event is not modified on error.
    pub fn apply(&self, event: &mut Event, score: u8) -> Result<(), TrackerError> {
        let score = Self::validate(score)?;
        let was_alerting = event.alert_at.is_some();

        event.threat_score = Some(score);
        if !self.is_alerting(score) {
            event.alert_at = None;
        } else if !was_alerting {
            event.alert_at = self.alert_time(event.created_at, Some(score));
        }
        event.updated_at = Utc::now();

        debug!(
            event_id = %event.id,
            score,
            was_alerting,
            alerting = event.alert_at.is_some(),
            "threat score updated"
        );
        Ok(())
    }
}

impl Default for ThreatPolicy {
    fn default() -> Self {
        Self::from_config(&ThreatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use seawatch_types::{EventId, EventKind, EventStatus};

    use super::*;

    fn make_event() -> Event {
        let now = Utc::now();
        Event {
            id: EventId::from("EVT-003"),
            kind: EventKind::Vessel,
            mmsi: None,
            target_label: String::from("未知船舶"),
            status: EventStatus::Investigate,
            location: None,
            radius_meters: None,
            threat_score: None,
            alert_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn default_threshold_is_70() {
        let policy = ThreatPolicy::default();
        assert_eq!(policy.threshold(), 70);
        assert!(policy.is_alerting(70));
        assert!(!policy.is_alerting(69));
    }

    #[test]
    fn crossing_threshold_stamps_alert() {
        let policy = ThreatPolicy::default();
        let mut event = make_event();
        assert!(policy.apply(&mut event, 85).is_ok());
        assert_eq!(event.threat_score, Some(85));
        let expected = event.created_at + Duration::minutes(5);
        assert_eq!(event.alert_at, Some(expected));
    }

    #[test]
    fn dropping_below_threshold_clears_alert() {
        let policy = ThreatPolicy::default();
        let mut event = make_event();
        assert!(policy.apply(&mut event, 85).is_ok());
        assert!(policy.apply(&mut event, 58).is_ok());
        assert_eq!(event.threat_score, Some(58));
        assert!(event.alert_at.is_none());
    }

    #[test]
    fn existing_alert_is_kept_while_above_threshold() {
        let policy = ThreatPolicy::default();
        let mut event = make_event();
        let earlier = event.created_at - Duration::hours(1);
        event.alert_at = Some(earlier);
        assert!(policy.apply(&mut event, 95).is_ok());
        assert_eq!(event.alert_at, Some(earlier));
    }

    #[test]
    fn score_above_100_rejected_without_mutation() {
        let policy = ThreatPolicy::default();
        let mut event = make_event();
        let snapshot = event.clone();
        assert_eq!(
            policy.apply(&mut event, 101),
            Err(TrackerError::InvalidThreatScore(101))
        );
        assert_eq!(event, snapshot);
    }

    #[test]
    fn alert_time_for_new_events() {
        let policy = ThreatPolicy::new(50, Duration::zero());
        let now = Utc::now();
        assert_eq!(policy.alert_time(now, Some(50)), Some(now));
        assert_eq!(policy.alert_time(now, Some(49)), None);
        assert_eq!(policy.alert_time(now, None), None);
    }
}
