//! Event lifecycle state machine.
//!
//! The transition table:
//!
//! | From | To |
//! |------|----|
//! | `TRIAGE` | `INVESTIGATE`, `DISMISSED` |
//! | `INVESTIGATE` | `RESOLVED`, `DISMISSED` |
//! | `RESOLVED` | (terminal) |
//! | `DISMISSED` | (terminal) |
//!
//! Anything else, including a transition to the current status, is
//! rejected with [`TrackerError::InvalidTransition`] and leaves the event
//! untouched.

use chrono::Utc;
use seawatch_types::{Event, EventStatus};
use tracing::{info, warn};

use crate::error::TrackerError;

const FROM_TRIAGE: &[EventStatus] = &[EventStatus::Investigate, EventStatus::Dismissed];
const FROM_INVESTIGATE: &[EventStatus] = &[EventStatus::Resolved, EventStatus::Dismissed];
const TERMINAL: &[EventStatus] = &[];

/// Statuses reachable in one step from `status`, in table order.
pub const fn allowed_next(status: EventStatus) -> &'static [EventStatus] {
    match status {
        EventStatus::Triage => FROM_TRIAGE,
        EventStatus::Investigate => FROM_INVESTIGATE,
        EventStatus::Resolved | EventStatus::Dismissed => TERMINAL,
    }
}

/// Whether the table permits moving from `from` to `to`.
pub fn can_transition(from: EventStatus, to: EventStatus) -> bool {
    allowed_next(from).contains(&to)
}

/// Move `event` to `new_status` if the table allows it.
///
/// On success the status and `updated_at` are written in place. On failure
/// the event is not modified.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidTransition`] naming the current and
/// requested status when the move is not in the table.
pub fn transition(event: &mut Event, new_status: EventStatus) -> Result<(), TrackerError> {
    let current = event.status;
    if !can_transition(current, new_status) {
        warn!(
            event_id = %event.id,
            from = %current,
            to = %new_status,
            "rejected status transition"
        );
        return Err(TrackerError::InvalidTransition {
            id: event.id.clone(),
            current,
            requested: new_status,
        });
    }

    event.status = new_status;
    event.updated_at = Utc::now();
    info!(event_id = %event.id, from = %current, to = %new_status, "event status changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use seawatch_types::{EventId, EventKind};

    use super::*;

    fn make_event(status: EventStatus) -> Event {
        let now = Utc::now();
        Event {
            id: EventId::from("EVT-001"),
            kind: EventKind::Vessel,
            mmsi: None,
            target_label: String::from("暗船"),
            status,
            location: None,
            radius_meters: None,
            threat_score: None,
            alert_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn table_matches_lifecycle() {
        use EventStatus::{Dismissed, Investigate, Resolved, Triage};

        let allowed = [
            (Triage, Investigate),
            (Triage, Dismissed),
            (Investigate, Resolved),
            (Investigate, Dismissed),
        ];

        for from in EventStatus::ALL {
            for to in EventStatus::ALL {
                assert_eq!(
                    can_transition(from, to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn terminal_statuses_have_no_successors() {
        assert!(allowed_next(EventStatus::Resolved).is_empty());
        assert!(allowed_next(EventStatus::Dismissed).is_empty());
    }

    #[test]
    fn successful_transition_mutates_in_place() {
        let mut event = make_event(EventStatus::Triage);
        let before = event.updated_at;
        assert!(transition(&mut event, EventStatus::Investigate).is_ok());
        assert_eq!(event.status, EventStatus::Investigate);
        assert!(event.updated_at >= before);
    }

    #[test]
    fn rejected_transition_leaves_event_untouched() {
        let mut event = make_event(EventStatus::Triage);
        let snapshot = event.clone();

        let result = transition(&mut event, EventStatus::Resolved);
        assert_eq!(
            result,
            Err(TrackerError::InvalidTransition {
                id: EventId::from("EVT-001"),
                current: EventStatus::Triage,
                requested: EventStatus::Resolved,
            })
        );
        assert_eq!(event, snapshot);
    }

    #[test]
    fn self_transition_is_rejected() {
        let mut event = make_event(EventStatus::Investigate);
        assert!(transition(&mut event, EventStatus::Investigate).is_err());
    }

    #[test]
    fn resolved_is_only_reachable_through_investigate() {
        // Walk every path through the table starting at TRIAGE.
        let mut stack = vec![vec![EventStatus::Triage]];
        let mut resolved_paths = 0_u32;

        while let Some(path) = stack.pop() {
            let Some(&last) = path.last() else { continue };
            if last == EventStatus::Resolved {
                resolved_paths += 1;
                assert!(path.contains(&EventStatus::Investigate), "{path:?}");
            }
            for &next in allowed_next(last) {
                let mut extended = path.clone();
                extended.push(next);
                stack.push(extended);
            }
        }

        assert_eq!(resolved_paths, 1);
    }
}
