//! Incident tracking core for the Seawatch dashboard.
//!
//! This crate holds the state behind the three dashboard panels: the sidebar
//! event list, the map, and the detail panel. It has no rendering, network,
//! or persistence of its own; a UI layer drives it through [`ViewModel`] and
//! draws whatever comes back.
//!
//! # Modules
//!
//! - [`store`] -- [`EventStore`], the in-memory registry that owns every
//!   event, with sequential `EVT-NNN` id generation.
//! - [`state_machine`] -- The status transition table and the only code
//!   path that changes an event's status.
//! - [`threat`] -- [`ThreatPolicy`]: threat scores and alert stamping.
//! - [`annotator`] -- Pure event-to-overlay transform for the map panel.
//! - [`view_model`] -- [`ViewModel`]: UI actions in, panel projections out.
//! - [`shared`] -- [`SharedViewModel`], a single-lock handle for
//!   concurrent callers.
//! - [`config`] -- YAML-backed [`TrackerConfig`].
//! - [`error`] -- [`TrackerError`].
//!
//! # Usage
//!
//! ```
//! use seawatch_core::ViewModel;
//! use seawatch_types::{EventStatus, GeoPoint};
//!
//! let mut vm = ViewModel::default();
//! let created = vm
//!     .create_event("暗船", Some(GeoPoint::new(23.5, 121.0)), Some(200_000.0))
//!     .ok();
//! let id = created.map(|view| view.id);
//!
//! if let Some(id) = id {
//!     let detail = vm.apply_transition(&id, EventStatus::Investigate).ok();
//!     assert_eq!(detail.map(|d| d.status), Some(EventStatus::Investigate));
//!     assert!(vm.apply_transition(&id, EventStatus::Triage).is_err());
//! }
//! assert_eq!(vm.render_map().len(), 1);
//! ```

pub mod annotator;
pub mod config;
pub mod error;
pub mod shared;
pub mod state_machine;
pub mod store;
pub mod threat;
pub mod view_model;

// Re-export primary types at crate root.
pub use annotator::{annotate, status_color};
pub use config::{ConfigError, LogFormat, TrackerConfig};
pub use error::TrackerError;
pub use shared::SharedViewModel;
pub use store::{EventStore, NewEvent};
pub use threat::ThreatPolicy;
pub use view_model::{ViewModel, detail_view};
