#![deny(missing_docs)]
//! Package to decide whether a home for sale can be unlocked by someone standing at it.

//
// Public API
//
pub use crate::catalog::Catalog;
pub use crate::cmd_line::CommonCmdLineArgs;
pub use crate::config::GateConfig;
pub use crate::coords::{Coords, EARTH_RADIUS_METERS};
pub use crate::errors::HomeGateErr;
pub use crate::gate::{ProximityGate, ProximityResult, UNLOCK_RADIUS_METERS};
pub use crate::listing::Listing;
pub use crate::location::{FixedLocation, LocationProvider, Permission};
pub use crate::notify::{
    AlertSink, LogSink, Notice, Notification, NotificationSink, Notifier, Presentation,
    RecordingAlerts, RecordingSink,
};
pub use crate::session::{GateState, UnlockSession};

//
// Implementation only
//
#[macro_use]
extern crate strum_macros;

mod catalog;
mod cmd_line;
mod config;
mod coords;
mod errors;
mod gate;
mod listing;
mod location;
mod notify;
mod session;
