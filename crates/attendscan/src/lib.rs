//! `attendscan` - Scan-to-lookup client for event attendee check-in
//!
//! A scanned registration code is looked up against a remote endpoint and the
//! returned attendee record is rendered with its list of registered events.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod record;
pub mod render;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use lookup::{LookupClient, RecordSource};
pub use record::{AttendeeRecord, LookupResult, ScanCode, ScanOutcome};
pub use render::{DisplayState, NotificationKind, Presentation};
pub use session::{Session, Update};
