//! Polling session driving device input into the host viewport.
//!
//! [`Session`] owns the device connection lifecycle and is invoked from the
//! host's repeating callback; [`DeviceBackend`] is the seam the real driver
//! plugs into.

mod backend;
mod scheduler;

pub use backend::{DeviceBackend, DeviceLink, SpaceControlBackend};
pub use scheduler::{Reschedule, Session, FAST_POLL, SLOW_RECHECK};
