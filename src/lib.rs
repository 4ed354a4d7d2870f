//! SpaceControl 3D-mouse navigation for interactive 3D viewports.
//!
//! Polls a SpaceControl device through the vendor driver and applies the
//! motion to a host 3D view: camera-space panning of the orbit pivot plus
//! local-frame orbit rotation, at ~100 Hz, without blocking the host's own
//! input handling.
//!
//! The host supplies a viewport lookup ([`ViewportHost`]), a repeating
//! callback honoring [`Reschedule`], and configuration; the session owns
//! everything else, including the device connection lifecycle.

pub mod config;
pub mod session;

pub use config::{AppConfig, ConfigError, DeviceConfig, NavigationConfig};
pub use session::{DeviceBackend, DeviceLink, Reschedule, Session, SpaceControlBackend};
pub use spacectl_driver::{DeviceChannel, DeviceSample, DriverError};
pub use spacectl_view::{apply_motion, NavSettings, ViewRegion, ViewState, ViewportHost};
