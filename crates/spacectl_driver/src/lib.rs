//! Minimal client for the SpaceControl 3D-mouse driver.
//!
//! Talks to the vendor controller library (`spc_ctrlr_32/64.dll`) through a
//! statically declared FFI surface: connect, enumerate devices, fetch one
//! sample, disconnect. Daemon-mode connections and button/wheel semantics
//! are intentionally not covered.
//!
//! ## Core types
//!
//! - [`DeviceChannel`] - open connection to the first enumerated device
//! - [`DeviceSample`] - one six-axis motion snapshot
//! - [`DriverError`] - typed startup and channel failures

mod binding;
mod channel;
mod error;

pub use binding::library_path;
pub use channel::{DeviceChannel, DeviceSample};
pub use error::DriverError;
