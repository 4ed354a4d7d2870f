//! Device backend seam between the session and the driver.
//!
//! The session only needs "connect" and "fetch or close a link", so those
//! are traits; the real SpaceControl driver is one implementation and test
//! doubles are another.

use spacectl_driver::{DeviceChannel, DeviceSample, DriverError};

/// Connects to a device backend, producing an open link.
pub trait DeviceBackend {
    type Link: DeviceLink;

    /// Open a connection, identifying as `app_name`.
    fn connect(&mut self, app_name: &str) -> Result<Self::Link, DriverError>;
}

/// One open device connection.
pub trait DeviceLink {
    /// Poll once; `Ok(None)` means no new data this tick.
    fn fetch(&mut self) -> Result<Option<DeviceSample>, DriverError>;

    /// Tear the connection down; failures are the link's to swallow.
    fn close(self);
}

/// The real SpaceControl driver backend.
#[derive(Debug, Default)]
pub struct SpaceControlBackend;

impl DeviceBackend for SpaceControlBackend {
    type Link = DeviceChannel;

    fn connect(&mut self, app_name: &str) -> Result<DeviceChannel, DriverError> {
        DeviceChannel::open(app_name)
    }
}

impl DeviceLink for DeviceChannel {
    fn fetch(&mut self) -> Result<Option<DeviceSample>, DriverError> {
        DeviceChannel::fetch(self)
    }

    fn close(self) {
        DeviceChannel::close(self);
    }
}
