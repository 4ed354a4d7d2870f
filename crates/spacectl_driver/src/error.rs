//! Error types for the SpaceControl device channel.

use thiserror::Error;

/// Failures opening or driving the device channel.
///
/// "No new data" from a fetch is not a failure and is reported as `Ok(None)`
/// by [`DeviceChannel::fetch`](crate::DeviceChannel::fetch).
#[derive(Error, Debug)]
pub enum DriverError {
    /// The vendor driver only ships for Windows.
    #[error("SpaceControl driver is not available on {0}")]
    UnsupportedPlatform(&'static str),

    /// The vendor binary could not be loaded or is missing entry points.
    #[error("could not load SpaceControl library '{path}': {source}")]
    LibraryLoad {
        path: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// A channel is already open somewhere in this process.
    #[error("a SpaceControl channel is already open")]
    AlreadyOpen,

    /// `scConnect2` returned a nonzero status.
    #[error("scConnect2 failed with status {0}")]
    ConnectFailed(i32),

    /// `scGetDevNum` returned a nonzero status.
    #[error("scGetDevNum failed with status {0}")]
    DeviceCountFailed(i32),

    /// The driver enumerated zero devices.
    #[error("no SpaceControl devices found")]
    NoDevice,

    /// The fetch call itself failed at the binding layer.
    #[error("device channel fault: {0}")]
    ChannelFault(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_failed_display() {
        let msg = format!("{}", DriverError::ConnectFailed(3));
        assert!(msg.contains("scConnect2"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_unsupported_platform_display() {
        let msg = format!("{}", DriverError::UnsupportedPlatform("linux"));
        assert!(msg.contains("not available"));
        assert!(msg.contains("linux"));
    }

    #[test]
    fn test_no_device_display() {
        let msg = format!("{}", DriverError::NoDevice);
        assert!(msg.contains("no SpaceControl devices"));
    }

    #[test]
    fn test_channel_fault_display() {
        let msg = format!("{}", DriverError::ChannelFault("stale handle".to_string()));
        assert!(msg.contains("channel fault"));
        assert!(msg.contains("stale handle"));
    }
}
