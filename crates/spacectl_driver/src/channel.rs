//! Connection lifecycle and sample polling for one SpaceControl device.

use std::ffi::CString;
use std::os::raw::{c_int, c_long};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::binding::{library_path, SpaceControlLibrary};
use crate::error::DriverError;

/// One snapshot of six-axis motion plus the raw event code.
///
/// Axis values are the device's raw signed readings; scaling and axis
/// inversion are the consumer's concern. The driver also reports wheel,
/// button and timestamp data per fetch, none of which is surfaced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceSample {
    /// Translation right/left.
    pub tx: i16,
    /// Translation up/down.
    pub ty: i16,
    /// Translation forward/backward.
    pub tz: i16,
    /// Rotation about the view X axis (pitch).
    pub rx: i16,
    /// Rotation about the view Y axis (yaw).
    pub ry: i16,
    /// Rotation about the view Z axis (roll).
    pub rz: i16,
    /// Raw event / button code.
    pub event: i32,
}

/// Whether a channel is open anywhere in this process.
///
/// The controller library manages one global connection, so a second
/// channel would silently share driver state with the first.
static CHANNEL_OPEN: AtomicBool = AtomicBool::new(false);

/// Claim on the process-wide channel slot, released on drop.
struct Slot;

impl Slot {
    fn acquire() -> Result<Slot, DriverError> {
        if CHANNEL_OPEN.swap(true, Ordering::AcqRel) {
            Err(DriverError::AlreadyOpen)
        } else {
            Ok(Slot)
        }
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        CHANNEL_OPEN.store(false, Ordering::Release);
    }
}

/// Open channel to one SpaceControl device.
///
/// Created with [`DeviceChannel::open`], held across poll cycles and torn
/// down exactly once via [`DeviceChannel::close`] or `Drop`.
pub struct DeviceChannel {
    lib: SpaceControlLibrary,
    device_id: c_int,
    _slot: Slot,
}

impl DeviceChannel {
    /// Connect to the driver and select the first enumerated device.
    ///
    /// `app_name` identifies the host application to the driver; it must be
    /// ASCII without interior NUL bytes. Only one channel may be open per
    /// process, and only on Windows, where the vendor binary exists.
    pub fn open(app_name: &str) -> Result<DeviceChannel, DriverError> {
        if !cfg!(windows) {
            return Err(DriverError::UnsupportedPlatform(std::env::consts::OS));
        }

        let slot = Slot::acquire()?;

        let lib = unsafe { SpaceControlLibrary::load() }.map_err(|source| {
            DriverError::LibraryLoad {
                path: library_path(),
                source,
            }
        })?;

        let name = CString::new(app_name).map_err(|_| {
            DriverError::ChannelFault("application name contains a NUL byte".to_string())
        })?;

        // Daemon-mode connection is deliberately off; the driver talks to
        // the device directly.
        let status = unsafe { (*lib.connect)(false, name.as_ptr()) };
        if status != 0 {
            return Err(DriverError::ConnectFailed(status));
        }

        // From here on the connection is owned; Drop disconnects on every
        // failure path below.
        let channel = DeviceChannel {
            lib,
            device_id: 0,
            _slot: slot,
        };

        let count = channel.device_count()?;
        if count <= 0 {
            return Err(DriverError::NoDevice);
        }

        log::info!("SpaceControl channel open, {count} device(s) enumerated");
        Ok(channel)
    }

    /// Poll the device once.
    ///
    /// Returns `Ok(None)` when the driver reports no new data. At ~100 Hz
    /// poll rates this is the common case, not a failure.
    pub fn fetch(&mut self) -> Result<Option<DeviceSample>, DriverError> {
        let mut x: i16 = 0;
        let mut y: i16 = 0;
        let mut z: i16 = 0;
        let mut a: i16 = 0;
        let mut b: i16 = 0;
        let mut c: i16 = 0;
        let mut wheel: c_int = 0;
        let mut buttons: c_int = 0;
        let mut event: c_int = 0;
        let mut tv_sec: c_long = 0;
        let mut tv_usec: c_long = 0;

        let status = unsafe {
            (*self.lib.fetch_std_data)(
                self.device_id,
                &mut x,
                &mut y,
                &mut z,
                &mut a,
                &mut b,
                &mut c,
                &mut wheel,
                &mut buttons,
                &mut event,
                &mut tv_sec,
                &mut tv_usec,
            )
        };
        if status != 0 {
            return Ok(None);
        }

        Ok(Some(DeviceSample {
            tx: x,
            ty: y,
            tz: z,
            rx: a,
            ry: b,
            rz: c,
            event,
        }))
    }

    /// Disconnect from the driver.
    ///
    /// Equivalent to dropping the channel. Disconnect failures are swallowed
    /// since the channel is torn down regardless of the driver's answer.
    pub fn close(self) {
        drop(self);
    }

    fn device_count(&self) -> Result<c_int, DriverError> {
        let mut num_all: c_int = 0;
        let mut num_usb: c_int = 0;
        let mut num_other: c_int = 0;

        let status =
            unsafe { (*self.lib.get_dev_num)(&mut num_all, &mut num_usb, &mut num_other) };
        if status != 0 {
            return Err(DriverError::DeviceCountFailed(status));
        }
        Ok(num_all)
    }
}

impl Drop for DeviceChannel {
    fn drop(&mut self) {
        let status = unsafe { (*self.lib.disconnect)() };
        if status != 0 {
            log::debug!("scDisconnect returned status {status}, ignoring");
        }
    }
}
