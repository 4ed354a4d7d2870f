//! Applies one device sample to a view region.
//!
//! Translation happens in view (camera) space: tx moves right/left, ty up/
//! down, tz forward/backward. The translated point is the orbit pivot, so
//! pushing the cap pans and dollies the view rather than teleporting the
//! camera. Rotation is composed in the view's local frame.

use glam::{EulerRot, Quat, Vec3};
use spacectl_driver::DeviceSample;

use crate::viewport::ViewRegion;

/// Per-cycle navigation settings.
///
/// A snapshot of the host's preferences, assumed already clamped to sane
/// positive sensitivities when handed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavSettings {
    /// Scale factor for translation (tx, ty, tz).
    pub move_sensitivity: f32,
    /// Scale factor for rotation (rx, ry, rz), radians per count.
    pub rotate_sensitivity: f32,
    /// Invert X movement.
    pub invert_x: bool,
    /// Invert Y movement.
    pub invert_y: bool,
    /// Invert Z movement.
    pub invert_z: bool,
    /// Apply controller rotation to the view.
    pub enable_rotation: bool,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            move_sensitivity: 0.001,
            rotate_sensitivity: 0.0005,
            invert_x: false,
            invert_y: false,
            invert_z: false,
            enable_rotation: true,
        }
    }
}

/// Apply one motion sample to the view.
///
/// The translation vector is built in camera space (right, up, forward),
/// rotated into world space by the current view rotation and added to the
/// view pivot. When rotation is enabled, rx/ry/rz become pitch/yaw/roll of
/// an intrinsic XYZ Euler rotation that is right-multiplied onto the view
/// rotation, so the delta acts in the view's local frame. When disabled the
/// stored rotation is left untouched for the cycle.
pub fn apply_motion(sample: &DeviceSample, settings: &NavSettings, view: &mut dyn ViewRegion) {
    let sx = if settings.invert_x { -1.0 } else { 1.0 };
    let sy = if settings.invert_y { -1.0 } else { 1.0 };
    let sz = if settings.invert_z { -1.0 } else { 1.0 };

    // Camera-local translation: right, up, forward.
    let v_cam = Vec3::new(
        f32::from(sample.tx) * settings.move_sensitivity * sx,
        f32::from(sample.ty) * settings.move_sensitivity * sy,
        f32::from(sample.tz) * settings.move_sensitivity * sz,
    );

    let rotation = view.view_rotation();

    // World-space pan/dolly of the orbit pivot.
    let v_world = rotation * v_cam;
    view.set_view_location(view.view_location() + v_world);

    if settings.enable_rotation {
        let pitch = f32::from(sample.rx) * settings.rotate_sensitivity;
        let yaw = f32::from(sample.ry) * settings.rotate_sensitivity;
        let roll = f32::from(sample.rz) * settings.rotate_sensitivity;

        let delta = Quat::from_euler(EulerRot::XYZ, pitch, yaw, roll);
        view.set_view_rotation(rotation * delta);
    }

    view.request_redraw();
}
