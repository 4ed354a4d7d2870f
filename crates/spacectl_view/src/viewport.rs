//! Viewport access traits and a plain in-memory view state.

use glam::{Quat, Vec3};

/// Mutable access to one 3D view region's orbit state.
///
/// A view is a unit rotation quaternion plus the world-space pivot point the
/// camera orbits around. Implementations hand out the current values and
/// store composed updates; the navigation code composes onto the rotation,
/// it never replaces or renormalizes it.
pub trait ViewRegion {
    fn view_rotation(&self) -> Quat;
    fn set_view_rotation(&mut self, rotation: Quat);
    fn view_location(&self) -> Vec3;
    fn set_view_location(&mut self, location: Vec3);

    /// Mark the region as needing a redraw.
    fn request_redraw(&mut self);
}

/// Host-side viewport lookup.
///
/// Lets the polling session work against any host that can point at a
/// visible 3D view region, or report that none is currently on screen.
pub trait ViewportHost {
    /// First visible 3D view region, if any.
    fn active_view(&mut self) -> Option<&mut dyn ViewRegion>;
}

/// Plain in-memory view state.
///
/// Backing store for headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub rotation: Quat,
    pub location: Vec3,
    redraw_requested: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            location: Vec3::ZERO,
            redraw_requested: false,
        }
    }

    /// Consume a pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl ViewRegion for ViewState {
    fn view_rotation(&self) -> Quat {
        self.rotation
    }

    fn set_view_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn view_location(&self) -> Vec3 {
        self.location
    }

    fn set_view_location(&mut self, location: Vec3) {
        self.location = location;
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}
