//! Viewport navigation for SpaceControl 3D-mouse input.
//!
//! Turns raw six-axis device samples into view transforms: camera-space
//! panning of the orbit pivot plus local-frame orbit rotation.
//!
//! ## Core types
//!
//! - [`NavSettings`] - sensitivity and axis configuration for one cycle
//! - [`ViewRegion`] / [`ViewportHost`] - host viewport access traits
//! - [`ViewState`] - plain in-memory view state
//! - [`apply_motion`] - applies one sample to a view region

mod navigator;
mod viewport;

pub use navigator::{apply_motion, NavSettings};
pub use viewport::{ViewRegion, ViewState, ViewportHost};
