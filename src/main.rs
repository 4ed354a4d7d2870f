//! spacectl - headless diagnostic runner
//!
//! Opens the SpaceControl device, drives an in-memory view and logs the
//! resulting view state. Useful for checking a device installation without
//! a host application.

use std::thread;

use glam::EulerRot;
use spacectl::config::AppConfig;
use spacectl::session::{Reschedule, Session, SpaceControlBackend};
use spacectl::{ViewRegion, ViewState, ViewportHost};

/// Host with a single, always-visible view.
struct SingleViewHost {
    view: ViewState,
}

impl ViewportHost for SingleViewHost {
    fn active_view(&mut self) -> Option<&mut dyn ViewRegion> {
        Some(&mut self.view)
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting spacectl diagnostic session");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    let settings = config.navigation.to_nav_settings();

    let mut host = SingleViewHost {
        view: ViewState::new(),
    };
    let mut session = Session::new(SpaceControlBackend, config.device.app_name.clone());

    loop {
        match session.tick(&mut host, &settings) {
            Reschedule::After(delay) => {
                if host.view.take_redraw_request() {
                    let loc = host.view.location;
                    let (pitch, yaw, roll) = host.view.rotation.to_euler(EulerRot::XYZ);
                    log::info!(
                        "view location ({:.3}, {:.3}, {:.3}) rotation ({:.3}, {:.3}, {:.3})",
                        loc.x,
                        loc.y,
                        loc.z,
                        pitch,
                        yaw,
                        roll
                    );
                }
                thread::sleep(delay);
            }
            Reschedule::Stop => break,
        }
    }

    log::info!("Session stopped");
}
