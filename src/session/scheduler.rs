//! Polling session state machine.
//!
//! The host invokes [`Session::tick`] from a repeating callback; the return
//! value is the requested delay before the next invocation, or a stop
//! sentinel after which the session must not be invoked again. The host
//! guarantees ticks are serialized, so the session needs no locking.

use std::mem;
use std::time::Duration;

use spacectl_view::{apply_motion, NavSettings, ViewportHost};

use crate::session::backend::{DeviceBackend, DeviceLink};

/// Poll interval while a connection is live (~100 Hz).
pub const FAST_POLL: Duration = Duration::from_millis(10);

/// Re-check interval while there is nothing to drive.
pub const SLOW_RECHECK: Duration = Duration::from_millis(500);

/// What the host callback should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reschedule {
    /// Invoke [`Session::tick`] again after the given delay.
    After(Duration),
    /// Never invoke [`Session::tick`] again.
    Stop,
}

enum Phase<L> {
    /// Enabled but not yet connected.
    Idle,
    /// Attempting to open the device connection.
    Connecting,
    /// Connection open, polled every tick.
    Polling(L),
    /// Terminal; the callback asked never to run again.
    Stopped,
}

/// One SpaceControl navigation session.
///
/// Owns the device connection across poll cycles. Startup failures are
/// reported once and permanently disable the session; per-tick "no data"
/// results are routine and never surface.
pub struct Session<B: DeviceBackend> {
    backend: B,
    app_name: String,
    enabled: bool,
    phase: Phase<B::Link>,
}

impl<B: DeviceBackend> Session<B> {
    /// Start a session. No device interaction happens until the first tick.
    pub fn new(backend: B, app_name: impl Into<String>) -> Self {
        Self {
            backend,
            app_name: app_name.into(),
            enabled: true,
            phase: Phase::Idle,
        }
    }

    /// Whether device input is currently applied.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable device input without touching the connection.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip the enabled flag; returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        log::info!(
            "SpaceControl navigation {}",
            if self.enabled { "enabled" } else { "disabled" }
        );
        self.enabled
    }

    /// Host-initiated teardown: close the connection and stop for good.
    pub fn shutdown(&mut self) {
        if let Phase::Polling(link) = mem::replace(&mut self.phase, Phase::Stopped) {
            link.close();
        }
    }

    /// Run one poll/apply cycle.
    pub fn tick(&mut self, host: &mut dyn ViewportHost, settings: &NavSettings) -> Reschedule {
        if matches!(self.phase, Phase::Stopped) {
            return Reschedule::Stop;
        }

        // Disabled is orthogonal to the connection phases: skip device
        // interaction but keep any open connection for a later re-enable.
        if !self.enabled {
            return Reschedule::After(SLOW_RECHECK);
        }

        // Without a visible 3D view there is nothing to drive. An open
        // connection stays open across the gap.
        let Some(view) = host.active_view() else {
            return Reschedule::After(SLOW_RECHECK);
        };

        if matches!(self.phase, Phase::Idle) {
            self.phase = Phase::Connecting;
        }

        if matches!(self.phase, Phase::Connecting) {
            match self.backend.connect(&self.app_name) {
                Ok(link) => {
                    log::info!("SpaceControl device opened");
                    self.phase = Phase::Polling(link);
                }
                Err(err) => {
                    log::error!("failed to open SpaceControl device: {err}");
                    self.enabled = false;
                    self.phase = Phase::Stopped;
                    return Reschedule::Stop;
                }
            }
        }

        let fetched = match &mut self.phase {
            Phase::Polling(link) => link.fetch(),
            // Idle, Connecting and Stopped all resolved above.
            _ => return Reschedule::Stop,
        };

        match fetched {
            Ok(Some(sample)) => apply_motion(&sample, settings, view),
            Ok(None) => {}
            Err(err) => {
                log::error!("error reading SpaceControl device: {err}");
                self.shutdown();
                self.enabled = false;
                return Reschedule::Stop;
            }
        }

        Reschedule::After(FAST_POLL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use glam::{Quat, Vec3};
    use spacectl_driver::{DeviceSample, DriverError};
    use spacectl_view::{ViewRegion, ViewState};

    type FetchResult = Result<Option<DeviceSample>, DriverError>;

    /// Shared observation points into a fake backend and its links.
    #[derive(Clone, Default)]
    struct Probes {
        connects: Rc<Cell<usize>>,
        fetches: Rc<Cell<usize>>,
        closed: Rc<Cell<bool>>,
        script: Rc<RefCell<VecDeque<FetchResult>>>,
    }

    struct FakeLink {
        probes: Probes,
    }

    impl DeviceLink for FakeLink {
        fn fetch(&mut self) -> FetchResult {
            self.probes.fetches.set(self.probes.fetches.get() + 1);
            self.probes
                .script
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(None))
        }

        fn close(self) {
            self.probes.closed.set(true);
        }
    }

    struct FakeBackend {
        fail_connect: bool,
        probes: Probes,
    }

    impl DeviceBackend for FakeBackend {
        type Link = FakeLink;

        fn connect(&mut self, _app_name: &str) -> Result<FakeLink, DriverError> {
            self.probes.connects.set(self.probes.connects.get() + 1);
            if self.fail_connect {
                return Err(DriverError::NoDevice);
            }
            Ok(FakeLink {
                probes: self.probes.clone(),
            })
        }
    }

    struct TestHost {
        view: ViewState,
        visible: bool,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                view: ViewState::new(),
                visible: true,
            }
        }
    }

    impl ViewportHost for TestHost {
        fn active_view(&mut self) -> Option<&mut dyn ViewRegion> {
            if self.visible {
                Some(&mut self.view)
            } else {
                None
            }
        }
    }

    fn fake_session(fail_connect: bool) -> (Session<FakeBackend>, Probes) {
        let probes = Probes::default();
        let backend = FakeBackend {
            fail_connect,
            probes: probes.clone(),
        };
        (Session::new(backend, "test"), probes)
    }

    #[test]
    fn test_no_viewport_stays_idle_on_slow_interval() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();
        host.visible = false;

        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::After(SLOW_RECHECK)
        );
        assert_eq!(probes.connects.get(), 0);
    }

    #[test]
    fn test_connects_and_polls_fast_once_viewport_is_visible() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();

        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::After(FAST_POLL)
        );
        assert_eq!(probes.connects.get(), 1);
        assert_eq!(probes.fetches.get(), 1);

        // Subsequent ticks reuse the open connection.
        session.tick(&mut host, &NavSettings::default());
        assert_eq!(probes.connects.get(), 1);
        assert_eq!(probes.fetches.get(), 2);
    }

    #[test]
    fn test_sample_is_applied_to_the_view() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();
        probes.script.borrow_mut().push_back(Ok(Some(DeviceSample {
            tx: 100,
            ..DeviceSample::default()
        })));

        session.tick(&mut host, &NavSettings::default());

        assert_eq!(host.view.location, Vec3::new(0.1, 0.0, 0.0));
        assert_eq!(host.view.rotation, Quat::IDENTITY);
        assert!(host.view.take_redraw_request());
    }

    #[test]
    fn test_no_data_tick_leaves_view_alone() {
        let (mut session, _probes) = fake_session(false);
        let mut host = TestHost::new();

        session.tick(&mut host, &NavSettings::default());

        assert_eq!(host.view.location, Vec3::ZERO);
        assert!(!host.view.take_redraw_request());
    }

    #[test]
    fn test_open_failure_reports_once_and_stops_for_good() {
        let (mut session, probes) = fake_session(true);
        let mut host = TestHost::new();

        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::Stop
        );
        assert!(!session.is_enabled());

        // A stray follow-up tick must not retry the connect.
        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::Stop
        );
        assert_eq!(probes.connects.get(), 1);
    }

    #[test]
    fn test_fetch_fault_closes_link_and_stops() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();
        probes
            .script
            .borrow_mut()
            .push_back(Err(DriverError::ChannelFault("gone".to_string())));

        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::Stop
        );
        assert!(probes.closed.get());
        assert!(!session.is_enabled());
    }

    #[test]
    fn test_disabled_skips_device_but_keeps_link() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();

        session.tick(&mut host, &NavSettings::default());
        assert_eq!(probes.fetches.get(), 1);

        session.set_enabled(false);
        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::After(SLOW_RECHECK)
        );
        assert_eq!(probes.fetches.get(), 1);
        assert!(!probes.closed.get());

        session.set_enabled(true);
        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::After(FAST_POLL)
        );
        assert_eq!(probes.fetches.get(), 2);
    }

    #[test]
    fn test_viewport_gap_keeps_connection_open() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();

        session.tick(&mut host, &NavSettings::default());

        host.visible = false;
        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::After(SLOW_RECHECK)
        );
        assert!(!probes.closed.get());
        assert_eq!(probes.fetches.get(), 1);

        host.visible = true;
        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::After(FAST_POLL)
        );
        assert_eq!(probes.fetches.get(), 2);
    }

    #[test]
    fn test_shutdown_closes_link_and_stops_ticks() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();

        session.tick(&mut host, &NavSettings::default());
        session.shutdown();

        assert!(probes.closed.get());
        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::Stop
        );
    }

    #[test]
    fn test_shutdown_before_connect_is_clean() {
        let (mut session, probes) = fake_session(false);
        let mut host = TestHost::new();

        session.shutdown();

        assert_eq!(
            session.tick(&mut host, &NavSettings::default()),
            Reschedule::Stop
        );
        assert_eq!(probes.connects.get(), 0);
        assert!(!probes.closed.get());
    }

    #[test]
    fn test_toggle_flips_enabled_flag() {
        let (mut session, _probes) = fake_session(false);

        assert!(session.is_enabled());
        assert!(!session.toggle());
        assert!(session.toggle());
    }
}
