//=========================================================================
// Test Support
//=========================================================================
//
// Fakes shared by unit tests across the crate.
//
// - `FakePlatform`: records subscribe/unsubscribe calls, can refuse
//   resources, reports a settable rotation and last known fix
// - `FixedClock`: settable clock, clones share state
// - `RecordingSink`: collects delivered events
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

//=== Internal Dependencies ===============================================

use crate::core::event::{DisplayRotation, LocationFix, NormalizedEvent};
use crate::core::platform_bridge::{HostPlatform, NativeEventSink};
use crate::core::sensor::{HostResource, SubscriptionError};
use crate::core::time_base::Clock;

//=== FakePlatform ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PlatformCall {
    Subscribe(HostResource),
    Unsubscribe(HostResource),
}

#[derive(Debug, Default)]
pub(crate) struct FakePlatform {
    /// Successful subscribes and every unsubscribe, in call order.
    pub calls: Vec<PlatformCall>,
    pub rotation: DisplayRotation,
    pub location: Option<LocationFix>,
    unavailable: HashSet<HostResource>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform on which `missing` resources cannot be subscribed.
    pub fn without(missing: &[HostResource]) -> Self {
        Self {
            unavailable: missing.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Resources currently subscribed.
    pub fn active(&self) -> HashSet<HostResource> {
        let mut active = HashSet::new();
        for call in &self.calls {
            match *call {
                PlatformCall::Subscribe(resource) => {
                    active.insert(resource);
                }
                PlatformCall::Unsubscribe(resource) => {
                    active.remove(&resource);
                }
            }
        }
        active
    }
}

impl HostPlatform for FakePlatform {
    fn subscribe(&mut self, resource: HostResource) -> Result<(), SubscriptionError> {
        if self.unavailable.contains(&resource) {
            return Err(SubscriptionError::Unavailable(resource));
        }
        self.calls.push(PlatformCall::Subscribe(resource));
        Ok(())
    }

    fn unsubscribe(&mut self, resource: HostResource) {
        self.calls.push(PlatformCall::Unsubscribe(resource));
    }

    fn display_rotation(&self) -> DisplayRotation {
        self.rotation
    }

    fn last_known_location(&self) -> Option<LocationFix> {
        self.location
    }
}

//=== FixedClock ==========================================================

#[derive(Debug, Clone)]
pub(crate) struct FixedClock {
    wall: Arc<AtomicI64>,
    uptime: Arc<AtomicI64>,
}

impl FixedClock {
    pub fn new(wall_ms: i64, uptime_ms: i64) -> Self {
        Self {
            wall: Arc::new(AtomicI64::new(wall_ms)),
            uptime: Arc::new(AtomicI64::new(uptime_ms)),
        }
    }

    pub fn set(&self, wall_ms: i64, uptime_ms: i64) {
        self.wall.store(wall_ms, Ordering::SeqCst);
        self.uptime.store(uptime_ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn wall_clock_millis(&self) -> i64 {
        self.wall.load(Ordering::SeqCst)
    }

    fn uptime_millis(&self) -> i64 {
        self.uptime.load(Ordering::SeqCst)
    }
}

//=== Sinks ===============================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSink {
    events: Arc<Mutex<Vec<NormalizedEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NormalizedEvent> {
        self.events.lock().clone()
    }
}

impl NativeEventSink for RecordingSink {
    fn deliver(&self, event: NormalizedEvent) {
        self.events.lock().push(event);
    }
}

/// Sink that panics on every delivery.
pub(crate) struct PanickingSink;

impl NativeEventSink for PanickingSink {
    fn deliver(&self, _event: NormalizedEvent) {
        panic!("native consumer crashed");
    }
}
