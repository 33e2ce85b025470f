//=========================================================================
// Sensor Subscription Manager
//=========================================================================
//
// Enable/disable state machine per sensor group, guarded per family.
//
// Architecture:
// ```text
//   enable(group) ─┐                      ┌─► HostPlatform::subscribe
//   disable(group) ┼─► family Mutex ──────┤
//   on_reading()  ─┘   (registered set +  └─► SensorFusionStore
//                       fusion store)
// ```
//
// Rules:
// - Every operation on a family runs under that family's lock, so no
//   reader ever sees a group with only some members registered.
// - Enable is all-or-nothing: members registered by a failed call are
//   rolled back before the lock is released.
// - Enable/disable are idempotent.
// - Families are independent and can be mutated concurrently.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, trace, warn};
use parking_lot::Mutex;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{
    HostResource, ReadingOutcome, SensorFusionStore, SensorGroup, SensorKind, SensorState,
    SubscriptionState,
};
use crate::core::event::DisplayRotation;
use crate::core::platform_bridge::HostPlatform;

//=== SubscriptionError ===================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SubscriptionError {
    /// Resource absent or permission denied.
    #[error("{0:?} unavailable")]
    Unavailable(HostResource),
}

//=== FamilyState =========================================================

/// State guarded by one family lock.
#[derive(Debug)]
struct FamilyState {
    registered: HashSet<HostResource>,
    fusion: SensorFusionStore,
}

impl FamilyState {
    fn new(kinds: &[SensorKind]) -> Self {
        Self {
            registered: HashSet::new(),
            fusion: SensorFusionStore::for_kinds(kinds),
        }
    }

    fn group_state(&self, group: SensorGroup) -> SubscriptionState {
        if group.members().iter().all(|r| self.registered.contains(r)) {
            SubscriptionState::Enabled
        } else {
            SubscriptionState::Disabled
        }
    }

    fn register(&mut self, resource: HostResource) {
        self.registered.insert(resource);
        if let Some(kind) = resource.sensor() {
            self.fusion.register(kind);
        }
    }

    fn unregister(&mut self, resource: HostResource) {
        self.registered.remove(&resource);
        if let Some(kind) = resource.sensor() {
            self.fusion.on_disable(kind);
        }
    }
}

//=== SensorSubscriptionManager ===========================================

/// Owner of every group's subscription state and sensor readiness.
///
/// `Sync`: share it through an `Arc`. Mutating calls take the platform by
/// `&mut`, so only the thread that owns the platform can change
/// subscriptions; any thread can query state.
#[derive(Debug)]
pub struct SensorSubscriptionManager {
    orientation: Mutex<FamilyState>,
    gyroscope: Mutex<FamilyState>,
    gps: Mutex<FamilyState>,
    keep_screen_on: Mutex<FamilyState>,
}

impl SensorSubscriptionManager {
    pub fn new() -> Self {
        Self {
            orientation: Mutex::new(FamilyState::new(&[
                SensorKind::Accelerometer,
                SensorKind::Magnetometer,
            ])),
            gyroscope: Mutex::new(FamilyState::new(&[SensorKind::Gyroscope])),
            gps: Mutex::new(FamilyState::new(&[])),
            keep_screen_on: Mutex::new(FamilyState::new(&[])),
        }
    }

    //--- Enable / Disable -------------------------------------------------

    /// Registers every member of `group`.
    ///
    /// No-op when already enabled. If any member is unavailable, members
    /// registered by this call are released again and the group stays
    /// disabled.
    pub fn enable<P>(&self, group: SensorGroup, platform: &mut P) -> Result<(), SubscriptionError>
    where
        P: HostPlatform + ?Sized,
    {
        let mut family = self.family(group).lock();

        if family.group_state(group) == SubscriptionState::Enabled {
            trace!(target: "bridge::sensor", "{:?} already enabled", group);
            return Ok(());
        }

        let mut newly_registered = Vec::with_capacity(group.members().len());

        for &resource in group.members() {
            if family.registered.contains(&resource) {
                continue;
            }

            match platform.subscribe(resource) {
                Ok(()) => {
                    family.register(resource);
                    newly_registered.push(resource);
                }
                Err(err) => {
                    for rollback in newly_registered.drain(..).rev() {
                        platform.unsubscribe(rollback);
                        family.unregister(rollback);
                    }
                    warn!(target: "bridge::sensor", "Cannot enable {:?}: {}", group, err);
                    return Err(err);
                }
            }
        }

        debug!(target: "bridge::sensor", "{:?} enabled", group);
        Ok(())
    }

    /// Releases every registered member of `group` and clears readiness.
    pub fn disable<P>(&self, group: SensorGroup, platform: &mut P)
    where
        P: HostPlatform + ?Sized,
    {
        let mut family = self.family(group).lock();
        let mut released = 0;

        for &resource in group.members() {
            if family.registered.contains(&resource) {
                platform.unsubscribe(resource);
                family.unregister(resource);
                released += 1;
            }
        }

        if released > 0 {
            debug!(target: "bridge::sensor", "{:?} disabled", group);
        } else {
            trace!(target: "bridge::sensor", "{:?} already disabled", group);
        }
    }

    /// Disables the keep-screen-on, orientation, GPS and gyroscope groups,
    /// in that order, regardless of what was requested.
    pub fn disable_all<P>(&self, platform: &mut P)
    where
        P: HostPlatform + ?Sized,
    {
        for group in [
            SensorGroup::KeepScreenOn,
            SensorGroup::Orientation,
            SensorGroup::Gps,
            SensorGroup::Gyroscope,
        ] {
            self.disable(group, &mut *platform);
        }
    }

    //--- Readings ---------------------------------------------------------

    /// Feeds a sensor reading through the family's fusion store.
    ///
    /// Serialized with enable/disable of the same family.
    pub fn on_reading(
        &self,
        kind: SensorKind,
        values: [f32; 3],
        timestamp: i64,
        rotation: DisplayRotation,
    ) -> Option<ReadingOutcome> {
        let outcome = self
            .family_of(kind.resource())
            .lock()
            .fusion
            .on_reading(kind, values, timestamp, rotation);

        if outcome.is_none() {
            trace!(target: "bridge::sensor", "Dropped {:?} reading (not registered)", kind);
        }
        outcome
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self, group: SensorGroup) -> SubscriptionState {
        self.family(group).lock().group_state(group)
    }

    pub fn is_enabled(&self, group: SensorGroup) -> bool {
        self.state(group) == SubscriptionState::Enabled
    }

    pub fn sensor_state(&self, kind: SensorKind) -> SensorState {
        self.family_of(kind.resource()).lock().fusion.state(kind)
    }

    /// Members of `group` registered right now, read under the family lock.
    #[cfg(test)]
    fn registered_count(&self, group: SensorGroup) -> usize {
        let family = self.family(group).lock();
        group
            .members()
            .iter()
            .filter(|r| family.registered.contains(*r))
            .count()
    }

    //--- Internal Helpers -------------------------------------------------

    fn family(&self, group: SensorGroup) -> &Mutex<FamilyState> {
        // Every member of a group lives in the same family.
        self.family_of(group.members()[0])
    }

    fn family_of(&self, resource: HostResource) -> &Mutex<FamilyState> {
        match resource {
            HostResource::Accelerometer | HostResource::Magnetometer => &self.orientation,
            HostResource::Gyroscope => &self.gyroscope,
            HostResource::Gps => &self.gps,
            HostResource::KeepScreenOn => &self.keep_screen_on,
        }
    }
}

impl Default for SensorSubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
