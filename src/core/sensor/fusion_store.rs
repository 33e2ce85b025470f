//=========================================================================
// Sensor Fusion Store
//=========================================================================
//
// Latest readings and readiness per sensor kind, with orientation fusion.
//
// State machine (per kind):
// ```text
//            register()             on_reading()
//  Unregistered ──────► NotReady ──────────────► Ready ─┐
//       ▲                  │                       ▲    │ on_reading()
//       └──── on_disable() ┴───────────────────────┴────┘
// ```
//
// Fusion: a reading for Accelerometer or Magnetometer yields one
// Orientation event when the other member is Ready too.
//
// Not thread-safe by itself; the subscription manager keeps one store per
// sensor family inside that family's critical section.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::SensorKind;
use crate::core::event::{DisplayRotation, NormalizedEvent};

//=== SensorSample ========================================================

/// Latest reading of one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSample {
    pub values: [f32; 3],
    pub ready: bool,
}

//=== SensorState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorState {
    Unregistered,
    RegisteredNotReady,
    RegisteredReady,
}

//=== ReadingOutcome ======================================================

/// Events produced by one accepted reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingOutcome {
    /// Per-sensor event for the reading itself.
    pub reading: NormalizedEvent,

    /// Combined orientation update, when both members are ready.
    pub orientation: Option<NormalizedEvent>,
}

impl ReadingOutcome {
    /// All events in delivery order (raw reading first).
    pub fn into_events(self) -> impl Iterator<Item = NormalizedEvent> {
        std::iter::once(self.reading).chain(self.orientation)
    }
}

//=== SensorFusionStore ===================================================

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    registered: bool,
    sample: SensorSample,
}

/// Readiness and readings for a fixed set of sensor kinds.
#[derive(Debug, Clone)]
pub struct SensorFusionStore {
    slots: HashMap<SensorKind, Slot>,
}

impl SensorFusionStore {
    /// Creates a store covering `kinds`. Readings for other kinds are
    /// ignored.
    pub fn for_kinds(kinds: &[SensorKind]) -> Self {
        Self {
            slots: kinds.iter().map(|&kind| (kind, Slot::default())).collect(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Marks a kind as registered. Keeps readiness if already registered.
    pub fn register(&mut self, kind: SensorKind) {
        if let Some(slot) = self.slots.get_mut(&kind) {
            slot.registered = true;
        }
    }

    /// Marks a kind as unregistered and clears its readiness.
    ///
    /// Leaves every other kind untouched.
    pub fn on_disable(&mut self, kind: SensorKind) {
        if let Some(slot) = self.slots.get_mut(&kind) {
            slot.registered = false;
            slot.sample.ready = false;
        }
    }

    //--- Readings ---------------------------------------------------------

    /// Stores a reading and returns the events it produces.
    ///
    /// Returns `None` for kinds that are not registered (late callbacks
    /// after a disable) or not covered by this store.
    pub fn on_reading(
        &mut self,
        kind: SensorKind,
        values: [f32; 3],
        timestamp: i64,
        rotation: DisplayRotation,
    ) -> Option<ReadingOutcome> {
        let slot = self.slots.get_mut(&kind).filter(|slot| slot.registered)?;
        slot.sample = SensorSample {
            values,
            ready: true,
        };

        let reading = match kind {
            SensorKind::Accelerometer => NormalizedEvent::Accelerometer {
                values,
                rotation,
                timestamp,
            },
            SensorKind::Magnetometer => NormalizedEvent::Magnetometer { values, timestamp },
            SensorKind::Gyroscope => NormalizedEvent::Gyroscope { values, timestamp },
        };

        Some(ReadingOutcome {
            reading,
            orientation: self.fuse(kind, timestamp, rotation),
        })
    }

    fn fuse(
        &self,
        kind: SensorKind,
        timestamp: i64,
        rotation: DisplayRotation,
    ) -> Option<NormalizedEvent> {
        if kind == SensorKind::Gyroscope {
            return None;
        }

        let accelerometer = self.ready_sample(SensorKind::Accelerometer)?;
        let magnetometer = self.ready_sample(SensorKind::Magnetometer)?;

        Some(NormalizedEvent::Orientation {
            accelerometer: accelerometer.values,
            magnetometer: magnetometer.values,
            rotation,
            timestamp,
        })
    }

    fn ready_sample(&self, kind: SensorKind) -> Option<SensorSample> {
        self.slots
            .get(&kind)
            .map(|slot| slot.sample)
            .filter(|sample| sample.ready)
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self, kind: SensorKind) -> SensorState {
        match self.slots.get(&kind) {
            Some(slot) if slot.registered && slot.sample.ready => SensorState::RegisteredReady,
            Some(slot) if slot.registered => SensorState::RegisteredNotReady,
            _ => SensorState::Unregistered,
        }
    }

    pub fn is_ready(&self, kind: SensorKind) -> bool {
        self.state(kind) == SensorState::RegisteredReady
    }

    /// Latest sample for a kind, if covered by this store.
    pub fn sample(&self, kind: SensorKind) -> Option<SensorSample> {
        self.slots.get(&kind).map(|slot| slot.sample)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ACCEL: [f32; 3] = [0.1, 9.8, 0.2];
    const MAGNET: [f32; 3] = [20.0, -5.0, 40.0];

    fn orientation_store() -> SensorFusionStore {
        let mut store =
            SensorFusionStore::for_kinds(&[SensorKind::Accelerometer, SensorKind::Magnetometer]);
        store.register(SensorKind::Accelerometer);
        store.register(SensorKind::Magnetometer);
        store
    }

    #[test]
    fn accelerometer_alone_never_fuses() {
        let mut store = orientation_store();

        for t in 0..5 {
            let outcome = store
                .on_reading(SensorKind::Accelerometer, ACCEL, t, DisplayRotation::Deg0)
                .unwrap();
            assert!(outcome.orientation.is_none());
        }
    }

    #[test]
    fn accelerometer_then_magnetometer_fuses_once() {
        let mut store = orientation_store();

        let first = store
            .on_reading(SensorKind::Accelerometer, ACCEL, 10, DisplayRotation::Deg90)
            .unwrap();
        let second = store
            .on_reading(SensorKind::Magnetometer, MAGNET, 20, DisplayRotation::Deg90)
            .unwrap();

        let fused: Vec<_> = first
            .into_events()
            .chain(second.into_events())
            .filter(|e| matches!(e, NormalizedEvent::Orientation { .. }))
            .collect();

        assert_eq!(
            fused,
            vec![NormalizedEvent::Orientation {
                accelerometer: ACCEL,
                magnetometer: MAGNET,
                rotation: DisplayRotation::Deg90,
                timestamp: 20,
            }]
        );
    }

    #[test]
    fn reading_event_carries_rotation_for_accelerometer() {
        let mut store = orientation_store();
        let outcome = store
            .on_reading(SensorKind::Accelerometer, ACCEL, 5, DisplayRotation::Deg270)
            .unwrap();

        assert_eq!(
            outcome.reading,
            NormalizedEvent::Accelerometer {
                values: ACCEL,
                rotation: DisplayRotation::Deg270,
                timestamp: 5,
            }
        );
    }

    #[test]
    fn readings_for_unregistered_kinds_are_dropped() {
        let mut store =
            SensorFusionStore::for_kinds(&[SensorKind::Accelerometer, SensorKind::Magnetometer]);

        assert!(store
            .on_reading(SensorKind::Accelerometer, ACCEL, 1, DisplayRotation::Deg0)
            .is_none());
        assert_eq!(store.state(SensorKind::Accelerometer), SensorState::Unregistered);
    }

    #[test]
    fn readings_for_uncovered_kinds_are_dropped() {
        let mut store = orientation_store();
        assert!(store
            .on_reading(SensorKind::Gyroscope, ACCEL, 1, DisplayRotation::Deg0)
            .is_none());
    }

    #[test]
    fn state_transitions() {
        let mut store = SensorFusionStore::for_kinds(&[SensorKind::Gyroscope]);
        assert_eq!(store.state(SensorKind::Gyroscope), SensorState::Unregistered);

        store.register(SensorKind::Gyroscope);
        assert_eq!(store.state(SensorKind::Gyroscope), SensorState::RegisteredNotReady);

        store.on_reading(SensorKind::Gyroscope, [1.0, 2.0, 3.0], 1, DisplayRotation::Deg0);
        assert_eq!(store.state(SensorKind::Gyroscope), SensorState::RegisteredReady);

        store.on_disable(SensorKind::Gyroscope);
        assert_eq!(store.state(SensorKind::Gyroscope), SensorState::Unregistered);
    }

    #[test]
    fn gyroscope_emits_directly() {
        let mut store = SensorFusionStore::for_kinds(&[SensorKind::Gyroscope]);
        store.register(SensorKind::Gyroscope);

        let events: Vec<_> = store
            .on_reading(SensorKind::Gyroscope, [1.0, 2.0, 3.0], 7, DisplayRotation::Deg0)
            .unwrap()
            .into_events()
            .collect();

        assert_eq!(
            events,
            vec![NormalizedEvent::Gyroscope {
                values: [1.0, 2.0, 3.0],
                timestamp: 7,
            }]
        );
    }

    #[test]
    fn disabling_one_member_keeps_the_other_ready() {
        let mut store = orientation_store();
        store.on_reading(SensorKind::Accelerometer, ACCEL, 1, DisplayRotation::Deg0);
        store.on_reading(SensorKind::Magnetometer, MAGNET, 2, DisplayRotation::Deg0);

        store.on_disable(SensorKind::Accelerometer);

        assert!(!store.is_ready(SensorKind::Accelerometer));
        assert!(store.is_ready(SensorKind::Magnetometer));
    }

    #[test]
    fn re_registration_requires_fresh_reading() {
        let mut store = orientation_store();
        store.on_reading(SensorKind::Accelerometer, ACCEL, 1, DisplayRotation::Deg0);
        store.on_reading(SensorKind::Magnetometer, MAGNET, 2, DisplayRotation::Deg0);

        store.on_disable(SensorKind::Accelerometer);
        store.register(SensorKind::Accelerometer);

        // Magnetometer is ready but the accelerometer has not reported yet
        let outcome = store
            .on_reading(SensorKind::Magnetometer, MAGNET, 3, DisplayRotation::Deg0)
            .unwrap();
        assert!(outcome.orientation.is_none());
    }
}
