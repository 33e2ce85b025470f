//=========================================================================
// Axis Debouncer
//=========================================================================
//
// Per-axis deadzone filter that suppresses idle jitter on analog input.
//
// Architecture:
//   raw value → deadzone clamp → compare with last emitted → Option<f32>
//
// State is keyed by (device id, axis id). Entries are created on first
// sight and never removed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Constants ===========================================================

/// Default deadzone applied to analog axes.
pub const DEFAULT_AXIS_DEADZONE: f32 = 0.05;

/// Well-known joystick axis ids reported by the platform.
pub mod axis {
    pub const X: i32 = 0;
    pub const Y: i32 = 1;
    pub const Z: i32 = 11;
    pub const RZ: i32 = 14;
    pub const HAT_X: i32 = 15;
    pub const HAT_Y: i32 = 16;
}

//=== AxisDebouncer =======================================================

/// Deadzone filter with change detection per (device, axis).
#[derive(Debug, Clone)]
pub struct AxisDebouncer {
    deadzone: f32,
    last_emitted: HashMap<(i32, i32), f32>,
}

impl AxisDebouncer {
    pub fn new() -> Self {
        Self::with_deadzone(DEFAULT_AXIS_DEADZONE)
    }

    /// Creates a debouncer with a custom deadzone.
    ///
    /// # Panics
    ///
    /// Panics if `deadzone` is negative or not finite.
    pub fn with_deadzone(deadzone: f32) -> Self {
        assert!(
            deadzone.is_finite() && deadzone >= 0.0,
            "Deadzone must be finite and non-negative, got {}",
            deadzone
        );
        Self {
            deadzone,
            last_emitted: HashMap::new(),
        }
    }

    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Filters a raw axis value.
    ///
    /// Returns the filtered value when it differs from the last value
    /// emitted for this (device, axis) pair, `None` otherwise. The first
    /// value seen for a pair is always emitted.
    pub fn filter(&mut self, device_id: i32, axis_id: i32, raw: f32) -> Option<f32> {
        let value = self.apply_deadzone(raw);

        match self.last_emitted.insert((device_id, axis_id), value) {
            Some(previous) if previous == value => None,
            _ => Some(value),
        }
    }

    /// Last value emitted for a pair, if any was ever seen.
    pub fn last_value(&self, device_id: i32, axis_id: i32) -> Option<f32> {
        self.last_emitted.get(&(device_id, axis_id)).copied()
    }

    /// Number of distinct (device, axis) pairs observed.
    pub fn tracked_axes(&self) -> usize {
        self.last_emitted.len()
    }

    fn apply_deadzone(&self, raw: f32) -> f32 {
        if raw.abs() < self.deadzone {
            0.0
        } else {
            raw
        }
    }
}

impl Default for AxisDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_sub_threshold_value_emits_zero_once() {
        let mut debouncer = AxisDebouncer::new();

        assert_eq!(debouncer.filter(1, axis::X, 0.03), Some(0.0));
        assert_eq!(debouncer.filter(1, axis::X, 0.03), None);
        assert_eq!(debouncer.filter(1, axis::X, -0.04), None);
    }

    #[test]
    fn distinct_values_emit_once_each() {
        let mut debouncer = AxisDebouncer::new();

        assert_eq!(debouncer.filter(1, axis::X, 0.5), Some(0.5));
        assert_eq!(debouncer.filter(1, axis::X, 0.5), None);
        assert_eq!(debouncer.filter(1, axis::X, 0.6), Some(0.6));
        assert_eq!(debouncer.filter(1, axis::X, 0.01), Some(0.0));
        assert_eq!(debouncer.filter(1, axis::X, 0.0), None);
    }

    #[test]
    fn threshold_value_passes_through() {
        let mut debouncer = AxisDebouncer::new();
        assert_eq!(debouncer.filter(1, axis::Y, 0.05), Some(0.05));
        assert_eq!(debouncer.filter(1, axis::Y, -0.05), Some(-0.05));
    }

    #[test]
    fn keys_are_independent() {
        let mut debouncer = AxisDebouncer::new();

        assert_eq!(debouncer.filter(1, axis::X, 0.7), Some(0.7));
        assert_eq!(debouncer.filter(2, axis::X, 0.7), Some(0.7));
        assert_eq!(debouncer.filter(1, axis::HAT_X, 0.7), Some(0.7));
        assert_eq!(debouncer.tracked_axes(), 3);
    }

    #[test]
    fn last_value_tracks_filtered_state() {
        let mut debouncer = AxisDebouncer::new();
        assert_eq!(debouncer.last_value(3, axis::RZ), None);

        debouncer.filter(3, axis::RZ, 0.02);
        assert_eq!(debouncer.last_value(3, axis::RZ), Some(0.0));
    }

    #[test]
    fn custom_deadzone_is_applied() {
        let mut debouncer = AxisDebouncer::with_deadzone(0.2);
        assert_eq!(debouncer.filter(1, axis::Z, 0.15), Some(0.0));
        assert_eq!(debouncer.filter(1, axis::Z, 0.25), Some(0.25));
    }

    #[test]
    #[should_panic(expected = "Deadzone must be finite")]
    fn negative_deadzone_panics() {
        AxisDebouncer::with_deadzone(-0.1);
    }

    proptest! {
        #[test]
        fn sub_threshold_values_collapse_to_zero(v in -0.0499f32..0.0499) {
            let mut debouncer = AxisDebouncer::new();
            prop_assert_eq!(debouncer.filter(0, axis::X, v), Some(0.0));
            prop_assert_eq!(debouncer.filter(0, axis::X, v), None);
        }

        #[test]
        fn emitted_values_respect_deadzone(values in prop::collection::vec(-1.0f32..1.0, 1..64)) {
            let mut debouncer = AxisDebouncer::new();
            for v in values {
                if let Some(out) = debouncer.filter(0, axis::Y, v) {
                    prop_assert!(out == 0.0 || out.abs() >= DEFAULT_AXIS_DEADZONE);
                }
            }
        }
    }
}
