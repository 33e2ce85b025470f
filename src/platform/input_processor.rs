//=========================================================================
// Input Processor
//=========================================================================
//
// Converts raw key, axis and touch callbacks into NormalizedEvents.
//
// Architecture:
//   RawEvent → InputProcessor → NormalizedEvent (epoch µs) → sink
//                 ├─ TimeBase        (timestamp domain conversion)
//                 ├─ classify_key    (character and/or button)
//                 ├─ AxisDebouncer   (deadzone + change suppression)
//                 └─ pack_touch      (4 fixed slots)
//
// Stateful: the debouncer remembers the last emitted value per axis and
// the time base keeps its high-water mark. Owned by the UI thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::event::{NormalizedEvent, RawKey, RawPointer, Timestamp};
use crate::core::input::{classify_key, pack_touch, AxisDebouncer, TouchError};
use crate::core::time_base::TimeBase;

//=== KeyState ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyState {
    Pressed,
    Released,
}

//=== InputProcessor ======================================================

/// Turns input callbacks into native events.
pub(crate) struct InputProcessor {
    time_base: TimeBase,
    debouncer: AxisDebouncer,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(time_base: TimeBase, debouncer: AxisDebouncer) -> Self {
        Self {
            time_base,
            debouncer,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a key callback into zero, one or two events.
    ///
    /// The character event (if any) comes first, then the button event.
    /// An empty result means the key is not recognized.
    pub(crate) fn process_key(&mut self, key: &RawKey, state: KeyState) -> Vec<NormalizedEvent> {
        let class = classify_key(key.keycode, key.unicode);
        if !class.is_recognized() {
            trace!(target: "bridge::input", "Unrecognized keycode {}", key.keycode);
            return Vec::new();
        }

        let timestamp = self.time_base.normalize(key.timestamp);
        let mut events = Vec::with_capacity(2);

        if let Some(character) = class.character {
            events.push(match state {
                KeyState::Pressed => NormalizedEvent::KeyDown {
                    key: character,
                    meta: key.meta,
                    timestamp,
                },
                KeyState::Released => NormalizedEvent::KeyUp {
                    key: character,
                    meta: key.meta,
                    timestamp,
                },
            });
        }

        if class.button {
            events.push(match state {
                KeyState::Pressed => NormalizedEvent::ButtonDown {
                    device_id: key.device_id,
                    keycode: key.keycode,
                    timestamp,
                },
                KeyState::Released => NormalizedEvent::ButtonUp {
                    device_id: key.device_id,
                    keycode: key.keycode,
                    timestamp,
                },
            });
        }

        events
    }

    /// Debounces an axis sample. `None` when nothing changed.
    pub(crate) fn process_axis(
        &mut self,
        device_id: i32,
        axis: i32,
        value: f32,
        timestamp: Timestamp,
    ) -> Option<NormalizedEvent> {
        let value = self.debouncer.filter(device_id, axis, value)?;

        Some(NormalizedEvent::AxisMove {
            device_id,
            axis,
            value,
            timestamp: self.time_base.normalize(timestamp),
        })
    }

    /// Packs a touch callback into a single event.
    pub(crate) fn process_touch(
        &mut self,
        action: i32,
        pointers: &[RawPointer],
        timestamp: Timestamp,
    ) -> Result<NormalizedEvent, TouchError> {
        let packed = pack_touch(pointers)?;

        Ok(NormalizedEvent::Touch {
            action,
            count: packed.count,
            points: packed.points,
            timestamp: self.time_base.normalize(timestamp),
        })
    }

    /// Converts a timestamp for events assembled elsewhere (sensors, GPS).
    pub(crate) fn normalize(&mut self, timestamp: Timestamp) -> i64 {
        self.time_base.normalize(timestamp)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::TouchPoint;
    use crate::core::input::axis;
    use crate::core::input::keys::{native, platform};
    use crate::test_support::FixedClock;

    // wall 50 s, uptime 1.5 s: uptime 1000 ms maps to 49_500_000 µs
    fn processor() -> InputProcessor {
        let clock = FixedClock::new(50_000, 1500);
        InputProcessor::new(TimeBase::new(Box::new(clock)), AxisDebouncer::new())
    }

    fn key(keycode: i32, unicode: u32) -> RawKey {
        RawKey {
            keycode,
            unicode,
            meta: 0x41,
            device_id: 3,
            timestamp: Timestamp::Uptime(1000),
        }
    }

    #[test]
    fn character_key_emits_key_event_with_meta() {
        let mut processor = processor();
        let events = processor.process_key(&key(platform::A, 'a' as u32), KeyState::Pressed);

        assert_eq!(
            events,
            vec![NormalizedEvent::KeyDown {
                key: 'a' as u32,
                meta: 0x41,
                timestamp: 49_500_000,
            }]
        );
    }

    #[test]
    fn dpad_emits_character_then_button() {
        let mut processor = processor();
        let events = processor.process_key(&key(platform::DPAD_UP, 0), KeyState::Released);

        assert_eq!(
            events,
            vec![
                NormalizedEvent::KeyUp {
                    key: native::UP,
                    meta: 0x41,
                    timestamp: 49_500_000,
                },
                NormalizedEvent::ButtonUp {
                    device_id: 3,
                    keycode: platform::DPAD_UP,
                    timestamp: 49_500_000,
                },
            ]
        );
    }

    #[test]
    fn gamepad_button_emits_button_only() {
        let mut processor = processor();
        let events = processor.process_key(&key(platform::BUTTON_A, 0), KeyState::Pressed);

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            NormalizedEvent::ButtonDown { device_id: 3, keycode: platform::BUTTON_A, .. }
        ));
    }

    #[test]
    fn unrecognized_key_emits_nothing() {
        let mut processor = processor();
        assert!(processor
            .process_key(&key(platform::VOLUME_UP, 0), KeyState::Pressed)
            .is_empty());
    }

    #[test]
    fn axis_is_debounced() {
        let mut processor = processor();
        let ts = Timestamp::Uptime(1000);

        let first = processor.process_axis(1, axis::X, 0.5, ts);
        let repeat = processor.process_axis(1, axis::X, 0.5, ts);
        let small = processor.process_axis(1, axis::X, 0.01, ts);

        assert_eq!(
            first,
            Some(NormalizedEvent::AxisMove {
                device_id: 1,
                axis: axis::X,
                value: 0.5,
                timestamp: 49_500_000,
            })
        );
        assert_eq!(repeat, None);
        assert!(matches!(small, Some(NormalizedEvent::AxisMove { value, .. }) if value == 0.0));
    }

    #[test]
    fn touch_packs_pointers() {
        let mut processor = processor();
        let pointers = [RawPointer::new(1, 30.0, 40.0), RawPointer::new(0, 10.0, 20.0)];

        let event = processor
            .process_touch(2, &pointers, Timestamp::Uptime(1000))
            .unwrap();

        assert_eq!(
            event,
            NormalizedEvent::Touch {
                action: 2,
                count: 2,
                points: [
                    TouchPoint::new(10.0, 20.0),
                    TouchPoint::new(30.0, 40.0),
                    TouchPoint::ZERO,
                    TouchPoint::ZERO,
                ],
                timestamp: 49_500_000,
            }
        );
    }

    #[test]
    fn touch_errors_are_reported() {
        let mut processor = processor();
        assert_eq!(
            processor.process_touch(0, &[], Timestamp::Uptime(1000)),
            Err(TouchError::PointerCount(0))
        );
    }
}
