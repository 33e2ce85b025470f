//=========================================================================
// Input Classifier
//=========================================================================
//
// Stateless classification of key callbacks and packing of touch
// pointers into fixed-width slots.
//
// Key classification:
//   keycode ──► control-key table ──┐
//   unicode ──► printable ASCII  ───┴─► character (Option<u32>)
//   keycode ──► D-pad / gamepad  ──────► button (bool)
//
// A single key can yield both (D-pad up is an arrow key and a button).
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::keys;
use crate::core::event::{RawPointer, TouchPoint, TOUCH_SLOTS};

//=== KeyClassification ===================================================

/// Result of classifying one key callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyClassification {
    /// Native key value when the key produces a character or control key.
    pub character: Option<u32>,

    /// True when the key is a D-pad direction or gamepad button.
    pub button: bool,
}

impl KeyClassification {
    /// Returns true if at least one event should be emitted.
    pub fn is_recognized(&self) -> bool {
        self.character.is_some() || self.button
    }
}

/// Classifies a key from its platform keycode and resolved character.
///
/// The control-key table takes priority over the resolved character so
/// that e.g. Enter always maps to the native enter key.
pub fn classify_key(keycode: i32, unicode: u32) -> KeyClassification {
    let character = keys::control_key(keycode).or_else(|| printable_ascii(unicode));

    KeyClassification {
        character,
        button: keys::is_button(keycode),
    }
}

fn printable_ascii(unicode: u32) -> Option<u32> {
    (unicode > 0 && unicode < 128).then_some(unicode)
}

//=== Touch Packing =======================================================

/// Failure while packing touch pointers. Callers drop the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TouchError {
    /// Pointer count outside 1..=4.
    #[error("unsupported pointer count {0}")]
    PointerCount(usize),

    /// A pointer id vanished while the event was being read.
    #[error("pointer {0} missing from touch event")]
    PointerRead(i32),
}

/// Packed touch payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedTouch {
    pub count: u8,
    pub points: [TouchPoint; TOUCH_SLOTS],
}

/// Packs 1 to 4 pointers into fixed slots, ordered by pointer id.
///
/// A single pointer is taken as-is regardless of its id. For multi-touch,
/// ids `0..count` are looked up in ascending order; a missing id fails the
/// whole event.
pub fn pack_touch(pointers: &[RawPointer]) -> Result<PackedTouch, TouchError> {
    let count = pointers.len();
    if count == 0 || count > TOUCH_SLOTS {
        return Err(TouchError::PointerCount(count));
    }

    let mut points = [TouchPoint::ZERO; TOUCH_SLOTS];

    if count == 1 {
        points[0] = TouchPoint::new(pointers[0].x, pointers[0].y);
    } else {
        for (slot, id) in points.iter_mut().zip(0..count as i32) {
            let pointer = pointers
                .iter()
                .find(|p| p.id == id)
                .ok_or(TouchError::PointerRead(id))?;
            *slot = TouchPoint::new(pointer.x, pointer.y);
        }
    }

    Ok(PackedTouch {
        count: count as u8,
        points,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
