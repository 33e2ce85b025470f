//=========================================================================
// Input
//
// Leaf components used by the UI-thread input pipeline.
//
// Responsibilities:
// - Suppress analog jitter per (device, axis) (`axis_debouncer`)
// - Classify key callbacks into character and button events
//   (`classifier`)
// - Pack touch pointers into fixed-width payloads (`classifier`)
// - Name the platform and native key vocabularies (`keys`)
//
//=========================================================================

//=== Submodules ==========================================================

pub mod axis_debouncer;
pub mod classifier;
pub mod keys;

//=== Public API ==========================================================

pub use axis_debouncer::{axis, AxisDebouncer, DEFAULT_AXIS_DEADZONE};
pub use classifier::{classify_key, pack_touch, KeyClassification, PackedTouch, TouchError};
