//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the bridge.
//
// Modules:
// - `event`: RawEvent / NormalizedEvent vocabulary
// - `time_base`: platform time domains → epoch microseconds
// - `input`: key classification, touch packing, axis debouncing
// - `sensor`: subscription state machine and orientation fusion
// - `platform_bridge`: host/native contracts, command channel, collector
//
// Nothing here touches the OS directly; the host platform is reached
// only through the `HostPlatform` trait.
//
//=========================================================================

pub mod event;
pub mod input;
pub mod platform_bridge;
pub mod sensor;
pub mod time_base;
