//=========================================================================
// Host Bridge: Library Root
//
// Bridge between a host platform's input/sensor callbacks and a native
// engine running on its own thread.
//
// Responsibilities:
// - Normalize key, touch, axis, sensor and GPS callbacks into a small
//   timestamped event vocabulary
// - Toggle sensor/location subscriptions on request from the native
//   side, always on the thread that owns the platform
// - Tie subscriptions to the host lifecycle
//
// Typical usage:
// ```ignore
// let (mut bridge, collector) = BridgeBuilder::new().build_with_channel(os);
// let handle = bridge.native_handle();   // → native thread
//
// bridge.resume()?;
// bridge.handle_event(raw_event);        // from OS callbacks
// bridge.pump_commands();                // once per UI loop turn
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent pieces (events, time base, input
// classification, sensor state, channels). `config` holds the tunables.
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the UI-thread dispatcher behind `Bridge`; it is not part
// of the public API surface.
//
mod bridge;
mod platform;

#[cfg(test)]
mod test_support;

//--- Public Exports ------------------------------------------------------

pub use bridge::{Bridge, BridgeBuilder, LifecycleState, NativeHandle};
pub use config::{BridgeConfig, ConfigError};
pub use crate::core::event::{NormalizedEvent, RawEvent};
pub use crate::core::platform_bridge::{
    BridgeError, EventCollector, Handling, HostPlatform, NativeEventSink, PendingCommand,
    TickControl,
};
pub use crate::core::sensor::SensorGroup;
