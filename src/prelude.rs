//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use host_bridge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Bridge and lifecycle
pub use crate::bridge::{Bridge, BridgeBuilder, LifecycleState, NativeHandle};
pub use crate::config::BridgeConfig;

// Events
pub use crate::core::event::{
    DisplayRotation, LocationFix, NormalizedEvent, RawEvent, RawKey, RawPointer, Timestamp,
    TouchPoint,
};

// Host and native contracts
pub use crate::core::platform_bridge::{
    BridgeError, ChannelSink, EventCollector, Handling, HostPlatform, NativeEventSink,
    PendingCommand, TickControl,
};

// Sensors
pub use crate::core::sensor::{HostResource, SensorGroup, SensorKind, SubscriptionError};

// Time
pub use crate::core::time_base::{Clock, SystemClock};
