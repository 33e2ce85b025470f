//=========================================================================
// Platform Bridge
//=========================================================================
//
// Seams between the host platform, the bridge, and the native consumer.
//
// Components:
// - `interface`: HostPlatform / NativeEventSink contracts and errors
// - `command`: the PendingCommand vocabulary and wire codes
// - `command_channel`: native → UI-thread command queue
// - `event_collector`: native-side draining of delivered events
//
//=========================================================================

//=== Module Declarations =================================================

pub mod command;
pub mod command_channel;
pub mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use command::{codes, PendingCommand};
pub use command_channel::{command_channel, CommandReceiver, CommandSender};
pub use event_collector::{EventCollector, TickControl, MAX_EVENTS_PER_FRAME};
pub use interface::{BridgeError, ChannelSink, Handling, HostPlatform, NativeEventSink};
