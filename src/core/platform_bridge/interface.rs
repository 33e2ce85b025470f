//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contracts between the bridge and its two external collaborators:
//
// - `HostPlatform`: the OS sensor/location/window APIs (UI thread only)
// - `NativeEventSink`: the native consumer of NormalizedEvents
//
// Plus the error and outcome types that cross those boundaries.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::warn;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::bridge::LifecycleState;
use crate::core::event::{DisplayRotation, LocationFix, NormalizedEvent};
use crate::core::sensor::{HostResource, SubscriptionError};

//=== HostPlatform ========================================================

/// OS APIs the bridge drives.
///
/// Implementations are owned by the UI thread and are never required to
/// be `Send`: the bridge only calls them from the thread that owns the
/// [`Bridge`](crate::Bridge).
pub trait HostPlatform {
    /// Registers for updates from `resource` (or sets the window flag for
    /// [`HostResource::KeepScreenOn`]).
    ///
    /// Returns [`SubscriptionError::Unavailable`] when the resource is
    /// absent or permission is denied.
    fn subscribe(&mut self, resource: HostResource) -> Result<(), SubscriptionError>;

    /// Releases `resource`. Releasing an unregistered resource is a no-op.
    fn unsubscribe(&mut self, resource: HostResource);

    /// Current display rotation.
    fn display_rotation(&self) -> DisplayRotation;

    /// Last fix known to the location provider, if any.
    fn last_known_location(&self) -> Option<LocationFix> {
        None
    }
}

//=== NativeEventSink =====================================================

/// Outbound contract to the native consumer.
///
/// Delivery is fire-and-forget: implementations must not block for an
/// unbounded time and have no way to report failure to the emitter.
pub trait NativeEventSink: Send + Sync {
    fn deliver(&self, event: NormalizedEvent);
}

impl<F> NativeEventSink for F
where
    F: Fn(NormalizedEvent) + Send + Sync,
{
    fn deliver(&self, event: NormalizedEvent) {
        self(event)
    }
}

//=== ChannelSink =========================================================

/// Sink that forwards events over a bounded channel to the native thread.
///
/// Full or disconnected channels drop the event with a warning.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<NormalizedEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver the native thread drains.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn bounded(capacity: usize) -> (Self, Receiver<NormalizedEvent>) {
        assert!(capacity > 0, "Event capacity must be positive");
        let (sender, receiver) = bounded(capacity);
        (Self { sender }, receiver)
    }
}

impl NativeEventSink for ChannelSink {
    fn deliver(&self, event: NormalizedEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(target: "bridge::native", "Event queue full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "bridge::native", "Native consumer gone, dropping event");
            }
        }
    }
}

//=== Handling ============================================================

/// Outcome of a platform callback.
///
/// `NotHandled` is the explicit "degrade to no-op" result: no event was
/// emitted and the platform may apply its default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handling {
    Handled,
    NotHandled,
}

impl Handling {
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

impl From<bool> for Handling {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Handled
        } else {
            Self::NotHandled
        }
    }
}

//=== BridgeError =========================================================

/// Non-fatal bridge errors.
///
/// None of these are fatal; callers may log or ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Command posted after the owning side was torn down.
    #[error("command channel closed")]
    ChannelClosed,

    /// Integer command code outside the known vocabulary.
    #[error("unknown command code {0:#010x}")]
    UnknownCommand(i32),

    /// Lifecycle event not valid in the current state.
    #[error("invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },

    /// A group could not be enabled.
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn gyro(timestamp: i64) -> NormalizedEvent {
        NormalizedEvent::Gyroscope {
            values: [0.0; 3],
            timestamp,
        }
    }

    #[test]
    fn closures_are_sinks() {
        let seen = Mutex::new(Vec::new());
        let sink = |event: NormalizedEvent| seen.lock().unwrap().push(event);

        sink.deliver(gyro(1));

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn channel_sink_forwards_events() {
        let (sink, rx) = ChannelSink::bounded(4);
        sink.deliver(gyro(1));
        assert_eq!(rx.try_recv().unwrap(), gyro(1));
    }

    #[test]
    fn channel_sink_drops_when_full() {
        let (sink, rx) = ChannelSink::bounded(1);
        sink.deliver(gyro(1));
        sink.deliver(gyro(2));

        assert_eq!(rx.try_recv().unwrap(), gyro(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_sink_survives_disconnect() {
        let (sink, rx) = ChannelSink::bounded(1);
        drop(rx);
        sink.deliver(gyro(1));
    }

    #[test]
    #[should_panic(expected = "Event capacity must be positive")]
    fn channel_sink_rejects_zero_capacity() {
        ChannelSink::bounded(0);
    }

    #[test]
    fn handling_from_bool() {
        assert_eq!(Handling::from(true), Handling::Handled);
        assert!(!Handling::from(false).is_handled());
    }

    #[test]
    fn error_messages() {
        assert_eq!(BridgeError::ChannelClosed.to_string(), "command channel closed");
        assert_eq!(
            BridgeError::UnknownCommand(0x42).to_string(),
            "unknown command code 0x00000042"
        );
    }
}
