//=========================================================================
// Host Bridge
//
// Entry point and lifecycle owner of the bridge.
//
// Architecture:
// ```text
//     BridgeBuilder  ──build()──>  Bridge<P>  (UI thread)
//         │                          │
//         ├─ with_config()           ├─ handle_event()   OS callbacks
//         ├─ with_axis_deadzone()    ├─ pump_commands()  queued commands
//         ├─ with_command_budget()   ├─ resume/pause/destroy
//         ├─ with_event_capacity()   └─ native_handle() ──> NativeHandle
//         └─ with_clock()                                  (native thread)
// ```
//
// Lifecycle:
// ```text
//   Created ──resume──► Active ◄──resume── Inactive
//                         └─────pause──────►  │
//   any (but Destroyed) ──destroy──► Destroyed
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::config::BridgeConfig;
use crate::core::event::RawEvent;
use crate::core::input::AxisDebouncer;
use crate::core::platform_bridge::{
    command_channel, BridgeError, ChannelSink, CommandSender, EventCollector, Handling,
    HostPlatform, NativeEventSink, PendingCommand,
};
use crate::core::sensor::{SensorGroup, SensorSubscriptionManager, SubscriptionState};
use crate::core::time_base::{Clock, SystemClock, TimeBase};
use crate::platform::{InputProcessor, Platform};

//=== LifecycleState ======================================================

/// Host lifecycle as seen by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Created,
    Active,
    Inactive,
    Destroyed,
}

impl LifecycleState {
    /// Validates a transition to `to`.
    fn transition(self, to: LifecycleState) -> Result<LifecycleState, BridgeError> {
        use LifecycleState::*;

        match (self, to) {
            (Created | Inactive, Active)
            | (Active, Inactive)
            | (Created | Active | Inactive, Destroyed) => Ok(to),
            (from, to) => Err(BridgeError::InvalidTransition { from, to }),
        }
    }
}

//=== BridgeBuilder =======================================================

/// Builder for configuring and constructing a [`Bridge`].
///
/// # Default Values
///
/// - **Axis deadzone**: 0.05
/// - **Command budget**: 100 commands per pump
/// - **Event capacity**: 256 events (channel sink only)
/// - **Clock**: [`SystemClock`]
///
/// # Examples
///
/// ```no_run
/// use host_bridge::{BridgeBuilder, HostPlatform, PendingCommand};
/// # use host_bridge::core::sensor::{HostResource, SubscriptionError};
/// # use host_bridge::core::event::DisplayRotation;
/// # struct Os;
/// # impl HostPlatform for Os {
/// #     fn subscribe(&mut self, _: HostResource) -> Result<(), SubscriptionError> { Ok(()) }
/// #     fn unsubscribe(&mut self, _: HostResource) {}
/// #     fn display_rotation(&self) -> DisplayRotation { DisplayRotation::Deg0 }
/// # }
///
/// let (mut bridge, mut collector) = BridgeBuilder::new()
///     .with_axis_deadzone(0.1)
///     .build_with_channel(Os);
///
/// let handle = bridge.native_handle();
/// std::thread::spawn(move || {
///     handle.post(PendingCommand::EnableOrientation).ok();
///     while collector.collect_frame() == host_bridge::TickControl::Continue {
///         for event in collector.take_events() {
///             let _ = event;
///         }
///     }
/// });
///
/// bridge.resume().unwrap();
/// bridge.pump_commands();
/// ```
pub struct BridgeBuilder {
    config: BridgeConfig,
    clock: Option<Box<dyn Clock>>,
}

impl BridgeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: BridgeConfig::default(),
            clock: None,
        }
    }

    /// Replaces every tunable with `config`.
    ///
    /// # Panics
    ///
    /// Panics if the config does not validate.
    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("Bridge config rejected: {}", err);
        }
        self.config = config;
        self
    }

    /// Default: 0.05
    ///
    /// # Panics
    ///
    /// Panics unless `0.0 <= deadzone < 1.0`.
    pub fn with_axis_deadzone(mut self, deadzone: f32) -> Self {
        assert!(
            (0.0..1.0).contains(&deadzone),
            "Deadzone must be in [0, 1), got {}",
            deadzone
        );
        self.config.axis_deadzone = deadzone;
        self
    }

    /// Sets how many queued commands one [`Bridge::pump_commands`] call
    /// may execute. Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `budget == 0`.
    pub fn with_command_budget(mut self, budget: usize) -> Self {
        assert!(budget > 0, "Command budget must be positive");
        self.config.command_budget = budget;
        self
    }

    /// Sets the capacity of the channel built by
    /// [`build_with_channel`](Self::build_with_channel). Default: 256
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Event capacity must be positive");
        self.config.event_capacity = capacity;
        self
    }

    /// Replaces the clock used for timestamp conversion.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Builds a bridge delivering to `sink`.
    pub fn build<P, S>(self, host: P, sink: S) -> Bridge<P>
    where
        P: HostPlatform,
        S: NativeEventSink + 'static,
    {
        self.build_with_sink(host, Arc::new(sink))
    }

    /// Builds a bridge delivering over a bounded channel, plus the
    /// collector the native thread drains it with.
    pub fn build_with_channel<P: HostPlatform>(self, host: P) -> (Bridge<P>, EventCollector) {
        let (sink, receiver) = ChannelSink::bounded(self.config.event_capacity);
        let bridge = self.build_with_sink(host, Arc::new(sink));
        (bridge, EventCollector::new(receiver))
    }

    fn build_with_sink<P: HostPlatform>(
        self,
        host: P,
        sink: Arc<dyn NativeEventSink>,
    ) -> Bridge<P> {
        info!(
            target: "bridge",
            "Building bridge (deadzone: {}, command budget: {})",
            self.config.axis_deadzone,
            self.config.command_budget
        );

        let clock: Box<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Box::new(SystemClock::new()),
        };
        let input = InputProcessor::new(
            TimeBase::new(clock),
            AxisDebouncer::with_deadzone(self.config.axis_deadzone),
        );

        let sensors = Arc::new(SensorSubscriptionManager::new());
        let (sender, receiver) = command_channel();

        Bridge {
            state: LifecycleState::Created,
            platform: Platform::new(
                host,
                input,
                Arc::clone(&sensors),
                sink,
                receiver,
                self.config.command_budget,
            ),
            handle: NativeHandle {
                commands: sender,
                sensors,
            },
        }
    }
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Bridge ==============================================================

/// The bridge, owned by the host's UI thread.
///
/// # Thread Safety
///
/// Stays on the thread that owns `P`. The native thread talks to it only
/// through a [`NativeHandle`].
pub struct Bridge<P: HostPlatform> {
    state: LifecycleState,
    platform: Platform<P>,
    handle: NativeHandle,
}

impl<P: HostPlatform> Bridge<P> {
    //--- Lifecycle --------------------------------------------------------

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Created/Inactive → Active. No sensor side effects.
    pub fn resume(&mut self) -> Result<(), BridgeError> {
        self.transition(LifecycleState::Active)
    }

    /// Active → Inactive. Releases keep-screen-on, orientation, GPS and
    /// gyroscope regardless of what the native side requested.
    pub fn pause(&mut self) -> Result<(), BridgeError> {
        self.transition(LifecycleState::Inactive)?;
        self.platform.disable_all();
        Ok(())
    }

    /// Any → Destroyed. Releases every subscription, drops queued
    /// commands and disconnects the sink.
    pub fn destroy(&mut self) -> Result<(), BridgeError> {
        self.transition(LifecycleState::Destroyed)?;
        self.platform.disable_all();
        self.platform.release();
        Ok(())
    }

    fn transition(&mut self, to: LifecycleState) -> Result<(), BridgeError> {
        let next = self.state.transition(to)?;
        info!(target: "bridge", "Lifecycle {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    //--- Platform Callbacks -----------------------------------------------

    /// Feeds one OS callback through the bridge.
    ///
    /// Returns `NotHandled` when no event was emitted for a reason the
    /// platform should know about (unrecognized key, malformed touch,
    /// reading for a disabled sensor), and always after destroy.
    pub fn handle_event(&mut self, event: RawEvent) -> Handling {
        if self.state == LifecycleState::Destroyed {
            return Handling::NotHandled;
        }
        self.platform.handle_event(event)
    }

    /// Executes queued native commands, up to the configured budget.
    ///
    /// Only runs while Active; commands posted before resume or while
    /// paused stay queued until the next resume.
    pub fn pump_commands(&mut self) -> usize {
        if self.state != LifecycleState::Active {
            debug!(target: "bridge::command", "Not pumping commands while {:?}", self.state);
            return 0;
        }
        self.platform.pump_commands()
    }

    //--- Accessors --------------------------------------------------------

    /// Handle for the native thread.
    pub fn native_handle(&self) -> NativeHandle {
        self.handle.clone()
    }

    pub fn is_enabled(&self, group: SensorGroup) -> bool {
        self.handle.is_enabled(group)
    }

    pub fn host(&self) -> &P {
        self.platform.host()
    }

    pub fn host_mut(&mut self) -> &mut P {
        self.platform.host_mut()
    }
}

impl<P: HostPlatform> Drop for Bridge<P> {
    fn drop(&mut self) {
        if self.state != LifecycleState::Destroyed {
            // Never leave sensors registered past the bridge.
            self.platform.disable_all();
        }
    }
}

//=== NativeHandle ========================================================

/// Cloneable, `Send` handle the native thread uses to request
/// subscription changes and observe group state.
#[derive(Debug, Clone)]
pub struct NativeHandle {
    commands: CommandSender,
    sensors: Arc<SensorSubscriptionManager>,
}

impl NativeHandle {
    /// Queues a command for the UI thread. Never blocks.
    ///
    /// After destroy this returns [`BridgeError::ChannelClosed`], which
    /// callers may ignore.
    pub fn post(&self, command: PendingCommand) -> Result<(), BridgeError> {
        self.commands.post(command)
    }

    /// Queues a command by wire code.
    pub fn post_code(&self, code: i32) -> Result<(), BridgeError> {
        self.commands.post_code(code)
    }

    pub fn state(&self, group: SensorGroup) -> SubscriptionState {
        self.sensors.state(group)
    }

    pub fn is_enabled(&self, group: SensorGroup) -> bool {
        self.sensors.is_enabled(group)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
