//=========================================================================
// Platform Subsystem
//
// UI-thread dispatcher between the host platform, the subscription
// manager, and the native consumer.
//
// Architecture:
// ```text
//  UI Thread:                                   Native Thread:
//  ┌───────────────────────────────────┐        ┌────────────────────┐
//  │  OS callbacks                     │        │  NativeHandle      │
//  │   ↓ RawEvent                      │        │   post(command)    │
//  │  handle_event()                   │        │      │             │
//  │   ├─ InputProcessor (keys/axes/   │        └──────┼─────────────┘
//  │   │   touch)                      │               │ CommandChannel
//  │   ├─ SensorSubscriptionManager    │◄──────────────┘
//  │   │   (sensor readings, fusion)   │  pump_commands()
//  │   └─ GPS fixes                    │   → enable/disable groups
//  │   ↓ NormalizedEvent               │   → HostPlatform::subscribe
//  │  NativeEventSink ─────────────────┼──────► EventCollector
//  └───────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Single owner**: the host platform value lives here and is only
//   touched from the UI thread, so every subscribe/unsubscribe happens
//   on the thread the OS expects.
// - **Deferred commands**: native requests are queued and executed on
//   the next pump, never from the native thread.
// - **Contained sink failures**: a panicking sink loses that event and
//   is logged; the UI thread keeps running.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use log::*;

//=== Internal Imports ====================================================

use crate::core::event::{NormalizedEvent, RawEvent, RawKey, Timestamp};
use crate::core::platform_bridge::{
    BridgeError, CommandReceiver, Handling, HostPlatform, NativeEventSink, PendingCommand,
};
use crate::core::sensor::{SensorGroup, SensorSubscriptionManager};
pub(crate) use input_processor::{InputProcessor, KeyState};

//=== Platform ============================================================

/// Dispatches platform callbacks and native commands on the UI thread.
///
/// Not `Send` unless `P` is: it must stay on the thread that owns the
/// platform APIs.
pub(crate) struct Platform<P: HostPlatform> {
    host: P,
    input: InputProcessor,
    sensors: Arc<SensorSubscriptionManager>,

    /// `None` once released.
    sink: Option<Arc<dyn NativeEventSink>>,

    /// `None` once released.
    commands: Option<CommandReceiver>,
    command_budget: usize,
}

impl<P: HostPlatform> Platform<P> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        host: P,
        input: InputProcessor,
        sensors: Arc<SensorSubscriptionManager>,
        sink: Arc<dyn NativeEventSink>,
        commands: CommandReceiver,
        command_budget: usize,
    ) -> Self {
        info!(target: "bridge", "Platform dispatcher initialized");
        Self {
            host,
            input,
            sensors,
            sink: Some(sink),
            commands: Some(commands),
            command_budget,
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Converts one raw callback and delivers the resulting events.
    pub(crate) fn handle_event(&mut self, event: RawEvent) -> Handling {
        if self.sink.is_none() {
            return Handling::NotHandled;
        }

        match event {
            RawEvent::KeyDown(key) => self.handle_key(&key, KeyState::Pressed),
            RawEvent::KeyUp(key) => self.handle_key(&key, KeyState::Released),

            RawEvent::AxisMove {
                device_id,
                axis,
                value,
                timestamp,
            } => {
                if let Some(event) = self.input.process_axis(device_id, axis, value, timestamp) {
                    self.emit(event);
                }
                // Suppressed samples are still consumed.
                Handling::Handled
            }

            RawEvent::Touch {
                action,
                pointers,
                timestamp,
            } => match self.input.process_touch(action, &pointers, timestamp) {
                Ok(event) => {
                    self.emit(event);
                    Handling::Handled
                }
                Err(err) => {
                    debug!(target: "bridge::input", "Dropping touch event: {}", err);
                    Handling::NotHandled
                }
            },

            RawEvent::Sensor {
                kind,
                values,
                timestamp,
            } => {
                let rotation = self.host.display_rotation();
                let timestamp = self.input.normalize(timestamp);

                match self.sensors.on_reading(kind, values, timestamp, rotation) {
                    Some(outcome) => {
                        for event in outcome.into_events() {
                            self.emit(event);
                        }
                        Handling::Handled
                    }
                    None => Handling::NotHandled,
                }
            }

            RawEvent::GpsFix(fix) => {
                if !self.sensors.is_enabled(SensorGroup::Gps) {
                    trace!(target: "bridge::sensor", "Dropping GPS fix (GPS disabled)");
                    return Handling::NotHandled;
                }
                let timestamp = self.input.normalize(Timestamp::WallClock(fix.time_ms));
                self.emit(NormalizedEvent::gps(&fix, timestamp));
                Handling::Handled
            }
        }
    }

    fn handle_key(&mut self, key: &RawKey, state: KeyState) -> Handling {
        let events = self.input.process_key(key, state);
        let handled = !events.is_empty();

        for event in events {
            self.emit(event);
        }
        Handling::from(handled)
    }

    //--- Command Execution ------------------------------------------------

    /// Executes up to the configured budget of queued commands.
    ///
    /// Returns how many commands ran. Processes nothing once released.
    pub(crate) fn pump_commands(&mut self) -> usize {
        let Some(commands) = self.commands.take() else {
            return 0;
        };

        // Failures are logged by the manager; the group stays disabled.
        let executed = commands.drain(self.command_budget, |command| {
            let _ = self.execute(command);
        });
        self.commands = Some(commands);

        if executed > 0 {
            trace!(target: "bridge::command", "Executed {} commands", executed);
        }
        executed
    }

    /// Applies one command to the subscription manager.
    ///
    /// Disabling never fails. A failed enable leaves the group disabled.
    pub(crate) fn execute(&mut self, command: PendingCommand) -> Result<(), BridgeError> {
        let group = command.group();
        debug!(target: "bridge::command", "Executing {:?}", command);

        if !command.is_enable() {
            self.sensors.disable(group, &mut self.host);
            return Ok(());
        }

        self.sensors.enable(group, &mut self.host)?;
        if group == SensorGroup::Gps {
            self.emit_last_known_location();
        }
        Ok(())
    }

    fn emit_last_known_location(&mut self) {
        if let Some(fix) = self.host.last_known_location() {
            let timestamp = self.input.normalize(Timestamp::WallClock(fix.time_ms));
            self.emit(NormalizedEvent::gps(&fix, timestamp));
        }
    }

    //--- Teardown ---------------------------------------------------------

    /// Disables every group on the host.
    pub(crate) fn disable_all(&mut self) {
        self.sensors.disable_all(&mut self.host);
    }

    /// Drops the command receiver and the sink.
    ///
    /// Later posts fail with `ChannelClosed` and a native
    /// `EventCollector` sees the disconnect once it drains.
    pub(crate) fn release(&mut self) {
        let pending = self.commands.as_ref().map_or(0, CommandReceiver::pending);
        if pending > 0 {
            debug!(target: "bridge::command", "Discarding {} queued commands", pending);
        }
        self.commands = None;
        self.sink = None;
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn host(&self) -> &P {
        &self.host
    }

    pub(crate) fn host_mut(&mut self) -> &mut P {
        &mut self.host
    }

    //--- Internal Helpers -------------------------------------------------

    fn emit(&self, event: NormalizedEvent) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        trace!(target: "bridge::native", "Delivering {:?}", event);
        if catch_unwind(AssertUnwindSafe(|| sink.deliver(event))).is_err() {
            error!(target: "bridge::native", "Native event sink panicked, event lost");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
