//=========================================================================
// Event Vocabulary
//
// Raw platform events (inbound) and normalized events (outbound).
//
// Event Flow:
// ```text
// OS callback (UI thread)
//         ↓
//    RawEvent            platform time domains, variable-width payloads
//         ↓
//    InputProcessor / SensorFusionStore
//         ↓
//    NormalizedEvent     epoch microseconds, fixed-width payloads
//         ↓
//    NativeEventSink
// ```
//
// Design:
// - `RawEvent` is transient: built and consumed inside one callback.
// - `NormalizedEvent` is immutable and the only type crossing the sink
//   boundary. Every timestamp is microseconds since the Unix epoch.
// - Touch payloads are always 4 slots wide (unused slots zeroed).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::sensor::SensorKind;

//=== Constants ===========================================================

/// Number of touch slots carried by every touch event.
pub const TOUCH_SLOTS: usize = 4;

//=== Timestamp ===========================================================

/// Platform timestamp tagged with the time domain it was taken in.
///
/// Different platform sources report time differently. Carrying the
/// domain with the value makes the conversion in
/// [`TimeBase`](crate::core::time_base::TimeBase) explicit instead of
/// relying on callers to pick the right formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// Milliseconds since boot (key, motion and touch callbacks).
    Uptime(i64),

    /// Nanoseconds since boot (sensor callbacks).
    UptimeNanos(i64),

    /// Milliseconds since the Unix epoch (location fixes).
    WallClock(i64),
}

//=== DisplayRotation =====================================================

/// Current display rotation as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl DisplayRotation {
    /// Builds a rotation from a count of clockwise quarter turns.
    ///
    /// Platforms report rotation as 0..=3; values outside that range wrap.
    pub fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// Rotation in degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

//=== Touch Types =========================================================

/// One pointer as reported by the platform touch callback.
///
/// `id` is the stable pointer id; the classifier looks pointers up by id
/// in ascending order, so a pointer lifting mid-gesture shows up as a
/// missing id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointer {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

impl RawPointer {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// A normalized touch slot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    /// Unused slot.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//=== RawKey ==============================================================

/// Payload of a platform key callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKey {
    /// Platform keycode.
    pub keycode: i32,

    /// Character the platform resolves for this key with no modifiers
    /// applied, or 0 when the key produces none.
    pub unicode: u32,

    /// Platform modifier (meta) mask, forwarded untouched.
    pub meta: i32,

    /// Input device that produced the key.
    pub device_id: i32,

    pub timestamp: Timestamp,
}

//=== LocationFix =========================================================

/// A location fix as delivered by the location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f32,
    pub altitude: f32,
    pub speed: f32,
    pub bearing: f32,

    /// Fix time in wall-clock milliseconds.
    pub time_ms: i64,
}

//=== RawEvent ============================================================

/// Raw event delivered by a platform callback.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    /// Key pressed.
    KeyDown(RawKey),

    /// Key released.
    KeyUp(RawKey),

    /// Analog axis moved on a joystick-class device.
    AxisMove {
        device_id: i32,
        axis: i32,
        value: f32,
        timestamp: Timestamp,
    },

    /// Touch callback with every pointer currently reported.
    Touch {
        action: i32,
        pointers: Vec<RawPointer>,
        timestamp: Timestamp,
    },

    /// Hardware sensor reading.
    Sensor {
        kind: SensorKind,
        values: [f32; 3],
        timestamp: Timestamp,
    },

    /// Location provider fix.
    GpsFix(LocationFix),
}

impl RawEvent {
    /// Convenience constructor for sensor readings (nanosecond clock).
    pub fn sensor(kind: SensorKind, values: [f32; 3], nanos: i64) -> Self {
        Self::Sensor {
            kind,
            values,
            timestamp: Timestamp::UptimeNanos(nanos),
        }
    }

    /// Timestamp of the event in its own time domain.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.timestamp,
            Self::AxisMove { timestamp, .. }
            | Self::Touch { timestamp, .. }
            | Self::Sensor { timestamp, .. } => *timestamp,
            Self::GpsFix(fix) => Timestamp::WallClock(fix.time_ms),
        }
    }
}

//=== NormalizedEvent =====================================================

/// Event delivered to the native consumer.
///
/// Every `timestamp` is microseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedEvent {
    /// Character or control key pressed.
    KeyDown { key: u32, meta: i32, timestamp: i64 },

    /// Character or control key released.
    KeyUp { key: u32, meta: i32, timestamp: i64 },

    /// Discrete button (D-pad or gamepad) pressed.
    ButtonDown {
        device_id: i32,
        keycode: i32,
        timestamp: i64,
    },

    /// Discrete button (D-pad or gamepad) released.
    ButtonUp {
        device_id: i32,
        keycode: i32,
        timestamp: i64,
    },

    /// Debounced analog axis value.
    AxisMove {
        device_id: i32,
        axis: i32,
        value: f32,
        timestamp: i64,
    },

    /// Up to four touch points; slots past `count` are zero.
    Touch {
        action: i32,
        count: u8,
        points: [TouchPoint; TOUCH_SLOTS],
        timestamp: i64,
    },

    /// Raw accelerometer triple with the display rotation at read time.
    Accelerometer {
        values: [f32; 3],
        rotation: DisplayRotation,
        timestamp: i64,
    },

    /// Raw magnetometer triple.
    Magnetometer { values: [f32; 3], timestamp: i64 },

    /// Raw gyroscope triple.
    Gyroscope { values: [f32; 3], timestamp: i64 },

    /// Combined accelerometer + magnetometer update.
    Orientation {
        accelerometer: [f32; 3],
        magnetometer: [f32; 3],
        rotation: DisplayRotation,
        timestamp: i64,
    },

    /// Location fix.
    ///
    /// `timestamp` is the fix time reported by the provider. It is exempt
    /// from per-thread ordering and may precede events already delivered.
    GpsFix {
        latitude: f64,
        longitude: f64,
        accuracy: f32,
        altitude: f32,
        speed: f32,
        bearing: f32,
        timestamp: i64,
    },
}

impl NormalizedEvent {
    /// Epoch-microsecond timestamp of the event.
    pub fn timestamp(&self) -> i64 {
        match self {
            Self::KeyDown { timestamp, .. }
            | Self::KeyUp { timestamp, .. }
            | Self::ButtonDown { timestamp, .. }
            | Self::ButtonUp { timestamp, .. }
            | Self::AxisMove { timestamp, .. }
            | Self::Touch { timestamp, .. }
            | Self::Accelerometer { timestamp, .. }
            | Self::Magnetometer { timestamp, .. }
            | Self::Gyroscope { timestamp, .. }
            | Self::Orientation { timestamp, .. }
            | Self::GpsFix { timestamp, .. } => *timestamp,
        }
    }

    /// Builds a GPS event from a fix and its already converted timestamp.
    pub fn gps(fix: &LocationFix, timestamp: i64) -> Self {
        Self::GpsFix {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy: fix.accuracy,
            altitude: fix.altitude,
            speed: fix.speed,
            bearing: fix.bearing,
            timestamp,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
