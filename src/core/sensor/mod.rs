//=========================================================================
// Sensors
//
// Sensor kinds, subscribable host resources, and the groups the native
// consumer toggles as a unit.
//
// Groups and families:
// ```text
//  Group            Members                      Family (lock)
//  ───────────────  ───────────────────────────  ─────────────
//  Orientation      Accelerometer + Magnetometer  orientation
//  Accelerometer    Accelerometer                 orientation
//  Magnetometer     Magnetometer                  orientation
//  Gyroscope        Gyroscope                     gyroscope
//  Gps              Gps                           gps
//  KeepScreenOn     KeepScreenOn                  keep_screen_on
// ```
//
// Groups that share hardware share a family, and a family is the unit
// of mutual exclusion.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod fusion_store;
pub mod subscription;

//=== Public API ==========================================================

pub use fusion_store::{ReadingOutcome, SensorFusionStore, SensorSample, SensorState};
pub use subscription::{SensorSubscriptionManager, SubscriptionError};

//=== SensorKind ==========================================================

/// Hardware sensors that produce 3-axis readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Accelerometer,
    Magnetometer,
    Gyroscope,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [Self::Accelerometer, Self::Magnetometer, Self::Gyroscope];

    /// Host resource backing this sensor.
    pub fn resource(self) -> HostResource {
        match self {
            Self::Accelerometer => HostResource::Accelerometer,
            Self::Magnetometer => HostResource::Magnetometer,
            Self::Gyroscope => HostResource::Gyroscope,
        }
    }
}

//=== HostResource ========================================================

/// Anything the platform can subscribe to or hold on our behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostResource {
    Accelerometer,
    Magnetometer,
    Gyroscope,
    Gps,
    KeepScreenOn,
}

impl HostResource {
    /// Sensor kind for sensor-backed resources.
    pub fn sensor(self) -> Option<SensorKind> {
        match self {
            Self::Accelerometer => Some(SensorKind::Accelerometer),
            Self::Magnetometer => Some(SensorKind::Magnetometer),
            Self::Gyroscope => Some(SensorKind::Gyroscope),
            Self::Gps | Self::KeepScreenOn => None,
        }
    }
}

//=== SensorGroup =========================================================

/// Unit the native consumer enables or disables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorGroup {
    Orientation,
    Accelerometer,
    Magnetometer,
    Gyroscope,
    Gps,
    KeepScreenOn,
}

impl SensorGroup {
    pub const ALL: [SensorGroup; 6] = [
        Self::Orientation,
        Self::Accelerometer,
        Self::Magnetometer,
        Self::Gyroscope,
        Self::Gps,
        Self::KeepScreenOn,
    ];

    /// Resources that must all be registered for the group to be enabled.
    pub fn members(self) -> &'static [HostResource] {
        match self {
            Self::Orientation => &[HostResource::Accelerometer, HostResource::Magnetometer],
            Self::Accelerometer => &[HostResource::Accelerometer],
            Self::Magnetometer => &[HostResource::Magnetometer],
            Self::Gyroscope => &[HostResource::Gyroscope],
            Self::Gps => &[HostResource::Gps],
            Self::KeepScreenOn => &[HostResource::KeepScreenOn],
        }
    }
}

//=== SubscriptionState ===================================================

/// Observable state of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubscriptionState {
    #[default]
    Disabled,
    Enabled,
}

//=========================================================================
// Unit Tests
//=========================================================================
