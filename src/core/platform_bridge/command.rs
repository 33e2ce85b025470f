//=========================================================================
// Pending Commands
//=========================================================================
//
// Fixed command vocabulary the native consumer uses to toggle groups.
//
// Wire format: one `i32` per (group, enable|disable) pair.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::BridgeError;
use crate::core::sensor::SensorGroup;

//=== Wire Codes ==========================================================

/// Integer command codes shared with the native consumer.
pub mod codes {
    pub const ENABLE_ACCELEROMETER: i32 = 0x0001_0000;
    pub const DISABLE_ACCELEROMETER: i32 = 0x0001_0001;
    pub const ENABLE_MAGNETOMETER: i32 = 0x0001_0002;
    pub const DISABLE_MAGNETOMETER: i32 = 0x0001_0003;
    pub const ENABLE_GPS: i32 = 0x0001_0004;
    pub const DISABLE_GPS: i32 = 0x0001_0005;
    pub const ENABLE_GYROSCOPE: i32 = 0x0001_0006;
    pub const DISABLE_GYROSCOPE: i32 = 0x0001_0007;
    pub const ENABLE_KEEP_SCREEN_ON: i32 = 0x0001_0008;
    pub const DISABLE_KEEP_SCREEN_ON: i32 = 0x0001_0009;
    pub const ENABLE_ORIENTATION: i32 = 0x0001_000A;
    pub const DISABLE_ORIENTATION: i32 = 0x0001_000B;
}

//=== PendingCommand ======================================================

/// A subscription change requested by the native consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingCommand {
    EnableOrientation,
    DisableOrientation,
    EnableGps,
    DisableGps,
    EnableGyroscope,
    DisableGyroscope,
    EnableAccelerometer,
    DisableAccelerometer,
    EnableMagnetometer,
    DisableMagnetometer,
    EnableKeepScreenOn,
    DisableKeepScreenOn,
}

impl PendingCommand {
    pub const ALL: [PendingCommand; 12] = [
        Self::EnableOrientation,
        Self::DisableOrientation,
        Self::EnableGps,
        Self::DisableGps,
        Self::EnableGyroscope,
        Self::DisableGyroscope,
        Self::EnableAccelerometer,
        Self::DisableAccelerometer,
        Self::EnableMagnetometer,
        Self::DisableMagnetometer,
        Self::EnableKeepScreenOn,
        Self::DisableKeepScreenOn,
    ];

    /// Enable command for `group`.
    pub fn enable(group: SensorGroup) -> Self {
        match group {
            SensorGroup::Orientation => Self::EnableOrientation,
            SensorGroup::Accelerometer => Self::EnableAccelerometer,
            SensorGroup::Magnetometer => Self::EnableMagnetometer,
            SensorGroup::Gyroscope => Self::EnableGyroscope,
            SensorGroup::Gps => Self::EnableGps,
            SensorGroup::KeepScreenOn => Self::EnableKeepScreenOn,
        }
    }

    /// Disable command for `group`.
    pub fn disable(group: SensorGroup) -> Self {
        match group {
            SensorGroup::Orientation => Self::DisableOrientation,
            SensorGroup::Accelerometer => Self::DisableAccelerometer,
            SensorGroup::Magnetometer => Self::DisableMagnetometer,
            SensorGroup::Gyroscope => Self::DisableGyroscope,
            SensorGroup::Gps => Self::DisableGps,
            SensorGroup::KeepScreenOn => Self::DisableKeepScreenOn,
        }
    }

    /// Group the command targets.
    pub fn group(self) -> SensorGroup {
        match self {
            Self::EnableOrientation | Self::DisableOrientation => SensorGroup::Orientation,
            Self::EnableGps | Self::DisableGps => SensorGroup::Gps,
            Self::EnableGyroscope | Self::DisableGyroscope => SensorGroup::Gyroscope,
            Self::EnableAccelerometer | Self::DisableAccelerometer => SensorGroup::Accelerometer,
            Self::EnableMagnetometer | Self::DisableMagnetometer => SensorGroup::Magnetometer,
            Self::EnableKeepScreenOn | Self::DisableKeepScreenOn => SensorGroup::KeepScreenOn,
        }
    }

    pub fn is_enable(self) -> bool {
        matches!(
            self,
            Self::EnableOrientation
                | Self::EnableGps
                | Self::EnableGyroscope
                | Self::EnableAccelerometer
                | Self::EnableMagnetometer
                | Self::EnableKeepScreenOn
        )
    }

    /// Wire code of the command.
    pub fn code(self) -> i32 {
        match self {
            Self::EnableAccelerometer => codes::ENABLE_ACCELEROMETER,
            Self::DisableAccelerometer => codes::DISABLE_ACCELEROMETER,
            Self::EnableMagnetometer => codes::ENABLE_MAGNETOMETER,
            Self::DisableMagnetometer => codes::DISABLE_MAGNETOMETER,
            Self::EnableGps => codes::ENABLE_GPS,
            Self::DisableGps => codes::DISABLE_GPS,
            Self::EnableGyroscope => codes::ENABLE_GYROSCOPE,
            Self::DisableGyroscope => codes::DISABLE_GYROSCOPE,
            Self::EnableKeepScreenOn => codes::ENABLE_KEEP_SCREEN_ON,
            Self::DisableKeepScreenOn => codes::DISABLE_KEEP_SCREEN_ON,
            Self::EnableOrientation => codes::ENABLE_ORIENTATION,
            Self::DisableOrientation => codes::DISABLE_ORIENTATION,
        }
    }
}

impl TryFrom<i32> for PendingCommand {
    type Error = BridgeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|command| command.code() == code)
            .ok_or(BridgeError::UnknownCommand(code))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<i32> = PendingCommand::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), 12);
    }

    #[test]
    fn parses_known_codes() {
        assert_eq!(
            PendingCommand::try_from(0x0001_0004),
            Ok(PendingCommand::EnableGps)
        );
        assert_eq!(
            PendingCommand::try_from(codes::DISABLE_ORIENTATION),
            Ok(PendingCommand::DisableOrientation)
        );
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            PendingCommand::try_from(0x0002_0000),
            Err(BridgeError::UnknownCommand(0x0002_0000))
        );
    }

    #[test]
    fn enable_and_disable_target_the_same_group() {
        for group in SensorGroup::ALL {
            let enable = PendingCommand::enable(group);
            let disable = PendingCommand::disable(group);

            assert_eq!(enable.group(), group);
            assert_eq!(disable.group(), group);
            assert!(enable.is_enable());
            assert!(!disable.is_enable());
        }
    }
}
