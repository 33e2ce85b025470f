//=========================================================================
// Key Codes
//
// Platform keycodes consumed by the classifier, and the native key
// vocabulary produced for character events.
//
// Platform mapping:
// - Android-style integer keycodes (`KEYCODE_*`) on the inbound side
// - 7-bit ASCII plus a small control-key range (0x100+) on the outbound
//   side
//
//=========================================================================

//=== Platform Keycodes ===================================================

/// Inbound platform keycodes the classifier recognizes.
pub mod platform {
    pub const DPAD_UP: i32 = 19;
    pub const DPAD_DOWN: i32 = 20;
    pub const DPAD_LEFT: i32 = 21;
    pub const DPAD_RIGHT: i32 = 22;
    pub const DPAD_CENTER: i32 = 23;
    pub const ENTER: i32 = 66;
    pub const DEL: i32 = 67;
    pub const PAGE_UP: i32 = 92;
    pub const PAGE_DOWN: i32 = 93;
    pub const BUTTON_A: i32 = 96;
    pub const BUTTON_B: i32 = 97;
    pub const BUTTON_X: i32 = 99;
    pub const BUTTON_Y: i32 = 100;
    pub const BUTTON_START: i32 = 108;
    pub const BUTTON_SELECT: i32 = 109;
    pub const BUTTON_MODE: i32 = 110;
    pub const ESCAPE: i32 = 111;
    pub const FORWARD_DEL: i32 = 112;
    pub const MOVE_HOME: i32 = 122;
    pub const MOVE_END: i32 = 123;
    pub const BUTTON_1: i32 = 188;
    pub const BUTTON_16: i32 = 203;

    // Not recognized by the classifier; handy in tests.
    pub const VOLUME_UP: i32 = 24;
    pub const A: i32 = 29;
}

//=== Native Keys =========================================================

/// Outbound key values for control keys.
///
/// Printable keys are sent as their 7-bit ASCII code.
pub mod native {
    pub const ENTER: u32 = 0x00A;
    pub const ESCAPE: u32 = 0x01B;
    pub const BACKSPACE: u32 = 0x008;
    pub const DELETE: u32 = 0x07F;
    pub const UP: u32 = 0x100;
    pub const DOWN: u32 = 0x101;
    pub const LEFT: u32 = 0x102;
    pub const RIGHT: u32 = 0x103;
    pub const HOME: u32 = 0x104;
    pub const END: u32 = 0x105;
    pub const PAGE_UP: u32 = 0x106;
    pub const PAGE_DOWN: u32 = 0x107;
}

//=== Lookup Helpers ======================================================

/// Maps a platform keycode to a native control key.
pub(crate) fn control_key(keycode: i32) -> Option<u32> {
    let key = match keycode {
        platform::ENTER => native::ENTER,
        platform::ESCAPE => native::ESCAPE,
        platform::DEL => native::BACKSPACE,
        platform::FORWARD_DEL => native::DELETE,
        platform::DPAD_UP => native::UP,
        platform::DPAD_DOWN => native::DOWN,
        platform::DPAD_LEFT => native::LEFT,
        platform::DPAD_RIGHT => native::RIGHT,
        platform::MOVE_HOME => native::HOME,
        platform::MOVE_END => native::END,
        platform::PAGE_UP => native::PAGE_UP,
        platform::PAGE_DOWN => native::PAGE_DOWN,
        _ => return None,
    };
    Some(key)
}

/// Returns true for D-pad directions/center and gamepad buttons.
pub(crate) fn is_button(keycode: i32) -> bool {
    matches!(
        keycode,
        platform::DPAD_UP..=platform::DPAD_CENTER
            | platform::BUTTON_A..=platform::BUTTON_MODE
            | platform::BUTTON_1..=platform::BUTTON_16
    )
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_table_covers_navigation_keys() {
        assert_eq!(control_key(platform::ENTER), Some(native::ENTER));
        assert_eq!(control_key(platform::DEL), Some(native::BACKSPACE));
        assert_eq!(control_key(platform::FORWARD_DEL), Some(native::DELETE));
        assert_eq!(control_key(platform::PAGE_DOWN), Some(native::PAGE_DOWN));
        assert_eq!(control_key(platform::A), None);
    }

    #[test]
    fn buttons_include_dpad_and_gamepad_ranges() {
        assert!(is_button(platform::DPAD_CENTER));
        assert!(is_button(platform::BUTTON_A));
        assert!(is_button(platform::BUTTON_MODE));
        assert!(is_button(platform::BUTTON_1));
        assert!(is_button(platform::BUTTON_16));
        assert!(!is_button(platform::ENTER));
        assert!(!is_button(platform::VOLUME_UP));
    }
}
