//! Inbound commands to the lamp service.
//!
//! Raw remote key codes are mapped onto this closed set at the decoder
//! boundary, so the state machine's transition logic is exhaustively
//! checked instead of dispatching on magic numbers.

use crate::config::KeyMap;

/// Commands the remote can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Step toward more output (next white string, or next color).
    VolumeUp,
    /// Step toward less output (mode-dependent, see the state machine).
    VolumeDown,
    /// Dim the topmost lit white string to the reduced duty.
    ReduceBrightness,
    /// Any key the lamp does not react to.
    Unknown,
}

impl RemoteCommand {
    /// Map a decoded key code onto the command set.
    pub fn from_code(code: u16, keys: &KeyMap) -> Self {
        if code == keys.volume_up {
            Self::VolumeUp
        } else if code == keys.volume_down {
            Self::VolumeDown
        } else if code == keys.reduce_brightness {
            Self::ReduceBrightness
        } else {
            Self::Unknown
        }
    }
}
