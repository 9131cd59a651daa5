//! Lamp configuration parameters
//!
//! All tunable parameters for the lamp firmware: the remote keyset, duty
//! levels, and loop timing.  Compiled-in defaults match the shipped remote;
//! the struct stays serde-serializable for a future provisioning surface.

use serde::{Deserialize, Serialize};

/// Numeric command codes of the three remote keys the lamp reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    /// "Volume up" key — steps the lamp toward more output.
    pub volume_up: u16,
    /// "Volume down" key — steps the lamp toward less output.
    pub volume_down: u16,
    /// "Channel down" key — reduces the topmost active channel's brightness.
    pub reduce_brightness: u16,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            volume_up: 21,
            volume_down: 7,
            reduce_brightness: 69,
        }
    }
}

/// Core lamp configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LampConfig {
    /// Remote keyset this lamp listens to.
    pub keys: KeyMap,

    // --- Duty levels ---
    /// Full-brightness duty for a white channel (0-255).
    pub full_duty: u8,
    /// Duty applied by the reduce-brightness command (0-255).
    pub reduced_duty: u8,

    // --- Timing ---
    /// Delay after each handled command, so one physical key press is not
    /// interpreted as several commands (milliseconds).
    pub debounce_ms: u32,
    /// Idle sleep between decoder polls (milliseconds).
    pub poll_interval_ms: u32,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            keys: KeyMap::default(),

            // Duty levels
            full_duty: 255,
            reduced_duty: 30,

            // Timing
            debounce_ms: 10,
            poll_interval_ms: 5,
        }
    }
}
