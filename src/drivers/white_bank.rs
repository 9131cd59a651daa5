//! White LED bank driver.
//!
//! Four LEDC PWM channels, one per white LED string.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives LEDC duty registers via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::lamp::WHITE_CHANNELS;

pub struct WhiteLedBank {
    /// (duty, enabled) per string, as last written to hardware.
    current: [(u8, bool); WHITE_CHANNELS],
}

impl WhiteLedBank {
    pub fn new() -> Self {
        Self {
            current: [(0, false); WHITE_CHANNELS],
        }
    }

    /// Drive one string.  A disabled string is forced to duty 0.
    pub fn set(&mut self, index: usize, duty: u8, enabled: bool) {
        if index >= WHITE_CHANNELS {
            debug_assert!(false, "white channel index out of range: {index}");
            return;
        }
        let duty_out = if enabled { duty } else { 0 };
        hw_init::ledc_set(hw_init::LEDC_CH_WHITE[index], duty_out);
        self.current[index] = (duty_out, enabled);
    }

    pub fn all_off(&mut self) {
        for index in 0..WHITE_CHANNELS {
            self.set(index, 0, false);
        }
    }

    /// Last written (duty, enabled) for a string.
    pub fn current(&self, index: usize) -> (u8, bool) {
        self.current[index]
    }
}
