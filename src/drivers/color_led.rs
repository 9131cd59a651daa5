//! Tri-color LED driver.
//!
//! Three plain GPIO outputs, one per leg of a common-cathode RGB LED.
//! The driver is deliberately stateless about mutual exclusion — the
//! service clears the other legs before asserting one.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO levels via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::lamp::render::ColorChannel;
use crate::pins;

pub struct TriColorLed {
    current: [bool; 3],
}

impl TriColorLed {
    pub fn new() -> Self {
        Self {
            current: [false; 3],
        }
    }

    pub fn set(&mut self, channel: ColorChannel, on: bool) {
        hw_init::gpio_write(Self::gpio(channel), on);
        self.current[channel as usize] = on;
    }

    pub fn off(&mut self) {
        for channel in ColorChannel::ALL {
            self.set(channel, false);
        }
    }

    pub fn is_on(&self, channel: ColorChannel) -> bool {
        self.current[channel as usize]
    }

    fn gpio(channel: ColorChannel) -> i32 {
        match channel {
            ColorChannel::Red => pins::LED_R_GPIO,
            ColorChannel::Green => pins::LED_G_GPIO,
            ColorChannel::Blue => pins::LED_B_GPIO,
        }
    }
}
