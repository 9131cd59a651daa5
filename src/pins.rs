#![allow(dead_code)] // Pin constants are referenced only by espidf-gated drivers

//! GPIO / peripheral pin assignments for the lamp main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// White LED channels (LEDC PWM, one channel per LED string)
// ---------------------------------------------------------------------------

/// PWM outputs for white LED strings 1–4, in channel order.
pub const WHITE_LED_GPIOS: [i32; 4] = [4, 5, 6, 7];

// ---------------------------------------------------------------------------
// Tri-color LED (discrete R/G/B, plain GPIO on/off)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// IR receiver (VS1838B-style demodulator, active-low output)
// ---------------------------------------------------------------------------

/// Digital input: idles HIGH, pulls LOW while carrier is detected.
pub const IR_RECEIVE_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the white LED strings (1 kHz — flicker-free).
pub const WHITE_PWM_FREQ_HZ: u32 = 1_000;
