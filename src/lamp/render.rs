//! Output composition — turns a [`LampState`] into concrete channel drives.
//!
//! `compose` is a pure function; applying the resulting [`OutputFrame`] to
//! hardware is the service's job.  Two guarantees hold for every frame:
//!
//! - at most one color channel is ever selected, and
//! - white strings beyond the lit count are explicitly forced off, so a
//!   shrinking count never leaves stale strings lit.

use crate::config::LampConfig;

use super::{LampState, WHITE_CHANNELS};

/// One leg of the tri-color LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    /// All legs, in a fixed order for clear-then-assert iteration.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];
}

/// Drive level for a single white string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelDrive {
    pub duty: u8,
    pub enabled: bool,
}

/// Everything the output hardware needs for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFrame {
    pub white: [ChannelDrive; WHITE_CHANNELS],
    pub color: Option<ColorChannel>,
}

impl OutputFrame {
    pub fn all_off() -> Self {
        Self {
            white: [ChannelDrive::default(); WHITE_CHANNELS],
            color: None,
        }
    }

    /// Number of white strings this frame drives.
    pub fn lit_white_count(&self) -> usize {
        self.white.iter().filter(|drive| drive.enabled).count()
    }
}

/// Compose the output frame for the current state.
pub fn compose(state: &LampState, config: &LampConfig) -> OutputFrame {
    if state.in_color_cycle() {
        match state.color_counter() {
            1 => color_frame(ColorChannel::Red),
            2 => color_frame(ColorChannel::Green),
            3 => color_frame(ColorChannel::Blue),
            // Unreachable under the documented invariants; light every white
            // string rather than going dark.
            _ => white_frame(state, config, WHITE_CHANNELS as u8),
        }
    } else {
        match state.led_state() {
            0 => OutputFrame::all_off(),
            count @ 1..=4 => white_frame(state, config, count),
            5 => color_frame(ColorChannel::Red),
            6 => color_frame(ColorChannel::Green),
            _ => color_frame(ColorChannel::Blue),
        }
    }
}

fn white_frame(state: &LampState, config: &LampConfig, count: u8) -> OutputFrame {
    let mut frame = OutputFrame::all_off();
    for (index, drive) in frame.white.iter_mut().enumerate() {
        if (index as u8) < count {
            let duty = if state.is_reduced(index) {
                state.brightness(index)
            } else {
                config.full_duty
            };
            *drive = ChannelDrive {
                duty,
                enabled: true,
            };
        }
    }
    frame
}

fn color_frame(channel: ColorChannel) -> OutputFrame {
    OutputFrame {
        white: [ChannelDrive::default(); WHITE_CHANNELS],
        color: Some(channel),
    }
}
