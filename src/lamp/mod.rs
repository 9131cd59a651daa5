//! The lamp state machine — pure domain logic, zero I/O.
//!
//! A single integer stage plus a color-cycle sub-state determine what the
//! hardware shows:
//!
//! ```text
//!   stage 0        all outputs off
//!   stage 1..4     that many white strings lit
//!   stage 5/6/7    red / green / blue selected (white mode)
//!
//!   volume-up past stage 7 enters color-cycle mode:
//!
//!   RED(1) ──up──▶ GREEN(2) ──up──▶ BLUE(3) ──up──▶ RED(1), looped += 1
//!
//!   volume-down unwinds completed sweeps before dropping back to white
//!   mode; volume-down below stage 5 turns white strings off one at a time.
//! ```
//!
//! Every transition is total: counters clamp at their bounds instead of
//! erroring, so the machine can absorb arbitrary input sequences.

pub mod render;

use crate::config::LampConfig;

/// Number of individually driven white LED strings.
pub const WHITE_CHANNELS: usize = 4;

/// Highest stage in white mode (stages 5–7 select a color channel).
const TOP_STAGE: u8 = 7;

/// Operating mode, derived from the color-cycle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampMode {
    /// Stages 0–7: white strings accumulate, then single colors.
    White,
    /// The tri-color LED cycles red → green → blue on each volume-up.
    ColorCycle,
}

/// Point-in-time view of the machine, for logging and event payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampSnapshot {
    pub stage: u8,
    pub mode: LampMode,
    pub color_counter: u8,
    pub looped: u8,
}

/// The complete lamp state.  One instance lives for the program lifetime,
/// mutated only by the three command operations below and read only by
/// [`render::compose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LampState {
    /// Current stage, clamped to `[0, 7]`.
    led_state: u8,
    /// True while in color-cycle mode.
    toggle_colors: bool,
    /// Selected color while cycling: red(1) / green(2) / blue(3).
    color_counter: u8,
    /// Completed red→green→blue sweeps still to be unwound.
    looped: u8,
    /// Target duty per white string.
    brightness: [u8; WHITE_CHANNELS],
    /// String had its brightness explicitly reduced.
    reduced: [bool; WHITE_CHANNELS],
}

impl LampState {
    pub fn new(config: &LampConfig) -> Self {
        Self {
            led_state: 0,
            toggle_colors: false,
            color_counter: 1,
            looped: 0,
            brightness: [config.full_duty; WHITE_CHANNELS],
            reduced: [false; WHITE_CHANNELS],
        }
    }

    // ── Command operations ────────────────────────────────────

    /// Step toward "more on".
    pub fn volume_up(&mut self) {
        if self.toggle_colors {
            self.cycle_color();
        } else {
            self.advance_stage();
        }
    }

    /// Step toward "less on".  Mode-dependent: backs out of the single-color
    /// stages first, unwinds color sweeps second, turns white strings off
    /// last.
    pub fn volume_down(&mut self, config: &LampConfig) {
        if self.led_state > WHITE_CHANNELS as u8 && !self.toggle_colors {
            self.step_back_color_stage();
        } else if self.toggle_colors {
            self.unwind_sweep();
        } else {
            self.turn_off_top(config);
        }
    }

    /// Dim the topmost currently lit white string to the configured reduced
    /// duty.  Returns `false` (and changes nothing) when no white string is
    /// lit — including the single-color stages and color-cycle mode.
    pub fn reduce_brightness(&mut self, config: &LampConfig) -> bool {
        if self.led_state == 0 || self.led_state > WHITE_CHANNELS as u8 {
            return false;
        }
        let top = self.led_state as usize - 1;
        self.brightness[top] = config.reduced_duty;
        self.reduced[top] = true;
        true
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn led_state(&self) -> u8 {
        self.led_state
    }

    pub fn in_color_cycle(&self) -> bool {
        self.toggle_colors
    }

    pub fn mode(&self) -> LampMode {
        if self.toggle_colors {
            LampMode::ColorCycle
        } else {
            LampMode::White
        }
    }

    pub fn color_counter(&self) -> u8 {
        self.color_counter
    }

    pub fn looped(&self) -> u8 {
        self.looped
    }

    pub fn brightness(&self, index: usize) -> u8 {
        self.brightness[index]
    }

    pub fn is_reduced(&self, index: usize) -> bool {
        self.reduced[index]
    }

    pub fn snapshot(&self) -> LampSnapshot {
        LampSnapshot {
            stage: self.led_state,
            mode: self.mode(),
            color_counter: self.color_counter,
            looped: self.looped,
        }
    }

    // ── Internal transitions ──────────────────────────────────

    fn advance_stage(&mut self) {
        self.led_state += 1;
        if self.led_state > TOP_STAGE {
            self.led_state = TOP_STAGE;
            // Entering the cycle counts as a completed sweep, so a single
            // volume-down from here drops straight back to white mode.
            self.looped = self.looped.saturating_add(1);
            self.toggle_colors = true;
            self.color_counter = 1;
        }
    }

    fn cycle_color(&mut self) {
        self.color_counter += 1;
        if self.color_counter > 3 {
            self.color_counter = 1;
            self.looped = self.looped.saturating_add(1);
        }
    }

    fn step_back_color_stage(&mut self) {
        self.led_state = self.led_state.saturating_sub(1);
    }

    fn unwind_sweep(&mut self) {
        self.color_counter = self.color_counter.saturating_sub(1);
        if self.color_counter == 0 && self.looped > 0 {
            self.color_counter = 3;
            self.looped -= 1;
            if self.looped == 0 {
                self.toggle_colors = false;
            }
        }
    }

    fn turn_off_top(&mut self, config: &LampConfig) {
        self.led_state = self.led_state.saturating_sub(1);
        // The string that just went dark returns to full brightness.  Its
        // reduced flag intentionally survives until the next reduce.
        self.brightness[self.led_state as usize] = config.full_duty;
    }
}
