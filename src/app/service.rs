//! Lamp service — the hexagonal core.
//!
//! [`LampService`] owns the state machine and configuration.  Each handled
//! command mutates state and immediately renders the result through the
//! [`LedOutputPort`], so the hardware reflects the new state within one
//! command-processing cycle.
//!
//! ```text
//!  RemoteCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                    │      LampService        │
//!   LedOutputPort ◀──│  LampState · compose    │
//!                    └────────────────────────┘
//! ```

use log::info;

use crate::config::LampConfig;
use crate::lamp::render::{self, ColorChannel};
use crate::lamp::LampState;

use super::commands::RemoteCommand;
use super::events::AppEvent;
use super::ports::{EventSink, LedOutputPort};

/// The application service orchestrates all domain logic.
pub struct LampService {
    state: LampState,
    config: LampConfig,
    commands_handled: u64,
}

impl LampService {
    /// Construct the service from configuration.  Does **not** touch
    /// hardware — call [`start`](Self::start) next.
    pub fn new(config: LampConfig) -> Self {
        let state = LampState::new(&config);
        Self {
            state,
            config,
            commands_handled: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force every output dark and announce the initial (all-off) state.
    pub fn start(&mut self, hw: &mut impl LedOutputPort, sink: &mut impl EventSink) {
        hw.all_off();
        sink.emit(&AppEvent::Started);
        info!("LampService started, stage {}", self.state.led_state());
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply one decoded remote command, then render.
    ///
    /// `Unknown` commands and a reduce with nothing lit are ignored without
    /// rendering; every transition is total so there is no error path.
    pub fn handle_command(
        &mut self,
        command: RemoteCommand,
        hw: &mut impl LedOutputPort,
        sink: &mut impl EventSink,
    ) {
        let mode_before = self.state.mode();

        match command {
            RemoteCommand::VolumeUp => self.state.volume_up(),
            RemoteCommand::VolumeDown => self.state.volume_down(&self.config),
            RemoteCommand::ReduceBrightness => {
                if !self.state.reduce_brightness(&self.config) {
                    return;
                }
            }
            RemoteCommand::Unknown => return,
        }

        self.commands_handled += 1;
        self.render(hw);

        sink.emit(&AppEvent::CommandApplied {
            command,
            after: self.state.snapshot(),
        });

        let mode_after = self.state.mode();
        if mode_before != mode_after {
            sink.emit(&AppEvent::ModeChanged {
                from: mode_before,
                to: mode_after,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &LampState {
        &self.state
    }

    pub fn config(&self) -> &LampConfig {
        &self.config
    }

    /// Total commands applied since startup.
    pub fn commands_handled(&self) -> u64 {
        self.commands_handled
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate the composed frame into port calls.
    ///
    /// Color legs are cleared before one is asserted, so at most one is
    /// ever driven; white strings beyond the lit count are explicitly
    /// disabled.
    fn render(&self, hw: &mut impl LedOutputPort) {
        let frame = render::compose(&self.state, &self.config);

        for (index, drive) in frame.white.iter().enumerate() {
            hw.set_white_channel(index, drive.duty, drive.enabled);
        }

        for channel in ColorChannel::ALL {
            if frame.color != Some(channel) {
                hw.set_color_channel(channel, false);
            }
        }
        if let Some(channel) = frame.color {
            hw.set_color_channel(channel, true);
        }
    }
}
