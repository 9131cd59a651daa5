//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   RemotePort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                  │      LampService      │
//! LedOutputPort ◀──│  state machine · render│
//!                  └──────────────────────┘
//! ```
//!
//! Driven adapters (the IR receiver, the LED drivers, the log sink)
//! implement these traits.  The service consumes them via generics, so the
//! domain core never touches hardware directly.

use crate::lamp::render::ColorChannel;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Remote port (driven adapter: IR receiver → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the poll loop asks this for decoded remote frames.
pub trait RemotePort {
    /// Pump the decoder; true when a decoded frame is waiting.
    fn has_pending_command(&mut self) -> bool;

    /// Whether the waiting frame is a held-key repeat (these are ignored).
    fn is_repeat(&self) -> bool;

    /// Consume the waiting frame as `(address, command)`.
    fn read_command(&mut self) -> (u16, u16);
}

// ───────────────────────────────────────────────────────────────
// LED output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the service renders lamp state through this.
///
/// The driver is stateless about color mutual exclusion — the service
/// clears the other legs before asserting one.
pub trait LedOutputPort {
    /// Drive one white string.  `enabled == false` forces the output dark
    /// regardless of `duty`.
    fn set_white_channel(&mut self, index: usize, duty: u8, enabled: bool);

    /// Switch one leg of the tri-color LED.
    fn set_color_channel(&mut self, channel: ColorChannel, enabled: bool);

    /// Kill every output — safe startup baseline.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
