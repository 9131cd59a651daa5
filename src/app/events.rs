//! Outbound application events.
//!
//! The [`LampService`](super::service::LampService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — log to serial, publish over a future RPC
//! surface, etc.

use crate::lamp::{LampMode, LampSnapshot};

use super::commands::RemoteCommand;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The lamp service has started (outputs rendered all-off).
    Started,

    /// A command was applied; carries the state it produced.
    CommandApplied {
        command: RemoteCommand,
        after: LampSnapshot,
    },

    /// The machine moved between white and color-cycle mode.
    ModeChanged { from: LampMode, to: LampMode },
}
