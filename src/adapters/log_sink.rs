//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).  A future
//! RPC or display adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | outputs dark, white mode");
            }
            AppEvent::CommandApplied { command, after } => {
                info!(
                    "CMD   | {:?} -> stage={} mode={:?} color={} looped={}",
                    command, after.stage, after.mode, after.color_counter, after.looped,
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
        }
    }
}
