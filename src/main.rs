//! Irlamp Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single cooperative poll loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  IrRemoteAdapter    LedOutputAdapter    LogEventSink     │
//! │  (RemotePort)       (LedOutputPort)     (EventSink)      │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            LampService (pure logic)            │      │
//! │  │          state machine · render                │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop polls the remote; every non-repeat frame with a recognised
//! key code becomes exactly one state transition followed by a render and
//! a short debounce sleep.  There is no exit path.

#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{debug, info, warn};

use irlamp::adapters::hardware::LedOutputAdapter;
use irlamp::adapters::log_sink::LogEventSink;
use irlamp::adapters::remote::IrRemoteAdapter;
use irlamp::app::commands::RemoteCommand;
use irlamp::app::ports::RemotePort;
use irlamp::app::service::LampService;
use irlamp::config::LampConfig;
use irlamp::drivers::color_led::TriColorLed;
use irlamp::drivers::hw_init;
use irlamp::drivers::ir_receiver::IrReceiver;
use irlamp::drivers::white_bank::WhiteLedBank;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("irlamp v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        // Without edge capture the lamp cannot hear the remote, but the
        // outputs are still driven to a safe all-off state below.
        warn!("ISR service init failed: {} — remote input disabled", e);
    }

    // ── 3. Construct adapters ─────────────────────────────────
    let config = LampConfig::default();
    let mut hw = LedOutputAdapter::new(WhiteLedBank::new(), TriColorLed::new());
    let mut remote = IrRemoteAdapter::new(IrReceiver::new());
    let mut sink = LogEventSink::new();

    // ── 4. Construct the lamp service ─────────────────────────
    let mut lamp = LampService::new(config.clone());
    lamp.start(&mut hw, &mut sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    let debounce = Duration::from_millis(u64::from(config.debounce_ms));
    let poll_interval = Duration::from_millis(u64::from(config.poll_interval_ms));

    loop {
        if remote.has_pending_command() {
            if remote.is_repeat() {
                // Held-key repeats are filtered at the boundary.
                let _ = remote.read_command();
            } else {
                let (address, code) = remote.read_command();
                let command = RemoteCommand::from_code(code, &config.keys);
                if command == RemoteCommand::Unknown {
                    debug!("ignoring key code {} (addr {:#06x})", code, address);
                } else {
                    lamp.handle_command(command, &mut hw, &mut sink);
                    thread::sleep(debounce);
                }
            }
        }

        thread::sleep(poll_interval);
    }
}
