//! NEC infrared receiver: ISR edge capture plus pulse-train decoding.
//!
//! The demodulator output is sampled on every GPIO edge.  The ISR measures
//! the duration of the level that just ended and pushes it into a lock-free
//! SPSC ring; the main loop drains the ring through [`NecDecoder`], a pure
//! state machine over (level, duration) pairs:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ GPIO ISR    │────▶│  Edge ring   │────▶│  NecDecoder  │──▶ IrFrame
//! │ (producer)  │     │  (lock-free) │     │ (main loop)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! NEC framing: 9 ms leader burst, 4.5 ms gap, then 32 bits LSB-first
//! (address, inverted address, command, inverted command), each bit a
//! 562.5 µs burst followed by a short (0) or long (1) gap.  A held key
//! sends repeat frames: 9 ms burst, 2.25 ms gap, one tail burst.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use heapless::Deque;

// ───────────────────────────────────────────────────────────────
// Decoded frames
// ───────────────────────────────────────────────────────────────

/// One decoded transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrFrame {
    /// 8-bit address for classic frames, full 16 bits for extended NEC.
    pub address: u16,
    /// Decoded command byte (widened; upper byte always zero).
    pub command: u16,
    /// True for held-key repeat frames; carries the last accepted code.
    pub repeat: bool,
}

// ───────────────────────────────────────────────────────────────
// ISR → main-loop edge ring (lock-free SPSC)
// ───────────────────────────────────────────────────────────────
//
// The GPIO ISR writes (produces), the poll loop reads (consumes).
// Atomic head/tail indices; the buffer lives in a static so the ISR
// callback can reach it.  Level is packed into the top bit of each
// 32-bit record, duration (µs) into the rest.

/// Power of 2 for efficient ring modulo; a full 32-bit frame is 67 edges.
const EDGE_QUEUE_CAP: usize = 128;

const LEVEL_LOW_FLAG: u32 = 1 << 31;
const DT_MASK: u32 = LEVEL_LOW_FLAG - 1;

static EDGE_HEAD: AtomicU8 = AtomicU8::new(0);
static EDGE_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: accessed exclusively through push_edge (ISR, single producer)
// and pop_edge (poll loop, single consumer); the atomics above enforce
// the SPSC discipline.
static mut EDGE_BUFFER: [u32; EDGE_QUEUE_CAP] = [0; EDGE_QUEUE_CAP];

/// Timestamp of the previous edge (µs, wrapping).
static LAST_EDGE_US: AtomicU32 = AtomicU32::new(0);

/// Record an edge from ISR context.  `now_us` is a wrapping microsecond
/// clock; `level_low` is the receiver level *after* the edge.
/// Lock-free; a full ring drops the edge (the frame is then discarded by
/// the decoder as malformed).
pub fn ir_edge_isr_handler(now_us: u32, level_low: bool) {
    let last = LAST_EDGE_US.swap(now_us, Ordering::AcqRel);
    push_edge(level_low, now_us.wrapping_sub(last));
}

/// Seed the edge clock before enabling the interrupt.
pub fn seed_edge_clock(now_us: u32) {
    LAST_EDGE_US.store(now_us, Ordering::Release);
}

fn push_edge(level_low: bool, dt_us: u32) -> bool {
    let head = EDGE_HEAD.load(Ordering::Relaxed);
    let tail = EDGE_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EDGE_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Ring full — edge dropped.
    }

    let mut record = dt_us.min(DT_MASK);
    if level_low {
        record |= LEVEL_LOW_FLAG;
    }

    // SAFETY: one producer (the GPIO ISR); the slot becomes visible to the
    // consumer only after the head store below.
    unsafe {
        let slot = &raw mut EDGE_BUFFER[head as usize];
        slot.write(record);
    }

    EDGE_HEAD.store(next_head, Ordering::Release);
    true
}

fn pop_edge() -> Option<(bool, u32)> {
    let tail = EDGE_TAIL.load(Ordering::Relaxed);
    let head = EDGE_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: the slot was published by push_edge before its head store.
    let record = unsafe { *(&raw const EDGE_BUFFER[tail as usize]) };
    EDGE_TAIL.store((tail + 1) % EDGE_QUEUE_CAP as u8, Ordering::Release);

    Some((record & LEVEL_LOW_FLAG != 0, record & DT_MASK))
}

// ───────────────────────────────────────────────────────────────
// NEC pulse-train decoder
// ───────────────────────────────────────────────────────────────

// µs windows
const GLITCH_US: u32 = 120;
const LEADER_LOW_US: (u32, u32) = (7_500, 10_500);
const LEADER_HIGH_US: (u32, u32) = (3_700, 5_300);
const REPEAT_HIGH_US: (u32, u32) = (1_750, 2_750);
const BURST_US: (u32, u32) = (360, 760);
const GAP_SHORT_US: (u32, u32) = (310, 810);
const GAP_LONG_US: (u32, u32) = (1_190, 2_190);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    LeaderLow,
    LeaderHigh,
    BitBurst { n: u8, bits: u32 },
    BitGap { n: u8, bits: u32 },
    RepeatTail,
}

/// Pure NEC decoder over (level, duration) edge records.
///
/// Malformed trains silently reset to idle; there is no error path.
pub struct NecDecoder {
    phase: Phase,
    last_code: Option<(u16, u16)>,
}

impl NecDecoder {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_code: None,
        }
    }

    /// Drop any partial frame and return to idle.  The remembered last
    /// code survives, so a repeat after reset still resolves.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Feed one edge.  `level_low` is the receiver level after the edge;
    /// `dt_us` is how long the *previous* level lasted.
    pub fn feed(&mut self, level_low: bool, dt_us: u32) -> Option<IrFrame> {
        if dt_us < GLITCH_US {
            return None;
        }

        match self.phase {
            Phase::Idle => {
                if level_low {
                    self.phase = Phase::LeaderLow;
                }
                None
            }

            Phase::LeaderLow => {
                self.phase = if !level_low && in_window(dt_us, LEADER_LOW_US) {
                    Phase::LeaderHigh
                } else {
                    Phase::Idle
                };
                None
            }

            Phase::LeaderHigh => {
                if level_low && in_window(dt_us, LEADER_HIGH_US) {
                    self.phase = Phase::BitBurst { n: 0, bits: 0 };
                } else if level_low && in_window(dt_us, REPEAT_HIGH_US) {
                    self.phase = Phase::RepeatTail;
                } else {
                    self.phase = Phase::Idle;
                }
                None
            }

            Phase::RepeatTail => {
                let out = if !level_low && in_window(dt_us, BURST_US) {
                    self.last_code.map(|(address, command)| IrFrame {
                        address,
                        command,
                        repeat: true,
                    })
                } else {
                    None
                };
                self.phase = Phase::Idle;
                out
            }

            Phase::BitBurst { n, bits } => {
                self.phase = if !level_low && in_window(dt_us, BURST_US) {
                    Phase::BitGap { n, bits }
                } else {
                    Phase::Idle
                };
                None
            }

            Phase::BitGap { n, mut bits } => {
                if level_low && in_window(dt_us, GAP_LONG_US) {
                    bits |= 1u32 << n;
                } else if !(level_low && in_window(dt_us, GAP_SHORT_US)) {
                    self.phase = Phase::Idle;
                    return None;
                }

                let n = n + 1;
                if n == 32 {
                    self.phase = Phase::Idle;
                    return self.accept(bits);
                }
                self.phase = Phase::BitBurst { n, bits };
                None
            }
        }
    }

    fn accept(&mut self, bits: u32) -> Option<IrFrame> {
        let frame = validate(bits)?;
        self.last_code = Some((frame.address, frame.command));
        Some(frame)
    }
}

fn in_window(dt_us: u32, window: (u32, u32)) -> bool {
    dt_us >= window.0 && dt_us <= window.1
}

fn validate(bits: u32) -> Option<IrFrame> {
    let addr = (bits & 0xFF) as u8;
    let addr_inv = ((bits >> 8) & 0xFF) as u8;
    let cmd = ((bits >> 16) & 0xFF) as u8;
    let cmd_inv = ((bits >> 24) & 0xFF) as u8;

    if cmd ^ cmd_inv != 0xFF {
        return None;
    }

    // Classic frames carry the address twice (inverted); extended NEC
    // uses both bytes as a 16-bit address.
    let address = if addr ^ addr_inv == 0xFF {
        u16::from(addr)
    } else {
        u16::from(addr) | (u16::from(addr_inv) << 8)
    };

    Some(IrFrame {
        address,
        command: u16::from(cmd),
        repeat: false,
    })
}

// ───────────────────────────────────────────────────────────────
// Receiver front-end (main-loop side)
// ───────────────────────────────────────────────────────────────

/// Decoded frames waiting to be consumed by the poll loop.
const PENDING_CAP: usize = 8;

/// Drains the edge ring through the decoder and buffers decoded frames.
pub struct IrReceiver {
    decoder: NecDecoder,
    pending: Deque<IrFrame, PENDING_CAP>,
}

impl IrReceiver {
    pub fn new() -> Self {
        Self {
            decoder: NecDecoder::new(),
            pending: Deque::new(),
        }
    }

    /// Pump captured edges through the decoder.
    pub fn poll(&mut self) {
        while let Some((level_low, dt_us)) = pop_edge() {
            if let Some(frame) = self.decoder.feed(level_low, dt_us) {
                if self.pending.push_back(frame).is_err() {
                    // Queue full: drop the oldest frame.
                    self.pending.pop_front();
                    let _ = self.pending.push_back(frame);
                }
            }
        }
    }

    /// The oldest undelivered frame, if any.
    pub fn pending(&self) -> Option<&IrFrame> {
        self.pending.front()
    }

    /// Consume the oldest undelivered frame.
    pub fn take(&mut self) -> Option<IrFrame> {
        self.pending.pop_front()
    }
}
