//! Interrupt-driven event delivery.
//!
//! Exactly two hardware event sources exist:
//! - ADC continuous-mode frame completion (conversion complete)
//! - Blink-timer alarm (compare match, counter auto-reloads to zero)
//!
//! ISR callbacks only push into the ring buffer below; the main task
//! drains it and runs the matching handler to completion.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────────────┐
//! │ ADC ISR      │────▶│  Event Queue │────▶│  Monitor::dispatch │
//! │ gptimer ISR  │────▶│ (ring buffer)│     │  (main task)       │
//! └──────────────┘     └──────────────┘     └────────────────────┘
//! ```
//!
//! Nothing is queued until [`enable_dispatch`] is called, so events raised
//! while peripherals are still being armed are discarded.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Maximum number of pending events (one slot stays empty).
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 8;

/// Hardware event sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// An ADC conversion frame completed; a fresh sample is latched.
    ConversionComplete = 0,
    /// The blink timer reached its reload value.
    CompareMatch = 1,
}

// ── Ring buffer ───────────────────────────────────────────────
//
// ISRs write (produce), main task reads (consume).  The two ISRs may be
// allocated different interrupt levels, so producers serialise through a
// critical section; the consumer side stays lock-free.

/// Interrupt priority requested for the blink-timer ISR (level 1, the
/// level the ADC continuous driver allocates by default).
pub const EVENT_ISR_PRIORITY: i32 = 1;

static DISPATCH_ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
static EVENT_BUFFER: [AtomicU8; EVENT_QUEUE_CAP] = [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP];

/// Open the gate: events pushed from now on are queued.
/// Call once, after every event source is armed.
pub fn enable_dispatch() {
    DISPATCH_ENABLED.store(true, Ordering::Release);
}

pub fn dispatch_enabled() -> bool {
    DISPATCH_ENABLED.load(Ordering::Acquire)
}

/// Push an event into the queue.
/// Safe to call from any ISR; concurrent producers are serialised.
/// Returns `false` if dispatch is disabled or the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    if !dispatch_enabled() {
        return false;
    }

    critical_section::with(|_| {
        let head = EVENT_HEAD.load(Ordering::Relaxed);
        let tail = EVENT_TAIL.load(Ordering::Acquire);
        let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

        if next_head == tail {
            return false; // Queue full, drop event.
        }

        EVENT_BUFFER[head as usize].store(event as u8, Ordering::Relaxed);
        EVENT_HEAD.store(next_head, Ordering::Release);
        true
    })
}

/// Pop the next event from the queue.
/// Called from the main task (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None;
    }

    let raw = EVENT_BUFFER[tail as usize].load(Ordering::Relaxed);
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::ConversionComplete),
        1 => Some(Event::CompareMatch),
        _ => None,
    }
}
