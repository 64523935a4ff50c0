//! Thermoblink Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ADC1 frame-done ISR ──┐                                     │
//! │                        ├──▶ Event Queue ──▶ Monitor::dispatch│
//! │  gptimer alarm ISR ────┘    (ring buffer)   │                │
//! │                                             ├─▶ Sampler      │
//! │                                             └─▶ BlinkDriver  │
//! │                                                              │
//! │  HardwareAdapter: TempAdc · BlinkTimer · PinLed              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use thermoblink::adapters::log_sink::LogEventSink;
use thermoblink::app::service::Monitor;
use thermoblink::config::MonitorConfig;
use thermoblink::drivers::hw_init;
use thermoblink::events;

/// Main-task sleep between queue drains.  Bounds toggle latency.
const IDLE_POLL_MS: u32 = 5;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Thermoblink v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Validate constants ─────────────────────────────────
    let config = MonitorConfig::default();
    config.validate()?;

    // ── 3. Peripheral setup ───────────────────────────────────
    let peripherals = Peripherals::take()?;
    let led_pin = PinDriver::output(peripherals.pins.gpio2)?;
    let mut hw = hw_init::init_peripherals(&config, led_pin)?;

    let mut sink = LogEventSink::new();
    let mut monitor = Monitor::new(config);
    monitor.start(&mut sink);

    // ── 4. Open the event gate, only after everything is armed ──
    events::enable_dispatch();
    info!("Event sources armed. Entering dispatch loop.");

    // ── 5. Dispatch loop ──────────────────────────────────────
    loop {
        events::drain_events(|event| monitor.dispatch(event, &mut hw, &mut sink));
        FreeRtos::delay_ms(IDLE_POLL_MS);
    }
}
