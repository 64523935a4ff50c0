//! Blink cadence against the simulated drivers.
//!
//! Builds the real `HardwareAdapter` through `init_peripherals`, advances
//! the simulated blink timer one millisecond at a time, and dispatches a
//! `CompareMatch` for every alarm it raises, recording when the LED flips.

use crate::mock_hw::{RecordingSink, SimPin};

use thermoblink::adapters::hardware::HardwareAdapter;
use thermoblink::adapters::pin_led::PinLed;
use thermoblink::app::ports::LedPort;
use thermoblink::app::service::Monitor;
use thermoblink::config::{MonitorConfig, TICKS_PER_MS};
use thermoblink::drivers::hw_init::init_peripherals;
use thermoblink::events::Event;

struct Bench {
    monitor: Monitor,
    hw: HardwareAdapter<PinLed<SimPin>>,
    sink: RecordingSink,
    now_ms: u32,
    toggles_at: Vec<u32>,
}

impl Bench {
    fn new() -> Self {
        let config = MonitorConfig::default();
        let hw = init_peripherals(&config, SimPin::default()).unwrap();
        let mut sink = RecordingSink::default();
        let mut monitor = Monitor::new(config);
        monitor.start(&mut sink);
        Self {
            monitor,
            hw,
            sink,
            now_ms: 0,
            toggles_at: Vec::new(),
        }
    }

    /// Complete a conversion whose high byte is `reading`.
    fn sample(&mut self, reading: u8) {
        self.hw.adc_mut().sim_set_raw(u16::from(reading) << 4);
        self.monitor
            .dispatch(Event::ConversionComplete, &mut self.hw, &mut self.sink);
    }

    fn run_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.now_ms += 1;
            let matches = self.hw.timer_mut().advance(TICKS_PER_MS);
            for _ in 0..matches {
                let before = self.hw.is_on();
                self.monitor
                    .dispatch(Event::CompareMatch, &mut self.hw, &mut self.sink);
                assert_ne!(before, self.hw.is_on(), "LED must flip on every match");
                self.toggles_at.push(self.now_ms);
            }
        }
    }
}

#[test]
fn cold_reading_blinks_every_250ms() {
    let mut b = Bench::new();
    b.sample(10);
    b.run_ms(1_000);
    assert_eq!(b.toggles_at, [250, 500, 750, 1_000]);
}

#[test]
fn hot_reading_blinks_every_500ms() {
    let mut b = Bench::new();
    b.sample(30);
    b.run_ms(1_000);
    assert_eq!(b.toggles_at, [500, 1_000]);
}

#[test]
fn before_first_sample_timer_runs_at_initial_period() {
    let mut b = Bench::new();
    b.run_ms(2_000);
    assert_eq!(b.toggles_at, [1_000, 2_000]);
}

#[test]
fn rate_change_restarts_phase_at_the_sample() {
    let mut b = Bench::new();
    b.sample(10);
    b.run_ms(600);
    b.sample(40);
    b.run_ms(1_000);
    assert_eq!(b.toggles_at, [250, 500, 1_100, 1_600]);
}

#[test]
fn repeated_same_side_samples_delay_the_next_toggle() {
    let mut b = Bench::new();
    b.sample(5);
    b.run_ms(200);
    b.sample(5);
    b.run_ms(300);
    assert_eq!(b.toggles_at, [450], "self-transition restarts the phase too");
}

#[test]
fn pin_follows_cached_level() {
    let mut b = Bench::new();
    b.sample(0);
    b.run_ms(250);
    assert!(b.hw.led().is_on());
    b.run_ms(250);
    assert!(!b.hw.led().is_on());
}
