//! Monitor → Sampler / BlinkDriver → ports.
//!
//! Verifies the exact port traffic each event produces, using the
//! call-recording `MockHardware`.

use crate::mock_hw::{HwCall, MockHardware, RecordingSink};

use thermoblink::app::events::AppEvent;
use thermoblink::app::ports::{BlinkTimerPort, LedPort};
use thermoblink::app::service::Monitor;
use thermoblink::config::MonitorConfig;
use thermoblink::control::blink_rate::BlinkRate;
use thermoblink::events::Event;

const LOW_RELOAD: u32 = 250 * 15 - 1;
const HIGH_RELOAD: u32 = 500 * 15 - 1;

fn make_monitor() -> (Monitor, MockHardware, RecordingSink) {
    let config = MonitorConfig::default();
    let hw = MockHardware::armed(config.initial_reload());
    let mut sink = RecordingSink::default();
    let mut monitor = Monitor::new(config);
    monitor.start(&mut sink);
    (monitor, hw, sink)
}

#[test]
fn start_announces_initial_reload() {
    let (monitor, _hw, sink) = make_monitor();
    assert_eq!(sink.events, [AppEvent::Started { reload: 14_999 }]);
    assert_eq!(monitor.rate(), None, "no state before the first sample");
}

#[test]
fn reading_sequence_installs_expected_intervals() {
    let (mut monitor, mut hw, mut sink) = make_monitor();
    hw.queue_readings(&[10, 10, 40, 5]);

    let mut rates = Vec::new();
    for _ in 0..4 {
        hw.counter = 1_234;
        monitor.dispatch(Event::ConversionComplete, &mut hw, &mut sink);
        assert_eq!(hw.counter, 0, "every sample restarts the counter");
        assert!(hw.is_running(), "timer must be left running");
        rates.push(monitor.rate().unwrap());
    }

    assert_eq!(
        rates,
        [BlinkRate::Low, BlinkRate::Low, BlinkRate::High, BlinkRate::Low]
    );
    assert_eq!(
        hw.installed_reloads(),
        [LOW_RELOAD, LOW_RELOAD, HIGH_RELOAD, LOW_RELOAD]
    );
    assert_eq!(hw.count(HwCall::ResetCounter), 4);
    assert_eq!(monitor.samples(), 4);
}

#[test]
fn rearm_sequence_is_stop_reset_reload_start() {
    let (mut monitor, mut hw, mut sink) = make_monitor();
    hw.queue_readings(&[29]);
    monitor.dispatch(Event::ConversionComplete, &mut hw, &mut sink);
    assert_eq!(
        hw.calls,
        [
            HwCall::Read(29),
            HwCall::Stop,
            HwCall::ResetCounter,
            HwCall::SetReload(LOW_RELOAD),
            HwCall::Start,
        ]
    );
}

#[test]
fn only_state_changes_are_reported() {
    let (mut monitor, mut hw, mut sink) = make_monitor();
    hw.queue_readings(&[10, 10, 40, 5]);
    for _ in 0..4 {
        monitor.dispatch(Event::ConversionComplete, &mut hw, &mut sink);
    }

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RateChanged { from, to, reading, .. } => Some((*from, *to, *reading)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        [
            (None, BlinkRate::Low, 10),
            (Some(BlinkRate::Low), BlinkRate::High, 40),
            (Some(BlinkRate::High), BlinkRate::Low, 5),
        ]
    );
}

#[test]
fn threshold_boundary() {
    let (mut monitor, mut hw, mut sink) = make_monitor();
    hw.queue_readings(&[29, 30]);

    monitor.dispatch(Event::ConversionComplete, &mut hw, &mut sink);
    assert_eq!(monitor.rate(), Some(BlinkRate::Low));
    monitor.dispatch(Event::ConversionComplete, &mut hw, &mut sink);
    assert_eq!(monitor.rate(), Some(BlinkRate::High));
}

#[test]
fn compare_match_toggles_and_touches_nothing_else() {
    let (mut monitor, mut hw, mut sink) = make_monitor();
    let mut levels = Vec::new();
    for _ in 0..3 {
        monitor.dispatch(Event::CompareMatch, &mut hw, &mut sink);
        levels.push(hw.is_on());
    }
    assert_eq!(levels, [true, false, true]);
    assert!(hw.calls.iter().all(|c| *c == HwCall::Toggle));
    assert_eq!(monitor.toggles(), 3);
    assert_eq!(sink.events.len(), 1, "only the Started event");
}

#[test]
fn halt_stops_timer_and_clears_led() {
    let (mut monitor, mut hw, mut sink) = make_monitor();
    monitor.dispatch(Event::CompareMatch, &mut hw, &mut sink);
    assert!(hw.is_on());

    monitor.halt(&mut hw, &mut sink);
    assert!(!hw.is_running());
    assert!(!hw.is_on());
    assert_eq!(sink.events.last(), Some(&AppEvent::Halted));
}

#[test]
fn sample_after_halt_rearms_timer() {
    let (mut monitor, mut hw, mut sink) = make_monitor();
    monitor.halt(&mut hw, &mut sink);
    hw.queue_readings(&[200]);
    monitor.dispatch(Event::ConversionComplete, &mut hw, &mut sink);
    assert!(hw.is_running());
    assert_eq!(hw.reload, HIGH_RELOAD);
}
