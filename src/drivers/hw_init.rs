//! One-shot peripheral setup.
//!
//! Arms the two event sources and the LED line, in this order:
//! 1. LED output driven low,
//! 2. ADC1 continuous conversion with the frame-done callback,
//! 3. gptimer in auto-reload mode at the initial reload, alarm callback
//!    registered, counting.
//!
//! Opening the event gate ([`events::enable_dispatch`]) is left to the
//! caller so it happens strictly after everything here succeeded.
//!
//! [`events::enable_dispatch`]: crate::events::enable_dispatch

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::digital::StatefulOutputPin;
use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::adapters::pin_led::PinLed;
use crate::config::MonitorConfig;
use crate::drivers::blink_timer::BlinkTimer;
use crate::drivers::temp_adc::TempAdc;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    TimerInitFailed(i32),
    GpioConfigFailed,
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 continuous init failed (rc={})", rc),
            Self::TimerInitFailed(rc) => write!(f, "gptimer init failed (rc={})", rc),
            Self::GpioConfigFailed => write!(f, "LED GPIO config failed"),
        }
    }
}

impl std::error::Error for HwInitError {}

/// Configure the LED, ADC and blink timer and bundle them behind the
/// port traits.  `config` must already be validated.
pub fn init_peripherals<P: StatefulOutputPin>(
    config: &MonitorConfig,
    led_pin: P,
) -> Result<HardwareAdapter<PinLed<P>>, HwInitError> {
    let led = PinLed::new(led_pin).map_err(|_| HwInitError::GpioConfigFailed)?;
    let adc = init_adc()?;
    let timer = init_timer(config)?;
    info!("hw_init: all peripherals configured");
    Ok(HardwareAdapter::new(adc, timer, led))
}

// ── ADC (continuous) ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn init_adc() -> Result<TempAdc, HwInitError> {
    use crate::config::{ADC_BITWIDTH, ADC_SAMPLE_FREQ_HZ};
    use crate::drivers::temp_adc::{ADC_FRAME_BYTES, ADC_POOL_FRAMES, on_conv_done};
    use crate::pins;

    let rc = |ret: esp_err_t| {
        if ret == ESP_OK { Ok(()) } else { Err(HwInitError::AdcInitFailed(ret)) }
    };

    let mut handle: adc_continuous_handle_t = core::ptr::null_mut();
    let handle_cfg = adc_continuous_handle_cfg_t {
        max_store_buf_size: (ADC_FRAME_BYTES * ADC_POOL_FRAMES) as u32,
        conv_frame_size: ADC_FRAME_BYTES as u32,
        ..Default::default()
    };
    // SAFETY: called once from main() before dispatch is enabled;
    // `handle` is only used through TempAdc afterwards.
    rc(unsafe { adc_continuous_new_handle(&handle_cfg, &mut handle) })?;

    let mut pattern = adc_digi_pattern_config_t {
        atten: pins::TEMP_ADC_ATTEN as u8,
        channel: pins::TEMP_ADC_CHANNEL as u8,
        unit: adc_unit_t_ADC_UNIT_1 as u8,
        bit_width: ADC_BITWIDTH as u8,
        ..Default::default()
    };
    let dig_cfg = adc_continuous_config_t {
        pattern_num: 1,
        adc_pattern: &mut pattern,
        sample_freq_hz: ADC_SAMPLE_FREQ_HZ,
        conv_mode: adc_digi_convert_mode_t_ADC_CONV_SINGLE_UNIT_1,
        format: adc_digi_output_format_t_ADC_DIGI_OUTPUT_FORMAT_TYPE2,
        ..Default::default()
    };
    // SAFETY: `pattern` outlives the call; the driver copies it.
    rc(unsafe { adc_continuous_config(handle, &dig_cfg) })?;

    let cbs = adc_continuous_evt_cbs_t {
        on_conv_done: Some(on_conv_done),
        ..Default::default()
    };
    // SAFETY: callback is a plain fn that only touches the atomic queue.
    rc(unsafe { adc_continuous_register_event_callbacks(handle, &cbs, core::ptr::null_mut()) })?;
    rc(unsafe { adc_continuous_start(handle) })?;

    info!(
        "hw_init: ADC1 CH{} continuous @ {} Hz, {} samples/frame",
        pins::TEMP_ADC_CHANNEL,
        ADC_SAMPLE_FREQ_HZ,
        crate::config::ADC_FRAME_SAMPLES
    );
    Ok(TempAdc::from_handle(handle))
}

#[cfg(not(target_os = "espidf"))]
fn init_adc() -> Result<TempAdc, HwInitError> {
    log::info!("hw_init(sim): ADC conversions injected by caller");
    Ok(TempAdc::new())
}

// ── gptimer (auto-reload) ─────────────────────────────────────

#[cfg(target_os = "espidf")]
fn init_timer(config: &MonitorConfig) -> Result<BlinkTimer, HwInitError> {
    use crate::config::TIMER_RESOLUTION_HZ;
    use crate::drivers::blink_timer::{alarm_config, on_alarm};

    let rc = |ret: esp_err_t| {
        if ret == ESP_OK { Ok(()) } else { Err(HwInitError::TimerInitFailed(ret)) }
    };

    let reload = config.initial_reload();
    let mut handle: gptimer_handle_t = core::ptr::null_mut();
    let timer_cfg = gptimer_config_t {
        clk_src: soc_periph_gptimer_clk_src_t_GPTIMER_CLK_SRC_DEFAULT,
        direction: gptimer_count_direction_t_GPTIMER_COUNT_UP,
        resolution_hz: TIMER_RESOLUTION_HZ,
        intr_priority: crate::events::EVENT_ISR_PRIORITY,
        ..Default::default()
    };
    // SAFETY: called once from main() before dispatch is enabled; the
    // handle is owned by BlinkTimer for the program lifetime.
    rc(unsafe { gptimer_new_timer(&timer_cfg, &mut handle) })?;

    let alarm = alarm_config(reload);
    rc(unsafe { gptimer_set_alarm_action(handle, &alarm) })?;

    let cbs = gptimer_event_callbacks_t {
        on_alarm: Some(on_alarm),
        ..Default::default()
    };
    // SAFETY: callback is a plain fn that only touches the atomic queue.
    rc(unsafe { gptimer_register_event_callbacks(handle, &cbs, core::ptr::null_mut()) })?;
    rc(unsafe { gptimer_enable(handle) })?;
    rc(unsafe { gptimer_start(handle) })?;

    info!(
        "hw_init: gptimer @ {} Hz, initial reload={}",
        TIMER_RESOLUTION_HZ, reload
    );
    Ok(BlinkTimer::from_handle(handle, reload))
}

#[cfg(not(target_os = "espidf"))]
fn init_timer(config: &MonitorConfig) -> Result<BlinkTimer, HwInitError> {
    log::info!("hw_init(sim): blink timer simulated");
    Ok(BlinkTimer::new(config.initial_reload()))
}
