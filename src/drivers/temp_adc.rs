//! LM35 temperature ADC (ADC1 continuous mode).
//!
//! Peripheral setup starts the converter free-running at
//! [`ADC_SAMPLE_FREQ_HZ`](crate::config::ADC_SAMPLE_FREQ_HZ); every
//! [`ADC_FRAME_SAMPLES`] conversions the driver raises a frame-done
//! interrupt, which is this system's conversion-complete event.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the ISR only queues [`Event::ConversionComplete`]; `read()`
//! empties the driver pool and keeps the newest sample for our channel,
//! so a dropped event never leaves the reading a frame behind.
//! On host/test: `read()` drains frames queued with `sim_load_frame()`
//! the same way, or returns whatever `sim_set_raw()` stored.
//!
//! Either way the returned value is the top 8 bits of the 12-bit result.
//!
//! The frame buffer lives on the heap: at 4 KiB it is larger than the
//! default ESP-IDF main task stack.
//!
//! [`Event::ConversionComplete`]: crate::events::Event::ConversionComplete

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::app::ports::AdcPort;
use crate::config::{ADC_BITWIDTH, ADC_FRAME_SAMPLES};
use crate::pins;

/// Bytes per conversion result in the TYPE2 output format.
pub const ADC_RESULT_BYTES: usize = 4;
/// Bytes per conversion frame.
pub const ADC_FRAME_BYTES: usize = ADC_FRAME_SAMPLES as usize * ADC_RESULT_BYTES;
/// Frames the driver pool can hold before it overwrites.
pub const ADC_POOL_FRAMES: usize = 2;

const DATA_MASK: u32 = (1 << ADC_BITWIDTH) - 1;
const CHANNEL_SHIFT: u32 = 13;
const CHANNEL_MASK: u32 = 0xF;

/// Keep the high byte of a conversion result.
pub const fn high_byte(raw: u16) -> u8 {
    ((raw as u32 & DATA_MASK) >> (ADC_BITWIDTH - 8)) as u8
}

/// Newest sample for `channel` in a TYPE2 frame (little-endian 32-bit
/// words: data in bits 0..12, channel in bits 13..17).
pub fn last_sample(frame: &[u8], channel: u32) -> Option<u16> {
    frame
        .chunks_exact(ADC_RESULT_BYTES)
        .rev()
        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
        .find(|word| (word >> CHANNEL_SHIFT) & CHANNEL_MASK == channel)
        .map(|word| (word & DATA_MASK) as u16)
}

/// Pull frames into `buf` until `read_frame` reports nothing pending and
/// return the newest sample for `channel` across all of them.
///
/// `read_frame` returns the number of bytes written, or `None` once the
/// pool is empty.  At most `ADC_POOL_FRAMES + 1` frames are taken, so a
/// converter refilling the pool cannot hold the caller here.
pub fn drain_newest(
    buf: &mut [u8],
    channel: u32,
    mut read_frame: impl FnMut(&mut [u8]) -> Option<usize>,
) -> Option<u16> {
    let mut newest = None;
    for _ in 0..=ADC_POOL_FRAMES {
        let Some(len) = read_frame(buf) else {
            break;
        };
        if let Some(raw) = last_sample(&buf[..len.min(buf.len())], channel) {
            newest = Some(raw);
        }
    }
    newest
}

fn frame_buffer() -> Box<[u8]> {
    vec![0; ADC_FRAME_BYTES].into_boxed_slice()
}

pub struct TempAdc {
    #[cfg(target_os = "espidf")]
    handle: adc_continuous_handle_t,
    #[cfg(not(target_os = "espidf"))]
    pending: VecDeque<Vec<u8>>,
    frame: Box<[u8]>,
    raw: u16,
}

#[cfg(target_os = "espidf")]
impl TempAdc {
    /// Wrap a started continuous-mode handle (see `hw_init::init_adc`).
    pub(crate) fn from_handle(handle: adc_continuous_handle_t) -> Self {
        Self {
            handle,
            frame: frame_buffer(),
            raw: 0,
        }
    }

    fn latch_frame(&mut self) {
        let handle = self.handle;
        let newest = drain_newest(&mut self.frame, pins::TEMP_ADC_CHANNEL, |buf| {
            let mut len: u32 = 0;
            // SAFETY: `handle` was started by hw_init and is only read from
            // the main task; `buf` outlives the call. Timeout 0 = no block.
            let ret = unsafe {
                adc_continuous_read(handle, buf.as_mut_ptr(), buf.len() as u32, &mut len, 0)
            };
            if ret == ESP_OK {
                Some(len as usize)
            } else {
                if ret != ESP_ERR_TIMEOUT as esp_err_t {
                    log::warn!("temp_adc: read failed (rc={})", ret);
                }
                None
            }
        });
        match newest {
            Some(raw) => self.raw = raw,
            None => log::debug!("temp_adc: no frame ready, keeping last sample"),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl TempAdc {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            frame: frame_buffer(),
            raw: 0,
        }
    }

    /// Inject the next conversion result (12-bit).
    pub fn sim_set_raw(&mut self, raw: u16) {
        self.raw = raw;
    }

    /// Queue a frame as the driver pool would hold it.  Frames are
    /// consumed by the next `read()`.
    pub fn sim_load_frame(&mut self, frame: &[u8]) {
        self.pending.push_back(frame.to_vec());
    }

    /// Frames still waiting in the simulated pool.
    pub fn sim_pending_frames(&self) -> usize {
        self.pending.len()
    }

    fn latch_frame(&mut self) {
        let pending = &mut self.pending;
        let newest = drain_newest(&mut self.frame, pins::TEMP_ADC_CHANNEL, |buf| {
            let frame = pending.pop_front()?;
            let len = frame.len().min(buf.len());
            buf[..len].copy_from_slice(&frame[..len]);
            Some(len)
        });
        if let Some(raw) = newest {
            self.raw = raw;
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for TempAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl AdcPort for TempAdc {
    fn read(&mut self) -> u8 {
        self.latch_frame();
        high_byte(self.raw)
    }
}

/// Frame-done ISR.  Runs in interrupt context: queue only, no logging.
#[cfg(target_os = "espidf")]
pub(crate) unsafe extern "C" fn on_conv_done(
    _handle: adc_continuous_handle_t,
    _edata: *const adc_continuous_evt_data_t,
    _user_data: *mut core::ffi::c_void,
) -> bool {
    crate::events::push_event(crate::events::Event::ConversionComplete);
    false
}
