//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements                    | Connects to             |
//! |-------------|-------------------------------|-------------------------|
//! | `hardware`  | AdcPort, BlinkTimerPort,      | TempAdc, BlinkTimer,    |
//! |             | LedPort                       | LED                     |
//! | `pin_led`   | LedPort                       | embedded-hal output pin |
//! | `log_sink`  | EventSink                     | Serial log output       |

pub mod hardware;
pub mod log_sink;
pub mod pin_led;
