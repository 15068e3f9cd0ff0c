//! Serial console support: receive ring buffer and LOG UART driver.

pub mod log_uart;
pub mod ring_buffer;

pub use log_uart::{LogUart, LogUartConfig};
pub use ring_buffer::{RingBuffer, SERIAL_BUFFER_SIZE};
