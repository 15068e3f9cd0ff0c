//! Diagnostic console driver for the RTL8195A boot UART.
//!
//! The SoC's LOG UART is brought up by the boot ROM and doubles as the
//! sketch-facing serial port. This driver is a thin shim: the IRQ handler
//! moves received bytes into a caller-supplied ring buffer, reads index into
//! that buffer, and writes go straight to the SDK's blocking putc.

use core::fmt;

use crate::sdk::DiagPort;
use crate::serial::RingBuffer;

/// Console configuration.
pub struct LogUartConfig {
    pub baud_rate: u32,
}

impl Default for LogUartConfig {
    fn default() -> Self {
        Self {
            // ROM default for the RTL8195A boot console.
            baud_rate: 38_400,
        }
    }
}

/// Boot-console UART driver.
///
/// The receive ring buffer is referenced, not owned: it typically lives in a
/// `static` so the IRQ trampoline can reach it as well.
pub struct LogUart<'a, P: DiagPort> {
    port: P,
    irq: u32,
    rx_buffer: &'a RingBuffer,
}

impl<'a, P: DiagPort> LogUart<'a, P> {
    /// Bind the driver to its port, IRQ line, and receive buffer.
    pub fn new(port: P, irq: u32, rx_buffer: &'a RingBuffer) -> Self {
        Self {
            port,
            irq,
            rx_buffer,
        }
    }

    /// IRQ line the receive handler is registered on.
    pub fn irq(&self) -> u32 {
        self.irq
    }

    /// Receive interrupt handler.
    ///
    /// Masks all UART interrupts around the register read so a nested
    /// interrupt cannot re-enter the poll, then restores the previous mask.
    pub fn irq_handler(&mut self) {
        let isr_en = self.port.isr_enable();
        self.port.set_isr_enable(0);

        if let Some(byte) = self.port.poll_char() {
            self.rx_buffer.store_char(byte);
        }

        self.port.set_isr_enable(isr_en);
    }

    /// Reconfigure the console. The ROM has already brought the port up, so
    /// this only applies the requested baud rate.
    pub fn begin(&mut self, config: &LogUartConfig) {
        self.port.configure(config.baud_rate);
    }

    /// Stop using the console, discarding any buffered receive data.
    pub fn end(&mut self) {
        self.rx_buffer.clear();
    }

    /// Number of received bytes waiting to be read.
    pub fn available(&self) -> usize {
        self.rx_buffer.available()
    }

    /// Next received byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.rx_buffer.peek()
    }

    /// Next received byte.
    pub fn read(&mut self) -> Option<u8> {
        self.rx_buffer.read()
    }

    /// Block until the transmit path has drained.
    pub fn flush(&mut self) {
        self.port.tx_drain();
    }

    /// Transmit one byte. Returns the count written.
    pub fn write(&mut self, byte: u8) -> usize {
        self.port.put_char(byte);
        1
    }

    /// Transmit a buffer. Returns the count written.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        for &byte in bytes {
            self.port.put_char(byte);
        }
        bytes.len()
    }

    /// Access to the underlying port (test instrumentation, IRQ setup).
    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<P: DiagPort> fmt::Write for LogUart<'_, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
