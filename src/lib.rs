//! # ameba-core
//!
//! Arduino-style board support shims for the Realtek RTL8195A ("Ameba"):
//!
//! - [`serial::LogUart`]: diagnostic console driver over the SoC boot UART
//! - [`wifi::WifiDrv`]: WiFi control driver over the RTK WiFi stack
//!
//! Both are thin parameter-marshalling wrappers around the vendor SDK. The
//! SDK itself sits behind the traits in [`sdk`], so everything here builds
//! and tests on the host; target builds enable the `rtl8195a` feature to
//! link the real bindings.

#![cfg_attr(not(test), no_std)]

pub mod sdk;
pub mod serial;
pub mod wifi;
pub mod wl;

pub use sdk::{DiagPort, ScanRecord, Security, Setting, Wlan, WlanError, WlanMode};
pub use serial::{LogUart, LogUartConfig, RingBuffer, SERIAL_BUFFER_SIZE};
pub use wifi::{ScanCache, WepKeyError, WifiDrv, WifiError};
pub use wl::{EncryptionType, WlStatus};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");
