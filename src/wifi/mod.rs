//! WiFi control driver and its helpers.
//!
//! [`WifiDrv`] is the sketch-facing surface; [`ScanCache`] holds the last
//! scan's results; [`key`] decodes ASCII-hex WEP keys.

pub mod drv;
pub mod key;
pub mod scan;

pub use drv::{WifiDrv, WifiError};
pub use key::WepKeyError;
pub use scan::ScanCache;
