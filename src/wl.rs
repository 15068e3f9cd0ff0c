//! Wireless definitions shared by sketches and the WiFi driver.
//!
//! These mirror the classic Arduino `wl_definitions.h` values. Sketches
//! compare status and encryption codes numerically, so the numeric values
//! are part of the contract and must not change.

use crate::sdk::Security;

/// Maximum SSID length in bytes (not NUL-terminated).
pub const WL_SSID_MAX_LENGTH: usize = 32;

/// Maximum WPA passphrase length in bytes.
pub const WL_WPA_KEY_MAX_LENGTH: usize = 63;

/// Maximum WEP key length in bytes (binary, after hex decoding).
pub const WL_WEP_KEY_MAX_LENGTH: usize = 13;

/// MAC address length in bytes.
pub const WL_MAC_ADDR_LENGTH: usize = 6;

/// Maximum number of networks kept by a scan.
pub const WL_NETWORKS_LIST_MAXNUM: usize = 10;

/// Firmware version reported to sketches, kept for Arduino example
/// compatibility.
pub const WL_FW_VERSION: &str = "1.1.0";

/// Connection status, `wl_status_t` compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WlStatus {
    Idle = 0,
    NoSsidAvail = 1,
    ScanCompleted = 2,
    Connected = 3,
    ConnectFailed = 4,
    ConnectionLost = 5,
    Disconnected = 6,
}

/// Encryption type reported to sketches, `ENC_TYPE_*` compatible.
///
/// The values come from the 802.11 cipher suite identifiers the classic
/// Arduino WiFi shield exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EncryptionType {
    Tkip = 2,
    Ccmp = 4,
    Wep = 5,
    None = 7,
    Auto = 8,
}

impl EncryptionType {
    /// Translate a vendor security descriptor to the Arduino encryption code.
    ///
    /// WEP is checked before the cipher bits: a WEP descriptor never carries
    /// AES or TKIP, but checking it first keeps the mapping total. Anything
    /// the classic codes cannot express reports as `Auto`.
    pub fn from_security(security: Security) -> Self {
        if security.is_open() {
            EncryptionType::None
        } else if security.has_wep() {
            EncryptionType::Wep
        } else if security.has_aes() {
            EncryptionType::Ccmp
        } else if security.has_tkip() {
            EncryptionType::Tkip
        } else {
            EncryptionType::Auto
        }
    }
}
