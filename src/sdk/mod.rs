//! Seam to the vendor-supplied SDK.
//!
//! The RTK WiFi stack, lwIP, and the SoC boot-console register API are
//! externally linked C code. Everything the shims need from them sits behind
//! two traits so the drivers stay testable on the host:
//!
//! - [`DiagPort`]: the boot-console UART register surface
//! - [`Wlan`]: the WiFi control and netif query surface
//!
//! Hardware implementations live in [`rtl8195a`] behind the `rtl8195a`
//! feature. Business logic stays in `serial` and `wifi`; this layer is just
//! I/O.

use core::net::Ipv4Addr;

use crate::wl::{WL_MAC_ADDR_LENGTH, WL_SSID_MAX_LENGTH};

#[cfg(feature = "rtl8195a")]
pub mod rtl8195a;

/// Vendor security descriptor, `rtw_security_t` compatible.
///
/// A bitmask of cipher bits (WEP/TKIP/AES) and mode bits (WPA/WPA2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Security(pub u32);

impl Security {
    const WEP_ENABLED: u32 = 0x0000_0001;
    const TKIP_ENABLED: u32 = 0x0000_0002;
    const AES_ENABLED: u32 = 0x0000_0004;
    const WPA_SECURITY: u32 = 0x0020_0000;
    const WPA2_SECURITY: u32 = 0x0040_0000;

    /// Open network, no key.
    pub const OPEN: Security = Security(0);
    /// WEP shared key.
    pub const WEP_PSK: Security = Security(Self::WEP_ENABLED);
    /// WPA with TKIP pre-shared key.
    pub const WPA_TKIP_PSK: Security = Security(Self::WPA_SECURITY | Self::TKIP_ENABLED);
    /// WPA2 with AES pre-shared key.
    pub const WPA2_AES_PSK: Security = Security(Self::WPA2_SECURITY | Self::AES_ENABLED);

    pub fn is_open(self) -> bool {
        self.0 == 0
    }

    pub fn has_wep(self) -> bool {
        self.0 & Self::WEP_ENABLED != 0
    }

    pub fn has_tkip(self) -> bool {
        self.0 & Self::TKIP_ENABLED != 0
    }

    pub fn has_aes(self) -> bool {
        self.0 & Self::AES_ENABLED != 0
    }
}

/// WLAN operating mode, `rtw_mode_t` compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum WlanMode {
    Station = 1,
    Ap = 2,
}

/// One network reported during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    pub ssid: heapless::String<WL_SSID_MAX_LENGTH>,
    pub rssi: i32,
    pub security: Security,
}

impl ScanRecord {
    /// Build a record, `None` if the SSID does not fit.
    pub fn new(ssid: &str, rssi: i32, security: Security) -> Option<Self> {
        let ssid = heapless::String::try_from(ssid).ok()?;
        Some(Self {
            ssid,
            rssi,
            security,
        })
    }
}

/// Current association settings, from `wifi_get_setting`.
#[derive(Debug, Clone, Default)]
pub struct Setting {
    pub ssid: heapless::String<WL_SSID_MAX_LENGTH>,
    pub channel: u8,
    pub security: Security,
}

/// Error from a vendor SDK call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WlanError {
    /// The SDK returned a failure code.
    CommandFailed,
    /// The operation did not complete in time.
    Timeout,
    /// The resolver could not find the host.
    HostNotFound,
}

impl core::fmt::Display for WlanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WlanError::CommandFailed => write!(f, "SDK command failed"),
            WlanError::Timeout => write!(f, "SDK operation timed out"),
            WlanError::HostNotFound => write!(f, "host not found"),
        }
    }
}

/// Boot-console UART register surface.
///
/// The ROM brings the console up before any of this code runs; the trait
/// only covers what the driver touches.
pub trait DiagPort {
    /// Read the UART interrupt-enable mask.
    fn isr_enable(&self) -> u32;

    /// Write the UART interrupt-enable mask.
    fn set_isr_enable(&mut self, mask: u32);

    /// Non-blocking receive of one byte.
    fn poll_char(&mut self) -> Option<u8>;

    /// Blocking transmit of one byte.
    fn put_char(&mut self, byte: u8);

    /// Reconfigure the console to `baud`, 8N1.
    fn configure(&mut self, baud: u32);

    /// Block until the transmit path has drained.
    fn tx_drain(&mut self);
}

/// WiFi control and netif query surface.
///
/// Every method is a single synchronous SDK call from the caller's point of
/// view; asynchronous SDK internals (scan callbacks) are hidden behind the
/// seam.
pub trait Wlan {
    /// Power the WLAN interface on in `mode`. Also brings the IP stack up.
    fn power_on(&mut self, mode: WlanMode) -> Result<(), WlanError>;

    /// Associate with a network. `key` is empty for open networks and the
    /// decoded binary key otherwise; `key_id` is the WEP key slot (0 when
    /// not WEP).
    fn connect(
        &mut self,
        ssid: &[u8],
        security: Security,
        key: &[u8],
        key_id: i32,
    ) -> Result<(), WlanError>;

    /// Tear the current association down.
    fn disconnect(&mut self) -> Result<(), WlanError>;

    /// Link state of the station interface.
    fn is_connected(&mut self) -> bool;

    /// Settings of the live association.
    fn setting(&mut self) -> Result<Setting, WlanError>;

    /// RSSI of the live association, in dBm.
    fn rssi(&mut self) -> Result<i32, WlanError>;

    /// BSSID of the live association.
    fn bssid(&mut self) -> Result<[u8; WL_MAC_ADDR_LENGTH], WlanError>;

    /// Run a scan. Returns after the scan completes; `on_result` has been
    /// invoked once per discovered network, in discovery order.
    fn scan(&mut self, on_result: &mut dyn FnMut(&ScanRecord)) -> Result<(), WlanError>;

    /// MAC address of the station interface.
    fn mac_address(&mut self) -> [u8; WL_MAC_ADDR_LENGTH];

    /// IP address of the station interface.
    fn ip_address(&mut self) -> Ipv4Addr;

    /// Subnet mask of the station interface.
    fn netmask(&mut self) -> Ipv4Addr;

    /// Gateway of the station interface.
    fn gateway(&mut self) -> Ipv4Addr;

    /// Start DHCP on the station interface.
    fn dhcp_start(&mut self) -> Result<(), WlanError>;

    /// Resolve a hostname through the SDK resolver.
    fn host_by_name(&mut self, hostname: &str) -> Result<Ipv4Addr, WlanError>;
}
