//! WiFi control driver.
//!
//! Direct translation layer over the RTK WiFi stack: stage parameters, make
//! one synchronous SDK call, translate the result. No retry, no state
//! machine, no backpressure.

use core::net::Ipv4Addr;

use log::{info, warn};

use crate::sdk::{Security, Wlan, WlanError, WlanMode};
use crate::wifi::key::{decode_wep_key, WepKeyError};
use crate::wifi::scan::ScanCache;
use crate::wl::{
    EncryptionType, WlStatus, WL_FW_VERSION, WL_MAC_ADDR_LENGTH, WL_SSID_MAX_LENGTH,
    WL_WEP_KEY_MAX_LENGTH, WL_WPA_KEY_MAX_LENGTH,
};

/// Staged key material buffer size: a WPA passphrase (63) with room for a
/// trailing NUL when handed to the SDK.
const KEY_BUF_LEN: usize = 64;

/// WiFi driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    /// Association rejected or failed inside the SDK.
    ConnectFailed,
    /// SSID longer than `WL_SSID_MAX_LENGTH` bytes.
    SsidTooLong,
    /// Key or passphrase longer than the staging buffer allows.
    KeyTooLong,
    /// WEP key is not valid ASCII hex.
    InvalidKey,
    /// Scan failed inside the SDK.
    ScanFailed,
    /// An SDK query failed.
    Sdk,
    /// Hostname did not resolve.
    DnsFailed,
}

impl core::fmt::Display for WifiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WifiError::ConnectFailed => write!(f, "association failed"),
            WifiError::SsidTooLong => write!(f, "SSID too long"),
            WifiError::KeyTooLong => write!(f, "key too long"),
            WifiError::InvalidKey => write!(f, "invalid WEP key"),
            WifiError::ScanFailed => write!(f, "scan failed"),
            WifiError::Sdk => write!(f, "SDK call failed"),
            WifiError::DnsFailed => write!(f, "hostname did not resolve"),
        }
    }
}

/// Credential staging for one connection attempt.
///
/// Zeroed before staging and again after every attempt, success or failure,
/// so key material never outlives the call.
struct ConnectParams {
    ssid: [u8; WL_SSID_MAX_LENGTH],
    ssid_len: usize,
    key: [u8; KEY_BUF_LEN],
    key_len: usize,
    key_id: i32,
    security: Security,
}

impl ConnectParams {
    const fn new() -> Self {
        Self {
            ssid: [0; WL_SSID_MAX_LENGTH],
            ssid_len: 0,
            key: [0; KEY_BUF_LEN],
            key_len: 0,
            key_id: -1,
            security: Security::OPEN,
        }
    }

    fn clear(&mut self) {
        self.ssid = [0; WL_SSID_MAX_LENGTH];
        self.ssid_len = 0;
        self.key = [0; KEY_BUF_LEN];
        self.key_len = 0;
        self.key_id = -1;
        self.security = Security::OPEN;
    }
}

/// WiFi control driver over a [`Wlan`] SDK handle.
pub struct WifiDrv<W: Wlan> {
    wlan: W,
    initialized: bool,
    scan: ScanCache,
    staging: ConnectParams,
}

impl<W: Wlan> WifiDrv<W> {
    pub fn new(wlan: W) -> Self {
        Self {
            wlan,
            initialized: false,
            scan: ScanCache::new(),
            staging: ConnectParams::new(),
        }
    }

    /// Bring the WLAN up in station mode. Idempotent; later calls are
    /// no-ops.
    pub fn driver_init(&mut self) -> Result<(), WifiError> {
        if !self.initialized {
            self.wlan
                .power_on(WlanMode::Station)
                .map_err(|_| WifiError::Sdk)?;
            self.initialized = true;
            info!("wlan powered on (station mode)");
        }
        Ok(())
    }

    /// Associate with an open network.
    pub fn set_network(&mut self, ssid: &str) -> Result<(), WifiError> {
        self.stage_ssid(ssid)?;
        self.staging.security = Security::OPEN;
        self.staging.key_id = 0;
        self.connect_staged()
    }

    /// Associate using a WPA2-AES pre-shared key.
    pub fn set_passphrase(&mut self, ssid: &str, passphrase: &str) -> Result<(), WifiError> {
        self.stage_ssid(ssid)?;
        let bytes = passphrase.as_bytes();
        if bytes.len() > WL_WPA_KEY_MAX_LENGTH {
            self.staging.clear();
            return Err(WifiError::KeyTooLong);
        }
        self.staging.key[..bytes.len()].copy_from_slice(bytes);
        self.staging.key_len = bytes.len();
        self.staging.key_id = 0;
        self.staging.security = Security::WPA2_AES_PSK;
        self.connect_staged()
    }

    /// Associate using a WEP key given as ASCII hex, in key slot `key_idx`.
    pub fn set_key(&mut self, ssid: &str, key_idx: u8, key: &str) -> Result<(), WifiError> {
        self.stage_ssid(ssid)?;
        // A WEP key is at most 13 bytes (104-bit); decode into the bounded
        // prefix of the staging buffer.
        let decoded = decode_wep_key(
            key.as_bytes(),
            &mut self.staging.key[..WL_WEP_KEY_MAX_LENGTH],
        );
        match decoded {
            Ok(len) => self.staging.key_len = len,
            Err(err) => {
                self.staging.clear();
                return Err(match err {
                    WepKeyError::TooLong => WifiError::KeyTooLong,
                    WepKeyError::OddLength | WepKeyError::InvalidDigit => WifiError::InvalidKey,
                });
            }
        }
        self.staging.key_id = i32::from(key_idx);
        self.staging.security = Security::WEP_PSK;
        self.connect_staged()
    }

    /// Tear the association down.
    pub fn disconnect(&mut self) -> WlStatus {
        if self.wlan.disconnect().is_err() {
            warn!("disconnect command failed");
        }
        WlStatus::Disconnected
    }

    /// Link status, lazily powering the WLAN on first.
    pub fn connection_status(&mut self) -> WlStatus {
        if self.driver_init().is_err() {
            return WlStatus::Disconnected;
        }
        if self.wlan.is_connected() {
            WlStatus::Connected
        } else {
            WlStatus::Disconnected
        }
    }

    /// MAC address of the station interface.
    pub fn mac_address(&mut self) -> [u8; WL_MAC_ADDR_LENGTH] {
        self.wlan.mac_address()
    }

    /// IP address of the station interface.
    pub fn ip_address(&mut self) -> Ipv4Addr {
        self.wlan.ip_address()
    }

    /// Subnet mask of the station interface.
    pub fn subnet_mask(&mut self) -> Ipv4Addr {
        self.wlan.netmask()
    }

    /// Gateway of the station interface.
    pub fn gateway_ip(&mut self) -> Ipv4Addr {
        self.wlan.gateway()
    }

    /// SSID of the live association.
    pub fn current_ssid(&mut self) -> Result<heapless::String<WL_SSID_MAX_LENGTH>, WifiError> {
        self.wlan
            .setting()
            .map(|s| s.ssid)
            .map_err(|_| WifiError::Sdk)
    }

    /// BSSID of the live association, by value.
    pub fn current_bssid(&mut self) -> Result<[u8; WL_MAC_ADDR_LENGTH], WifiError> {
        self.wlan.bssid().map_err(|_| WifiError::Sdk)
    }

    /// RSSI of the live association, in dBm.
    pub fn current_rssi(&mut self) -> Result<i32, WifiError> {
        self.wlan.rssi().map_err(|_| WifiError::Sdk)
    }

    /// Encryption code of the live association.
    pub fn current_encryption_type(&mut self) -> Result<EncryptionType, WifiError> {
        self.wlan
            .setting()
            .map(|s| EncryptionType::from_security(s.security))
            .map_err(|_| WifiError::Sdk)
    }

    /// Scan for networks, replacing the cached results.
    pub fn start_scan(&mut self) -> Result<(), WifiError> {
        self.driver_init()?;

        info!("scanning for networks");
        let Self { wlan, scan, .. } = self;
        scan.reset();
        wlan.scan(&mut |record| scan.push(record))
            .map_err(|_| WifiError::ScanFailed)?;

        info!("scan complete: {} network(s)", self.scan.count());
        Ok(())
    }

    /// Number of networks found by the last scan.
    pub fn scan_count(&self) -> usize {
        self.scan.count()
    }

    /// SSID of the `index`-th scanned network.
    pub fn scan_ssid(&self, index: usize) -> Option<&str> {
        self.scan.ssid(index)
    }

    /// RSSI of the `index`-th scanned network, in dBm.
    pub fn scan_rssi(&self, index: usize) -> Option<i32> {
        self.scan.rssi(index)
    }

    /// Encryption code of the `index`-th scanned network.
    pub fn scan_encryption_type(&self, index: usize) -> Option<EncryptionType> {
        self.scan.encryption_type(index)
    }

    /// Firmware version reported to sketches.
    pub fn firmware_version(&self) -> &'static str {
        WL_FW_VERSION
    }

    /// Resolve a hostname through the SDK resolver.
    pub fn host_by_name(&mut self, hostname: &str) -> Result<Ipv4Addr, WifiError> {
        self.wlan.host_by_name(hostname).map_err(|err| match err {
            WlanError::HostNotFound | WlanError::Timeout => WifiError::DnsFailed,
            WlanError::CommandFailed => WifiError::Sdk,
        })
    }

    /// Access to the underlying SDK handle (test instrumentation).
    pub fn wlan(&self) -> &W {
        &self.wlan
    }

    pub fn wlan_mut(&mut self) -> &mut W {
        &mut self.wlan
    }

    /// Zero the staging area and copy `ssid` in.
    fn stage_ssid(&mut self, ssid: &str) -> Result<(), WifiError> {
        self.staging.clear();
        let bytes = ssid.as_bytes();
        if bytes.len() > WL_SSID_MAX_LENGTH {
            return Err(WifiError::SsidTooLong);
        }
        self.staging.ssid[..bytes.len()].copy_from_slice(bytes);
        self.staging.ssid_len = bytes.len();
        Ok(())
    }

    /// Run the staged connection attempt: connect, start DHCP on success,
    /// clear the staging area either way.
    fn connect_staged(&mut self) -> Result<(), WifiError> {
        self.driver_init()?;

        let Self { wlan, staging, .. } = self;
        info!(
            "associating with '{}'",
            core::str::from_utf8(&staging.ssid[..staging.ssid_len]).unwrap_or("<non-utf8 ssid>")
        );
        let result = wlan.connect(
            &staging.ssid[..staging.ssid_len],
            staging.security,
            &staging.key[..staging.key_len],
            staging.key_id,
        );

        match result {
            Ok(()) => {
                if self.wlan.dhcp_start().is_err() {
                    warn!("DHCP start failed");
                }
                self.staging.clear();
                info!("association complete");
                Ok(())
            }
            Err(err) => {
                self.staging.clear();
                warn!("association failed: {}", err);
                Err(WifiError::ConnectFailed)
            }
        }
    }
}
