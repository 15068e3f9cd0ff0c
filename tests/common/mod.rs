//! Mock SDK implementations shared by the integration tests.
//!
//! In-memory stand-ins for the vendor SDK traits: injectable receive data,
//! recorded calls, configurable results.

#![allow(dead_code)]

use std::collections::VecDeque;

use ameba_core::sdk::{DiagPort, ScanRecord, Security, Setting, Wlan, WlanError, WlanMode};
use core::net::Ipv4Addr;

/// Mock boot-console port.
pub struct MockDiagPort {
    /// Current interrupt-enable mask.
    pub isr_enable: u32,
    /// Every mask value written, in order.
    pub isr_writes: Vec<u32>,
    /// Pending receive bytes, popped one per `poll_char`.
    pub rx: VecDeque<u8>,
    /// Everything transmitted.
    pub tx: Vec<u8>,
    /// Last baud rate passed to `configure`.
    pub configured_baud: Option<u32>,
    /// Number of `tx_drain` calls.
    pub drains: usize,
}

impl MockDiagPort {
    pub fn new() -> Self {
        Self {
            isr_enable: 0,
            isr_writes: Vec::new(),
            rx: VecDeque::new(),
            tx: Vec::new(),
            configured_baud: None,
            drains: 0,
        }
    }

    /// Queue receive data for later `poll_char` calls.
    pub fn inject_rx(&mut self, data: &[u8]) {
        self.rx.extend(data);
    }
}

impl DiagPort for MockDiagPort {
    fn isr_enable(&self) -> u32 {
        self.isr_enable
    }

    fn set_isr_enable(&mut self, mask: u32) {
        self.isr_enable = mask;
        self.isr_writes.push(mask);
    }

    fn poll_char(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn put_char(&mut self, byte: u8) {
        self.tx.push(byte);
    }

    fn configure(&mut self, baud: u32) {
        self.configured_baud = Some(baud);
    }

    fn tx_drain(&mut self) {
        self.drains += 1;
    }
}

/// One recorded `connect` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectCall {
    pub ssid: Vec<u8>,
    pub security: Security,
    pub key: Vec<u8>,
    pub key_id: i32,
}

/// Mock WLAN SDK handle.
pub struct MockWlan {
    pub power_on_calls: Vec<WlanMode>,
    pub power_on_result: Result<(), WlanError>,
    pub connects: Vec<ConnectCall>,
    pub connect_result: Result<(), WlanError>,
    pub disconnects: usize,
    pub dhcp_starts: usize,
    pub connected: bool,
    pub setting: Setting,
    pub rssi: i32,
    pub bssid: [u8; 6],
    pub mac: [u8; 6],
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub scan_results: Vec<ScanRecord>,
    pub scan_result: Result<(), WlanError>,
    pub dns: Option<Ipv4Addr>,
}

impl MockWlan {
    pub fn new() -> Self {
        Self {
            power_on_calls: Vec::new(),
            power_on_result: Ok(()),
            connects: Vec::new(),
            connect_result: Ok(()),
            disconnects: 0,
            dhcp_starts: 0,
            connected: false,
            setting: Setting::default(),
            rssi: 0,
            bssid: [0; 6],
            mac: [0; 6],
            ip: Ipv4Addr::UNSPECIFIED,
            netmask: Ipv4Addr::UNSPECIFIED,
            gateway: Ipv4Addr::UNSPECIFIED,
            scan_results: Vec::new(),
            scan_result: Ok(()),
            dns: None,
        }
    }
}

impl Wlan for MockWlan {
    fn power_on(&mut self, mode: WlanMode) -> Result<(), WlanError> {
        self.power_on_calls.push(mode);
        self.power_on_result
    }

    fn connect(
        &mut self,
        ssid: &[u8],
        security: Security,
        key: &[u8],
        key_id: i32,
    ) -> Result<(), WlanError> {
        self.connects.push(ConnectCall {
            ssid: ssid.to_vec(),
            security,
            key: key.to_vec(),
            key_id,
        });
        self.connect_result
    }

    fn disconnect(&mut self) -> Result<(), WlanError> {
        self.disconnects += 1;
        self.connected = false;
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.connected
    }

    fn setting(&mut self) -> Result<Setting, WlanError> {
        Ok(self.setting.clone())
    }

    fn rssi(&mut self) -> Result<i32, WlanError> {
        Ok(self.rssi)
    }

    fn bssid(&mut self) -> Result<[u8; 6], WlanError> {
        Ok(self.bssid)
    }

    fn scan(&mut self, on_result: &mut dyn FnMut(&ScanRecord)) -> Result<(), WlanError> {
        self.scan_result?;
        for record in &self.scan_results {
            on_result(record);
        }
        Ok(())
    }

    fn mac_address(&mut self) -> [u8; 6] {
        self.mac
    }

    fn ip_address(&mut self) -> Ipv4Addr {
        self.ip
    }

    fn netmask(&mut self) -> Ipv4Addr {
        self.netmask
    }

    fn gateway(&mut self) -> Ipv4Addr {
        self.gateway
    }

    fn dhcp_start(&mut self) -> Result<(), WlanError> {
        self.dhcp_starts += 1;
        Ok(())
    }

    fn host_by_name(&mut self, _hostname: &str) -> Result<Ipv4Addr, WlanError> {
        self.dns.ok_or(WlanError::HostNotFound)
    }
}
