//! WiFi driver tests

mod common;

use core::net::Ipv4Addr;

use ameba_core::sdk::{ScanRecord, Security, WlanError, WlanMode};
use ameba_core::wifi::{WifiDrv, WifiError};
use ameba_core::wl::{EncryptionType, WlStatus, WL_NETWORKS_LIST_MAXNUM};
use common::MockWlan;

#[test]
fn test_driver_init_powers_on_station_once() {
    let mut drv = WifiDrv::new(MockWlan::new());

    drv.driver_init().unwrap();
    drv.driver_init().unwrap();

    assert_eq!(drv.wlan().power_on_calls, vec![WlanMode::Station]);
}

#[test]
fn test_connection_status_lazily_initializes() {
    let mut drv = WifiDrv::new(MockWlan::new());

    assert_eq!(drv.connection_status(), WlStatus::Disconnected);
    assert_eq!(drv.wlan().power_on_calls.len(), 1);

    drv.wlan_mut().connected = true;
    assert_eq!(drv.connection_status(), WlStatus::Connected);
    // Still only one power-on.
    assert_eq!(drv.wlan().power_on_calls.len(), 1);
}

#[test]
fn test_set_network_connects_open() {
    let mut drv = WifiDrv::new(MockWlan::new());

    drv.set_network("cafe").unwrap();

    let call = &drv.wlan().connects[0];
    assert_eq!(call.ssid, b"cafe");
    assert_eq!(call.security, Security::OPEN);
    assert!(call.key.is_empty());
    assert_eq!(call.key_id, 0);
    assert_eq!(drv.wlan().dhcp_starts, 1);
}

#[test]
fn test_set_passphrase_connects_wpa2() {
    let mut drv = WifiDrv::new(MockWlan::new());

    drv.set_passphrase("homenet", "hunter2hunter2").unwrap();

    let call = &drv.wlan().connects[0];
    assert_eq!(call.ssid, b"homenet");
    assert_eq!(call.security, Security::WPA2_AES_PSK);
    assert_eq!(call.key, b"hunter2hunter2");
    assert_eq!(call.key_id, 0);
    assert_eq!(drv.wlan().dhcp_starts, 1);
}

#[test]
fn test_set_key_decodes_hex_wep_key() {
    let mut drv = WifiDrv::new(MockWlan::new());

    drv.set_key("legacy", 1, "ABADC0FFEE").unwrap();

    let call = &drv.wlan().connects[0];
    assert_eq!(call.security, Security::WEP_PSK);
    assert_eq!(call.key, vec![0xab, 0xad, 0xc0, 0xff, 0xee]);
    assert_eq!(call.key_id, 1);
}

#[test]
fn test_set_key_accepts_104_bit_key() {
    let mut drv = WifiDrv::new(MockWlan::new());

    // 26 hex digits: the longest classic WEP key (13 bytes).
    drv.set_key("legacy", 0, "000102030405060708090a0b0c").unwrap();

    let call = &drv.wlan().connects[0];
    assert_eq!(call.key.len(), 13);
    assert_eq!(call.key[12], 0x0c);
}

#[test]
fn test_set_key_rejects_oversized_key() {
    let mut drv = WifiDrv::new(MockWlan::new());

    // 28 hex digits decode to 14 bytes, past the WEP maximum.
    assert_eq!(
        drv.set_key("legacy", 0, "000102030405060708090a0b0c0d"),
        Err(WifiError::KeyTooLong)
    );
    assert!(drv.wlan().connects.is_empty());
}

#[test]
fn test_set_key_rejects_bad_hex() {
    let mut drv = WifiDrv::new(MockWlan::new());

    assert_eq!(drv.set_key("legacy", 0, "nothex!"), Err(WifiError::InvalidKey));
    assert!(drv.wlan().connects.is_empty());
}

#[test]
fn test_oversized_ssid_rejected_before_sdk() {
    let mut drv = WifiDrv::new(MockWlan::new());
    let long = "s".repeat(33);

    assert_eq!(drv.set_network(&long), Err(WifiError::SsidTooLong));
    assert!(drv.wlan().connects.is_empty());
}

#[test]
fn test_oversized_passphrase_rejected_before_sdk() {
    let mut drv = WifiDrv::new(MockWlan::new());
    let long = "p".repeat(64);

    assert_eq!(
        drv.set_passphrase("homenet", &long),
        Err(WifiError::KeyTooLong)
    );
    assert!(drv.wlan().connects.is_empty());
}

#[test]
fn test_failed_association_reports_and_skips_dhcp() {
    let mut wlan = MockWlan::new();
    wlan.connect_result = Err(WlanError::CommandFailed);
    let mut drv = WifiDrv::new(wlan);

    assert_eq!(drv.set_network("cafe"), Err(WifiError::ConnectFailed));
    assert_eq!(drv.wlan().dhcp_starts, 0);
}

#[test]
fn test_disconnect_reports_disconnected() {
    let mut drv = WifiDrv::new(MockWlan::new());

    assert_eq!(drv.disconnect(), WlStatus::Disconnected);
    assert_eq!(drv.wlan().disconnects, 1);
}

#[test]
fn test_netif_queries_pass_through() {
    let mut wlan = MockWlan::new();
    wlan.mac = [0x00, 0x0e, 0x8e, 0x12, 0x34, 0x56];
    wlan.ip = Ipv4Addr::new(192, 168, 1, 50);
    wlan.netmask = Ipv4Addr::new(255, 255, 255, 0);
    wlan.gateway = Ipv4Addr::new(192, 168, 1, 1);
    let mut drv = WifiDrv::new(wlan);

    assert_eq!(drv.mac_address(), [0x00, 0x0e, 0x8e, 0x12, 0x34, 0x56]);
    assert_eq!(drv.ip_address(), Ipv4Addr::new(192, 168, 1, 50));
    assert_eq!(drv.subnet_mask(), Ipv4Addr::new(255, 255, 255, 0));
    assert_eq!(drv.gateway_ip(), Ipv4Addr::new(192, 168, 1, 1));
}

#[test]
fn test_current_association_queries() {
    let mut wlan = MockWlan::new();
    wlan.setting.ssid = heapless::String::try_from("homenet").unwrap();
    wlan.setting.security = Security::WPA2_AES_PSK;
    wlan.rssi = -58;
    wlan.bssid = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01];
    let mut drv = WifiDrv::new(wlan);

    assert_eq!(drv.current_ssid().unwrap().as_str(), "homenet");
    assert_eq!(drv.current_rssi().unwrap(), -58);
    assert_eq!(
        drv.current_bssid().unwrap(),
        [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]
    );
    assert_eq!(
        drv.current_encryption_type().unwrap(),
        EncryptionType::Ccmp
    );
}

#[test]
fn test_scan_caches_results_in_order() {
    let mut wlan = MockWlan::new();
    wlan.scan_results = vec![
        ScanRecord::new("alpha", -40, Security::WPA2_AES_PSK).unwrap(),
        ScanRecord::new("beta", -70, Security::OPEN).unwrap(),
    ];
    let mut drv = WifiDrv::new(wlan);

    drv.start_scan().unwrap();

    assert_eq!(drv.scan_count(), 2);
    assert_eq!(drv.scan_ssid(0), Some("alpha"));
    assert_eq!(drv.scan_rssi(0), Some(-40));
    assert_eq!(drv.scan_encryption_type(0), Some(EncryptionType::Ccmp));
    assert_eq!(drv.scan_ssid(1), Some("beta"));
    assert_eq!(drv.scan_encryption_type(1), Some(EncryptionType::None));
}

#[test]
fn test_rescan_replaces_cache() {
    let mut wlan = MockWlan::new();
    wlan.scan_results = vec![ScanRecord::new("alpha", -40, Security::OPEN).unwrap()];
    let mut drv = WifiDrv::new(wlan);

    drv.start_scan().unwrap();
    assert_eq!(drv.scan_count(), 1);

    drv.wlan_mut().scan_results = vec![ScanRecord::new("gamma", -50, Security::OPEN).unwrap()];
    drv.start_scan().unwrap();

    assert_eq!(drv.scan_count(), 1);
    assert_eq!(drv.scan_ssid(0), Some("gamma"));
}

#[test]
fn test_scan_cache_is_capacity_bounded() {
    let mut wlan = MockWlan::new();
    for i in 0..WL_NETWORKS_LIST_MAXNUM + 3 {
        let ssid = format!("net{}", i);
        wlan.scan_results
            .push(ScanRecord::new(&ssid, -50, Security::OPEN).unwrap());
    }
    let mut drv = WifiDrv::new(wlan);

    drv.start_scan().unwrap();

    assert_eq!(drv.scan_count(), WL_NETWORKS_LIST_MAXNUM);
    assert_eq!(drv.scan_ssid(WL_NETWORKS_LIST_MAXNUM - 1), Some("net9"));
    assert_eq!(drv.scan_ssid(WL_NETWORKS_LIST_MAXNUM), None);
    assert_eq!(drv.scan_rssi(WL_NETWORKS_LIST_MAXNUM), None);
    assert_eq!(drv.scan_encryption_type(WL_NETWORKS_LIST_MAXNUM), None);
}

#[test]
fn test_failed_scan_leaves_cache_empty() {
    let mut wlan = MockWlan::new();
    wlan.scan_result = Err(WlanError::Timeout);
    let mut drv = WifiDrv::new(wlan);

    assert_eq!(drv.start_scan(), Err(WifiError::ScanFailed));
    assert_eq!(drv.scan_count(), 0);
}

#[test]
fn test_firmware_version_is_compat_constant() {
    let drv = WifiDrv::new(MockWlan::new());
    assert_eq!(drv.firmware_version(), "1.1.0");
}

#[test]
fn test_host_by_name_returns_address() {
    let mut wlan = MockWlan::new();
    wlan.dns = Some(Ipv4Addr::new(93, 184, 216, 34));
    let mut drv = WifiDrv::new(wlan);

    assert_eq!(
        drv.host_by_name("example.com").unwrap(),
        Ipv4Addr::new(93, 184, 216, 34)
    );
}

#[test]
fn test_host_by_name_failure() {
    let mut drv = WifiDrv::new(MockWlan::new());
    assert_eq!(drv.host_by_name("nosuch.invalid"), Err(WifiError::DnsFailed));
}
