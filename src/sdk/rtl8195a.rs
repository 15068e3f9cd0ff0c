//! RTL8195A implementations of the SDK traits.
//!
//! Raw bindings to the Realtek Ameba SDK (RTK WiFi stack, lwIP, SoC boot
//! console). Only compiled for target builds (`rtl8195a` feature); the
//! symbols resolve at final link against the vendor libraries.

use core::ffi::{c_char, c_int, c_void};
use core::net::Ipv4Addr;
use core::ptr::addr_of_mut;
use core::sync::atomic::{AtomicBool, Ordering};

use super::{DiagPort, ScanRecord, Security, Setting, Wlan, WlanError, WlanMode};
use crate::wl::{WL_MAC_ADDR_LENGTH, WL_SSID_MAX_LENGTH};

const RTW_SUCCESS: c_int = 0;
const RTW_TRUE: u32 = 1;

/// `DHCP_START` from `lwip_netconf.h`.
const DHCP_START: u8 = 1;
/// `ERR_OK` from `lwip/err.h`.
const ERR_OK: i8 = 0;

const WLAN0_NAME: *const c_char = b"wlan0\0".as_ptr() as *const c_char;

/// How long to wait for the SDK's scan-complete callback.
const SCAN_TIMEOUT_MS: u32 = 12_000;
const SCAN_POLL_MS: c_int = 20;

/// Longest hostname accepted by `host_by_name` (stack-allocated C string).
const HOSTNAME_MAX: usize = 255;

/// `rtw_ssid_t`
#[repr(C)]
struct RtwSsid {
    len: u8,
    val: [u8; 33],
}

/// `rtw_mac_t`
#[repr(C)]
#[allow(dead_code)]
struct RtwMac {
    octet: [u8; 6],
}

/// `rtw_scan_result_t`
#[repr(C)]
#[allow(dead_code)]
struct RtwScanResult {
    ssid: RtwSsid,
    bssid: RtwMac,
    signal_strength: i16,
    bss_type: u32,
    security: u32,
    wps_type: u32,
    channel: u32,
    band: u32,
}

/// `rtw_scan_handler_result_t`
#[repr(C)]
struct RtwScanHandlerResult {
    ap_details: RtwScanResult,
    scan_complete: u32,
    user_data: *mut c_void,
}

/// `rtw_wifi_setting_t`
#[repr(C)]
#[allow(dead_code)]
struct RtwWifiSetting {
    mode: u32,
    ssid: [u8; 33],
    channel: u8,
    security_type: u32,
    password: [u8; 65],
    key_idx: u8,
}

/// Opaque lwIP `struct netif`; only its address is ever taken.
#[repr(C)]
struct Netif {
    _opaque: [u8; 0],
}

/// lwIP `ip_addr_t` (IPv4 build), address in network byte order.
#[repr(C)]
struct LwipIpAddr {
    addr: u32,
}

extern "C" {
    // SoC boot console (diag UART)
    fn DiagGetIsrEnReg() -> u32;
    fn DiagSetIsrEnReg(val: u32);
    fn DiagGetChar(pull_mode: u8) -> u8;
    fn HalSerialPutcRtl8195a(c: u8);

    // RTK WiFi stack
    fn wifi_on(mode: u32) -> c_int;
    fn wifi_connect(
        ssid: *const c_char,
        security_type: u32,
        password: *const c_char,
        ssid_len: c_int,
        password_len: c_int,
        key_id: c_int,
        semaphore: *mut c_void,
    ) -> c_int;
    fn wifi_disconnect() -> c_int;
    fn wifi_is_connected_to_ap() -> c_int;
    fn wifi_get_setting(ifname: *const c_char, setting: *mut RtwWifiSetting) -> c_int;
    fn wifi_get_rssi(rssi: *mut c_int) -> c_int;
    fn wext_get_bssid(ifname: *const c_char, bssid: *mut u8) -> c_int;
    fn wifi_scan_networks(
        handler: extern "C" fn(*mut RtwScanHandlerResult) -> c_int,
        user_data: *mut c_void,
    ) -> c_int;

    // lwIP glue
    fn LwIP_Init();
    fn LwIP_DHCP(idx: u8, state: u8) -> u8;
    fn LwIP_GetMAC(netif: *mut Netif) -> *const u8;
    fn LwIP_GetIP(netif: *mut Netif) -> *const u8;
    fn LwIP_GetMASK(netif: *mut Netif) -> *const u8;
    fn LwIP_GetGW(netif: *mut Netif) -> *const u8;
    fn netconn_gethostbyname(name: *const c_char, addr: *mut LwipIpAddr) -> i8;
    static mut xnetif: Netif;

    // RTK OS abstraction
    fn rtw_msleep_os(ms: c_int);
}

/// Boot console registers.
///
/// `configure` and `tx_drain` are no-ops: the ROM sets the console baud at
/// boot and exposes no drain register through the diag API.
pub struct RtlDiagPort;

impl DiagPort for RtlDiagPort {
    fn isr_enable(&self) -> u32 {
        unsafe { DiagGetIsrEnReg() }
    }

    fn set_isr_enable(&mut self, mask: u32) {
        unsafe { DiagSetIsrEnReg(mask) }
    }

    fn poll_char(&mut self) -> Option<u8> {
        // Pull mode off: returns 0 when no byte is pending.
        let byte = unsafe { DiagGetChar(0) };
        if byte > 0 {
            Some(byte)
        } else {
            None
        }
    }

    fn put_char(&mut self, byte: u8) {
        unsafe { HalSerialPutcRtl8195a(byte) }
    }

    fn configure(&mut self, _baud: u32) {}

    fn tx_drain(&mut self) {}
}

/// Context handed through the scan callback's `user_data`.
struct ScanCtx<'a> {
    on_result: &'a mut dyn FnMut(&ScanRecord),
    done: &'a AtomicBool,
}

extern "C" fn scan_handler(result: *mut RtwScanHandlerResult) -> c_int {
    // SAFETY: the SDK hands back the pointer given to wifi_scan_networks,
    // which points at a ScanCtx that outlives the scan (scan() blocks on
    // `done` before returning).
    unsafe {
        let res = &mut *result;
        let ctx = &mut *(res.user_data as *mut ScanCtx<'_>);

        if res.scan_complete != RTW_TRUE {
            let ap = &res.ap_details;
            let len = (ap.ssid.len as usize).min(WL_SSID_MAX_LENGTH);
            if let Ok(ssid) = core::str::from_utf8(&ap.ssid.val[..len]) {
                if let Some(record) =
                    ScanRecord::new(ssid, ap.signal_strength as i32, Security(ap.security))
                {
                    (ctx.on_result)(&record);
                }
            }
        } else {
            ctx.done.store(true, Ordering::Release);
        }
    }

    RTW_SUCCESS
}

fn read_addr(raw: *const u8) -> Ipv4Addr {
    if raw.is_null() {
        return Ipv4Addr::UNSPECIFIED;
    }
    // SAFETY: the lwIP getters return a pointer to 4 address octets.
    let octets = unsafe { core::slice::from_raw_parts(raw, 4) };
    Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3])
}

/// RTK WiFi stack + lwIP station interface.
pub struct RtlWlan;

impl Wlan for RtlWlan {
    fn power_on(&mut self, mode: WlanMode) -> Result<(), WlanError> {
        unsafe {
            LwIP_Init();
            if wifi_on(mode as u32) != RTW_SUCCESS {
                return Err(WlanError::CommandFailed);
            }
        }
        Ok(())
    }

    fn connect(
        &mut self,
        ssid: &[u8],
        security: Security,
        key: &[u8],
        key_id: i32,
    ) -> Result<(), WlanError> {
        let password = if key.is_empty() {
            core::ptr::null()
        } else {
            key.as_ptr() as *const c_char
        };
        let rc = unsafe {
            wifi_connect(
                ssid.as_ptr() as *const c_char,
                security.0,
                password,
                ssid.len() as c_int,
                key.len() as c_int,
                key_id,
                core::ptr::null_mut(),
            )
        };
        if rc == RTW_SUCCESS {
            Ok(())
        } else {
            Err(WlanError::CommandFailed)
        }
    }

    fn disconnect(&mut self) -> Result<(), WlanError> {
        if unsafe { wifi_disconnect() } == RTW_SUCCESS {
            Ok(())
        } else {
            Err(WlanError::CommandFailed)
        }
    }

    fn is_connected(&mut self) -> bool {
        // SDK convention: 0 when associated.
        unsafe { wifi_is_connected_to_ap() == 0 }
    }

    fn setting(&mut self) -> Result<Setting, WlanError> {
        let mut raw = RtwWifiSetting {
            mode: 0,
            ssid: [0; 33],
            channel: 0,
            security_type: 0,
            password: [0; 65],
            key_idx: 0,
        };
        if unsafe { wifi_get_setting(WLAN0_NAME, &mut raw) } != RTW_SUCCESS {
            return Err(WlanError::CommandFailed);
        }

        let len = raw
            .ssid
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(WL_SSID_MAX_LENGTH)
            .min(WL_SSID_MAX_LENGTH);
        let ssid = core::str::from_utf8(&raw.ssid[..len])
            .ok()
            .and_then(|s| heapless::String::try_from(s).ok())
            .unwrap_or_default();

        Ok(Setting {
            ssid,
            channel: raw.channel,
            security: Security(raw.security_type),
        })
    }

    fn rssi(&mut self) -> Result<i32, WlanError> {
        let mut rssi: c_int = 0;
        if unsafe { wifi_get_rssi(&mut rssi) } != RTW_SUCCESS {
            return Err(WlanError::CommandFailed);
        }
        Ok(rssi)
    }

    fn bssid(&mut self) -> Result<[u8; WL_MAC_ADDR_LENGTH], WlanError> {
        let mut bssid = [0u8; WL_MAC_ADDR_LENGTH];
        if unsafe { wext_get_bssid(WLAN0_NAME, bssid.as_mut_ptr()) } != RTW_SUCCESS {
            return Err(WlanError::CommandFailed);
        }
        Ok(bssid)
    }

    fn scan(&mut self, on_result: &mut dyn FnMut(&ScanRecord)) -> Result<(), WlanError> {
        let done = AtomicBool::new(false);
        let mut ctx = ScanCtx {
            on_result,
            done: &done,
        };

        let rc =
            unsafe { wifi_scan_networks(scan_handler, &mut ctx as *mut ScanCtx<'_> as *mut c_void) };
        if rc != RTW_SUCCESS {
            return Err(WlanError::CommandFailed);
        }

        // Results arrive from the SDK's own thread; block until it reports
        // scan-complete so `ctx` stays valid for every callback.
        let mut waited: u32 = 0;
        while !done.load(Ordering::Acquire) {
            if waited >= SCAN_TIMEOUT_MS {
                return Err(WlanError::Timeout);
            }
            unsafe { rtw_msleep_os(SCAN_POLL_MS) };
            waited += SCAN_POLL_MS as u32;
        }

        Ok(())
    }

    fn mac_address(&mut self) -> [u8; WL_MAC_ADDR_LENGTH] {
        let mut mac = [0u8; WL_MAC_ADDR_LENGTH];
        // SAFETY: LwIP_GetMAC returns a pointer to the 6-byte hwaddr of the
        // station netif.
        unsafe {
            let raw = LwIP_GetMAC(addr_of_mut!(xnetif));
            if !raw.is_null() {
                mac.copy_from_slice(core::slice::from_raw_parts(raw, WL_MAC_ADDR_LENGTH));
            }
        }
        mac
    }

    fn ip_address(&mut self) -> Ipv4Addr {
        read_addr(unsafe { LwIP_GetIP(addr_of_mut!(xnetif)) })
    }

    fn netmask(&mut self) -> Ipv4Addr {
        read_addr(unsafe { LwIP_GetMASK(addr_of_mut!(xnetif)) })
    }

    fn gateway(&mut self) -> Ipv4Addr {
        read_addr(unsafe { LwIP_GetGW(addr_of_mut!(xnetif)) })
    }

    fn dhcp_start(&mut self) -> Result<(), WlanError> {
        unsafe { LwIP_DHCP(0, DHCP_START) };
        Ok(())
    }

    fn host_by_name(&mut self, hostname: &str) -> Result<Ipv4Addr, WlanError> {
        if hostname.len() > HOSTNAME_MAX {
            return Err(WlanError::HostNotFound);
        }
        let mut name = [0u8; HOSTNAME_MAX + 1];
        name[..hostname.len()].copy_from_slice(hostname.as_bytes());

        let mut addr = LwipIpAddr { addr: 0 };
        let err = unsafe { netconn_gethostbyname(name.as_ptr() as *const c_char, &mut addr) };
        if err != ERR_OK {
            return Err(WlanError::HostNotFound);
        }
        // ip_addr_t is kept in network byte order; its memory bytes are the
        // address octets.
        Ok(Ipv4Addr::from(addr.addr.to_ne_bytes()))
    }
}
