//! WiFi station-mode bring-up.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp-idf-svc` blocking WiFi driver.
//! - **all other targets**: credential validation only; the host
//!   simulation has no radio.
//!
//! Credentials are checked before the radio is touched so a bad build-time
//! configuration fails fast with a readable error.

use core::fmt;
use log::info;

#[cfg(target_os = "espidf")]
use esp_idf_svc::eventloop::EspSystemEventLoop;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::modem::Modem;
#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::EspDefaultNvsPartition;
#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
#[cfg(target_os = "espidf")]
use log::warn;

use crate::config::NetworkConfig;
use crate::error::CommsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

impl From<WifiError> for CommsError {
    fn from(_: WifiError) -> Self {
        Self::WifiConnectFailed
    }
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Check SSID and password before handing them to the driver.
pub fn validate_credentials(ssid: &str, password: &str) -> Result<(), WifiError> {
    if ssid.is_empty() {
        return Err(WifiError::NoCredentials);
    }
    if ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(WifiError::InvalidSsid);
    }
    if !password.is_empty() && !(8..=64).contains(&password.len()) {
        return Err(WifiError::InvalidPassword);
    }
    Ok(())
}

/// Bring the station up and block until it has an IP address.
#[cfg(target_os = "espidf")]
pub fn connect(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: Option<EspDefaultNvsPartition>,
    net: &NetworkConfig,
) -> Result<BlockingWifi<EspWifi<'static>>, WifiError> {
    validate_credentials(&net.wifi_ssid, &net.wifi_password)?;

    let fail = |e: esp_idf_svc::sys::EspError| {
        warn!("WiFi: {}", e);
        WifiError::ConnectionFailed
    };

    let driver = EspWifi::new(modem, sysloop.clone(), nvs).map_err(fail)?;
    let mut wifi = BlockingWifi::wrap(driver, sysloop).map_err(fail)?;

    let auth_method = if net.wifi_password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };
    let ssid = net.wifi_ssid.as_str().try_into().map_err(|_| WifiError::InvalidSsid)?;
    let password = net
        .wifi_password
        .as_str()
        .try_into()
        .map_err(|_| WifiError::InvalidPassword)?;
    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid,
        password,
        auth_method,
        ..Default::default()
    }))
    .map_err(fail)?;

    info!("WiFi: connecting to '{}'", net.wifi_ssid);
    wifi.start().map_err(fail)?;
    wifi.connect().map_err(fail)?;
    wifi.wait_netif_up().map_err(fail)?;
    info!("WiFi: connected");
    Ok(wifi)
}

/// Host build: validate and report; there is no radio to start.
#[cfg(not(target_os = "espidf"))]
pub fn connect(net: &NetworkConfig) -> Result<(), WifiError> {
    validate_credentials(&net.wifi_ssid, &net.wifi_password)?;
    info!("WiFi(sim): connected to '{}'", net.wifi_ssid);
    Ok(())
}
