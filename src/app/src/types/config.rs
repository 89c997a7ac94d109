use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_valid::Validate;

use super::common::{string_field, u64_field};

pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Phrases the device uses to report a successful save (Vietnamese and English firmware builds)
pub const SAVE_SUCCESS_MARKERS: [&str; 2] = ["Đã lưu", "Saved"];

/// Device network and integration settings as edited in the config form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct DeviceConfig {
    #[validate(min_length = 1)]
    pub ssid: String,
    /// Write-only. Never returned by the device; blank means "unchanged".
    pub password: String,
    pub mqtt_server: String,
    pub mqtt_port: u16,
    pub api_key: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            mqtt_server: String::new(),
            mqtt_port: DEFAULT_MQTT_PORT,
            api_key: String::new(),
        }
    }
}

impl DeviceConfig {
    /// Overwrite fields present in `patch`. The password is always blanked.
    pub fn merge(&mut self, patch: DeviceConfigPatch) {
        if let Some(ssid) = patch.ssid {
            self.ssid = ssid;
        }
        if let Some(server) = patch.mqtt_server {
            self.mqtt_server = server;
        }
        if let Some(port) = patch.mqtt_port {
            self.mqtt_port = port;
        }
        if let Some(key) = patch.api_key {
            self.api_key = key;
        }
        self.password.clear();
    }

    /// Blank the credentials held in the form
    pub fn clear_secrets(&mut self) {
        self.password.clear();
        self.api_key.clear();
    }
}

/// Subset of the configuration reported by `GET /getconfig`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfigPatch {
    pub ssid: Option<String>,
    pub mqtt_server: Option<String>,
    pub mqtt_port: Option<u16>,
    pub api_key: Option<String>,
}

impl DeviceConfigPatch {
    /// Pick the known keys out of a device response.
    ///
    /// Empty strings, out-of-range ports and wrongly typed values are dropped
    /// so they never blank a form field.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let Value::Object(object) = value else {
            return Err("Configuration response is not a JSON object".to_string());
        };
        let non_empty = |key: &str| string_field(object, key).filter(|s| !s.is_empty());

        Ok(Self {
            ssid: non_empty("ssid"),
            mqtt_server: non_empty("mqtt_server"),
            mqtt_port: u64_field(object, "mqtt_port")
                .and_then(|port| u16::try_from(port).ok())
                .filter(|port| *port != 0),
            api_key: non_empty("api_key"),
        })
    }
}

/// Form body of `POST /save`; field names follow the firmware handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveConfigRequest {
    pub ssid: String,
    pub pass: String,
    pub mqtt_server: String,
    pub mqtt_port: u16,
    pub api_key: String,
}

impl From<&DeviceConfig> for SaveConfigRequest {
    fn from(config: &DeviceConfig) -> Self {
        Self {
            ssid: config.ssid.clone(),
            pass: config.password.clone(),
            mqtt_server: config.mqtt_server.clone(),
            mqtt_port: config.mqtt_port,
            api_key: config.api_key.clone(),
        }
    }
}

/// Whether the free-form text returned by `/save` reports success
pub fn is_save_success(text: &str) -> bool {
    SAVE_SUCCESS_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}
