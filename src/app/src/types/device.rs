use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{string_field, u64_field};

/// Live device status as shown in the read-only panel.
///
/// Every field is optional: a poll response only overwrites the keys it
/// actually carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub device_id: Option<String>,
    pub firmware_version: Option<String>,
    pub wifi_status: Option<String>,
    pub ip_address: Option<String>,
    pub mqtt_status: Option<String>,
    pub system_time: Option<String>,
    /// Bytes
    pub free_heap: Option<u64>,
}

impl SystemInfo {
    /// Parse a `/getsysteminfo` body, keeping only keys with a usable value
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let Value::Object(object) = value else {
            return Err("System info response is not a JSON object".to_string());
        };

        Ok(Self {
            device_id: string_field(object, "deviceId"),
            firmware_version: string_field(object, "firmwareVersion"),
            wifi_status: string_field(object, "wifiStatus"),
            ip_address: string_field(object, "ipAddress"),
            mqtt_status: string_field(object, "mqttStatus"),
            system_time: string_field(object, "systemTime"),
            free_heap: u64_field(object, "freeHeap"),
        })
    }

    /// Overwrite only the fields present in `update`
    pub fn merge(&mut self, update: SystemInfo) {
        fn take<T>(field: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *field = value;
            }
        }

        take(&mut self.device_id, update.device_id);
        take(&mut self.firmware_version, update.firmware_version);
        take(&mut self.wifi_status, update.wifi_status);
        take(&mut self.ip_address, update.ip_address);
        take(&mut self.mqtt_status, update.mqtt_status);
        take(&mut self.system_time, update.system_time);
        take(&mut self.free_heap, update.free_heap);
    }
}

/// Primary health indicator of the system info panel
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StatusIndicator {
    #[default]
    Unknown,
    Online,
    Error,
}

/// Handle of the single armed poll timer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PollTimer {
    pub id: u64,
    pub interval_ms: u64,
}
