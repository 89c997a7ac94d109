use serde::{Deserialize, Serialize};

use crate::commands::storage::StorageOutput;
use crate::commands::timer::TimerOutput;
use crate::types::*;

/// Session manager events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    CheckSession,
    Login {
        password: String,
    },
    Logout,

    // Shell responses (internal events, skipped from serialization)
    #[serde(skip)]
    SessionRead(StorageOutput),
    #[serde(skip)]
    SessionValidate {
        session: Session,
        now_ms: u64,
    },
    #[serde(skip)]
    LoginAccepted {
        now_ms: u64,
    },
    #[serde(skip)]
    SessionExpiryCheck {
        now_ms: u64,
    },
    #[serde(skip)]
    SessionStorageResult(StorageOutput),
    #[serde(skip)]
    ClockUnavailable {
        during: ClockRead,
    },
}

/// What a clock read was for, so a failed read can be handled in place
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ClockRead {
    Login,
    SessionRestore,
    ExpiryCheck,
}

/// Configuration form events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    LoadConfig,
    FormChanged {
        config: DeviceConfig,
    },
    SaveConfig {
        config: DeviceConfig,
    },

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    LoadConfigResponse(Result<DeviceConfigPatch, String>),
    /// `Ok` carries the response text of any HTTP answer, `Err` a transport failure
    #[serde(skip)]
    SaveConfigResponse(Result<String, String>),
}

/// System info polling events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    StartPolling {
        interval_ms: u64,
    },
    StopPolling,
    LoadSystemInfo,

    #[serde(skip)]
    Timer(TimerOutput),
    #[serde(skip)]
    SystemInfoResponse(Result<SystemInfo, String>),
}

/// UI-only events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearStatus,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Initialize,
    Auth(AuthEvent),
    Config(ConfigEvent),
    Status(StatusEvent),
    Ui(UiEvent),
}
