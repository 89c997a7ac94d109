use serde::{Deserialize, Serialize};

/// Fixed operator credential.
///
/// NOTE: This is a UI deterrent only. Anyone reading the WASM bundle can
/// recover it, and the device endpoints do not check it.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Session lifetime after login: 24 hours.
pub const SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Key of the persisted session in tab-scoped storage
pub const SESSION_STORAGE_KEY: &str = "device_console_session";

/// Whether the gate screen or the console is shown
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// Persisted record of a successful login
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub authenticated: bool,
    /// Milliseconds since the Unix epoch
    pub login_timestamp: u64,
}

impl Session {
    pub fn new(login_timestamp: u64) -> Self {
        Self {
            authenticated: true,
            login_timestamp,
        }
    }

    /// A session is valid for strictly less than [`SESSION_TTL_MS`] after login.
    ///
    /// A clock that went backwards counts as zero elapsed time.
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        self.authenticated && now_ms.saturating_sub(self.login_timestamp) < SESSION_TTL_MS
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize session: {e}"))
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("Invalid stored session: {e}"))
    }
}
