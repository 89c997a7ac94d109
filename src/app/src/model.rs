use serde::{Deserialize, Serialize};

use crate::types::*;

/// Application Model - the complete state
/// Also serves as the ViewModel when serialized
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    // Session state
    pub session_state: SessionState,
    pub session: Option<Session>,

    // Configuration form state
    pub config_form: DeviceConfig,
    /// Last configuration loaded from or saved to the device (password blank)
    pub config_baseline: DeviceConfig,
    pub config_form_dirty: bool,

    // Live status panel
    pub system_info: SystemInfo,
    pub status_indicator: StatusIndicator,

    // Polling state
    pub poll_timer: Option<PollTimer>,
    pub next_timer_id: u64,

    // UI state
    pub is_loading: bool,
    pub status: Option<StatusMessage>,
}

impl Model {
    pub fn is_authenticated(&self) -> bool {
        self.session_state == SessionState::LoggedIn
    }

    /// Replace the status line
    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    /// Set an error status and stop loading
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.is_loading = false;
        self.status = Some(StatusMessage::error(error));
    }

    /// Set an error status, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: impl Into<String>,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Allocate a fresh timer id
    pub fn allocate_timer_id(&mut self) -> u64 {
        self.next_timer_id += 1;
        self.next_timer_id
    }

    /// Enter `LoggedIn` with the given session
    pub fn establish_session(&mut self, session: Session) {
        self.session = Some(session);
        self.session_state = SessionState::LoggedIn;
    }

    /// Enter `LoggedOut`, dropping the session and everything sensitive
    ///
    /// Returns the poll timer that was armed, if any, so the caller can cancel it.
    pub fn invalidate_session(&mut self) -> Option<PollTimer> {
        self.session = None;
        self.session_state = SessionState::LoggedOut;
        self.is_loading = false;
        self.config_form.clear_secrets();
        self.config_baseline.clear_secrets();
        self.config_form_dirty = false;
        self.status_indicator = StatusIndicator::Unknown;
        self.poll_timer.take()
    }

    /// Recompute the dirty flag against the baseline
    pub fn update_config_dirty(&mut self) {
        self.config_form_dirty = self.config_form != self.config_baseline;
    }
}
