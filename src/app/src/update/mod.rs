mod auth;
mod config;
mod status;
mod ui;

pub use status::DEFAULT_POLL_INTERVAL_MS;

use crux_core::Command;

use crate::events::{AuthEvent, Event};
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        // Initialization: the persisted session decides the first screen
        Event::Initialize => auth::handle(AuthEvent::CheckSession, model),

        Event::Auth(event) => auth::handle(event, model),
        Event::Config(event) => config::handle(event, model),
        Event::Status(event) => status::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}
