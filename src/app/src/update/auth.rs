use crux_core::{render::render, Command};

use crate::commands::storage::StorageOutput;
use crate::events::{AuthEvent, ClockRead, Event};
use crate::model::Model;
use crate::types::{Session, StatusMessage, ADMIN_PASSWORD, SESSION_STORAGE_KEY};
use crate::{Effect, StorageCmd, TimerCmd};

use super::{config, status};

/// Handle session manager events
pub fn handle(event: AuthEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        AuthEvent::CheckSession => StorageCmd::get(SESSION_STORAGE_KEY)
            .build()
            .then_send(|output| Event::Auth(AuthEvent::SessionRead(output))),

        AuthEvent::SessionRead(output) => handle_session_read(output),

        AuthEvent::SessionValidate { session, now_ms } => {
            if session.is_valid_at(now_ms) {
                log::info!("Restored session from {}", session.login_timestamp);
                enter_logged_in(session, model)
            } else {
                expire_session(model)
            }
        }

        AuthEvent::Login { password } => {
            if password != ADMIN_PASSWORD {
                log::warn!("Rejected login attempt");
                return model.set_error_and_render("Incorrect password.");
            }
            TimerCmd::now().then_send(|now| match now {
                Some(now_ms) => Event::Auth(AuthEvent::LoginAccepted { now_ms }),
                None => Event::Auth(AuthEvent::ClockUnavailable {
                    during: ClockRead::Login,
                }),
            })
        }

        AuthEvent::LoginAccepted { now_ms } => {
            let session = Session::new(now_ms);
            let persist = match session.to_json() {
                Ok(json) => StorageCmd::set(SESSION_STORAGE_KEY, json)
                    .build()
                    .then_send(|output| Event::Auth(AuthEvent::SessionStorageResult(output))),
                Err(e) => {
                    log::error!("{e}");
                    Command::done()
                }
            };
            model.clear_status();
            Command::all([persist, enter_logged_in(session, model)])
        }

        AuthEvent::Logout => {
            let timer = model.invalidate_session();
            model.set_status(StatusMessage::info("Logged out successfully"));
            Command::all([render(), remove_stored_session(), status::cancel_timer(timer)])
        }

        AuthEvent::SessionExpiryCheck { now_ms } => {
            let expired = model.is_authenticated()
                && model
                    .session
                    .is_some_and(|session| !session.is_valid_at(now_ms));
            if expired {
                log::info!("Session expired while logged in");
                expire_session(model)
            } else {
                Command::done()
            }
        }

        AuthEvent::SessionStorageResult(output) => {
            if let StorageOutput::Error { message } = output {
                log::warn!("Session storage failed: {message}");
            }
            Command::done()
        }

        AuthEvent::ClockUnavailable { during } => {
            log::error!("Clock read failed ({during:?})");
            match during {
                ClockRead::Login => model.set_error_and_render("Login failed: clock unavailable."),
                // Stored session stays in place for the next attempt
                ClockRead::SessionRestore => render(),
                ClockRead::ExpiryCheck => Command::done(),
            }
        }
    }
}

fn handle_session_read(output: StorageOutput) -> Command<Effect, Event> {
    match output {
        StorageOutput::Value { value: None } => {
            log::debug!("No stored session");
            render()
        }
        StorageOutput::Value { value: Some(raw) } => match Session::from_json(&raw) {
            Ok(session) => TimerCmd::now().then_send(move |now| match now {
                Some(now_ms) => Event::Auth(AuthEvent::SessionValidate { session, now_ms }),
                None => Event::Auth(AuthEvent::ClockUnavailable {
                    during: ClockRead::SessionRestore,
                }),
            }),
            Err(e) => {
                log::warn!("{e}");
                Command::all([render(), remove_stored_session()])
            }
        },
        StorageOutput::Error { message } => {
            log::warn!("Reading session failed: {message}");
            render()
        }
        StorageOutput::Done => {
            log::warn!("Unexpected storage output for session read");
            render()
        }
    }
}

/// Enter `LoggedIn` and start the controller with a configuration load
fn enter_logged_in(session: Session, model: &mut Model) -> Command<Effect, Event> {
    model.establish_session(session);
    Command::all([render(), config::load_config()])
}

/// Drop an expired session: clear storage, stop polling, tell the user
fn expire_session(model: &mut Model) -> Command<Effect, Event> {
    let timer = model.invalidate_session();
    model.set_status(StatusMessage::warning(
        "Session expired. Please log in again.",
    ));
    Command::all([render(), remove_stored_session(), status::cancel_timer(timer)])
}

fn remove_stored_session() -> Command<Effect, Event> {
    StorageCmd::remove(SESSION_STORAGE_KEY)
        .build()
        .then_send(|output| Event::Auth(AuthEvent::SessionStorageResult(output)))
}
