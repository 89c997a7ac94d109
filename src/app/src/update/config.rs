use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::events::{ConfigEvent, Event};
use crate::http_get;
use crate::http_helpers::{build_url, read_text_response, GET_CONFIG_ENDPOINT, SAVE_ENDPOINT};
use crate::model::Model;
use crate::types::{is_save_success, DeviceConfigPatch, SaveConfigRequest, StatusMessage};
use crate::{Effect, HttpCmd};

use super::status;

/// Handle configuration form events
pub fn handle(event: ConfigEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ConfigEvent::LoadConfig => load_config(),

        ConfigEvent::LoadConfigResponse(result) => {
            if !model.is_authenticated() {
                log::debug!("Dropping configuration response after logout");
                return Command::done();
            }

            match result {
                Ok(patch) => {
                    model.config_form.merge(patch);
                    model.config_baseline = model.config_form.clone();
                    model.config_form_dirty = false;
                }
                Err(e) => {
                    log::warn!("{e}");
                    model.set_status(StatusMessage::warning(
                        "Could not load the current configuration from the device.",
                    ));
                }
            }

            // Second step of the controller start: status polling
            Command::all([render(), status::begin_polling(model)])
        }

        ConfigEvent::FormChanged { config } => {
            model.config_form = config;
            model.update_config_dirty();
            render()
        }

        ConfigEvent::SaveConfig { config } => {
            model.config_form = config;
            model.update_config_dirty();
            save_config(model)
        }

        ConfigEvent::SaveConfigResponse(result) => {
            model.is_loading = false;
            match result {
                Ok(text) if is_save_success(&text) => {
                    log::info!("Configuration saved: {text}");
                    model.config_baseline = model.config_form.clone();
                    model.config_form_dirty = false;
                    model.set_status(StatusMessage::success(text));
                }
                Ok(text) => {
                    log::warn!("Device rejected configuration: {text}");
                    model.set_status(StatusMessage::error(text));
                }
                Err(e) => {
                    log::error!("Error saving config: {e}");
                    model.set_error("Error saving configuration. Check logs.");
                }
            }
            render()
        }
    }
}

/// Fetch the device configuration into the form
pub fn load_config() -> Command<Effect, Event> {
    http_get!(
        Config,
        ConfigEvent,
        GET_CONFIG_ENDPOINT,
        LoadConfigResponse,
        "Load configuration",
        parse: DeviceConfigPatch::from_json
    )
}

fn save_config(model: &mut Model) -> Command<Effect, Event> {
    if !model.is_authenticated() {
        return model.set_error_and_render("Save configuration failed: Not authenticated");
    }

    if let Err(e) = model.config_form.validate() {
        log::debug!("Config form rejected: {e}");
        return model.set_error_and_render("SSID cannot be empty.");
    }

    let request = SaveConfigRequest::from(&model.config_form);
    match HttpCmd::post(build_url(SAVE_ENDPOINT)).body_form(&request) {
        Ok(builder) => {
            model.is_loading = true;
            model.set_status(StatusMessage::info("Saving and attempting to connect..."));
            Command::all([
                render(),
                builder.build().then_send(|result| {
                    Event::Config(ConfigEvent::SaveConfigResponse(read_text_response(
                        "Save configuration",
                        result,
                    )))
                }),
            ])
        }
        Err(e) => model.set_error_and_render(format!("Failed to create save request: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceConfig, Session, Severity};

    fn logged_in_model() -> Model {
        let mut model = Model::default();
        model.establish_session(Session::new(1_700_000_000_000));
        model
    }

    fn http_requests(cmd: &mut Command<Effect, Event>) -> Vec<(String, String)> {
        cmd.effects()
            .filter_map(|effect| match effect {
                Effect::Http(request) => Some((
                    request.operation.method.clone(),
                    request.operation.url.clone(),
                )),
                _ => None,
            })
            .collect()
    }

    mod load {
        use super::*;

        #[test]
        fn present_keys_fill_the_form_and_password_stays_blank() {
            let mut model = logged_in_model();
            model.config_form.mqtt_server = "broker.local".to_string();
            model.config_form.password = "typed".to_string();

            let _ = handle(
                ConfigEvent::LoadConfigResponse(Ok(DeviceConfigPatch {
                    ssid: Some("Home".to_string()),
                    ..Default::default()
                })),
                &mut model,
            );

            assert_eq!(model.config_form.ssid, "Home");
            assert_eq!(model.config_form.password, "");
            assert_eq!(model.config_form.mqtt_server, "broker.local");
            assert_eq!(model.config_form.mqtt_port, 1883);
            assert!(!model.config_form_dirty);
        }

        #[test]
        fn failure_keeps_form_and_warns() {
            let mut model = logged_in_model();
            model.config_form.ssid = "Kept".to_string();

            let _ = handle(
                ConfigEvent::LoadConfigResponse(Err("Load configuration failed: HTTP 500".into())),
                &mut model,
            );

            assert_eq!(model.config_form.ssid, "Kept");
            assert_eq!(model.status.as_ref().unwrap().severity, Severity::Warning);
        }

        #[test]
        fn response_continues_with_status_polling() {
            let mut model = logged_in_model();

            let mut cmd = handle(
                ConfigEvent::LoadConfigResponse(Ok(DeviceConfigPatch::default())),
                &mut model,
            );

            assert!(model.poll_timer.is_some());
            let requests = http_requests(&mut cmd);
            assert_eq!(requests.len(), 1);
            assert!(requests[0].1.ends_with("/getsysteminfo"));
        }

        #[test]
        fn late_response_after_logout_does_not_poll() {
            let mut model = Model::default();

            let mut cmd = handle(
                ConfigEvent::LoadConfigResponse(Ok(DeviceConfigPatch::default())),
                &mut model,
            );

            assert!(cmd.is_done());
            assert!(model.poll_timer.is_none());
        }

        #[test]
        fn late_response_after_logout_leaves_form_and_status_alone() {
            let mut model = Model {
                status: Some(StatusMessage::info("Logged out successfully")),
                ..Default::default()
            };

            let _ = handle(
                ConfigEvent::LoadConfigResponse(Ok(DeviceConfigPatch {
                    ssid: Some("Home".to_string()),
                    api_key: Some("secret-key".to_string()),
                    ..Default::default()
                })),
                &mut model,
            );
            let _ = handle(
                ConfigEvent::LoadConfigResponse(Err("Load configuration failed: timeout".into())),
                &mut model,
            );

            assert_eq!(model.config_form.api_key, "");
            assert_eq!(model.config_form.ssid, "");
            assert_eq!(
                model.status,
                Some(StatusMessage::info("Logged out successfully"))
            );
        }
    }

    mod save {
        use super::*;

        fn config(ssid: &str) -> DeviceConfig {
            DeviceConfig {
                ssid: ssid.to_string(),
                password: "secret".to_string(),
                mqtt_server: "broker.local".to_string(),
                mqtt_port: 1883,
                api_key: "key".to_string(),
            }
        }

        #[test]
        fn empty_ssid_issues_no_request() {
            let mut model = logged_in_model();

            let mut cmd = handle(ConfigEvent::SaveConfig { config: config("") }, &mut model);

            assert!(http_requests(&mut cmd).is_empty());
            assert_eq!(
                model.status,
                Some(StatusMessage::error("SSID cannot be empty."))
            );
            assert!(!model.is_loading);
        }

        #[test]
        fn valid_form_posts_to_save() {
            let mut model = logged_in_model();

            let mut cmd = handle(
                ConfigEvent::SaveConfig {
                    config: config("Home2"),
                },
                &mut model,
            );

            assert!(model.is_loading);
            assert_eq!(
                model.status,
                Some(StatusMessage::info("Saving and attempting to connect..."))
            );
            let requests = http_requests(&mut cmd);
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].0, "POST");
            assert!(requests[0].1.ends_with("/save"));
        }

        #[test]
        fn save_requires_login() {
            let mut model = Model::default();

            let mut cmd = handle(
                ConfigEvent::SaveConfig {
                    config: config("Home"),
                },
                &mut model,
            );

            assert!(http_requests(&mut cmd).is_empty());
            assert_eq!(model.status.as_ref().unwrap().severity, Severity::Error);
        }

        #[test]
        fn response_text_is_shown_verbatim_with_classification() {
            for (text, severity) in [
                ("Đã lưu cấu hình", Severity::Success),
                ("Saved successfully", Severity::Success),
                ("Save failed: invalid port", Severity::Error),
            ] {
                let mut model = logged_in_model();
                model.is_loading = true;

                let _ = handle(
                    ConfigEvent::SaveConfigResponse(Ok(text.to_string())),
                    &mut model,
                );

                assert!(!model.is_loading);
                assert_eq!(model.status, Some(StatusMessage::new(text, severity)));
            }
        }

        #[test]
        fn transport_error_shows_generic_message() {
            let mut model = logged_in_model();
            model.is_loading = true;

            let _ = handle(
                ConfigEvent::SaveConfigResponse(Err("Save configuration failed: offline".into())),
                &mut model,
            );

            assert_eq!(
                model.status,
                Some(StatusMessage::error("Error saving configuration. Check logs."))
            );
            assert!(!model.is_loading);
        }

        #[test]
        fn successful_save_resets_dirty_flag() {
            let mut model = logged_in_model();
            let _ = handle(
                ConfigEvent::FormChanged {
                    config: config("Home2"),
                },
                &mut model,
            );
            assert!(model.config_form_dirty);

            let _ = handle(
                ConfigEvent::SaveConfigResponse(Ok("Saved".to_string())),
                &mut model,
            );

            assert!(!model.config_form_dirty);
        }
    }
}
