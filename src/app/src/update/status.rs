use crux_core::{render::render, Command};

use crate::commands::timer::TimerOutput;
use crate::events::{AuthEvent, ClockRead, Event, StatusEvent};
use crate::http_get;
use crate::http_helpers::GET_SYSTEM_INFO_ENDPOINT;
use crate::model::Model;
use crate::types::{PollTimer, StatusIndicator, SystemInfo};
use crate::{Effect, TimerCmd};

/// Status refresh interval while logged in
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Handle system info and polling events
pub fn handle(event: StatusEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        StatusEvent::StartPolling { interval_ms } => {
            if !model.is_authenticated() {
                log::debug!("Ignoring StartPolling while logged out");
                return Command::done();
            }
            start_polling(model, interval_ms)
        }

        StatusEvent::StopPolling => {
            let timer = model.poll_timer.take();
            Command::all([render(), cancel_timer(timer)])
        }

        StatusEvent::LoadSystemInfo => load_system_info(),

        StatusEvent::Timer(TimerOutput::Elapsed { id }) => match model.poll_timer {
            Some(timer) if timer.id == id => Command::all([
                load_system_info(),
                arm_timer(timer),
                TimerCmd::now().then_send(|now| match now {
                    Some(now_ms) => Event::Auth(AuthEvent::SessionExpiryCheck { now_ms }),
                    None => Event::Auth(AuthEvent::ClockUnavailable {
                        during: ClockRead::ExpiryCheck,
                    }),
                }),
            ]),
            _ => {
                log::debug!("Ignoring stale poll tick {id}");
                Command::done()
            }
        },

        StatusEvent::Timer(output) => {
            log::debug!("Timer: {output:?}");
            Command::done()
        }

        StatusEvent::SystemInfoResponse(_) if !model.is_authenticated() => {
            log::debug!("Dropping system info response after logout");
            Command::done()
        }

        StatusEvent::SystemInfoResponse(Ok(info)) => {
            model.system_info.merge(info);
            model.status_indicator = StatusIndicator::Online;
            render()
        }

        StatusEvent::SystemInfoResponse(Err(e)) => {
            log::warn!("{e}");
            model.status_indicator = StatusIndicator::Error;
            render()
        }
    }
}

/// Fetch live status once
pub fn load_system_info() -> Command<Effect, Event> {
    http_get!(
        Status,
        StatusEvent,
        GET_SYSTEM_INFO_ENDPOINT,
        SystemInfoResponse,
        "Load system info",
        parse: SystemInfo::from_json
    )
}

/// Refresh status right away and keep refreshing at the default interval
pub fn begin_polling(model: &mut Model) -> Command<Effect, Event> {
    Command::all([
        load_system_info(),
        start_polling(model, DEFAULT_POLL_INTERVAL_MS),
    ])
}

/// Arm a new poll timer, replacing any armed one.
///
/// The previous handle is cancelled and forgotten, so a tick it may still
/// deliver no longer matches `model.poll_timer` and is dropped.
pub fn start_polling(model: &mut Model, interval_ms: u64) -> Command<Effect, Event> {
    let interval_ms = if interval_ms == 0 {
        DEFAULT_POLL_INTERVAL_MS
    } else {
        interval_ms
    };
    let previous = model.poll_timer.take();
    let timer = PollTimer {
        id: model.allocate_timer_id(),
        interval_ms,
    };
    model.poll_timer = Some(timer);
    log::debug!("Polling system info every {interval_ms} ms (timer {})", timer.id);

    Command::all([cancel_timer(previous), arm_timer(timer), render()])
}

/// Cancel a poll timer handle, if there is one
pub fn cancel_timer(timer: Option<PollTimer>) -> Command<Effect, Event> {
    match timer {
        Some(timer) => TimerCmd::cancel(timer.id)
            .build()
            .then_send(|output| Event::Status(StatusEvent::Timer(output))),
        None => Command::done(),
    }
}

fn arm_timer(timer: PollTimer) -> Command<Effect, Event> {
    TimerCmd::start(timer.id, timer.interval_ms)
        .build()
        .then_send(|output| Event::Status(StatusEvent::Timer(output)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Session;
    use crate::TimerOperation;

    fn logged_in_model() -> Model {
        let mut model = Model::default();
        model.establish_session(Session::new(1_700_000_000_000));
        model
    }

    fn count_system_info_requests(cmd: &mut Command<Effect, Event>) -> usize {
        cmd.effects()
            .filter(|effect| match effect {
                Effect::Http(request) => request.operation.url.ends_with("/getsysteminfo"),
                _ => false,
            })
            .count()
    }

    fn timer_ops(cmd: &mut Command<Effect, Event>) -> Vec<TimerOperation> {
        cmd.effects()
            .filter_map(|effect| match effect {
                Effect::Timer(request) => Some(request.operation.clone()),
                _ => None,
            })
            .collect()
    }

    mod polling {
        use super::*;

        #[test]
        fn start_arms_one_timer_with_interval() {
            let mut model = logged_in_model();

            let mut cmd = handle(StatusEvent::StartPolling { interval_ms: 5000 }, &mut model);

            assert_eq!(
                model.poll_timer,
                Some(PollTimer {
                    id: 1,
                    interval_ms: 5000
                })
            );
            assert_eq!(
                timer_ops(&mut cmd),
                vec![TimerOperation::Start {
                    id: 1,
                    millis: 5000
                }]
            );
        }

        #[test]
        fn restart_cancels_previous_timer() {
            let mut model = logged_in_model();
            let _ = handle(StatusEvent::StartPolling { interval_ms: 5000 }, &mut model);

            let mut cmd = handle(StatusEvent::StartPolling { interval_ms: 5000 }, &mut model);

            assert_eq!(model.poll_timer.map(|t| t.id), Some(2));
            assert_eq!(
                timer_ops(&mut cmd),
                vec![
                    TimerOperation::Cancel { id: 1 },
                    TimerOperation::Start {
                        id: 2,
                        millis: 5000
                    }
                ]
            );
        }

        #[test]
        fn double_start_yields_a_single_poll_per_interval() {
            let mut model = logged_in_model();
            let _ = handle(StatusEvent::StartPolling { interval_ms: 5000 }, &mut model);
            let _ = handle(StatusEvent::StartPolling { interval_ms: 5000 }, &mut model);

            // Both timers fire after one interval; only the live one polls.
            let mut stale = handle(
                StatusEvent::Timer(TimerOutput::Elapsed { id: 1 }),
                &mut model,
            );
            let mut live = handle(
                StatusEvent::Timer(TimerOutput::Elapsed { id: 2 }),
                &mut model,
            );

            assert_eq!(
                count_system_info_requests(&mut stale) + count_system_info_requests(&mut live),
                1
            );
        }

        #[test]
        fn live_tick_rearms_and_checks_session() {
            let mut model = logged_in_model();
            let _ = handle(StatusEvent::StartPolling { interval_ms: 2000 }, &mut model);

            let mut cmd = handle(
                StatusEvent::Timer(TimerOutput::Elapsed { id: 1 }),
                &mut model,
            );

            let ops = timer_ops(&mut cmd);
            assert!(ops.contains(&TimerOperation::Start {
                id: 1,
                millis: 2000
            }));
            assert!(ops.contains(&TimerOperation::Now));
        }

        #[test]
        fn zero_interval_falls_back_to_default() {
            let mut model = logged_in_model();

            let _ = handle(StatusEvent::StartPolling { interval_ms: 0 }, &mut model);

            assert_eq!(
                model.poll_timer.map(|t| t.interval_ms),
                Some(DEFAULT_POLL_INTERVAL_MS)
            );
        }

        #[test]
        fn start_is_ignored_while_logged_out() {
            let mut model = Model::default();

            let mut cmd = handle(StatusEvent::StartPolling { interval_ms: 5000 }, &mut model);

            assert!(cmd.is_done());
            assert_eq!(model.poll_timer, None);
        }

        #[test]
        fn stop_cancels_and_later_ticks_are_ignored() {
            let mut model = logged_in_model();
            let _ = handle(StatusEvent::StartPolling { interval_ms: 5000 }, &mut model);

            let mut cmd = handle(StatusEvent::StopPolling, &mut model);
            assert_eq!(timer_ops(&mut cmd), vec![TimerOperation::Cancel { id: 1 }]);
            assert_eq!(model.poll_timer, None);

            let mut tick = handle(
                StatusEvent::Timer(TimerOutput::Elapsed { id: 1 }),
                &mut model,
            );
            assert!(tick.is_done());
        }
    }

    mod system_info {
        use super::*;

        #[test]
        fn partial_response_merges_into_display() {
            let mut model = logged_in_model();
            model.system_info = SystemInfo {
                ip_address: Some("1.2.3.4".to_string()),
                free_heap: Some(1000),
                ..Default::default()
            };

            let _ = handle(
                StatusEvent::SystemInfoResponse(Ok(SystemInfo {
                    free_heap: Some(900),
                    ..Default::default()
                })),
                &mut model,
            );

            assert_eq!(model.system_info.ip_address.as_deref(), Some("1.2.3.4"));
            assert_eq!(model.system_info.free_heap, Some(900));
            assert_eq!(model.status_indicator, StatusIndicator::Online);
        }

        #[test]
        fn failure_marks_indicator_and_keeps_last_known_values() {
            let mut model = logged_in_model();
            model.system_info.firmware_version = Some("1.4.2".to_string());
            model.status = None;

            let _ = handle(
                StatusEvent::SystemInfoResponse(Err("Load system info failed: timeout".into())),
                &mut model,
            );

            assert_eq!(model.status_indicator, StatusIndicator::Error);
            assert_eq!(model.system_info.firmware_version.as_deref(), Some("1.4.2"));
            assert_eq!(model.status, None);
        }

        #[test]
        fn recovery_after_failure_goes_back_online() {
            let mut model = logged_in_model();
            model.status_indicator = StatusIndicator::Error;

            let _ = handle(
                StatusEvent::SystemInfoResponse(Ok(SystemInfo::default())),
                &mut model,
            );

            assert_eq!(model.status_indicator, StatusIndicator::Online);
        }

        #[test]
        fn late_response_after_logout_is_dropped() {
            let mut model = Model::default();

            let mut ok = handle(
                StatusEvent::SystemInfoResponse(Ok(SystemInfo {
                    free_heap: Some(4242),
                    ..Default::default()
                })),
                &mut model,
            );
            let mut err = handle(
                StatusEvent::SystemInfoResponse(Err("Load system info failed: timeout".into())),
                &mut model,
            );

            assert!(ok.is_done());
            assert!(err.is_done());
            assert_eq!(model.status_indicator, StatusIndicator::Unknown);
            assert_eq!(model.system_info, SystemInfo::default());
        }
    }
}
