/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.status, None)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.is_loading, false;
///     model.status, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

/// Macro for device GET requests expecting a JSON body.
/// Does not set loading state; the body is handed to a lenient parser so a
/// partially matching payload still produces a value.
/// Requires domain parameters for event wrapping.
///
/// # Example
/// ```ignore
/// http_get!(Status, StatusEvent, GET_SYSTEM_INFO_ENDPOINT, SystemInfoResponse, "Load system info",
///     parse: SystemInfo::from_json)
/// ```
#[macro_export]
macro_rules! http_get {
    ($domain:ident, $domain_event:ident, $endpoint:expr, $response_event:ident, $action:expr, parse: $parser:expr) => {
        $crate::HttpCmd::get($crate::http_helpers::build_url($endpoint))
            .build()
            .then_send(|result| {
                let event_result =
                    $crate::http_helpers::process_json_response::<serde_json::Value>(
                        $action, result,
                    )
                    .and_then(|value| $parser(&value));
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                    event_result,
                ))
            })
    };
}
