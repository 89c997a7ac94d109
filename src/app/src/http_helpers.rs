//! HTTP helper functions for Crux Core
//!
//! This module extracts common HTTP response handling logic from the update
//! handlers into debuggable, testable functions.

use crux_http::Response;

/// Base URL for device API endpoints.
///
/// NOTE: This is a dummy prefix required because `crux_http` requires absolute
/// URLs and rejects relative paths (`RelativeUrlWithoutBase` error).
/// The UI shell strips this prefix before sending requests via `fetch()`,
/// so requests go to whichever host served the console.
pub const BASE_URL: &str = "https://relative";

pub const GET_CONFIG_ENDPOINT: &str = "/getconfig";
pub const GET_SYSTEM_INFO_ENDPOINT: &str = "/getsysteminfo";
pub const SAVE_ENDPOINT: &str = "/save";

/// Constructs the full address from a given endpoint.
///
/// # Example
/// ```
/// use device_console_core::http_helpers::build_url;
/// let url = build_url("/getconfig");
/// assert_eq!(url, "https://relative/getconfig");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Returns `true` if the response status is 2xx.
pub fn is_response_success(response: &Response<Vec<u8>>) -> bool {
    response.status().is_success()
}

/// Extracts error message from HTTP response.
pub fn extract_error_message(action: &str, response: &mut Response<Vec<u8>>) -> String {
    let status = response.status().to_string();

    match response.take_body() {
        Some(body) if !body.is_empty() => match String::from_utf8(body) {
            Ok(msg) => format!("{action} failed: HTTP {status}: {msg}"),
            Err(e) => format!("{action} failed: HTTP {status} (Invalid UTF-8: {e})"),
        },
        Some(_) => format!("{action} failed: HTTP {status} (Empty body)"),
        None => format!("{action} failed: HTTP {status} (No body)"),
    }
}

/// Maps a transport-level failure to a message.
pub fn map_http_error(action: &str, error: crux_http::HttpError) -> String {
    format!("{action} failed: {error}")
}

/// Parse JSON from response body.
///
/// Returns error if response is not successful or JSON parsing fails.
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<T, String> {
    if !is_response_success(response) {
        return Err(extract_error_message(action, response));
    }

    match response.take_body() {
        Some(body) => {
            serde_json::from_slice(&body).map_err(|e| format!("{action}: JSON parse error: {e}"))
        }
        None => Err(format!("{action}: Empty response body")),
    }
}

/// Process HTTP response result and parse JSON
pub fn process_json_response<T: serde::de::DeserializeOwned>(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<T, String> {
    match result {
        Ok(mut response) => parse_json_response(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

/// Read the body as text whatever the status code.
///
/// The device reports save failures as human-readable text, sometimes with a
/// non-2xx status, and that text must reach the user unchanged. Only a
/// transport failure is an `Err`.
pub fn read_text_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<String, String> {
    match result {
        Ok(mut response) => {
            if !is_response_success(&response) {
                log::warn!("{action}: device answered HTTP {}", response.status());
            }
            let body = response.take_body().unwrap_or_default();
            Ok(String::from_utf8_lossy(&body).into_owned())
        }
        Err(e) => Err(map_http_error(action, e)),
    }
}

// Note: Unit tests for these helpers are not included because crux_http::Response
// has a private constructor. They are exercised through the update handlers'
// response events.
