//! Response rendering.

/// Renders a response payload for the terminal.
///
/// Payloads that parse as JSON are re-emitted (pretty-printed on request);
/// anything else is printed as lossy UTF-8. An empty response prints `ok`.
pub fn render(payload: Option<&[u8]>, pretty: bool) -> Result<String, serde_json::Error> {
    let Some(bytes) = payload else {
        return Ok("ok".to_string());
    };

    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(value) if pretty => serde_json::to_string_pretty(&value),
        Ok(_) | Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}
