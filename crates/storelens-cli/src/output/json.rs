use std::io;

use serde::Serialize;
use serde_json::{Value, json};
use storelens_client::{ClientError, SuccessEnvelope};

const JSON_VERSION: &str = "v1";

/// JSON success shape: `{ ok, command, version, data }` where `data` is the
/// command payload unchanged.
pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "rfm" => envelope(success),
        command if command.starts_with("report ") => envelope(success),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let mut payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    if let Some(data) = &error.data {
        payload["data"] = data.clone();
    }
    serialize_json_pretty(&payload)
}

fn envelope(success: &SuccessEnvelope) -> Value {
    json!({
        "ok": true,
        "command": success.command,
        "version": JSON_VERSION,
        "data": success.data.clone(),
    })
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
