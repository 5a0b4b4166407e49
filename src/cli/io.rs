//! JSON output for `invoke`
//!
//! One JSON object per invocation on stdout:
//! `{"status": <code>, "body": <json or text>}`.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Interpret a response body as JSON, falling back to text
pub fn body_value(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Write an invocation result to stdout
pub fn write_invocation(status: u16, body: &[u8]) -> CliResult<()> {
    let response = serde_json::json!({
        "status": status,
        "body": body_value(body),
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
