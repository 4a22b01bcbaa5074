use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error_code: String,
    error_message: String,
}

/// Pure inspection of the Plaid error envelope. Plaid answers errors with a
/// flat body carrying `error_type`/`error_code`/`error_message`.
pub(crate) fn normalize(_status: u16, body: &str) -> Option<(String, String)> {
    let env: ErrorEnvelope = serde_json::from_str(body).ok()?;
    if env.error_code.is_empty() || env.error_message.is_empty() {
        return None;
    }
    Some((env.error_code, env.error_message))
}
