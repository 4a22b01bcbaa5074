use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Pure inspection of the Teller error envelope.
pub(crate) fn normalize(_status: u16, body: &str) -> Option<(String, String)> {
    let env: ErrorEnvelope = serde_json::from_str(body).ok()?;
    if env.error.code.is_empty() || env.error.message.is_empty() {
        return None;
    }
    Some((env.error.code, env.error.message))
}
