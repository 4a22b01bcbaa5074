use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    code: String,
    message: String,
}

/// Pure inspection of the Duffel error envelope.
///
/// Returns the first entry's code and message, or `None` when the body does
/// not match the envelope, in which case the caller keeps the raw failure.
pub(crate) fn normalize(_status: u16, body: &str) -> Option<(String, String)> {
    let env: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let first = env.errors.into_iter().next()?;
    if first.code.is_empty() || first.message.is_empty() {
        return None;
    }
    Some((first.code, first.message))
}
