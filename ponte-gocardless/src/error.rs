use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    summary: String,
    detail: String,
}

/// Pure inspection of the GoCardless error envelope. The `summary` acts as
/// the code and `detail` as the message.
pub(crate) fn normalize(_status: u16, body: &str) -> Option<(String, String)> {
    let env: ErrorEnvelope = serde_json::from_str(body).ok()?;
    if env.summary.is_empty() || env.detail.is_empty() {
        return None;
    }
    Some((env.summary, env.detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_envelope() {
        let body = r#"{"summary":"Invalid token","detail":"Token is invalid or expired","status_code":401}"#;
        let (code, message) = normalize(401, body).unwrap();
        assert_eq!(code, "Invalid token");
        assert_eq!(message, "Token is invalid or expired");
    }

    #[test]
    fn foreign_shapes_are_left_alone() {
        assert!(normalize(500, "<html>service unavailable</html>").is_none());
        assert!(normalize(401, r#"{"detail":"no summary"}"#).is_none());
    }
}
