use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    code: Option<i64>,
    title: Option<String>,
    detail: Option<String>,
}

/// Pure inspection of the Amadeus error envelope.
///
/// Amadeus codes are numeric; they are carried as their decimal string. The
/// message prefers `detail` over `title`. `None` when the body does not
/// match the envelope.
pub(crate) fn normalize(_status: u16, body: &str) -> Option<(String, String)> {
    let env: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let first = env.errors.into_iter().next()?;
    let code = first.code?.to_string();
    let message = first.detail.or(first.title)?;
    if message.is_empty() {
        return None;
    }
    Some((code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_envelope() {
        let body = r#"{"errors":[{"status":400,"code":477,"title":"INVALID FORMAT","detail":"departure date is in the past"}]}"#;
        let (code, message) = normalize(400, body).unwrap();
        assert_eq!(code, "477");
        assert_eq!(message, "departure date is in the past");
    }

    #[test]
    fn falls_back_to_the_title() {
        let body = r#"{"errors":[{"code":38189,"title":"Internal error"}]}"#;
        let (code, message) = normalize(500, body).unwrap();
        assert_eq!(code, "38189");
        assert_eq!(message, "Internal error");
    }

    #[test]
    fn foreign_shapes_are_left_alone() {
        assert!(normalize(401, r#"{"error":"invalid_client"}"#).is_none());
        assert!(normalize(500, "oops").is_none());
        assert!(normalize(400, r#"{"errors":[{"title":"no code"}]}"#).is_none());
    }
}
