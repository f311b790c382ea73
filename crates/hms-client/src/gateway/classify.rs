//! Pure response classification.
//!
//! Turns a transport status plus raw body into the value a caller receives,
//! without performing any side effect. The effect handler decides what the
//! user sees based on the returned [`Classification`].

use serde_json::Value;

use crate::error::GatewayError;

/// Envelope `code` the backend uses for an expired or missing session.
pub const SESSION_EXPIRED_CODE: i64 = 401;

const MAX_DETAIL_LEN: usize = 512;

/// The backend's `{code, message, data}` wrapper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub data: Value,
}

impl Envelope {
    /// Read an envelope out of a JSON value. Anything but an object is not an
    /// envelope.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };
        let code = map.get("code").and_then(Value::as_i64);
        let message = match map.remove("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        let data = map.remove("data").unwrap_or(Value::Null);
        Some(Self {
            code,
            message,
            data,
        })
    }
}

#[derive(Debug)]
pub struct Classification {
    pub outcome: Result<Value, GatewayError>,
    /// The backend reported code 401; the session must be torn down.
    pub session_expired: bool,
}

impl Classification {
    fn success(data: Value) -> Self {
        Self {
            outcome: Ok(data),
            session_expired: false,
        }
    }

    fn failure(error: GatewayError, session_expired: bool) -> Self {
        Self {
            outcome: Err(error),
            session_expired,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    success_messages: Vec<String>,
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new(vec!["success".to_string()])
    }
}

impl ResponseClassifier {
    pub fn new(success_messages: Vec<String>) -> Self {
        Self { success_messages }
    }

    fn is_success_message(&self, message: Option<&str>) -> bool {
        match message.map(str::trim) {
            None | Some("") => true,
            Some(m) => self.success_messages.iter().any(|s| s == m),
        }
    }

    pub fn classify(&self, status: u16, body: &[u8]) -> Classification {
        let in_success_range = (200..300).contains(&status);
        let text = String::from_utf8_lossy(body);

        if text.trim().is_empty() {
            return if in_success_range {
                Classification::success(Value::Null)
            } else {
                Classification::failure(
                    GatewayError::Status {
                        status,
                        code: None,
                        detail: None,
                    },
                    status == SESSION_EXPIRED_CODE as u16,
                )
            };
        }

        let envelope = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(Envelope::from_value);

        if !in_success_range {
            let code = envelope.as_ref().and_then(|e| e.code);
            let detail = envelope
                .and_then(|e| e.message)
                .or_else(|| Some(truncate(&text)));
            let expired =
                status == SESSION_EXPIRED_CODE as u16 || code == Some(SESSION_EXPIRED_CODE);
            return Classification::failure(
                GatewayError::Status {
                    status,
                    code,
                    detail,
                },
                expired,
            );
        }

        let Some(envelope) = envelope else {
            return Classification::failure(
                GatewayError::Envelope {
                    detail: truncate(&text),
                },
                false,
            );
        };

        if self.is_success_message(envelope.message.as_deref()) {
            return Classification::success(envelope.data);
        }

        let expired = envelope.code == Some(SESSION_EXPIRED_CODE);
        let message = envelope.message.unwrap_or_default();
        Classification::failure(GatewayError::rejected(envelope.code, message), expired)
    }
}

/// Classify with the default success policy (`message` absent or
/// `"success"`).
pub fn classify(status: u16, body: &[u8]) -> Classification {
    ResponseClassifier::default().classify(status, body)
}

fn truncate(text: &str) -> String {
    if text.len() <= MAX_DETAIL_LEN {
        return text.to_string();
    }
    let mut end = MAX_DETAIL_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE;
    use serde_json::json;

    fn body(v: Value) -> Vec<u8> {
        serde_json::to_vec(&v).unwrap()
    }

    #[test]
    fn success_without_message_resolves_data() {
        let c = classify(200, &body(json!({"code": 200, "data": {"total": 1, "list": []}})));
        assert_eq!(c.outcome.unwrap(), json!({"total": 1, "list": []}));
        assert!(!c.session_expired);
    }

    #[test]
    fn blank_message_counts_as_absent() {
        for message in ["", "   "] {
            let c = classify(200, &body(json!({"code": 200, "message": message, "data": {"x": 1}})));
            assert_eq!(c.outcome.unwrap(), json!({"x": 1}), "message {message:?}");
            assert!(!c.session_expired);
        }
    }

    #[test]
    fn success_message_resolves_data() {
        let c = classify(201, &body(json!({"code": 201, "message": "success", "data": 7})));
        assert_eq!(c.outcome.unwrap(), json!(7));
    }

    #[test]
    fn missing_data_resolves_null() {
        let c = classify(200, &body(json!({"code": 200})));
        assert_eq!(c.outcome.unwrap(), Value::Null);
    }

    #[test]
    fn empty_success_body_resolves_null() {
        let c = classify(204, b"");
        assert_eq!(c.outcome.unwrap(), Value::Null);
    }

    #[test]
    fn other_message_is_rejected_with_that_message() {
        let c = classify(200, &body(json!({"code": 400, "message": "身份证号已存在"})));
        let err = c.outcome.unwrap_err();
        assert_eq!(err.to_string(), "身份证号已存在");
        assert!(matches!(err, GatewayError::Rejected { code: Some(400), .. }));
        assert!(!c.session_expired);
    }

    #[test]
    fn code_401_marks_session_expired() {
        let c = classify(200, &body(json!({"code": 401, "message": "token expired"})));
        assert!(c.session_expired);
        let err = c.outcome.unwrap_err();
        assert_eq!(err.to_string(), "token expired");
        assert!(err.is_session_expired());
    }

    #[test]
    fn code_401_with_success_message_is_still_success() {
        let c = classify(200, &body(json!({"code": 401, "message": "success", "data": 1})));
        assert!(c.outcome.is_ok());
        assert!(!c.session_expired);
    }

    #[test]
    fn non_success_status_is_generic_failure() {
        let c = classify(500, &body(json!({"code": 500, "message": "服务器内部错误"})));
        let err = c.outcome.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
        match err {
            GatewayError::Status {
                status,
                code,
                detail,
            } => {
                assert_eq!(status, 500);
                assert_eq!(code, Some(500));
                assert_eq!(detail.as_deref(), Some("服务器内部错误"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!c.session_expired);
    }

    #[test]
    fn http_401_marks_session_expired() {
        let c = classify(401, &body(json!({"code": 401, "message": "unauthorized"})));
        assert!(c.session_expired);
        assert_eq!(c.outcome.unwrap_err().to_string(), GENERIC_FAILURE);

        let bare = classify(401, b"");
        assert!(bare.session_expired);
    }

    #[test]
    fn unrecognized_payloads_are_generic_failures() {
        for raw in [&b"<html>oops</html>"[..], &b"[1,2,3]"[..], &b"\"ok\""[..]] {
            let c = classify(200, raw);
            let err = c.outcome.unwrap_err();
            assert!(matches!(err, GatewayError::Envelope { .. }));
            assert_eq!(err.to_string(), GENERIC_FAILURE);
        }
    }

    #[test]
    fn custom_success_messages() {
        let classifier = ResponseClassifier::new(vec!["success".into(), "ok".into()]);
        let c = classifier.classify(200, &body(json!({"message": "ok", "data": [1]})));
        assert_eq!(c.outcome.unwrap(), json!([1]));
        let c = classifier.classify(200, &body(json!({"message": "nope"})));
        assert!(c.outcome.is_err());
    }

    #[test]
    fn long_details_are_truncated_on_char_boundary() {
        let text = "错".repeat(400);
        let out = truncate(&text);
        assert!(out.ends_with("..."));
        assert!(out.len() <= MAX_DETAIL_LEN + 3);
    }
}
