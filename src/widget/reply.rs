//! Interpretation of `/ask` responses.

use serde_json::Value;

use crate::transport::AskResponse;

/// Shown when a failed response has no parseable body.
pub const SERVER_ERROR_FALLBACK: &str = "Error processing the server response.";

/// Shown when a successful response carries neither an answer nor an error.
pub const NO_VALID_RESPONSE: &str = "No valid response was received.";

/// Shown when the request never completed.
pub const CONNECTION_FAILED: &str =
    "There was a problem connecting to the server. Please try again.";

/// What the widget renders for a settled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 2xx with an `answer`: trusted markup.
    Answer(String),
    /// 2xx with an `error` field.
    ApplicationError(String),
    /// 2xx with neither field, or a body that is not JSON.
    NoValidResponse,
    /// Non-2xx status: the body's `answer` if it has one, else the status
    /// reason. An `error` field is not consulted.
    ServerError(String),
    /// The request never completed.
    ConnectionFailed,
}

impl Reply {
    /// Classify a completed exchange.
    #[must_use]
    pub fn from_response(response: &AskResponse) -> Self {
        let body = serde_json::from_slice::<Value>(&response.body).ok();

        if !response.is_success() {
            let message = match body {
                Some(body) => {
                    truthy_text(&body, "answer").unwrap_or_else(|| status_text(response))
                }
                None => SERVER_ERROR_FALLBACK.to_string(),
            };
            return Self::ServerError(message);
        }

        let Some(body) = body else {
            return Self::NoValidResponse;
        };

        if let Some(answer) = truthy_text(&body, "answer") {
            Self::Answer(answer)
        } else if let Some(error) = truthy_text(&body, "error") {
            Self::ApplicationError(error)
        } else {
            Self::NoValidResponse
        }
    }

    /// Text of the AI turn that reports this reply.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Answer(answer) => answer.clone(),
            Self::ApplicationError(error) => format!("AI error: {error}"),
            Self::NoValidResponse => NO_VALID_RESPONSE.to_string(),
            Self::ServerError(message) => format!("Error: {message}"),
            Self::ConnectionFailed => CONNECTION_FAILED.to_string(),
        }
    }
}

/// Text of `field` when it holds a truthy value.
///
/// `null`, `false`, zero and the empty string count as absent. Strings are
/// taken as is; other values render as their JSON text.
fn truthy_text(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn status_text(response: &AskResponse) -> String {
    response
        .reason()
        .map_or_else(|| format!("HTTP {}", response.status), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(status: u16, body: &str) -> AskResponse {
        AskResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_answer() {
        let reply = Reply::from_response(&AskResponse::json(200, &json!({"answer": "<b>hi</b>"})));
        assert_eq!(reply, Reply::Answer("<b>hi</b>".to_string()));
        assert_eq!(reply.to_text(), "<b>hi</b>");
    }

    #[test]
    fn test_application_error() {
        let reply = Reply::from_response(&AskResponse::json(200, &json!({"error": "blocked"})));
        assert_eq!(reply, Reply::ApplicationError("blocked".to_string()));
        assert_eq!(reply.to_text(), "AI error: blocked");
    }

    #[test]
    fn test_empty_answer_falls_through() {
        let reply = Reply::from_response(&AskResponse::json(200, &json!({"answer": ""})));
        assert_eq!(reply, Reply::NoValidResponse);
    }

    #[test]
    fn test_success_without_fields_or_json() {
        assert_eq!(
            Reply::from_response(&AskResponse::json(200, &json!({"other": 1}))),
            Reply::NoValidResponse
        );
        assert_eq!(Reply::from_response(&raw(200, "<html>")), Reply::NoValidResponse);
        assert_eq!(Reply::NoValidResponse.to_text(), NO_VALID_RESPONSE);
    }

    #[test]
    fn test_server_error_messages() {
        let reply = Reply::from_response(&AskResponse::json(500, &json!({"answer": "overloaded"})));
        assert_eq!(reply.to_text(), "Error: overloaded");

        let reply = Reply::from_response(&AskResponse::json(400, &json!({"error": "no question"})));
        assert_eq!(reply.to_text(), "Error: Bad Request");

        let reply = Reply::from_response(&AskResponse::json(503, &json!({})));
        assert_eq!(reply.to_text(), "Error: Service Unavailable");

        let reply = Reply::from_response(&raw(502, "Bad gateway page"));
        assert_eq!(reply, Reply::ServerError(SERVER_ERROR_FALLBACK.to_string()));
    }

    #[test]
    fn test_server_error_never_reads_success_fields() {
        // A failing status with an error field must not be reported as an AI error.
        let reply = Reply::from_response(&AskResponse::json(500, &json!({"error": "model down"})));
        assert_eq!(reply, Reply::ServerError("Internal Server Error".to_string()));
        assert_eq!(reply.to_text(), "Error: Internal Server Error");
    }

    #[test]
    fn test_non_string_answers() {
        let reply = Reply::from_response(&AskResponse::json(200, &json!({"answer": 42})));
        assert_eq!(reply, Reply::Answer("42".to_string()));

        let reply = Reply::from_response(&AskResponse::json(200, &json!({"answer": true})));
        assert_eq!(reply.to_text(), "true");

        for falsy in [json!(0), json!(false), json!(null)] {
            let reply = Reply::from_response(&AskResponse::json(200, &json!({"answer": falsy})));
            assert_eq!(reply, Reply::NoValidResponse);
        }

        let body = json!({"answer": 0, "error": 7});
        let reply = Reply::from_response(&AskResponse::json(200, &body));
        assert_eq!(reply.to_text(), "AI error: 7");

        let reply = Reply::from_response(&AskResponse::json(500, &json!({"answer": 3.5})));
        assert_eq!(reply.to_text(), "Error: 3.5");
    }
}
