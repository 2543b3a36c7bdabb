//! `/ask` exchanges against a local backend.

use ask_widget::transport::{AskRequest, AskTransport, HttpAskTransport, TransportError};
use ask_widget::widget::{ChatWidget, PendingAttachment, SendOutcome, Sender, WidgetOptions};
use axum::{
    Json, Router,
    extract::{FromRequest, Multipart, Request},
    http::{StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use serde_json::{Value, json};

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Echo what arrived, so tests can assert on the wire format.
async fn echo(request: Request) -> Json<Value> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        let mut fields = serde_json::Map::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let field_type = field.content_type().map(str::to_string);
            let value = field.text().await.unwrap();
            fields.insert(
                name,
                json!({"file_name": file_name, "content_type": field_type, "value": value}),
            );
        }
        Json(json!({"answer": "multipart", "content_type": content_type, "fields": fields}))
    } else {
        let body = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        Json(json!({"answer": "json", "content_type": content_type, "payload": payload}))
    }
}

async fn echo_backend() -> String {
    spawn_backend(Router::new().route("/ask", post(echo))).await
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_text_only_request_is_json() {
    let transport = HttpAskTransport::new(&echo_backend().await).unwrap();

    let response = transport
        .ask(AskRequest::Json {
            question: "What is Rust?".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let body = body_json(&response.body);
    assert_eq!(body["answer"], "json");
    assert!(
        body["content_type"]
            .as_str()
            .unwrap()
            .starts_with("application/json")
    );
    assert_eq!(body["payload"], json!({"question": "What is Rust?"}));
}

#[tokio::test]
async fn test_attachment_request_is_multipart() {
    let transport = HttpAskTransport::new(&echo_backend().await).unwrap();

    let response = transport
        .ask(AskRequest::Multipart {
            question: "Summarize".to_string(),
            file: PendingAttachment::new("notes.txt", b"line one".to_vec()),
        })
        .await
        .unwrap();

    let body = body_json(&response.body);
    assert_eq!(body["answer"], "multipart");
    // The client sets the boundary itself.
    assert!(
        body["content_type"]
            .as_str()
            .unwrap()
            .contains("boundary=")
    );
    assert_eq!(body["fields"]["question"]["value"], "Summarize");
    assert_eq!(body["fields"]["file"]["file_name"], "notes.txt");
    assert_eq!(body["fields"]["file"]["content_type"], "text/plain");
    assert_eq!(body["fields"]["file"]["value"], "line one");
}

#[tokio::test]
async fn test_attachment_with_empty_question() {
    let transport = HttpAskTransport::new(&echo_backend().await).unwrap();

    let response = transport
        .ask(AskRequest::Multipart {
            question: String::new(),
            file: PendingAttachment::new("a.csv", b"x,y".to_vec()),
        })
        .await
        .unwrap();

    let body = body_json(&response.body);
    assert_eq!(body["fields"]["question"]["value"], "");
    assert_eq!(body["fields"]["file"]["file_name"], "a.csv");
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let app = Router::new().route(
        "/ask",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Database unavailable"})),
            )
        }),
    );
    let transport = HttpAskTransport::new(&spawn_backend(app).await).unwrap();

    let response = transport
        .ask(AskRequest::Json {
            question: "q".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert!(!response.is_success());
    assert_eq!(body_json(&response.body)["error"], "Database unavailable");
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    // Grab a free port, then close it again.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpAskTransport::new(&format!("http://{addr}")).unwrap();
    let result = transport
        .ask(AskRequest::Json {
            question: "q".to_string(),
        })
        .await;

    assert!(matches!(result, Err(TransportError::Http(_))));
}

#[tokio::test]
async fn test_widget_round_trip_over_http() {
    let app = Router::new().route(
        "/ask",
        post(|| async { Json(json!({"answer": "<em>42</em>"})) }),
    );
    let transport = HttpAskTransport::new(&spawn_backend(app).await).unwrap();

    let mut widget = ChatWidget::new(WidgetOptions::default());
    widget.set_input("What is the answer?");
    let outcome = widget.send(&transport).await;

    assert_eq!(outcome, SendOutcome::Answered);
    let turns = widget.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].sender, Sender::User);
    assert_eq!(turns[1].sender, Sender::Ai);
    assert_eq!(turns[1].text(), "<em>42</em>");
    assert!(!widget.transcript().has_loading_indicator());
}

#[tokio::test]
async fn test_widget_connection_failure_over_http() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpAskTransport::new(&format!("http://{addr}")).unwrap();
    let mut widget = ChatWidget::new(WidgetOptions::default());
    widget.set_input("hello");

    assert_eq!(widget.send(&transport).await, SendOutcome::ConnectionFailed);
    assert!(!widget.is_pending());
}
