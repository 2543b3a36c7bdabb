use std::path::Path as FsPath;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::AppState;
use crate::config::AppConfig;
use crate::session::{SessionStore, WidgetSession};
use crate::transport::{AskTransport, HttpAskTransport};
use crate::ui::{render_page, render_widget, render_widget_with_notice};
use crate::widget::{
    AttachmentError, Key, KeyPress, PendingAttachment, PendingSend, WidgetSnapshot,
};

/// Bounds on the pause between sweeps of idle sessions.
const MIN_SWEEP_PERIOD: Duration = Duration::from_secs(1);
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Multipart field carrying the picked file.
const FILE_FIELD: &str = "file";

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

const OCTET_STREAM: &str = "application/octet-stream";

/// Errors returned by the widget handlers.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// No widget with this ID exists.
    #[error("Unknown widget '{0}'")]
    UnknownWidget(String),

    /// The attachment was refused.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    /// The upload body could not be read.
    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

impl HostError {
    /// HTTP status reported for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownWidget(_) => StatusCode::NOT_FOUND,
            Self::Attachment(e) => attachment_status(e),
            Self::Multipart(e) => e.status(),
        }
    }
}

fn attachment_status(error: &AttachmentError) -> StatusCode {
    match error {
        AttachmentError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        AttachmentError::Disabled => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = %status, error = %self, "Request rejected");
        (status, self.to_string()).into_response()
    }
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let transport = HttpAskTransport::new(&config.upstream.base_url)?;

    info!(
        name: "upstream.config.loaded",
        endpoint = %transport.endpoint(),
        attachments_enabled = config.widget.attachments_enabled,
        session_timeout_secs = config.server.session_timeout_secs,
        "Upstream configuration loaded"
    );

    let state = AppState {
        sessions: SessionStore::new(),
        transport: Arc::new(transport),
        options: config.widget_options(),
        assets: config.page_assets(),
        max_attachment_bytes: config.widget.max_attachment_bytes,
    };

    let timeout = config.session_timeout();
    state
        .sessions
        .spawn_sweeper(timeout, timeout.clamp(MIN_SWEEP_PERIOD, MAX_SWEEP_PERIOD));

    let app = router(state, &config.server.static_dir);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    let body_limit = state.max_attachment_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(index))
        .route("/chat/{id}", get(show_widget))
        .route("/chat/{id}/send", post(send))
        .route("/chat/{id}/settled", get(settled))
        .route("/chat/{id}/attachment", post(attach))
        .route("/chat/{id}/attachment/remove", post(remove_attachment))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body of the send form.
///
/// `key` names the key that submitted the form; it is empty when the send
/// button did.
#[derive(Debug, Deserialize)]
struct SendForm {
    #[serde(default)]
    question: String,
    #[serde(default)]
    key: String,
    #[serde(default)]
    shift: bool,
}

impl SendForm {
    fn key_press(&self) -> Option<KeyPress> {
        (!self.key.is_empty()).then(|| KeyPress {
            key: Key::from_dom(&self.key),
            shift: self.shift,
        })
    }
}

fn lookup(state: &AppState, id: &str) -> Result<WidgetSession, HostError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| HostError::UnknownWidget(id.to_string()))
}

/// GET / - Create a widget and render its page.
async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.sessions.create(state.options.clone());

    info!(
        name: "widget.created",
        widget = %session.id(),
        sessions = state.sessions.len(),
        "Widget created"
    );

    let snapshot = session.snapshot().await;
    Html(render_page(session.id(), snapshot, &state.assets))
}

/// GET /chat/{id} - Render the page of an existing widget.
async fn show_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, HostError> {
    let session = lookup(&state, &id)?;
    let snapshot = session.snapshot().await;
    Ok(Html(render_page(&id, snapshot, &state.assets)))
}

/// POST /chat/{id}/send - Apply the submitting key press and return the widget.
///
/// A started send renders with the loading indicator.
async fn send(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<SendForm>,
) -> Result<Html<String>, HostError> {
    let session = lookup(&state, &id)?;

    let press = form.key_press();
    let (started, snapshot) = session.submit(form.question, press.as_ref()).await;
    match started {
        Ok(pending) => spawn_exchange(Arc::clone(&state.transport), session, pending),
        Err(skipped) => debug!(widget = %id, reason = %skipped, "Send skipped"),
    }

    Ok(Html(render_widget(&id, snapshot)))
}

/// Run the `/ask` exchange without holding the widget lock.
fn spawn_exchange(transport: Arc<dyn AskTransport>, session: WidgetSession, pending: PendingSend) {
    let PendingSend { ticket, request } = pending;

    tokio::spawn(async move {
        session.mark_dispatched(ticket).await;
        let result = transport.ask(request).await;
        let outcome = session.complete_send(ticket, result).await;
        debug!(widget = %session.id(), ticket = %ticket, outcome = ?outcome, "Exchange finished");
    });
}

/// GET /chat/{id}/settled - Wait for the outstanding request, then render.
async fn settled(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, HostError> {
    let session = lookup(&state, &id)?;
    session.wait_settled().await;
    let snapshot = session.snapshot().await;
    Ok(Html(render_widget(&id, snapshot)))
}

/// POST /chat/{id}/attachment - Stage the picked file; an empty pick clears it.
///
/// A refused file keeps its error status, but the body is the widget with a
/// notice so the page can show why.
async fn attach(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, HostError> {
    let session = lookup(&state, &id)?;
    let staged = match read_file_field(&mut multipart, state.max_attachment_bytes).await {
        Ok(file) => session.widget().await.select_file(file).map_err(HostError::from),
        Err(e) => Err(e),
    };

    match staged {
        Ok(()) => Ok(Html(render_widget(&id, session.snapshot().await)).into_response()),
        Err(HostError::Attachment(refused)) => {
            let status = attachment_status(&refused);
            warn!(widget = %id, status = %status, error = %refused, "Attachment refused");
            let notice = refused.to_string();
            let html = render_widget_with_notice(&id, session.snapshot().await, &notice);
            Ok((status, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// POST /chat/{id}/attachment/remove - Drop the staged file.
async fn remove_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, HostError> {
    let session = lookup(&state, &id)?;

    let snapshot = {
        let mut widget = session.widget().await;
        widget.remove_attachment();
        WidgetSnapshot::from(&*widget)
    };

    Ok(Html(render_widget(&id, snapshot)))
}

/// Read the `file` field. A cancelled picker submits a part with no file name.
async fn read_file_field(
    multipart: &mut Multipart,
    limit: usize,
) -> Result<Option<PendingAttachment>, HostError> {
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await?;

        if name.is_empty() {
            file = None;
            continue;
        }
        if content.len() > limit {
            return Err(AttachmentError::TooLarge {
                name,
                size: content.len(),
                limit,
            }
            .into());
        }

        file = Some(match content_type {
            Some(content_type) if content_type != OCTET_STREAM => {
                PendingAttachment::with_content_type(name, content_type, content.to_vec())
            }
            _ => PendingAttachment::new(name, content.to_vec()),
        });
    }

    Ok(file)
}
