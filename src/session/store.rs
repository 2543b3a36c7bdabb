//! Widget sessions and their store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::transport::{AskResponse, TransportError};
use crate::widget::{
    ChatWidget, KeyPress, PendingSend, SendOutcome, SendSkipped, SendTicket, WidgetOptions,
    WidgetSnapshot,
};

/// Default session timeout (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One widget instance, owned by one browser page.
#[derive(Debug)]
pub struct WidgetSession {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    /// The widget. Never held across a transport call.
    widget: Mutex<ChatWidget>,
    /// Mirrors `ChatWidget::is_pending`; only written under the widget lock.
    pending: watch::Sender<bool>,
    /// Last activity time.
    last_activity: RwLock<Instant>,
}

impl Clone for WidgetSession {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl WidgetSession {
    /// Create a new session with the given ID.
    fn new(id: String, options: WidgetOptions) -> Self {
        let (pending, _) = watch::channel(false);
        Self {
            inner: Arc::new(SessionInner {
                id,
                widget: Mutex::new(ChatWidget::new(options)),
                pending,
                last_activity: RwLock::new(Instant::now()),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Lock the widget.
    pub async fn widget(&self) -> MutexGuard<'_, ChatWidget> {
        let guard = self.inner.widget.lock().await;
        self.touch();
        guard
    }

    /// Take a render snapshot of the widget.
    pub async fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot::from(&*self.widget().await)
    }

    /// Replace the input with `question` and start a send.
    ///
    /// Returns the send to dispatch, if one started, and the widget as it
    /// should be rendered now.
    pub async fn begin_send(
        &self,
        question: impl Into<String>,
    ) -> (Result<PendingSend, SendSkipped>, WidgetSnapshot) {
        self.submit(question, None).await
    }

    /// Replace the input with `question` and apply the key press that
    /// submitted it; `None` is the send button.
    pub async fn submit(
        &self,
        question: impl Into<String>,
        press: Option<&KeyPress>,
    ) -> (Result<PendingSend, SendSkipped>, WidgetSnapshot) {
        let mut widget = self.widget().await;
        widget.set_input(question);
        let started = match press {
            Some(press) => widget.press_key(press),
            None => widget.begin_send(),
        };
        self.sync_pending(&widget);
        (started, WidgetSnapshot::from(&*widget))
    }

    /// Record that the request was handed to the transport.
    pub async fn mark_dispatched(&self, ticket: SendTicket) -> bool {
        self.widget().await.mark_dispatched(ticket)
    }

    /// Settle a send and release anyone waiting on it.
    pub async fn complete_send(
        &self,
        ticket: SendTicket,
        result: Result<AskResponse, TransportError>,
    ) -> SendOutcome {
        let mut widget = self.widget().await;
        let outcome = widget.complete_send(ticket, result);
        self.sync_pending(&widget);
        outcome
    }

    /// Wait until no request is outstanding.
    pub async fn wait_settled(&self) {
        let mut rx = self.inner.pending.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|pending| !*pending).await;
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        *self.inner.pending.borrow()
    }

    /// Check if the session has been idle longer than `timeout`.
    ///
    /// A session with a request outstanding never expires.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        !self.is_pending() && last.elapsed() > timeout
    }

    /// Publish the widget's pending state. Callers hold the widget lock, so
    /// the flag can never lag behind a later send.
    fn sync_pending(&self, widget: &ChatWidget) {
        self.inner.pending.send_replace(widget.is_pending());
    }

    /// Update the last activity timestamp.
    fn touch(&self) {
        *self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }
}

/// Thread-safe store of all widget sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, WidgetSession>>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a fresh UUID.
    pub fn create(&self, options: WidgetOptions) -> WidgetSession {
        let session = WidgetSession::new(Uuid::new_v4().to_string(), options);
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id().to_string(), session.clone());
        session
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<WidgetSession> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Remove a session.
    pub fn remove(&self, id: &str) -> Option<WidgetSession> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    /// Number of sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions idle for longer than [`DEFAULT_SESSION_TIMEOUT`].
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_with_timeout(DEFAULT_SESSION_TIMEOUT)
    }

    /// Remove sessions that have been inactive longer than the timeout.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }

    /// Sweep expired sessions every `period` until the runtime shuts down.
    pub fn spawn_sweeper(&self, timeout: Duration, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.cleanup_expired_with_timeout(timeout);
                if removed > 0 {
                    info!(
                        name: "sessions.expired",
                        removed,
                        remaining = store.len(),
                        "Expired widget sessions removed"
                    );
                }
            }
        })
    }
}
