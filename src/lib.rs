//! Ask widget
//!
//! An embeddable chat widget that sends a question, optionally with one file,
//! to a backend `POST /ask` endpoint and renders the reply into a transcript.
//!
//! # Architecture
//!
//! - **Widget**: headless document model and send state machine
//! - **Transport**: the `/ask` exchange, JSON or multipart
//! - **UI**: Leptos SSR components driven by HTMX
//! - **Server**: Axum host keeping one widget per page
//!
//! # Modules
//!
//! - [`widget`]: transcript, input, attachment and send sequence
//! - [`transport`]: `/ask` request and response types and the HTTP client
//! - [`ui`]: page and fragment rendering
//! - [`session`]: per-page widget sessions
//! - [`server`]: router and handlers
//! - [`config`]: command line and layered configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod server;
pub mod session;
pub mod transport;
pub mod ui;
pub mod widget;

use std::sync::Arc;

use session::SessionStore;
use transport::AskTransport;
use ui::PageAssets;
use widget::WidgetOptions;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// One widget per page.
    pub sessions: SessionStore,
    /// Client for the backend `/ask` endpoint.
    pub transport: Arc<dyn AskTransport>,
    /// Options every new widget is built with.
    pub options: WidgetOptions,
    /// Script locations for the page shell.
    pub assets: PageAssets,
    /// Largest attachment accepted from the browser.
    pub max_attachment_bytes: usize,
}
