//! Per-page widget sessions.
//!
//! Every page load gets its own [`WidgetSession`], identified by UUID and
//! holding one [`crate::widget::ChatWidget`]. Sessions live in memory only.
//!
//! # Example
//!
//! ```rust
//! use ask_widget::session::SessionStore;
//! use ask_widget::widget::WidgetOptions;
//!
//! let store = SessionStore::new();
//! let session = store.create(WidgetOptions::default());
//!
//! assert!(store.get(session.id()).is_some());
//! assert_eq!(store.len(), 1);
//! ```

mod store;

pub use store::{DEFAULT_SESSION_TIMEOUT, SessionStore, WidgetSession};
