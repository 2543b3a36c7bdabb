//! UI components and page rendering.
//!
//! This module provides Leptos SSR components for rendering the chat widget,
//! following ShadCN-UI design principles.
//!
//! # Structure
//!
//! - [`page`]: Full-page shell and fragment rendering
//! - [`components`]: Reusable ShadCN-style UI components
//! - [`chat`]: Chat widget components

pub mod chat;
pub mod components;
pub mod page;

pub use page::{PageAssets, render_page, render_widget, render_widget_with_notice};
