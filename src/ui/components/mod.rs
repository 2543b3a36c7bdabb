//! ShadCN-style reusable UI components.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants
//! - [`Badge`]: Status badge
//! - [`icons`]: SVG icon components

mod badge;
mod button;
mod icons;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use icons::*;
