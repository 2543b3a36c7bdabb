//! Full-page and fragment rendering.

use leptos::prelude::*;

use crate::ui::chat::ChatShell;
use crate::widget::WidgetSnapshot;

/// Script and asset locations referenced by the page shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAssets {
    /// Where the page loads htmx from.
    pub htmx_src: String,
    /// Where the page loads the widget script from.
    pub widget_script_src: String,
}

impl Default for PageAssets {
    fn default() -> Self {
        Self {
            htmx_src: "/static/vendor/htmx-2.0.8.min.js".to_string(),
            widget_script_src: "/static/widget.js".to_string(),
        }
    }
}

/// Render the widget fragment returned by every HTMX interaction.
#[must_use]
pub fn render_widget(widget_id: &str, snapshot: WidgetSnapshot) -> String {
    shell_html(widget_id, snapshot, None)
}

/// Render the widget with a notice explaining a refused file pick.
#[must_use]
pub fn render_widget_with_notice(
    widget_id: &str,
    snapshot: WidgetSnapshot,
    notice: &str,
) -> String {
    shell_html(widget_id, snapshot, Some(notice.to_string()))
}

fn shell_html(widget_id: &str, snapshot: WidgetSnapshot, notice: Option<String>) -> String {
    let widget_id = widget_id.to_string();
    view! { <ChatShell widget_id=widget_id snapshot=snapshot notice=notice /> }.to_html()
}

/// Render the full page around the widget.
#[must_use]
pub fn render_page(widget_id: &str, snapshot: WidgetSnapshot, assets: &PageAssets) -> String {
    html_shell("Chat", assets, &render_widget(widget_id, snapshot))
}

/// Generate the HTML document around `content`.
fn html_shell(title: &str, assets: &PageAssets, content: &str) -> String {
    let PageAssets {
        htmx_src,
        widget_script_src,
    } = assets;

    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - Ask</title>

    <!-- HTMX (local) -->
    <script src="{htmx_src}"></script>
    <script defer src="{widget_script_src}"></script>
</head>
<body class="min-h-screen bg-background text-textPrimary antialiased">
    <main id="app" class="container mx-auto px-4 py-6 max-w-3xl">
        {content}
    </main>
</body>
</html>"#
    )
}
