//! Command line and layered configuration for the widget host.
//!
//! Priority, lowest first: built-in defaults, config file, `ASK_WIDGET_*`
//! environment variables, command line flags (and their env fallbacks).

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::session::DEFAULT_SESSION_TIMEOUT;
use crate::ui::PageAssets;
use crate::widget::{DEFAULT_LOADING_TEXT, WidgetOptions};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "ask-widget.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the backend serving `/ask`
    #[arg(long, env = "ASK_UPSTREAM_URL")]
    pub upstream: Option<String>,

    /// Offer the file picker
    #[arg(long, env = "ASK_ATTACHMENTS_ENABLED")]
    pub attachments_enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: String,
    /// Idle seconds after which a widget session is dropped.
    pub session_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Origin of the backend; requests go to `<base_url>/ask`.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub attachments_enabled: bool,
    pub loading_text: String,
    pub max_attachment_bytes: usize,
    pub htmx_src: String,
    pub script_src: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let assets = PageAssets::default();
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.static_dir", "static")?
            .set_default("server.session_timeout_secs", DEFAULT_SESSION_TIMEOUT.as_secs())?
            .set_default("upstream.base_url", "http://127.0.0.1:5000")?
            .set_default("widget.attachments_enabled", true)?
            .set_default("widget.loading_text", DEFAULT_LOADING_TEXT)?
            .set_default("widget.max_attachment_bytes", 20 * 1024 * 1024)?
            .set_default("widget.htmx_src", assets.htmx_src)?
            .set_default("widget.script_src", assets.widget_script_src)?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE));
        }

        // E.g. ASK_WIDGET_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("ASK_WIDGET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(upstream) = cli.upstream {
            builder = builder.set_override("upstream.base_url", upstream)?;
        }
        if let Some(enabled) = cli.attachments_enabled {
            builder = builder.set_override("widget.attachments_enabled", enabled)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Options every widget in the host is built with.
    #[must_use]
    pub fn widget_options(&self) -> WidgetOptions {
        WidgetOptions {
            attachments_enabled: self.widget.attachments_enabled,
            loading_text: self.widget.loading_text.clone(),
        }
    }

    /// Asset locations for the page shell.
    #[must_use]
    pub fn page_assets(&self) -> PageAssets {
        PageAssets {
            htmx_src: self.widget.htmx_src.clone(),
            widget_script_src: self.widget.script_src.clone(),
        }
    }

    /// How long an idle widget session is kept.
    #[must_use]
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.server.session_timeout_secs)
    }

    /// Socket address string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
