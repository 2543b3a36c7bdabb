use ask_widget::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("ASK_WIDGET_SERVER__PORT");
        env::remove_var("ASK_WIDGET_SERVER__SESSION_TIMEOUT_SECS");
        env::remove_var("ASK_WIDGET_WIDGET__LOADING_TEXT");
        env::remove_var("ASK_WIDGET_WIDGET__ATTACHMENTS_ENABLED");
        env::remove_var("ASK_UPSTREAM_URL");
        env::remove_var("ASK_ATTACHMENTS_ENABLED");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["ask-widget"]).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.static_dir, "static");
    assert_eq!(config.upstream.base_url, "http://127.0.0.1:5000");
    assert!(config.widget.attachments_enabled);
    assert_eq!(config.widget.max_attachment_bytes, 20 * 1024 * 1024);
    assert_eq!(config.bind_address(), "127.0.0.1:3000");
    assert_eq!(config.session_timeout(), Duration::from_secs(30 * 60));
}

#[test]
#[serial]
fn test_session_timeout_override() {
    clear_env_vars();
    unsafe {
        env::set_var("ASK_WIDGET_SERVER__SESSION_TIMEOUT_SECS", "120");
    }

    let config = AppConfig::load_from_args(["ask-widget"]).unwrap();
    assert_eq!(config.session_timeout(), Duration::from_secs(120));

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("ASK_WIDGET_SERVER__PORT", "9090");
        env::set_var("ASK_WIDGET_WIDGET__LOADING_TEXT", "One moment...");
    }

    let config = AppConfig::load_from_args(["ask-widget"]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.widget_options().loading_text, "One moment...");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("widget.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
upstream:
  base_url: "http://backend:8000"
widget:
  attachments_enabled: false
"#,
    )
    .expect("Failed to write temp config");

    let config = AppConfig::load_from_args(["ask-widget", "--config", file_path.to_str().unwrap()])
        .expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.upstream.base_url, "http://backend:8000");
    assert!(!config.widget_options().attachments_enabled);
    // Keys the file leaves out keep their defaults.
    assert_eq!(config.server.host, "127.0.0.1");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env_and_file() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("widget.yaml");
    fs::write(&file_path, "server:\n  port: 7070\n").unwrap();

    unsafe {
        env::set_var("CONFIG_FILE", file_path.to_str().unwrap());
        env::set_var("ASK_WIDGET_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args([
        "ask-widget",
        "--port",
        "4000",
        "--upstream",
        "http://upstream:9000",
        "--attachments-enabled",
        "false",
    ])
    .unwrap();
    assert_eq!(config.server.port, 4000);
    assert_eq!(config.upstream.base_url, "http://upstream:9000");
    assert!(!config.widget.attachments_enabled);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_env_fallbacks() {
    clear_env_vars();
    unsafe {
        env::set_var("ASK_UPSTREAM_URL", "http://from-env:5001");
        env::set_var("ASK_ATTACHMENTS_ENABLED", "false");
    }

    let config = AppConfig::load_from_args(["ask-widget"]).unwrap();
    assert_eq!(config.upstream.base_url, "http://from-env:5001");
    assert!(!config.widget.attachments_enabled);

    clear_env_vars();
}

#[test]
#[serial]
fn test_page_assets_from_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["ask-widget"]).unwrap();
    let assets = config.page_assets();
    assert_eq!(assets.htmx_src, "/static/vendor/htmx-2.0.8.min.js");
    assert_eq!(assets.widget_script_src, "/static/widget.js");
}

#[test]
#[serial]
fn test_bad_flag_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["ask-widget", "--port", "not-a-port"]);
    assert!(result.is_err());
}
