use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod app;
mod config;

mod domain {
    pub mod entities {
        pub mod dataset;
        pub mod view;
    }
    pub mod rules {
        pub mod aggregate;
        pub mod classify;
        pub mod format;
        pub mod style;
    }
}

mod infra {
    pub mod import {
        pub mod xlsx;
    }
    pub mod export {
        pub mod csv;
        pub mod xlsx;
        pub mod pdf {
            pub mod document;
            pub mod layout;
            pub mod metrics;
            pub mod render;
        }
    }
    pub mod render {
        pub mod html;
    }
}

mod ui {
    pub mod state {
        pub mod app_state;
    }
}

mod usecase {
    pub mod ports {
        pub mod export;
        pub mod source;
    }
    pub mod services {
        pub mod export_service;
        pub mod import_service;
        pub mod query_service;
    }
}


fn init_logging(default_filter: &str) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("id", "anggaran", "anggaran")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

const DEFAULT_LOG_FILTER: &str = "info,anggaran=debug";

/// Resolves the configuration once for the whole process. A load error is
/// handed back so it can be logged after the subscriber is installed.
fn startup(loaded: Result<config::AppConfig>) -> (config::AppConfig, String, Option<anyhow::Error>) {
    match loaded {
        Ok(config) => {
            let filter = config
                .log_filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
            (config, filter, None)
        }
        Err(err) => (
            config::AppConfig::default(),
            DEFAULT_LOG_FILTER.to_string(),
            Some(err),
        ),
    }
}

fn main() {
    let (config, filter, load_error) =
        startup(config::default_config_path().and_then(|path| config::load_config_from(&path)));
    init_logging(&filter);
    if let Some(err) = load_error {
        tracing::warn!(error = %err, "using default configuration");
    }
    tracing::info!(fiscal_year = config.report.fiscal_year, "starting dashboard");

    let mut desktop_config = dioxus::desktop::Config::new().with_window(
        dioxus::desktop::WindowBuilder::new().with_title(config.report.dashboard_title()),
    );
    match default_webview_data_dir() {
        Ok(dir) => desktop_config = desktop_config.with_data_directory(dir),
        Err(err) => tracing::warn!(error = %err, "using default webview data directory"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(config)
        .launch(app::App);
}
