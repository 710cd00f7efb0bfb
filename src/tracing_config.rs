//! Tracing setup for the `jrw` binary.
//!
//! `JRW_LOG_FORMAT` selects the output format:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span hierarchy via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! JRW_LOG=debug JRW_LOG_FORMAT=tree jrw --recipe beanMethodsNotPublic trees/
//! JRW_LOG="jrw_recipes::rename_bean=trace" jrw --config recipes.json trees/
//! ```
//!
//! Nothing is installed unless `JRW_LOG` (or `RUST_LOG`) is set. All output
//! goes to stderr so `--print` output stays clean.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var("JRW_LOG_FORMAT")
            .map(|name| Self::from_name(&name))
            .unwrap_or(LogFormat::Text)
    }
}

/// `JRW_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("JRW_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber when logging was requested.
pub fn init_tracing() {
    if std::env::var_os("JRW_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
