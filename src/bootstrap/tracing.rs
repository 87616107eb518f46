//! Tracing configuration for the Pokédex CLI
//!
//! Events go to stderr so the rendered catalog on stdout stays clean.

use tracing_subscriber::{fmt, prelude::*, registry};

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the workspace crates
/// - **Production**: info level
/// - HTTP client internals stay at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=warn".to_string(),
        "rustls=warn".to_string(),
        format!("pd_infra={level}"),
        format!("pd_app={level}"),
    ]
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` overrides the default directives.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stderr_layer = fmt::layer()
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(std::io::stderr);

    registry().with(env_filter).with(stderr_layer).try_init()?;

    Ok(())
}
