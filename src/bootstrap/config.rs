//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into the CatalogConfig DTO / 将 TOML 解析为 CatalogConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! Page bounds are checked by the loader use case, not here.

use anyhow::Context;
use pd_core::config::CatalogConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<CatalogConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    CatalogConfig::from_toml(&toml_value)
}

/// `<config_dir>/pokedex/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pokedex").join("config.toml"))
}

/// Pick the configuration for this run.
///
/// An explicit path must exist. Without one, the default path is used when
/// present and built-in defaults otherwise.
pub fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<CatalogConfig> {
    resolve_config_from(explicit, default_config_path())
}

fn resolve_config_from(
    explicit: Option<PathBuf>,
    default_path: Option<PathBuf>,
) -> anyhow::Result<CatalogConfig> {
    if let Some(path) = explicit {
        return load_config(&path);
    }

    match default_path {
        Some(path) if path.exists() => load_config(&path),
        _ => {
            debug!("no config file found, using defaults");
            Ok(CatalogConfig::default())
        }
    }
}
