//! # Pure Data Module / 纯数据模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No I/O / 禁止文件读写** — loading the file is the bootstrap layer's job.
//! ❌ **No validation logic / 禁止验证逻辑** — limits are checked by the use case.

mod catalog_config;

pub use catalog_config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
