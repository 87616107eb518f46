use crate::catalog::{PageRequest, DEFAULT_PAGE_LIMIT};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

/// Catalog client configuration DTO
/// 目录客户端配置 DTO
///
/// ```toml
/// [catalog]
/// base_url = "https://pokeapi.co/api/v2"
/// limit = 20
/// offset = 0
///
/// [http]
/// timeout_secs = 10
/// user_agent = "pokedex/0.1.0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the REST catalog, without the `/pokemon` suffix
    pub base_url: String,

    /// Page size of the listing request
    pub limit: u32,

    /// Pagination start of the listing request
    pub offset: u32,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl CatalogConfig {
    /// Create CatalogConfig from TOML value
    /// 从 TOML 值创建 CatalogConfig
    ///
    /// Missing keys keep their defaults. Values are not validated here:
    /// a zero `limit` is a fact, rejected later by the loader use case.
    /// Integers that do not fit the field (negative, too large) are an
    /// error rather than being truncated.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let catalog = toml_value.get("catalog");
        let http = toml_value.get("http");

        Ok(Self {
            base_url: catalog
                .and_then(|c| c.get("base_url"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(defaults.base_url),
            limit: integer_field(catalog, "catalog", "limit")?.unwrap_or(defaults.limit),
            offset: integer_field(catalog, "catalog", "offset")?.unwrap_or(defaults.offset),
            timeout_secs: integer_field(http, "http", "timeout_secs")?.unwrap_or(defaults.timeout_secs),
            user_agent: http
                .and_then(|h| h.get("user_agent"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(defaults.user_agent),
        })
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }
}

/// Read `[section] key` as an integer of the target width.
fn integer_field<T>(
    section: Option<&toml::Value>,
    section_name: &str,
    key: &str,
) -> anyhow::Result<Option<T>>
where
    T: TryFrom<i64>,
{
    let Some(raw) = section.and_then(|s| s.get(key)).and_then(|v| v.as_integer()) else {
        return Ok(None);
    };
    T::try_from(raw)
        .map(Some)
        .map_err(|_| anyhow::anyhow!("Invalid {section_name}.{key}: {raw} is out of range"))
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
