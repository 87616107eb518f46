use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute address of a single detail resource.
/// 单个详情资源的绝对地址
///
/// An empty (or whitespace-only) locator is a valid value: it means
/// "nothing requested" and must never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Locator> for Locator {
    fn from(value: &Locator) -> Self {
        value.clone()
    }
}
