use crate::detail::ProjectionError;
use crate::ports::CatalogError;
use thiserror::Error;

/// Consumer-visible `{ value, loading }` pair tracking one asynchronous resolution.
/// 消费方可见的 `{ value, loading }` 状态
///
/// While `loading` is true, `value` still holds the previous resolution (or
/// `None` on first load). A failed resolution is indistinguishable from
/// "nothing requested": `value = None, loading = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    pub value: Option<T>,
    pub loading: bool,
}

impl<T> FetchState<T> {
    pub fn idle() -> Self {
        Self {
            value: None,
            loading: false,
        }
    }

    pub fn loading(stale: Option<T>) -> Self {
        Self {
            value: stale,
            loading: true,
        }
    }

    pub fn resolved(value: T) -> Self {
        Self {
            value: Some(value),
            loading: false,
        }
    }

    /// Settled with nothing to show.
    pub fn is_absent(&self) -> bool {
        !self.loading && self.value.is_none()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        FetchState {
            value: self.value.map(f),
            loading: self.loading,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Why a resolution produced no value.
///
/// Both kinds collapse to an absent value in [`FetchState`]; the distinction
/// only exists for logs and state-machine bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("no locator requested")]
    NotRequested,

    #[error("transport or parse failure: {0}")]
    TransportOrParse(String),
}

impl From<CatalogError> for FetchFailure {
    fn from(err: CatalogError) -> Self {
        FetchFailure::TransportOrParse(err.to_string())
    }
}

impl From<ProjectionError> for FetchFailure {
    fn from(err: ProjectionError) -> Self {
        FetchFailure::TransportOrParse(err.to_string())
    }
}
