use thiserror::Error;

/// Failure talking to the remote catalog.
///
/// Every variant is terminal for the request that produced it; nothing in
/// the client retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("invalid locator: {0}")]
    InvalidLocator(String),
}
