use crate::logic::types::QuoteSource;
use alloy_primitives::Address;

/// Failure talking to the node, before any contract-level decoding happens.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),
}

impl From<hex::FromHexError> for ChainError {
    fn from(error: hex::FromHexError) -> Self {
        Self::InvalidResponse(error.to_string())
    }
}

/// Errors that abort a monitoring tick. All of them stop the monitor.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("no pool registered for token {token}")]
    PairNotFound { token: Address },
    #[error("{source_kind} source unavailable: {error}")]
    SourceUnavailable {
        source_kind: QuoteSource,
        #[source]
        error: ChainError,
    },
    #[error("{source_kind} source returned malformed result: {reason}")]
    MalformedResult { source_kind: QuoteSource, reason: String },
}

impl MonitorError {
    pub fn unavailable(source_kind: QuoteSource, error: ChainError) -> Self {
        Self::SourceUnavailable { source_kind, error }
    }

    pub fn malformed(source_kind: QuoteSource, reason: impl ToString) -> Self {
        Self::MalformedResult { source_kind, reason: reason.to_string() }
    }
}
