use crate::errors::{ChainError, MonitorError};
use crate::logic::types::QuoteSource;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Read-only access to contract state on the remote node.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Execute an `eth_call` against the latest block and return the raw return data.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError>;
}

/// Encode `call`, run it through `client` and decode the typed return value.
///
/// Transport failures surface as `SourceUnavailable`, undecodable return data as
/// `MalformedResult`, both tagged with `source`.
pub async fn call_contract<C: SolCall>(
    client: &dyn ChainClient,
    source: QuoteSource,
    to: Address,
    call: C,
) -> Result<C::Return, MonitorError> {
    let raw = client
        .call(to, call.abi_encode().into())
        .await
        .map_err(|error| MonitorError::unavailable(source, error))?;

    debug!("{}: {} on {:#x} returned {} bytes", source, C::SIGNATURE, to, raw.len());

    C::abi_decode_returns(&raw).map_err(|e| MonitorError::malformed(source, format!("{}: {}", C::SIGNATURE, e)))
}

/// JSON-RPC client issuing `eth_call` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChainClient {
    http_client: reqwest::Client,
    rpc_url: String,
}

impl HttpChainClient {
    pub fn new(rpc_url: String, timeout: Duration) -> Result<Self, ChainError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http_client, rpc_url })
    }

    fn request_body(to: Address, data: &Bytes) -> Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                {
                    "to": format!("{:#x}", to),
                    "data": format!("{:#x}", data)
                },
                "latest"
            ],
            "id": 1
        })
    }

    fn parse_response(response_json: &Value) -> Result<Bytes, ChainError> {
        if let Some(error) = response_json.get("error") {
            return Err(ChainError::Rpc(error.to_string()));
        }

        let result = response_json
            .get("result")
            .and_then(|r| r.as_str())
            .ok_or_else(|| ChainError::InvalidResponse("missing result in RPC response".to_string()))?;

        let bytes = hex::decode(result.trim_start_matches("0x"))?;
        Ok(bytes.into())
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let response = self
            .http_client
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&Self::request_body(to, &data))
            .send()
            .await?
            .error_for_status()?;

        let response_json: Value = response.json().await?;
        Self::parse_response(&response_json)
    }
}
