//! soroban-rpc-client: JSON-RPC client for Soroban RPC servers
//!
//! The transaction pipeline and the reserve loader talk to the ledger only
//! through the [`LedgerAccess`] trait. [`RpcClient`] is the production
//! implementation; tests substitute in-memory doubles.

pub mod address;
pub mod types;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use blend_core::{NetworkConfig, RpcError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use stellar_xdr::curr::{LedgerEntryData, LedgerKey, Limits, ReadXdr, TransactionEnvelope, WriteXdr};

pub use address::AddressError;
pub use types::{
    AccountSequence, GetHealthResponse, GetLatestLedgerResponse, GetLedgerEntriesResponse,
    GetTransactionResponse, GetTransactionStatus, LedgerEntryResult, RestorePreamble,
    SendTransactionResponse, SendTransactionStatus, SimulateHostFunctionResult,
    SimulateTransactionResponse, SorobanResponse,
};

/// Result type for RPC operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// Everything the invocation pipeline and reserve loader need from a ledger
#[async_trait]
pub trait LedgerAccess: Send + Sync {
    /// Current sequence number of a source account
    async fn get_account(&self, account_id: &str) -> Result<AccountSequence>;

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse>;

    async fn send_transaction(&self, envelope: &TransactionEnvelope)
        -> Result<SendTransactionResponse>;

    async fn get_transaction(&self, hash: &str) -> Result<GetTransactionResponse>;

    async fn get_ledger_entries(&self, keys: &[LedgerKey]) -> Result<GetLedgerEntriesResponse>;
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Soroban RPC client
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    config: NetworkConfig,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(config: NetworkConfig) -> Result<Self> {
        if config.rpc_url.starts_with("http://") && !config.allow_http {
            return Err(RpcError::Unreachable {
                url: format!("{}: plain http is not allowed", config.rpc_url),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| RpcError::Unreachable {
                url: format!("{}: {}", config.rpc_url, e),
            })?;

        Ok(Self {
            http,
            config,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub async fn get_health(&self) -> Result<GetHealthResponse> {
        self.request("getHealth", None).await
    }

    pub async fn get_latest_ledger(&self) -> Result<GetLatestLedgerResponse> {
        self.request("getLatestLedger", None).await
    }

    /// Check if the RPC answers and reports itself healthy
    pub async fn is_online(&self) -> bool {
        self.get_health()
            .await
            .map(|h| h.status == "healthy")
            .unwrap_or(false)
    }

    async fn request<R: DeserializeOwned>(&self, method: &str, params: Option<Value>) -> Result<R> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
        });
        if let Some(params) = params {
            body["params"] = params;
        }

        tracing::debug!(method, id, url = %self.config.rpc_url, "RPC request");

        let send = async {
            self.http
                .post(&self.config.rpc_url)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() {
                        RpcError::Unreachable {
                            url: self.config.rpc_url.clone(),
                        }
                    } else {
                        RpcError::ApiError {
                            message: e.to_string(),
                        }
                    }
                })?
                .json::<JsonRpcResponse<R>>()
                .await
                .map_err(|e| RpcError::ParseError(format!("{}: {}", method, e)))
        };

        let response = timed_request(self.config.request_timeout_secs, send).await?;
        into_result(method, response)
    }
}

#[async_trait]
impl LedgerAccess for RpcClient {
    async fn get_account(&self, account_id: &str) -> Result<AccountSequence> {
        let key = address::account_ledger_key(account_id)
            .map_err(|e| RpcError::ParseError(e.to_string()))?;
        let response = self.get_ledger_entries(&[key]).await?;

        let entry = response
            .entries
            .first()
            .ok_or_else(|| RpcError::EntryNotFound {
                key: account_id.to_string(),
            })?;
        let data = LedgerEntryData::from_xdr_base64(&entry.xdr, Limits::none())
            .map_err(|e| RpcError::ParseError(format!("account entry: {}", e)))?;

        match data {
            LedgerEntryData::Account(account) => Ok(AccountSequence {
                account_id: account_id.to_string(),
                sequence: account.seq_num.0,
            }),
            other => Err(RpcError::ParseError(format!(
                "expected an account entry, got {}",
                other.name()
            ))),
        }
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse> {
        let transaction = encode_envelope(envelope)?;
        self.request("simulateTransaction", Some(json!({ "transaction": transaction })))
            .await
    }

    async fn send_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SendTransactionResponse> {
        let transaction = encode_envelope(envelope)?;
        self.request("sendTransaction", Some(json!({ "transaction": transaction })))
            .await
    }

    async fn get_transaction(&self, hash: &str) -> Result<GetTransactionResponse> {
        self.request("getTransaction", Some(json!({ "hash": hash })))
            .await
    }

    async fn get_ledger_entries(&self, keys: &[LedgerKey]) -> Result<GetLedgerEntriesResponse> {
        let keys = keys
            .iter()
            .map(|k| {
                k.to_xdr_base64(Limits::none())
                    .map_err(|e| RpcError::ParseError(format!("ledger key: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;
        self.request("getLedgerEntries", Some(json!({ "keys": keys })))
            .await
    }
}

fn encode_envelope(envelope: &TransactionEnvelope) -> Result<String> {
    envelope
        .to_xdr_base64(Limits::none())
        .map_err(|e| RpcError::ParseError(format!("envelope: {}", e)))
}

fn into_result<R>(method: &str, response: JsonRpcResponse<R>) -> Result<R> {
    if let Some(err) = response.error {
        tracing::warn!(method, code = err.code, error = %err.message, "RPC returned an error");
        let message = match err.data {
            Some(data) => format!("{} ({}): {}", err.message, err.code, data),
            None => format!("{} ({})", err.message, err.code),
        };
        return Err(RpcError::ApiError { message });
    }
    response
        .result
        .ok_or_else(|| RpcError::ParseError(format!("{}: response has no result", method)))
}

async fn timed_request<T>(
    secs: u64,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(std::time::Duration::from_secs(secs), fut)
        .await
        .map_err(|_| RpcError::Timeout { secs })?
}
