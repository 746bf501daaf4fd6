//! Soroban RPC response types
//!
//! Field names follow the RPC's camelCase JSON. XDR payloads are kept as
//! base64 strings; decoding happens where the value is interpreted.

use serde::{Deserialize, Serialize};

/// `getHealth` result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetHealthResponse {
    pub status: String,
    #[serde(default)]
    pub latest_ledger: Option<u32>,
    #[serde(default)]
    pub oldest_ledger: Option<u32>,
}

/// `getLatestLedger` result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLatestLedgerResponse {
    pub id: String,
    pub protocol_version: u32,
    pub sequence: u32,
}

/// Source account state needed to build an envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSequence {
    pub account_id: String,
    pub sequence: i64,
}

/// One host-function result from a simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateHostFunctionResult {
    #[serde(default)]
    pub auth: Vec<String>,
    pub xdr: String,
}

/// Footprint and fee needed to restore archived entries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestorePreamble {
    pub transaction_data: String,
    pub min_resource_fee: String,
}

/// `simulateTransaction` result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionResponse {
    #[serde(default)]
    pub latest_ledger: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resource_fee: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<SimulateHostFunctionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_preamble: Option<RestorePreamble>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

impl SimulateTransactionResponse {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Simulation succeeded but archived entries must be restored first
    pub fn is_restore(&self) -> bool {
        self.restore().is_some()
    }

    /// Restore preamble of a simulation that needs archived entries restored
    pub fn restore(&self) -> Option<&RestorePreamble> {
        self.restore_preamble.as_ref().filter(|_| !self.is_error())
    }

    pub fn is_success(&self) -> bool {
        !self.is_error() && self.transaction_data().is_some()
    }

    /// Resource data, treating the RPC's empty string as absent
    pub fn transaction_data(&self) -> Option<&str> {
        self.transaction_data.as_deref().filter(|s| !s.is_empty())
    }

    pub fn min_resource_fee(&self) -> Option<&str> {
        self.min_resource_fee.as_deref().filter(|s| !s.is_empty())
    }

    /// Return value of the first host function, if any
    pub fn return_value_xdr(&self) -> Option<&str> {
        self.results
            .first()
            .map(|r| r.xdr.as_str())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendTransactionStatus {
    Pending,
    Duplicate,
    TryAgainLater,
    Error,
}

impl SendTransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Duplicate => "DUPLICATE",
            Self::TryAgainLater => "TRY_AGAIN_LATER",
            Self::Error => "ERROR",
        }
    }
}

/// `sendTransaction` result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    pub status: SendTransactionStatus,
    pub hash: String,
    #[serde(default)]
    pub latest_ledger: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_result_xdr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_events_xdr: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GetTransactionStatus {
    Success,
    NotFound,
    Failed,
}

impl GetTransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::NotFound => "NOT_FOUND",
            Self::Failed => "FAILED",
        }
    }
}

/// `getTransaction` result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionResponse {
    pub status: GetTransactionStatus,
    #[serde(default)]
    pub latest_ledger: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_xdr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_xdr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_meta_xdr: Option<String>,
}

/// `getLedgerEntries` result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLedgerEntriesResponse {
    #[serde(default)]
    pub entries: Vec<LedgerEntryResult>,
    #[serde(default)]
    pub latest_ledger: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResult {
    /// Base64 `LedgerKey`
    pub key: String,
    /// Base64 `LedgerEntryData`
    pub xdr: String,
    #[serde(default)]
    pub last_modified_ledger_seq: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_until_ledger_seq: Option<u32>,
}

/// Any response the transaction pipeline can produce, tagged at the RPC
/// boundary so callers never sniff fields to tell them apart.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SorobanResponse {
    Simulation(SimulateTransactionResponse),
    Submitted(SendTransactionResponse),
    Polled(GetTransactionResponse),
}

impl SorobanResponse {
    /// Status string as reported by the RPC, if the response carries one
    pub fn status(&self) -> Option<&'static str> {
        match self {
            Self::Simulation(_) => None,
            Self::Submitted(r) => Some(r.status.as_str()),
            Self::Polled(r) => Some(r.status.as_str()),
        }
    }

    /// Submission accepted or not yet visible in a ledger
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::Submitted(SendTransactionResponse {
                status: SendTransactionStatus::Pending,
                ..
            }) | Self::Polled(GetTransactionResponse {
                status: GetTransactionStatus::NotFound,
                ..
            })
        )
    }
}

impl From<SimulateTransactionResponse> for SorobanResponse {
    fn from(r: SimulateTransactionResponse) -> Self {
        Self::Simulation(r)
    }
}

impl From<SendTransactionResponse> for SorobanResponse {
    fn from(r: SendTransactionResponse) -> Self {
        Self::Submitted(r)
    }
}

impl From<GetTransactionResponse> for SorobanResponse {
    fn from(r: GetTransactionResponse) -> Self {
        Self::Polled(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_flags() {
        let sim: SimulateTransactionResponse = serde_json::from_str(
            r#"{"latestLedger": 100, "error": "HostError: Error(Contract, #1205)", "transactionData": ""}"#,
        )
        .unwrap();
        assert!(sim.is_error());
        assert!(!sim.is_success());
        assert!(!sim.is_restore());
        assert!(sim.transaction_data().is_none());

        let sim: SimulateTransactionResponse = serde_json::from_str(
            r#"{
                "latestLedger": 100,
                "transactionData": "AAAA",
                "minResourceFee": "1234",
                "restorePreamble": {"transactionData": "BBBB", "minResourceFee": "99"}
            }"#,
        )
        .unwrap();
        assert!(sim.is_restore());
        assert!(sim.is_success());
        assert_eq!(sim.min_resource_fee(), Some("1234"));
        assert_eq!(sim.restore().unwrap().min_resource_fee, "99");
    }

    #[test]
    fn test_errored_simulation_is_not_a_restore() {
        let sim: SimulateTransactionResponse = serde_json::from_str(
            r#"{
                "latestLedger": 100,
                "error": "HostError: Error(Storage, MissingValue)",
                "restorePreamble": {"transactionData": "BBBB", "minResourceFee": "99"}
            }"#,
        )
        .unwrap();
        assert!(sim.restore().is_none());
        assert!(!sim.is_restore());
    }

    #[test]
    fn test_send_status_parsing() {
        let sent: SendTransactionResponse = serde_json::from_str(
            r#"{"status": "TRY_AGAIN_LATER", "hash": "ab", "latestLedger": 5, "latestLedgerCloseTime": "1700000000"}"#,
        )
        .unwrap();
        assert_eq!(sent.status, SendTransactionStatus::TryAgainLater);
        assert!(!SorobanResponse::from(sent).is_pending());
    }

    #[test]
    fn test_pending_detection() {
        let polled: GetTransactionResponse =
            serde_json::from_str(r#"{"status": "NOT_FOUND", "latestLedger": 7}"#).unwrap();
        let response = SorobanResponse::from(polled);
        assert!(response.is_pending());
        assert_eq!(response.status(), Some("NOT_FOUND"));

        let sent = SendTransactionResponse {
            status: SendTransactionStatus::Pending,
            hash: "ab".into(),
            latest_ledger: 1,
            error_result_xdr: None,
            diagnostic_events_xdr: None,
        };
        assert!(SorobanResponse::from(sent).is_pending());
    }

    #[test]
    fn test_ledger_entries_parsing() {
        let entries: GetLedgerEntriesResponse = serde_json::from_str(
            r#"{"entries": [{"key": "k", "xdr": "x", "lastModifiedLedgerSeq": 12, "liveUntilLedgerSeq": 99}], "latestLedger": 20}"#,
        )
        .unwrap();
        assert_eq!(entries.entries.len(), 1);
        assert_eq!(entries.entries[0].live_until_ledger_seq, Some(99));
    }
}
