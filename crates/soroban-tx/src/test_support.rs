//! Builders and in-memory doubles shared by the pipeline tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use blend_core::{RpcError, TxError};
use soroban_rpc_client::{
    address, AccountSequence, GetLedgerEntriesResponse, GetTransactionResponse,
    GetTransactionStatus, LedgerAccess, RestorePreamble, SendTransactionResponse,
    SendTransactionStatus, SimulateHostFunctionResult, SimulateTransactionResponse,
};
use stellar_xdr::curr::{
    ExtensionPoint, Hash, HostFunction, InvokeContractArgs, InvokeHostFunctionOp,
    InvokeHostFunctionResult, LedgerEntryChanges, LedgerFootprint, LedgerKey, Limits, Operation,
    OperationBody, OperationResult, OperationResultTr, ScAddress, ScSymbol, ScVal,
    SorobanResources, SorobanTransactionData, SorobanTransactionMeta, SorobanTransactionMetaExt,
    TransactionEnvelope, TransactionMeta, TransactionMetaV3, TransactionResult,
    TransactionResultExt, TransactionResultResult, VecM, WriteXdr,
};

use crate::fixtures::JOIN_POOL_SOURCE;
use crate::invoke::TransactionSigner;

pub const POOL: &str = "CAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC526";

pub fn invoke_operation() -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(InvokeContractArgs {
                contract_address: ScAddress::Contract(Hash([1; 32])),
                function_name: ScSymbol("submit".try_into().unwrap()),
                args: VecM::default(),
            }),
            auth: VecM::default(),
        }),
    }
}

fn symbol(name: &str) -> ScVal {
    ScVal::Symbol(ScSymbol(name.try_into().unwrap()))
}

pub fn transaction_data() -> SorobanTransactionData {
    let read_only: Vec<LedgerKey> = vec![address::contract_instance_key(POOL).unwrap()];
    let read_write: Vec<LedgerKey> =
        vec![address::contract_data_key(POOL, symbol("Balance")).unwrap()];
    SorobanTransactionData {
        ext: ExtensionPoint::V0,
        resources: SorobanResources {
            footprint: LedgerFootprint {
                read_only: read_only.try_into().unwrap(),
                read_write: read_write.try_into().unwrap(),
            },
            instructions: 1_000_000,
            read_bytes: 2_000,
            write_bytes: 300,
        },
        resource_fee: 4_000,
    }
}

pub fn simulation_success(value: Option<ScVal>) -> SimulateTransactionResponse {
    let xdr = value
        .map(|v| v.to_xdr_base64(Limits::none()).unwrap())
        .unwrap_or_default();
    SimulateTransactionResponse {
        latest_ledger: 1_000,
        transaction_data: Some(transaction_data().to_xdr_base64(Limits::none()).unwrap()),
        min_resource_fee: Some("5000".into()),
        results: vec![SimulateHostFunctionResult { auth: vec![], xdr }],
        ..Default::default()
    }
}

pub fn restore_simulation() -> SimulateTransactionResponse {
    let data = transaction_data().to_xdr_base64(Limits::none()).unwrap();
    SimulateTransactionResponse {
        restore_preamble: Some(RestorePreamble {
            transaction_data: data,
            min_resource_fee: "1200".into(),
        }),
        ..simulation_success(None)
    }
}

fn polled(status: GetTransactionStatus) -> GetTransactionResponse {
    GetTransactionResponse {
        status,
        latest_ledger: 1_001,
        ledger: None,
        envelope_xdr: None,
        result_xdr: None,
        result_meta_xdr: None,
    }
}

pub fn polled_not_found() -> GetTransactionResponse {
    polled(GetTransactionStatus::NotFound)
}

pub fn polled_success(value: ScVal) -> GetTransactionResponse {
    let meta = TransactionMeta::V3(TransactionMetaV3 {
        ext: ExtensionPoint::V0,
        tx_changes_before: LedgerEntryChanges(VecM::default()),
        operations: VecM::default(),
        tx_changes_after: LedgerEntryChanges(VecM::default()),
        soroban_meta: Some(SorobanTransactionMeta {
            ext: SorobanTransactionMetaExt::V0,
            events: VecM::default(),
            return_value: value,
            diagnostic_events: VecM::default(),
        }),
    });
    GetTransactionResponse {
        ledger: Some(1_001),
        result_meta_xdr: Some(meta.to_xdr_base64(Limits::none()).unwrap()),
        ..polled(GetTransactionStatus::Success)
    }
}

pub fn polled_failure() -> GetTransactionResponse {
    let result = TransactionResult {
        fee_charged: 5_100,
        result: TransactionResultResult::TxFailed(
            vec![OperationResult::OpInner(
                OperationResultTr::InvokeHostFunction(InvokeHostFunctionResult::Trapped),
            )]
            .try_into()
            .unwrap(),
        ),
        ext: TransactionResultExt::V0,
    };
    GetTransactionResponse {
        ledger: Some(1_001),
        result_xdr: Some(result.to_xdr_base64(Limits::none()).unwrap()),
        ..polled(GetTransactionStatus::Failed)
    }
}

pub fn submission(status: SendTransactionStatus) -> SendTransactionResponse {
    SendTransactionResponse {
        status,
        hash: String::new(),
        latest_ledger: 1_000,
        error_result_xdr: None,
        diagnostic_events_xdr: None,
    }
}

/// Submission rejected at the front door with a `TxBadSeq` result
pub fn rejected_submission() -> SendTransactionResponse {
    let result = TransactionResult {
        fee_charged: 100,
        result: TransactionResultResult::TxBadSeq,
        ext: TransactionResultExt::V0,
    };
    SendTransactionResponse {
        error_result_xdr: Some(result.to_xdr_base64(Limits::none()).unwrap()),
        ..submission(SendTransactionStatus::Error)
    }
}

/// Scripted ledger that records every call it receives
pub struct MockLedger {
    pub account: AccountSequence,
    pub simulation: SimulateTransactionResponse,
    pub submission: SendTransactionResponse,
    pub polls: Mutex<VecDeque<GetTransactionResponse>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockLedger {
    pub fn new(simulation: SimulateTransactionResponse) -> Self {
        Self {
            account: AccountSequence {
                account_id: JOIN_POOL_SOURCE.to_string(),
                sequence: 100,
            },
            simulation,
            submission: submission(SendTransactionStatus::Pending),
            polls: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_submission(mut self, submission: SendTransactionResponse) -> Self {
        self.submission = submission;
        self
    }

    pub fn with_polls(self, polls: Vec<GetTransactionResponse>) -> Self {
        *self.polls.lock().unwrap() = polls.into();
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| **c == method).count()
    }

    fn record(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }
}

#[async_trait]
impl LedgerAccess for MockLedger {
    async fn get_account(&self, _account_id: &str) -> Result<AccountSequence, RpcError> {
        self.record("get_account");
        Ok(self.account.clone())
    }

    async fn simulate_transaction(
        &self,
        _envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse, RpcError> {
        self.record("simulate_transaction");
        Ok(self.simulation.clone())
    }

    async fn send_transaction(
        &self,
        _envelope: &TransactionEnvelope,
    ) -> Result<SendTransactionResponse, RpcError> {
        self.record("send_transaction");
        Ok(self.submission.clone())
    }

    async fn get_transaction(&self, _hash: &str) -> Result<GetTransactionResponse, RpcError> {
        self.record("get_transaction");
        Ok(self
            .polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(polled_not_found))
    }

    async fn get_ledger_entries(
        &self,
        _keys: &[LedgerKey],
    ) -> Result<GetLedgerEntriesResponse, RpcError> {
        self.record("get_ledger_entries");
        Ok(GetLedgerEntriesResponse::default())
    }
}

/// Signer that returns the envelope unchanged and counts invocations
#[derive(Default)]
pub struct RecordingSigner {
    calls: AtomicUsize,
}

impl RecordingSigner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSigner for RecordingSigner {
    async fn sign(&self, tx_xdr: &str) -> Result<String, TxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(tx_xdr.to_string())
    }
}
