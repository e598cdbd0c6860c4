//! Ledger RPC boundary.

mod http;

pub use http::HttpRpcClient;

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_signature::Signature;

use crate::error::RpcError;
use crate::signing::FullySignedTransaction;

/// Recent blockhash an attempt is built against.
///
/// Fetched fresh for every attempt and consumed by confirmation.
#[derive(Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub blockhash: Hash,
    /// Last block height at which a transaction using `blockhash` can land.
    pub last_valid_block_height: u64,
}

/// How waiting for a sent transaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Reached the configured commitment.
    Confirmed,
    /// Blockhash expired or the poll budget ran out first.
    TimedOut,
    /// Landed with an execution error.
    Failed(String),
}

#[async_trait(?Send)]
pub trait LedgerRpc {
    async fn latest_checkpoint(&self) -> Result<Checkpoint, RpcError>;

    async fn minimum_balance_for_rent_exemption(&self, space: usize) -> Result<u64, RpcError>;

    /// Broadcast; returns the transaction signature reported by the node.
    async fn send_transaction(&self, tx: &FullySignedTransaction) -> Result<Signature, RpcError>;

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        checkpoint: Checkpoint,
    ) -> Result<Confirmation, RpcError>;
}
