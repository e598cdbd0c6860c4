//! Wallet boundary.

use async_trait::async_trait;

use crate::error::WalletError;
use crate::pubkey::Pubkey;
use crate::transaction::Transaction;

/// A connected (or disconnected) browser wallet.
///
/// The wallet owns the payer's key; this crate only ever asks it to sign.
#[async_trait(?Send)]
pub trait WalletAdapter {
    /// The connected account, or `None` when no wallet is connected.
    fn public_key(&self) -> Option<Pubkey>;

    /// Add the wallet's signature to `tx` and return it.
    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, WalletError>;
}
