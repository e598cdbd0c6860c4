//! Test doubles for the wallet and ledger seams.
//!
//! Both record into a shared [`CallLog`] so tests can assert on ordering
//! across the two boundaries.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use solana_keypair::Keypair;
use solana_sdk::hash::Hash;
use solana_signature::Signature;
use solana_signer::Signer;

use crate::error::{RpcError, WalletError};
use crate::pubkey::Pubkey;
use crate::rpc::{Checkpoint, Confirmation, LedgerRpc};
use crate::signing::FullySignedTransaction;
use crate::transaction::{Transaction, TransactionExt};
use crate::wallet::WalletAdapter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RentQuery(usize),
    LatestCheckpoint,
    /// `mint_signed` is true when every signer other than the wallet had
    /// already signed when the wallet was asked.
    WalletSign { mint_signed: bool },
    Send,
    Confirm,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletBehavior {
    Sign,
    Reject,
    /// Return the transaction untouched.
    Echo,
    /// Sign a different message.
    Tamper,
}

pub struct RecordingWallet {
    keypair: Option<Keypair>,
    behavior: WalletBehavior,
    log: CallLog,
}

impl RecordingWallet {
    pub fn connected(log: &CallLog, behavior: WalletBehavior) -> Self {
        Self {
            keypair: Some(Keypair::new_from_array([11u8; 32])),
            behavior,
            log: log.clone(),
        }
    }

    pub fn disconnected(log: &CallLog) -> Self {
        Self {
            keypair: None,
            behavior: WalletBehavior::Sign,
            log: log.clone(),
        }
    }

    fn sign(&self, mut tx: Transaction) -> Result<Transaction, WalletError> {
        let keypair = self
            .keypair
            .as_ref()
            .ok_or_else(|| WalletError::Failed("not connected".to_string()))?;
        let key = Pubkey::new_from_array(keypair.pubkey().to_bytes());
        let signature = keypair.sign_message(&tx.signable_payload());
        tx.add_signature(&key, signature.as_ref())
            .map_err(|e| WalletError::Failed(e.to_string()))?;
        Ok(tx)
    }
}

#[async_trait(?Send)]
impl WalletAdapter for RecordingWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.keypair
            .as_ref()
            .map(|k| Pubkey::new_from_array(k.pubkey().to_bytes()))
    }

    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, WalletError> {
        let own = self.public_key();
        let mint_signed = tx.missing_signers().iter().all(|key| Some(*key) == own);
        self.log.borrow_mut().push(Call::WalletSign { mint_signed });

        match self.behavior {
            WalletBehavior::Sign => self.sign(tx),
            WalletBehavior::Reject => Err(WalletError::Declined(
                "User rejected the request.".to_string(),
            )),
            WalletBehavior::Echo => Ok(tx),
            WalletBehavior::Tamper => {
                let mut tx = tx;
                tx.message.recent_blockhash = Hash::new_from_array([0xAB; 32]);
                self.sign(tx)
            }
        }
    }
}

pub struct FakeLedger {
    log: CallLog,
    pub rent: u64,
    pub checkpoint_error: Option<RpcError>,
    pub send_error: Option<RpcError>,
    pub confirmation: Result<Confirmation, RpcError>,
    pub sent: RefCell<Vec<Transaction>>,
}

impl FakeLedger {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            rent: 1_461_600,
            checkpoint_error: None,
            send_error: None,
            confirmation: Ok(Confirmation::Confirmed),
            sent: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl LedgerRpc for FakeLedger {
    async fn latest_checkpoint(&self) -> Result<Checkpoint, RpcError> {
        self.log.borrow_mut().push(Call::LatestCheckpoint);
        if let Some(err) = &self.checkpoint_error {
            return Err(err.clone());
        }
        Ok(Checkpoint {
            blockhash: Hash::new_from_array([3u8; 32]),
            last_valid_block_height: 150,
        })
    }

    async fn minimum_balance_for_rent_exemption(&self, space: usize) -> Result<u64, RpcError> {
        self.log.borrow_mut().push(Call::RentQuery(space));
        Ok(self.rent)
    }

    async fn send_transaction(&self, tx: &FullySignedTransaction) -> Result<Signature, RpcError> {
        self.log.borrow_mut().push(Call::Send);
        if let Some(err) = &self.send_error {
            return Err(err.clone());
        }
        self.sent.borrow_mut().push(tx.transaction().clone());
        Ok(tx.signature())
    }

    async fn confirm_transaction(
        &self,
        _signature: &Signature,
        _checkpoint: Checkpoint,
    ) -> Result<Confirmation, RpcError> {
        self.log.borrow_mut().push(Call::Confirm);
        self.confirmation.clone()
    }
}

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}
