//! Dual-signature pipeline.
//!
//! A creation transaction needs two signatures: the fresh mint identity (it is
//! the new account being created) and the wallet (fee payer and mint
//! authority). The states are separate types so the order cannot be broken:
//!
//! ```text
//! UnsignedTransaction --sign_with_mint--> PartiallySignedTransaction
//!     --accept_wallet_signature--> FullySignedTransaction --> LedgerRpc::send_transaction
//! ```
//!
//! Only a [`PartiallySignedTransaction`] can be handed to a wallet and only a
//! [`FullySignedTransaction`] can be broadcast.

use solana_sdk::message::Message;
use solana_signature::Signature;

use crate::builder::OperationBatch;
use crate::error::TokenError;
use crate::keypair::MintIdentity;
use crate::pubkey::Pubkey;
use crate::rpc::Checkpoint;
use crate::transaction::{Transaction, TransactionExt};

/// Compiled message with empty signature slots.
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    tx: Transaction,
}

impl UnsignedTransaction {
    /// Compile `batch` with `payer` as fee payer against the checkpoint's blockhash.
    pub fn compile(batch: &OperationBatch, payer: &Pubkey, checkpoint: &Checkpoint) -> Self {
        let message = Message::new_with_blockhash(
            &batch.instructions(),
            Some(payer),
            &checkpoint.blockhash,
        );
        UnsignedTransaction {
            tx: Transaction::new_unsigned(message),
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// Sign with the mint identity. The identity is consumed.
    pub fn sign_with_mint(
        self,
        mint: MintIdentity,
    ) -> Result<PartiallySignedTransaction, TokenError> {
        let mut tx = self.tx;
        let mint_pubkey = mint.pubkey();
        if tx.signer_index(&mint_pubkey).is_none() {
            return Err(TokenError::Build(format!(
                "mint {} is not a signer of the transaction",
                mint_pubkey
            )));
        }
        let signature = mint.sign_once(&tx.signable_payload());
        tx.add_signature(&mint_pubkey, &signature)?;
        Ok(PartiallySignedTransaction {
            tx,
            mint: mint_pubkey,
        })
    }
}

/// Carries the mint's signature; waiting on the wallet.
#[derive(Debug, Clone)]
pub struct PartiallySignedTransaction {
    tx: Transaction,
    mint: Pubkey,
}

impl PartiallySignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    pub fn mint(&self) -> Pubkey {
        self.mint
    }

    /// Verify what the wallet returned.
    ///
    /// The message must be byte-identical, the mint's signature must still be
    /// present and every required signer must carry a valid signature.
    pub fn accept_wallet_signature(
        self,
        signed: Transaction,
    ) -> Result<FullySignedTransaction, TokenError> {
        if signed.message != self.tx.message {
            return Err(TokenError::SignatureMismatch(
                "wallet modified the transaction message".to_string(),
            ));
        }
        if !signed.is_signed_by(&self.mint) {
            return Err(TokenError::SignatureMismatch(
                "mint signature is missing".to_string(),
            ));
        }
        let missing = signed.missing_signers();
        if !missing.is_empty() {
            let missing: Vec<String> = missing.iter().map(|k| k.to_string()).collect();
            return Err(TokenError::SignatureMismatch(format!(
                "missing signature for {}",
                missing.join(", ")
            )));
        }
        Ok(FullySignedTransaction { tx: signed })
    }
}

/// Every required signature present and valid. The only broadcastable state.
#[derive(Debug, Clone)]
pub struct FullySignedTransaction {
    tx: Transaction,
}

impl FullySignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// The fee payer's signature, which is also the transaction id.
    pub fn signature(&self) -> Signature {
        self.tx.signatures.first().copied().unwrap_or_default()
    }

    pub fn to_base64(&self) -> Result<String, TokenError> {
        self.tx.to_base64()
    }
}
