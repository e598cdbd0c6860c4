//! Solana transaction serialization and signature slots.
//!
//! Wraps `solana_transaction::Transaction` for the signing pipeline.
//!
//! # Wire Format
//!
//! Solana transactions use a compact binary format:
//! - Signatures (variable length array)
//! - Message (contains instructions, accounts, blockhash)
//!
//! Wallets exchange the bincode wire bytes; the RPC takes them base64-encoded.

use crate::error::TokenError;
use crate::pubkey::Pubkey;
use base64::prelude::*;
use solana_signature::Signature;

/// Re-export the underlying Solana Transaction type.
pub use solana_transaction::Transaction;

/// Extension trait for Transaction to add signing-pipeline helpers.
pub trait TransactionExt {
    /// Deserialize a transaction from raw bytes (wire format).
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, TokenError>;

    /// Serialize transaction to bytes (wire format).
    fn to_bytes(&self) -> Result<Vec<u8>, TokenError>;

    /// Serialize transaction to base64, as `sendTransaction` expects.
    fn to_base64(&self) -> Result<String, TokenError>;

    /// Get the signable message bytes (what gets signed).
    fn signable_payload(&self) -> Vec<u8>;

    /// Get the index of a pubkey in the account keys, if it's a signer.
    fn signer_index(&self, pubkey: &Pubkey) -> Option<usize>;

    /// Add a signature for a given public key.
    ///
    /// The pubkey must be one of the required signers in the transaction.
    fn add_signature(&mut self, pubkey: &Pubkey, signature: &[u8]) -> Result<(), TokenError>;

    /// Whether `pubkey`'s slot holds a valid signature over the message.
    fn is_signed_by(&self, pubkey: &Pubkey) -> bool;

    /// Required signers whose slot is empty or does not verify.
    fn missing_signers(&self) -> Vec<Pubkey>;
}

impl TransactionExt for Transaction {
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, TokenError> {
        bincode::deserialize(bytes).map_err(|e| {
            TokenError::SignatureMismatch(format!("Failed to deserialize transaction: {}", e))
        })
    }

    fn to_bytes(&self) -> Result<Vec<u8>, TokenError> {
        bincode::serialize(self)
            .map_err(|e| TokenError::Build(format!("Failed to serialize transaction: {}", e)))
    }

    fn to_base64(&self) -> Result<String, TokenError> {
        Ok(BASE64_STANDARD.encode(self.to_bytes()?))
    }

    fn signable_payload(&self) -> Vec<u8> {
        self.message.serialize()
    }

    fn signer_index(&self, pubkey: &Pubkey) -> Option<usize> {
        let num_signers = self.message.header.num_required_signatures as usize;

        // Use the same pattern as Solana's get_signing_keypair_positions
        let signed_keys = self.message.account_keys.get(0..num_signers)?;
        signed_keys.iter().position(|x| x == pubkey)
    }

    fn add_signature(
        &mut self,
        pubkey: &Pubkey,
        signature_bytes: &[u8],
    ) -> Result<(), TokenError> {
        // Validate signature length (Ed25519 signature is 64 bytes)
        let bytes: [u8; 64] = signature_bytes.try_into().map_err(|_| {
            TokenError::Build(format!(
                "Invalid signature length: expected 64 bytes, got {}",
                signature_bytes.len()
            ))
        })?;

        let signer_idx = self
            .signer_index(pubkey)
            .ok_or_else(|| TokenError::Build(format!("unknown signer: {}", pubkey)))?;

        // Ensure signatures array is properly sized (same as Solana's internal pattern)
        let num_signers = self.message.header.num_required_signatures as usize;
        if self.signatures.len() < num_signers {
            self.signatures.resize(num_signers, Signature::default());
        }

        self.signatures[signer_idx] = Signature::from(bytes);

        Ok(())
    }

    fn is_signed_by(&self, pubkey: &Pubkey) -> bool {
        let Some(idx) = self.signer_index(pubkey) else {
            return false;
        };
        match self.signatures.get(idx) {
            Some(sig) if *sig != Signature::default() => {
                sig.verify(pubkey.as_ref(), &self.signable_payload())
            }
            _ => false,
        }
    }

    fn missing_signers(&self) -> Vec<Pubkey> {
        let num_signers = self.message.header.num_required_signatures as usize;
        self.message
            .account_keys
            .iter()
            .take(num_signers)
            .filter(|key| !self.is_signed_by(key))
            .copied()
            .collect()
    }
}
