//! One token creation attempt, end to end.
//!
//! Preconditions (wallet connected, form valid, metadata constructible) are
//! checked before any key is generated or any network call is made. After
//! that the attempt suspends three times: rent and checkpoint fetch, wallet
//! signature, broadcast (plus confirmation when configured).

use std::cell::Cell;
use std::rc::Rc;

use solana_signature::Signature;
use tracing::{debug, info, warn};

use crate::builder::{associated_token_address, build_create_token, mint_layout};
use crate::config::{ClientConfig, CreateTokenOptions};
use crate::error::TokenError;
use crate::form::{TokenCreationRequest, TokenForm};
use crate::keypair::MintIdentity;
use crate::pubkey::Pubkey;
use crate::rpc::{Confirmation, LedgerRpc};
use crate::signing::UnsignedTransaction;
use crate::wallet::WalletAdapter;

/// Addresses and id of a broadcast creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedToken {
    pub mint: Pubkey,
    /// Creator's associated token account for the mint. Only created on-chain
    /// when the initial supply is non-zero.
    pub derived_account: Pubkey,
    pub signature: Signature,
}

/// Terminal state of an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Reached the configured commitment.
    Confirmed(CreatedToken),
    /// Broadcast without waiting for confirmation.
    Submitted(CreatedToken),
    /// Broadcast, but not seen at the configured commitment in time.
    ConfirmationTimedOut(CreatedToken),
    Failed(TokenError),
}

impl SubmissionOutcome {
    pub fn created(&self) -> Option<&CreatedToken> {
        match self {
            SubmissionOutcome::Confirmed(token)
            | SubmissionOutcome::Submitted(token)
            | SubmissionOutcome::ConfirmationTimedOut(token) => Some(token),
            SubmissionOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&TokenError> {
        match self {
            SubmissionOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this outcome is a finished attempt; a rejected re-entrant
    /// submit leaves the previous result in place.
    pub fn replaces_last_result(&self) -> bool {
        !matches!(self, SubmissionOutcome::Failed(TokenError::SubmissionInProgress))
    }
}

/// Re-entrancy guard: at most one attempt in flight per page.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    in_flight: Rc<Cell<bool>>,
}

impl SubmitGate {
    /// Claim the gate. `None` while another attempt holds it.
    pub fn try_enter(&self) -> Option<SubmitGuard> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(SubmitGuard {
            in_flight: self.in_flight.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }
}

/// Releases the gate on drop.
#[derive(Debug)]
pub struct SubmitGuard {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

/// Page-level controller: configuration plus the re-entrancy gate.
#[derive(Debug, Clone, Default)]
pub struct TokenCreator {
    config: ClientConfig,
    options: CreateTokenOptions,
    gate: SubmitGate,
}

impl TokenCreator {
    pub fn new(config: ClientConfig, options: CreateTokenOptions) -> Self {
        Self {
            config,
            options,
            gate: SubmitGate::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn options(&self) -> &CreateTokenOptions {
        &self.options
    }

    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    /// Run one attempt for the current form values.
    pub async fn submit(
        &self,
        form: &TokenForm,
        wallet: &dyn WalletAdapter,
        rpc: &dyn LedgerRpc,
    ) -> SubmissionOutcome {
        let Some(_guard) = self.gate.try_enter() else {
            debug!("submit ignored, attempt in flight");
            return SubmissionOutcome::Failed(TokenError::SubmissionInProgress);
        };

        let result = match wallet.public_key() {
            None => Err(TokenError::WalletNotConnected),
            Some(_) => match form.to_request() {
                Ok(request) => {
                    create_token(&request, &self.options, &self.config, wallet, rpc).await
                }
                Err(err) => Err(err),
            },
        };

        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), "token creation failed");
                SubmissionOutcome::Failed(err)
            }
        }
    }
}

/// Create a mint (and optionally mint its initial supply) for the connected wallet.
///
/// Errors are attempt failures. A transaction that was broadcast always yields
/// `Ok`, even when confirmation did not arrive in time.
pub async fn create_token(
    request: &TokenCreationRequest,
    options: &CreateTokenOptions,
    config: &ClientConfig,
    wallet: &dyn WalletAdapter,
    rpc: &dyn LedgerRpc,
) -> Result<SubmissionOutcome, TokenError> {
    let payer = wallet.public_key().ok_or(TokenError::WalletNotConnected)?;
    let layout = mint_layout(request, options)?;

    let mint_lamports = rpc
        .minimum_balance_for_rent_exemption(layout.rent_space)
        .await
        .map_err(|e| TokenError::Checkpoint(e.to_string()))?;

    let mint = MintIdentity::generate();
    let mint_key = mint.pubkey();
    debug!(mint = %mint_key, space = layout.space, mint_lamports, "building");

    let batch = build_create_token(request, options, Some(&payer), &mint_key, mint_lamports)?;

    let checkpoint = rpc
        .latest_checkpoint()
        .await
        .map_err(|e| TokenError::Checkpoint(e.to_string()))?;

    let partial = UnsignedTransaction::compile(&batch, &payer, &checkpoint).sign_with_mint(mint)?;

    debug!(mint = %mint_key, "requesting wallet signature");
    let signed = wallet.sign_transaction(partial.transaction().clone()).await?;
    let full = partial.accept_wallet_signature(signed)?;

    let signature = rpc
        .send_transaction(&full)
        .await
        .map_err(|e| TokenError::Broadcast(e.to_string()))?;
    info!(mint = %mint_key, %signature, "transaction sent");

    let token = CreatedToken {
        mint: mint_key,
        derived_account: associated_token_address(&payer, &mint_key, options.token_program),
        signature,
    };

    if !config.await_confirmation {
        return Ok(SubmissionOutcome::Submitted(token));
    }

    match rpc.confirm_transaction(&signature, checkpoint).await {
        Ok(Confirmation::Confirmed) => {
            info!(mint = %mint_key, %signature, "confirmed");
            Ok(SubmissionOutcome::Confirmed(token))
        }
        Ok(Confirmation::TimedOut) => {
            warn!(%signature, "confirmation timed out");
            Ok(SubmissionOutcome::ConfirmationTimedOut(token))
        }
        Ok(Confirmation::Failed(err)) => Err(TokenError::Broadcast(format!(
            "Transaction {} failed: {}",
            signature, err
        ))),
        Err(err) => {
            warn!(%signature, error = %err, "confirmation polling failed");
            Ok(SubmissionOutcome::ConfirmationTimedOut(token))
        }
    }
}
