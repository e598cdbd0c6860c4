//! Projection of attempt outcomes onto what the page shows.

use crate::config::Cluster;
use crate::coordinator::SubmissionOutcome;
use crate::error::ErrorKind;

pub const SUCCESS_HEADLINE: &str = "Success!";
pub const SUBMITTED_HEADLINE: &str = "Submitted";

/// Shown next to the submission id when confirmation was not observed.
pub const CONFIRMATION_NOTICE: &str =
    "Transaction was sent but not confirmed in time. Check the explorer for its status.";

/// Submit button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    DisabledNoWallet,
    Ready,
    InProgress,
}

impl ButtonState {
    pub fn new(wallet_connected: bool, in_progress: bool) -> Self {
        if in_progress {
            ButtonState::InProgress
        } else if wallet_connected {
            ButtonState::Ready
        } else {
            ButtonState::DisabledNoWallet
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ButtonState::DisabledNoWallet => "Connect Wallet",
            ButtonState::Ready => "Create Token",
            ButtonState::InProgress => "Creating...",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ButtonState::Ready)
    }
}

/// Immutable record of one attempt as rendered by the page.
///
/// Either `mint_address` and `submission_id` are both set, or `error` is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionResult {
    pub mint_address: Option<String>,
    pub derived_account_address: Option<String>,
    pub submission_id: Option<String>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
    /// Explorer link for the transaction.
    pub explorer_url: Option<String>,
    /// Explorer link for the mint account.
    pub mint_explorer_url: Option<String>,
    pub confirmed: bool,
    pub notice: Option<String>,
}

impl SubmissionResult {
    pub fn from_outcome(outcome: &SubmissionOutcome, cluster: &Cluster) -> Self {
        let Some(token) = outcome.created() else {
            return match outcome.error() {
                Some(err) => SubmissionResult {
                    error: Some(err.to_string()),
                    error_kind: Some(err.kind()),
                    ..Default::default()
                },
                None => SubmissionResult::default(),
            };
        };

        let mint = token.mint.to_string();
        let signature = token.signature.to_string();
        SubmissionResult {
            mint_explorer_url: Some(cluster.explorer_address_url(&mint)),
            explorer_url: Some(cluster.explorer_tx_url(&signature)),
            mint_address: Some(mint),
            derived_account_address: Some(token.derived_account.to_string()),
            submission_id: Some(signature),
            confirmed: matches!(outcome, SubmissionOutcome::Confirmed(_)),
            notice: matches!(outcome, SubmissionOutcome::ConfirmationTimedOut(_))
                .then(|| CONFIRMATION_NOTICE.to_string()),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.submission_id.is_some()
    }

    /// Headline text: "Success!" once confirmed, "Submitted" when sent, else the error.
    pub fn headline(&self) -> String {
        match (&self.error, self.confirmed) {
            (Some(err), _) => err.clone(),
            (None, true) => SUCCESS_HEADLINE.to_string(),
            (None, false) => SUBMITTED_HEADLINE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::CreatedToken;
    use crate::error::TokenError;
    use crate::pubkey::Pubkey;
    use solana_signature::Signature;

    fn token() -> CreatedToken {
        CreatedToken {
            mint: Pubkey::new_from_array([1u8; 32]),
            derived_account: Pubkey::new_from_array([2u8; 32]),
            signature: Signature::from([7u8; 64]),
        }
    }

    #[test]
    fn test_button_states() {
        assert_eq!(ButtonState::new(false, false).label(), "Connect Wallet");
        assert_eq!(ButtonState::new(true, false).label(), "Create Token");
        assert_eq!(ButtonState::new(true, true).label(), "Creating...");
        assert!(ButtonState::new(true, false).is_enabled());
        assert!(!ButtonState::new(true, true).is_enabled());
        assert!(!ButtonState::new(false, false).is_enabled());
    }

    #[test]
    fn test_confirmed_result() {
        let token = token();
        let result = SubmissionResult::from_outcome(
            &SubmissionOutcome::Confirmed(token.clone()),
            &Cluster::Devnet,
        );
        assert!(result.is_success());
        assert!(result.confirmed);
        assert_eq!(result.headline(), "Success!");
        assert_eq!(result.mint_address, Some(token.mint.to_string()));
        assert_eq!(
            result.explorer_url,
            Some(format!(
                "https://explorer.solana.com/tx/{}?cluster=devnet",
                token.signature
            ))
        );
        assert!(result.notice.is_none());
    }

    #[test]
    fn test_timed_out_result_has_notice() {
        let result = SubmissionResult::from_outcome(
            &SubmissionOutcome::ConfirmationTimedOut(token()),
            &Cluster::Devnet,
        );
        assert!(result.is_success());
        assert!(!result.confirmed);
        assert_eq!(result.headline(), "Submitted");
        assert_eq!(result.notice.as_deref(), Some(CONFIRMATION_NOTICE));
    }

    #[test]
    fn test_failed_result() {
        let result = SubmissionResult::from_outcome(
            &SubmissionOutcome::Failed(TokenError::WalletNotConnected),
            &Cluster::Devnet,
        );
        assert!(!result.is_success());
        assert!(result.mint_address.is_none());
        assert!(result.submission_id.is_none());
        assert_eq!(result.headline(), "Connect a wallet first.");
        assert_eq!(result.error_kind, Some(ErrorKind::Precondition));
    }
}
