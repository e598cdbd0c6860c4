//! Error taxonomy for token creation attempts.
//!
//! Every failure ends the current attempt and hands control back to the user;
//! nothing is retried automatically. [`ErrorKind`] groups the variants the way
//! the page reports them.

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Message shown when submit is pressed without a connected wallet.
pub const CONNECT_WALLET_MESSAGE: &str = "Connect a wallet first.";

/// Broad classification of a [`TokenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reported before any network call or key generation.
    Precondition,
    /// The recent blockhash (or rent query) could not be fetched.
    Checkpoint,
    /// The wallet declined or failed to sign.
    Rejected,
    /// The ledger rejected the transaction, or the wallet returned something unsendable.
    Broadcast,
    /// The transaction was sent but not observed as confirmed in time.
    ConfirmationTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("{}", CONNECT_WALLET_MESSAGE)]
    WalletNotConnected,

    #[error("Invalid decimals: {0}")]
    InvalidDecimals(String),

    #[error("Invalid initial supply: {0}")]
    InvalidSupply(String),

    #[error("Initial supply {supply} does not fit in base units with {decimals} decimals")]
    SupplyOverflow { supply: String, decimals: u8 },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("A token creation is already in progress")]
    SubmissionInProgress,

    #[error("Failed to build transaction: {0}")]
    Build(String),

    #[error("Failed to fetch network state: {0}")]
    Checkpoint(String),

    #[error("Transaction was not signed by the wallet: {0}")]
    WalletRejected(String),

    #[error("Wallet returned an unusable transaction: {0}")]
    SignatureMismatch(String),

    #[error("{0}")]
    Broadcast(String),

    #[error("Transaction {signature} was not confirmed before its blockhash expired")]
    ConfirmationTimedOut { signature: String },
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Precondition => "precondition",
            ErrorKind::Checkpoint => "checkpoint",
            ErrorKind::Rejected => "rejected",
            ErrorKind::Broadcast => "broadcast",
            ErrorKind::ConfirmationTimeout => "confirmationTimeout",
        }
    }
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::WalletNotConnected
            | TokenError::InvalidDecimals(_)
            | TokenError::InvalidSupply(_)
            | TokenError::SupplyOverflow { .. }
            | TokenError::InvalidMetadata(_)
            | TokenError::InvalidAddress(_)
            | TokenError::SubmissionInProgress
            | TokenError::Build(_) => ErrorKind::Precondition,
            TokenError::Checkpoint(_) => ErrorKind::Checkpoint,
            TokenError::WalletRejected(_) => ErrorKind::Rejected,
            TokenError::SignatureMismatch(_) | TokenError::Broadcast(_) => ErrorKind::Broadcast,
            TokenError::ConfirmationTimedOut { .. } => ErrorKind::ConfirmationTimeout,
        }
    }
}

/// Failure reported by a [`crate::wallet::WalletAdapter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The user declined the request in the wallet UI.
    #[error("request declined: {0}")]
    Declined(String),
    /// The wallet could not complete the request.
    #[error("{0}")]
    Failed(String),
    /// The wallet answered with something that is not a transaction.
    #[error("{0}")]
    Malformed(String),
}

/// Failure talking to the ledger RPC.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Request never produced a response (DNS, CORS, offline, ...).
    #[error("RPC transport error: {0}")]
    Transport(String),
    /// JSON-RPC error object returned by the node; message kept verbatim.
    #[error("{message}")]
    Remote { code: i64, message: String },
    /// Response did not have the expected shape.
    #[error("Unexpected RPC response: {0}")]
    InvalidResponse(String),
}

impl From<WalletError> for TokenError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Malformed(msg) => TokenError::SignatureMismatch(msg),
            other => TokenError::WalletRejected(other.to_string()),
        }
    }
}

// Required for wasm_bindgen to convert errors to JavaScript exceptions
// Uses js_sys::Error to create a proper JavaScript Error with stack trace
impl From<TokenError> for JsValue {
    fn from(err: TokenError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
