//! wasm-sol-token: create SPL token mints from a browser page.
//!
//! A page collects token parameters, and this crate builds the creation
//! transaction, signs it with a freshly generated mint key, asks the connected
//! wallet for the payer signature, broadcasts it and optionally waits for
//! confirmation.
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//!
//! 1. **Core types** (`form`, `builder`, `signing`, `coordinator`, ...) - plain Rust
//!    over the Solana SDK and SPL crates, with the wallet and RPC behind traits
//! 2. **WASM bindings** (`wasm/`) - the page controller and helpers for JavaScript
//!
//! # Usage from Rust
//!
//! ```rust,no_run
//! use wasm_sol_token::{ClientConfig, HttpRpcClient, TokenCreator, TokenForm, WalletAdapter};
//!
//! async fn create(wallet: &dyn WalletAdapter) {
//!     let config = ClientConfig::default();
//!     let rpc = HttpRpcClient::new(&config);
//!     let creator = TokenCreator::new(config, Default::default());
//!     let outcome = creator.submit(&TokenForm::default(), wallet, &rpc).await;
//!     println!("{:?}", outcome);
//! }
//! ```

mod amount;
pub mod builder;
pub mod config;
pub mod coordinator;
mod error;
pub mod form;
pub mod keypair;
pub mod presenter;
pub mod pubkey;
pub mod rpc;
pub mod signing;
#[cfg(test)]
mod testing;
pub mod transaction;
pub mod wallet;
pub mod wasm;

// Re-export core types at crate root
pub use amount::{parse_decimals, scale_amount};
pub use builder::{build_create_token, OperationBatch, OperationKind, TokenProgram};
pub use config::{ClientConfig, Cluster, Commitment, CreateTokenOptions};
pub use coordinator::{create_token, CreatedToken, SubmissionOutcome, SubmitGate, TokenCreator};
pub use error::{ErrorKind, RpcError, TokenError, WalletError, CONNECT_WALLET_MESSAGE};
pub use form::{FormField, FormState, TokenCreationRequest, TokenForm};
pub use keypair::MintIdentity;
pub use presenter::{ButtonState, SubmissionResult};
pub use pubkey::{Pubkey, PubkeyExt};
pub use rpc::{Checkpoint, Confirmation, HttpRpcClient, LedgerRpc};
pub use signing::{FullySignedTransaction, PartiallySignedTransaction, UnsignedTransaction};
pub use transaction::{Transaction, TransactionExt};
pub use wallet::WalletAdapter;

// Re-export WASM types
pub use wasm::{JsWalletAdapter, WasmCreateTokenPage};
