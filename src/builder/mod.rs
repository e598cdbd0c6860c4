//! Transaction building module.
//!
//! Turns a validated [`TokenCreationRequest`](crate::form::TokenCreationRequest)
//! and a mint address into an ordered, unsigned batch of instructions. Nothing
//! here touches the network or signs.

mod build;
mod layout;
mod types;

pub use build::{associated_token_address, build_create_token};
pub use layout::{mint_layout, MintLayout};
pub use types::{Operation, OperationBatch, OperationKind, TokenProgram};
