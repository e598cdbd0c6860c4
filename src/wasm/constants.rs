//! Program ID constants and small helpers exported via WASM.
//!
//! These allow JavaScript code to reference well-known Solana program IDs and
//! derive addresses without needing to import @solana/web3.js.

use wasm_bindgen::prelude::*;

use crate::amount::{parse_decimals, scale_amount};
use crate::builder::{associated_token_address, mint_layout, TokenProgram};
use crate::config::CreateTokenOptions;
use crate::error::TokenError;
use crate::form::TokenForm;
use crate::pubkey::{Pubkey, PubkeyExt};

const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";

/// System Program ID
#[wasm_bindgen]
pub fn system_program_id() -> String {
    SYSTEM_PROGRAM_ID.to_string()
}

/// Token Program ID (SPL Token)
#[wasm_bindgen]
pub fn token_program_id() -> String {
    TokenProgram::Token.id().to_string()
}

/// Token 2022 Program ID
#[wasm_bindgen]
pub fn token_2022_program_id() -> String {
    TokenProgram::Token2022.id().to_string()
}

/// Associated Token Account Program ID
#[wasm_bindgen]
pub fn ata_program_id() -> String {
    Pubkey::from_program(&spl_associated_token_account::id()).to_string()
}

/// Derive the Associated Token Account address for a given wallet and mint.
///
/// The ATA is a PDA derived from seeds: [wallet_address, token_program_id, mint_address]
///
/// @param wallet_address - Owner wallet address (base58)
/// @param mint_address - Token mint address (base58)
/// @param token_program_id - Token program ID (base58), TOKEN_PROGRAM_ID or
///   TOKEN_2022_PROGRAM_ID
/// @returns The derived ATA address (base58)
#[wasm_bindgen]
pub fn get_associated_token_address(
    wallet_address: &str,
    mint_address: &str,
    token_program_id: &str,
) -> Result<String, TokenError> {
    let wallet = Pubkey::from_base58(wallet_address)?;
    let mint = Pubkey::from_base58(mint_address)?;
    let program = token_program_from_id(token_program_id)?;
    Ok(associated_token_address(&wallet, &mint, program).to_string())
}

/// Bytes to allocate for a new mint account.
///
/// With `with_metadata` the account is sized for the MetadataPointer extension;
/// the metadata record itself is added by reallocation.
#[wasm_bindgen]
pub fn mint_account_space(token_program_id: &str, with_metadata: bool) -> Result<u32, TokenError> {
    let options = CreateTokenOptions {
        token_program: token_program_from_id(token_program_id)?,
        with_metadata,
    };
    let request = TokenForm::default().to_request()?;
    let layout = mint_layout(&request, &options)?;
    Ok(layout.space as u32)
}

/// Scale a human amount (e.g. "12.5") to base units for `decimals`.
///
/// @returns Base units as a bigint
#[wasm_bindgen]
pub fn to_base_units(amount: &str, decimals: &str) -> Result<u64, TokenError> {
    scale_amount(amount, parse_decimals(decimals)?)
}

fn token_program_from_id(id: &str) -> Result<TokenProgram, TokenError> {
    let key = Pubkey::from_base58(id)?;
    [TokenProgram::Token, TokenProgram::Token2022]
        .into_iter()
        .find(|program| program.id() == key)
        .ok_or_else(|| TokenError::InvalidAddress(format!("not a token program: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_ids() {
        assert_eq!(token_program_id(), "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
        assert_eq!(token_2022_program_id(), "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");
        assert_eq!(ata_program_id(), "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
        assert_eq!(system_program_id(), "11111111111111111111111111111111");
    }

    #[test]
    fn test_token_program_from_id() {
        assert_eq!(
            token_program_from_id(&token_2022_program_id()).unwrap(),
            TokenProgram::Token2022
        );
        assert!(token_program_from_id("11111111111111111111111111111111").is_err());
    }

    #[test]
    fn test_get_associated_token_address() {
        let wallet = "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB";
        let mint = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
        let ata = get_associated_token_address(wallet, mint, &token_program_id()).unwrap();
        let expected = associated_token_address(
            &Pubkey::from_base58(wallet).unwrap(),
            &Pubkey::from_base58(mint).unwrap(),
            TokenProgram::Token,
        );
        assert_eq!(ata, expected.to_string());
        assert!(get_associated_token_address("bad", mint, &token_program_id()).is_err());
    }

    #[test]
    fn test_mint_account_space() {
        assert_eq!(mint_account_space(&token_program_id(), false).unwrap(), 82);
        assert!(mint_account_space(&token_2022_program_id(), true).unwrap() > 82);
        assert!(mint_account_space(&token_program_id(), true).is_err());
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units("10", "2").unwrap(), 1000);
        assert!(to_base_units("10", "-1").is_err());
    }
}
