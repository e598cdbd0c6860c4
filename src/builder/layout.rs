//! Mint account sizing.

use spl_token::solana_program::program_pack::Pack;
use spl_token_2022::extension::ExtensionType;
use spl_token_metadata_interface::state::TokenMetadata;

use crate::config::CreateTokenOptions;
use crate::error::TokenError;
use crate::form::TokenCreationRequest;

use super::types::TokenProgram;

/// Space to allocate for the mint and how much space its rent must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintLayout {
    /// Bytes allocated by the CreateAccount instruction.
    pub space: usize,
    /// Bytes the rent-exempt balance is computed for. Larger than `space` when
    /// the metadata initialize instruction reallocates the account.
    pub rent_space: usize,
}

/// Compute the mint layout, rejecting metadata on programs that cannot hold it.
pub fn mint_layout(
    request: &TokenCreationRequest,
    options: &CreateTokenOptions,
) -> Result<MintLayout, TokenError> {
    if !options.with_metadata {
        let space = match options.token_program {
            TokenProgram::Token => spl_token::state::Mint::LEN,
            TokenProgram::Token2022 => {
                ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(&[])
                    .map_err(|e| TokenError::Build(format!("Mint size: {}", e)))?
            }
        };
        return Ok(MintLayout {
            space,
            rent_space: space,
        });
    }

    if !options.token_program.supports_metadata() {
        return Err(TokenError::InvalidMetadata(
            "on-chain metadata requires the Token-2022 program".to_string(),
        ));
    }
    if request.name.is_empty() {
        return Err(TokenError::InvalidMetadata("name is empty".to_string()));
    }
    if request.symbol.is_empty() {
        return Err(TokenError::InvalidMetadata("symbol is empty".to_string()));
    }

    let space = ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(&[
        ExtensionType::MetadataPointer,
    ])
    .map_err(|e| TokenError::Build(format!("Mint size: {}", e)))?;

    // Authority and mint keys are fixed-size, so defaults size the record correctly.
    let metadata = TokenMetadata {
        name: request.name.clone(),
        symbol: request.symbol.clone(),
        uri: request.uri.clone(),
        ..Default::default()
    };
    let metadata_len = metadata
        .tlv_size_of()
        .map_err(|e| TokenError::Build(format!("Metadata size: {}", e)))?;

    Ok(MintLayout {
        space,
        rent_space: space + metadata_len,
    })
}
