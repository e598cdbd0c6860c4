//! Token creation batch building.
//!
//! SPL instruction builders produce `solana_program` 2.x instructions; they are
//! converted field by field into SDK 3.x instructions for message compilation.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_system_interface::instruction as system_ix;
use spl_token_2022::extension::metadata_pointer;
use spl_token_2022::solana_program::instruction::Instruction as ProgramInstruction;

use crate::config::CreateTokenOptions;
use crate::error::TokenError;
use crate::form::TokenCreationRequest;
use crate::pubkey::{Pubkey, PubkeyExt};

use super::layout::mint_layout;
use super::types::{OperationBatch, OperationKind, TokenProgram};

/// Derive the associated token account of `owner` for `mint`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, program: TokenProgram) -> Pubkey {
    let ata = spl_associated_token_account::get_associated_token_address_with_program_id(
        &owner.to_program(),
        &mint.to_program(),
        &program.program_id(),
    );
    Pubkey::from_program(&ata)
}

/// Build the ordered batch that creates a mint.
///
/// Order: CreateAccount, [InitializeMetadataPointer], InitializeMint,
/// [InitializeMetadata], then CreateAssociatedAccount + MintTo when the
/// request carries a non-zero initial supply.
///
/// # Arguments
/// * `payer` - Connected wallet; pays rent and fees and becomes mint authority
/// * `mint` - Address of the freshly generated mint identity
/// * `mint_lamports` - Rent-exempt balance for [`mint_layout`]'s `rent_space`
pub fn build_create_token(
    request: &TokenCreationRequest,
    options: &CreateTokenOptions,
    payer: Option<&Pubkey>,
    mint: &Pubkey,
    mint_lamports: u64,
) -> Result<OperationBatch, TokenError> {
    let payer = payer.ok_or(TokenError::WalletNotConnected)?;
    let layout = mint_layout(request, options)?;
    let program = options.token_program;
    let program_id = program.program_id();

    let payer_key = payer.to_program();
    let mint_key = mint.to_program();

    let mut batch = OperationBatch::default();

    batch.push(
        OperationKind::CreateAccount,
        system_ix::create_account(
            payer,
            mint,
            mint_lamports,
            layout.space as u64,
            &program.id(),
        ),
    );

    if options.with_metadata {
        let ix = metadata_pointer::instruction::initialize(
            &program_id,
            &mint_key,
            Some(payer_key),
            Some(mint_key),
        )
        .map_err(|e| TokenError::Build(format!("Invalid metadataPointer: {}", e)))?;
        batch.push(OperationKind::InitializeMetadataPointer, into_sdk(ix));
    }

    let ix = spl_token_2022::instruction::initialize_mint2(
        &program_id,
        &mint_key,
        &payer_key,
        None,
        request.decimals,
    )
    .map_err(|e| TokenError::Build(format!("Invalid initializeMint: {}", e)))?;
    batch.push(OperationKind::InitializeMint, into_sdk(ix));

    if options.with_metadata {
        let ix = spl_token_metadata_interface::instruction::initialize(
            &program_id,
            &mint_key,
            &payer_key,
            &mint_key,
            &payer_key,
            request.name.clone(),
            request.symbol.clone(),
            request.uri.clone(),
        );
        batch.push(OperationKind::InitializeMetadata, into_sdk(ix));
    }

    if request.initial_supply > 0 {
        let ata = associated_token_address(payer, mint, program);
        let ix = spl_associated_token_account::instruction::create_associated_token_account(
            &payer_key,
            &payer_key,
            &mint_key,
            &program_id,
        );
        batch.push(OperationKind::CreateAssociatedAccount, into_sdk(ix));

        let ix = spl_token_2022::instruction::mint_to(
            &program_id,
            &mint_key,
            &ata.to_program(),
            &payer_key,
            &[],
            request.initial_supply,
        )
        .map_err(|e| TokenError::Build(format!("Invalid mintTo: {}", e)))?;
        batch.push(OperationKind::MintTo, into_sdk(ix));
    }

    Ok(batch)
}

fn into_sdk(ix: ProgramInstruction) -> Instruction {
    let accounts = ix
        .accounts
        .iter()
        .map(|meta| AccountMeta {
            pubkey: Pubkey::from_program(&meta.pubkey),
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
        })
        .collect();
    Instruction {
        program_id: Pubkey::from_program(&ix.program_id),
        accounts,
        data: ix.data,
    }
}
