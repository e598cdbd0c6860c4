//! Types for token creation batches.

use serde::{Deserialize, Serialize};
use solana_sdk::instruction::Instruction;

use crate::pubkey::{ProgramPubkey, Pubkey, PubkeyExt};

/// Which SPL token program owns the new mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenProgram {
    /// Original SPL Token program (no extensions).
    Token,
    /// Token-2022 (Token Extensions) program.
    #[default]
    Token2022,
}

impl TokenProgram {
    pub(crate) fn program_id(&self) -> ProgramPubkey {
        match self {
            TokenProgram::Token => spl_token::id(),
            TokenProgram::Token2022 => spl_token_2022::id(),
        }
    }

    pub fn id(&self) -> Pubkey {
        Pubkey::from_program(&self.program_id())
    }

    pub fn supports_metadata(&self) -> bool {
        matches!(self, TokenProgram::Token2022)
    }
}

/// What an instruction in the batch does. The order of kinds in a batch is
/// the data dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    CreateAccount,
    InitializeMetadataPointer,
    InitializeMint,
    InitializeMetadata,
    CreateAssociatedAccount,
    MintTo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub instruction: Instruction,
}

/// Ordered, unsigned operations for one creation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationBatch {
    operations: Vec<Operation>,
}

impl OperationBatch {
    pub(crate) fn push(&mut self, kind: OperationKind, instruction: Instruction) {
        self.operations.push(Operation { kind, instruction });
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn kinds(&self) -> Vec<OperationKind> {
        self.operations.iter().map(|op| op.kind).collect()
    }

    pub fn instructions(&self) -> Vec<Instruction> {
        self.operations
            .iter()
            .map(|op| op.instruction.clone())
            .collect()
    }

    pub fn contains(&self, kind: OperationKind) -> bool {
        self.operations.iter().any(|op| op.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
