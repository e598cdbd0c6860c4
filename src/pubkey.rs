//! Solana public key (address) helpers.
//!
//! Transactions are assembled with the Solana 3.x SDK types, while the SPL
//! program crates still speak the 2.x `solana_program` types. Both are plain
//! 32-byte keys, so conversion is a byte copy.

use crate::error::TokenError;
use std::str::FromStr;

/// Re-export the SDK Pubkey used for transaction building.
pub use solana_sdk::pubkey::Pubkey;

/// Pubkey type used by the SPL program crates.
pub type ProgramPubkey = spl_token_2022::solana_program::pubkey::Pubkey;

/// Extension trait for Pubkey to add page-friendly error handling.
pub trait PubkeyExt {
    fn from_base58(address: &str) -> Result<Pubkey, TokenError>;
    fn to_program(&self) -> ProgramPubkey;
    fn from_program(key: &ProgramPubkey) -> Pubkey;
}

impl PubkeyExt for Pubkey {
    /// Create a Pubkey from a base58 string.
    fn from_base58(address: &str) -> Result<Pubkey, TokenError> {
        Pubkey::from_str(address.trim())
            .map_err(|e| TokenError::InvalidAddress(format!("{}: {}", address, e)))
    }

    fn to_program(&self) -> ProgramPubkey {
        ProgramPubkey::new_from_array(self.to_bytes())
    }

    fn from_program(key: &ProgramPubkey) -> Pubkey {
        Pubkey::new_from_array(key.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base58() {
        let address = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
        let pubkey = Pubkey::from_base58(address).unwrap();
        assert_eq!(pubkey.to_string(), address);
    }

    #[test]
    fn test_from_base58_trims_input() {
        let pubkey = Pubkey::from_base58("  11111111111111111111111111111111 ").unwrap();
        assert_eq!(pubkey.to_bytes(), [0u8; 32]);
    }

    #[test]
    fn test_invalid_base58() {
        let err = Pubkey::from_base58("invalid!@#$").unwrap_err();
        assert!(matches!(err, TokenError::InvalidAddress(_)));
    }

    #[test]
    fn test_program_conversion_keeps_bytes() {
        let pubkey = Pubkey::from_base58("DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB").unwrap();
        let program = pubkey.to_program();
        assert_eq!(program.to_string(), pubkey.to_string());
        assert_eq!(Pubkey::from_program(&program), pubkey);
    }
}
