//! The mint identity: a one-shot Ed25519 keypair for a new mint account.
//!
//! Wraps `solana_keypair::Keypair`. The secret never leaves this module: there
//! is no accessor for it, `Debug` prints only the address, and signing consumes
//! the identity so it cannot be used twice.

use crate::pubkey::Pubkey;
use solana_signer::Signer;

use solana_keypair::Keypair;

/// Freshly generated key for the mint account being created.
pub struct MintIdentity {
    keypair: Keypair,
}

impl MintIdentity {
    /// Generate a new random mint identity.
    pub fn generate() -> MintIdentity {
        MintIdentity {
            keypair: Keypair::new(),
        }
    }

    /// Deterministic identity from a 32-byte seed.
    #[cfg(test)]
    pub(crate) fn from_seed(seed: [u8; 32]) -> MintIdentity {
        MintIdentity {
            keypair: Keypair::new_from_array(seed),
        }
    }

    /// The mint's address.
    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.keypair.pubkey().to_bytes())
    }

    /// Get the Solana address (base58-encoded public key).
    pub fn address(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    /// Sign `message` and drop the key material.
    pub(crate) fn sign_once(self, message: &[u8]) -> [u8; 64] {
        let signature = self.keypair.sign_message(message);
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(signature.as_ref());
        bytes
    }
}

impl std::fmt::Debug for MintIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintIdentity")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_distinct_identities() {
        let a = MintIdentity::generate();
        let b = MintIdentity::generate();
        assert_ne!(a.pubkey(), b.pubkey());
    }

    #[test]
    fn test_address_matches_pubkey() {
        let identity = MintIdentity::generate();
        assert_eq!(identity.address(), identity.pubkey().to_string());
    }

    /// Test vector from BitGoJS sdk-coin-sol
    #[test]
    fn test_known_seed_address() {
        let seed: [u8; 32] = [
            210, 49, 239, 175, 249, 91, 42, 66, 77, 70, 3, 144, 23, 0, 145, 152, 86, 35, 166, 11,
            129, 49, 201, 162, 255, 195, 94, 229, 98, 78, 76, 38,
        ];
        let identity = MintIdentity::from_seed(seed);
        assert_eq!(
            identity.address(),
            "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH"
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = MintIdentity::from_seed([7u8; 32]);
        let printed = format!("{:?}", identity);
        assert!(printed.contains(&identity.address()));
        assert!(!printed.contains("keypair"));
    }

    #[test]
    fn test_sign_once_produces_verifiable_signature() {
        let identity = MintIdentity::from_seed([9u8; 32]);
        let pubkey = identity.pubkey();
        let signature = identity.sign_once(b"hello");
        let signature = solana_signature::Signature::from(signature);
        assert!(signature.verify(pubkey.as_ref(), b"hello"));
    }
}
