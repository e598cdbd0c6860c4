//! Client configuration: which cluster to talk to and how to wait for confirmation.
//!
//! These types are deserialized from JavaScript via serde (camelCase), the same
//! way build parameters are passed in from the TypeScript layer.

use serde::{Deserialize, Serialize};

use crate::builder::TokenProgram;

const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";
const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

const DEFAULT_POLL_INTERVAL_MS: u32 = 500;
const DEFAULT_MAX_POLLS: u32 = 60;

fn query_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Solana cluster the page submits to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
    /// Any other JSON-RPC endpoint (local validator, private RPC).
    Custom { url: String },
}

impl Cluster {
    pub fn rpc_url(&self) -> &str {
        match self {
            Cluster::Devnet => DEVNET_RPC_URL,
            Cluster::Testnet => TESTNET_RPC_URL,
            Cluster::MainnetBeta => MAINNET_RPC_URL,
            Cluster::Custom { url } => url,
        }
    }

    /// Value for the explorer's `cluster` query parameter (`None` for mainnet).
    fn explorer_param(&self) -> Option<String> {
        match self {
            Cluster::Devnet => Some("devnet".to_string()),
            Cluster::Testnet => Some("testnet".to_string()),
            Cluster::MainnetBeta => None,
            Cluster::Custom { url } => Some(format!("custom&customUrl={}", query_encode(url))),
        }
    }

    /// Explorer link for a transaction signature.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        self.explorer_url("tx", signature)
    }

    /// Explorer link for an account address.
    pub fn explorer_address_url(&self, address: &str) -> String {
        self.explorer_url("address", address)
    }

    fn explorer_url(&self, path: &str, id: &str) -> String {
        match self.explorer_param() {
            Some(cluster) => format!("{}/{}/{}?cluster={}", EXPLORER_BASE_URL, path, id, cluster),
            None => format!("{}/{}/{}", EXPLORER_BASE_URL, path, id),
        }
    }
}

/// Commitment level used for RPC reads and confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }

    /// Whether a `confirmationStatus` reported by the node satisfies this commitment.
    pub fn is_reached_by(&self, status: &str) -> bool {
        let rank = |s: &str| match s {
            "processed" => 0,
            "confirmed" => 1,
            "finalized" => 2,
            _ => -1,
        };
        rank(status) >= rank(self.as_str())
    }
}

/// Connection settings for a page.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub cluster: Cluster,
    /// Overrides the cluster's public RPC URL (the explorer still uses `cluster`).
    pub rpc_url: Option<String>,
    pub commitment: Commitment,
    /// Wait for the transaction to reach `commitment` after sending.
    pub await_confirmation: bool,
    pub poll_interval_ms: u32,
    /// Upper bound on status polls, independent of the blockhash validity window.
    pub max_polls: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            cluster: Cluster::Devnet,
            rpc_url: None,
            commitment: Commitment::Confirmed,
            await_confirmation: true,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

impl ClientConfig {
    pub fn rpc_url(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or_else(|| self.cluster.rpc_url())
    }
}

/// What kind of mint a page creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTokenOptions {
    pub token_program: TokenProgram,
    /// Add the MetadataPointer extension and an on-chain name/symbol/uri record.
    pub with_metadata: bool,
}

impl Default for CreateTokenOptions {
    fn default() -> Self {
        CreateTokenOptions {
            token_program: TokenProgram::Token2022,
            with_metadata: false,
        }
    }
}

impl CreateTokenOptions {
    /// Token-2022 mint carrying its own metadata.
    pub fn metadata_mint() -> Self {
        CreateTokenOptions {
            token_program: TokenProgram::Token2022,
            with_metadata: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_devnet_confirmed() {
        let config = ClientConfig::default();
        assert_eq!(config.rpc_url(), "https://api.devnet.solana.com");
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert!(config.await_confirmation);
    }

    #[test]
    fn test_rpc_url_override() {
        let config = ClientConfig {
            rpc_url: Some("http://127.0.0.1:8899".to_string()),
            ..Default::default()
        };
        assert_eq!(config.rpc_url(), "http://127.0.0.1:8899");
        assert_eq!(
            config.cluster.explorer_tx_url("abc"),
            "https://explorer.solana.com/tx/abc?cluster=devnet"
        );
    }

    #[test]
    fn test_explorer_urls() {
        assert_eq!(
            Cluster::MainnetBeta.explorer_address_url("Mint111"),
            "https://explorer.solana.com/address/Mint111"
        );
        assert_eq!(
            Cluster::Testnet.explorer_tx_url("sig"),
            "https://explorer.solana.com/tx/sig?cluster=testnet"
        );
    }

    #[test]
    fn test_custom_explorer_url_is_encoded() {
        let cluster = Cluster::Custom {
            url: "http://localhost:8899/?a=1&b=2".to_string(),
        };
        assert_eq!(
            cluster.explorer_tx_url("sig"),
            "https://explorer.solana.com/tx/sig?cluster=custom\
             &customUrl=http%3A%2F%2Flocalhost%3A8899%2F%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "cluster": { "type": "custom", "url": "http://localhost:8899" },
            "awaitConfirmation": false
        }))
        .unwrap();
        assert_eq!(config.rpc_url(), "http://localhost:8899");
        assert!(!config.await_confirmation);
        assert_eq!(config.max_polls, 60);
    }

    #[test]
    fn test_commitment_ordering() {
        assert!(Commitment::Confirmed.is_reached_by("finalized"));
        assert!(Commitment::Confirmed.is_reached_by("confirmed"));
        assert!(!Commitment::Confirmed.is_reached_by("processed"));
        assert!(!Commitment::Processed.is_reached_by("unknown"));
    }
}
