//! Solana JSON-RPC 2.0 over HTTP.

use std::cell::Cell;
use std::future::Future;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solana_sdk::hash::Hash;
use solana_signature::Signature;
use tracing::{debug, warn};

use super::{Checkpoint, Confirmation, LedgerRpc};
use crate::config::{ClientConfig, Commitment};
use crate::error::RpcError;
use crate::signing::FullySignedTransaction;

// ---------------------------------------------------------------------------
// Wire types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// `{ context, value }` envelope used by most Solana methods.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
    last_valid_block_height: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
    #[serde(default)]
    err: Option<Value>,
    #[serde(default)]
    confirmation_status: Option<String>,
}

fn parse_response<T: DeserializeOwned>(body: Value) -> Result<T, RpcError> {
    let response: JsonRpcResponse<T> = serde_json::from_value(body)
        .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;
    if let Some(error) = response.error {
        return Err(RpcError::Remote {
            code: error.code,
            message: error.message,
        });
    }
    response
        .result
        .ok_or_else(|| RpcError::InvalidResponse("missing result".to_string()))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`LedgerRpc`] backed by a public (or custom) Solana RPC endpoint.
pub struct HttpRpcClient {
    url: String,
    commitment: Commitment,
    poll_interval_ms: u32,
    max_polls: u32,
    client: reqwest::Client,
    next_id: Cell<u64>,
}

impl HttpRpcClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            url: config.rpc_url().to_string(),
            commitment: config.commitment,
            poll_interval_ms: config.poll_interval_ms,
            max_polls: config.max_polls,
            client: reqwest::Client::new(),
            next_id: Cell::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        debug!(method, id, "rpc request");

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;

        parse_response(body).inspect_err(|e| warn!(method, error = %e, "rpc error"))
    }

    fn commitment_config(&self) -> Value {
        json!({ "commitment": self.commitment.as_str() })
    }

    async fn block_height(&self) -> Result<u64, RpcError> {
        self.call("getBlockHeight", json!([self.commitment_config()]))
            .await
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, RpcError> {
        let statuses: WithContext<Vec<Option<SignatureStatus>>> = self
            .call("getSignatureStatuses", json!([[signature.to_string()]]))
            .await?;
        Ok(statuses.value.into_iter().next().flatten())
    }
}

#[async_trait(?Send)]
impl LedgerRpc for HttpRpcClient {
    async fn latest_checkpoint(&self) -> Result<Checkpoint, RpcError> {
        let latest: WithContext<LatestBlockhash> = self
            .call("getLatestBlockhash", json!([self.commitment_config()]))
            .await?;
        let blockhash: Hash = latest.value.blockhash.parse().map_err(|_| {
            RpcError::InvalidResponse(format!("Invalid blockhash: {}", latest.value.blockhash))
        })?;
        Ok(Checkpoint {
            blockhash,
            last_valid_block_height: latest.value.last_valid_block_height,
        })
    }

    async fn minimum_balance_for_rent_exemption(&self, space: usize) -> Result<u64, RpcError> {
        self.call("getMinimumBalanceForRentExemption", json!([space]))
            .await
    }

    async fn send_transaction(&self, tx: &FullySignedTransaction) -> Result<Signature, RpcError> {
        let encoded = tx
            .to_base64()
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;
        let signature: String = self
            .call(
                "sendTransaction",
                json!([
                    encoded,
                    {
                        "encoding": "base64",
                        "preflightCommitment": self.commitment.as_str(),
                    }
                ]),
            )
            .await?;
        signature
            .parse()
            .map_err(|_| RpcError::InvalidResponse(format!("Invalid signature: {}", signature)))
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        checkpoint: Checkpoint,
    ) -> Result<Confirmation, RpcError> {
        wait_for_confirmation(
            &checkpoint,
            self.commitment,
            self.max_polls,
            self.poll_interval_ms,
            move || async move {
                let status = self.signature_status(signature).await?;
                let height = self.block_height().await?;
                Ok((status, height))
            },
        )
        .await
        .inspect(|confirmation| debug!(%signature, ?confirmation, "confirmation finished"))
    }
}

/// Decide one poll: `None` keeps waiting.
fn poll_step(
    status: Option<&SignatureStatus>,
    block_height: u64,
    checkpoint: &Checkpoint,
    commitment: Commitment,
) -> Option<Confirmation> {
    if let Some(status) = status {
        if let Some(err) = status.err.as_ref().filter(|e| !e.is_null()) {
            return Some(Confirmation::Failed(err.to_string()));
        }
        if status
            .confirmation_status
            .as_deref()
            .is_some_and(|s| commitment.is_reached_by(s))
        {
            return Some(Confirmation::Confirmed);
        }
    }
    if block_height > checkpoint.last_valid_block_height {
        return Some(Confirmation::TimedOut);
    }
    None
}

/// Poll `fetch` for `(status, block height)` until [`poll_step`] decides or
/// `max_polls` runs out.
async fn wait_for_confirmation<F, Fut>(
    checkpoint: &Checkpoint,
    commitment: Commitment,
    max_polls: u32,
    poll_interval_ms: u32,
    mut fetch: F,
) -> Result<Confirmation, RpcError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(Option<SignatureStatus>, u64), RpcError>>,
{
    for _ in 0..max_polls {
        let (status, height) = fetch().await?;
        if let Some(confirmation) = poll_step(status.as_ref(), height, checkpoint, commitment) {
            return Ok(confirmation);
        }
        sleep_ms(poll_interval_ms).await;
    }
    Ok(Confirmation::TimedOut)
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u32) {
    use wasm_bindgen::{JsCast, JsValue};

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let global = js_sys::global();
        let set_timeout = js_sys::Reflect::get(&global, &JsValue::from_str("setTimeout"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        match set_timeout {
            Some(set_timeout) => {
                let _ = set_timeout.call2(&global, &resolve, &JsValue::from(ms));
            }
            None => {
                let _ = resolve.call0(&JsValue::UNDEFINED);
            }
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
