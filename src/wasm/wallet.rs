//! JavaScript wallet adapter.
//!
//! Accepts any object of the shape
//!
//! ```ts
//! {
//!   publicKey: string | { toBase58(): string } | null,
//!   signTransaction(bytes: Uint8Array): Promise<Uint8Array>,
//! }
//! ```
//!
//! The bytes exchanged are the legacy transaction wire format, the same bytes
//! `@solana/web3.js` `Transaction.serialize({ requireAllSignatures: false })` produces.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::WalletError;
use crate::pubkey::{Pubkey, PubkeyExt};
use crate::transaction::{Transaction, TransactionExt};
use crate::wallet::WalletAdapter;

pub struct JsWalletAdapter {
    wallet: JsValue,
}

impl JsWalletAdapter {
    pub fn new(wallet: JsValue) -> Self {
        JsWalletAdapter { wallet }
    }

    fn property(&self, name: &str) -> Option<JsValue> {
        if self.wallet.is_null() || self.wallet.is_undefined() {
            return None;
        }
        Reflect::get(&self.wallet, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_null() && !v.is_undefined())
    }
}

fn error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| "wallet request failed".to_string())
}

#[async_trait(?Send)]
impl WalletAdapter for JsWalletAdapter {
    fn public_key(&self) -> Option<Pubkey> {
        let key = self.property("publicKey")?;
        let address = match key.as_string() {
            Some(address) => address,
            None => {
                let to_base58 = Reflect::get(&key, &JsValue::from_str("toBase58"))
                    .ok()?
                    .dyn_into::<Function>()
                    .ok()?;
                to_base58.call0(&key).ok()?.as_string()?
            }
        };
        Pubkey::from_base58(&address).ok()
    }

    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, WalletError> {
        let sign = self
            .property("signTransaction")
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| WalletError::Failed("wallet cannot sign transactions".to_string()))?;

        let bytes = tx
            .to_bytes()
            .map_err(|e| WalletError::Failed(e.to_string()))?;
        let pending = sign
            .call1(&self.wallet, &Uint8Array::from(&bytes[..]))
            .map_err(|e| WalletError::Failed(error_message(&e)))?;
        let promise = pending.dyn_into::<Promise>().map_err(|_| {
            WalletError::Malformed("signTransaction did not return a Promise".to_string())
        })?;

        let signed = JsFuture::from(promise)
            .await
            .map_err(|e| WalletError::Declined(error_message(&e)))?;
        let signed = signed.dyn_into::<Uint8Array>().map_err(|_| {
            WalletError::Malformed("signTransaction must resolve to a Uint8Array".to_string())
        })?;

        Transaction::from_bytes(&signed.to_vec()).map_err(|_| {
            WalletError::Malformed(
                "signTransaction returned bytes that are not a transaction".to_string(),
            )
        })
    }
}
