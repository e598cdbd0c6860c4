//! WASM binding for the token creation page.
//!
//! One `WasmCreateTokenPage` backs one page: it owns the form, the submit
//! gate and the RPC client, and keeps the result of the last attempt.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::try_into_js_value::{JsConversionError, TryIntoJsValue};
use super::wallet::JsWalletAdapter;
use crate::config::{ClientConfig, CreateTokenOptions};
use crate::coordinator::TokenCreator;
use crate::error::TokenError;
use crate::form::{FormField, FormState, ListenerId, TokenForm};
use crate::presenter::{ButtonState, SubmissionResult};
use crate::rpc::HttpRpcClient;
use crate::wallet::WalletAdapter;

type PendingNotice = (Function, FormField, String);

struct PageInner {
    form: RefCell<FormState>,
    /// Change notifications queued while the form is borrowed.
    pending: Rc<RefCell<Vec<PendingNotice>>>,
    creator: TokenCreator,
    rpc: HttpRpcClient,
    result: RefCell<Option<SubmissionResult>>,
}

/// Controller for a token creation page.
#[wasm_bindgen]
pub struct WasmCreateTokenPage {
    inner: Rc<PageInner>,
}

fn from_js<T: serde::de::DeserializeOwned + Default>(
    value: JsValue,
    what: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_sys::Error::new(&format!("Failed to parse {}: {}", what, e)).into())
}

#[wasm_bindgen]
impl WasmCreateTokenPage {
    /// Create a page controller.
    ///
    /// @param config - `{ cluster, rpcUrl, commitment, awaitConfirmation, pollIntervalMs,
    ///   maxPolls }`, all optional
    /// @param options - `{ tokenProgram: "token" | "token2022", withMetadata: boolean }`,
    ///   all optional
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, options: JsValue) -> Result<WasmCreateTokenPage, JsValue> {
        let config: ClientConfig = from_js(config, "client config")?;
        let options: CreateTokenOptions = from_js(options, "token options")?;
        Ok(Self::with(config, options))
    }

    /// Token-2022 mint carrying on-chain name, symbol and uri.
    #[wasm_bindgen]
    pub fn with_metadata(config: JsValue) -> Result<WasmCreateTokenPage, JsValue> {
        let config: ClientConfig = from_js(config, "client config")?;
        Ok(Self::with(config, CreateTokenOptions::metadata_mint()))
    }

    /// Set a form field by name (`name`, `symbol`, `decimals`, `metadataUri`, `initialSupply`).
    #[wasm_bindgen]
    pub fn set_field(&self, field: &str, value: &str) -> Result<(), TokenError> {
        let field: FormField = field.parse()?;
        self.inner.form.borrow_mut().set(field, value);
        self.flush_notices();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn get_field(&self, field: &str) -> Result<String, TokenError> {
        let field: FormField = field.parse()?;
        Ok(self.inner.form.borrow().form().get(field).to_string())
    }

    /// Current raw form values.
    #[wasm_bindgen(getter)]
    pub fn form(&self) -> Result<JsValue, JsConversionError> {
        self.inner.form.borrow().form().try_to_js_value()
    }

    /// Call `callback(fieldName, value)` whenever a field changes.
    ///
    /// @returns Subscription id for `unsubscribe`
    #[wasm_bindgen]
    pub fn subscribe(&self, callback: Function) -> u32 {
        let pending = self.inner.pending.clone();
        let ListenerId(id) = self.inner.form.borrow_mut().subscribe(move |field, form| {
            pending
                .borrow_mut()
                .push((callback.clone(), field, form.get(field).to_string()));
        });
        id
    }

    #[wasm_bindgen]
    pub fn unsubscribe(&self, id: u32) {
        self.inner.form.borrow_mut().unsubscribe(ListenerId(id));
    }

    /// Whether an attempt is in flight.
    #[wasm_bindgen(getter)]
    pub fn in_progress(&self) -> bool {
        self.inner.creator.gate().is_busy()
    }

    /// Submit button label for the given wallet: "Connect Wallet", "Create Token" or
    /// "Creating...".
    #[wasm_bindgen]
    pub fn button_state(&self, wallet: JsValue) -> String {
        self.button(wallet).label().to_string()
    }

    #[wasm_bindgen]
    pub fn button_enabled(&self, wallet: JsValue) -> bool {
        self.button(wallet).is_enabled()
    }

    /// Run one creation attempt with `wallet`.
    ///
    /// Resolves to the submission result object; failures are reported in its
    /// `error` field rather than by rejecting.
    #[wasm_bindgen]
    pub fn submit(&self, wallet: JsValue) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let wallet = JsWalletAdapter::new(wallet);
            let form = inner.form.borrow().form().clone();
            let outcome = inner.creator.submit(&form, &wallet, &inner.rpc).await;
            let result = SubmissionResult::from_outcome(&outcome, &inner.creator.config().cluster);
            let value = result.try_to_js_value()?;
            if outcome.replaces_last_result() {
                *inner.result.borrow_mut() = Some(result);
            }
            Ok(value)
        })
    }

    /// Result of the last completed attempt, or `undefined`.
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> Result<JsValue, JsConversionError> {
        self.inner.result.borrow().try_to_js_value()
    }

    /// RPC endpoint the page submits to.
    #[wasm_bindgen(getter)]
    pub fn rpc_url(&self) -> String {
        self.inner.rpc.url().to_string()
    }
}

impl WasmCreateTokenPage {
    fn with(config: ClientConfig, options: CreateTokenOptions) -> Self {
        let rpc = HttpRpcClient::new(&config);
        WasmCreateTokenPage {
            inner: Rc::new(PageInner {
                form: RefCell::new(FormState::new(TokenForm::default())),
                pending: Rc::new(RefCell::new(Vec::new())),
                creator: TokenCreator::new(config, options),
                rpc,
                result: RefCell::new(None),
            }),
        }
    }

    fn button(&self, wallet: JsValue) -> ButtonState {
        let connected = JsWalletAdapter::new(wallet).public_key().is_some();
        ButtonState::new(connected, self.inner.creator.gate().is_busy())
    }

    fn flush_notices(&self) {
        let queued = std::mem::take(&mut *self.inner.pending.borrow_mut());
        for (callback, field, value) in queued {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(field.as_str()),
                &JsValue::from_str(&value),
            );
        }
    }
}
