//! Trait for converting Rust types to JavaScript values.
//!
//! Converts page state directly to JS objects with BigInt handling for u64
//! amounts.

use wasm_bindgen::JsValue;

use crate::form::TokenForm;
use crate::presenter::SubmissionResult;

/// Error type for JS value conversion failures.
#[derive(Debug)]
pub struct JsConversionError(String);

impl JsConversionError {
    pub fn new(msg: &str) -> Self {
        JsConversionError(msg.to_string())
    }
}

impl std::fmt::Display for JsConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<JsConversionError> for JsValue {
    fn from(err: JsConversionError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Trait for converting Rust types to JavaScript values.
pub trait TryIntoJsValue {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError>;
}

// =============================================================================
// Primitive implementations
// =============================================================================

impl TryIntoJsValue for String {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for &str {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for bool {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_bool(*self))
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Option<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        match self {
            Some(v) => v.try_to_js_value(),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

// =============================================================================
// Macro for building JS objects
// =============================================================================

/// Macro to create a JavaScript object from key-value pairs.
/// Each value must implement TryIntoJsValue.
#[macro_export]
macro_rules! js_obj {
    ( $( $key:expr => $value:expr ),* $(,)? ) => {{
        let obj = js_sys::Object::new();
        $(
            js_sys::Reflect::set(
                &obj,
                &wasm_bindgen::JsValue::from_str($key),
                &$crate::wasm::try_into_js_value::TryIntoJsValue::try_to_js_value(&$value)?
            ).map_err(|_| $crate::wasm::try_into_js_value::JsConversionError::new(
                concat!("Failed to set object property: ", $key)
            ))?;
        )*
        Ok::<wasm_bindgen::JsValue, $crate::wasm::try_into_js_value::JsConversionError>(obj.into())
    }};
}

pub use js_obj;

// =============================================================================
// Page state
// =============================================================================

impl TryIntoJsValue for TokenForm {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "name" => self.name,
            "symbol" => self.symbol,
            "decimals" => self.decimals,
            "metadataUri" => self.metadata_uri,
            "initialSupply" => self.initial_supply
        )
    }
}

impl TryIntoJsValue for SubmissionResult {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "mintAddress" => self.mint_address,
            "derivedAccountAddress" => self.derived_account_address,
            "submissionId" => self.submission_id,
            "error" => self.error,
            "errorKind" => self.error_kind.map(|kind| kind.as_str()),
            "explorerUrl" => self.explorer_url,
            "mintExplorerUrl" => self.mint_explorer_url,
            "confirmed" => self.confirmed,
            "notice" => self.notice,
            "headline" => self.headline()
        )
    }
}
