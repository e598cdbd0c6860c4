mod constants;
mod page;
pub mod try_into_js_value;
mod wallet;

pub use page::WasmCreateTokenPage;
pub use wallet::JsWalletAdapter;

// Re-export constants functions
pub use constants::*;
