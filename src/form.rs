//! Form state for the token creation pages.
//!
//! The form keeps exactly what the user typed. Nothing is validated until
//! submit, when [`TokenForm::to_request`] turns the raw strings into a
//! [`TokenCreationRequest`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amount::{parse_decimals, scale_amount};
use crate::error::TokenError;

pub const DEFAULT_NAME: &str = "Only Possible On Solana";
pub const DEFAULT_SYMBOL: &str = "OPOS";
pub const DEFAULT_DECIMALS: &str = "2";
pub const DEFAULT_URI: &str =
    "https://raw.githubusercontent.com/solana-developers/opos-asset/main/assets/Climate/metadata.json";
pub const DEFAULT_INITIAL_SUPPLY: &str = "0";

/// Raw field values as entered on the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub decimals: String,
    pub metadata_uri: String,
    /// Human units, e.g. "1000".
    pub initial_supply: String,
}

impl Default for TokenForm {
    fn default() -> Self {
        TokenForm {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            decimals: DEFAULT_DECIMALS.to_string(),
            metadata_uri: DEFAULT_URI.to_string(),
            initial_supply: DEFAULT_INITIAL_SUPPLY.to_string(),
        }
    }
}

/// A single editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Symbol,
    Decimals,
    MetadataUri,
    InitialSupply,
}

impl FromStr for FormField {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(FormField::Name),
            "symbol" => Ok(FormField::Symbol),
            "decimals" => Ok(FormField::Decimals),
            "metadataUri" | "uri" => Ok(FormField::MetadataUri),
            "initialSupply" => Ok(FormField::InitialSupply),
            other => Err(TokenError::Build(format!("Unknown form field: {}", other))),
        }
    }
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Symbol => "symbol",
            FormField::Decimals => "decimals",
            FormField::MetadataUri => "metadataUri",
            FormField::InitialSupply => "initialSupply",
        }
    }
}

impl TokenForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Symbol => &self.symbol,
            FormField::Decimals => &self.decimals,
            FormField::MetadataUri => &self.metadata_uri,
            FormField::InitialSupply => &self.initial_supply,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Symbol => &mut self.symbol,
            FormField::Decimals => &mut self.decimals,
            FormField::MetadataUri => &mut self.metadata_uri,
            FormField::InitialSupply => &mut self.initial_supply,
        }
    }

    /// Validate the raw values.
    pub fn to_request(&self) -> Result<TokenCreationRequest, TokenError> {
        let decimals = parse_decimals(&self.decimals)?;
        let initial_supply = scale_amount(&self.initial_supply, decimals)?;
        Ok(TokenCreationRequest {
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_string(),
            decimals,
            uri: self.metadata_uri.trim().to_string(),
            initial_supply,
        })
    }
}

/// Validated parameters for one creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCreationRequest {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub uri: String,
    /// Initial supply in base units; zero means "mint nothing".
    pub initial_supply: u64,
}

type Listener = Box<dyn FnMut(FormField, &TokenForm)>;

/// Handle returned by [`FormState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(pub u32);

/// The page's mutable form record with change notification.
#[derive(Default)]
pub struct FormState {
    form: TokenForm,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u32,
}

impl FormState {
    pub fn new(form: TokenForm) -> Self {
        FormState {
            form,
            ..Default::default()
        }
    }

    pub fn form(&self) -> &TokenForm {
        &self.form
    }

    /// Set a field. Listeners run only when the value actually changed.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let slot = self.form.slot(field);
        if *slot == value {
            return;
        }
        *slot = value;
        for (_, listener) in self.listeners.iter_mut() {
            listener(field, &self.form);
        }
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(FormField, &TokenForm) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

impl std::fmt::Debug for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormState")
            .field("form", &self.form)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_defaults() {
        let form = TokenForm::default();
        assert_eq!(form.name, "Only Possible On Solana");
        assert_eq!(form.symbol, "OPOS");
        let request = form.to_request().unwrap();
        assert_eq!(request.decimals, 2);
        assert_eq!(request.initial_supply, 0);
    }

    #[test]
    fn test_to_request_scales_supply() {
        let form = TokenForm {
            initial_supply: "10".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_request().unwrap().initial_supply, 1000);
    }

    #[test]
    fn test_to_request_reports_bad_decimals_first() {
        let form = TokenForm {
            decimals: "-2".to_string(),
            initial_supply: "abc".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.to_request(),
            Err(TokenError::InvalidDecimals(_))
        ));
    }

    #[test]
    fn test_field_names() {
        assert_eq!("initialSupply".parse::<FormField>().unwrap(), FormField::InitialSupply);
        assert_eq!("uri".parse::<FormField>().unwrap(), FormField::MetadataUri);
        assert!("color".parse::<FormField>().is_err());
        assert_eq!(
            FormField::MetadataUri.as_str().parse::<FormField>().unwrap(),
            FormField::MetadataUri
        );
    }

    #[test]
    fn test_listeners_notified_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut state = FormState::new(TokenForm::default());
        let sink = seen.clone();
        state.subscribe(move |field, form| {
            sink.borrow_mut().push((field, form.get(field).to_string()));
        });

        state.set(FormField::Symbol, "MINE");
        state.set(FormField::Symbol, "MINE");
        state.set(FormField::Decimals, "6");

        assert_eq!(
            *seen.borrow(),
            vec![
                (FormField::Symbol, "MINE".to_string()),
                (FormField::Decimals, "6".to_string()),
            ]
        );
        assert_eq!(state.form().symbol, "MINE");
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut state = FormState::default();
        let sink = count.clone();
        let id = state.subscribe(move |_, _| *sink.borrow_mut() += 1);
        state.set(FormField::Name, "A");
        state.unsubscribe(id);
        state.set(FormField::Name, "B");
        assert_eq!(*count.borrow(), 1);
    }
}
