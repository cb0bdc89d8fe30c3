use super::{optional, require, FieldErrors, POSTAL_CODE};
use crate::model::{Address, AddressInput};
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressFormState {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub errors: FieldErrors,
}

impl UiState for AddressFormState {}

#[derive(Debug, Clone)]
pub enum AddressFormIntent {
    Street(String),
    City(String),
    PostalCode(String),
    Country(String),
    /// Prefill from an existing address for editing.
    Load(Address),
    ShowErrors(FieldErrors),
    Reset,
}

impl Intent for AddressFormIntent {}

pub struct AddressFormReducer;

impl Reducer for AddressFormReducer {
    type State = AddressFormState;
    type Intent = AddressFormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AddressFormIntent::Street(value) => {
                state.street = value;
                state.errors.remove("street");
            }
            AddressFormIntent::City(value) => {
                state.city = value;
                state.errors.remove("city");
            }
            AddressFormIntent::PostalCode(value) => {
                state.postal_code = value;
                state.errors.remove("postal_code");
            }
            AddressFormIntent::Country(value) => {
                state.country = value;
            }
            AddressFormIntent::Load(address) => {
                return AddressFormState {
                    street: address.street,
                    city: address.city,
                    postal_code: address.postal_code.unwrap_or_default(),
                    country: address.country.unwrap_or_default(),
                    errors: FieldErrors::new(),
                };
            }
            AddressFormIntent::ShowErrors(errors) => state.errors = errors,
            AddressFormIntent::Reset => return AddressFormState::default(),
        }
        state
    }
}

impl AddressFormState {
    pub fn validate(&self) -> Result<AddressInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "street", &self.street, "Street");
        require(&mut errors, "city", &self.city, "City");
        let postal_code = optional(&self.postal_code);
        if let Some(code) = &postal_code {
            if !POSTAL_CODE.is_match(code) {
                errors.insert("postal_code", "Enter a valid postal code".to_string());
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(AddressInput {
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code,
            country: optional(&self.country),
        })
    }
}
