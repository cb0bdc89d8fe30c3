use super::{optional, require, FieldErrors, PHONE};
use crate::model::{Profile, ProfileInput};
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileFormState {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub errors: FieldErrors,
}

impl UiState for ProfileFormState {}

#[derive(Debug, Clone)]
pub enum ProfileFormIntent {
    FirstName(String),
    LastName(String),
    Phone(String),
    Load(Profile),
    ShowErrors(FieldErrors),
    Reset,
}

impl Intent for ProfileFormIntent {}

pub struct ProfileFormReducer;

impl Reducer for ProfileFormReducer {
    type State = ProfileFormState;
    type Intent = ProfileFormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ProfileFormIntent::FirstName(value) => {
                state.first_name = value;
                state.errors.remove("first_name");
            }
            ProfileFormIntent::LastName(value) => {
                state.last_name = value;
                state.errors.remove("last_name");
            }
            ProfileFormIntent::Phone(value) => {
                state.phone = value;
                state.errors.remove("phone");
            }
            ProfileFormIntent::Load(profile) => {
                return ProfileFormState {
                    first_name: profile.first_name.unwrap_or_default(),
                    last_name: profile.last_name.unwrap_or_default(),
                    phone: profile.phone.unwrap_or_default(),
                    errors: FieldErrors::new(),
                };
            }
            ProfileFormIntent::ShowErrors(errors) => state.errors = errors,
            ProfileFormIntent::Reset => return ProfileFormState::default(),
        }
        state
    }
}

impl ProfileFormState {
    pub fn validate(&self) -> Result<ProfileInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "first_name", &self.first_name, "First name");
        require(&mut errors, "last_name", &self.last_name, "Last name");
        let phone = optional(&self.phone);
        if let Some(phone) = &phone {
            if !PHONE.is_match(phone) {
                errors.insert("phone", "Enter a valid phone number".to_string());
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProfileInput {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone,
        })
    }
}
