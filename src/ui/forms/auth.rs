use super::{check_email, require, FieldErrors, MIN_PASSWORD_LEN};
use crate::model::{LoginRequest, RegisterRequest};
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginFormState {
    /// Email or username.
    pub identifier: String,
    pub password: String,
    pub errors: FieldErrors,
}

impl UiState for LoginFormState {}

#[derive(Debug, Clone)]
pub enum LoginFormIntent {
    Identifier(String),
    Password(String),
    ShowErrors(FieldErrors),
    Reset,
}

impl Intent for LoginFormIntent {}

pub struct LoginFormReducer;

impl Reducer for LoginFormReducer {
    type State = LoginFormState;
    type Intent = LoginFormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LoginFormIntent::Identifier(value) => {
                state.identifier = value;
                state.errors.remove("identifier");
            }
            LoginFormIntent::Password(value) => {
                state.password = value;
                state.errors.remove("password");
            }
            LoginFormIntent::ShowErrors(errors) => state.errors = errors,
            LoginFormIntent::Reset => return LoginFormState::default(),
        }
        state
    }
}

impl LoginFormState {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "identifier", &self.identifier, "Email or username");
        require(&mut errors, "password", &self.password, "Password");
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            identifier: self.identifier.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterFormState {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub errors: FieldErrors,
}

impl UiState for RegisterFormState {}

#[derive(Debug, Clone)]
pub enum RegisterFormIntent {
    Username(String),
    Email(String),
    Password(String),
    ConfirmPassword(String),
    ShowErrors(FieldErrors),
    Reset,
}

impl Intent for RegisterFormIntent {}

pub struct RegisterFormReducer;

impl Reducer for RegisterFormReducer {
    type State = RegisterFormState;
    type Intent = RegisterFormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RegisterFormIntent::Username(value) => {
                state.username = value;
                state.errors.remove("username");
            }
            RegisterFormIntent::Email(value) => {
                state.email = value;
                state.errors.remove("email");
            }
            RegisterFormIntent::Password(value) => {
                state.password = value;
                state.errors.remove("password");
            }
            RegisterFormIntent::ConfirmPassword(value) => {
                state.confirm_password = value;
                state.errors.remove("confirm_password");
            }
            RegisterFormIntent::ShowErrors(errors) => state.errors = errors,
            RegisterFormIntent::Reset => return RegisterFormState::default(),
        }
        state
    }
}

impl RegisterFormState {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "username", &self.username, "Username");
        check_email(&mut errors, "email", &self.email);
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }
        if self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match".to_string());
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
