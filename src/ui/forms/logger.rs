use super::{optional, require, FieldErrors};
use crate::model::LoggerInput;
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoggerFormState {
    pub title: String,
    pub description: String,
    pub errors: FieldErrors,
}

impl UiState for LoggerFormState {}

#[derive(Debug, Clone)]
pub enum LoggerFormIntent {
    Title(String),
    Description(String),
    ShowErrors(FieldErrors),
    Reset,
}

impl Intent for LoggerFormIntent {}

pub struct LoggerFormReducer;

impl Reducer for LoggerFormReducer {
    type State = LoggerFormState;
    type Intent = LoggerFormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LoggerFormIntent::Title(value) => {
                state.title = value;
                state.errors.remove("title");
            }
            LoggerFormIntent::Description(value) => state.description = value,
            LoggerFormIntent::ShowErrors(errors) => state.errors = errors,
            LoggerFormIntent::Reset => return LoggerFormState::default(),
        }
        state
    }
}

impl LoggerFormState {
    /// The image id is attached later, after an optional upload.
    pub fn validate(&self) -> Result<LoggerInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title, "Title");
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoggerInput {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            image: None,
        })
    }
}
