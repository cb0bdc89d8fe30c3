use super::{optional, require, FieldErrors};
use crate::model::{Advert, AdvertInput};
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdvertFormState {
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    /// Category document id.
    pub category: Option<String>,
    /// Numeric id of an already uploaded cover image.
    pub cover: Option<u64>,
    pub errors: FieldErrors,
}

impl UiState for AdvertFormState {}

#[derive(Debug, Clone)]
pub enum AdvertFormIntent {
    Title(String),
    Description(String),
    Price(String),
    Location(String),
    Category(Option<String>),
    Cover(Option<u64>),
    Load(Advert),
    ShowErrors(FieldErrors),
    Reset,
}

impl Intent for AdvertFormIntent {}

pub struct AdvertFormReducer;

impl Reducer for AdvertFormReducer {
    type State = AdvertFormState;
    type Intent = AdvertFormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AdvertFormIntent::Title(value) => {
                state.title = value;
                state.errors.remove("title");
            }
            AdvertFormIntent::Description(value) => state.description = value,
            AdvertFormIntent::Price(value) => {
                state.price = value;
                state.errors.remove("price");
            }
            AdvertFormIntent::Location(value) => state.location = value,
            AdvertFormIntent::Category(value) => {
                state.category = value;
                state.errors.remove("category");
            }
            AdvertFormIntent::Cover(value) => state.cover = value,
            AdvertFormIntent::Load(advert) => {
                return AdvertFormState {
                    title: advert.title,
                    description: advert.description.unwrap_or_default(),
                    price: advert.price.map(|p| p.to_string()).unwrap_or_default(),
                    location: advert.location.unwrap_or_default(),
                    category: advert.category.map(|c| c.document_id),
                    cover: advert.cover.map(|c| c.id),
                    errors: FieldErrors::new(),
                };
            }
            AdvertFormIntent::ShowErrors(errors) => state.errors = errors,
            AdvertFormIntent::Reset => return AdvertFormState::default(),
        }
        state
    }
}

impl AdvertFormState {
    pub fn validate(&self) -> Result<AdvertInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title, "Title");

        let price = parse_price(&self.price);
        if price.is_none() {
            errors.insert("price", "Enter a price of zero or more".to_string());
        }

        let category = self.category.as_deref().and_then(optional);
        if category.is_none() {
            errors.insert("category", "Choose a category".to_string());
        }

        match (price, category) {
            (Some(price), Some(category)) if errors.is_empty() => Ok(AdvertInput {
                title: self.title.trim().to_string(),
                description: optional(&self.description),
                price,
                location: optional(&self.location),
                category,
                cover: self.cover,
            }),
            _ => Err(errors),
        }
    }
}

/// Accepts `12`, `12.50` and `12,50`.
fn parse_price(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}
