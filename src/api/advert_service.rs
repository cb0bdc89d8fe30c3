use crate::api::client::ApiClient;
use crate::api::query::StrapiQuery;
use crate::model::{Advert, AdvertInput, Category, DataWrapper, ListResponse, SingleResponse};
use crate::RequestState;

const ADVERT_RELATIONS: &[&str] = &["category", "cover"];

/// Listing parameters for `/api/adverts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertQuery {
    pub page: u32,
    pub page_size: u32,
    /// Category document id.
    pub category: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

impl AdvertQuery {
    pub fn first_page(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            category: None,
            search: None,
        }
    }

    fn to_strapi(&self) -> StrapiQuery {
        let mut query = StrapiQuery::new()
            .populate(ADVERT_RELATIONS)
            .page(self.page, self.page_size)
            .sort("createdAt", true);
        if let Some(category) = &self.category {
            query = query.filter(&["category", "documentId"], "$eq", category.clone());
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.filter(&["title"], "$containsi", search.trim());
        }
        query
    }
}

#[derive(Clone)]
pub struct AdvertService {
    client: ApiClient,
}

impl AdvertService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &AdvertQuery) -> RequestState<ListResponse<Advert>> {
        self.client.get(&["adverts"], &query.to_strapi()).await
    }

    pub async fn get(&self, document_id: &str) -> RequestState<Advert> {
        let query = StrapiQuery::new().populate(ADVERT_RELATIONS);
        self.client
            .get::<SingleResponse<Advert>>(&["adverts", document_id], &query)
            .await
            .map(|r| r.data)
    }

    pub async fn create(&self, input: &AdvertInput) -> RequestState<Advert> {
        self.client
            .post::<_, SingleResponse<Advert>>(&["adverts"], &DataWrapper::new(input))
            .await
            .map(|r| r.data)
    }

    pub async fn update(&self, document_id: &str, input: &AdvertInput) -> RequestState<Advert> {
        let query = StrapiQuery::new().populate(ADVERT_RELATIONS);
        self.client
            .put::<_, SingleResponse<Advert>>(&["adverts", document_id], &query, &DataWrapper::new(input))
            .await
            .map(|r| r.data)
    }

    pub async fn delete(&self, document_id: &str) -> RequestState<bool> {
        self.client.delete(&["adverts", document_id]).await
    }

    pub async fn categories(&self) -> RequestState<ListResponse<Category>> {
        let query = StrapiQuery::new().sort("name", false);
        self.client.get(&["categories"], &query).await
    }
}
