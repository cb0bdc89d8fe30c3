use std::time::Duration;

use super::{state_stream, StateStream};
use crate::api::{AdvertQuery, AdvertService};
use crate::model::{Advert, AdvertInput, Category, ListResponse};

#[derive(Clone)]
pub struct AdvertRepository {
    service: AdvertService,
    loading_delay: Duration,
}

impl AdvertRepository {
    pub fn new(service: AdvertService, loading_delay: Duration) -> Self {
        Self {
            service,
            loading_delay,
        }
    }

    pub fn adverts(&self, query: AdvertQuery) -> StateStream<ListResponse<Advert>> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.list(&query).await })
    }

    pub fn advert(&self, document_id: String) -> StateStream<Advert> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.get(&document_id).await })
    }

    pub fn create(&self, input: AdvertInput) -> StateStream<Advert> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.create(&input).await })
    }

    pub fn update(&self, document_id: String, input: AdvertInput) -> StateStream<Advert> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move {
            service.update(&document_id, &input).await
        })
    }

    pub fn delete(&self, document_id: String) -> StateStream<bool> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.delete(&document_id).await })
    }

    pub fn categories(&self) -> StateStream<ListResponse<Category>> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.categories().await })
    }
}
