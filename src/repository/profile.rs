use std::time::Duration;

use super::{state_stream, StateStream};
use crate::api::ProfileService;
use crate::model::{Address, AddressInput, ListResponse, Profile, ProfileInput, ProfileRelation};

#[derive(Clone)]
pub struct ProfileRepository {
    service: ProfileService,
    loading_delay: Duration,
}

impl ProfileRepository {
    pub fn new(service: ProfileService, loading_delay: Duration) -> Self {
        Self {
            service,
            loading_delay,
        }
    }

    pub fn profile(&self, document_id: String) -> StateStream<Profile> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.get(&document_id).await })
    }

    pub fn update(&self, document_id: String, input: ProfileInput) -> StateStream<Profile> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move {
            service.update(&document_id, &input).await
        })
    }

    pub fn link(
        &self,
        document_id: String,
        relation: ProfileRelation,
        child_document_id: String,
    ) -> StateStream<Profile> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move {
            service.link(&document_id, relation, &child_document_id).await
        })
    }

    pub fn addresses(&self) -> StateStream<ListResponse<Address>> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.addresses().await })
    }

    pub fn create_address(&self, input: AddressInput) -> StateStream<Address> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.create_address(&input).await })
    }

    pub fn update_address(&self, document_id: String, input: AddressInput) -> StateStream<Address> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move {
            service.update_address(&document_id, &input).await
        })
    }

    pub fn delete_address(&self, document_id: String) -> StateStream<bool> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move {
            service.delete_address(&document_id).await
        })
    }
}
