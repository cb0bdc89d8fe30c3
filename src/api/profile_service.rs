use serde_json::json;

use crate::api::client::ApiClient;
use crate::api::query::StrapiQuery;
use crate::model::{
    Address, AddressInput, DataWrapper, ListResponse, Profile, ProfileInput, ProfileRelation,
    SingleResponse,
};
use crate::RequestState;

const PROFILE_RELATIONS: &[&str] = &["addresses", "adverts"];

/// Profiles and the addresses hanging off them.
#[derive(Clone)]
pub struct ProfileService {
    client: ApiClient,
}

impl ProfileService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, document_id: &str) -> RequestState<Profile> {
        let query = StrapiQuery::new().populate(PROFILE_RELATIONS);
        self.client
            .get::<SingleResponse<Profile>>(&["profiles", document_id], &query)
            .await
            .map(|r| r.data)
    }

    pub async fn update(&self, document_id: &str, input: &ProfileInput) -> RequestState<Profile> {
        let query = StrapiQuery::new().populate(PROFILE_RELATIONS);
        self.client
            .put::<_, SingleResponse<Profile>>(&["profiles", document_id], &query, &DataWrapper::new(input))
            .await
            .map(|r| r.data)
    }

    /// Add `child_document_id` to one of the profile's relation lists.
    pub async fn link(
        &self,
        document_id: &str,
        relation: ProfileRelation,
        child_document_id: &str,
    ) -> RequestState<Profile> {
        let mut fields = serde_json::Map::new();
        fields.insert(
            relation.field().to_string(),
            json!({ "connect": [child_document_id] }),
        );
        let query = StrapiQuery::new().populate(PROFILE_RELATIONS);
        self.client
            .put::<_, SingleResponse<Profile>>(&["profiles", document_id], &query, &DataWrapper::new(fields))
            .await
            .map(|r| r.data)
    }

    pub async fn addresses(&self) -> RequestState<ListResponse<Address>> {
        self.client.get(&["addresses"], &StrapiQuery::new()).await
    }

    pub async fn create_address(&self, input: &AddressInput) -> RequestState<Address> {
        self.client
            .post::<_, SingleResponse<Address>>(&["addresses"], &DataWrapper::new(input))
            .await
            .map(|r| r.data)
    }

    pub async fn update_address(&self, document_id: &str, input: &AddressInput) -> RequestState<Address> {
        self.client
            .put::<_, SingleResponse<Address>>(&["addresses", document_id], &StrapiQuery::new(), &DataWrapper::new(input))
            .await
            .map(|r| r.data)
    }

    pub async fn delete_address(&self, document_id: &str) -> RequestState<bool> {
        self.client.delete(&["addresses", document_id]).await
    }
}
