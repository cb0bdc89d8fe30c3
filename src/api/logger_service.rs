use reqwest::multipart::{Form, Part};

use crate::api::client::ApiClient;
use crate::api::query::StrapiQuery;
use crate::model::{DataWrapper, Image, ListResponse, Logger, LoggerInput, SingleResponse, UploadFile};
use crate::RequestState;

/// Cow logger entries and media upload.
#[derive(Clone)]
pub struct LoggerService {
    client: ApiClient,
}

impl LoggerService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, page_size: u32) -> RequestState<ListResponse<Logger>> {
        let query = StrapiQuery::new()
            .populate(&["image"])
            .page(page, page_size)
            .sort("createdAt", true);
        self.client.get(&["loggers"], &query).await
    }

    pub async fn get(&self, document_id: &str) -> RequestState<Logger> {
        let query = StrapiQuery::new().populate(&["image"]);
        self.client
            .get::<SingleResponse<Logger>>(&["loggers", document_id], &query)
            .await
            .map(|r| r.data)
    }

    pub async fn create(&self, input: &LoggerInput) -> RequestState<Logger> {
        self.client
            .post::<_, SingleResponse<Logger>>(&["loggers"], &DataWrapper::new(input))
            .await
            .map(|r| r.data)
    }

    pub async fn delete(&self, document_id: &str) -> RequestState<bool> {
        self.client.delete(&["loggers", document_id]).await
    }

    /// `POST /api/upload` with the file under the `files` field.
    ///
    /// The upload plugin answers with a bare array of the stored files.
    pub async fn upload(&self, file: UploadFile) -> RequestState<Vec<Image>> {
        let part = match Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)
        {
            Ok(part) => part,
            Err(e) => return RequestState::Error(format!("Invalid data: {}", e)),
        };
        let form = Form::new().part("files", part);
        self.client.upload(&["upload"], form).await
    }
}
