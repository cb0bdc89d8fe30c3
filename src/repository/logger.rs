use std::time::Duration;

use super::{state_stream, StateStream};
use crate::api::LoggerService;
use crate::model::{Image, ListResponse, Logger, LoggerInput, UploadFile};

#[derive(Clone)]
pub struct LoggerRepository {
    service: LoggerService,
    loading_delay: Duration,
}

impl LoggerRepository {
    pub fn new(service: LoggerService, loading_delay: Duration) -> Self {
        Self {
            service,
            loading_delay,
        }
    }

    pub fn entries(&self, page: u32, page_size: u32) -> StateStream<ListResponse<Logger>> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.list(page, page_size).await })
    }

    pub fn entry(&self, document_id: String) -> StateStream<Logger> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.get(&document_id).await })
    }

    pub fn create(&self, input: LoggerInput) -> StateStream<Logger> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.create(&input).await })
    }

    pub fn delete(&self, document_id: String) -> StateStream<bool> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.delete(&document_id).await })
    }

    pub fn upload(&self, file: UploadFile) -> StateStream<Vec<Image>> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.upload(file).await })
    }
}
