use async_trait::async_trait;

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::models::resume::ExtractedProfile;

/// Resume extraction endpoint. The backend does all parsing.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<ExtractedProfile, ApiError>;
}

pub struct HttpResumeService {
    api: ApiClient,
}

impl HttpResumeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResumeApi for HttpResumeService {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<ExtractedProfile, ApiError> {
        self.api.upload("resumes/upload", file_name, bytes).await
    }
}
