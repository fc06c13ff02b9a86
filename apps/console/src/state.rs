use std::sync::Arc;

use crate::api_client::ApiClient;
use crate::auth::Session;
use crate::config::Config;
use crate::errors::ApiError;
use crate::services::{CandidateApi, HttpCandidateService, HttpResumeService, ResumeApi};

/// Everything a signed-in command needs, built once after login.
pub struct AppState {
    pub config: Config,
    pub session: Session,
    pub candidates: Arc<dyn CandidateApi>,
    pub resumes: Arc<dyn ResumeApi>,
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Result<Self, ApiError> {
        let client = ApiClient::new(&config.api_url, config.http_timeout)?.authenticated(&session);
        Ok(Self {
            candidates: Arc::new(HttpCandidateService::new(client.clone())),
            resumes: Arc::new(HttpResumeService::new(client)),
            config,
            session,
        })
    }
}
