use std::fmt;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::page::{CandidatePage, CandidateStats, EmailCheck};

/// Columns the backend accepts for `sortBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Email,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Email => "email",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Parameters of one list request, passed straight through to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: SortField::Id,
            sort_dir: SortDirection::Desc,
            search: String::new(),
        }
    }
}

/// Candidate endpoints of the backend.
#[async_trait]
pub trait CandidateApi: Send + Sync {
    async fn list(&self, query: &PageQuery) -> Result<CandidatePage, ApiError>;
    async fn get(&self, id: CandidateId) -> Result<Candidate, ApiError>;
    async fn create(&self, candidate: &Candidate) -> Result<Candidate, ApiError>;
    async fn update(&self, id: CandidateId, candidate: &Candidate) -> Result<Candidate, ApiError>;
    async fn delete(&self, id: CandidateId) -> Result<(), ApiError>;
    async fn email_exists(&self, email: &str) -> Result<bool, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Candidate, ApiError>;
    async fn stats(&self) -> Result<CandidateStats, ApiError>;
}

pub struct HttpCandidateService {
    api: ApiClient,
}

impl HttpCandidateService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CandidateApi for HttpCandidateService {
    async fn list(&self, query: &PageQuery) -> Result<CandidatePage, ApiError> {
        self.api.get_json("candidates", query).await
    }

    async fn get(&self, id: CandidateId) -> Result<Candidate, ApiError> {
        self.api.get_json(&format!("candidates/{id}"), &()).await
    }

    async fn create(&self, candidate: &Candidate) -> Result<Candidate, ApiError> {
        self.api
            .send_json(Method::POST, "candidates", candidate)
            .await
    }

    async fn update(&self, id: CandidateId, candidate: &Candidate) -> Result<Candidate, ApiError> {
        self.api
            .send_json(Method::PUT, &format!("candidates/{id}"), candidate)
            .await
    }

    async fn delete(&self, id: CandidateId) -> Result<(), ApiError> {
        self.api.delete(&format!("candidates/{id}")).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        let check: EmailCheck = self
            .api
            .get_json("candidates/check-email", &[("email", email)])
            .await?;
        Ok(check.exists)
    }

    async fn find_by_email(&self, email: &str) -> Result<Candidate, ApiError> {
        self.api
            .get_json("candidates/search/email", &[("email", email)])
            .await
    }

    async fn stats(&self) -> Result<CandidateStats, ApiError> {
        self.api.get_json("candidates/stats", &()).await
    }
}
