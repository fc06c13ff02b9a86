//! Shared fixtures for unit tests: an in-process backend for HTTP tests and an
//! in-memory fake of the candidate service that records every call.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;

use crate::errors::ApiError;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::page::{CandidatePage, CandidateStats};
use crate::models::resume::ExtractedProfile;
use crate::services::{CandidateApi, PageQuery, ResumeApi};

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test backend");
    });
    format!("http://{addr}/")
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(PageQuery),
    Get(CandidateId),
    Create(Candidate),
    Update(CandidateId, Candidate),
    Delete(CandidateId),
    EmailExists(String),
    FindByEmail(String),
    Stats,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<Call>,
    candidates: Vec<Candidate>,
    taken_emails: Vec<String>,
    fail_list: bool,
    fail_stats: bool,
    fail_get: bool,
    fail_delete: bool,
    save_field_errors: Option<BTreeMap<String, String>>,
    save_message: Option<String>,
    next_id: CandidateId,
}

/// In-memory `CandidateApi` that records calls and serves a fixed data set.
#[derive(Default)]
pub struct FakeCandidateApi {
    state: Mutex<FakeState>,
}

fn transport_failure() -> ApiError {
    ApiError::Api {
        status: 503,
        message: "backend unavailable".to_string(),
        field_errors: BTreeMap::new(),
    }
}

impl FakeCandidateApi {
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        let next_id = candidates.iter().filter_map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(FakeState {
                candidates,
                next_id,
                ..FakeState::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn list_queries(&self) -> Vec<PageQuery> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::List(q) => Some(q.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn mark_taken(&self, email: &str) {
        self.lock().taken_emails.push(email.to_string());
    }

    pub fn fail_list(&self, fail: bool) {
        self.lock().fail_list = fail;
    }

    pub fn fail_stats(&self, fail: bool) {
        self.lock().fail_stats = fail;
    }

    pub fn fail_get(&self, fail: bool) {
        self.lock().fail_get = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.lock().fail_delete = fail;
    }

    pub fn reject_saves_with_fields(&self, errors: &[(&str, &str)]) {
        self.lock().save_field_errors = Some(
            errors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
    }

    pub fn reject_saves_with_message(&self, message: &str) {
        self.lock().save_message = Some(message.to_string());
    }

    fn save_rejection(state: &FakeState) -> Option<ApiError> {
        if let Some(fields) = &state.save_field_errors {
            return Some(ApiError::Api {
                status: 400,
                message: "Validation failed".to_string(),
                field_errors: fields.clone(),
            });
        }
        state.save_message.as_ref().map(|m| ApiError::Api {
            status: 500,
            message: m.clone(),
            field_errors: BTreeMap::new(),
        })
    }
}

#[async_trait]
impl CandidateApi for FakeCandidateApi {
    async fn list(&self, query: &PageQuery) -> Result<CandidatePage, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::List(query.clone()));
        if state.fail_list {
            return Err(transport_failure());
        }
        let needle = query.search.to_lowercase();
        let matching: Vec<Candidate> = state
            .candidates
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        let size = query.size.max(1) as usize;
        let total_pages = matching.len().div_ceil(size) as u32;
        let content = matching
            .iter()
            .skip(query.page as usize * size)
            .take(size)
            .cloned()
            .collect();
        Ok(CandidatePage {
            content,
            total_elements: matching.len() as u64,
            total_pages,
        })
    }

    async fn get(&self, id: CandidateId) -> Result<Candidate, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::Get(id));
        if state.fail_get {
            return Err(transport_failure());
        }
        state
            .candidates
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Candidate {id} not found")))
    }

    async fn create(&self, candidate: &Candidate) -> Result<Candidate, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::Create(candidate.clone()));
        if let Some(err) = Self::save_rejection(&state) {
            return Err(err);
        }
        let mut saved = candidate.clone();
        saved.id = Some(state.next_id);
        state.next_id += 1;
        state.candidates.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: CandidateId, candidate: &Candidate) -> Result<Candidate, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::Update(id, candidate.clone()));
        if let Some(err) = Self::save_rejection(&state) {
            return Err(err);
        }
        let mut saved = candidate.clone();
        saved.id = Some(id);
        if let Some(slot) = state.candidates.iter_mut().find(|c| c.id == Some(id)) {
            *slot = saved.clone();
        }
        Ok(saved)
    }

    async fn delete(&self, id: CandidateId) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::Delete(id));
        if state.fail_delete {
            return Err(transport_failure());
        }
        state.candidates.retain(|c| c.id != Some(id));
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::EmailExists(email.to_string()));
        Ok(state.taken_emails.iter().any(|e| e == email)
            || state.candidates.iter().any(|c| c.email == email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Candidate, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::FindByEmail(email.to_string()));
        state
            .candidates
            .iter()
            .find(|c| c.email == email)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("No candidate with email {email}")))
    }

    async fn stats(&self) -> Result<CandidateStats, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::Stats);
        if state.fail_stats {
            return Err(transport_failure());
        }
        Ok(CandidateStats {
            total_candidates: state.candidates.len() as u64,
        })
    }
}

/// `ResumeApi` fake returning a canned profile, or an error when none is set.
#[derive(Default)]
pub struct FakeResumeApi {
    pub profile: Option<ExtractedProfile>,
    uploads: Mutex<Vec<(String, usize)>>,
}

impl FakeResumeApi {
    pub fn returning(profile: ExtractedProfile) -> Self {
        Self {
            profile: Some(profile),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().expect("uploads poisoned").clone()
    }
}

#[async_trait]
impl ResumeApi for FakeResumeApi {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<ExtractedProfile, ApiError> {
        self.uploads
            .lock()
            .expect("uploads poisoned")
            .push((file_name.to_string(), bytes.len()));
        self.profile.clone().ok_or_else(|| ApiError::Api {
            status: 422,
            message: "Unsupported file type".to_string(),
            field_errors: BTreeMap::new(),
        })
    }
}

pub fn candidate(id: CandidateId, name: &str, email: &str) -> Candidate {
    Candidate {
        id: Some(id),
        name: name.to_string(),
        email: email.to_string(),
        ..Candidate::default()
    }
}
