use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::draft::{
    CandidateDraft, CandidateField, EducationDraft, EducationField, FieldErrors, FieldKey,
    WorkExperienceDraft, WorkField,
};
use super::validation::validate_draft;
use crate::models::candidate::{Candidate, CandidateId};
use crate::services::CandidateApi;
use crate::timer::Debouncer;

pub const EMAIL_CHECK_DEBOUNCE: Duration = Duration::from_millis(500);

const LOAD_FAILED: &str = "Failed to load candidate data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CandidateId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the record.
    Saved(Candidate),
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The backend refused the record; see `errors()`.
    Rejected,
    /// Submit is currently disabled.
    Blocked,
}

/// Result of the last availability check, tied to the address it was run for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EmailStatus {
    email: String,
    exists: bool,
}

/// Owns the draft behind the create/edit candidate form.
pub struct FormController {
    api: Arc<dyn CandidateApi>,
    mode: FormMode,
    draft: CandidateDraft,
    errors: FieldErrors,
    loading: bool,
    loaded: bool,
    in_flight: bool,
    email_check: Debouncer<String>,
    email_checking: bool,
    email_status: Option<EmailStatus>,
}

impl FormController {
    pub fn create(api: Arc<dyn CandidateApi>) -> Self {
        Self::new(api, FormMode::Create, EMAIL_CHECK_DEBOUNCE)
    }

    pub fn edit(api: Arc<dyn CandidateApi>, id: CandidateId) -> Self {
        Self::new(api, FormMode::Edit(id), EMAIL_CHECK_DEBOUNCE)
    }

    pub fn new(api: Arc<dyn CandidateApi>, mode: FormMode, debounce: Duration) -> Self {
        Self {
            api,
            mode,
            draft: CandidateDraft::default(),
            errors: FieldErrors::new(),
            loading: false,
            loaded: mode == FormMode::Create,
            in_flight: false,
            email_check: Debouncer::new(debounce),
            email_checking: false,
            email_status: None,
        }
    }

    // ── read side ────────────────────────────────────────────────────────────

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Candidate"
        } else {
            "Add New Candidate"
        }
    }

    pub fn draft(&self) -> &CandidateDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn general_error(&self) -> Option<&str> {
        self.errors.get(&FieldKey::General)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// An availability check is waiting out its debounce or running now.
    pub fn is_checking_email(&self) -> bool {
        self.email_checking || self.email_check.is_pending()
    }

    /// Create mode only: the current email was reported as already registered.
    pub fn email_taken(&self) -> bool {
        !self.is_edit()
            && self
                .email_status
                .as_ref()
                .is_some_and(|s| s.exists && s.email == self.draft.email)
    }

    pub fn can_submit(&self) -> bool {
        self.loaded && !self.loading && !self.in_flight && !self.email_taken()
    }

    // ── loading ──────────────────────────────────────────────────────────────

    /// Edit mode: seeds the draft from the stored record. Create mode: no-op.
    pub async fn load(&mut self) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };
        self.loading = true;
        match self.api.get(id).await {
            Ok(candidate) => {
                self.draft = CandidateDraft::from_candidate(&candidate);
                self.errors.clear();
                self.loaded = true;
            }
            Err(e) => {
                error!("Error loading candidate {id}: {e}");
                self.errors = FieldErrors::general(LOAD_FAILED);
            }
        }
        self.loading = false;
    }

    // ── scalar fields ────────────────────────────────────────────────────────

    pub fn set_field(&mut self, field: CandidateField, value: impl Into<String>) {
        self.draft.set(field, value.into());
        self.errors.remove(&FieldKey::Candidate(field));
        if field == CandidateField::Email {
            self.on_email_changed();
        }
    }

    fn on_email_changed(&mut self) {
        self.email_check.cancel();
        if !self.is_edit() && self.draft.email.contains('@') {
            self.email_check.call(self.draft.email.clone());
        }
    }

    /// Waits for the debounced availability check and runs it. Returns
    /// `false` when no check was pending.
    pub async fn settle_email_check(&mut self) -> bool {
        let Some(email) = self.email_check.fired().await else {
            return false;
        };
        self.email_checking = true;
        let result = self.api.email_exists(&email).await;
        self.email_checking = false;

        match result {
            Ok(exists) if email == self.draft.email => {
                debug!("Email {email} exists: {exists}");
                self.email_status = Some(EmailStatus { email, exists });
            }
            Ok(_) => debug!("Ignoring availability result for stale email {email}"),
            Err(e) => warn!("Error checking email {email}: {e}"),
        }
        true
    }

    // ── work experience rows ─────────────────────────────────────────────────

    pub fn add_work_experience(&mut self) {
        self.draft
            .work_experiences
            .push(WorkExperienceDraft::default());
    }

    pub fn remove_work_experience(&mut self, index: usize) -> bool {
        if index >= self.draft.work_experiences.len() {
            return false;
        }
        self.draft.work_experiences.remove(index);
        self.errors.remove_work_row(index);
        true
    }

    pub fn set_work_field(&mut self, index: usize, field: WorkField, value: impl Into<String>) -> bool {
        let Some(entry) = self.draft.work_experiences.get_mut(index) else {
            return false;
        };
        entry.set(field, value.into());
        self.errors.remove(&FieldKey::Work(index, field));
        true
    }

    // ── education rows ───────────────────────────────────────────────────────

    pub fn add_education(&mut self) {
        self.draft.educations.push(EducationDraft::default());
    }

    pub fn remove_education(&mut self, index: usize) -> bool {
        if index >= self.draft.educations.len() {
            return false;
        }
        self.draft.educations.remove(index);
        self.errors.remove_education_row(index);
        true
    }

    pub fn set_education_field(
        &mut self,
        index: usize,
        field: EducationField,
        value: impl Into<String>,
    ) -> bool {
        let Some(entry) = self.draft.educations.get_mut(index) else {
            return false;
        };
        entry.set(field, value.into());
        self.errors.remove(&FieldKey::Education(index, field));
        true
    }

    // ── submission ───────────────────────────────────────────────────────────

    /// Replaces the error mapping with a fresh validation of the whole draft.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_draft(&self.draft, !self.is_edit(), self.email_taken());
        self.errors.is_empty()
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.in_flight || self.loading || !self.loaded {
            return SubmitOutcome::Blocked;
        }
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        self.in_flight = true;
        let result = match self.mode {
            FormMode::Create => self.api.create(&self.draft.to_payload(None)).await,
            FormMode::Edit(id) => self.api.update(id, &self.draft.to_payload(Some(id))).await,
        };
        self.in_flight = false;

        let action = if self.is_edit() { "update" } else { "create" };
        match result {
            Ok(saved) => {
                info!("Candidate {action}d successfully: {:?}", saved.id);
                if !self.is_edit() {
                    self.reset();
                }
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                error!("Error saving candidate: {e}");
                self.errors = match (e.field_errors(), e.backend_message()) {
                    (Some(fields), _) => FieldErrors::from_backend(fields),
                    (None, Some(message)) => FieldErrors::general(message),
                    (None, None) => FieldErrors::general(format!("Failed to {action} candidate")),
                };
                SubmitOutcome::Rejected
            }
        }
    }

    /// Back to an empty template.
    pub fn reset(&mut self) {
        self.draft = CandidateDraft::default();
        self.errors.clear();
        self.email_check.cancel();
        self.email_status = None;
    }
}
