use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::models::candidate::{Candidate, CandidateId, Education, WorkExperience};

/// Date format used by the date inputs and the wire format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ────────────────────────────────────────────────────────────────────────────
// Field identifiers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateField {
    Name,
    Email,
    Phone,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkField {
    JobTitle,
    Company,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EducationField {
    Institution,
    Degree,
    GraduationDate,
}

impl CandidateField {
    pub const ALL: [CandidateField; 4] = [
        CandidateField::Name,
        CandidateField::Email,
        CandidateField::Phone,
        CandidateField::Skills,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
            CandidateField::Skills => "skills",
        }
    }
}

impl WorkField {
    pub const ALL: [WorkField; 5] = [
        WorkField::JobTitle,
        WorkField::Company,
        WorkField::StartDate,
        WorkField::EndDate,
        WorkField::Description,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            WorkField::JobTitle => "jobTitle",
            WorkField::Company => "company",
            WorkField::StartDate => "startDate",
            WorkField::EndDate => "endDate",
            WorkField::Description => "description",
        }
    }
}

impl EducationField {
    pub const ALL: [EducationField; 3] = [
        EducationField::Institution,
        EducationField::Degree,
        EducationField::GraduationDate,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            EducationField::Institution => "institution",
            EducationField::Degree => "degree",
            EducationField::GraduationDate => "graduationDate",
        }
    }
}

/// Identifies the input an error message belongs to.
///
/// Repeatable rows are keyed by their current position; `FieldErrors`
/// re-indexes them when a row is removed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    General,
    Candidate(CandidateField),
    Work(usize, WorkField),
    Education(usize, EducationField),
    /// A backend key this client does not model; kept so the message is not lost.
    Other(String),
}

impl FieldKey {
    /// Parses backend keys such as `email` or `workExperiences[2].company`.
    pub fn parse(key: &str) -> FieldKey {
        if key == "general" {
            return FieldKey::General;
        }
        if let Some(field) = CandidateField::ALL.iter().find(|f| f.wire_name() == key) {
            return FieldKey::Candidate(*field);
        }
        if let Some((index, name)) = split_indexed(key, "workExperiences") {
            if let Some(field) = WorkField::ALL.iter().find(|f| f.wire_name() == name) {
                return FieldKey::Work(index, *field);
            }
        }
        if let Some((index, name)) = split_indexed(key, "educations") {
            if let Some(field) = EducationField::ALL.iter().find(|f| f.wire_name() == name) {
                return FieldKey::Education(index, *field);
            }
        }
        FieldKey::Other(key.to_string())
    }
}

/// `prefix[3].field` → `(3, "field")`
fn split_indexed<'a>(key: &'a str, prefix: &str) -> Option<(usize, &'a str)> {
    let rest = key.strip_prefix(prefix)?.strip_prefix('[')?;
    let (index, rest) = rest.split_once(']')?;
    let field = rest.strip_prefix('.')?;
    Some((index.parse().ok()?, field))
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::General => f.write_str("general"),
            FieldKey::Candidate(field) => f.write_str(field.wire_name()),
            FieldKey::Work(i, field) => write!(f, "workExperiences[{i}].{}", field.wire_name()),
            FieldKey::Education(i, field) => write!(f, "educations[{i}].{}", field.wire_name()),
            FieldKey::Other(key) => f.write_str(key),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Error mapping
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FieldKey, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(FieldKey::General, message);
        errors
    }

    /// Backend field errors, taken verbatim.
    pub fn from_backend(errors: &BTreeMap<String, String>) -> Self {
        Self(
            errors
                .iter()
                .map(|(k, v)| (FieldKey::parse(k), v.clone()))
                .collect(),
        )
    }

    pub fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &FieldKey) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &FieldKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drops errors of work row `index` and moves later rows' errors up one.
    pub fn remove_work_row(&mut self, index: usize) {
        self.reindex(|key| match key {
            FieldKey::Work(i, _) if i == index => None,
            FieldKey::Work(i, field) if i > index => Some(FieldKey::Work(i - 1, field)),
            other => Some(other),
        });
    }

    /// Drops errors of education row `index` and moves later rows' errors up one.
    pub fn remove_education_row(&mut self, index: usize) {
        self.reindex(|key| match key {
            FieldKey::Education(i, _) if i == index => None,
            FieldKey::Education(i, field) if i > index => Some(FieldKey::Education(i - 1, field)),
            other => Some(other),
        });
    }

    fn reindex(&mut self, remap: impl Fn(FieldKey) -> Option<FieldKey>) {
        let old = std::mem::take(&mut self.0);
        self.0 = old
            .into_iter()
            .filter_map(|(k, v)| remap(k).map(|k| (k, v)))
            .collect();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Draft records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkExperienceDraft {
    pub id: Option<i64>,
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationDraft {
    pub id: Option<i64>,
    pub institution: String,
    pub degree: String,
    pub graduation_date: String,
}

/// Client-only copy of a candidate while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub work_experiences: Vec<WorkExperienceDraft>,
    pub educations: Vec<EducationDraft>,
    /// Stored resume of the record being edited. Not editable, sent back as is.
    pub original_file_path: Option<String>,
}

impl WorkExperienceDraft {
    /// Rows without a title and a company are dropped on submit.
    pub fn is_blank(&self) -> bool {
        self.job_title.trim().is_empty() && self.company.trim().is_empty()
    }

    pub fn get(&self, field: WorkField) -> &str {
        match field {
            WorkField::JobTitle => &self.job_title,
            WorkField::Company => &self.company,
            WorkField::StartDate => &self.start_date,
            WorkField::EndDate => &self.end_date,
            WorkField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: WorkField, value: String) {
        match field {
            WorkField::JobTitle => self.job_title = value,
            WorkField::Company => self.company = value,
            WorkField::StartDate => self.start_date = value,
            WorkField::EndDate => self.end_date = value,
            WorkField::Description => self.description = value,
        }
    }

    fn from_record(record: &WorkExperience) -> Self {
        Self {
            id: record.id,
            job_title: record.job_title.clone(),
            company: record.company.clone(),
            start_date: format_input_date(record.start_date),
            end_date: format_input_date(record.end_date),
            description: record.description.clone().unwrap_or_default(),
        }
    }

    fn to_record(&self) -> WorkExperience {
        WorkExperience {
            id: self.id,
            job_title: self.job_title.trim().to_string(),
            company: self.company.trim().to_string(),
            start_date: parse_date(&self.start_date).ok().flatten(),
            end_date: parse_date(&self.end_date).ok().flatten(),
            description: non_empty(&self.description),
        }
    }
}

impl EducationDraft {
    /// Rows without an institution and a degree are dropped on submit.
    pub fn is_blank(&self) -> bool {
        self.institution.trim().is_empty() && self.degree.trim().is_empty()
    }

    pub fn get(&self, field: EducationField) -> &str {
        match field {
            EducationField::Institution => &self.institution,
            EducationField::Degree => &self.degree,
            EducationField::GraduationDate => &self.graduation_date,
        }
    }

    pub fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Institution => self.institution = value,
            EducationField::Degree => self.degree = value,
            EducationField::GraduationDate => self.graduation_date = value,
        }
    }

    fn from_record(record: &Education) -> Self {
        Self {
            id: record.id,
            institution: record.institution.clone(),
            degree: record.degree.clone(),
            graduation_date: format_input_date(record.graduation_date),
        }
    }

    fn to_record(&self) -> Education {
        Education {
            id: self.id,
            institution: self.institution.trim().to_string(),
            degree: self.degree.trim().to_string(),
            graduation_date: parse_date(&self.graduation_date).ok().flatten(),
        }
    }
}

impl CandidateDraft {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone().unwrap_or_default(),
            skills: candidate.skills.clone(),
            work_experiences: candidate
                .work_experiences
                .iter()
                .map(WorkExperienceDraft::from_record)
                .collect(),
            educations: candidate
                .educations
                .iter()
                .map(EducationDraft::from_record)
                .collect(),
            original_file_path: candidate.original_file_path.clone(),
        }
    }

    pub fn get(&self, field: CandidateField) -> &str {
        match field {
            CandidateField::Name => &self.name,
            CandidateField::Email => &self.email,
            CandidateField::Phone => &self.phone,
            CandidateField::Skills => &self.skills,
        }
    }

    pub fn set(&mut self, field: CandidateField, value: String) {
        match field {
            CandidateField::Name => self.name = value,
            CandidateField::Email => self.email = value,
            CandidateField::Phone => self.phone = value,
            CandidateField::Skills => self.skills = value,
        }
    }

    /// Builds the record sent to the backend. Blank rows are left out.
    pub fn to_payload(&self, id: Option<CandidateId>) -> Candidate {
        Candidate {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            skills: self.skills.trim().to_string(),
            work_experiences: self
                .work_experiences
                .iter()
                .filter(|w| !w.is_blank())
                .map(WorkExperienceDraft::to_record)
                .collect(),
            educations: self
                .educations
                .iter()
                .filter(|e| !e.is_blank())
                .map(EducationDraft::to_record)
                .collect(),
            original_file_path: self.original_file_path.clone(),
        }
    }
}

/// Empty input means "no date".
pub fn parse_date(text: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map(Some)
}

fn format_input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
