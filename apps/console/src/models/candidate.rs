use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;

pub type CandidateId = i64;

/// A candidate record as exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CandidateId>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    pub phone: Option<String>,
    /// Comma-delimited free text.
    #[serde(deserialize_with = "null_as_default")]
    pub skills: String,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(deserialize_with = "null_as_default")]
    pub educations: Vec<Education>,
    /// Set when the record was created from an uploaded resume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_file_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    pub start_date: Option<NaiveDate>,
    /// `None` means the position is ongoing.
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    pub graduation_date: Option<NaiveDate>,
}

impl Candidate {
    /// Splits the free-text skills field into trimmed, non-empty tags.
    pub fn skill_tags(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn is_resume_sourced(&self) -> bool {
        self.original_file_path
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "this candidate"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_backend_record() {
        let json = r#"{
            "id": 12,
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": null,
            "skills": "Rust, SQL ,  ,Go",
            "workExperiences": [
                {"id": 3, "jobTitle": "Engineer", "company": "Analytical",
                 "startDate": "2020-01-01", "endDate": null, "description": "Engines"}
            ],
            "educations": null,
            "originalFilePath": "/uploads/ada.pdf"
        }"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, Some(12));
        assert!(candidate.phone.is_none());
        assert!(candidate.educations.is_empty());
        assert_eq!(candidate.skill_tags(), vec!["Rust", "SQL", "Go"]);
        assert_eq!(
            candidate.work_experiences[0].start_date,
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert!(candidate.work_experiences[0].end_date.is_none());
        assert!(candidate.is_resume_sourced());
    }

    #[test]
    fn test_serializes_camel_case_without_id() {
        let candidate = Candidate {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            work_experiences: vec![WorkExperience {
                job_title: "Admiral".to_string(),
                company: "Navy".to_string(),
                start_date: NaiveDate::from_ymd_opt(1943, 1, 1),
                ..Default::default()
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&candidate).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("originalFilePath").is_none());
        assert_eq!(value["workExperiences"][0]["jobTitle"], "Admiral");
        assert_eq!(value["workExperiences"][0]["startDate"], "1943-01-01");
    }

    #[test]
    fn test_display_name_falls_back_when_blank() {
        let candidate = Candidate::default();
        assert_eq!(candidate.display_name(), "this candidate");
        assert!(!candidate.is_resume_sourced());
    }
}
