use super::draft::{
    parse_date, CandidateDraft, CandidateField, EducationField, FieldErrors, FieldKey, WorkField,
};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email format is invalid";
pub const EMAIL_TAKEN: &str = "Email address is already in use";
pub const COMPANY_REQUIRED: &str = "Company is required when job title is provided";
pub const JOB_TITLE_REQUIRED: &str = "Job title is required when company is provided";
pub const END_BEFORE_START: &str = "End date must be after start date";
pub const DEGREE_REQUIRED: &str = "Degree is required when institution is provided";
pub const INSTITUTION_REQUIRED: &str = "Institution is required when degree is provided";
pub const DATE_INVALID: &str = "Date must be in YYYY-MM-DD format";

/// Checks the whole draft at once and returns every problem found.
///
/// `email_taken` is only honoured when `check_email_taken` is set, i.e. in
/// create mode.
pub fn validate_draft(
    draft: &CandidateDraft,
    check_email_taken: bool,
    email_taken: bool,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.name.trim().is_empty() {
        errors.insert(FieldKey::Candidate(CandidateField::Name), NAME_REQUIRED);
    }

    let email_key = FieldKey::Candidate(CandidateField::Email);
    if draft.email.trim().is_empty() {
        errors.insert(email_key, EMAIL_REQUIRED);
    } else if !is_valid_email(&draft.email) {
        errors.insert(email_key, EMAIL_INVALID);
    } else if check_email_taken && email_taken {
        errors.insert(email_key, EMAIL_TAKEN);
    }

    for (index, entry) in draft.work_experiences.iter().enumerate() {
        let has_title = !entry.job_title.trim().is_empty();
        let has_company = !entry.company.trim().is_empty();
        if has_title && !has_company {
            errors.insert(FieldKey::Work(index, WorkField::Company), COMPANY_REQUIRED);
        }
        if has_company && !has_title {
            errors.insert(FieldKey::Work(index, WorkField::JobTitle), JOB_TITLE_REQUIRED);
        }

        let start = parse_date(&entry.start_date);
        let end = parse_date(&entry.end_date);
        if start.is_err() {
            errors.insert(FieldKey::Work(index, WorkField::StartDate), DATE_INVALID);
        }
        if end.is_err() {
            errors.insert(FieldKey::Work(index, WorkField::EndDate), DATE_INVALID);
        }
        if let (Ok(Some(start)), Ok(Some(end))) = (start, end) {
            if end < start {
                errors.insert(FieldKey::Work(index, WorkField::EndDate), END_BEFORE_START);
            }
        }
    }

    for (index, entry) in draft.educations.iter().enumerate() {
        let has_institution = !entry.institution.trim().is_empty();
        let has_degree = !entry.degree.trim().is_empty();
        if has_institution && !has_degree {
            errors.insert(
                FieldKey::Education(index, EducationField::Degree),
                DEGREE_REQUIRED,
            );
        }
        if has_degree && !has_institution {
            errors.insert(
                FieldKey::Education(index, EducationField::Institution),
                INSTITUTION_REQUIRED,
            );
        }
        if parse_date(&entry.graduation_date).is_err() {
            errors.insert(
                FieldKey::Education(index, EducationField::GraduationDate),
                DATE_INVALID,
            );
        }
    }

    errors
}

/// Basic `local@domain.tld` shape: some whitespace-free run must contain a
/// non-empty part before `@`, and a `.` after it with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    email.split_whitespace().any(|token| {
        let Some(at) = token.char_indices().skip(1).find(|&(_, c)| c == '@').map(|(i, _)| i) else {
            return false;
        };
        let domain = &token[at + 1..];
        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::draft::{EducationDraft, WorkExperienceDraft};

    fn draft() -> CandidateDraft {
        CandidateDraft {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        }
    }

    fn work(title: &str, company: &str, start: &str, end: &str) -> WorkExperienceDraft {
        WorkExperienceDraft {
            job_title: title.to_string(),
            company: company.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        let mut d = draft();
        d.work_experiences.push(work("Engineer", "Analytical", "2020-01-01", ""));
        d.work_experiences.push(WorkExperienceDraft::default());
        assert!(validate_draft(&d, true, false).is_empty());
    }

    #[test]
    fn test_name_and_email_required() {
        let errors = validate_draft(&CandidateDraft::default(), true, false);
        assert_eq!(
            errors.get(&FieldKey::Candidate(CandidateField::Name)),
            Some(NAME_REQUIRED)
        );
        assert_eq!(
            errors.get(&FieldKey::Candidate(CandidateField::Email)),
            Some(EMAIL_REQUIRED)
        );
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(is_valid_email("hi there a@b.c"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a @b.com"));
        assert!(!is_valid_email("plainaddress"));

        let mut d = draft();
        d.email = "not-an-email".to_string();
        assert_eq!(
            validate_draft(&d, true, false).get(&FieldKey::Candidate(CandidateField::Email)),
            Some(EMAIL_INVALID)
        );
    }

    #[test]
    fn test_taken_email_only_in_create_mode() {
        let errors = validate_draft(&draft(), true, true);
        assert_eq!(
            errors.get(&FieldKey::Candidate(CandidateField::Email)),
            Some(EMAIL_TAKEN)
        );
        assert!(validate_draft(&draft(), false, true).is_empty());
    }

    #[test]
    fn test_job_title_without_company() {
        let mut d = draft();
        d.work_experiences.push(work("Engineer", "", "2020-01-01", ""));
        let errors = validate_draft(&d, true, false);
        assert_eq!(
            errors.get(&FieldKey::Work(0, WorkField::Company)),
            Some(COMPANY_REQUIRED)
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_company_without_job_title() {
        let mut d = draft();
        d.work_experiences.push(WorkExperienceDraft::default());
        d.work_experiences.push(work("  ", "Initech", "", ""));
        let errors = validate_draft(&d, true, false);
        assert_eq!(
            errors.get(&FieldKey::Work(1, WorkField::JobTitle)),
            Some(JOB_TITLE_REQUIRED)
        );
    }

    #[test]
    fn test_end_before_start() {
        let mut d = draft();
        d.work_experiences
            .push(work("Engineer", "Initech", "2021-06-01", "2020-01-01"));
        let errors = validate_draft(&d, true, false);
        assert_eq!(
            errors.get(&FieldKey::Work(0, WorkField::EndDate)),
            Some(END_BEFORE_START)
        );
    }

    #[test]
    fn test_same_start_and_end_is_fine() {
        let mut d = draft();
        d.work_experiences
            .push(work("Engineer", "Initech", "2021-06-01", "2021-06-01"));
        assert!(validate_draft(&d, true, false).is_empty());
    }

    #[test]
    fn test_malformed_dates() {
        let mut d = draft();
        d.work_experiences
            .push(work("Engineer", "Initech", "June 2021", "2022-13-01"));
        d.educations.push(EducationDraft {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            graduation_date: "soon".to_string(),
            ..Default::default()
        });
        let errors = validate_draft(&d, true, false);
        assert_eq!(
            errors.get(&FieldKey::Work(0, WorkField::StartDate)),
            Some(DATE_INVALID)
        );
        assert_eq!(
            errors.get(&FieldKey::Work(0, WorkField::EndDate)),
            Some(DATE_INVALID)
        );
        assert_eq!(
            errors.get(&FieldKey::Education(0, EducationField::GraduationDate)),
            Some(DATE_INVALID)
        );
    }

    #[test]
    fn test_education_co_required() {
        let mut d = draft();
        d.educations.push(EducationDraft {
            institution: "MIT".to_string(),
            ..Default::default()
        });
        d.educations.push(EducationDraft {
            degree: "BSc".to_string(),
            ..Default::default()
        });
        let errors = validate_draft(&d, true, false);
        assert_eq!(
            errors.get(&FieldKey::Education(0, EducationField::Degree)),
            Some(DEGREE_REQUIRED)
        );
        assert_eq!(
            errors.get(&FieldKey::Education(1, EducationField::Institution)),
            Some(INSTITUTION_REQUIRED)
        );
    }
}
