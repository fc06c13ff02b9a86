use crate::candidates::pagination::PaginationView;
use crate::candidates::ListController;
use crate::models::candidate::Candidate;
use crate::services::SortField;

use super::detail::plural;

const SKILLS_PREVIEW: usize = 50;

/// One table row, already reduced to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

impl RowSummary {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.map(|id| id.to_string()).unwrap_or_default(),
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate
                .phone
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            skills: skills_preview(&candidate.skills),
            experience: count_or_none(candidate.work_experiences.len(), "position"),
            education: count_or_none(candidate.educations.len(), "degree"),
        }
    }
}

fn skills_preview(skills: &str) -> String {
    if skills.is_empty() {
        return "N/A".to_string();
    }
    if skills.chars().count() > SKILLS_PREVIEW {
        let head: String = skills.chars().take(SKILLS_PREVIEW).collect();
        format!("{head}...")
    } else {
        skills.to_string()
    }
}

fn count_or_none(count: usize, noun: &str) -> String {
    if count == 0 {
        "None".to_string()
    } else {
        plural(count as i64, noun)
    }
}

/// Header, rows and pagination bar for the current page.
pub fn render_list(list: &ListController) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Candidates ({} total)\n",
        list.stats().total_candidates
    ));
    if let Some(notice) = list.notice() {
        out.push_str(&format!("{notice}\n"));
    }
    if let Some(error) = list.error() {
        out.push_str(&format!("Error: {error} (retry to reload)\n"));
    }
    if !list.search_term().is_empty() {
        out.push_str(&format!("Search: \"{}\"\n", list.search_term()));
    }
    out.push('\n');

    out.push_str(&format!(
        "{:<6} {:<24} {:<30} {:<16} {:<54} {:<12} {}\n",
        "ID",
        format!("Name {}", list.sort_indicator(SortField::Name)),
        format!("Email {}", list.sort_indicator(SortField::Email)),
        "Phone",
        "Skills",
        "Experience",
        "Education"
    ));

    if list.candidates().is_empty() {
        out.push_str(&format!("{}\n", list.empty_message()));
    }
    for row in list.candidates().iter().map(RowSummary::from_candidate) {
        out.push_str(&format!(
            "{:<6} {:<24} {:<30} {:<16} {:<54} {:<12} {}\n",
            row.id, row.name, row.email, row.phone, row.skills, row.experience, row.education
        ));
    }

    let pagination = list.pagination();
    if pagination.is_visible() {
        out.push('\n');
        out.push_str(&render_pagination(&pagination));
    }
    out
}

/// `« ‹ 1 2 [3] 4 5 › »` plus the "Showing X to Y of Z" line. Disabled
/// controls are rendered as `-`.
pub fn render_pagination(view: &PaginationView) -> String {
    let control = |label: &str, disabled: bool| {
        if disabled {
            "-".to_string()
        } else {
            label.to_string()
        }
    };
    let pages: Vec<String> = view
        .pages
        .iter()
        .map(|&p| {
            if p == view.current {
                format!("[{}]", p + 1)
            } else {
                (p + 1).to_string()
            }
        })
        .collect();
    format!(
        "{} {} {} {} {}\n{}\n",
        control("«", view.first_disabled),
        control("‹", view.previous_disabled),
        pages.join(" "),
        control("›", view.next_disabled),
        control("»", view.last_disabled),
        view.summary()
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::candidate::{Education, WorkExperience};
    use crate::test_support::{candidate, FakeCandidateApi};

    #[test]
    fn test_row_summary_fallbacks() {
        let row = RowSummary::from_candidate(&candidate(1, "Ada", "ada@example.com"));
        assert_eq!(row.phone, "N/A");
        assert_eq!(row.skills, "N/A");
        assert_eq!(row.experience, "None");
        assert_eq!(row.education, "None");
    }

    #[test]
    fn test_row_summary_counts_and_truncation() {
        let mut c = candidate(2, "Grace", "grace@example.com");
        c.phone = Some("555-0100".to_string());
        c.skills = "a".repeat(60);
        c.work_experiences = vec![WorkExperience::default(), WorkExperience::default()];
        c.educations = vec![Education::default()];

        let row = RowSummary::from_candidate(&c);
        assert_eq!(row.phone, "555-0100");
        assert_eq!(row.skills, format!("{}...", "a".repeat(50)));
        assert_eq!(row.experience, "2 positions");
        assert_eq!(row.education, "1 degree");
    }

    #[test]
    fn test_pagination_bar() {
        let view = PaginationView::new(0, 10, 3, 25);
        assert_eq!(
            render_pagination(&view),
            "- - [1] 2 3 › »\nShowing 1 to 10 of 25 candidates\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_list_page() {
        let people = (1..=12)
            .map(|i| candidate(i, &format!("Person {i:02}"), &format!("p{i}@example.com")))
            .collect();
        let api = Arc::new(FakeCandidateApi::with_candidates(people));
        let mut list = ListController::new(api);
        list.mount().await;

        let text = render_list(&list);
        assert!(text.starts_with("Candidates (12 total)\n"));
        assert!(text.contains("Person 01"));
        assert!(!text.contains("Person 11"));
        assert!(text.contains("Showing 1 to 10 of 12 candidates"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_empty_list() {
        let api = Arc::new(FakeCandidateApi::default());
        let mut list = ListController::new(api);
        list.mount().await;

        let text = render_list(&list);
        assert!(text.contains("No candidates available."));
        assert!(!text.contains("Showing"));
    }
}
