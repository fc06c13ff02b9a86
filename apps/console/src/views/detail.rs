use chrono::NaiveDate;

use crate::models::candidate::Candidate;

pub const NOT_FOUND: &str = "Candidate data not found.";

/// Long US form, e.g. "January 5, 2020". A missing date is an ongoing one.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => "Present".to_string(),
    }
}

/// Coarse length of a position: 30-day months, 12-month years. An open end
/// date counts up to `today`.
pub fn duration(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(start) = start else {
        return String::new();
    };
    let end = end.unwrap_or(today);
    let days = (end - start).num_days().abs();
    let months = days / 30;
    let years = months / 12;
    let remaining = months % 12;

    match (years, remaining) {
        (0, 0) => "Less than a month".to_string(),
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{}, {}", plural(y, "year"), plural(m, "month")),
    }
}

pub(crate) fn plural(count: impl Into<i64>, noun: &str) -> String {
    let count = count.into();
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Full profile page. `today` closes ongoing positions for the duration maths.
pub fn render_candidate(candidate: Option<&Candidate>, today: NaiveDate) -> String {
    let Some(candidate) = candidate else {
        return format!("{NOT_FOUND}\n");
    };

    let mut out = String::new();
    out.push_str("== Basic Information ==\n");
    out.push_str(&format!("Full Name: {}\n", candidate.name));
    out.push_str(&format!("Email:     {}\n", candidate.email));
    out.push_str(&format!(
        "Phone:     {}\n",
        candidate
            .phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or("Not provided")
    ));
    let tags = candidate.skill_tags();
    if tags.is_empty() {
        out.push_str("Skills:    No skills listed\n");
    } else {
        let tags: Vec<String> = tags.iter().map(|t| format!("[{t}]")).collect();
        out.push_str(&format!("Skills:    {}\n", tags.join(" ")));
    }

    let jobs = &candidate.work_experiences;
    out.push_str(&format!(
        "\n== Work Experience ({}) ==\n",
        plural(jobs.len() as i64, "position")
    ));
    if jobs.is_empty() {
        out.push_str("No work experience information available.\n");
    }
    for job in jobs {
        out.push_str(&format!("* {} at {}\n", job.job_title, job.company));
        out.push_str(&format!(
            "  {} - {}",
            format_date(job.start_date),
            format_date(job.end_date)
        ));
        if job.start_date.is_some() {
            out.push_str(&format!(" ({})", duration(job.start_date, job.end_date, today)));
        }
        out.push('\n');
        if let Some(description) = job.description.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str(&format!("  {description}\n"));
        }
    }

    let schools = &candidate.educations;
    out.push_str(&format!(
        "\n== Education ({}) ==\n",
        plural(schools.len() as i64, "degree")
    ));
    if schools.is_empty() {
        out.push_str("No education information available.\n");
    }
    for school in schools {
        out.push_str(&format!("* {}, {}\n", school.degree, school.institution));
        out.push_str(&format!(
            "  Graduated: {}\n",
            format_date(school.graduation_date)
        ));
    }

    out.push_str("\n== Additional Information ==\n");
    if let Some(id) = candidate.id {
        out.push_str(&format!("Candidate ID: {id}\n"));
    }
    if candidate.is_resume_sourced() {
        out.push_str("Data Source:  Resume Upload\n");
        if let Some(path) = &candidate.original_file_path {
            out.push_str(&format!("Original File: {path}\n"));
        }
    } else {
        out.push_str("Data Source:  Manual Entry\n");
    }
    out
}
