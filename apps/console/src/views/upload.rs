use chrono::NaiveDate;

use crate::models::resume::ExtractedProfile;

use super::detail::render_candidate;

/// Shows what the backend pulled out of a resume. The raw text is a debug
/// aid and only printed on request.
pub fn render_profile(profile: &ExtractedProfile, show_raw: bool, today: NaiveDate) -> String {
    let mut out = String::from("Resume processed. Extracted profile:\n\n");
    out.push_str(&render_candidate(Some(&profile.candidate), today));

    if show_raw {
        out.push_str("\n== Raw Text ==\n");
        match profile.raw_text.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                out.push_str(text);
                if !text.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => out.push_str("(the backend returned no raw text)\n"),
        }
    }
    out
}
