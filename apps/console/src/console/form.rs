use std::io::{BufRead, Write};

use anyhow::Result;

use super::prompt::Prompter;
use crate::candidates::draft::{CandidateField, EducationField, WorkField};
use crate::candidates::{FormController, FormMode, SubmitOutcome};
use crate::models::candidate::Candidate;

const CLEAR: &str = "-";

fn candidate_label(field: CandidateField) -> &'static str {
    match field {
        CandidateField::Name => "Full Name",
        CandidateField::Email => "Email",
        CandidateField::Phone => "Phone",
        CandidateField::Skills => "Skills (comma separated)",
    }
}

fn work_label(field: WorkField) -> &'static str {
    match field {
        WorkField::JobTitle => "  Job Title",
        WorkField::Company => "  Company",
        WorkField::StartDate => "  Start Date (YYYY-MM-DD)",
        WorkField::EndDate => "  End Date (YYYY-MM-DD, blank if current)",
        WorkField::Description => "  Description",
    }
}

fn education_label(field: EducationField) -> &'static str {
    match field {
        EducationField::Institution => "  Institution",
        EducationField::Degree => "  Degree",
        EducationField::GraduationDate => "  Graduation Date (YYYY-MM-DD)",
    }
}

/// `-` clears a field; anything else replaces it.
fn answer_value(answer: String) -> String {
    if answer == CLEAR {
        String::new()
    } else {
        answer
    }
}

/// Walks the operator through the form until it is saved or abandoned.
pub async fn fill_form<R: BufRead, W: Write>(
    form: &mut FormController,
    prompter: &Prompter<R, W>,
) -> Result<Option<Candidate>> {
    if !form.can_submit() {
        let reason = form
            .general_error()
            .unwrap_or("The form cannot be submitted right now.");
        prompter.say(reason)?;
        return Ok(None);
    }
    prompter.say(&format!(
        "{}\nPress Enter to keep a value, '{CLEAR}' to clear it.",
        form.title()
    ))?;

    loop {
        edit_basics(form, prompter).await?;
        edit_work_experiences(form, prompter)?;
        edit_educations(form, prompter)?;

        match form.submit().await {
            SubmitOutcome::Saved(candidate) => {
                let message = match form.mode() {
                    FormMode::Create => "Candidate created successfully!".to_string(),
                    FormMode::Edit(id) => format!("Candidate {id} updated successfully!"),
                };
                prompter.say(&message)?;
                return Ok(Some(candidate));
            }
            SubmitOutcome::Blocked => {
                prompter.say("The form cannot be submitted right now.")?;
                return Ok(None);
            }
            SubmitOutcome::Invalid | SubmitOutcome::Rejected => {
                prompter.say("Please fix the following:")?;
                for (key, message) in form.errors().iter() {
                    prompter.say(&format!("  {key}: {message}"))?;
                }
                if !prompter.yes_no("Edit and try again?", true)? {
                    return Ok(None);
                }
            }
        }
    }
}

async fn edit_basics<R: BufRead, W: Write>(
    form: &mut FormController,
    prompter: &Prompter<R, W>,
) -> Result<()> {
    for field in CandidateField::ALL {
        let current = form.draft().get(field).to_string();
        let Some(answer) = prompter.ask(candidate_label(field), &current)? else {
            continue;
        };
        form.set_field(field, answer_value(answer));

        if field == CandidateField::Email && form.is_checking_email() {
            prompter.say("  Checking availability...")?;
            form.settle_email_check().await;
            if form.email_taken() {
                prompter.say("  This email is already registered.")?;
            }
        }
    }
    Ok(())
}

fn edit_work_experiences<R: BufRead, W: Write>(
    form: &mut FormController,
    prompter: &Prompter<R, W>,
) -> Result<()> {
    let mut index = 0;
    while index < form.draft().work_experiences.len() {
        let entry = &form.draft().work_experiences[index];
        let summary = format!(
            "Work experience #{}: {} at {}",
            index + 1,
            entry.job_title,
            entry.company
        );
        if !prompter.yes_no(&format!("{summary}. Keep it?"), true)? {
            form.remove_work_experience(index);
            continue;
        }
        if prompter.yes_no("  Edit it?", false)? {
            prompt_work_row(form, prompter, index)?;
        }
        index += 1;
    }

    while prompter.yes_no("Add a work experience?", false)? {
        form.add_work_experience();
        let index = form.draft().work_experiences.len() - 1;
        prompt_work_row(form, prompter, index)?;
    }
    Ok(())
}

fn prompt_work_row<R: BufRead, W: Write>(
    form: &mut FormController,
    prompter: &Prompter<R, W>,
    index: usize,
) -> Result<()> {
    for field in WorkField::ALL {
        let current = form.draft().work_experiences[index].get(field).to_string();
        if let Some(answer) = prompter.ask(work_label(field), &current)? {
            form.set_work_field(index, field, answer_value(answer));
        }
    }
    Ok(())
}

fn edit_educations<R: BufRead, W: Write>(
    form: &mut FormController,
    prompter: &Prompter<R, W>,
) -> Result<()> {
    let mut index = 0;
    while index < form.draft().educations.len() {
        let entry = &form.draft().educations[index];
        let summary = format!(
            "Education #{}: {}, {}",
            index + 1,
            entry.degree,
            entry.institution
        );
        if !prompter.yes_no(&format!("{summary}. Keep it?"), true)? {
            form.remove_education(index);
            continue;
        }
        if prompter.yes_no("  Edit it?", false)? {
            prompt_education_row(form, prompter, index)?;
        }
        index += 1;
    }

    while prompter.yes_no("Add an education?", false)? {
        form.add_education();
        let index = form.draft().educations.len() - 1;
        prompt_education_row(form, prompter, index)?;
    }
    Ok(())
}

fn prompt_education_row<R: BufRead, W: Write>(
    form: &mut FormController,
    prompter: &Prompter<R, W>,
    index: usize,
) -> Result<()> {
    for field in EducationField::ALL {
        let current = form.draft().educations[index].get(field).to_string();
        if let Some(answer) = prompter.ask(education_label(field), &current)? {
            form.set_education_field(index, field, answer_value(answer));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::console::prompt::scripted;
    use crate::models::candidate::Education;
    use crate::test_support::{candidate, Call, FakeCandidateApi};

    #[tokio::test(start_paused = true)]
    async fn test_create_with_one_job() {
        let api = Arc::new(FakeCandidateApi::default());
        let mut form = FormController::create(api.clone());
        let prompter = scripted(&[
            "Ada Lovelace",
            "ada@example.com",
            "",
            "Rust, Maths",
            "y",
            "Engineer",
            "Analytical Engines",
            "2020-01-01",
            "",
            "",
            "n",
            "n",
        ]);

        let saved = fill_form(&mut form, &prompter).await.unwrap().unwrap();
        assert_eq!(saved.name, "Ada Lovelace");
        assert_eq!(saved.work_experiences.len(), 1);
        assert_eq!(saved.work_experiences[0].company, "Analytical Engines");
        assert!(saved.educations.is_empty());
        assert_eq!(
            api.count(|c| matches!(c, Call::EmailExists(e) if e == "ada@example.com")),
            1
        );
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert!(out.contains("  Checking availability..."));
        assert!(out.contains("Candidate created successfully!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_then_abandon() {
        let api = Arc::new(FakeCandidateApi::default());
        let mut form = FormController::create(api.clone());
        let prompter = scripted(&["", "", "", "", "n", "n", "n"]);

        assert!(fill_form(&mut form, &prompter).await.unwrap().is_none());
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert!(out.contains("  name: Name is required"));
        assert!(out.contains("  email: Email is required"));
        assert_eq!(api.count(|c| matches!(c, Call::Create(_))), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_drops_education_and_keeps_rest() {
        let mut stored = candidate(5, "Grace", "grace@example.com");
        stored.educations.push(Education {
            institution: "Yale".to_string(),
            degree: "PhD".to_string(),
            ..Default::default()
        });
        let api = Arc::new(FakeCandidateApi::with_candidates(vec![stored]));
        let mut form = FormController::edit(api.clone(), 5);
        form.load().await;

        // Keep every scalar, no jobs to add, drop the education, add none.
        let prompter = scripted(&["", "", "", "-", "n", "n", "n"]);
        let saved = fill_form(&mut form, &prompter).await.unwrap().unwrap();
        assert_eq!(saved.id, Some(5));
        assert_eq!(saved.email, "grace@example.com");
        assert!(saved.educations.is_empty());
        assert_eq!(api.count(|c| matches!(c, Call::EmailExists(_))), 0);
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert!(out.contains("Candidate 5 updated successfully!"));
        assert!(!out.contains("Checking availability"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unloaded_edit_asks_nothing() {
        let api = Arc::new(FakeCandidateApi::default());
        let mut form = FormController::edit(api.clone(), 42);
        form.load().await;

        let prompter = scripted(&[]);
        assert!(fill_form(&mut form, &prompter).await.unwrap().is_none());
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(out, "Failed to load candidate data\n");
        assert_eq!(api.count(|c| matches!(c, Call::Update(..))), 0);
    }
}
