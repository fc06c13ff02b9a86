use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;

use super::form::fill_form;
use super::prompt::Prompter;
use crate::candidates::list::PAGE_SIZE_OPTIONS;
use crate::candidates::{DeleteOutcome, FormController, ListController};
use crate::models::candidate::CandidateId;
use crate::services::{CandidateApi, SortField};
use crate::views::{render_candidate, render_list};

const HELP: &str = "\
Commands:
  n | p | f | l       next, previous, first, last page
  g <page>            go to page (1-based)
  size <n>            page size (5, 10, 25, 50)
  sort <column>       sort by id, name or email (again to flip)
  s [text]            search by name or email; blank clears
  v <id>              view a candidate on this page
  a                   add a candidate
  e <id>              edit a candidate
  d <id>              delete a candidate
  r                   reload after an error
  q                   quit";

/// Interactive table: one command per line until `q` or end of input.
pub async fn browse<R: BufRead, W: Write>(
    list: &mut ListController,
    api: Arc<dyn CandidateApi>,
    prompter: &Prompter<R, W>,
    today: NaiveDate,
) -> Result<()> {
    prompter.say(&render_list(list))?;
    prompter.say(HELP)?;

    while let Some(line) = prompter.read_line("> ")? {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "" => continue,
            "q" | "quit" => break,
            "h" | "help" => {
                prompter.say(HELP)?;
                continue;
            }
            "n" => list.next_page().await,
            "p" => list.previous_page().await,
            "f" => list.first_page().await,
            "l" => list.last_page().await,
            "r" => list.retry().await,
            "g" => match arg.parse::<u32>() {
                Ok(page) if page > 0 => list.go_to_page(page - 1).await,
                _ => {
                    prompter.say("Usage: g <page>")?;
                    continue;
                }
            },
            "size" => match arg.parse::<u32>() {
                Ok(size) if PAGE_SIZE_OPTIONS.contains(&size) => list.set_page_size(size).await,
                _ => {
                    prompter.say("Page size must be one of 5, 10, 25, 50")?;
                    continue;
                }
            },
            "sort" => match SortField::from_str(arg, true) {
                Ok(field) => list.toggle_sort(field).await,
                Err(_) => {
                    prompter.say("Usage: sort <id|name|email>")?;
                    continue;
                }
            },
            "s" => {
                list.on_search_input(arg);
                if list.is_search_pending() {
                    prompter.say("Searching...")?;
                }
                list.settle_search().await;
            }
            "v" => {
                let id = arg.parse::<CandidateId>().ok();
                let found = list.candidates().iter().find(|c| c.id.is_some() && c.id == id);
                prompter.say(&render_candidate(found, today))?;
                continue;
            }
            "a" => {
                let mut form = FormController::create(api.clone());
                if fill_form(&mut form, prompter).await?.is_none() {
                    continue;
                }
                list.mount().await;
            }
            "e" => {
                let Ok(id) = arg.parse::<CandidateId>() else {
                    prompter.say("Usage: e <id>")?;
                    continue;
                };
                let mut form = FormController::edit(api.clone(), id);
                form.load().await;
                if let Some(message) = form.general_error() {
                    prompter.say(message)?;
                    continue;
                }
                if fill_form(&mut form, prompter).await?.is_none() {
                    continue;
                }
                list.mount().await;
            }
            "d" => {
                let Ok(id) = arg.parse::<CandidateId>() else {
                    prompter.say("Usage: d <id>")?;
                    continue;
                };
                let name = list
                    .candidates()
                    .iter()
                    .find(|c| c.id == Some(id))
                    .map(|c| c.display_name().to_string())
                    .unwrap_or_else(|| format!("candidate {id}"));
                if list.delete(id, &name, prompter).await == DeleteOutcome::Cancelled {
                    continue;
                }
            }
            other => {
                prompter.say(&format!("Unknown command '{other}'. Type h for help."))?;
                continue;
            }
        }
        prompter.say(&render_list(list))?;
    }
    Ok(())
}
