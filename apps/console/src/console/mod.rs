//! `talent-console` command line: sign in, run one command, sign out.

pub mod browse;
pub mod form;
pub mod prompt;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use crate::api_client::ApiClient;
use crate::auth::login_form::DemoAccount;
use crate::auth::{self, HttpAuthService, LoginForm, Session};
use crate::candidates::list::PAGE_SIZE_OPTIONS;
use crate::candidates::{FormController, ListController};
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::candidate::CandidateId;
use crate::resumes::UploadController;
use crate::services::{PageQuery, SortDirection, SortField};
use crate::state::AppState;
use crate::views::{render_candidate, render_list, render_profile, render_session};

use self::prompt::Prompter;

#[derive(Debug, Parser)]
#[command(name = "talent-console", about = "Manage candidates from the terminal", version)]
pub struct Cli {
    /// Account name. Falls back to `TALENT_USERNAME`.
    #[arg(long, short = 'u', global = true)]
    username: Option<String>,
    /// Account password. Falls back to `TALENT_PASSWORD`.
    #[arg(long, short = 'p', global = true)]
    password: Option<String>,
    /// Sign in with one of the demo accounts.
    #[arg(long, value_enum, global = true)]
    demo: Option<DemoArg>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DemoArg {
    Admin,
    User,
}

impl From<DemoArg> for DemoAccount {
    fn from(arg: DemoArg) -> Self {
        match arg {
            DemoArg::Admin => DemoAccount::Admin,
            DemoArg::User => DemoAccount::User,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of candidates.
    List {
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rows per page (5, 10, 25 or 50). Defaults to `DEFAULT_PAGE_SIZE`.
        #[arg(long)]
        size: Option<u32>,
        #[arg(long, value_enum, default_value_t = SortField::Id)]
        sort: SortField,
        #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
        dir: SortDirection,
        /// Filter by name or email.
        #[arg(long, default_value = "")]
        search: String,
        /// Keep the table open and read commands from stdin.
        #[arg(long, short = 'i')]
        interactive: bool,
    },
    /// Show one candidate.
    Show { id: CandidateId },
    /// Look a candidate up by email address.
    Find { email: String },
    /// Create a candidate interactively.
    Add,
    /// Edit a candidate interactively.
    Edit { id: CandidateId },
    /// Delete a candidate after confirmation.
    Delete { id: CandidateId },
    /// Upload a resume and show what the backend extracted.
    Upload {
        file: PathBuf,
        /// Also print the raw text the backend read.
        #[arg(long)]
        raw: bool,
    },
    /// Show aggregate numbers.
    Stats,
    /// Show the signed-in account.
    Whoami,
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let session = login(&cli, &config).await?;
    info!(
        "Signed in as {} ({})",
        session.username(),
        if session.is_admin() { "admin" } else { session.role().unwrap_or("no role") }
    );

    let state = AppState::new(config, session)?;
    let result = dispatch(cli.command, &state).await;
    auth::logout(state.session);
    result
}

async fn login(cli: &Cli, config: &Config) -> Result<Session> {
    let mut form = LoginForm::new();
    if let Some(account) = cli.demo {
        form.fill_demo(account.into());
    } else {
        let username = cli.username.clone().or_else(|| config.username.clone());
        let password = cli.password.clone().or_else(|| config.password.clone());
        let (Some(username), Some(password)) = (username, password) else {
            bail!("No credentials given. Use --username/--password, --demo, or TALENT_USERNAME/TALENT_PASSWORD");
        };
        form.set_username(username);
        form.set_password(password);
    }

    let client = ApiClient::new(&config.api_url, config.http_timeout)
        .context("Invalid TALENT_API_URL")?;
    debug!("Signing in at {}", client.base_url());
    let service = HttpAuthService::new(client);
    match form.submit(&service).await {
        Some(session) => Ok(session),
        None => bail!(form.error().unwrap_or("Login failed").to_string()),
    }
}

async fn dispatch(command: Command, state: &AppState) -> Result<()> {
    let today = today();
    let prompter = Prompter::stdio();

    match command {
        Command::List {
            page,
            size,
            sort,
            dir,
            search,
            interactive,
        } => {
            let size = size.unwrap_or(state.config.default_page_size);
            if !PAGE_SIZE_OPTIONS.contains(&size) {
                bail!("Page size must be one of 5, 10, 25, 50");
            }
            let mut list = ListController::with_settings(
                state.candidates.clone(),
                size,
                state.config.search_debounce,
            );
            let query = PageQuery {
                page: page.saturating_sub(1),
                size,
                sort_by: sort,
                sort_dir: dir,
                search,
            };
            if query == (PageQuery { size, ..PageQuery::default() }) {
                list.mount().await;
            } else {
                list.open(query).await;
            }
            if interactive {
                browse::browse(&mut list, state.candidates.clone(), &prompter, today).await?;
            } else {
                prompter.say(&render_list(&list))?;
            }
        }
        Command::Show { id } => {
            let candidate = match state.candidates.get(id).await {
                Ok(candidate) => Some(candidate),
                Err(ApiError::NotFound(_)) => None,
                Err(e) => return Err(backend_error(e, "Failed to load candidate")),
            };
            prompter.say(&render_candidate(candidate.as_ref(), today))?;
        }
        Command::Find { email } => {
            let candidate = match state.candidates.find_by_email(&email).await {
                Ok(candidate) => Some(candidate),
                Err(ApiError::NotFound(_)) => None,
                Err(e) => return Err(backend_error(e, "Failed to search by email")),
            };
            prompter.say(&render_candidate(candidate.as_ref(), today))?;
        }
        Command::Add => {
            let mut form = FormController::create(state.candidates.clone());
            if let Some(saved) = form::fill_form(&mut form, &prompter).await? {
                prompter.say(&render_candidate(Some(&saved), today))?;
            }
        }
        Command::Edit { id } => {
            let mut form = FormController::edit(state.candidates.clone(), id);
            form.load().await;
            if let Some(message) = form.general_error() {
                bail!(message.to_string());
            }
            if let Some(saved) = form::fill_form(&mut form, &prompter).await? {
                prompter.say(&render_candidate(Some(&saved), today))?;
            }
        }
        Command::Delete { id } => {
            let name = match state.candidates.get(id).await {
                Ok(candidate) => candidate.display_name().to_string(),
                Err(ApiError::NotFound(_)) => bail!("Candidate {id} not found"),
                Err(e) => return Err(backend_error(e, "Failed to load candidate")),
            };
            let mut list = ListController::with_settings(
                state.candidates.clone(),
                state.config.default_page_size,
                state.config.search_debounce,
            );
            list.delete(id, &name, &prompter).await;
            if let Some(error) = list.error() {
                bail!(error.to_string());
            }
            if let Some(notice) = list.notice() {
                prompter.say(notice)?;
            }
        }
        Command::Upload { file, raw } => {
            let mut upload = UploadController::new(state.resumes.clone());
            upload
                .select_file(&file)
                .await
                .with_context(|| format!("Cannot read {}", file.display()))?;
            if let Some(name) = upload.selected_name().filter(|_| upload.can_upload()) {
                prompter.say(&format!("Uploading {name}..."))?;
            }
            match upload.upload().await {
                Some(profile) => prompter.say(&render_profile(profile, raw, today))?,
                None => bail!(upload.error().unwrap_or("Upload failed").to_string()),
            }
        }
        Command::Stats => {
            let stats = state
                .candidates
                .stats()
                .await
                .map_err(|e| backend_error(e, "Failed to load stats"))?;
            prompter.say(&format!("Total candidates: {}", stats.total_candidates))?;
        }
        Command::Whoami => {
            prompter.say(&render_session(&state.session, &state.config.api_url))?;
        }
    }
    Ok(())
}

fn backend_error(error: ApiError, action: &str) -> anyhow::Error {
    if error.is_transport() {
        anyhow::Error::new(error).context(format!("{action}: cannot reach the backend"))
    } else {
        anyhow::Error::new(error).context(action.to_string())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
