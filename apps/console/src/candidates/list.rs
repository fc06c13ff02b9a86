use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use super::pagination::PaginationView;
use super::Confirm;
use crate::errors::ApiError;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::page::{CandidatePage, CandidateStats};
use crate::services::{CandidateApi, PageQuery, SortDirection, SortField};
use crate::timer::Debouncer;

/// Page sizes offered by the size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 25, 50];
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

const LOAD_FAILED: &str = "Failed to load candidates. Please try again.";
const DELETE_FAILED: &str = "Failed to delete candidate. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

/// A list request that has been issued but whose response is not applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub query: PageQuery,
}

/// Owns the paginated, sortable, searchable candidate table.
///
/// Every change to page, size or sort goes through `refresh`, which fetches
/// exactly one page plus the aggregate stats. Search input is debounced and
/// either fetches in place (already on page 0) or resets to page 0 and takes
/// the same page-change path.
pub struct ListController {
    api: Arc<dyn CandidateApi>,
    query: PageQuery,
    candidates: Vec<Candidate>,
    total_elements: u64,
    total_pages: u32,
    stats: CandidateStats,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    search: Debouncer<()>,
    last_issued: u64,
}

impl ListController {
    pub fn new(api: Arc<dyn CandidateApi>) -> Self {
        Self::with_settings(api, PageQuery::default().size, SEARCH_DEBOUNCE)
    }

    pub fn with_settings(api: Arc<dyn CandidateApi>, page_size: u32, debounce: Duration) -> Self {
        Self {
            api,
            query: PageQuery {
                size: page_size.max(1),
                ..PageQuery::default()
            },
            candidates: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            stats: CandidateStats::default(),
            // Nothing is shown until the first page arrives.
            loading: true,
            error: None,
            notice: None,
            search: Debouncer::new(debounce),
            last_issued: 0,
        }
    }

    // ── read side ────────────────────────────────────────────────────────────

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn stats(&self) -> CandidateStats {
        self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.query.search
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn pagination(&self) -> PaginationView {
        PaginationView::new(
            self.query.page,
            self.query.size,
            self.total_pages,
            self.total_elements,
        )
    }

    pub fn sort_indicator(&self, field: SortField) -> &'static str {
        if self.query.sort_by != field {
            return "↕";
        }
        match self.query.sort_dir {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        if self.query.search.is_empty() {
            "No candidates available."
        } else {
            "No candidates found matching your search."
        }
    }

    // ── lifecycle ────────────────────────────────────────────────────────────

    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Opens the table at an explicit position, e.g. from command-line flags.
    pub async fn open(&mut self, query: PageQuery) {
        self.query = PageQuery {
            size: query.size.max(1),
            ..query
        };
        self.refresh().await;
    }

    /// Re-runs the last page fetch, e.g. from the error banner.
    pub async fn retry(&mut self) {
        self.load_page().await;
    }

    // ── navigation ───────────────────────────────────────────────────────────

    pub async fn go_to_page(&mut self, page: u32) {
        let page = if self.total_pages > 0 {
            page.min(self.total_pages - 1)
        } else {
            0
        };
        if page == self.query.page {
            return;
        }
        self.query.page = page;
        self.refresh().await;
    }

    pub async fn first_page(&mut self) {
        self.go_to_page(0).await;
    }

    pub async fn previous_page(&mut self) {
        if self.query.page > 0 {
            self.go_to_page(self.query.page - 1).await;
        }
    }

    pub async fn next_page(&mut self) {
        if self.query.page + 1 < self.total_pages {
            self.go_to_page(self.query.page + 1).await;
        }
    }

    pub async fn last_page(&mut self) {
        if self.total_pages > 0 {
            self.go_to_page(self.total_pages - 1).await;
        }
    }

    pub async fn set_page_size(&mut self, size: u32) {
        if size == 0 || (size == self.query.size && self.query.page == 0) {
            return;
        }
        self.query.size = size;
        self.query.page = 0;
        self.refresh().await;
    }

    /// Same column flips the direction; a new column starts ascending.
    pub async fn toggle_sort(&mut self, field: SortField) {
        self.query.sort_dir = if self.query.sort_by == field {
            self.query.sort_dir.flipped()
        } else {
            SortDirection::Asc
        };
        self.query.sort_by = field;
        self.query.page = 0;
        self.refresh().await;
    }

    // ── search ───────────────────────────────────────────────────────────────

    /// Records the new search text and restarts the debounce timer.
    pub fn on_search_input(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.search.call(());
    }

    /// Waits for the debounce timer and runs the search. Returns `false`
    /// when no search was pending.
    pub async fn settle_search(&mut self) -> bool {
        if self.search.fired().await.is_none() {
            return false;
        }
        self.run_search().await;
        true
    }

    async fn run_search(&mut self) {
        debug!("Searching candidates for '{}'", self.query.search);
        if self.query.page == 0 {
            self.load_page().await;
        } else {
            self.query.page = 0;
            self.refresh().await;
        }
    }

    // ── deletion ─────────────────────────────────────────────────────────────

    /// Deletes after confirmation. Rows are only removed by the refetch that
    /// follows a successful delete.
    pub async fn delete(
        &mut self,
        id: CandidateId,
        name: &str,
        confirm: &dyn Confirm,
    ) -> DeleteOutcome {
        self.notice = None;
        if !confirm.confirm(&format!("Are you sure you want to delete {name}?")) {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                self.load_page().await;
                self.load_stats().await;
                self.notice = Some("Candidate deleted successfully".to_string());
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("Error deleting candidate {id}: {e}");
                self.error = Some(DELETE_FAILED.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    // ── fetching ─────────────────────────────────────────────────────────────

    async fn refresh(&mut self) {
        self.load_page().await;
        self.load_stats().await;
    }

    async fn load_page(&mut self) {
        let request = self.begin_fetch();
        let result = self.api.list(&request.query).await;
        self.apply_page(request.seq, result);
    }

    /// Issues a new request number. Responses to earlier numbers are dropped.
    pub fn begin_fetch(&mut self) -> PageRequest {
        self.last_issued += 1;
        self.loading = true;
        self.error = None;
        PageRequest {
            seq: self.last_issued,
            query: self.query.clone(),
        }
    }

    /// Applies a list response. Returns `false` if a newer request superseded it.
    pub fn apply_page(&mut self, seq: u64, result: Result<CandidatePage, ApiError>) -> bool {
        if seq != self.last_issued {
            debug!(
                "Discarding stale page response #{seq} (latest is #{})",
                self.last_issued
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.candidates = page.content;
                self.total_elements = page.total_elements;
                self.total_pages = page.total_pages;
            }
            Err(e) => {
                // Keep the last good rows on screen.
                error!("Error loading candidates: {e}");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        true
    }

    async fn load_stats(&mut self) {
        match self.api.stats().await {
            Ok(stats) => self.stats = stats,
            Err(e) => warn!("Error loading stats: {e}"),
        }
    }
}
