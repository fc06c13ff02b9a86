// REST services: one trait per backend resource, with a reqwest-backed
// implementation built on the shared `ApiClient`.
// Controllers hold `Arc<dyn ...>` so tests can swap in fakes.

pub mod candidates;
pub mod resumes;

pub use candidates::{CandidateApi, HttpCandidateService, PageQuery, SortDirection, SortField};
pub use resumes::{HttpResumeService, ResumeApi};
