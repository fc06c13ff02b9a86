use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::null_as_default;

/// One page of candidates as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidatePage {
    #[serde(deserialize_with = "null_as_default")]
    pub content: Vec<Candidate>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_elements: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateStats {
    pub total_candidates: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct EmailCheck {
    #[serde(default)]
    pub exists: bool,
}
