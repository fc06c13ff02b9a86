use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// Profile fields the backend extracted from an uploaded resume.
///
/// The extraction itself is opaque; the response is a candidate-shaped record,
/// optionally accompanied by the raw text the backend read from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProfile {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}
