use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::errors::ApiError;
use crate::models::resume::ExtractedProfile;
use crate::services::ResumeApi;

pub const NO_FILE_SELECTED: &str = "Please select a file first!";
const UPLOAD_FAILED: &str = "Failed to upload resume";

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
}

/// Holds one selected file and the last extraction result.
pub struct UploadController {
    api: Arc<dyn ResumeApi>,
    selected: Option<SelectedFile>,
    uploading: bool,
    error: Option<String>,
    profile: Option<ExtractedProfile>,
}

impl UploadController {
    pub fn new(api: Arc<dyn ResumeApi>) -> Self {
        Self {
            api,
            selected: None,
            uploading: false,
            error: None,
            profile: None,
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|f| f.name.as_str())
    }

    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.uploading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reads `path` into memory, replacing any earlier selection.
    pub async fn select_file(&mut self, path: &Path) -> Result<(), ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        info!("Selected file: {name} ({} bytes)", bytes.len());
        self.selected = Some(SelectedFile { name, bytes });
        self.error = None;
        Ok(())
    }

    /// Sends the selected file. Without a selection nothing is sent.
    pub async fn upload(&mut self) -> Option<&ExtractedProfile> {
        let Some(file) = self.selected.clone() else {
            self.error = Some(NO_FILE_SELECTED.to_string());
            return None;
        };
        if self.uploading {
            return None;
        }

        info!("Uploading file: {}", file.name);
        self.uploading = true;
        self.error = None;
        let result = self.api.upload(&file.name, file.bytes).await;
        self.uploading = false;

        match result {
            Ok(profile) => {
                self.profile = Some(profile);
                self.profile.as_ref()
            }
            Err(e) => {
                error!("Error uploading {}: {e}", file.name);
                self.error = Some(
                    e.backend_message()
                        .map_or_else(|| UPLOAD_FAILED.to_string(), str::to_string),
                );
                None
            }
        }
    }
}
