//! Resume upload screen.

pub mod upload;

pub use upload::{UploadController, NO_FILE_SELECTED};
