//! Candidate list, pagination and the create/edit form.

pub mod draft;
pub mod form;
pub mod list;
pub mod pagination;
pub mod validation;

pub use form::{FormController, FormMode, SubmitOutcome};
pub use list::{DeleteOutcome, ListController};

/// Asks the operator a yes/no question before a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
