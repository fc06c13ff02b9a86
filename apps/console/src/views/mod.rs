//! Plain-text renderers for the console. They only read state.

pub mod detail;
pub mod list;
pub mod session;
pub mod upload;

pub use detail::render_candidate;
pub use list::render_list;
pub use session::render_session;
pub use upload::render_profile;
