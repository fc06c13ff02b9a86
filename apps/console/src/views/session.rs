use crate::auth::Session;

/// Who is signed in and against which backend. The token is never shown.
pub fn render_session(session: &Session, api_url: &str) -> String {
    let role = match session.role() {
        Some(role) if session.is_admin() => format!("{role} (administrator)"),
        Some(role) => role.to_string(),
        None => "none".to_string(),
    };
    format!(
        "Signed in as: {}\nRole: {role}\nBackend: {api_url}\n",
        session.username()
    )
}
