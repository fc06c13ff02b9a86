use std::fmt;

/// The signed-in user. Created by a successful login, consumed by `logout`.
///
/// Views only ever see `&Session`; nothing mutates it after login.
pub struct Session {
    username: String,
    token: String,
    role: Option<String>,
}

impl Session {
    pub(crate) fn new(
        username: impl Into<String>,
        token: impl Into<String>,
        role: Option<String>,
    ) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.role()
            .is_some_and(|r| r.trim_start_matches("ROLE_").eq_ignore_ascii_case("admin"))
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

// Keeps the token out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new("testuser", "secret-token", Some("USER".to_string()));
        let rendered = format!("{session:?}");
        assert!(rendered.contains("testuser"));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn test_admin_role_variants() {
        assert!(Session::new("a", "t", Some("ROLE_ADMIN".to_string())).is_admin());
        assert!(Session::new("a", "t", Some("admin".to_string())).is_admin());
        assert!(!Session::new("a", "t", Some("USER".to_string())).is_admin());
        assert!(!Session::new("a", "t", None).is_admin());
    }
}
