use std::time::Duration;

use tracing::warn;

use super::{AuthApi, Credentials, Session};
use crate::errors::ApiError;
use crate::timer::Debouncer;

/// How long a login error stays visible before it clears itself.
pub const ERROR_DISPLAY: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAccount {
    Admin,
    User,
}

impl DemoAccount {
    fn credentials(self) -> Credentials {
        let (username, password) = match self {
            DemoAccount::Admin => ("admin", "admin123"),
            DemoAccount::User => ("testuser", "test123"),
        };
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// State behind the sign-in screen.
pub struct LoginForm {
    credentials: Credentials,
    in_flight: bool,
    error: Option<String>,
    error_expiry: Debouncer<()>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            credentials: Credentials::default(),
            in_flight: false,
            error: None,
            error_expiry: Debouncer::new(ERROR_DISPLAY),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.credentials.username = value.into();
        self.clear_error();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.credentials.password = value.into();
        self.clear_error();
    }

    pub fn fill_demo(&mut self, account: DemoAccount) {
        self.credentials = account.credentials();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_expiry.cancel();
    }

    /// Attempts the login. On failure the error is shown for `ERROR_DISPLAY`.
    pub async fn submit(&mut self, auth: &dyn AuthApi) -> Option<Session> {
        if self.in_flight {
            return None;
        }
        if self.credentials.username.trim().is_empty() || self.credentials.password.is_empty() {
            self.set_error("Username and password are required".to_string());
            return None;
        }

        self.in_flight = true;
        let result = auth.login(&self.credentials).await;
        self.in_flight = false;

        match result {
            Ok(session) => {
                self.clear_error();
                Some(session)
            }
            Err(e) => {
                warn!("Login failed for {}: {e}", self.credentials.username);
                self.set_error(login_error_message(&e));
                None
            }
        }
    }

    /// Waits for the error display period to end, then clears the error.
    pub async fn expire_error(&mut self) {
        if self.error_expiry.fired().await.is_some() {
            self.error = None;
        }
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.error_expiry.call(());
    }
}

fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Invalid username or password".to_string(),
        other => other
            .backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| "Login failed. Please try again.".to_string()),
    }
}
