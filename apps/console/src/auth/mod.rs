// Authentication: login against the backend, the session context it yields,
// and the state behind the login screen.

pub mod login_form;
pub mod session;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api_client::ApiClient;
use crate::errors::ApiError;

pub use login_form::LoginForm;
pub use session::Session;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// Exchanges credentials for a session.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError>;
}

pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthApi for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let response: LoginResponse = self
            .api
            .send_json(Method::POST, "auth/login", credentials)
            .await?;
        let username = response
            .username
            .unwrap_or_else(|| credentials.username.clone());
        info!("Signed in as {username}");
        Ok(Session::new(username, response.token, response.role))
    }
}

/// Ends the session. The token is dropped with it.
pub fn logout(session: Session) {
    info!("Signed out {}", session.username());
}
