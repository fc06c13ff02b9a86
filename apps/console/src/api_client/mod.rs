/// API Client — the single point of entry for all REST backend calls.
///
/// Services build requests through this module only; it owns the base URL,
/// the bearer token of the current session and the mapping of error bodies
/// onto `ApiError`.
use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::Session;
use crate::errors::ApiError;

/// Attempts made for idempotent reads before giving up.
const MAX_READ_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 250;

/// Error body shape used by the backend for rejected requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    field_errors: Option<BTreeMap<String, String>>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        // `Url::join` drops the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            token: None,
        })
    }

    /// Returns a client that sends the session's bearer token on every call.
    pub fn authenticated(&self, session: &Session) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(session.token().to_string()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET with query parameters, deserializing the JSON response.
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..MAX_READ_ATTEMPTS {
            if attempt > 0 {
                let delay = Duration::from_millis(RETRY_BASE_DELAY_MS * (1 << (attempt - 1)));
                warn!(
                    "GET {} attempt {} failed, retrying after {}ms...",
                    url.path(),
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .request(Method::GET, url.clone())
                .query(query)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ApiError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(error_from_body(status, &body));
                continue;
            }

            return read_json(response).await;
        }

        Err(last_error.unwrap_or_else(|| ApiError::Api {
            status: 0,
            message: format!("GET {} failed after {MAX_READ_ATTEMPTS} attempts", url.path()),
            field_errors: BTreeMap::new(),
        }))
    }

    /// POST/PUT a JSON body, deserializing the JSON response.
    pub async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url.path());
        let response = self.request(method, url).json(body).send().await?;
        read_json(response).await
    }

    /// DELETE; any 2xx counts as success and the body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        debug!("DELETE {}", url.path());
        let response = self.request(Method::DELETE, url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_body(status, &body))
    }

    /// Multipart upload of a single file under the `file` form field.
    pub async fn upload<T>(&self, path: &str, file_name: &str, bytes: Vec<u8>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {} (multipart, {} bytes)", url.path(), bytes.len());
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let response = self
            .request(Method::POST, url)
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(error_from_body(status, &String::from_utf8_lossy(&body)));
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Maps a non-success response onto `ApiError`, keeping backend messages verbatim.
fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let field_errors = parsed
        .as_ref()
        .and_then(|b| b.field_errors.clone())
        .unwrap_or_default();
    let message = parsed
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND if field_errors.is_empty() => ApiError::NotFound(message),
        _ => ApiError::Api {
            status: status.as_u16(),
            message,
            field_errors,
        },
    }
}
