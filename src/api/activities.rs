use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::models::activity::ActivityCatalog;

/// What the server said about a signup or unregister request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    /// 2xx with `{message}`.
    Confirmed(String),
    /// Non-2xx with an optional `{detail}`.
    Rejected(Option<String>),
}

#[async_trait]
pub trait ActivityApi: Send + Sync {
    async fn fetch_activities(&self) -> ClientResult<ActivityCatalog>;
    async fn signup(&self, activity: &str, email: &str) -> ClientResult<ApiReply>;
    async fn unregister(&self, activity: &str, email: &str) -> ClientResult<ApiReply>;
}

#[derive(Deserialize)]
struct SuccessBody {
    message: String,
}

#[derive(Deserialize)]
struct FailureBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Turns a mutation response into an [`ApiReply`]. A body that is not the
/// expected JSON is a malformed response, whatever the status.
pub fn parse_reply(status: StatusCode, body: &str) -> ClientResult<ApiReply> {
    if status.is_success() {
        let ok: SuccessBody = serde_json::from_str(body)?;
        return Ok(ApiReply::Confirmed(ok.message));
    }

    let failure: FailureBody = serde_json::from_str(body)?;
    let detail = failure
        .detail
        .as_ref()
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    Ok(ApiReply::Rejected(detail))
}

pub struct HttpActivityApi {
    client: Client,
    base_url: Url,
}

impl HttpActivityApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn url_with_segments(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn activities_url(&self) -> ClientResult<Url> {
        self.url_with_segments(&["activities"])
    }

    /// `{base}/activities/{activity}/{action}?email={email}`, both values encoded.
    pub fn action_url(&self, activity: &str, action: &str, email: &str) -> ClientResult<Url> {
        let mut url = self.url_with_segments(&["activities", activity, action])?;
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }

    async fn post_action(&self, activity: &str, action: &str, email: &str) -> ClientResult<ApiReply> {
        let url = self.action_url(activity, action, email)?;

        debug!("Sending request to {}", url);
        let response = self.client.post(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Received {} for {} on {}", status, action, activity);

        parse_reply(status, &body)
    }
}

#[async_trait]
impl ActivityApi for HttpActivityApi {
    async fn fetch_activities(&self) -> ClientResult<ActivityCatalog> {
        let url = self.activities_url()?;

        debug!("Sending request to {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.text().await?;
        let catalog: ActivityCatalog = serde_json::from_str(&body)?;
        debug!("Parsed {} activities from response", catalog.len());

        Ok(catalog)
    }

    async fn signup(&self, activity: &str, email: &str) -> ClientResult<ApiReply> {
        self.post_action(activity, "signup", email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> ClientResult<ApiReply> {
        self.post_action(activity, "unregister", email).await
    }
}
