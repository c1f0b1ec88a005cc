// Remote collection over HTTP + JSON
//
//   GET    {api}/agents/        list
//   GET    {api}/agents/{id}/   get
//   POST   {api}/agents/        create
//   PATCH  {api}/agents/{id}/   update (compensation only)
//   DELETE {api}/agents/{id}/   delete

use super::{CollectionError, FieldErrors, RemoteCollection};
use crate::config::Config;
use crate::entities::{Agent, AgentId, CompensationUpdate, NewAgent};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const AGENTS_PATH: &str = "agents/";

#[derive(Debug, Clone)]
pub struct HttpCollection {
    client: reqwest::Client,
    base: Url,
}

impl HttpCollection {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, CollectionError> {
        // Url::join drops the last segment unless the base ends with '/'
        let mut normalized = api_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized).map_err(|e| {
            CollectionError::Transport(format!("invalid api url {}: {}", api_url, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(transport)?;

        Ok(HttpCollection { client, base })
    }

    pub fn from_config(config: &Config) -> Result<Self, CollectionError> {
        Self::new(&config.api_url, config.request_timeout())
    }

    fn collection_url(&self) -> Result<Url, CollectionError> {
        self.base.join(AGENTS_PATH).map_err(|e| CollectionError::Transport(e.to_string()))
    }

    fn item_url(&self, id: AgentId) -> Result<Url, CollectionError> {
        self.base
            .join(&format!("{}{}/", AGENTS_PATH, id))
            .map_err(|e| CollectionError::Transport(e.to_string()))
    }
}

#[async_trait]
impl RemoteCollection for HttpCollection {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Agent>, CollectionError> {
        let response = self
            .client
            .get(self.collection_url()?)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: AgentId) -> Result<Agent, CollectionError> {
        let response = self.client.get(self.item_url(id)?).send().await.map_err(transport)?;
        read_json(response).await
    }

    #[instrument(skip(self, agent), fields(name = %agent.name))]
    async fn create(&self, agent: &NewAgent) -> Result<Agent, CollectionError> {
        let response = self
            .client
            .post(self.collection_url()?)
            .json(agent)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    #[instrument(skip(self, change))]
    async fn update(
        &self,
        id: AgentId,
        change: &CompensationUpdate,
    ) -> Result<Agent, CollectionError> {
        let response = self
            .client
            .patch(self.item_url(id)?)
            .json(change)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AgentId) -> Result<(), CollectionError> {
        let response = self
            .client
            .delete(self.item_url(id)?)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await.map(|_| ())
    }
}

// ============================================================================
// RESPONSE HANDLING
// ============================================================================

fn transport(err: reqwest::Error) -> CollectionError {
    CollectionError::Transport(err.to_string())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CollectionError> {
    let response = check_status(response).await?;
    response.json::<T>().await.map_err(transport)
}

async fn check_status(response: Response) -> Result<Response, CollectionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Error bodies are best-effort; an unreadable body is not a new failure
    let body = response.json::<Value>().await.ok();
    debug!(status = status.as_u16(), ?body, "remote collection refused request");
    Err(error_from_status(status, body))
}

/// Map a non-success answer to a `CollectionError`.
///
/// 400/422 with a field map is a validation failure; a body that only carries
/// `message`/`detail` is reported as a plain status error with that text.
pub(crate) fn error_from_status(status: StatusCode, body: Option<Value>) -> CollectionError {
    if status == StatusCode::NOT_FOUND {
        return CollectionError::NotFound;
    }

    let message = body.as_ref().and_then(body_message);

    let is_validation =
        status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY;
    if is_validation && message.is_none() {
        if let Some(fields) = body.as_ref().and_then(FieldErrors::from_json) {
            return CollectionError::Validation(fields);
        }
    }

    CollectionError::Status {
        status: status.as_u16(),
        message,
    }
}

fn body_message(body: &Value) -> Option<String> {
    ["message", "detail"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
