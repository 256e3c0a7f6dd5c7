//! REST backend: serves [`ResourceRequest`]s against the admin API over HTTP.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::resource_framework::{Resource, ResourceClient, ResourceRequest};

/// Shared HTTP client plus the base URL every endpoint is resolved against.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidEndpoint(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn get(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.get(self.endpoint(segments)?))
    }

    pub fn post(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.post(self.endpoint(segments)?))
    }

    pub fn put(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.put(self.endpoint(segments)?))
    }

    pub fn patch(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.patch(self.endpoint(segments)?))
    }
}

/// Maps a resource's operations onto REST requests.
///
/// Only `list_request` is mandatory; the write operations default to
/// [`ApiError::Unsupported`].
pub trait HttpResource: Resource + DeserializeOwned {
    fn list_request(api: &HttpApi, query: &Self::Query) -> Result<RequestBuilder, ApiError>;

    fn decode_list(body: Value) -> Result<Vec<Self>, ApiError> {
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn create_request(_api: &HttpApi, _payload: &Self::CreatePayload) -> Result<RequestBuilder, ApiError> {
        Err(unsupported::<Self>("create"))
    }

    fn update_request(_api: &HttpApi, _id: &Self::Id, _patch: &Self::Patch) -> Result<RequestBuilder, ApiError> {
        Err(unsupported::<Self>("update"))
    }

    fn update_group_request(_api: &HttpApi, _group: &Self::Group, _patch: &Self::Patch) -> Result<RequestBuilder, ApiError> {
        Err(unsupported::<Self>("update_group"))
    }

    fn action_request(_api: &HttpApi, _action: &Self::Action) -> Result<RequestBuilder, ApiError> {
        Err(unsupported::<Self>("action"))
    }
}

fn unsupported<T: Resource>(operation: &'static str) -> ApiError {
    ApiError::Unsupported { resource: T::NAME, operation }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "Request rejected by server");
    Err(ApiError::Status { status: status.as_u16(), body })
}

async fn send_json(request: RequestBuilder) -> Result<Value, ApiError> {
    let response = check_status(request.send().await?).await?;
    response.json::<Value>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
    check_status(request.send().await?).await?;
    Ok(())
}

// =============================================================================
// THE HTTP ACTOR
// =============================================================================

pub struct HttpApiActor<T: HttpResource> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    api: HttpApi,
}

impl<T: HttpResource> HttpApiActor<T> {
    pub fn new(buffer_size: usize, api: HttpApi) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, api };
        (actor, ResourceClient::new(sender))
    }

    /// Serves every request in its own task so slow responses never queue
    /// behind each other.
    #[instrument(name = "http_api", skip(self), fields(resource = T::NAME))]
    pub async fn run(mut self) {
        debug!("HTTP backend starting");
        while let Some(request) = self.receiver.recv().await {
            let api = self.api.clone();
            tokio::spawn(serve(api, request));
        }
        debug!("HTTP backend stopped");
    }
}

async fn serve<T: HttpResource>(api: HttpApi, request: ResourceRequest<T>) {
    match request {
        ResourceRequest::List { query, respond_to } => {
            debug!(resource = T::NAME, query = ?query, "GET list");
            let result = fetch::<T>(T::list_request(&api, &query)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::Create { payload, respond_to } => {
            let result = execute(T::create_request(&api, &payload)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::Update { id, patch, respond_to } => {
            let result = execute(T::update_request(&api, &id, &patch)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::UpdateGroup { group, patch, respond_to } => {
            let result = execute(T::update_group_request(&api, &group, &patch)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::Action { action, respond_to } => {
            let result = execute(T::action_request(&api, &action)).await;
            let _ = respond_to.send(result);
        }
    }
}

async fn fetch<T: HttpResource>(request: Result<RequestBuilder, ApiError>) -> Result<Vec<T>, ApiError> {
    let body = send_json(request?).await?;
    T::decode_list(body)
}

async fn execute(request: Result<RequestBuilder, ApiError>) -> Result<(), ApiError> {
    send_empty(request?).await
}
