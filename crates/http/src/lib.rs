//! HTTP plumbing between bookdesk handlers and the book backend.
//!
//! Handlers describe calls as [`ApiRequest`] values and hand them to a
//! [`Transport`]. [`ReqwestTransport`] is the real implementation; tests
//! substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::Instrument;
use url::Url;
use uuid::{Timestamp, Uuid};

use bookdesk_kernel::settings::BackendSettings;

pub mod error;

pub use error::RequestError;
pub use reqwest::{header, Method};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Description of a single call to the backend.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Raw, unencoded path segments. Encoding happens when the URL is built.
    pub segments: Vec<String>,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: None,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// GET of an absolute path such as `/gestion_des_livres`, optionally
    /// followed by a `?query`.
    pub fn get(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };
        let mut request = Self::new(
            Method::GET,
            path.split('/').filter(|segment| !segment.is_empty()),
        );
        request.query = query.filter(|query| !query.is_empty()).map(str::to_string);
        request
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach an already serialized JSON document as the body.
    pub fn with_json_body(self, body: String) -> Self {
        let mut request =
            self.with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        request.body = Some(body);
        request
    }

    /// Human readable path, segments joined without encoding.
    pub fn path(&self) -> String {
        match &self.query {
            Some(query) => format!("/{}?{}", self.segments.join("/"), query),
            None => format!("/{}", self.segments.join("/")),
        }
    }
}

/// Status line of a backend response. Bodies are never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
}

impl ApiResponse {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Success predicate: any 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn error_for_status(self) -> Result<Self, RequestError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(RequestError::Status {
                status: self.status,
            })
        }
    }
}

/// Executes [`ApiRequest`]s against the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, RequestError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, RequestError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::UnsupportedBaseUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(RequestError::Client)?;

        Ok(Self { client, base_url })
    }

    pub fn from_settings(settings: &BackendSettings) -> Result<Self, RequestError> {
        Self::new(
            &settings.base_url,
            settings.request_timeout_ms.map(Duration::from_millis),
        )
    }

    /// Append the request's segments to the base URL, percent-encoding each.
    ///
    /// Empty and dot segments are rejected: `url` would collapse them and
    /// the request would reach a different resource.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, RequestError> {
        if let Some(segment) = request
            .segments
            .iter()
            .find(|segment| matches!(segment.as_str(), "" | "." | ".."))
        {
            return Err(RequestError::InvalidSegment(segment.clone()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RequestError::UnsupportedBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        url.set_query(request.query.as_deref());
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, RequestError> {
        let url = self.url_for(&request)?;
        let request_id = Uuid::new_v7(Timestamp::now(uuid::NoContext));
        let span = tracing::info_span!(
            "backend_request",
            method = %request.method,
            path = %request.path(),
            request_id = %request_id,
        );

        async move {
            let mut builder = self
                .client
                .request(request.method, url)
                .headers(request.headers)
                .header(REQUEST_ID_HEADER, request_id.to_string());
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|err| {
                tracing::warn!(error = %err, "backend unreachable");
                RequestError::Connect(err)
            })?;

            let status = response.status().as_u16();
            tracing::info!(status, "backend responded");
            Ok::<_, RequestError>(ApiResponse::new(status))
        }
        .instrument(span)
        .await
    }
}
