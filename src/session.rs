use crate::tls::{self, TlsPolicy};
use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http_body_util::{BodyExt, Full};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const ACCEPT: &str = "application/json, application/xml, text/plain, */*";
const ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en;q=0.8";
const ACCEPT_ENCODING: &str = "gzip, deflate, br";
const REFERER: &str = "https://www.data.go.kr";

/// The header set some data.go.kr endpoints require, as a fresh map.
///
/// Every session gets its own copy; nothing process-wide is ever mutated.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static(ACCEPT_ENCODING),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(header::REFERER, HeaderValue::from_static(REFERER));
    headers
}

/// Per-request options, passed through verbatim to the underlying call.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: HeaderMap,
    timeout: Option<Duration>,
    body: Option<Bytes>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter. Values are URL-encoded.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set a header on this request only, overriding the session header of
    /// the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Fail the request if no response arrives within `timeout`. Without
    /// this, only the underlying library's own limits apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON request body and set Content-Type.
    pub fn json<T: serde::Serialize>(self, value: &T) -> Result<Self, crate::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )
            .body(body))
    }
}

/// A buffered response: status line, headers, and the collected body.
#[derive(Debug)]
pub struct Response {
    status: http::StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub fn status(&self) -> http::StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    pub fn text(&self) -> Result<String, crate::Error> {
        Ok(std::str::from_utf8(&self.body)?.to_string())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, crate::Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// A connection-pooling HTTP client carrying the legacy TLS policy and the
/// data.go.kr header set.
///
/// Reuse one session across requests to benefit from pooling; the
/// module-level [`get`](crate::get) and [`post`](crate::post) helpers pay
/// for a fresh session on every call.
pub struct Session {
    client: tls::Client<Full<Bytes>>,
    headers: HeaderMap,
}

impl Session {
    pub fn new(policy: &TlsPolicy) -> Result<Self, crate::Error> {
        Ok(Self {
            client: tls::client(policy)?,
            headers: default_headers(),
        })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<Response, crate::Error> {
        self.request(http::Method::GET, url, options).await
    }

    pub async fn post(&self, url: &str, options: RequestOptions) -> Result<Response, crate::Error> {
        self.request(http::Method::POST, url, options).await
    }

    /// Issue exactly one request. Errors from the transport propagate
    /// unchanged; there is no retry.
    pub async fn request(
        &self,
        method: http::Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response, crate::Error> {
        let mut url = url::Url::parse(url)?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&options.query);
        }
        let uri = url.as_str().parse::<http::Uri>()?;

        let mut request = http::Request::new(Full::new(options.body.unwrap_or_default()));
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        request.headers_mut().clone_from(&self.headers);
        request.headers_mut().extend(options.headers);

        tracing::debug!(method = %request.method(), uri = %request.uri(), "sending request");
        let response = match options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.client.request(request))
                .await
                .map_err(|_| crate::Error::Timeout(limit))??,
            None => self.client.request(request).await?,
        };

        let (parts, body) = response.into_parts();
        let body = body.collect().await?.to_bytes();
        tracing::debug!(status = %parts.status, bytes = body.len(), "response received");
        Ok(Response {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}
