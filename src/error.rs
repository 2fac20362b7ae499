use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid uri: {0}")]
    Uri(#[from] http::uri::InvalidUri),
    #[error(transparent)]
    Tls(#[from] openssl::error::ErrorStack),
    #[error("request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response body is not valid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
