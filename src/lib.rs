//! HTTP client sessions for Korean public data APIs (data.go.kr).
//!
//! The government API servers negotiate at most TLS 1.2, require cipher
//! suites modern clients no longer offer, and serve certificate chains that
//! fail strict validation. [`create_session`] produces a client preconfigured
//! for them; [`TlsPolicy`] exposes every compatibility knob, with the
//! verification bypass as an explicit opt-in rather than a baked-in default.
//!
//! ```no_run
//! # async fn run() -> Result<(), datagokr_session::Error> {
//! let session = datagokr_session::create_session()?;
//! let response = session
//!     .get(
//!         "https://apis.data.go.kr/endpoint",
//!         datagokr_session::RequestOptions::new().query("serviceKey", "..."),
//!     )
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

mod error;
pub mod session;
pub mod tls;


pub use error::Error;
pub use session::{RequestOptions, Response, Session, default_headers};
pub use tls::{LEGACY_CIPHERS, TlsPolicy, TlsVersion};

/// Create a session with the full data.go.kr compatibility profile,
/// including the certificate verification bypass.
pub fn create_session() -> Result<Session, Error> {
    Session::new(&TlsPolicy::legacy())
}

/// Create a session and issue a single GET request.
///
/// Every call builds a fresh session, so nothing is pooled across calls;
/// for repeated requests build one [`Session`] and reuse it.
pub async fn get(url: &str, options: RequestOptions) -> Result<Response, Error> {
    create_session()?.get(url, options).await
}

/// Create a session and issue a single POST request.
///
/// Same trade-off as [`get`]: no connection reuse across calls.
pub async fn post(url: &str, options: RequestOptions) -> Result<Response, Error> {
    create_session()?.post(url, options).await
}
