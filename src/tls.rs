use hyper_openssl::client::legacy::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use openssl::ssl::{SslConnector, SslMethod, SslOptions, SslVerifyMode, SslVersion};

/// TLS protocol versions the data.go.kr servers are known to negotiate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TlsVersion {
    Tls10,
    Tls11,
    Tls12,
}

impl TlsVersion {
    fn to_openssl(self) -> SslVersion {
        match self {
            Self::Tls10 => SslVersion::TLS1,
            Self::Tls11 => SslVersion::TLS1_1,
            Self::Tls12 => SslVersion::TLS1_2,
        }
    }
}

/// Cipher suites observed on apis.data.go.kr (SSL Labs), in preference order.
/// DES-CBC3-SHA is very weak but some endpoints still require it.
pub const LEGACY_CIPHERS: [&str; 5] = [
    "AES128-SHA",
    "AES256-SHA",
    "DHE-RSA-AES128-SHA",
    "DHE-RSA-AES256-SHA",
    "DES-CBC3-SHA",
];

/// TLS parameters applied to every secure connection of a session.
///
/// `Default` keeps certificate and hostname verification enabled; the
/// verification bypass the government endpoints need is an explicit opt-in
/// via [`TlsPolicy::legacy`] or the individual fields.
#[derive(Clone, Debug)]
pub struct TlsPolicy {
    pub min_version: TlsVersion,
    pub max_version: TlsVersion,
    /// Ordered preference list. Anonymous and null suites are always
    /// excluded on top of this list.
    pub ciphers: Vec<String>,
    pub verify_certificate: bool,
    pub verify_hostname: bool,
    /// Tolerate servers that violate strict renegotiation rules.
    pub legacy_server_connect: bool,
    /// Do not insert empty application-data fragments; some server-side
    /// parsers choke on them.
    pub suppress_empty_fragments: bool,
}

impl Default for TlsPolicy {
    fn default() -> Self {
        Self {
            min_version: TlsVersion::Tls10,
            max_version: TlsVersion::Tls12,
            ciphers: LEGACY_CIPHERS.iter().map(|c| c.to_string()).collect(),
            verify_certificate: true,
            verify_hostname: true,
            legacy_server_connect: true,
            suppress_empty_fragments: true,
        }
    }
}

impl TlsPolicy {
    /// The full data.go.kr compatibility profile, certificate and hostname
    /// verification disabled. Several endpoints serve incomplete chains.
    pub fn legacy() -> Self {
        Self {
            verify_certificate: false,
            verify_hostname: false,
            ..Self::default()
        }
    }

    /// The policy as an OpenSSL cipher string, exclusions appended.
    pub fn cipher_string(&self) -> String {
        let mut ciphers = self.ciphers.join(":");
        ciphers.push_str(":!aNULL:!eNULL");
        ciphers
    }
}

pub fn connector(policy: &TlsPolicy) -> Result<HttpsConnector<HttpConnector>, crate::Error> {
    let mut ssl = SslConnector::builder(SslMethod::tls_client())?;

    // Unsupported options are skipped rather than failing construction;
    // compatibility with whatever libssl is present is best-effort.
    if let Err(error) = ssl.set_min_proto_version(Some(policy.min_version.to_openssl())) {
        tracing::debug!(%error, "minimum protocol version not supported, skipping");
    }
    if let Err(error) = ssl.set_max_proto_version(Some(policy.max_version.to_openssl())) {
        tracing::debug!(%error, "maximum protocol version not supported, skipping");
    }

    // OpenSSL 3 refuses TLS 1.0 and 3DES above security level 0.
    let ciphers = policy.cipher_string();
    if ssl.set_cipher_list(&format!("{ciphers}:@SECLEVEL=0")).is_err() {
        if let Err(error) = ssl.set_cipher_list(&ciphers) {
            tracing::debug!(%error, "cipher list not accepted, keeping defaults");
        }
    }

    if !policy.verify_certificate {
        ssl.set_verify(SslVerifyMode::NONE);
    }

    let mut options = SslOptions::empty();
    if policy.legacy_server_connect {
        // The safe wrapper in openssl 0.10.81 does not expose this flag,
        // so set the raw SSL_OP_LEGACY_SERVER_CONNECT bit directly.
        options |= SslOptions::from_bits_retain(openssl_sys::SSL_OP_LEGACY_SERVER_CONNECT as _);
    }
    if policy.suppress_empty_fragments {
        options |= SslOptions::DONT_INSERT_EMPTY_FRAGMENTS;
    }
    ssl.set_options(options);

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    let mut connector = HttpsConnector::with_connector(http, ssl)?;
    if !policy.verify_hostname {
        connector.set_callback(|configuration, _| {
            configuration.set_verify_hostname(false);
            Ok(())
        });
    }
    Ok(connector)
}

pub type Client<B> = hyper_util::client::legacy::Client<HttpsConnector<HttpConnector>, B>;

pub fn client<B>(policy: &TlsPolicy) -> Result<Client<B>, crate::Error>
where
    B: http_body::Body + Send,
    B::Data: Send,
{
    Ok(
        hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
            .build(connector(policy)?),
    )
}
