use clap::Parser;
use datagokr_session::RequestOptions;
use std::time::Duration;

/// Fetch a public data API endpoint through the legacy TLS session.
#[derive(Parser)]
struct Args {
    /// Endpoint URL, e.g. https://apis.data.go.kr/...
    url: String,
    /// Additional query parameters as name=value pairs
    #[clap(long, value_parser = parse_pair)]
    query: Vec<(String, String)>,
    /// Request timeout in seconds
    #[clap(long)]
    timeout: Option<u64>,
}

fn parse_pair(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value: {value}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut options = RequestOptions::new();
    for (name, value) in args.query {
        options = options.query(name, value);
    }
    if let Ok(key) = std::env::var("DATA_GO_KR_API_KEY") {
        options = options.query("serviceKey", key);
    }
    if let Some(timeout) = args.timeout {
        options = options.timeout(Duration::from_secs(timeout));
    }

    let session = datagokr_session::create_session()?;
    let response = session.get(&args.url, options).await?;

    println!("{}", response.status());
    println!("{}", response.text()?);

    Ok(())
}
