//! The `analyze` subcommand: run the pipeline per platform and print one
//! JSON object keyed by platform name.

use clap::{Args, ValueEnum};
use revmap_core::{load_app_config, CompanyIdentity};
use revmap_scraper::proxy::{choose_proxy, load_proxies};
use revmap_scraper::{run_analysis, HttpFetcher, Platform, TwoGis, YandexMaps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PlatformChoice {
    #[value(name = "2gis")]
    TwoGis,
    Yandex,
    All,
}

#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// Company display name used for platform search.
    #[arg(long)]
    name: String,

    /// Company website (hostname or URL) used for domain matching.
    #[arg(long)]
    website: String,

    /// Platform to analyze.
    #[arg(long, value_enum, default_value_t = PlatformChoice::All)]
    platform: PlatformChoice,
}

pub(crate) async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = load_app_config()?;
    init_tracing(&config.log_level);

    let identity = CompanyIdentity {
        name: args.name,
        website: args.website,
    };

    let proxies = load_proxies(&config.proxies_path);
    let mut rng = rand::rng();
    let proxy = choose_proxy(&proxies, &mut rng);
    if let Some(proxy) = proxy {
        tracing::info!(proxy, "routing platform requests through proxy");
    }

    let fetcher = HttpFetcher::new(
        config.request_timeout_secs,
        &config.user_agent,
        proxy,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;

    let platforms: Vec<Box<dyn Platform>> = match args.platform {
        PlatformChoice::TwoGis => vec![Box::new(TwoGis::new())],
        PlatformChoice::Yandex => vec![Box::new(YandexMaps::new())],
        PlatformChoice::All => vec![Box::new(TwoGis::new()), Box::new(YandexMaps::new())],
    };

    let now = chrono::Local::now().naive_local();
    let mut report = serde_json::Map::new();

    for platform in &platforms {
        tracing::info!(platform = platform.name(), company = %identity.name, "starting analysis");
        let value = match run_analysis(&fetcher, platform.as_ref(), &identity, now).await {
            Ok(summary) => serde_json::to_value(&summary)?,
            Err(e) => {
                tracing::error!(platform = platform.name(), error = %e, "analysis failed");
                serde_json::json!({ "error": e.to_string() })
            }
        };
        report.insert(platform.name().to_owned(), value);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(report))?
    );
    Ok(())
}

/// `RUST_LOG` wins; the configured level is the fallback filter.
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
