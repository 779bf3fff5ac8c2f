use anyhow::{bail, Context};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circonus_api::{Api, ClientConfig, HttpTransport};
use circonus_core::metric_cluster::ClusterExtras;

const USAGE: &str = "\
usage: circonus-api <command> [args]

commands:
  dashboards [query]               list or search dashboards
  dashboard <cid>                  fetch one dashboard
  delete-dashboard <cid>           delete a dashboard
  clusters [query]                 list or search metric clusters
  cluster <cid> [metrics|uuids]    fetch one metric cluster
  delete-cluster <cid>             delete a metric cluster";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circonus_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let arg = |i: usize| args.get(i).map(String::as_str);

    let config = ClientConfig::from_env().context("Failed to load API configuration")?;
    tracing::debug!(url = %config.url, app = %config.token_app, "Loaded API configuration");
    let api = Api::from_config(&config).context("Failed to build HTTP client")?;

    run(&api, command, arg(1), arg(2)).await
}

async fn run(
    api: &Api<HttpTransport>,
    command: &str,
    first: Option<&str>,
    second: Option<&str>,
) -> anyhow::Result<()> {
    match command {
        "dashboards" => print_json(&api.search_dashboards(first, None).await?),
        "dashboard" => print_json(&api.fetch_dashboard(first).await?),
        "delete-dashboard" => print_json(&api.delete_dashboard_by_cid(first).await?),
        "clusters" => print_json(&api.search_metric_clusters(first, None).await?),
        "cluster" => {
            let extras = match second {
                Some(s) => ClusterExtras::parse(s)
                    .with_context(|| format!("Unknown cluster extras {s:?}"))?,
                None => ClusterExtras::None,
            };
            print_json(&api.fetch_metric_cluster(first, extras).await?)
        }
        "delete-cluster" => print_json(&api.delete_metric_cluster_by_cid(first).await?),
        other => bail!("Unknown command {other:?}\n\n{USAGE}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
