use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tvel_harvester::{
    config::{ArxivConfig, ArxivQuery, ARXIV_API_URL, DEFAULT_QUERY},
    fetcher::ArxivFetcher,
    harvest,
    utils::expand_home
};

#[derive(Parser, Debug)]
#[command(name = "harvest_arxiv")]
#[command(about = "Harvest arXiv search results into a timestamped run directory")]
#[command(version)]
struct Cli {
    /// Base output directory (`~` is expanded)
    #[arg(long, env = "DATAROOT")]
    dataroot: String,

    /// arXiv search query
    #[arg(long, env = "ARXIV_QUERY", default_value = DEFAULT_QUERY)]
    query: String,

    /// Offset of the first result
    #[arg(long, default_value_t = 0)]
    start: u32,

    /// Maximum number of results to request
    #[arg(long, default_value_t = 25)]
    max_results: u32,

    /// arXiv API endpoint
    #[arg(long, env = "ARXIV_API_URL", default_value = ARXIV_API_URL)]
    api_url: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

// logs go to stderr; stdout is reserved for the summary line.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    let dataroot = expand_home(&cli.dataroot);
    let query = ArxivQuery::new(&cli.query)
        .with_start(cli.start)
        .with_max_results(cli.max_results);
    let fetcher = ArxivFetcher::new(ArxivConfig::new(&cli.api_url))?;

    let outcome = harvest::run(&fetcher, &query, &dataroot).await?;
    println!("{}", outcome.summary());
    Ok(())
}
