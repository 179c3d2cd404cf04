use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use news_desk::utils::time;
use news_desk::{
    ContentFetcher, KeywordSets, LinkEnricher, PipelineConfig, ProxyFetcher, QueryAggregator, RelevanceClassifier,
    ReportState, SearchWindow, Selection, NO_RESULTS_MESSAGE,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "news-desk", about = "Public-security news search for Espírito Santo")]
struct Cli {
    /// Pipeline config (JSON)
    #[arg(long, env = "NEWS_DESK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Keyword sets (JSON)
    #[arg(long, env = "NEWS_DESK_KEYWORDS", global = true)]
    keywords: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the aggregated search
    Search {
        /// First day to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Add these result indexes to the report and enrich their links
        #[arg(long, num_args = 1..)]
        select: Vec<usize>,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    time::parse_storage(value).ok_or_else(|| format!("expected YYYY-MM-DD, got '{}'", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let keywords = match &cli.keywords {
        Some(path) => KeywordSets::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => KeywordSets::default(),
    };

    let fetcher: Arc<dyn ContentFetcher> = Arc::new(ProxyFetcher::new(&config).context("building proxy fetcher")?);
    let classifier = RelevanceClassifier::new(Arc::new(keywords));
    let aggregator = QueryAggregator::new(fetcher.clone(), classifier, &config);

    match cli.command {
        Command::Search { start, end, json, select } => {
            let window = SearchWindow::new(start, end);
            let items = aggregator.search(&window).await?;

            if items.is_empty() {
                println!("{}", NO_RESULTS_MESSAGE);
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for (index, item) in items.iter().enumerate() {
                    println!("[{}] {} | {} | {}", index, item.pub_date_display, item.source, item.title);
                    println!("    {}", item.link);
                }
            }

            if select.is_empty() {
                return Ok(());
            }

            let enricher = Arc::new(LinkEnricher::new(fetcher, &config).context("building link enricher")?);
            let report = ReportState::new(enricher);
            let mut tasks = Vec::new();
            for index in select {
                let Some(item) = items.get(index) else {
                    warn!("No result at index {}, skipping", index);
                    continue;
                };
                if let Selection::Selected { task, .. } = report.toggle(item).await {
                    tasks.push(task);
                }
            }

            info!("Waiting for {} enrichment tasks", tasks.len());
            for task in futures::future::join_all(tasks).await {
                if let Err(e) = task {
                    warn!("Enrichment task aborted: {}", e);
                }
            }

            println!();
            for record in report.records().await {
                println!(
                    "{} ({}) [{:?}]\n    {}",
                    record.title,
                    time::format_display(record.date),
                    record.state,
                    record.link
                );
            }
        }
    }

    Ok(())
}
