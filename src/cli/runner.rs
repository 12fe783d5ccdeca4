//! CLI runner - executes commands

use crate::adapter::{JsonResponseParser, RequestAdapter, RequestInformation, ResponseParser};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{parse_header, WalkConfig};
use crate::error::{Result, ResultExt};
use crate::http::HttpClient;
use crate::iterator::PageIterator;
use crate::types::StringMap;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Walk { url, max_items } => self.walk(url.clone(), *max_items).await,
            Commands::Count { url } => self.count(url.clone()).await,
        }
    }

    /// Load the config file and apply command-line overrides
    fn load_config(&self, url: Option<String>, max_items: Option<usize>) -> Result<WalkConfig> {
        let config = match &self.cli.config {
            Some(path) => WalkConfig::from_file(path)
                .with_context(|| format!("Loading config {}", path.display()))?,
            None => WalkConfig::default(),
        };

        let headers = self
            .cli
            .headers
            .iter()
            .map(|raw| parse_header(raw))
            .collect::<Result<StringMap>>()?;

        let config = config.merge(url, headers, max_items);
        config.validate()?;
        Ok(config)
    }

    /// Fetch the first page and set up the iterator for the rest
    async fn open(&self, config: &WalkConfig) -> Result<PageIterator<Value, HttpClient>> {
        let url = config.start_url()?;
        let client = Arc::new(config.http_client());
        let options = config.request_options();

        info!(url = %url, "Fetching first page");

        let request = RequestInformation::get(url.clone())
            .with_headers(config.headers.clone())
            .with_options(options.clone());
        let parser = JsonResponseParser::<Value>::new();
        let first = client
            .send(request, &parser as &dyn ResponseParser<Value>)
            .await?;

        let mut iterator = PageIterator::new(first, client, parser)?.with_base_url(url);
        iterator.set_headers(config.headers.clone());
        iterator.set_request_options(options);
        Ok(iterator)
    }

    /// Print items until the collection or `max_items` runs out
    async fn walk(&self, url: Option<String>, max_items: Option<usize>) -> Result<()> {
        let config = self.load_config(url, max_items)?;
        let mut iterator = self.open(&config).await?;

        let start = Instant::now();
        let limit = config.max_items.unwrap_or(usize::MAX);
        let format = self.cli.format;
        let mut delivered = 0usize;

        iterator
            .iterate(|item| {
                output_item(format, item);
                delivered += 1;
                delivered < limit
            })
            .await?;

        info!(
            items = delivered,
            pages = iterator.pages_fetched() + 1,
            complete = iterator.is_exhausted(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Walk finished"
        );
        Ok(())
    }

    /// Count items and pages
    async fn count(&self, url: Option<String>) -> Result<()> {
        let config = self.load_config(url, None)?;
        let mut iterator = self.open(&config).await?;

        let mut items = 0u64;
        iterator
            .iterate(|_| {
                items += 1;
                true
            })
            .await?;

        output_item(
            self.cli.format,
            &json!({
                "items": items,
                "pages": iterator.pages_fetched() + 1,
            }),
        );
        Ok(())
    }
}

/// Print one JSON document
fn output_item(format: OutputFormat, item: &Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(item).unwrap_or_default());
        }
        OutputFormat::Pretty => {
            println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
        }
    }
}
