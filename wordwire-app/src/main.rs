use anyhow::Result;
use chrono::Local;
use wordwire_common::observability::{init_logging, LogConfig};
use wordwire_config::{SourceDetails, WordwireConfig, WordwireConfigLoader};
use wordwire_scrape::{collect_entry, DictionarySource, PageFetcher, WordSource, WordsmithSource};
use wordwire_slack::SlackApi;

mod digest;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (the YAML file wins over WORDWIRE_ env overrides)
    let cfg: WordwireConfig = WordwireConfigLoader::new()
        .with_file("wordwire.yaml")
        .load()?;

    init_logging(LogConfig::default())?;

    run(cfg).await
}

/// One full run: fetch, extract, format, post. No loops, no state.
async fn run(cfg: WordwireConfig) -> Result<()> {
    let (source, page_url) = build_source(&cfg)?;
    let fetcher = PageFetcher::new(
        &page_url,
        &cfg.source.user_agent,
        cfg.source.cookie.as_deref(),
    )?;

    let entry = collect_entry(&fetcher, source.as_ref()).await?;

    let blocks = digest::build_blocks(&entry, Local::now().date_naive(), &cfg.message.closing);

    let slack = SlackApi::new(cfg.slack.auth_token.clone());
    let resp = slack
        .post_message(&cfg.slack.channel_id, &cfg.message.notify_text, &blocks)
        .await?;

    tracing::info!(
        word = %entry.word,
        channel = %cfg.slack.channel_id,
        ts = ?resp.ts,
        "wotd.posted"
    );
    Ok(())
}

/// Wire the configured extraction strategy.
fn build_source(cfg: &WordwireConfig) -> Result<(Box<dyn WordSource>, String)> {
    match &cfg.source.details {
        SourceDetails::Dictionary { config } => {
            let source = DictionarySource::new(config.page_url.clone(), &config.lookup_base)?;
            Ok((Box::new(source), config.page_url.clone()))
        }
        SourceDetails::Wordsmith { config } => {
            let source = WordsmithSource::new(config.page_url.clone());
            Ok((Box::new(source), config.page_url.clone()))
        }
    }
}
