//! Fetch-and-extract pipeline for word-of-the-day pages.
//!
//! A [`fetch::PageFetcher`] pulls raw HTML, a site-specific
//! [`source::WordSource`] strategy turns the parsed document into a
//! [`WordEntry`], and [`collect_entry`] orchestrates the two, including the
//! single best-effort branch in the whole system: pronunciation lookup, which
//! degrades to the bare headword instead of failing the run.

use scraper::Html;
use thiserror::Error;
use wordwire_common::{Pronunciation, WordEntry};
use wordwire_http::HttpError;

pub mod fetch;
pub mod source;

pub use fetch::PageFetcher;
pub use source::{DictionarySource, WordDraft, WordSource, WordsmithSource};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page fetch failed: {0}")]
    Fetch(#[from] HttpError),
    #[error("markup not parseable: {0}")]
    Parse(String),
    #[error("{site} page: no match for `{field}` (site markup changed?)")]
    MissingField {
        site: &'static str,
        field: &'static str,
    },
}

/// Run the full extraction for one source: fetch the page, extract the entry,
/// then resolve pronunciation (inline value, secondary lookup, or fallback).
///
/// Every failure except pronunciation propagates; a missing or broken
/// pronunciation is logged and papered over with the bare word.
pub async fn collect_entry(
    fetcher: &PageFetcher,
    source: &dyn WordSource,
) -> Result<WordEntry, ScrapeError> {
    let body = fetcher.fetch(source.page_url()).await?;
    let mut draft = {
        let doc = parse_document(&body)?;
        source.extract(&doc)?
    };

    let pronunciation = match draft.pronunciation.take() {
        Some(inline) => Pronunciation::Respelled(inline),
        None => match source.pronunciation_url(&draft.word) {
            Some(url) => {
                settle_pronunciation(&draft.word, lookup(fetcher, source, url.as_str()).await)
            }
            None => {
                tracing::warn!(word = %draft.word, source = source.name(),
                    "no pronunciation available, falling back to the bare word");
                Pronunciation::Fallback(draft.word.clone())
            }
        },
    };

    let entry = draft.into_entry(pronunciation);
    tracing::info!(
        word = %entry.word,
        source = source.name(),
        definitions = entry.definitions.len(),
        fallback_pronunciation = entry.pronunciation.is_fallback(),
        "wotd.collected"
    );
    Ok(entry)
}

/// Secondary GET against the per-word lookup page.
async fn lookup(
    fetcher: &PageFetcher,
    source: &dyn WordSource,
    url: &str,
) -> Result<String, ScrapeError> {
    let body = fetcher.fetch(url).await?;
    let doc = parse_document(&body)?;
    source.extract_pronunciation(&doc)
}

/// The only fallback policy in the system: a failed lookup becomes the bare
/// headword, never a propagated error.
fn settle_pronunciation(word: &str, looked_up: Result<String, ScrapeError>) -> Pronunciation {
    match looked_up {
        Ok(respelled) => Pronunciation::Respelled(respelled),
        Err(err) => {
            tracing::warn!(word = %word, error = %err, "wotd.pronunciation_fallback");
            Pronunciation::Fallback(word.to_string())
        }
    }
}

/// html5ever recovers from almost anything, so the only parse failure we can
/// observe is a body with no content at all.
fn parse_document(body: &str) -> Result<Html, ScrapeError> {
    if body.trim().is_empty() {
        return Err(ScrapeError::Parse("empty response body".into()));
    }
    Ok(Html::parse_document(body))
}
