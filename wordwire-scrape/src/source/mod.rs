//! Per-site extraction strategies.
//!
//! Each supported site implements [`WordSource`]: fixed structural queries
//! against that site's markup, producing a [`WordDraft`]. The strategy in use
//! is selected by configuration, so adding a site never touches the pipeline.

use scraper::{ElementRef, Html, Selector};
use url::Url;
use wordwire_common::{Pronunciation, WordEntry};

use crate::ScrapeError;

pub mod dictionary;
pub mod wordsmith;

pub use dictionary::DictionarySource;
pub use wordsmith::WordsmithSource;

/// Everything a source page yields before pronunciation is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDraft {
    pub word: String,
    pub part_of_speech: String,
    /// Ordered, at least one element.
    pub definitions: Vec<String>,
    /// Etymology paragraphs in page order; may be empty.
    pub origin: Vec<String>,
    /// Respelled pronunciation when the page carries it inline.
    pub pronunciation: Option<String>,
}

impl WordDraft {
    pub fn into_entry(self, pronunciation: Pronunciation) -> WordEntry {
        WordEntry {
            word: self.word,
            part_of_speech: self.part_of_speech,
            definitions: self.definitions,
            pronunciation,
            origin: self.origin,
        }
    }
}

/// One site's scraping contract: extract a [`WordDraft`] from its parsed
/// word-of-the-day page, plus an optional per-word pronunciation lookup.
pub trait WordSource {
    /// Short site tag used in logs and error messages.
    fn name(&self) -> &'static str;

    /// The configured word-of-the-day page.
    fn page_url(&self) -> &str;

    /// Pull the entry fields out of the parsed page. A required locator that
    /// matches nothing is [`ScrapeError::MissingField`].
    fn extract(&self, doc: &Html) -> Result<WordDraft, ScrapeError>;

    /// Per-word lookup page for pronunciation, if this site has one.
    fn pronunciation_url(&self, _word: &str) -> Option<Url> {
        None
    }

    /// Extract a respelled pronunciation from the lookup page.
    fn extract_pronunciation(&self, _doc: &Html) -> Result<String, ScrapeError> {
        Err(ScrapeError::MissingField {
            site: self.name(),
            field: "pronunciation",
        })
    }
}

/// Compile a selector known at build time.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static css selector")
}

/// All text under an element, whitespace-normalised.
pub(crate) fn text_of(el: &ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
