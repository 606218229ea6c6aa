//! Dictionary.com-style extraction.
//!
//! The word-of-the-day page carries the headword, one part-of-speech +
//! definition pair, and an origin note. Pronunciation is not on that page;
//! it comes from a secondary fetch of the per-word browse page, where the
//! stressed syllable is marked up with `<strong>` and rendered upper-case.

use scraper::{Html, Selector};
use url::Url;

use super::{selector, text_of, WordDraft, WordSource};
use crate::ScrapeError;

pub struct DictionarySource {
    page_url: String,
    lookup_base: Url,
    word_sel: Selector,
    sense_sel: Selector,
    note_sel: Selector,
    pron_sel: Selector,
}

impl DictionarySource {
    pub fn new(page_url: String, lookup_base: &str) -> Result<Self, ScrapeError> {
        let lookup_base = Url::parse(&format!("{}/", lookup_base.trim_end_matches('/')))
            .map_err(|e| ScrapeError::Parse(format!("invalid lookup base url: {e}")))?;
        Ok(Self {
            page_url,
            lookup_base,
            word_sel: selector("#wotd .content_column h1 a"),
            sense_sel: selector("#wotd .content_column #define ul li"),
            note_sel: selector("#wotd .content_column p.note"),
            pron_sel: selector(r#"div[data-type="pronunciation-toggle"] p"#),
        })
    }

    fn missing(&self, field: &'static str) -> ScrapeError {
        ScrapeError::MissingField {
            site: self.name(),
            field,
        }
    }
}

impl WordSource for DictionarySource {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn extract(&self, doc: &Html) -> Result<WordDraft, ScrapeError> {
        let word_el = doc
            .select(&self.word_sel)
            .next()
            .ok_or_else(|| self.missing("word"))?;
        let word = text_of(&word_el);
        if word.is_empty() {
            return Err(self.missing("word"));
        }

        // The first sense row reads "<pos marker> <definition text>": the
        // first text chunk is the part of speech, the rest is the definition.
        let sense = doc
            .select(&self.sense_sel)
            .next()
            .ok_or_else(|| self.missing("definition"))?;
        let mut chunks = sense.text().map(str::trim).filter(|t| !t.is_empty());
        let part_of_speech = chunks
            .next()
            .ok_or_else(|| self.missing("part_of_speech"))?
            .to_string();
        let definition = chunks.collect::<Vec<_>>().join(" ");
        if definition.is_empty() {
            return Err(self.missing("definition"));
        }

        let note = doc
            .select(&self.note_sel)
            .next()
            .ok_or_else(|| self.missing("origin"))?;
        let origin = text_of(&note);
        if origin.is_empty() {
            return Err(self.missing("origin"));
        }

        Ok(WordDraft {
            word,
            part_of_speech,
            definitions: vec![definition],
            origin: vec![origin],
            pronunciation: None,
        })
    }

    fn pronunciation_url(&self, word: &str) -> Option<Url> {
        self.lookup_base.join(word).ok()
    }

    /// Concatenate the pronunciation fragment texts in document order,
    /// upper-casing anything inside `<strong>` (the stressed syllable).
    fn extract_pronunciation(&self, doc: &Html) -> Result<String, ScrapeError> {
        let p = doc
            .select(&self.pron_sel)
            .next()
            .ok_or_else(|| self.missing("pronunciation"))?;

        let mut out = String::new();
        for node in p.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let t = text.trim();
            if t.is_empty() {
                continue;
            }
            let stressed = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| e.name() == "strong")
            });
            if stressed {
                out.push_str(&t.to_uppercase());
            } else {
                out.push_str(t);
            }
        }

        if out.is_empty() {
            return Err(self.missing("pronunciation"));
        }
        Ok(out)
    }
}
