//! A.Word.A.Day-style extraction.
//!
//! Everything lives on one page: headword, inline pronunciation, part of
//! speech, an ordered list of definitions, and zero or more etymology
//! paragraphs. No secondary lookup; when the inline pronunciation is absent
//! the pipeline falls back to the bare word.

use scraper::{Html, Selector};

use super::{selector, text_of, WordDraft, WordSource};
use crate::ScrapeError;

pub struct WordsmithSource {
    page_url: String,
    word_sel: Selector,
    pron_sel: Selector,
    pos_sel: Selector,
    def_sel: Selector,
    ety_sel: Selector,
}

impl WordsmithSource {
    pub fn new(page_url: String) -> Self {
        Self {
            page_url,
            word_sel: selector("h3.word"),
            pron_sel: selector("div.pron"),
            pos_sel: selector("span.pos"),
            def_sel: selector("div.meaning li"),
            ety_sel: selector("div.etymology p"),
        }
    }

    fn missing(&self, field: &'static str) -> ScrapeError {
        ScrapeError::MissingField {
            site: self.name(),
            field,
        }
    }
}

impl WordSource for WordsmithSource {
    fn name(&self) -> &'static str {
        "wordsmith"
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

        let pos_el = doc
            .select(&self.pos_sel)
            .next()
            .ok_or_else(|| self.missing("part_of_speech"))?;
        let part_of_speech = text_of(&pos_el);
        if part_of_speech.is_empty() {
            return Err(self.missing("part_of_speech"));
        }

        let definitions: Vec<String> = doc
            .select(&self.def_sel)
            .map(|el| text_of(&el))
            .filter(|t| !t.is_empty())
            .collect();
        if definitions.is_empty() {
            return Err(self.missing("definition"));
        }

        // Etymology is genuinely optional on this layout.
        let origin: Vec<String> = doc
            .select(&self.ety_sel)
            .map(|el| text_of(&el))
            .filter(|t| !t.is_empty())
            .collect();

        let pronunciation = doc
            .select(&self.pron_sel)
            .next()
            .map(|el| text_of(&el))
            .filter(|t| !t.is_empty());

        Ok(WordDraft {
            word,
            part_of_speech,
            definitions,
            origin,
            pronunciation,
        })
    }
}
