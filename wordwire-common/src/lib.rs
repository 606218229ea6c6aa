//! Shared types and utilities for the wordwire crates.
//!
//! Defines the [`WordEntry`] produced by the scraper crates and consumed by the
//! message formatter, plus the [`observability`] module that centralises
//! tracing/logging initialisation. Kept intentionally lightweight so every
//! crate can depend on it without heavy transitive costs.

use serde::{Deserialize, Serialize};

pub mod observability;

/// One day's dictionary entry, populated once per run and immutable after.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub part_of_speech: String,
    /// Ordered definitions; extraction guarantees at least one.
    pub definitions: Vec<String>,
    pub pronunciation: Pronunciation,
    /// Etymology/origin paragraphs in page order. May be empty, in which case
    /// the formatter emits no etymology block.
    #[serde(default)]
    pub origin: Vec<String>,
}

/// Outcome of pronunciation extraction.
///
/// Pronunciation is the only best-effort field in the pipeline: when the
/// lookup fails the bare headword is substituted. Modelling that as a variant
/// (rather than catching errors ad hoc) keeps the fallback a visible, tested
/// branch.
///
/// ```
/// use wordwire_common::Pronunciation;
///
/// let p = Pronunciation::Fallback("lucid".into());
/// assert_eq!(p.display(), "lucid");
/// assert!(p.is_fallback());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Pronunciation {
    /// Respelled pronunciation pulled from the source site, e.g. `LOO-sid`.
    Respelled(String),
    /// Lookup failed (or the source has no pronunciation); the bare word
    /// stands in.
    Fallback(String),
}

impl Pronunciation {
    /// Text shown in the outgoing message regardless of variant.
    pub fn display(&self) -> &str {
        match self {
            Pronunciation::Respelled(s) | Pronunciation::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Pronunciation::Fallback(_))
    }
}
