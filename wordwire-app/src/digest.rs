//! Assemble a [`WordEntry`] into the fixed message schema.
//!
//! Pure function of its inputs: header with the formatted date, word +
//! pronunciation, one numbered section per definition, an etymology context
//! block (only when there is etymology), and the configured closing line.

use chrono::{Datelike, NaiveDate};
use wordwire_common::WordEntry;
use wordwire_slack::MessageBlock;

pub fn build_blocks(entry: &WordEntry, date: NaiveDate, closing: &str) -> Vec<MessageBlock> {
    let mut blocks = Vec::with_capacity(entry.definitions.len() + 4);

    blocks.push(MessageBlock::header(format!(
        "Word of the Day for {}",
        spelled_date(date)
    )));

    blocks.push(MessageBlock::section(format!(
        "*{}*\t\t*`{}`*",
        entry.word,
        entry.pronunciation.display()
    )));

    for (idx, definition) in entry.definitions.iter().enumerate() {
        blocks.push(MessageBlock::section(format!(
            "*`{}`* {}. {}",
            entry.part_of_speech,
            idx + 1,
            definition
        )));
    }

    if !entry.origin.is_empty() {
        blocks.push(MessageBlock::context(entry.origin.iter().cloned()));
    }

    blocks.push(MessageBlock::section(closing.to_string()));

    blocks
}

/// "Monday the 24th of August, 2026"
fn spelled_date(date: NaiveDate) -> String {
    format!(
        "{} the {}{} of {}, {}",
        date.format("%A"),
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%B"),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordwire_common::Pronunciation;
    use wordwire_slack::TextObject;

    fn lucid() -> WordEntry {
        WordEntry {
            word: "lucid".into(),
            part_of_speech: "adjective".into(),
            definitions: vec!["clear".into()],
            pronunciation: Pronunciation::Respelled("LOO-sid".into()),
            origin: vec!["from Latin lucidus".into()],
        }
    }

    fn date() -> NaiveDate {
        // A Monday.
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    fn section_text(block: &MessageBlock) -> &str {
        match block {
            MessageBlock::Section {
                text: TextObject::Mrkdwn { text },
            } => text,
            other => panic!("expected mrkdwn section, got {other:?}"),
        }
    }

    #[test]
    fn block_order_is_fixed() {
        let blocks = build_blocks(&lucid(), date(), "Use it in a sentence today.");
        assert_eq!(blocks.len(), 5);

        match &blocks[0] {
            MessageBlock::Header {
                text: TextObject::PlainText { text, .. },
            } => {
                assert_eq!(text, "Word of the Day for Monday the 24th of August, 2026");
            }
            other => panic!("expected header first, got {other:?}"),
        }
        assert_eq!(section_text(&blocks[1]), "*lucid*\t\t*`LOO-sid`*");
        assert_eq!(section_text(&blocks[2]), "*`adjective`* 1. clear");
        match &blocks[3] {
            MessageBlock::Context { elements } => {
                assert_eq!(
                    elements,
                    &vec![TextObject::plain("from Latin lucidus")]
                );
            }
            other => panic!("expected etymology context, got {other:?}"),
        }
        assert_eq!(section_text(&blocks[4]), "Use it in a sentence today.");
    }

    #[test]
    fn each_definition_gets_its_own_numbered_section() {
        let mut entry = lucid();
        entry.definitions = vec!["clear".into(), "sane".into(), "bright".into()];
        let blocks = build_blocks(&entry, date(), "bye");

        let texts: Vec<&str> = blocks[2..5].iter().map(section_text).collect();
        assert_eq!(
            texts,
            vec![
                "*`adjective`* 1. clear",
                "*`adjective`* 2. sane",
                "*`adjective`* 3. bright",
            ]
        );
        assert_eq!(blocks.len(), 7);
    }

    #[test]
    fn empty_origin_emits_no_context_block() {
        let mut entry = lucid();
        entry.origin.clear();
        let blocks = build_blocks(&entry, date(), "bye");
        assert_eq!(blocks.len(), 4);
        assert!(blocks
            .iter()
            .all(|b| !matches!(b, MessageBlock::Context { .. })));
    }

    #[test]
    fn fallback_pronunciation_renders_the_bare_word() {
        let mut entry = lucid();
        entry.pronunciation = Pronunciation::Fallback("lucid".into());
        let blocks = build_blocks(&entry, date(), "bye");
        assert_eq!(section_text(&blocks[1]), "*lucid*\t\t*`lucid`*");
    }

    #[test]
    fn ordinal_suffixes_cover_the_teens() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(31), "st");
    }
}
