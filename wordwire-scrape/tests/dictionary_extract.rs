use scraper::Html;
use wordwire_scrape::{DictionarySource, ScrapeError, WordSource};

const WOTD_PAGE: &str = include_str!("fixtures/dictionary_wotd.html");
const BROWSE_PAGE: &str = include_str!("fixtures/dictionary_browse.html");

fn source() -> DictionarySource {
    DictionarySource::new(
        "https://www.dictionary.com/e/word-of-the-day/".into(),
        "https://www.dictionary.com/browse",
    )
    .expect("valid lookup base")
}

#[test]
fn extracts_the_expected_entry_fields() {
    let doc = Html::parse_document(WOTD_PAGE);
    let draft = source().extract(&doc).expect("extraction succeeds");

    assert_eq!(draft.word, "lucid");
    assert_eq!(draft.part_of_speech, "adjective");
    // Only the first sense row is the entry; the rest of the list is noise.
    assert_eq!(
        draft.definitions,
        vec!["easily understood; completely intelligible or comprehensible.".to_string()]
    );
    assert_eq!(
        draft.origin,
        vec![
            "Lucid comes from Latin lucidus \u{201c}clear, bright, shining,\u{201d} \
from the verb lucere \u{201c}to shine.\u{201d}"
                .to_string()
        ]
    );
    // Pronunciation is never inline on this site; it comes from the lookup.
    assert_eq!(draft.pronunciation, None);
}

#[test]
fn pronunciation_lookup_targets_the_browse_page() {
    let url = source().pronunciation_url("lucid").expect("lookup url");
    assert_eq!(url.as_str(), "https://www.dictionary.com/browse/lucid");
}

#[test]
fn pronunciation_uppercases_the_stressed_syllable() {
    let doc = Html::parse_document(BROWSE_PAGE);
    let pron = source()
        .extract_pronunciation(&doc)
        .expect("pronunciation present");
    assert_eq!(pron, "LOO-sid");
}

#[test]
fn pronunciation_handles_nested_fragments_in_document_order() {
    let doc = Html::parse_document(
        r#"<div data-type="pronunciation-toggle">
             <p><span>[ </span><strong>kuhn</strong><span>-</span>tig<span>-yoo-uhs ]</span></p>
           </div>"#,
    );
    let pron = source().extract_pronunciation(&doc).unwrap();
    assert_eq!(pron, "[KUHN-tig-yoo-uhs ]");
}

#[test]
fn missing_pronunciation_element_is_an_extraction_error() {
    let doc = Html::parse_document("<html><body><p>no toggle here</p></body></html>");
    let err = source().extract_pronunciation(&doc).unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::MissingField {
            site: "dictionary",
            field: "pronunciation"
        }
    ));
}

#[test]
fn changed_markup_surfaces_as_missing_field() {
    let doc = Html::parse_document("<html><body><div id='wotd'></div></body></html>");
    let err = source().extract(&doc).unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::MissingField {
            site: "dictionary",
            field: "word"
        }
    ));
}
