use scraper::Html;
use wordwire_scrape::{ScrapeError, WordSource, WordsmithSource};

const TODAY_PAGE: &str = include_str!("fixtures/wordsmith_today.html");

fn source() -> WordsmithSource {
    WordsmithSource::new("https://wordsmith.org/words/today.html".into())
}

#[test]
fn extracts_the_expected_entry_fields() {
    let doc = Html::parse_document(TODAY_PAGE);
    let draft = source().extract(&doc).expect("extraction succeeds");

    assert_eq!(draft.word, "sesquipedalian");
    assert_eq!(draft.part_of_speech, "adjective");
    assert_eq!(
        draft.definitions,
        vec![
            "Given to using long words.".to_string(),
            "(Of a word) long; polysyllabic.".to_string(),
        ]
    );
    assert_eq!(
        draft.origin,
        vec![
            "From Latin sesquipedalis, literally a foot and a half long.".to_string(),
            "Earliest documented use: 1656.".to_string(),
        ]
    );
    assert_eq!(
        draft.pronunciation.as_deref(),
        Some("(ses-kwi-pi-DAYL-yuhn)")
    );
}

#[test]
fn no_lookup_page_for_this_site() {
    assert!(source().pronunciation_url("sesquipedalian").is_none());
}

#[test]
fn inline_pronunciation_is_optional() {
    let doc = Html::parse_document(
        r#"<html><body>
             <h3 class="word">petrichor</h3>
             <span class="pos">noun</span>
             <div class="meaning"><ol><li>The smell of rain on dry earth.</li></ol></div>
           </body></html>"#,
    );
    let draft = source().extract(&doc).unwrap();
    assert_eq!(draft.pronunciation, None);
    assert!(draft.origin.is_empty());
}

#[test]
fn empty_definition_list_is_an_extraction_error() {
    let doc = Html::parse_document(
        r#"<html><body>
             <h3 class="word">petrichor</h3>
             <span class="pos">noun</span>
             <div class="meaning"></div>
           </body></html>"#,
    );
    let err = source().extract(&doc).unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::MissingField {
            site: "wordsmith",
            field: "definition"
        }
    ));
}
