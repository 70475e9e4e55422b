//! Page resolver behavior: file list selection, ordering, provenance.

use dexcat::chapter::PageResolver;
use dexcat::error::Error;

fn chapter_body(hash: &str, data: &[&str], data_saver: &[&str]) -> String {
    serde_json::json!({
        "data": {
            "attributes": {
                "hash": hash,
                "data": data,
                "dataSaver": data_saver,
            }
        }
    })
    .to_string()
}

#[test]
fn resolves_full_quality_pages_in_order() {
    let body = chapter_body("H", &["a.png", "b.png"], &["a.jpg"]);
    let pages = PageResolver::new()
        .resolve_pages(body.as_bytes(), "https://api/chapter/1", "cdn1", false)
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].index, 0);
    assert_eq!(pages[0].image_url_fragment, "/data/H/a.png");
    assert_eq!(pages[1].index, 1);
    assert_eq!(pages[1].image_url_fragment, "/data/H/b.png");
}

#[test]
fn resolves_data_saver_pages() {
    let body = chapter_body("H", &["a.png", "b.png"], &["a.jpg"]);
    let pages = PageResolver::new()
        .resolve_pages(body.as_bytes(), "https://api/chapter/1", "cdn1", true)
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].image_url_fragment, "/data-saver/H/a.jpg");
}

#[test]
fn fetch_token_is_shared_and_reconstructible() {
    let body = chapter_body("H", &["a.png", "b.png", "c.png"], &[]);
    let pages = PageResolver::new()
        .resolve_pages(body.as_bytes(), "https://api/chapter/1", "cdn1", false)
        .unwrap();

    // One capture per resolve call: every page carries the same token.
    assert!(pages.iter().all(|p| p.fetch_token == pages[0].fetch_token));

    let parts: Vec<&str> = pages[0].fetch_token.split(',').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "cdn1");
    assert_eq!(parts[1], "https://api/chapter/1");
    assert!(parts[2].parse::<u128>().is_ok());
}

#[test]
fn empty_selected_list_yields_empty_result() {
    let body = chapter_body("H", &[], &[]);
    let resolver = PageResolver::new();

    // No fallback to the other list, and no error either way.
    let full = resolver
        .resolve_pages(body.as_bytes(), "https://api/chapter/1", "cdn1", false)
        .unwrap();
    assert!(full.is_empty());

    let saver = resolver
        .resolve_pages(body.as_bytes(), "https://api/chapter/1", "cdn1", true)
        .unwrap();
    assert!(saver.is_empty());
}

#[test]
fn selection_ignores_other_list_content() {
    // data-saver requested while only the full list has entries.
    let body = chapter_body("H", &["a.png"], &[]);
    let pages = PageResolver::new()
        .resolve_pages(body.as_bytes(), "https://api/chapter/1", "cdn1", true)
        .unwrap();

    assert!(pages.is_empty());
}

#[test]
fn malformed_chapter_body_is_an_error() {
    let result = PageResolver::new().resolve_pages(
        br#"{"data":{"attributes":{"hash":"H"}}}"#,
        "https://api/chapter/1",
        "cdn1",
        false,
    );

    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn external_pointer_returns_final_segment() {
    let body = br#"{"data":{"pages":"https://host/view/xyz987"}}"#;
    let key = PageResolver::new().resolve_external(body).unwrap();
    assert_eq!(key, "xyz987");
}

#[test]
fn external_pointer_without_separator_passes_through() {
    let body = br#"{"data":{"pages":"xyz987"}}"#;
    let key = PageResolver::new().resolve_external(body).unwrap();
    assert_eq!(key, "xyz987");
}

#[test]
fn malformed_external_payload_is_an_error() {
    let result = PageResolver::new().resolve_external(br#"{"data":{}}"#);
    assert!(matches!(result, Err(Error::Json(_))));
}
