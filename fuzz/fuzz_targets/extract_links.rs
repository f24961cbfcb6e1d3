#![no_main]

use libfuzzer_sys::fuzz_target;

use eatsmartdaily::links::extract_links;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    // Never panics, and every result is a unique absolute http(s) link.
    let links = extract_links(&html);
    for (i, link) in links.iter().enumerate() {
        assert!(link.starts_with("http://") || link.starts_with("https://"));
        assert!(!links[..i].contains(link));
    }
});
