use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Matches the opening of an anchor element, `<a` followed by whitespace.
static ANCHOR_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\s").expect("Failed to compile anchor regex"));

/// Matches one attribute at the start of the haystack, consuming its whole
/// value so text inside quotes is never read as markup.
///
/// Group 1 is the name, group 2 a double-quoted value, group 3 a single-quoted
/// one. A quoted value may not contain `<`: a quote left open until the next
/// tag ends the walk instead of swallowing that tag.
static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"<]*)"|'([^'<]*)'|[^\s"'=<>`]+))?"#,
    )
    .expect("Failed to compile attribute regex")
});

/// Unique absolute `http://` / `https://` link targets referenced by anchor
/// elements in `html`, in order of first appearance.
///
/// The input is treated as text; unterminated tags or quotes are skipped
/// rather than reported.
pub fn extract_links(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    let mut pos = 0;

    while let Some(open) = ANCHOR_OPEN_REGEX.find_at(html, pos) {
        let (href, end) = anchor_href(html, open.end());
        pos = end;

        let Some(href) = href else {
            continue;
        };

        if is_external(href) && seen.insert(href) {
            links.push(href.to_string());
        }
    }

    links
}

/// Walks the attributes of an anchor starting at `pos` and returns the quoted
/// value of its first `href` attribute along with the offset where the walk
/// stopped. Unquoted values are consumed but never returned.
fn anchor_href(html: &str, mut pos: usize) -> (Option<&str>, usize) {
    let mut href = None;
    let mut href_seen = false;

    while let Some(caps) = ATTRIBUTE_REGEX.captures(&html[pos..]) {
        let Some(attribute) = caps.get(0) else {
            break;
        };

        if !href_seen && caps[1].eq_ignore_ascii_case("href") {
            href_seen = true;
            href = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
        }

        pos += attribute.end();
    }

    (href, pos)
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_fragment() {
        let html = r#"<a href="https://example.com/a">A</a><a href='https://example.com/a'>A2</a><a href="http://example.com/b">B</a><a href="/internal">Internal</a>"#;
        assert_eq!(
            extract_links(html),
            vec!["https://example.com/a", "http://example.com/b"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_links("").is_empty());
        assert!(extract_links("<p>No links here</p>").is_empty());
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let html = r#"
            <a href="https://b.example">b</a>
            <a href="https://a.example">a</a>
            <a href="https://b.example">b again</a>
            <a href="https://c.example">c</a>
        "#;
        assert_eq!(
            extract_links(html),
            vec!["https://b.example", "https://a.example", "https://c.example"]
        );
    }

    #[test]
    fn test_non_http_schemes_are_excluded() {
        let html = r##"
            <a href="mailto:editor@eatsmartdaily.com">Mail</a>
            <a href="tel:+15551234">Call</a>
            <a href="#top">Top</a>
            <a href="../recipes">Recipes</a>
            <a href="javascript:void(0)">Nothing</a>
            <a href="ftp://files.example.com">FTP</a>
            <a href="//cdn.example.com/x">Protocol relative</a>
        "##;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_scheme_check_is_case_sensitive() {
        let html = r#"<a href="HTTPS://EXAMPLE.COM">Loud</a><a href="https://example.com">Quiet</a>"#;
        assert_eq!(extract_links(html), vec!["https://example.com"]);
    }

    #[test]
    fn test_single_and_double_quotes_are_equivalent() {
        let double = extract_links(r#"<a href="https://example.com/x">x</a>"#);
        let single = extract_links(r#"<a href='https://example.com/x'>x</a>"#);
        assert_eq!(double, single);
        assert_eq!(double, vec!["https://example.com/x"]);
    }

    #[test]
    fn test_attributes_and_case_variations() {
        let html = r#"
            <A class="btn" HREF = "https://upper.example">U</A>
            <a
                target="_blank"
                rel="noopener"
                href="https://multiline.example/path?q=1&amp;r=2">M</a>
        "#;
        assert_eq!(
            extract_links(html),
            vec![
                "https://upper.example",
                "https://multiline.example/path?q=1&amp;r=2"
            ]
        );
    }

    #[test]
    fn test_ignores_non_anchor_elements_and_lookalike_attributes() {
        let html = r#"
            <link rel="stylesheet" href="https://cdn.example.com/site.css">
            <abbr href="https://abbr.example">x</abbr>
            <area href="https://area.example">
            <a data-href="https://data.example" href="https://real.example">r</a>
        "#;
        assert_eq!(extract_links(html), vec!["https://real.example"]);
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<a name="anchor">Named</a><a id="x" title="t">T</a><a href="https://ok.example">ok</a>"#;
        assert_eq!(extract_links(html), vec!["https://ok.example"]);
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        let inputs = [
            "<a",
            "<a href",
            "<a href=",
            r#"<a href="https://unterminated.example"#,
            r#"<a href='https://mismatched.example">x</a>"#,
            "<a href=https://unquoted.example>x</a>",
            "<<<a>>> href=\"https://outside.example\"",
            "<a href=\"\">empty</a>",
        ];
        for input in inputs {
            assert!(extract_links(input).is_empty(), "input: {input}");
        }

        let html = r#"<a href="https://broken.example<a href="https://fine.example">f</a>"#;
        assert_eq!(extract_links(html), vec!["https://fine.example"]);
    }

    #[test]
    fn test_href_text_inside_another_attribute_is_ignored() {
        let html = r#"<a title="see href='https://evil.example'" href="https://real.example">r</a>"#;
        assert_eq!(extract_links(html), vec!["https://real.example"]);

        let html = r#"<a data-note='href="https://note.example"'>n</a>"#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_gt_inside_quoted_value_does_not_end_the_tag() {
        let html = r#"<a title="a > b" href="https://x.example">x</a>"#;
        assert_eq!(extract_links(html), vec!["https://x.example"]);

        let html = r#"<a onclick='return n > 0' href='https://y.example'>y</a>"#;
        assert_eq!(extract_links(html), vec!["https://y.example"]);
    }

    #[test]
    fn test_first_href_attribute_wins() {
        let html = r#"<a href="https://first.example" HREF="https://second.example">x</a>"#;
        assert_eq!(extract_links(html), vec!["https://first.example"]);
    }

    #[test]
    fn test_no_whitespace_normalization() {
        let html = r#"<a href="https://example.com/">a</a><a href="https://example.com">b</a><a href=" https://example.com">c</a>"#;
        assert_eq!(
            extract_links(html),
            vec!["https://example.com/", "https://example.com"]
        );
    }
}
