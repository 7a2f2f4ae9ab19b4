//! Turns short HTML fragments from quiz exports into plain single-line text.

use regex::{Captures, Regex};
use scraper::Html;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*/?\s*([a-zA-Z][a-zA-Z0-9]*)?[^<>]*>").unwrap());

// tags that end a line of text in a browser; removing them must leave a gap
const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "tr", "td", "th", "table", "h1", "h2", "h3", "h4", "h5",
    "h6", "hr", "blockquote", "pre",
];

// `&` plus the name or number a character reference could be made of
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#?[a-zA-Z0-9]+;?").unwrap());

/// Removes tags, decodes entities and collapses every whitespace run
/// (newlines and non-breaking spaces included) to one space.
///
/// Text that only becomes markup after decoding (`&lt;u8&gt;`) is written
/// back escaped (`&lt;u8>`), as is a decoded entity-looking sequence, so the
/// result reads correctly in Markdown and `strip(strip(s)) == strip(s)`.
/// Only a `<` with some `>` after it is escaped: that is exactly the case the
/// tag pass would remove on a second run, so `x < 3` stays as written.
pub fn strip(html: &str) -> String {
    let untagged = TAG_RE.replace_all(html, |caps: &Captures| {
        let is_block = caps
            .get(1)
            .is_some_and(|name| BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name.as_str())));
        if is_block {
            " "
        } else {
            ""
        }
    });
    let decoded = decode_entities(&untagged);

    escape_residual(&collapse_whitespace(&decoded))
}

// Tags are already gone; any `<` left is text, so the parser only sees
// character references.
fn decode_entities(text: &str) -> String {
    let fragment = Html::parse_fragment(&text.replace('<', "&lt;"));
    fragment.root_element().text().collect()
}

fn escape_residual(text: &str) -> String {
    let text = REFERENCE_RE.replace_all(text, |caps: &Captures| {
        let reference = &caps[0];
        if decode_entities(reference) == reference {
            reference.to_string()
        } else {
            format!("&amp;{}", &reference[1..])
        }
    });

    match text.rfind('>') {
        Some(last) => format!("{}{}", text[..last].replace('<', "&lt;"), &text[last..]),
        None => text.into_owned(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
