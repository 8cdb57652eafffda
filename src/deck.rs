//! Locates slide `<section>` blocks in an HTML document.
//!
//! This is a token scan rather than an HTML parse: candidate opening tags are found with a
//! regex, and each candidate's closing tag is found by counting nested `<section` and
//! `</section>` tokens. Offsets always point into the original string so callers can splice.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const SECTION_OPEN: &str = "<section";
const SECTION_CLOSE: &str = "</section>";
const NO_HEADING: &str = "(no heading)";

static SECTION_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<section\b[^>]*>").expect("invalid section tag regex"));
static CLASS_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid class regex")
});
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]\s*>").expect("invalid heading regex")
});
static INNER_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("invalid inner tag regex"));

/// One slide found by [`locate`]. Only valid for the exact string it was located in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideInfo {
    pub index: usize,
    pub classes: String,
    pub heading: String,
    /// Byte offset of the `<` of the opening tag.
    pub start_offset: usize,
    /// Byte offset just past the matching `</section>`.
    pub end_offset: usize,
}

impl SlideInfo {
    /// The slide's full markup, opening tag through closing tag.
    pub fn outer_html<'a>(&self, html: &'a str) -> &'a str {
        &html[self.start_offset..self.end_offset]
    }
}

/// Scan `html` for slides, in document order.
///
/// A candidate is any `<section>` tag whose class list carries a `slide` token. Candidates
/// without a matching close tag are skipped. Slide-classed sections nested inside another
/// slide are reported as slides of their own.
pub fn locate(html: &str) -> Vec<SlideInfo> {
    let mut slides = Vec::new();

    for tag in SECTION_TAG_RE.find_iter(html) {
        let Some(classes) = slide_classes(tag.as_str()) else {
            continue;
        };

        let Some(end_offset) = matching_close(html, tag.end()) else {
            log::warn!(
                "skipping slide candidate at byte {} with no matching </section>",
                tag.start()
            );
            continue;
        };

        let slide = SlideInfo {
            index: slides.len(),
            heading: heading_text(&html[tag.start()..end_offset]),
            classes,
            start_offset: tag.start(),
            end_offset,
        };
        log::trace!("located {slide:?}");
        slides.push(slide);
    }

    slides
}

/// The class value of a slide opening tag, or `None` if the tag is not a slide.
fn slide_classes(opening_tag: &str) -> Option<String> {
    let captures = CLASS_ATTR_RE.captures(opening_tag)?;
    let value = captures.get(1).or_else(|| captures.get(2))?.as_str();

    value
        .split_whitespace()
        .any(|token| token.eq_ignore_ascii_case("slide"))
        .then(|| value.to_string())
}

/// Depth-tracking search for the `</section>` closing the section whose opening tag ends
/// at `from`. Returns the byte offset just past it.
fn matching_close(html: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut position = from;

    loop {
        let close = position + html[position..].find(SECTION_CLOSE)?;
        match html[position..].find(SECTION_OPEN).map(|open| position + open) {
            Some(open) if open < close => {
                depth += 1;
                position = open + SECTION_OPEN.len();
            }
            _ => {
                depth -= 1;
                position = close + SECTION_CLOSE.len();
                if depth == 0 {
                    return Some(position);
                }
            }
        }
    }
}

fn heading_text(slide_html: &str) -> String {
    HEADING_RE
        .captures(slide_html)
        .and_then(|captures| captures.get(1))
        .map(|inner| INNER_TAG_RE.replace_all(inner.as_str(), "").trim().to_string())
        .unwrap_or_else(|| String::from(NO_HEADING))
}
