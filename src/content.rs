//! Content normalization for CMS-authored rich text
//!
//! WordPress delivers titles, excerpts and bodies as rendered HTML with
//! typographic entities. The functions here turn such fields into plain,
//! display-safe text and bounded excerpts.
//!
//! Tag stripping is a display simplification, not a sanitizer: every
//! `<...>` sequence is dropped regardless of what it contains.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Default excerpt length in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// Appended to truncated excerpts
pub const ELLIPSIS: &str = "...";

/// Site name used in page titles
pub const SITE_NAME: &str = "Floral Kingdom Tours";

/// Page title used when a page has no title of its own
pub const DEFAULT_PAGE_TITLE: &str = "Floral Kingdom Tours - Premium Cape Town Tourism Experience";

/// Entities decoded by [`clean_content`] and their replacements
pub const ENTITIES: &[(&str, &str)] = &[
    ("&#8217;", "'"),
    ("&#8216;", "'"),
    ("&#8220;", "\""),
    ("&#8221;", "\""),
    ("&#8211;", "-"),
    ("&#8212;", "\u{2014}"),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// One alternation over the entity table, longest literal first
fn entity_regex() -> &'static Regex {
    ENTITY_REGEX.get_or_init(|| {
        let mut literals: Vec<&str> = ENTITIES.iter().map(|(entity, _)| *entity).collect();
        literals.sort_by(|a, b| b.len().cmp(&a.len()));
        let pattern = literals
            .iter()
            .map(|literal| regex::escape(literal))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&pattern).expect("Invalid entity regex pattern")
    })
}

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex pattern"))
}

fn replacement_for(entity: &str) -> &'static str {
    ENTITIES
        .iter()
        .find(|(literal, _)| *literal == entity)
        .map(|(_, replacement)| *replacement)
        .unwrap_or("")
}

/// Decode the entity table in a single left-to-right pass
///
/// Text produced by a replacement is not rescanned, so `&amp;lt;` becomes
/// `&lt;` here. [`clean_content`] repeats the pass until nothing changes.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    entity_regex().replace_all(input, |caps: &Captures| replacement_for(&caps[0]))
}

/// Remove `<...>` sequences, then any unpaired angle bracket
pub fn strip_tags(input: &str) -> String {
    tag_regex()
        .replace_all(input, "")
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect()
}

/// Collapse whitespace runs to a single space and trim the ends
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn a rendered CMS field into plain display text
///
/// Entities are decoded before tags are stripped, and both steps repeat
/// until the text is stable. The result never contains `<`, `>` or an
/// entity from [`ENTITIES`]. Each round either shortens the text or ends
/// the loop.
pub fn clean_content(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut current = raw.to_string();
    loop {
        let next = strip_tags(&decode_entities(&current));
        if next == current {
            break;
        }
        current = next;
    }

    collapse_whitespace(&current)
}

/// [`clean_content`] for fields the CMS may omit
pub fn clean_opt(raw: Option<&str>) -> String {
    raw.map(clean_content).unwrap_or_default()
}

/// Clean a field and bound it to `max_length` characters
///
/// Truncated text is cut back to the last space inside the window, or at
/// `max_length` when the window holds no usable space, and gets
/// [`ELLIPSIS`] appended.
pub fn excerpt(raw: &str, max_length: usize) -> String {
    let cleaned = clean_content(raw);
    if cleaned.chars().count() <= max_length {
        return cleaned;
    }

    let truncated: String = cleaned.chars().take(max_length).collect();
    let cut = match truncated.rfind(' ') {
        Some(last_space) if last_space > 0 => &truncated[..last_space],
        _ => truncated.as_str(),
    };

    format!("{}{}", cut, ELLIPSIS)
}

/// Browser title for a page
pub fn page_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => format!("{} - {}", title, SITE_NAME),
        _ => DEFAULT_PAGE_TITLE.to_string(),
    }
}
