//! Fragment-level HTML scanning.
//!
//! Locates elements by class token or attribute value using a regex over
//! opening tags, then finds the element's extent by depth-counting same-name
//! tags — no DOM, no HTML-parser dependency. Assumes the reasonably
//! well-formed markup a CMS renders; unclosed elements degrade to
//! "rest of the input" rather than erroring.

use regex::Regex;

/// One located element: its opening tag (including the angle brackets) and
/// its inner HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fragment<'a> {
    pub open_tag: &'a str,
    pub inner: &'a str,
}

/// Elements with no closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// All elements whose `class` attribute contains `class` as a whole token,
/// in document order.
pub(crate) fn elements_with_class<'a>(html: &'a str, class: &str) -> Vec<Fragment<'a>> {
    elements_matching(html, |open_tag| has_class_token(open_tag, class))
}

/// First element whose `class` attribute contains `class` as a whole token.
pub(crate) fn first_with_class<'a>(html: &'a str, class: &str) -> Option<Fragment<'a>> {
    elements_with_class(html, class).into_iter().next()
}

/// First element carrying `attr="value"` (exact value match).
pub(crate) fn first_with_attr<'a>(html: &'a str, attr: &str, value: &str) -> Option<Fragment<'a>> {
    elements_matching(html, |open_tag| {
        attr_value(open_tag, attr).as_deref() == Some(value)
    })
    .into_iter()
    .next()
}

/// Read a single attribute value off an opening tag. Handles double-quoted,
/// single-quoted, unquoted, and valueless attributes (the latter yield an
/// empty string, as DOM `getAttribute` does).
///
/// Attributes are tokenized left to right, so a name appearing inside
/// another attribute's quoted value never matches —
/// `<div title="a class=b" class="x">` resolves `class` to `"x"`.
pub(crate) fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let attr_re = Regex::new(
        r#"(?is)^\s*([a-z_:][a-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+)))?"#,
    )
    .expect("valid regex");

    // Skip "<tagname", drop the closing ">"/"/>".
    let body_start = open_tag
        .find(char::is_whitespace)
        .unwrap_or(open_tag.len());
    let mut rest = open_tag[body_start..]
        .trim_end_matches('>')
        .trim_end_matches('/');

    while let Some(cap) = attr_re.captures(rest) {
        let whole = cap.get(0).expect("match group 0");
        let attr_name = cap.get(1).expect("attr name group").as_str();
        let value = cap
            .get(2)
            .or_else(|| cap.get(3))
            .or_else(|| cap.get(4))
            .map_or("", |m| m.as_str());
        if attr_name.eq_ignore_ascii_case(name) {
            return Some(value.to_string());
        }
        rest = &rest[whole.end()..];
    }
    None
}

/// Approximates DOM `textContent().trim()` on a fragment's inner HTML:
/// strips tags, decodes the common named entities, trims the result.
pub(crate) fn text_content(inner: &str) -> String {
    let tag_re = Regex::new(r"(?s)<[^>]*>").expect("valid regex");
    let stripped = tag_re.replace_all(inner, "");
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(s: &str) -> String {
    // &amp; last, so "&amp;lt;" decodes to "&lt;" and stops there.
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Whether an opening tag's `class` attribute contains `class` as a
/// whitespace-separated token (`"map-list"` must not match an element of
/// class `"map-list-item"`).
fn has_class_token(open_tag: &str, class: &str) -> bool {
    attr_value(open_tag, "class")
        .is_some_and(|v| v.split_whitespace().any(|token| token == class))
}

/// All elements whose opening tag satisfies `matches`, in document order.
fn elements_matching<'a, F>(html: &'a str, matches: F) -> Vec<Fragment<'a>>
where
    F: Fn(&str) -> bool,
{
    let open_re = Regex::new(r"(?is)<([a-z][a-z0-9-]*)\b[^>]*>").expect("valid regex");

    // ASCII-lowercased copy for case-insensitive scanning; byte offsets are
    // identical to the original.
    let lower = html.to_ascii_lowercase();

    let mut found = Vec::new();
    for cap in open_re.captures_iter(html) {
        let whole = cap.get(0).expect("match group 0");
        let open_tag = whole.as_str();
        if !matches(open_tag) {
            continue;
        }
        let name = cap.get(1).expect("tag name group").as_str();
        let inner = inner_html(html, &lower, name, open_tag, whole.end());
        found.push(Fragment { open_tag, inner });
    }
    found
}

/// The inner HTML of the element whose opening tag ends at `content_start`.
///
/// Depth-counts subsequent same-name open/close tags. Void and self-closing
/// elements have empty inner HTML; an unclosed element runs to end of input.
fn inner_html<'a>(
    html: &'a str,
    lower: &str,
    name: &str,
    open_tag: &str,
    content_start: usize,
) -> &'a str {
    let name = name.to_ascii_lowercase();
    if VOID_TAGS.contains(&name.as_str()) || open_tag.trim_end_matches('>').ends_with('/') {
        return &html[content_start..content_start];
    }

    let open_prefix = format!("<{name}");
    let close_prefix = format!("</{name}");

    let mut depth = 1usize;
    let mut pos = content_start;

    while let Some(rel) = lower[pos..].find('<') {
        let at = pos + rel;
        let rest = &lower[at..];

        if rest.starts_with(&close_prefix) && closes_cleanly(&rest[close_prefix.len()..]) {
            depth -= 1;
            if depth == 0 {
                return &html[content_start..at];
            }
            pos = at + close_prefix.len();
        } else if rest.starts_with(&open_prefix) && tag_name_ends(&rest[open_prefix.len()..]) {
            // A nested same-name element; self-closing ones do not add depth.
            let tag_end = rest.find('>').map_or(rest.len(), |i| i + 1);
            if !rest[..tag_end].trim_end_matches('>').ends_with('/') {
                depth += 1;
            }
            pos = at + tag_end;
        } else {
            pos = at + 1;
        }
    }

    &html[content_start..]
}

/// After the tag name, a closing tag may only hold whitespace before `>`.
fn closes_cleanly(rest: &str) -> bool {
    let trimmed = rest.trim_start();
    trimmed.starts_with('>')
}

/// Whether the character after `<name` terminates the tag name, so `<div`
/// does not match `<divx`.
fn tag_name_ends(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|c| c.is_whitespace() || c == '>' || c == '/')
}
