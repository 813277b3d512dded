//! Allowlist sanitizer for breach descriptions
//!
//! Sources ship descriptions as HTML. Before anything renders one, the
//! fragment is parsed and re-emitted with only a small set of inline and
//! block tags; all text is escaped.

use scraper::{ElementRef, Html, Node};

/// Tags re-emitted as-is (without attributes)
const ALLOWED_TAGS: &[&str] = &["b", "strong", "i", "em", "p", "ul", "ol", "li", "code"];

/// Tags dropped together with everything inside them
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "textarea", "title",
];

const ALLOWED_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

/// Sanitize an untrusted description fragment
pub fn sanitize_description(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(fragment.root_element(), &mut out);
    out
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    write_element(el, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if DROPPED_TAGS.contains(&name) {
        return;
    }

    match name {
        "br" => out.push_str("<br>"),
        "a" => match element.value().attr("href").and_then(safe_href) {
            Some(href) => {
                out.push_str("<a href=\"");
                out.push_str(&escape_html(href));
                out.push_str("\" rel=\"noopener noreferrer\" target=\"_blank\">");
                write_children(element, out);
                out.push_str("</a>");
            }
            None => write_children(element, out),
        },
        tag if ALLOWED_TAGS.contains(&tag) => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            write_children(element, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        // unknown tags are unwrapped
        _ => write_children(element, out),
    }
}

fn safe_href(href: &str) -> Option<&str> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    ALLOWED_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
        .then_some(href)
}

/// Escape text for inclusion in HTML content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes() {
        assert_eq!(
            sanitize_description("In 2013, 153M accounts leaked."),
            "In 2013, 153M accounts leaked."
        );
    }

    #[test]
    fn test_script_removed() {
        let out = sanitize_description("Hello<script>alert(1)</script> world");
        assert_eq!(out, "Hello world");
    }

    #[test]
    fn test_event_handlers_stripped() {
        let out = sanitize_description("<b onclick=\"steal()\">bold</b><img src=x onerror=alert(1)>");
        assert_eq!(out, "<b>bold</b>");
    }

    #[test]
    fn test_links_keep_safe_href() {
        let out = sanitize_description(
            "See <a href=\"https://example.com/a?b=1&amp;c=2\" target=\"_self\">this</a>",
        );
        assert_eq!(
            out,
            "See <a href=\"https://example.com/a?b=1&amp;c=2\" rel=\"noopener noreferrer\" target=\"_blank\">this</a>"
        );
    }

    #[test]
    fn test_javascript_href_unwrapped() {
        let out = sanitize_description("<a href=\"javascript:alert(1)\">click</a>");
        assert_eq!(out, "click");
    }

    #[test]
    fn test_text_is_escaped() {
        let out = sanitize_description("a &lt;b&gt; \"quoted\"");
        assert_eq!(out, "a &lt;b&gt; &quot;quoted&quot;");
    }

    #[test]
    fn test_unknown_tags_unwrapped() {
        let out = sanitize_description("<div><span>kept</span><br/>text</div>");
        assert_eq!(out, "kept<br>text");
    }
}
