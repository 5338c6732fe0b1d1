//! Rich-text serialization
//!
//! The content API stores formatted text as a flat list of typed nodes with
//! character-offset span marks. This module serializes that structure to
//! plain text (for word counting) and to HTML (for rendering).

use serde::{Deserialize, Serialize};

use crate::helpers::html::html_escape;

/// One node of a rich-text body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub spans: Vec<SpanMark>,

    /// Image nodes carry a url instead of text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Block-level node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading1")]
    Heading1,
    #[serde(rename = "heading2")]
    Heading2,
    #[serde(rename = "heading3")]
    Heading3,
    #[serde(rename = "heading4")]
    Heading4,
    #[serde(rename = "heading5")]
    Heading5,
    #[serde(rename = "heading6")]
    Heading6,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "o-list-item")]
    OrderedListItem,
    #[serde(rename = "preformatted")]
    Preformatted,
    #[serde(rename = "image")]
    Image,
    /// Unrecognized node types render as plain paragraphs
    #[serde(other)]
    Other,
}

/// An inline formatting mark over a character range of a node's text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanMark {
    pub start: usize,
    pub end: usize,

    #[serde(rename = "type")]
    pub kind: SpanKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "hyperlink")]
    Hyperlink,
    #[serde(other)]
    Other,
}

/// Extra payload of a span mark (the link target for hyperlinks)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
}

/// Serialize a rich-text body to plain text, stripping all markup
///
/// Image nodes contribute nothing; text nodes are joined with newlines.
pub fn as_text(body: &[RichTextNode]) -> String {
    let parts: Vec<&str> = body
        .iter()
        .filter(|node| node.kind != NodeKind::Image)
        .map(|node| node.text.as_str())
        .collect();
    parts.join("\n")
}

/// Serialize a rich-text body to HTML
///
/// Consecutive list items are grouped into a single `<ul>`/`<ol>` element.
pub fn as_html(body: &[RichTextNode]) -> String {
    let mut out = String::new();
    let mut open_list: Option<&str> = None;

    for node in body {
        let list_tag = match node.kind {
            NodeKind::ListItem => Some("ul"),
            NodeKind::OrderedListItem => Some("ol"),
            _ => None,
        };

        if open_list != list_tag {
            if let Some(tag) = open_list {
                out.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list_tag {
                out.push_str(&format!("<{}>", tag));
            }
            open_list = list_tag;
        }

        out.push_str(&render_node(node));
    }

    if let Some(tag) = open_list {
        out.push_str(&format!("</{}>", tag));
    }

    out
}

/// Render a single node to HTML
fn render_node(node: &RichTextNode) -> String {
    let inner = render_spans(&node.text, &node.spans);

    match node.kind {
        NodeKind::Paragraph | NodeKind::Other => format!("<p>{}</p>", inner),
        NodeKind::Heading1 => format!("<h1>{}</h1>", inner),
        NodeKind::Heading2 => format!("<h2>{}</h2>", inner),
        NodeKind::Heading3 => format!("<h3>{}</h3>", inner),
        NodeKind::Heading4 => format!("<h4>{}</h4>", inner),
        NodeKind::Heading5 => format!("<h5>{}</h5>", inner),
        NodeKind::Heading6 => format!("<h6>{}</h6>", inner),
        NodeKind::ListItem | NodeKind::OrderedListItem => format!("<li>{}</li>", inner),
        NodeKind::Preformatted => format!("<pre>{}</pre>", inner),
        NodeKind::Image => {
            let src = node.url.as_deref().unwrap_or("");
            let alt = node.alt.as_deref().unwrap_or("");
            format!(
                r#"<img src="{}" alt="{}">"#,
                html_escape(src),
                html_escape(alt)
            )
        }
    }
}

/// Apply span marks to a node's text
///
/// Span offsets are character-based in the wire format. Overlapping spans
/// are not representable in flat HTML; when two spans overlap the earlier
/// one wins and the later one is dropped.
fn render_spans(text: &str, spans: &[SpanMark]) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut sorted: Vec<&SpanMark> = spans.iter().collect();
    sorted.sort_by_key(|s| (s.start, s.end));

    let mut out = String::new();
    let mut pos = 0;

    for span in sorted {
        if span.start < pos || span.end > chars.len() || span.start > span.end {
            continue;
        }

        let prefix: String = chars[pos..span.start].iter().collect();
        out.push_str(&html_escape(&prefix));

        let body: String = chars[span.start..span.end].iter().collect();
        let body = html_escape(&body);

        match span.kind {
            SpanKind::Strong => out.push_str(&format!("<strong>{}</strong>", body)),
            SpanKind::Em => out.push_str(&format!("<em>{}</em>", body)),
            SpanKind::Hyperlink => {
                let url = span
                    .data
                    .as_ref()
                    .and_then(|d| d.url.as_deref())
                    .unwrap_or("");
                out.push_str(&format!(r#"<a href="{}">{}</a>"#, html_escape(url), body));
            }
            SpanKind::Other => out.push_str(&body),
        }

        pos = span.end;
    }

    let rest: String = chars[pos..].iter().collect();
    out.push_str(&html_escape(&rest));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> RichTextNode {
        RichTextNode {
            kind: NodeKind::Paragraph,
            text: text.to_string(),
            spans: Vec::new(),
            url: None,
            alt: None,
        }
    }

    #[test]
    fn test_as_text_joins_nodes() {
        let body = vec![paragraph("one two"), paragraph("three")];
        assert_eq!(as_text(&body), "one two\nthree");
    }

    #[test]
    fn test_as_text_skips_images() {
        let mut image = paragraph("");
        image.kind = NodeKind::Image;
        image.url = Some("https://example.com/pic.png".to_string());

        let body = vec![paragraph("hello"), image];
        assert_eq!(as_text(&body), "hello");
    }

    #[test]
    fn test_as_html_paragraph_and_heading() {
        let mut heading = paragraph("Title");
        heading.kind = NodeKind::Heading2;

        let body = vec![heading, paragraph("Body text")];
        assert_eq!(as_html(&body), "<h2>Title</h2><p>Body text</p>");
    }

    #[test]
    fn test_as_html_groups_list_items() {
        let mut a = paragraph("first");
        a.kind = NodeKind::ListItem;
        let mut b = paragraph("second");
        b.kind = NodeKind::ListItem;

        let body = vec![a, b, paragraph("after")];
        assert_eq!(
            as_html(&body),
            "<ul><li>first</li><li>second</li></ul><p>after</p>"
        );
    }

    #[test]
    fn test_as_html_escapes_text() {
        let body = vec![paragraph("a < b & c")];
        assert_eq!(as_html(&body), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_render_spans_strong() {
        let spans = vec![SpanMark {
            start: 0,
            end: 5,
            kind: SpanKind::Strong,
            data: None,
        }];
        assert_eq!(
            render_spans("hello world", &spans),
            "<strong>hello</strong> world"
        );
    }

    #[test]
    fn test_render_spans_hyperlink() {
        let spans = vec![SpanMark {
            start: 6,
            end: 11,
            kind: SpanKind::Hyperlink,
            data: Some(SpanData {
                url: Some("https://example.com".to_string()),
            }),
        }];
        assert_eq!(
            render_spans("see a link here", &spans[..]),
            r#"see a <a href="https://example.com">link </a>here"#
        );
    }

    #[test]
    fn test_render_spans_out_of_range_ignored() {
        let spans = vec![SpanMark {
            start: 4,
            end: 99,
            kind: SpanKind::Strong,
            data: None,
        }];
        assert_eq!(render_spans("abc", &spans), "abc");
    }

    #[test]
    fn test_unknown_node_kind_parses_as_other() {
        let json = r#"{ "type": "embed", "text": "x", "spans": [] }"#;
        let node: RichTextNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Other);
    }
}
