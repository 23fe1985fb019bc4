//! Lesson text renderer.
//!
//! Turns a block of lesson text into display blocks, one line at a time.
//! The classification order below is significant and must not be
//! rearranged: a line is claimed by the first rule that matches it.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref IMAGE_RE: Regex = Regex::new(r"^!\[(.*?)\]\((.*?)\)").unwrap();
    static ref ROMAN_RE: Regex = Regex::new(r"^[IVX]+\.\s").unwrap();
    static ref NUMBERED_RE: Regex = Regex::new(r"^(\d+\.)\s").unwrap();
    static ref INLINE_RE: Regex = Regex::new(r"\[[^\]]+\]\([^)]+\)|\*\*[^*]+\*\*").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)$").unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"^\*\*([^*]+)\*\*$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Break,
    Image {
        alt: String,
        url: String,
    },
    Heading {
        spans: Vec<Span>,
    },
    Subheading {
        spans: Vec<Span>,
    },
    /// Section heading introduced by a roman numeral (`I. `, `II. `...).
    /// The numeral stays part of the text.
    RomanHeading {
        spans: Vec<Span>,
    },
    Callout {
        spans: Vec<Span>,
    },
    /// Ordered item; `number` keeps the author's original marker ("3.").
    NumberedItem {
        number: String,
        spans: Vec<Span>,
    },
    Bullet {
        spans: Vec<Span>,
    },
    Paragraph {
        spans: Vec<Span>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Span {
    Text { text: String },
    Bold { text: String },
    Link { text: String, url: String },
}

/// Splits inline markers out of a line: `[text](url)` becomes a link span,
/// `**text**` a bold span, everything in between plain text.
pub fn render_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in INLINE_RE.find_iter(text) {
        if m.start() > last {
            spans.push(Span::Text {
                text: text[last..m.start()].to_string(),
            });
        }
        let part = m.as_str();
        if let Some(caps) = LINK_RE.captures(part) {
            spans.push(Span::Link {
                text: caps[1].to_string(),
                url: caps[2].to_string(),
            });
        } else if let Some(caps) = BOLD_RE.captures(part) {
            spans.push(Span::Bold {
                text: caps[1].to_string(),
            });
        }
        last = m.end();
    }

    if last < text.len() {
        spans.push(Span::Text {
            text: text[last..].to_string(),
        });
    }

    spans
}

fn classify_line(line: &str) -> Block {
    if line.trim().is_empty() {
        return Block::Break;
    }

    if let Some(caps) = IMAGE_RE.captures(line) {
        return Block::Image {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
        };
    }

    if let Some(rest) = line.strip_prefix("# ") {
        return Block::Heading {
            spans: render_spans(rest),
        };
    }

    if let Some(rest) = line.strip_prefix("## ") {
        return Block::Subheading {
            spans: render_spans(rest),
        };
    }

    if ROMAN_RE.is_match(line) {
        return Block::RomanHeading {
            spans: render_spans(line),
        };
    }

    if let Some(rest) = line.strip_prefix('>') {
        return Block::Callout {
            spans: render_spans(rest.trim_start()),
        };
    }

    if let Some(caps) = NUMBERED_RE.captures(line) {
        let number = caps[1].to_string();
        let rest = &line[caps[0].len()..];
        return Block::NumberedItem {
            number,
            spans: render_spans(rest),
        };
    }

    if let Some(rest) = line.strip_prefix('.') {
        return Block::Bullet {
            spans: render_spans(rest.trim_start()),
        };
    }

    Block::Paragraph {
        spans: render_spans(line),
    }
}

/// Renders a whole lesson body. Pure; never fails — anything a rule does
/// not claim falls through to a plain paragraph.
pub fn render(text: &str) -> Vec<Block> {
    text.split('\n').map(classify_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span]) -> String {
        spans
            .iter()
            .map(|s| match s {
                Span::Text { text } | Span::Bold { text } => text.clone(),
                Span::Link { text, .. } => text.clone(),
            })
            .collect()
    }

    #[test]
    fn test_blank_line_is_break() {
        assert_eq!(classify_line("   "), Block::Break);
        assert_eq!(classify_line(""), Block::Break);
    }

    #[test]
    fn test_image_line() {
        match classify_line("![The ribbon](https://example.com/ribbon.png)") {
            Block::Image { alt, url } => {
                assert_eq!(alt, "The ribbon");
                assert_eq!(url, "https://example.com/ribbon.png");
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_heading_levels() {
        assert!(matches!(classify_line("# Title"), Block::Heading { .. }));
        assert!(matches!(
            classify_line("## Subtitle"),
            Block::Subheading { .. }
        ));
        // "##" without the trailing space is not a subheading marker
        assert!(matches!(classify_line("##x"), Block::Paragraph { .. }));
    }

    #[test]
    fn test_heading_marker_is_stripped() {
        match classify_line("## Saving a document") {
            Block::Subheading { spans } => assert_eq!(text_of(&spans), "Saving a document"),
            other => panic!("expected subheading, got {:?}", other),
        }
    }

    #[test]
    fn test_roman_heading_keeps_numeral() {
        match classify_line("II. Formatting text") {
            Block::RomanHeading { spans } => assert_eq!(text_of(&spans), "II. Formatting text"),
            other => panic!("expected roman heading, got {:?}", other),
        }
    }

    #[test]
    fn test_callout_strips_marker() {
        match classify_line("> Remember to save often") {
            Block::Callout { spans } => assert_eq!(text_of(&spans), "Remember to save often"),
            other => panic!("expected callout, got {:?}", other),
        }
    }

    #[test]
    fn test_numbered_item_preserves_number() {
        match classify_line("12. Click the File menu") {
            Block::NumberedItem { number, spans } => {
                assert_eq!(number, "12.");
                assert_eq!(text_of(&spans), "Click the File menu");
            }
            other => panic!("expected numbered item, got {:?}", other),
        }
    }

    #[test]
    fn test_dot_bullet() {
        match classify_line(". a bullet point") {
            Block::Bullet { spans } => assert_eq!(text_of(&spans), "a bullet point"),
            other => panic!("expected bullet, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_paragraph_fallback() {
        assert!(matches!(
            classify_line("Just an ordinary sentence."),
            Block::Paragraph { .. }
        ));
    }

    #[test]
    fn test_roman_wins_over_numbered_order() {
        // "IV. " could look like list markup to a sloppier rule set; the
        // roman check runs before the numbered one and must claim it.
        assert!(matches!(
            classify_line("IV. Printing"),
            Block::RomanHeading { .. }
        ));
        // while a digit marker is still a numbered item
        assert!(matches!(
            classify_line("4. Printing"),
            Block::NumberedItem { .. }
        ));
    }

    #[test]
    fn test_image_wins_over_bullet_order() {
        // An image line does not reach the later rules even though it
        // contains brackets and dots.
        assert!(matches!(
            classify_line("![a.b](http://x/y.png)"),
            Block::Image { .. }
        ));
    }

    #[test]
    fn test_inline_link_and_bold() {
        let spans = render_spans("See **this** and [the docs](https://docs.example) now");
        assert_eq!(
            spans,
            vec![
                Span::Text {
                    text: "See ".into()
                },
                Span::Bold {
                    text: "this".into()
                },
                Span::Text {
                    text: " and ".into()
                },
                Span::Link {
                    text: "the docs".into(),
                    url: "https://docs.example".into()
                },
                Span::Text {
                    text: " now".into()
                },
            ]
        );
    }

    #[test]
    fn test_inline_markup_inside_numbered_item() {
        match classify_line("1. Open **File Explorer**") {
            Block::NumberedItem { number, spans } => {
                assert_eq!(number, "1.");
                assert_eq!(
                    spans[1],
                    Span::Bold {
                        text: "File Explorer".into()
                    }
                );
            }
            other => panic!("expected numbered item, got {:?}", other),
        }
    }

    #[test]
    fn test_render_whole_lesson() {
        let lesson = "# Hardware\n\nII. The parts\n1. The case\n. mouse\n> Do not unplug while on\nplain text";
        let blocks = render(lesson);
        assert_eq!(blocks.len(), 7);
        assert!(matches!(blocks[0], Block::Heading { .. }));
        assert!(matches!(blocks[1], Block::Break));
        assert!(matches!(blocks[2], Block::RomanHeading { .. }));
        assert!(matches!(blocks[3], Block::NumberedItem { .. }));
        assert!(matches!(blocks[4], Block::Bullet { .. }));
        assert!(matches!(blocks[5], Block::Callout { .. }));
        assert!(matches!(blocks[6], Block::Paragraph { .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(&classify_line("## Intro")).unwrap();
        assert_eq!(json["type"], "subheading");
    }
}
