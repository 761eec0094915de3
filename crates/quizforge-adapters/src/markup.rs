//! Word-processor markup adapter.
//!
//! Converts the HTML a `.docx` converter emits into [`RawBlock`]s. The markup
//! is parsed into a DOM; every block-level element starts a new block, and
//! underlined letters inside a block become its emphasized tokens.

use std::collections::BTreeSet;

use scraper::{ElementRef, Html, Node};

use quizforge_core::emphasis::token_letter;
use quizforge_core::model::RawBlock;

const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "div", "table", "tr", "td",
    "th", "blockquote", "pre", "section", "article",
];

const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

fn is_block_tag(name: &str) -> bool {
    BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

fn is_skipped_tag(name: &str) -> bool {
    SKIPPED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Split markup into blocks carrying their emphasized letters.
///
/// Markup without any block-level element is read one line per block.
pub fn blocks_from_markup(markup: &str) -> Vec<RawBlock> {
    let document = Html::parse_document(markup);
    let root = document.root_element();

    let has_blocks = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|el| is_block_tag(el.value().name()));

    let mut builder = BlockBuilder {
        split_lines: !has_blocks,
        ..BlockBuilder::default()
    };
    builder.visit(root);
    builder.flush();

    tracing::debug!(blocks = builder.blocks.len(), "converted markup to blocks");
    builder.blocks
}

/// Whether `element` renders its content underlined.
pub fn is_underlined(element: ElementRef<'_>) -> bool {
    let el = element.value();
    match el.name() {
        "u" | "ins" => true,
        _ => el
            .attr("style")
            .is_some_and(|style| style.to_ascii_lowercase().contains("underline")),
    }
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<RawBlock>,
    text: String,
    emphasized: BTreeSet<String>,
    split_lines: bool,
}

impl BlockBuilder {
    fn visit(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if is_skipped_tag(name) {
            return;
        }
        if name == "br" {
            self.text.push(' ');
            return;
        }

        let block = is_block_tag(name);
        if block {
            self.flush();
        }

        if is_underlined(element) {
            let content: String = element.text().collect();
            if let Some(letter) = token_letter(&content) {
                self.emphasized.insert(letter.to_string());
            }
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.visit(child);
                    }
                }
                _ => {}
            }
        }

        if block {
            self.flush();
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.split_lines {
            self.text.push_str(text);
            return;
        }
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.text.push_str(first);
        }
        for line in lines {
            self.flush();
            self.text.push_str(line);
        }
    }

    /// Close the current block; blocks without text are dropped.
    fn flush(&mut self) {
        let text = collapse_whitespace(&self.text);
        self.text.clear();
        let emphasized_tokens = std::mem::take(&mut self.emphasized);
        if !text.is_empty() {
            self.blocks.push(RawBlock {
                text,
                emphasized_tokens,
            });
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(blocks: &[RawBlock]) -> Vec<&str> {
        blocks.iter().map(|b| b.text.as_str()).collect()
    }

    #[test]
    fn paragraphs_become_blocks() {
        let html = "<h1>Đề thi</h1><p>Question 1: What is X?</p>\n<p>A. foo</p><p></p><p>B. bar</p>";
        let blocks = blocks_from_markup(html);
        assert_eq!(
            texts(&blocks),
            vec!["Đề thi", "Question 1: What is X?", "A. foo", "B. bar"]
        );
        assert!(blocks.iter().all(|b| b.emphasized_tokens.is_empty()));
    }

    #[test]
    fn underlined_letters_are_emphasized() {
        let html = r#"<p><u>B</u>. bar</p><p><span style="text-decoration: underline">c</span>) stmt</p><p><u><strong>D.</strong></u> qux</p>"#;
        let blocks = blocks_from_markup(html);
        assert_eq!(blocks[0].text, "B. bar");
        assert!(blocks[0].emphasized_tokens.contains("B"));
        assert_eq!(blocks[1].text, "c) stmt");
        assert!(blocks[1].emphasized_tokens.contains("c"));
        assert_eq!(blocks[2].text, "D. qux");
        assert!(blocks[2].emphasized_tokens.contains("D"));
    }

    #[test]
    fn underline_style_with_quoted_font_name() {
        let html = r#"<p><span style="font-family:'Times New Roman';text-decoration:underline">B</span>. bar</p>"#;
        let blocks = blocks_from_markup(html);
        assert_eq!(blocks[0].text, "B. bar");
        assert!(blocks[0].emphasized_tokens.contains("B"));
    }

    #[test]
    fn span_without_underline_is_plain() {
        let html = r#"<p><span style="font-weight:bold">A</span>. foo</p>"#;
        assert!(blocks_from_markup(html)[0].emphasized_tokens.is_empty());
    }

    #[test]
    fn angle_bracket_inside_attribute() {
        let blocks = blocks_from_markup(r#"<p title="a>b">A. foo</p>"#);
        assert_eq!(texts(&blocks), vec!["A. foo"]);
    }

    #[test]
    fn underlined_words_are_not_tokens() {
        let blocks = blocks_from_markup("<p>A. the <u>answer</u> here</p>");
        assert!(blocks[0].emphasized_tokens.is_empty());
    }

    #[test]
    fn inline_tags_do_not_split_markers() {
        let blocks = blocks_from_markup("<p><strong>Câu 1</strong>: Tính<br/>tổng</p>");
        assert_eq!(blocks[0].text, "Câu 1: Tính tổng");
    }

    #[test]
    fn entities_and_whitespace() {
        let blocks = blocks_from_markup("<p>  A.&nbsp;x &amp;&#32;y &lt;&#x3E;  </p><p>&bogus; stays</p>");
        assert_eq!(texts(&blocks), vec!["A. x & y <>", "&bogus; stays"]);
    }

    #[test]
    fn nested_lists_split_per_item() {
        let html = "<ol><li>Question 1: x<ol><li>a) one</li><li>b) two</li></ol></li></ol>";
        let blocks = blocks_from_markup(html);
        assert_eq!(texts(&blocks), vec!["Question 1: x", "a) one", "b) two"]);
    }

    #[test]
    fn skipped_sections_vanish() {
        let html = "<!DOCTYPE html><head><title>t</title></head><!-- note --><style>p{}</style><script>var x = '<p>';</script><p>Item 1. ok</p>";
        let blocks = blocks_from_markup(html);
        assert_eq!(texts(&blocks), vec!["Item 1. ok"]);
    }

    #[test]
    fn markup_without_blocks_is_line_based() {
        let blocks = blocks_from_markup("Question 1: x\n<u>A</u>. foo\n\nB. bar");
        assert_eq!(texts(&blocks), vec!["Question 1: x", "A. foo", "B. bar"]);
        assert!(blocks[1].emphasized_tokens.contains("A"));
        assert!(blocks[2].emphasized_tokens.is_empty());
    }
}
