use html_escape::encode_text_to_string;

use crate::block::{Block, Span};
use crate::config::Config;
use crate::spacing::{self, Spacing};

/// Render blocks as an HTML fragment.
///
/// Every block carries its gap as an inline `margin-top`; headings also carry
/// their bottom margin. Styling beyond spacing is left to the page.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    let gaps = &config.spacing;

    for (block, spacing) in blocks.iter().zip(spacing::resolve(blocks)) {
        let mut style = Vec::new();
        if spacing != Spacing::None {
            style.push(format!("margin-top:{}px", spacing.points(gaps)));
        }

        match block {
            Block::Heading { content } => {
                style.push(format!("margin-bottom:{}px", gaps.heading_bottom));
                open_tag("h2", &style, &mut out);
                spans_to_html(content, &mut out);
                out.push_str("</h2>\n");
            }
            Block::Paragraph { content } => {
                open_tag("p", &style, &mut out);
                spans_to_html(content, &mut out);
                out.push_str("</p>\n");
            }
            Block::OrderedList { items } => {
                open_tag("ol", &style, &mut out);
                out.push('\n');
                for (index, item) in items.iter().enumerate() {
                    let item_style = item_gap_style(index, gaps.item_gap);
                    // Explicit value keeps numbering positional
                    out.push_str(&format!("<li value=\"{}\"{}>", index + 1, item_style));
                    spans_to_html(&item.content, &mut out);
                    if !item.nested.is_empty() {
                        out.push_str(&format!(
                            "\n<ul style=\"margin-top:{}px\">\n",
                            gaps.nested_gap
                        ));
                        for (nested_index, nested) in item.nested.iter().enumerate() {
                            out.push_str(&format!(
                                "<li{}>",
                                item_gap_style(nested_index, gaps.nested_gap)
                            ));
                            spans_to_html(&nested.content, &mut out);
                            out.push_str("</li>\n");
                        }
                        out.push_str("</ul>\n");
                    }
                    out.push_str("</li>\n");
                }
                out.push_str("</ol>\n");
            }
            Block::UnorderedList { items } => {
                open_tag("ul", &style, &mut out);
                out.push('\n');
                for (index, item) in items.iter().enumerate() {
                    out.push_str(&format!("<li{}>", item_gap_style(index, gaps.item_gap)));
                    spans_to_html(&item.content, &mut out);
                    out.push_str("</li>\n");
                }
                out.push_str("</ul>\n");
            }
        }
    }

    out
}

fn open_tag(tag: &str, style: &[String], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if !style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", style.join(";")));
    }
    out.push('>');
}

fn item_gap_style(index: usize, gap: u32) -> String {
    if index == 0 {
        String::new()
    } else {
        format!(" style=\"margin-top:{gap}px\"")
    }
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => {
                encode_text_to_string(text, out);
            }
            Span::Bold(text) => {
                out.push_str("<strong>");
                encode_text_to_string(text, out);
                out.push_str("</strong>");
            }
            Span::Italic(text) => {
                out.push_str("<em>");
                encode_text_to_string(text, out);
                out.push_str("</em>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, markup_to_html};
    use pretty_assertions::assert_eq;

    fn html(markup: &str) -> String {
        markup_to_html(markup, &Config::default())
    }

    #[test]
    fn empty() {
        assert_eq!(html(""), "");
    }

    #[test]
    fn heading_then_paragraph() {
        assert_eq!(
            html("## Context\nWe redesigned the **core flow**."),
            "<h2 style=\"margin-bottom:10px\">Context</h2>\n\
             <p>We redesigned the <strong>core flow</strong>.</p>\n"
        );
    }

    #[test]
    fn spacing_between_blocks() {
        assert_eq!(
            html("one\n\ntwo\n## Three"),
            "<p>one</p>\n\
             <p style=\"margin-top:22px\">two</p>\n\
             <h2 style=\"margin-top:28px;margin-bottom:10px\">Three</h2>\n"
        );
    }

    #[test]
    fn ordered_list_with_nested() {
        assert_eq!(
            html("3. a\n  - x\n  - y\n4. *b*"),
            "<ol>\n\
             <li value=\"1\">a\n\
             <ul style=\"margin-top:10px\">\n\
             <li>x</li>\n\
             <li style=\"margin-top:10px\">y</li>\n\
             </ul>\n\
             </li>\n\
             <li value=\"2\" style=\"margin-top:14px\"><em>b</em></li>\n\
             </ol>\n"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            html("- a\n- b"),
            "<ul>\n<li>a</li>\n<li style=\"margin-top:14px\">b</li>\n</ul>\n"
        );
    }

    #[test]
    fn escapes_text() {
        assert_eq!(
            html("a <b> & **<i>**"),
            "<p>a &lt;b&gt; &amp; <strong>&lt;i&gt;</strong></p>\n"
        );
    }
}
