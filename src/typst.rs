use crate::block::{Block, ListItem, Span};
use crate::config::Config;
use crate::spacing::{self, Spacing};

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);

    for (block, spacing) in blocks.iter().zip(spacing::resolve(blocks)) {
        if spacing != Spacing::None {
            out.push_str(&format!("#v({}pt)\n", spacing.points(&config.spacing)));
        }
        emit_block(block, config, &mut out);
    }

    out
}

fn emit_preamble(config: &Config, out: &mut String) {
    let numbering = if config.page.numbers { "\"1\"" } else { "none" };
    out.push_str(&format!(
        "#set page(paper: {}, numbering: {})\n",
        string_literal(&config.page.paper),
        numbering
    ));
    out.push_str(&format!("#set text(size: {}pt)\n", config.font.size));
    // All vertical gaps come from explicit #v() calls
    out.push_str("#set par(spacing: 0pt)\n");
    out.push_str("#set block(spacing: 0pt)\n");
    out.push_str(&format!(
        "#set enum(spacing: {0}pt)\n#set list(spacing: {0}pt)\n\n",
        config.spacing.item_gap
    ));
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { content } => {
            out.push_str("== ");
            spans_to_typst(content, out);
            out.push('\n');
            out.push_str(&format!("#v({}pt)\n\n", config.spacing.heading_bottom));
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::OrderedList { items } => {
            for (index, item) in items.iter().enumerate() {
                // Positional numbering, whatever the source said
                out.push_str(&format!("{}. ", index + 1));
                spans_to_typst(&item.content, out);
                out.push('\n');
                emit_nested(item, config, out);
            }
            out.push('\n');
        }
        Block::UnorderedList { items } => {
            for item in items {
                out.push_str("- ");
                spans_to_typst(&item.content, out);
                out.push('\n');
            }
            out.push('\n');
        }
    }
}

fn emit_nested(item: &ListItem, config: &Config, out: &mut String) {
    if item.nested.is_empty() {
        return;
    }
    let gap = config.spacing.nested_gap;
    // Indented so Typst keeps it inside the parent item
    out.push_str(&format!("   #v({gap}pt)\n   #list(spacing: {gap}pt"));
    for nested in &item.nested {
        out.push_str(", [");
        spans_to_typst(&nested.content, out);
        out.push(']');
    }
    out.push_str(")\n");
}

/// Every call starts a fresh line or content block, so the first span is
/// escaped as line-start text.
fn spans_to_typst(spans: &[Span], out: &mut String) {
    for (i, span) in spans.iter().enumerate() {
        let line_start = i == 0;
        match span {
            Span::Text(text) => escape_into(text, line_start, out),
            Span::Bold(text) => {
                out.push_str("#strong[");
                escape_into(text, line_start, out);
                out.push(']');
            }
            Span::Italic(text) => {
                out.push_str("#emph[");
                escape_into(text, line_start, out);
                out.push(']');
            }
        }
    }
}

fn escape_into(text: &str, line_start: bool, out: &mut String) {
    let mut text = text;
    if line_start {
        // `12. x` at the start of a line would become a numbered item
        let digits = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && text[digits..].starts_with('.') {
            out.push_str(&text[..digits]);
            out.push_str("\\.");
            text = &text[digits + 1..];
        }
    }
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '+' | '-'
            | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// Quoted Typst string literal
fn string_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use crate::{Config, markup_to_typst};

    fn body(markup: &str) -> String {
        let out = markup_to_typst(markup, &Config::default());
        let start = out.find("\n\n").expect("preamble") + 2;
        out[start..].to_string()
    }

    #[test]
    fn preamble() {
        let out = markup_to_typst("", &Config::default());
        assert_eq!(
            out,
            "#set page(paper: \"a4\", numbering: none)\n\
             #set text(size: 14pt)\n\
             #set par(spacing: 0pt)\n\
             #set block(spacing: 0pt)\n\
             #set enum(spacing: 14pt)\n\
             #set list(spacing: 14pt)\n\n"
        );
    }

    #[test]
    fn heading() {
        assert_eq!(body("## Hello"), "== Hello\n#v(10pt)\n\n");
    }

    #[test]
    fn paragraph_after_heading_has_no_gap() {
        assert_eq!(
            body("## Title\nSome text."),
            "== Title\n#v(10pt)\n\nSome text.\n\n"
        );
    }

    #[test]
    fn heading_after_paragraph_gets_large_gap() {
        assert_eq!(body("Intro\n## Next"), "Intro\n\n#v(28pt)\n== Next\n#v(10pt)\n\n");
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(body("**bold** and *it*"), "#strong[bold] and #emph[it]\n\n");
    }

    #[test]
    fn ordered_list_renumbered_with_nested() {
        assert_eq!(
            body("5. one\n  - sub\n6. two"),
            "1. one\n   #v(10pt)\n   #list(spacing: 10pt, [sub])\n2. two\n\n"
        );
    }

    #[test]
    fn unordered_list_after_paragraph() {
        assert_eq!(body("Text\n- a\n• b"), "Text\n\n#v(22pt)\n- a\n- b\n\n");
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(body("a # b"), "a \\# b\n\n");
        assert_eq!(body("see https://x.io"), "see https:\\/\\/x.io\n\n");
        assert_eq!(body("+ not a list"), "\\+ not a list\n\n");
    }

    #[test]
    fn leading_number_in_paragraph_is_not_a_list() {
        assert_eq!(
            body("1. one\n  2. two"),
            "1. one\n\n#v(22pt)\n2\\. two\n\n"
        );
        assert_eq!(body("3.14 is pi"), "3\\.14 is pi\n\n");
    }

    #[test]
    fn leading_number_in_list_items_is_escaped() {
        assert_eq!(body("- 3. three"), "- 3\\. three\n\n");
        assert_eq!(
            body("1. x\n  - 4. four"),
            "1. x\n   #v(10pt)\n   #list(spacing: 10pt, [4\\. four])\n\n"
        );
        assert_eq!(body("**5.** bold"), "#strong[5\\.] bold\n\n");
    }

    #[test]
    fn number_later_in_text_is_untouched() {
        assert_eq!(body("Step 2. done"), "Step 2. done\n\n");
    }

    #[test]
    fn paper_name_is_quoted_safely() {
        let mut config = Config::default();
        config.page.paper = "a4\", numbering: \"i".to_string();
        let out = markup_to_typst("x", &config);
        assert!(out.starts_with("#set page(paper: \"a4\\\", numbering: \\\"i\", numbering: none)\n"));
    }

    #[test]
    fn page_numbers_from_config() {
        let mut config = Config::default();
        config.page.numbers = true;
        let out = markup_to_typst("x", &config);
        assert!(out.starts_with("#set page(paper: \"a4\", numbering: \"1\")\n"));
    }
}
