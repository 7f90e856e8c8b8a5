use crate::block::Span;

/// Parse `**bold**` and `*italic*` spans out of a single line of text.
///
/// Bold is tried before italic at every position and both match
/// non-greedily, so `**a*b*c**` is one bold span with content `a*b*c`.
/// Emphasis does not nest. Markers without a closing partner are kept as
/// literal text.
pub fn format_inline(text: &str) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'*' {
            pos += 1;
            continue;
        }

        let matched = try_bold(text, pos)
            .map(|(inner, end)| (Span::Bold(inner.to_string()), end))
            .or_else(|| try_italic(text, pos).map(|(inner, end)| (Span::Italic(inner.to_string()), end)));

        match matched {
            Some((span, end)) => {
                if pos > text_start {
                    spans.push(Span::Text(text[text_start..pos].to_string()));
                }
                spans.push(span);
                pos = end;
                text_start = end;
            }
            None => pos += 1,
        }
    }

    if text_start < bytes.len() {
        spans.push(Span::Text(text[text_start..].to_string()));
    }

    spans
}

/// `**inner**` starting at `start`. Returns the inner text and the byte offset
/// just past the closing marker.
fn try_bold(text: &str, start: usize) -> Option<(&str, usize)> {
    let rest = text.get(start..)?.strip_prefix("**")?;
    let bytes = rest.as_bytes();
    // Closing marker may not start at 0: the content must be non-empty.
    let close = (1..bytes.len().saturating_sub(1))
        .find(|&i| bytes[i] == b'*' && bytes[i + 1] == b'*')?;
    Some((&rest[..close], start + 2 + close + 2))
}

/// `*inner*` starting at `start`.
fn try_italic(text: &str, start: usize) -> Option<(&str, usize)> {
    let rest = text.get(start..)?.strip_prefix('*')?;
    let close = rest.as_bytes().iter().skip(1).position(|&b| b == b'*')? + 1;
    Some((&rest[..close], start + 1 + close + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::plain_text;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn bold(s: &str) -> Span {
        Span::Bold(s.to_string())
    }

    fn italic(s: &str) -> Span {
        Span::Italic(s.to_string())
    }

    #[test]
    fn plain() {
        assert_eq!(format_inline("just words"), vec![text("just words")]);
    }

    #[test]
    fn empty() {
        assert!(format_inline("").is_empty());
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(
            format_inline("a **b** c *d* e"),
            vec![text("a "), bold("b"), text(" c "), italic("d"), text(" e")]
        );
    }

    #[test]
    fn bold_takes_precedence_over_inner_italic() {
        assert_eq!(format_inline("**a*b*c**"), vec![bold("a*b*c")]);
    }

    #[test]
    fn non_greedy() {
        assert_eq!(
            format_inline("**a** and **b**"),
            vec![bold("a"), text(" and "), bold("b")]
        );
        assert_eq!(format_inline("*a**b*"), vec![italic("a"), italic("b")]);
    }

    #[test]
    fn unterminated_markers_stay_literal() {
        assert_eq!(format_inline("a * b"), vec![text("a * b")]);
        assert_eq!(format_inline("trailing*"), vec![text("trailing*")]);
        assert_eq!(format_inline("**open"), vec![text("**open")]);
    }

    #[test]
    fn empty_emphasis_is_not_a_span() {
        // `**` with nothing inside falls back to an italic around a lone star
        assert_eq!(format_inline("***"), vec![italic("*")]);
        assert_eq!(format_inline("**"), vec![text("**")]);
    }

    #[test]
    fn multibyte_content() {
        assert_eq!(
            format_inline("Мы **переделали** *поток* •"),
            vec![
                text("Мы "),
                bold("переделали"),
                text(" "),
                italic("поток"),
                text(" •")
            ]
        );
    }

    #[test]
    fn no_visible_characters_lost() {
        let input = "a **b** c *d";
        let visible = plain_text(&format_inline(input));
        // only the consumed markers disappear
        assert_eq!(visible, "a b c *d");
    }
}
