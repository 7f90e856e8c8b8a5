use crate::block::{Block, ListItem, NestedListItem};
use crate::inline::format_inline;

/// Lines indented by at least this many whitespace characters count as nested.
const NESTED_INDENT: usize = 2;

/// Parse description markup into a list of blocks
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = ParseState::default();

    for line in content.split('\n') {
        process_line(line, &mut state, &mut blocks);
    }
    state.flush(&mut blocks);

    log::debug!("parsed {} block(s) from {} byte(s)", blocks.len(), content.len());
    blocks
}

#[derive(Default)]
struct ParseState {
    // The block still accepting lines of its own kind
    open: Option<OpenBlock>,
}

enum OpenBlock {
    Paragraph(Vec<String>),
    OrderedList(Vec<ListItem>),
    UnorderedList(Vec<ListItem>),
}

impl OpenBlock {
    fn finish(self) -> Block {
        match self {
            OpenBlock::Paragraph(lines) => Block::Paragraph {
                content: format_inline(&lines.join(" ")),
            },
            OpenBlock::OrderedList(items) => Block::OrderedList { items },
            OpenBlock::UnorderedList(items) => Block::UnorderedList { items },
        }
    }
}

impl ParseState {
    fn flush(&mut self, blocks: &mut Vec<Block>) {
        if let Some(open) = self.open.take() {
            let block = open.finish();
            log::trace!("closing {:?} block", block.kind());
            blocks.push(block);
        }
    }

    fn push_ordered(&mut self, item: ListItem, blocks: &mut Vec<Block>) {
        match &mut self.open {
            Some(OpenBlock::OrderedList(items)) => items.push(item),
            _ => {
                self.flush(blocks);
                self.open = Some(OpenBlock::OrderedList(vec![item]));
            }
        }
    }

    fn push_unordered(&mut self, item: ListItem, blocks: &mut Vec<Block>) {
        match &mut self.open {
            Some(OpenBlock::UnorderedList(items)) => items.push(item),
            _ => {
                self.flush(blocks);
                self.open = Some(OpenBlock::UnorderedList(vec![item]));
            }
        }
    }

    fn push_paragraph_line(&mut self, line: &str, blocks: &mut Vec<Block>) {
        match &mut self.open {
            Some(OpenBlock::Paragraph(lines)) => lines.push(line.to_string()),
            _ => {
                self.flush(blocks);
                self.open = Some(OpenBlock::Paragraph(vec![line.to_string()]));
            }
        }
    }

    /// Last item of the open ordered list, if one is open and non-empty.
    fn last_ordered_item(&mut self) -> Option<&mut ListItem> {
        match &mut self.open {
            Some(OpenBlock::OrderedList(items)) => items.last_mut(),
            _ => None,
        }
    }
}

fn process_line(line: &str, state: &mut ParseState, blocks: &mut Vec<Block>) {
    let trimmed = line.trim();

    // Blank line closes whatever is open
    if trimmed.is_empty() {
        state.flush(blocks);
        return;
    }

    // Headings close immediately and never stay open
    if let Some(text) = heading_text(trimmed) {
        state.flush(blocks);
        blocks.push(Block::Heading {
            content: format_inline(text),
        });
        return;
    }

    let nested = leading_whitespace(line) >= NESTED_INDENT;

    if !nested {
        if let Some(text) = ordered_item_text(trimmed) {
            state.push_ordered(ListItem::new(format_inline(text)), blocks);
            return;
        }
    }

    if let Some(text) = bullet_text(trimmed) {
        if nested {
            if let Some(parent) = state.last_ordered_item() {
                parent.nested.push(NestedListItem {
                    content: format_inline(text),
                });
                return;
            }
        }
        state.push_unordered(ListItem::new(format_inline(text)), blocks);
        return;
    }

    state.push_paragraph_line(trimmed, blocks);
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Text after at least one whitespace character, or `None` if there is no
/// whitespace or nothing follows it.
fn after_whitespace(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim_start();
    (!text.is_empty()).then_some(text)
}

/// `## text`
fn heading_text(line: &str) -> Option<&str> {
    after_whitespace(line.strip_prefix("##")?)
}

/// `12. text`. The number itself is discarded.
fn ordered_item_text(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    after_whitespace(line[digits..].strip_prefix('.')?)
}

/// `- text` or `• text`
fn bullet_text(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))?;
    after_whitespace(rest)
}
