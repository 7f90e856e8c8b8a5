use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
}

impl Span {
    /// Visible text of the span, without emphasis markers.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(s) | Span::Bold(s) | Span::Italic(s) => s,
        }
    }
}

/// Concatenate the visible text of a span sequence.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

/// A bullet nested under an ordered list item. One level only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedListItem {
    pub content: Vec<Span>,
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
    /// Only ever populated for items of an ordered list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedListItem>,
}

impl ListItem {
    pub(crate) fn new(content: Vec<Span>) -> Self {
        Self {
            content,
            nested: Vec::new(),
        }
    }
}

/// Discriminant of a [`Block`], used by the spacing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    OrderedList,
    UnorderedList,
}

/// Block-level elements parsed from a case description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    Heading { content: Vec<Span> },
    Paragraph { content: Vec<Span> },
    OrderedList { items: Vec<ListItem> },
    UnorderedList { items: Vec<ListItem> },
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::OrderedList { .. } => BlockKind::OrderedList,
            Block::UnorderedList { .. } => BlockKind::UnorderedList,
        }
    }

    /// List items for list blocks, empty for headings and paragraphs.
    pub fn items(&self) -> &[ListItem] {
        match self {
            Block::OrderedList { items } | Block::UnorderedList { items } => items,
            Block::Heading { .. } | Block::Paragraph { .. } => &[],
        }
    }

    /// Visible text of the block. List entries (nested ones included) are
    /// separated by newlines; bullets and numbers are not part of the text.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { content } | Block::Paragraph { content } => plain_text(content),
            Block::OrderedList { items } | Block::UnorderedList { items } => {
                let mut lines = Vec::new();
                for item in items {
                    lines.push(plain_text(&item.content));
                    lines.extend(item.nested.iter().map(|n| plain_text(&n.content)));
                }
                lines.join("\n")
            }
        }
    }
}
