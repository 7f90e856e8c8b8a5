//! Rich-text rendering for portfolio case descriptions.
//!
//! The markup is a small line-based dialect: `## ` headings, `**bold**` and
//! `*italic*` spans, `1.` ordered lists with `  - ` bullets nested under their
//! last item, `-`/`•` bulleted lists and plain paragraphs separated by blank
//! lines. Parsing never fails; every input yields a (possibly empty) list of
//! blocks.

mod block;
pub mod cases;
mod config;
mod html;
mod inline;
mod parser;
mod spacing;
mod typst;

use std::path::PathBuf;

pub use block::{Block, BlockKind, ListItem, NestedListItem, Span, plain_text};
pub use cases::{Case, CaseStore, Locale};
pub use config::{Config, ConfigError, FontConfig, PageConfig, SpacingConfig};
pub use html::blocks_to_html;
pub use inline::format_inline;
pub use parser::parse_blocks;
pub use spacing::{Spacing, margin_for, resolve as resolve_spacing};
pub use typst::blocks_to_typst;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid case data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown locale {0:?} (expected \"ru\" or \"en\")")]
    UnknownLocale(String),

    #[error("Typst compilation failed: {0}")]
    Typst(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Convert description markup to Typst markup.
pub fn markup_to_typst(markup: &str, config: &Config) -> String {
    blocks_to_typst(&parse_blocks(markup), config)
}

/// Convert description markup to an HTML fragment.
pub fn markup_to_html(markup: &str, config: &Config) -> String {
    blocks_to_html(&parse_blocks(markup), config)
}

/// Convert description markup to PDF bytes.
pub fn markup_to_pdf(markup: &str, config: &Config) -> Result<Vec<u8>, Error> {
    use typst_library::layout::PagedDocument;

    let typst_content = markup_to_typst(markup, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Typst(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
