use serde::Serialize;

use crate::block::{Block, BlockKind};
use crate::config::SpacingConfig;

/// Vertical gap to leave before a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    None,
    Medium,
    Large,
}

impl Spacing {
    /// Length of the gap in the units of the target renderer (pt or px).
    pub fn points(self, config: &SpacingConfig) -> u32 {
        match self {
            Spacing::None => 0,
            Spacing::Medium => config.medium,
            Spacing::Large => config.large,
        }
    }
}

/// Gap before a block of kind `current` that follows a block of kind `previous`.
///
/// The first block never gets a gap and headings always get the large one.
/// Right after a heading the heading's own bottom margin is the gap, so
/// nothing is added. Any other transition gets the medium gap.
pub fn margin_for(current: BlockKind, previous: Option<BlockKind>, is_first: bool) -> Spacing {
    if is_first {
        return Spacing::None;
    }
    if current == BlockKind::Heading {
        return Spacing::Large;
    }
    if previous == Some(BlockKind::Heading) {
        return Spacing::None;
    }
    Spacing::Medium
}

/// Spacing before each block, index-aligned with `blocks`.
pub fn resolve(blocks: &[Block]) -> Vec<Spacing> {
    let mut previous = None;
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let spacing = margin_for(block.kind(), previous, i == 0);
            previous = Some(block.kind());
            spacing
        })
        .collect()
}
