//! Property pruning
//!
//! Drops every declaration whose property is not on the allow-list. Blocks
//! left without declarations disappear, and kept blocks are re-emitted as
//! `selector {decl; decl}` on their own line.
//!
//! In [`PruneMode::Strict`] text that does not scan as a rule block (at-rule
//! statements, stray braces, empty blocks) is dropped from the output.
//! [`PruneMode::PassThrough`] copies that text through instead.

use crate::blocks::{self, RuleBlock, Segment};
use crate::properties::PropertyAllowList;

/// What happens to text outside recognized rule blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Drop it
    #[default]
    Strict,
    /// Copy it to the output unchanged
    PassThrough,
}

/// Removes non-allow-listed declarations
#[derive(Debug, Clone, Default)]
pub struct Pruner {
    allow_list: PropertyAllowList,
    mode: PruneMode,
}

impl Pruner {
    pub fn new(allow_list: PropertyAllowList, mode: PruneMode) -> Self {
        Self { allow_list, mode }
    }

    pub fn prune(&self, text: &str) -> String {
        let mut output = String::new();

        for segment in blocks::scan(text) {
            match segment {
                Segment::Block(raw) => {
                    let mut block = RuleBlock::from_raw(&raw);
                    block.retain(|decl| {
                        let keep = self.allow_list.contains(&decl.property);
                        if !keep {
                            log::debug!(
                                "Pruning '{}' from '{}'",
                                decl.property,
                                raw.selector().trim()
                            );
                        }
                        keep
                    });

                    if block.is_empty() {
                        continue;
                    }
                    output.push_str(&block.to_string());
                    output.push('\n');
                }
                Segment::Text(t) => match self.mode {
                    PruneMode::Strict => {
                        if !t.trim().is_empty() {
                            log::debug!("Dropping unmatched text '{}'", t.trim());
                        }
                    }
                    PruneMode::PassThrough => output.push_str(t),
                },
            }
        }

        output
    }
}

/// Prune with the default allow-list in strict mode
pub fn prune(text: &str) -> String {
    Pruner::default().prune(text)
}
