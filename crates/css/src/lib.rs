//! Recolor CSS Engine
//!
//! Darkens or lightens the color values in stylesheet text, and prunes
//! declarations down to color-bearing properties.
//!
//! Matching is textual: rule blocks and declarations are found with regular
//! expressions rather than a full stylesheet parser.

pub mod blocks;
pub mod color;
pub mod config;
pub mod error;
pub mod intensity;
pub mod properties;
pub mod prune;
pub mod rewrite;

pub use blocks::{Declaration, RawBlock, RuleBlock, Segment};
pub use color::{Alpha, ColorSpace, ColorValue, FunctionalColor, HexCase, HexColor};
pub use config::{run, Config, Operation};
pub use error::{ColorError, ColorResult, ConfigError, ConfigResult};
pub use intensity::{darken, lighten, Adjustment, Percentage, Rounding};
pub use properties::{PropertyAllowList, DEFAULT_PROPERTIES};
pub use prune::{prune, PruneMode, Pruner};
pub use rewrite::{
    rewrite_colors, MatchMode, RewriteOptions, RewriteOutcome, Rewriter, SelectorScope,
};
