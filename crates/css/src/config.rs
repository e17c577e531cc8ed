//! Invocation configuration
//!
//! Everything one run needs, fixed for the duration of that run.

use crate::error::ConfigResult;
use crate::intensity::{Adjustment, Percentage};
use crate::properties::PropertyAllowList;
use crate::prune::{PruneMode, Pruner};
use crate::rewrite::{MatchMode, RewriteOptions, RewriteOutcome, Rewriter, SelectorScope};

/// The transform to run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Darken(Percentage),
    Lighten(Percentage),
    Prune(PruneMode),
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub operation: Operation,
    /// `None` rewrites every allow-listed property everywhere.
    /// Ignored by [`Operation::Prune`].
    pub scope: Option<SelectorScope>,
    pub allow_list: PropertyAllowList,
}

impl Config {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            scope: None,
            allow_list: PropertyAllowList::default(),
        }
    }

    pub fn with_scope(mut self, scope: SelectorScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_allow_list(mut self, allow_list: PropertyAllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            mode: match &self.scope {
                Some(scope) => MatchMode::Scoped(scope.clone()),
                None => MatchMode::Unscoped,
            },
            allow_list: self.allow_list.clone(),
        }
    }
}

/// Transform `text` according to `config`
pub fn run(config: &Config, text: &str) -> ConfigResult<RewriteOutcome> {
    let (adjustment, pct) = match config.operation {
        Operation::Darken(pct) => (Adjustment::Darken, pct),
        Operation::Lighten(pct) => (Adjustment::Lighten, pct),
        Operation::Prune(mode) => {
            let pruner = Pruner::new(config.allow_list.clone(), mode);
            return Ok(RewriteOutcome { text: pruner.prune(text), warnings: Vec::new() });
        }
    };

    log::debug!("{:?} by {}", adjustment, pct);
    let rewriter = Rewriter::new(&config.rewrite_options())?;
    Ok(rewriter.rewrite(text, |color| adjustment.apply(color, pct)))
}
