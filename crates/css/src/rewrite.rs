//! Declaration rewriter
//!
//! Finds `property: <color>` occurrences and replaces the color literal with
//! the result of a transform. Only the literal's bytes change; property
//! names, whitespace, separators and selectors are copied through as written.
//!
//! Two modes:
//! - [`MatchMode::Unscoped`] scans the whole text for any allow-listed
//!   property followed by a color, whether or not it sits in a rule block.
//! - [`MatchMode::Scoped`] only looks inside rule blocks whose selector
//!   contains one of the scope tokens, and only at one property.
//!
//! Shadow values with offsets (`box-shadow: 0 1px #000`) are not decomposed;
//! a property matches only when the color directly follows the colon.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::blocks::{self, Segment};
use crate::color::{self, ColorValue};
use crate::error::{ColorError, ConfigError, ConfigResult};
use crate::properties::PropertyAllowList;

/// Color literal alternatives, shared by both modes.
///
/// Functional notations accept any argument text so malformed literals reach
/// the parser and get reported instead of silently skipped.
const COLOR_LITERAL: &str = r"#[0-9a-fA-F]{3,6}\b|(?:rgba?|hsla?)\([^)]*\)|transparent\b";

/// Default selector tokens for scoped rewriting
pub const DEFAULT_SCOPE_TOKENS: [&str; 3] = ["btn", "text", "badge"];

/// Default property for scoped rewriting
pub const DEFAULT_SCOPE_PROPERTY: &str = "color";

/// Restricts rewriting to blocks whose selector contains a token as a whole
/// word, and to a single property within them
#[derive(Debug, Clone)]
pub struct SelectorScope {
    tokens: Vec<String>,
    property: String,
    selector_pattern: Regex,
}

impl SelectorScope {
    pub fn new<I, S>(tokens: I, property: impl Into<String>) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.trim().is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(ConfigError::EmptyScope);
        }

        let property = property.into().trim().to_string();
        if property.is_empty() {
            return Err(ConfigError::EmptyProperty);
        }

        let alternation = tokens.iter().map(|t| token_pattern(t.trim())).collect::<Vec<_>>();
        let selector_pattern = Regex::new(&format!("(?:{})", alternation.join("|")))?;

        Ok(Self { tokens, property, selector_pattern })
    }

    /// Does the selector contain one of the tokens as a whole word?
    pub fn matches(&self, selector: &str) -> bool {
        self.selector_pattern.is_match(selector)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn property(&self) -> &str {
        &self.property
    }
}

/// Escape a scope token, anchoring only the edges that are word characters.
///
/// `\b` next to a leading `.` or `#` would demand a word character before
/// the sigil, so `.btn` could never match a selector that starts with it.
fn token_pattern(token: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if token.starts_with(is_word) { r"\b" } else { "" };
    let trail = if token.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", lead, regex::escape(token), trail)
}

fn default_selector_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:btn|text|badge)\b").unwrap())
}

impl Default for SelectorScope {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_SCOPE_TOKENS.iter().map(|t| t.to_string()).collect(),
            property: DEFAULT_SCOPE_PROPERTY.to_string(),
            selector_pattern: default_selector_pattern().clone(),
        }
    }
}

/// Where declarations are looked for
#[derive(Debug, Clone, Default)]
pub enum MatchMode {
    #[default]
    Unscoped,
    Scoped(SelectorScope),
}

/// Options for [`Rewriter`]
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    pub mode: MatchMode,
    /// Properties considered in unscoped mode
    pub allow_list: PropertyAllowList,
}

impl RewriteOptions {
    pub fn unscoped() -> Self {
        Self::default()
    }

    pub fn scoped(scope: SelectorScope) -> Self {
        Self { mode: MatchMode::Scoped(scope), ..Self::default() }
    }
}

/// Rewritten text plus the literals that could not be decoded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteOutcome {
    pub text: String,
    pub warnings: Vec<ColorError>,
}

impl RewriteOutcome {
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Unscoped(Regex),
    Scoped { scope: SelectorScope, declaration: Regex },
}

/// Compiled rewriter, reusable across inputs
#[derive(Debug, Clone)]
pub struct Rewriter {
    matcher: Matcher,
}

impl Rewriter {
    pub fn new(options: &RewriteOptions) -> ConfigResult<Self> {
        let matcher = match &options.mode {
            MatchMode::Unscoped => {
                if options.allow_list.is_empty() {
                    return Err(ConfigError::EmptyAllowList);
                }
                let names = options
                    .allow_list
                    .names_longest_first()
                    .into_iter()
                    .map(regex::escape)
                    .collect::<Vec<_>>();
                let pattern = format!(r"(?:{})\s*:\s*({})", names.join("|"), COLOR_LITERAL);
                Matcher::Unscoped(Regex::new(&pattern)?)
            }
            MatchMode::Scoped(scope) => {
                let pattern = format!(
                    r"{}\s*:\s*({})\s*(?:;|$)",
                    regex::escape(scope.property()),
                    COLOR_LITERAL
                );
                Matcher::Scoped { scope: scope.clone(), declaration: Regex::new(&pattern)? }
            }
        };
        Ok(Self { matcher })
    }

    /// Apply `transform` to every matched color literal
    pub fn rewrite<F>(&self, text: &str, transform: F) -> RewriteOutcome
    where
        F: Fn(ColorValue) -> ColorValue,
    {
        let mut outcome = RewriteOutcome {
            text: String::with_capacity(text.len()),
            warnings: Vec::new(),
        };

        match &self.matcher {
            Matcher::Unscoped(pattern) => {
                substitute(text, pattern, |_| true, &transform, &mut outcome);
            }
            Matcher::Scoped { scope, declaration } => {
                for segment in blocks::scan(text) {
                    match segment {
                        Segment::Text(t) => outcome.text.push_str(t),
                        Segment::Block(block) if scope.matches(block.selector()) => {
                            log::debug!("Rewriting block '{}'", block.selector().trim());
                            outcome.text.push_str(block.head());
                            let body = block.body();
                            substitute(
                                body,
                                declaration,
                                |caps| starts_declaration(body, caps),
                                &transform,
                                &mut outcome,
                            );
                            outcome.text.push_str(block.tail());
                        }
                        Segment::Block(block) => outcome.text.push_str(block.as_str()),
                    }
                }
            }
        }

        outcome
    }
}

/// The property name must begin the body or follow whitespace, `;` or `{`,
/// so `background-color` is not mistaken for `color`.
fn starts_declaration(body: &str, caps: &Captures<'_>) -> bool {
    let Some(whole) = caps.get(0) else {
        return false;
    };
    body[..whole.start()]
        .chars()
        .next_back()
        .map_or(true, |c| c.is_whitespace() || c == ';' || c == '{')
}

/// Copy `text` into the outcome, replacing capture group 1 of every accepted
/// match with its transformed color.
fn substitute<A, F>(
    text: &str,
    pattern: &Regex,
    accept: A,
    transform: &F,
    outcome: &mut RewriteOutcome,
) where
    A: Fn(&Captures<'_>) -> bool,
    F: Fn(ColorValue) -> ColorValue,
{
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let Some(literal) = caps.get(1) else {
            continue;
        };
        if !accept(&caps) {
            continue;
        }

        outcome.text.push_str(&text[last..literal.start()]);
        match color::try_parse(literal.as_str()) {
            Ok(value) => outcome.text.push_str(&color::format(&transform(value))),
            Err(e) => {
                log::warn!("{}", e);
                outcome.text.push_str(literal.as_str());
                outcome.warnings.push(e);
            }
        }
        last = literal.end();
    }

    outcome.text.push_str(&text[last..]);
}

/// Rewrite every matched color literal in `text`
pub fn rewrite_colors<F>(text: &str, transform: F, options: &RewriteOptions) -> ConfigResult<String>
where
    F: Fn(ColorValue) -> ColorValue,
{
    Ok(Rewriter::new(options)?.rewrite(text, transform).text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intensity::{darken, lighten, Percentage};

    fn pct(value: f64) -> Percentage {
        Percentage::new(value).unwrap()
    }

    fn darken_all(text: &str, p: f64) -> RewriteOutcome {
        Rewriter::new(&RewriteOptions::unscoped())
            .unwrap()
            .rewrite(text, |c| darken(c, pct(p)))
    }

    fn lighten_scoped(text: &str, p: f64) -> RewriteOutcome {
        Rewriter::new(&RewriteOptions::scoped(SelectorScope::default()))
            .unwrap()
            .rewrite(text, |c| lighten(c, pct(p)))
    }

    #[test]
    fn test_unscoped_darkens_every_listed_property() {
        let css = "a { color: #ff0000; background-color:#FFF; margin: 0 }";
        let out = darken_all(css, 0.3);
        assert_eq!(out.text, "a { color: #b20000; background-color:#b2b2b2; margin: 0 }");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_unscoped_outside_blocks() {
        assert_eq!(darken_all("fill : rgb(100, 50, 0)", 0.5).text, "fill : rgb(50, 25, 0)");
    }

    #[test]
    fn test_unscoped_ignores_other_properties() {
        let css = "a { border: 1px solid #ffffff; }";
        assert_eq!(darken_all(css, 0.5).text, css);
    }

    #[test]
    fn test_unscoped_matches_property_suffix() {
        assert_eq!(darken_all("border-top-color: #ffffff", 1.0).text, "border-top-color: #000000");
    }

    #[test]
    fn test_unscoped_skips_eight_digit_hex() {
        let css = "color: #ffffff80;";
        assert_eq!(darken_all(css, 0.5).text, css);
    }

    #[test]
    fn test_unscoped_shadow_with_offsets_untouched() {
        let css = "box-shadow: 0 1px 2px #000000;";
        assert_eq!(darken_all(css, 0.5).text, css);
    }

    #[test]
    fn test_unscoped_bare_shadow_color() {
        assert_eq!(darken_all("text-shadow: #ffffff;", 0.5).text, "text-shadow: #7f7f7f;");
    }

    #[test]
    fn test_transparent_untouched() {
        let css = "background-color: transparent;";
        assert_eq!(darken_all(css, 0.9).text, css);
    }

    #[test]
    fn test_invalid_literals_warn() {
        let css = "color: hsl(not,a,color); fill: #abcd;";
        let out = darken_all(css, 0.5);
        assert_eq!(out.text, css);
        assert_eq!(
            out.warnings,
            vec![ColorError::invalid_hsl("hsl(not,a,color)"), ColorError::invalid_hex("#abcd")]
        );
    }

    #[test]
    fn test_scoped_lightens_matching_block_only() {
        let css = ".btn { color: #000000; }\n.card { color: #000000; }";
        let out = lighten_scoped(css, 0.75);
        assert_eq!(out.text, ".btn { color: #BFBFBF; }\n.card { color: #000000; }");
    }

    #[test]
    fn test_scoped_whole_word_tokens() {
        let css = ".btn-primary { color: #000 }\n.btnx { color: #000 }\n.subtext { color: #000 }";
        let out = lighten_scoped(css, 1.0);
        assert_eq!(
            out.text,
            ".btn-primary { color: #FFFFFF }\n.btnx { color: #000 }\n.subtext { color: #000 }"
        );
    }

    #[test]
    fn test_scoped_only_named_property() {
        let css = ".badge { background-color: #000; border-color: #000; color: #000; }";
        let out = lighten_scoped(css, 1.0);
        assert_eq!(
            out.text,
            ".badge { background-color: #000; border-color: #000; color: #FFFFFF; }"
        );
    }

    #[test]
    fn test_scoped_trailing_declaration() {
        let css = ".text {margin: 0;color:#000}";
        assert_eq!(lighten_scoped(css, 1.0).text, ".text {margin: 0;color:#FFFFFF}");
    }

    #[test]
    fn test_scoped_adjacent_declarations() {
        let css = ".text {color: #000;color: #000}";
        assert_eq!(lighten_scoped(css, 1.0).text, ".text {color: #FFFFFF;color: #FFFFFF}");
    }

    #[test]
    fn test_scoped_requires_whole_value() {
        let css = ".btn { color: #000 !important; }";
        assert_eq!(lighten_scoped(css, 1.0).text, css);
    }

    #[test]
    fn test_scoped_lighten_leaves_hsl() {
        let css = ".btn { color: hsl(0, 0%, 0%); }";
        assert_eq!(lighten_scoped(css, 1.0).text, css);
    }

    #[test]
    fn test_scoped_preserves_unmatched_text() {
        let css = "/* header */ @import url(x.css);\n.btn{color:#000}\n}\ntail";
        let out = lighten_scoped(css, 1.0);
        assert_eq!(out.text, "/* header */ @import url(x.css);\n.btn{color:#FFFFFF}\n}\ntail");
    }

    #[test]
    fn test_custom_scope() {
        let scope = SelectorScope::new(["nav"], "fill").unwrap();
        let css = "nav svg { fill: #000; color: #000 }";
        let out =
            rewrite_colors(css, |c| darken(c, pct(0.0)), &RewriteOptions::scoped(scope)).unwrap();
        assert_eq!(out, "nav svg { fill: #000000; color: #000 }");
    }

    #[test]
    fn test_scope_validation() {
        assert_eq!(
            SelectorScope::new(Vec::<String>::new(), "color").err(),
            Some(ConfigError::EmptyScope)
        );
        assert_eq!(SelectorScope::new([" "], "color").err(), Some(ConfigError::EmptyScope));
        assert_eq!(SelectorScope::new(["btn"], " ").err(), Some(ConfigError::EmptyProperty));
    }

    #[test]
    fn test_empty_allow_list_rejected() {
        let options = RewriteOptions {
            allow_list: PropertyAllowList::new(Vec::<String>::new()),
            ..RewriteOptions::unscoped()
        };
        assert_eq!(Rewriter::new(&options).err(), Some(ConfigError::EmptyAllowList));
    }

    #[test]
    fn test_default_scope() {
        let scope = SelectorScope::default();
        assert_eq!(scope.tokens(), ["btn", "text", "badge"]);
        assert_eq!(scope.property(), "color");
        assert!(scope.matches(".card .badge"));
        assert!(!scope.matches(".card"));
    }

    #[test]
    fn test_scope_tokens_are_literal() {
        let scope = SelectorScope::new(["a.b"], "color").unwrap();
        assert!(scope.matches("div a.b"));
        assert!(!scope.matches("div axb"));
    }

    #[test]
    fn test_scope_token_with_class_sigil() {
        let scope = SelectorScope::new([".btn", "#nav"], "color").unwrap();
        assert!(scope.matches(".btn"));
        assert!(scope.matches("div .btn:hover"));
        assert!(scope.matches("#nav > a"));
        assert!(!scope.matches(".btnx"));
        assert!(!scope.matches("btn"));

        let options = RewriteOptions::scoped(scope);
        let out = Rewriter::new(&options)
            .unwrap()
            .rewrite(".btn { color: #000000; }", |c| lighten(c, pct(0.75)));
        assert_eq!(out.text, ".btn { color: #BFBFBF; }");
    }

    #[test]
    fn test_overflowing_channel_is_left_unchanged() {
        let css = format!("a {{ color: rgb({}, 0, 0); }}", "9".repeat(400));
        let out = Rewriter::new(&RewriteOptions::unscoped())
            .unwrap()
            .rewrite(&css, |c| darken(c, pct(1.0)));
        assert_eq!(out.text, css);
        assert_eq!(out.warnings.len(), 1);
        assert!(matches!(out.warnings[0], ColorError::InvalidRgb { .. }));
    }
}
